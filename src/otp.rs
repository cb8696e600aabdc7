//! Time-based One-Time Password (TOTP) Verification
//!
//! Checks completed codes against RFC 6238 for the demo.

use totp_rs::{Algorithm, Secret, TOTP};

use crate::error::{CodeFieldError, Result};

const ISSUER: &str = "code-field";
const ACCOUNT: &str = "demo";

pub struct TotpVerifier {
    totp: TOTP,
}

impl TotpVerifier {
    /// Accepts a raw base32 secret or an otpauth:// URI
    pub fn from_user_input(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(totp_error("TOTP secret cannot be empty"));
        }

        let totp = if trimmed.to_lowercase().starts_with("otpauth://") {
            TOTP::from_url(trimmed).map_err(totp_error)?
        } else {
            from_raw_secret(trimmed)?
        };
        Ok(Self { totp })
    }

    pub fn digits(&self) -> usize {
        self.totp.digits
    }

    pub fn verify(&self, code: &str) -> Result<bool> {
        self.totp.check_current(code).map_err(totp_error)
    }

    #[cfg(test)]
    pub(crate) fn current_code(&self) -> String {
        self.totp.generate_current().unwrap()
    }

    /// Seconds until the current code rolls over
    pub fn seconds_remaining(&self) -> u64 {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.totp.step - (now % self.totp.step)
    }
}

fn totp_error(e: impl ToString) -> CodeFieldError {
    CodeFieldError::Totp(e.to_string())
}

fn from_raw_secret(secret: &str) -> Result<TOTP> {
    let cleaned = normalize_base32(secret);
    validate_base32(&cleaned)?;

    let bytes = Secret::Encoded(cleaned)
        .to_bytes()
        .map_err(|e| totp_error(format!("Invalid base32 secret: {:?}", e)))?;

    TOTP::new(
        Algorithm::SHA1,
        6,
        1,
        30,
        pad_secret_bytes(bytes),
        Some(ISSUER.to_string()),
        ACCOUNT.to_string(),
    )
    .map_err(totp_error)
}

/// Normalize base32 input (remove spaces, dashes, convert to uppercase)
fn normalize_base32(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase()
}

fn validate_base32(secret: &str) -> Result<()> {
    if secret.len() < 8 {
        return Err(totp_error(format!(
            "TOTP secret too short. Minimum 8 characters required, got {}",
            secret.len()
        )));
    }

    if !secret.chars().all(|c| matches!(c, 'A'..='Z' | '2'..='7' | '=')) {
        return Err(totp_error("Invalid characters in TOTP secret. Must be base32 (A-Z, 2-7)"));
    }

    Ok(())
}

/// totp-rs wants at least 128 bits; short secrets are repeated up to that
fn pad_secret_bytes(mut bytes: Vec<u8>) -> Vec<u8> {
    const MIN_BYTES: usize = 16;

    if bytes.is_empty() || bytes.len() >= MIN_BYTES {
        return bytes;
    }
    let original = bytes.clone();
    bytes.extend(original.iter().cycle().take(MIN_BYTES - original.len()));
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_code_verifies() {
        let verifier = TotpVerifier::from_user_input("JBSWY3DPEHPK3PXP").unwrap();
        let code = verifier.current_code();
        assert_eq!(code.len(), verifier.digits());
        assert!(verifier.verify(&code).unwrap());
    }

    #[test]
    fn test_wrong_code_rejected() {
        let verifier = TotpVerifier::from_user_input("JBSWY3DPEHPK3PXP").unwrap();
        let code = verifier.current_code();
        let wrong: String = code.chars().map(|c| if c == '0' { '1' } else { '0' }).collect();
        assert!(!verifier.verify(&wrong).unwrap());
    }

    #[test]
    fn test_raw_secret_with_spaces_and_lowercase() {
        assert!(TotpVerifier::from_user_input("jbsw y3dp ehpk 3pxp").is_ok());
    }

    #[test]
    fn test_otpauth_uri_digits() {
        let uri = "otpauth://totp/GitHub:user@example.com?secret=JBSWY3DPEHPK3PXPJBSWY3DPEHPK3PXP&issuer=GitHub&digits=8";
        let verifier = TotpVerifier::from_user_input(uri).unwrap();
        assert_eq!(verifier.digits(), 8);
    }

    #[test]
    fn test_rejects_bad_secrets() {
        assert!(TotpVerifier::from_user_input("").is_err());
        assert!(TotpVerifier::from_user_input("SHORT").is_err());
        assert!(TotpVerifier::from_user_input("INVALID!@#SECRET").is_err());
    }

    #[test]
    fn test_pad_secret_bytes() {
        assert_eq!(pad_secret_bytes(vec![1, 2, 3]).len(), 16);
        assert_eq!(pad_secret_bytes(vec![1, 2, 3])[3..6], [1, 2, 3]);
        assert_eq!(pad_secret_bytes(vec![7; 20]).len(), 20);
    }

    #[test]
    fn test_seconds_remaining() {
        let verifier = TotpVerifier::from_user_input("JBSWY3DPEHPK3PXP").unwrap();
        let remaining = verifier.seconds_remaining();
        assert!((1..=30).contains(&remaining));
    }
}
