//! Input Kind
//!
//! Character classes the edit surface accepts, the terminal counterpart of a
//! platform keyboard/input type.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Any printable character
    #[default]
    Text,
    /// ASCII digits only
    Numeric,
    /// Letters and digits
    Alphanumeric,
    /// Any printable character, meant to be paired with a masker
    Password,
}

impl InputKind {
    pub fn accepts(&self, c: char) -> bool {
        match self {
            Self::Numeric => c.is_ascii_digit(),
            Self::Alphanumeric => c.is_alphanumeric(),
            Self::Text | Self::Password => !c.is_control(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Numeric => "numeric",
            Self::Alphanumeric => "alphanumeric",
            Self::Password => "password",
        }
    }
}
