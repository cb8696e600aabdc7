//! System clipboard access for pasting codes

use crate::error::Result;

pub fn read_text() -> Result<String> {
    let mut clipboard = arboard::Clipboard::new()?;
    Ok(clipboard.get_text()?)
}
