//! SId syntax: `(letter | '_') (letter | digit | '_')*`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SidError {
    #[error("identifier is empty")]
    Empty,
    #[error("identifier '{0}' must start with a letter or underscore")]
    InvalidStart(String),
    #[error("identifier '{id}' contains invalid character '{ch}'")]
    InvalidCharacter { id: String, ch: char },
}

/// Checks `id` against the SId production.
pub fn is_valid_sid(id: &str) -> bool {
    parse_sid(id).is_ok()
}

/// Validates `id` and returns it owned.
pub fn parse_sid(id: &str) -> Result<String, SidError> {
    let mut chars = id.chars();
    match chars.next() {
        None => return Err(SidError::Empty),
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Err(SidError::InvalidStart(id.to_string())),
    }
    if let Some(ch) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(SidError::InvalidCharacter {
            id: id.to_string(),
            ch,
        });
    }
    Ok(id.to_string())
}
