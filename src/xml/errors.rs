//! Errors of the file-level reading and writing API.
//!
//! Reading a document never fails: problems end up in the document's
//! [`ErrorLog`](crate::diagnostics::ErrorLog). [`SedmlError`] covers files
//! that cannot be written, documents that cannot be serialized and formulas
//! that cannot be parsed.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::math::FormulaError;
use crate::xml::deserialize::DeserializeError;
use crate::xml::serialize::SerializeError;

#[derive(Debug, Error)]
pub enum SedmlError {
    /// A file could not be opened, read or written.
    #[error("IO error{context}: {source}")]
    Io {
        source: std::io::Error,
        context: ErrorContext,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] SerializeError),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] DeserializeError),

    #[error("Formula error: {0}")]
    Formula(#[from] FormulaError),
}

impl SedmlError {
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        SedmlError::Io {
            source,
            context: ErrorContext::for_file(path),
        }
    }
}

/// The file an error is about, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext {
    pub file_path: Option<PathBuf>,
}

impl ErrorContext {
    pub fn for_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: Some(path.into()),
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file_path {
            Some(path) => write!(f, " in file '{}'", path.display()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display() {
        assert_eq!(ErrorContext::default().to_string(), "");
        assert_eq!(
            ErrorContext::for_file("exp.sedml").to_string(),
            " in file 'exp.sedml'"
        );
    }

    #[test]
    fn test_io_error_message() {
        let error = SedmlError::io(
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            "missing.sedml",
        );
        assert_eq!(
            error.to_string(),
            "IO error in file 'missing.sedml': no such file"
        );
    }

    #[test]
    fn test_formula_errors_convert() {
        fn parse(text: &str) -> Result<crate::math::Math, SedmlError> {
            Ok(crate::math::parse_formula(text)?)
        }
        assert!(matches!(parse("1 +"), Err(SedmlError::Formula(_))));
        assert!(parse("k * S1").is_ok());
    }
}
