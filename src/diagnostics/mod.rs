//! Diagnostics collected while reading and checking SED-ML documents.
//!
//! Problems found in a document are not Rust errors: reading always produces
//! a [`SedDocument`](crate::SedDocument), and anything wrong with it is
//! recorded as a [`Diagnostic`] in the document's [`ErrorLog`]. Callers
//! decide what severity is fatal for them.

pub mod codes;
pub mod error_log;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use codes::ErrorCode;
pub use error_log::{Diagnostic, ErrorLog};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    /// Error and Fatal entries make a document unusable.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error | Severity::Fatal)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "Information",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which layer or rule set produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Internal,
    System,
    Xml,
    Sedml,
    GeneralConsistency,
    IdentifierConsistency,
    MathmlConsistency,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Internal => "Internal",
            Category::System => "Operating system",
            Category::Xml => "XML content",
            Category::Sedml => "General SED-ML conformance",
            Category::GeneralConsistency => "General consistency",
            Category::IdentifierConsistency => "Identifier consistency",
            Category::MathmlConsistency => "MathML consistency",
        };
        f.write_str(name)
    }
}
