//! Reading, writing and checking SED-ML documents.
//!
//! ```no_run
//! let doc = sedml::read_sedml("experiment.sedml");
//! if doc.has_errors() {
//!     eprint!("{}", doc.error_log());
//! }
//! let xml = sedml::write_sedml_to_string(&doc)?;
//! # Ok::<(), sedml::SedmlError>(())
//! ```

pub mod core;
pub mod diagnostics;
pub mod kisao;
pub mod math;
pub mod model;
pub mod namespace;
pub mod summary;
pub mod types;
pub mod validation;
pub mod xml;

use std::fs;
use std::path::Path;

use crate::diagnostics::{ErrorCode, Severity};

pub use crate::core::SedBase;
pub use crate::diagnostics::{Diagnostic, ErrorLog};
pub use crate::model::SedDocument;
pub use crate::namespace::SedNamespace;
pub use crate::summary::write_summary;
pub use crate::types::{SedElement, TypeCode};
pub use crate::xml::{ErrorContext, SedmlError, WriteOptions};

/// Read a SED-ML file.
///
/// Always returns a document. A missing or unreadable file gives an empty
/// document whose log holds an `XML_FILE_UNREADABLE` error; bytes that are
/// not UTF-8 are logged and replaced before reading goes on.
pub fn read_sedml(path: impl AsRef<Path>) -> SedDocument {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) => {
            log::warn!("cannot read {}: {}", path.display(), error);
            let mut doc = SedDocument::new();
            doc.error_log_mut().log(
                ErrorCode::XML_FILE_UNREADABLE,
                Severity::Error,
                0,
                0,
                format!("File '{}' could not be read: {}", path.display(), error),
            );
            return doc;
        }
    };
    log::debug!("reading {} ({} bytes)", path.display(), bytes.len());

    match String::from_utf8(bytes) {
        Ok(text) => read_sedml_from_str(&text),
        Err(error) => {
            let valid_up_to = error.utf8_error().valid_up_to();
            let text = String::from_utf8_lossy(error.as_bytes()).into_owned();
            let mut doc = read_sedml_from_str(&text);
            let line = text[..valid_up_to].matches('\n').count() + 1;
            doc.error_log_mut().log(
                ErrorCode::NOT_UTF8,
                Severity::Error,
                line,
                0,
                format!(
                    "File '{}' is not valid UTF-8 (first invalid byte at offset {}).",
                    path.display(),
                    valid_up_to
                ),
            );
            doc
        }
    }
}

/// Read a SED-ML document from XML text.
pub fn read_sedml_from_str(xml: &str) -> SedDocument {
    xml::read_document(xml)
}

/// Write a document to a file, indented and with an XML declaration.
pub fn write_sedml(doc: &SedDocument, path: impl AsRef<Path>) -> Result<(), SedmlError> {
    let path = path.as_ref();
    let xml = write_sedml_to_string(doc)?;
    fs::write(path, xml).map_err(|error| SedmlError::io(error, path))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

pub fn write_sedml_to_string(doc: &SedDocument) -> Result<String, SedmlError> {
    Ok(doc.to_xml_string()?)
}
