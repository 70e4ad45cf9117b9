//! Element readers, one module per family of the SED-ML object model.
//!
//! Reading is lenient:
//! problems with the document are recorded as diagnostics in the document's
//! error log and reading carries on wherever it can. `DeserializeError` is
//! only used internally for conditions that stop the reader (malformed XML,
//! unexpected end of input); those end up in the log as fatal diagnostics.

pub mod data;
pub mod data_generator;
pub mod document;
pub mod helpers;
pub mod math;
pub mod model;
pub mod output;
pub mod simulation;
pub mod style;
pub mod task;

pub use document::read_document;

use thiserror::Error;

/// Conditions that stop the reader.
#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    #[error("{0}")]
    Custom(String),
    #[error("The document ended before all elements were closed")]
    UnexpectedEof,
    #[error("Expected <{expected}> as the root element, found <{found}>")]
    UnexpectedElement { expected: String, found: String },
}
