//! SED-ML XML reading and writing.

pub mod deserialize;
pub mod errors;
pub mod quick;
pub mod serialize;

pub use deserialize::{DeserializeError, read_document};
pub use errors::{ErrorContext, SedmlError};
pub use serialize::{SerializeError, WriteOptions, to_xml_string, write_document};
