//! Quick-xml helper utilities for SED-ML (de)serialization.
//!
//! This module provides ergonomic wrappers around quick-xml's low-level APIs
//! to reduce boilerplate in the element readers and the writer.

pub mod de;
pub mod ser;

pub use de::{Attrs, ChildElement, XmlCursor};
pub use ser::{AttrList, XmlEmitter};
