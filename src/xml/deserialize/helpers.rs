//! Common utilities for element readers.
//!
//! This module provides helpers for:
//! - Reading and checking the attributes of one element (`AttrReader`)
//! - Walking the children of an element, including the `notes` and
//!   `annotation` children every SED-ML element may carry (`read_children`)
//! - Walking `listOf*` containers (`read_list`)

use std::collections::HashSet;
use std::str::FromStr;

use quick_xml::events::BytesStart;

use crate::core::SedBase;
use crate::diagnostics::{Diagnostic, ErrorCode, Severity};
use crate::types::TypeCode;
use crate::xml::deserialize::DeserializeError;
use crate::xml::quick::de::{Attrs, ChildElement, XmlCursor};

/// Reads the attributes of a single element.
///
/// Every attribute that is looked up is marked as known; when the reader is
/// [finished](AttrReader::finish), attributes nobody asked for are reported
/// as not allowed on the element. Missing required attributes and values of
/// the wrong type are reported too, and the affected field falls back to its
/// default.
#[derive(Debug)]
pub struct AttrReader {
    attrs: Attrs,
    kind: TypeCode,
    line: usize,
    column: usize,
    known: HashSet<&'static str>,
    problems: Vec<Diagnostic>,
}

impl AttrReader {
    pub fn new(
        cursor: &XmlCursor<'_>,
        start: &BytesStart<'_>,
        kind: TypeCode,
    ) -> Result<Self, DeserializeError> {
        let (line, column) = cursor.location();
        Ok(Self {
            attrs: cursor.parse_attrs(start)?,
            kind,
            line,
            column,
            known: HashSet::new(),
            problems: Vec::new(),
        })
    }

    /// The underlying attribute map.
    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn report(&mut self, code: ErrorCode, message: String) {
        self.problems.push(Diagnostic::new(
            code,
            Severity::Error,
            self.line,
            self.column,
            message,
        ));
    }

    fn mismatch(&mut self, key: &str, expected: &str, value: &str) {
        let message = format!(
            "The value '{}' of attribute '{}' on <{}> is not a valid {}.",
            value,
            key,
            self.attrs.element_name(),
            expected
        );
        self.report(ErrorCode::XML_ATTRIBUTE_TYPE_MISMATCH, message);
    }

    /// The `id`, `name` and `metaid` attributes shared by all elements.
    pub fn base(&mut self) -> SedBase {
        SedBase {
            id: self.opt("id"),
            name: self.opt("name"),
            metaid: self.opt("metaid"),
            ..SedBase::default()
        }
    }

    /// An optional string attribute.
    pub fn opt(&mut self, key: &'static str) -> Option<String> {
        self.known.insert(key);
        self.attrs.get_opt_string(key)
    }

    /// A required string attribute; reported and left empty when missing.
    pub fn required(&mut self, key: &'static str) -> String {
        match self.opt(key) {
            Some(value) => value,
            None => {
                self.missing(key);
                String::new()
            }
        }
    }

    fn missing(&mut self, key: &str) {
        let message = format!(
            "The <{}> element is missing the required attribute '{}'.",
            self.attrs.element_name(),
            key
        );
        self.report(ErrorCode::allowed_attributes(self.kind), message);
    }

    /// An optional attribute parsed with `FromStr`, with `expected` naming
    /// the value type in diagnostics.
    pub fn opt_parsed<T: FromStr>(&mut self, key: &'static str, expected: &str) -> Option<T> {
        let raw = self.opt(key)?;
        match raw.trim().parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                self.mismatch(key, expected, &raw);
                None
            }
        }
    }

    pub fn opt_f64(&mut self, key: &'static str) -> Option<f64> {
        self.opt_parsed(key, "double")
    }

    /// A required double; reported and read as `0.0` when missing or invalid.
    pub fn required_f64(&mut self, key: &'static str) -> f64 {
        if !self.attrs.has(key) {
            self.known.insert(key);
            self.missing(key);
            return 0.0;
        }
        self.opt_f64(key).unwrap_or_default()
    }

    pub fn opt_i32(&mut self, key: &'static str) -> Option<i32> {
        self.opt_parsed(key, "integer")
    }

    pub fn opt_u32(&mut self, key: &'static str) -> Option<u32> {
        self.opt_parsed(key, "non-negative integer")
    }

    /// A required non-negative integer; reported when missing or invalid.
    pub fn required_u32(&mut self, key: &'static str) -> Option<u32> {
        if !self.attrs.has(key) {
            self.known.insert(key);
            self.missing(key);
            return None;
        }
        self.opt_u32(key)
    }

    pub fn opt_bool(&mut self, key: &'static str) -> Option<bool> {
        self.known.insert(key);
        match self.attrs.get_opt_bool(key) {
            Ok(value) => value,
            Err(_) => {
                let raw = self.attrs.get_opt_string(key).unwrap_or_default();
                self.mismatch(key, "boolean", &raw);
                None
            }
        }
    }

    /// One of the string enumerations of the model.
    pub fn opt_enum<T: FromStr>(&mut self, key: &'static str) -> Option<T> {
        self.opt_parsed(key, "value for this enumeration")
    }

    /// Report unknown attributes and any problems found, handing the
    /// diagnostics over to the cursor's log.
    pub fn finish(mut self, cursor: &mut XmlCursor<'_>) {
        let unknown: Vec<String> = self
            .attrs
            .keys()
            .filter(|key| !self.known.contains(*key))
            .map(str::to_string)
            .collect();
        for key in unknown {
            let message = format!(
                "Attribute '{}' is not allowed on <{}>.",
                key,
                self.attrs.element_name()
            );
            self.report(ErrorCode::allowed_attributes(self.kind), message);
        }
        for problem in self.problems {
            cursor.log_at(
                problem.code,
                problem.severity,
                problem.line,
                problem.column,
                problem.message,
            );
        }
    }
}

/// Walk the children of `parent`.
///
/// `notes` and `annotation` are stored on `base`; a second occurrence of
/// either is reported and skipped. Every other child is handed to `f`, which
/// returns `Ok(true)` once it has consumed the child. Children `f` declines
/// are reported as not allowed on an element of this kind and skipped.
pub fn read_children<'a, F>(
    cursor: &mut XmlCursor<'a>,
    parent: &ChildElement<'a>,
    kind: TypeCode,
    base: &mut SedBase,
    mut f: F,
) -> Result<(), DeserializeError>
where
    F: FnMut(&mut XmlCursor<'a>, &str, ChildElement<'a>) -> Result<bool, DeserializeError>,
{
    if parent.is_empty {
        return Ok(());
    }
    let parent_name = parent.name();
    cursor.push_path(&parent_name);
    cursor.for_each_child(|cursor, child| {
        let name = child.name();
        match name.as_str() {
            "notes" => {
                if base.notes.is_some() {
                    cursor.log(
                        ErrorCode::ONLY_ONE_NOTES_ELEMENT_ALLOWED,
                        Severity::Error,
                        format!("The <{}> element has more than one <notes> child.", parent_name),
                    );
                    cursor.skip_child(&child)
                } else {
                    base.notes = Some(inner_xml(cursor, &child)?);
                    Ok(())
                }
            }
            "annotation" => {
                if base.annotation.is_some() {
                    cursor.log(
                        ErrorCode::MULTIPLE_ANNOTATIONS,
                        Severity::Error,
                        format!(
                            "The <{}> element has more than one <annotation> child.",
                            parent_name
                        ),
                    );
                    cursor.skip_child(&child)
                } else {
                    base.annotation = Some(inner_xml(cursor, &child)?);
                    Ok(())
                }
            }
            _ => {
                let skip = child.clone();
                if !f(cursor, &name, child)? {
                    cursor.log(
                        ErrorCode::allowed_elements(kind),
                        Severity::Error,
                        format!("Element <{}> is not allowed inside <{}>.", name, parent_name),
                    );
                    cursor.skip_child(&skip)?;
                }
                Ok(())
            }
        }
    })?;
    cursor.pop_path();
    Ok(())
}

/// Walk the items of a `listOf*` container.
///
/// `f` returns `Ok(true)` when it recognised and consumed an item. Other
/// elements are reported as unrecognized and skipped.
pub fn read_list<'a, F>(
    cursor: &mut XmlCursor<'a>,
    list: &ChildElement<'a>,
    mut f: F,
) -> Result<(), DeserializeError>
where
    F: FnMut(&mut XmlCursor<'a>, &str, ChildElement<'a>) -> Result<bool, DeserializeError>,
{
    if list.is_empty {
        return Ok(());
    }
    let list_name = list.name();
    cursor.push_path(&list_name);
    cursor.for_each_child(|cursor, child| {
        let name = child.name();
        if name == "notes" || name == "annotation" {
            log::trace!("ignoring <{}> on <{}>", name, list_name);
            return cursor.skip_child(&child);
        }
        let skip = child.clone();
        if !f(cursor, &name, child)? {
            cursor.log(
                ErrorCode::UNRECOGNIZED_ELEMENT,
                Severity::Error,
                format!("Element <{}> is not allowed inside <{}>.", name, list_name),
            );
            cursor.skip_child(&skip)?;
        }
        Ok(())
    })?;
    cursor.pop_path();
    Ok(())
}

/// Read a `listOf*` container holding a single kind of item.
pub fn read_items<'a, T, F>(
    cursor: &mut XmlCursor<'a>,
    list: &ChildElement<'a>,
    item: &str,
    items: &mut Vec<T>,
    mut read: F,
) -> Result<(), DeserializeError>
where
    F: FnMut(&mut XmlCursor<'a>, ChildElement<'a>) -> Result<T, DeserializeError>,
{
    read_list(cursor, list, |cursor, name, child| {
        if name != item {
            return Ok(false);
        }
        items.push(read(cursor, child)?);
        Ok(true)
    })
}

/// The raw inner XML of a child, or an empty string for `<tag/>`.
pub fn inner_xml(cursor: &mut XmlCursor<'_>, child: &ChildElement<'_>) -> Result<String, DeserializeError> {
    if child.is_empty {
        Ok(String::new())
    } else {
        cursor.read_inner_xml()
    }
}

/// The text content of a child, or an empty string for `<tag/>`.
pub fn text_content(cursor: &mut XmlCursor<'_>, child: &ChildElement<'_>) -> Result<String, DeserializeError> {
    if child.is_empty {
        Ok(String::new())
    } else {
        cursor.read_text()
    }
}
