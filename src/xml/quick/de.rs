//! Deserialization helpers for quick-xml.
//!
//! Provides:
//! - `Attrs`: attribute map keyed by local name, with typed getters
//! - `XmlCursor`: event reader with element path, source positions and a
//!   diagnostics log

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::diagnostics::{ErrorCode, ErrorLog, Severity};
use crate::xml::deserialize::DeserializeError;

/// A parsed attribute map that owns decoded string values.
///
/// Keys are local names. Namespace declarations (`xmlns`, `xmlns:p`) and
/// prefixed attributes are kept apart so element readers only see their own
/// attributes.
#[derive(Debug, Clone, Default)]
pub struct Attrs {
    map: HashMap<String, String>,
    /// Attribute names in document order.
    order: Vec<String>,
    /// `(prefix, uri)` pairs; the default namespace has an empty prefix.
    namespaces: Vec<(String, String)>,
    /// The element name for error messages
    element_name: String,
}

impl Attrs {
    /// Parse attributes from a `BytesStart` event.
    pub fn from_start<R>(start: &BytesStart<'_>, reader: &Reader<R>) -> Result<Self, DeserializeError> {
        let element_name = local_name(start);
        let mut attrs = Self {
            element_name,
            ..Self::default()
        };

        for attr_result in start.attributes() {
            let attr = attr_result?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.decode_and_unescape_value(reader)?.to_string();
            if key == "xmlns" {
                attrs.namespaces.push((String::new(), value));
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                attrs.namespaces.push((prefix.to_string(), value));
            } else if key.contains(':') {
                // foreign attributes such as xml:lang are not part of the model
                log::trace!("ignoring attribute {} on <{}>", key, attrs.element_name);
            } else {
                attrs.order.push(key.clone());
                attrs.map.insert(key, value);
            }
        }

        Ok(attrs)
    }

    /// Get the element name this Attrs was parsed from.
    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    /// Get an optional string attribute.
    pub fn get_opt(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    /// Get an optional string attribute as an owned String.
    pub fn get_opt_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    /// Get an optional bool attribute.
    ///
    /// Recognizes the XML Schema spellings "true"/"false"/"1"/"0".
    pub fn get_opt_bool(&self, key: &str) -> Result<Option<bool>, DeserializeError> {
        match self.map.get(key) {
            Some(s) => match s.trim() {
                "true" | "1" => Ok(Some(true)),
                "false" | "0" => Ok(Some(false)),
                _ => Err(DeserializeError::Custom(format!(
                    "Invalid boolean for {}@{}: '{}' (expected true/false)",
                    self.element_name, key, s
                ))),
            },
            None => Ok(None),
        }
    }

    /// Check if an attribute is present (regardless of value).
    pub fn has(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Attribute names in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// Namespace declarations made on this element.
    pub fn namespaces(&self) -> &[(String, String)] {
        &self.namespaces
    }

}

/// The element name without any namespace prefix.
pub fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).to_string()
}

/// A child element handed to [`XmlCursor::for_each_child`].
#[derive(Debug, Clone)]
pub struct ChildElement<'a> {
    pub start: BytesStart<'a>,
    /// Whether this was an Empty element (`<tag/>`) vs Start element (`<tag>`).
    pub is_empty: bool,
}

impl ChildElement<'_> {
    /// Local name of the child element.
    pub fn name(&self) -> String {
        local_name(&self.start)
    }
}

/// Maps byte offsets in the source to 1-based line and column numbers.
#[derive(Debug, Clone)]
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    fn locate(&self, offset: usize) -> (usize, usize) {
        let line = match self.starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index - 1,
        };
        (line + 1, offset - self.starts[line] + 1)
    }
}

/// Reads a SED-ML document from an in-memory source.
///
/// Besides walking the event stream, the cursor
/// - tracks the element path for error messages,
/// - knows where in the source the current event starts, so diagnostics get
///   line and column numbers,
/// - collects those diagnostics in an [`ErrorLog`],
/// - can capture the raw inner XML of an element (notes, annotations,
///   `newXML`), which is stored verbatim.
pub struct XmlCursor<'a> {
    reader: Reader<&'a [u8]>,
    source: &'a str,
    lines: LineIndex,
    /// Offset of the first byte of the most recent event.
    event_start: usize,
    /// Path stack for error context (e.g., ["sedML", "listOfTasks", "task"])
    path: Vec<String>,
    log: ErrorLog,
}

impl<'a> XmlCursor<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        reader.trim_text(true);
        Self {
            reader,
            source,
            lines: LineIndex::new(source),
            event_start: 0,
            path: Vec::new(),
            log: ErrorLog::new(),
        }
    }

    /// Push an element onto the path stack (for error context).
    pub fn push_path(&mut self, element: &str) {
        self.path.push(element.to_string());
    }

    /// Pop the most recent element from the path stack.
    pub fn pop_path(&mut self) {
        self.path.pop();
    }

    /// Get the current path as a string (for error messages).
    pub fn path_str(&self) -> String {
        self.path.join("/")
    }

    /// Line and column where the most recent event starts.
    pub fn location(&self) -> (usize, usize) {
        let skipped = self.source[self.event_start.min(self.source.len())..]
            .bytes()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        self.lines.locate(self.event_start + skipped)
    }

    /// Line and column of the reader's current byte position.
    pub fn current_location(&self) -> (usize, usize) {
        self.lines
            .locate(self.reader.buffer_position().min(self.source.len()))
    }

    /// Record a diagnostic at the location of the most recent event.
    pub fn log(&mut self, code: ErrorCode, severity: Severity, message: impl Into<String>) {
        let (line, column) = self.location();
        self.log.log(code, severity, line, column, message);
    }

    /// Record a diagnostic at an explicit location.
    pub fn log_at(
        &mut self,
        code: ErrorCode,
        severity: Severity,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) {
        self.log.log(code, severity, line, column, message);
    }

    /// Hand over the diagnostics collected so far.
    pub fn into_log(self) -> ErrorLog {
        self.log
    }

    /// Read the next event from the reader.
    pub fn next_event(&mut self) -> Result<Event<'a>, DeserializeError> {
        self.event_start = self.reader.buffer_position();
        Ok(self.reader.read_event()?)
    }

    /// Parse attributes from a BytesStart event.
    pub fn parse_attrs(&self, start: &BytesStart<'_>) -> Result<Attrs, DeserializeError> {
        Attrs::from_start(start, &self.reader)
    }

    /// Read text content from the current element (after consuming a Start event).
    ///
    /// Each text run is trimmed, so `<value> 2.5 </value>` gives `2.5`.
    /// Nested elements are skipped and their text is not included.
    pub fn read_text(&mut self) -> Result<String, DeserializeError> {
        let mut text = String::new();

        loop {
            match self.next_event()? {
                Event::Text(e) => text.push_str(&e.unescape()?),
                Event::CData(e) => text.push_str(&String::from_utf8_lossy(e.as_ref())),
                Event::Start(_) => self.skip_to_end()?,
                Event::End(_) => break,
                Event::Eof => return Err(DeserializeError::UnexpectedEof),
                _ => {}
            }
        }

        Ok(text)
    }

    /// Skip the current element's content (after consuming a Start event).
    pub fn skip_to_end(&mut self) -> Result<(), DeserializeError> {
        let mut depth = 1u32;
        loop {
            match self.next_event()? {
                Event::Start(_) => depth += 1,
                Event::End(_) => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Event::Eof => return Err(DeserializeError::UnexpectedEof),
                _ => {}
            }
        }
    }

    /// Capture the raw XML between the current Start event and its End
    /// event, trimmed of surrounding whitespace.
    pub fn read_inner_xml(&mut self) -> Result<String, DeserializeError> {
        let inner_start = self.reader.buffer_position();
        let mut depth = 1u32;
        loop {
            let before = self.reader.buffer_position();
            match self.next_event()? {
                Event::Start(_) => depth += 1,
                Event::End(_) => {
                    depth -= 1;
                    if depth == 0 {
                        let raw = self.source.get(inner_start..before).unwrap_or_default();
                        return Ok(raw.trim().to_string());
                    }
                }
                Event::Eof => return Err(DeserializeError::UnexpectedEof),
                _ => {}
            }
        }
    }

    /// Visit every child element of the element whose Start event was just
    /// consumed, up to and including its End event.
    ///
    /// The callback must consume the whole child: for a non-empty child it
    /// has to read up to the child's End event.
    pub fn for_each_child<F>(&mut self, mut f: F) -> Result<(), DeserializeError>
    where
        F: FnMut(&mut Self, ChildElement<'a>) -> Result<(), DeserializeError>,
    {
        loop {
            match self.next_event()? {
                Event::Start(start) => f(
                    self,
                    ChildElement {
                        start,
                        is_empty: false,
                    },
                )?,
                Event::Empty(start) => f(
                    self,
                    ChildElement {
                        start,
                        is_empty: true,
                    },
                )?,
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(DeserializeError::UnexpectedEof),
                Event::Text(text) => {
                    log::trace!(
                        "ignoring text {:?} at {}",
                        String::from_utf8_lossy(text.as_ref()),
                        self.path_str()
                    );
                }
                _ => {}
            }
        }
    }

    /// Skip a child handed out by [`for_each_child`](Self::for_each_child).
    pub fn skip_child(&mut self, child: &ChildElement<'_>) -> Result<(), DeserializeError> {
        if child.is_empty {
            Ok(())
        } else {
            self.skip_to_end()
        }
    }
}
