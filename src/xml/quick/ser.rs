//! Writing helpers on top of quick-xml.
//!
//! [`AttrList`] collects the attributes of one element in the order they are
//! added, formatting numbers the way SED-ML documents spell them.
//! [`XmlEmitter`] writes elements, text and pre-serialized XML (notes,
//! annotations, `newXML`) through a borrowed [`Writer`].

use std::fmt::Display;
use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::core::SedBase;
use crate::math::formula::format_real;
use crate::xml::serialize::SerializeError;

/// The attributes of one element, with owned values.
#[derive(Debug, Default)]
pub struct AttrList {
    attrs: Vec<(String, String)>,
}

impl AttrList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a list with the `metaid`, `id` and `name` of `base`, those that
    /// are set.
    pub fn with_base(base: &SedBase) -> Self {
        let mut attrs = Self::new();
        attrs
            .add_opt("metaid", base.metaid.as_deref())
            .add_opt("id", base.id.as_deref())
            .add_opt("name", base.name.as_deref());
        attrs
    }

    pub fn add(&mut self, key: &str, value: impl AsRef<str>) -> &mut Self {
        self.attrs.push((key.to_string(), value.as_ref().to_string()));
        self
    }

    pub fn add_opt(&mut self, key: &str, value: Option<impl AsRef<str>>) -> &mut Self {
        if let Some(value) = value {
            self.add(key, value);
        }
        self
    }

    /// Adds a double. Whole numbers lose their fractional part and
    /// infinities and NaN use the XML Schema spellings `INF`, `-INF`, `NaN`.
    pub fn add_real(&mut self, key: &str, value: f64) -> &mut Self {
        self.add(key, format_real(value))
    }

    pub fn add_opt_real(&mut self, key: &str, value: Option<f64>) -> &mut Self {
        if let Some(value) = value {
            self.add_real(key, value);
        }
        self
    }

    /// Adds an integer, boolean or model enum through its `Display` form.
    pub fn add_value(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.add(key, value.to_string())
    }

    pub fn add_opt_value<T: Display>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.add_value(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    fn start<'n>(&self, name: &'n str) -> BytesStart<'n> {
        let mut start = BytesStart::new(name);
        for (key, value) in &self.attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        start
    }
}

/// Element-level writing on a borrowed [`Writer`].
pub struct XmlEmitter<'a, W: Write> {
    writer: &'a mut Writer<W>,
}

impl<'a, W: Write> XmlEmitter<'a, W> {
    pub fn new(writer: &'a mut Writer<W>) -> Self {
        Self { writer }
    }

    /// `<?xml version="1.0" encoding="UTF-8"?>`
    pub fn declaration(&mut self) -> Result<(), SerializeError> {
        let decl = BytesDecl::new("1.0", Some("UTF-8"), None);
        self.writer.write_event(Event::Decl(decl))?;
        Ok(())
    }

    /// `<name>text</name>`, with `text` escaped.
    pub fn text(&mut self, name: &str, text: &str) -> Result<(), SerializeError> {
        self.text_with(name, &AttrList::new(), text)
    }

    /// `<name attrs>text</name>`, with `text` escaped.
    pub fn text_with(&mut self, name: &str, attrs: &AttrList, text: &str) -> Result<(), SerializeError> {
        self.writer.write_event(Event::Start(attrs.start(name)))?;
        self.text_node(text)?;
        self.close(name)
    }

    /// An escaped text node inside the element currently open.
    pub fn text_node(&mut self, text: &str) -> Result<(), SerializeError> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// `<name/>`
    pub fn empty(&mut self, name: &str) -> Result<(), SerializeError> {
        self.empty_with(name, &AttrList::new())
    }

    /// `<name attrs/>`
    pub fn empty_with(&mut self, name: &str, attrs: &AttrList) -> Result<(), SerializeError> {
        self.writer.write_event(Event::Empty(attrs.start(name)))?;
        Ok(())
    }

    /// `<name>raw</name>` where `raw` is already XML and is written as is.
    pub fn raw(&mut self, name: &str, raw: &str) -> Result<(), SerializeError> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(raw)))?;
        self.close(name)
    }

    /// Opens `<name attrs>`; the caller writes the content and calls
    /// [`close`](Self::close).
    pub fn open(&mut self, name: &str, attrs: &AttrList) -> Result<(), SerializeError> {
        self.writer.write_event(Event::Start(attrs.start(name)))?;
        Ok(())
    }

    pub fn close(&mut self, name: &str) -> Result<(), SerializeError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }
}
