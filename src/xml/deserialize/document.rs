//! Reading a whole SED-ML document.

use quick_xml::events::{BytesDecl, Event};

use crate::diagnostics::{ErrorCode, Severity};
use crate::model::SedDocument;
use crate::namespace::SedNamespace;
use crate::types::TypeCode;
use crate::xml::deserialize::DeserializeError;
use crate::xml::deserialize::data::read_data_description;
use crate::xml::deserialize::data_generator::read_data_generator;
use crate::xml::deserialize::helpers::{AttrReader, read_children, read_items, read_list};
use crate::xml::deserialize::model::read_model;
use crate::xml::deserialize::output::read_output;
use crate::xml::deserialize::simulation::{read_algorithm_parameter, read_simulation, simulation_code};
use crate::xml::deserialize::style::read_style;
use crate::xml::deserialize::task::read_task;
use crate::xml::quick::de::{ChildElement, XmlCursor};

/// Read a SED-ML document from XML text.
///
/// This never fails: whatever could be read is returned, and every problem
/// found along the way is in the document's error log. Malformed XML stops
/// the reader and is logged as a fatal diagnostic.
pub fn read_document(source: &str) -> SedDocument {
    let mut document = SedDocument::new();
    let mut cursor = XmlCursor::new(source);

    if let Err(error) = read_prolog_and_root(&mut cursor, &mut document) {
        let code = match error {
            DeserializeError::UnexpectedEof => ErrorCode::XML_UNEXPECTED_EOF,
            _ => ErrorCode::BADLY_FORMED_XML,
        };
        let (line, column) = cursor.current_location();
        log::warn!("stopped reading at line {}: {}", line, error);
        cursor.log_at(code, Severity::Fatal, line, column, error.to_string());
    }

    *document.error_log_mut() = cursor.into_log();
    log::debug!(
        "read {}: {} model(s), {} simulation(s), {} task(s), {} data generator(s), {} output(s), {} diagnostic(s)",
        document.namespace,
        document.models.len(),
        document.simulations.len(),
        document.tasks.len(),
        document.data_generators.len(),
        document.outputs.len(),
        document.error_log().len()
    );
    document
}

fn read_prolog_and_root<'a>(
    cursor: &mut XmlCursor<'a>,
    document: &mut SedDocument,
) -> Result<(), DeserializeError> {
    loop {
        match cursor.next_event()? {
            Event::Decl(decl) => check_declaration(cursor, &decl),
            Event::Start(start) => {
                return read_root(cursor, document, ChildElement { start, is_empty: false });
            }
            Event::Empty(start) => {
                return read_root(cursor, document, ChildElement { start, is_empty: true });
            }
            Event::Eof => {
                cursor.log(
                    ErrorCode::BADLY_FORMED_XML,
                    Severity::Fatal,
                    "The document has no root element.",
                );
                return Ok(());
            }
            _ => {}
        }
    }
}

fn check_declaration(cursor: &mut XmlCursor<'_>, decl: &BytesDecl<'_>) {
    if let Err(error) = decl.version() {
        cursor.log(
            ErrorCode::BAD_XML_DECL,
            Severity::Error,
            format!("Invalid XML declaration: {}", error),
        );
        return;
    }
    match decl.encoding() {
        None => cursor.log(
            ErrorCode::MISSING_XML_ENCODING,
            Severity::Warning,
            "The XML declaration does not name an encoding; UTF-8 is assumed.",
        ),
        Some(Ok(encoding)) if !encoding.eq_ignore_ascii_case(b"UTF-8") => cursor.log(
            ErrorCode::NOT_UTF8,
            Severity::Error,
            format!(
                "The document declares the encoding '{}'; SED-ML documents must use UTF-8.",
                String::from_utf8_lossy(&encoding)
            ),
        ),
        Some(Ok(_)) => {}
        Some(Err(error)) => cursor.log(
            ErrorCode::BAD_XML_DECL,
            Severity::Error,
            format!("Invalid XML declaration: {}", error),
        ),
    }
}

fn read_root<'a>(
    cursor: &mut XmlCursor<'a>,
    document: &mut SedDocument,
    root: ChildElement<'a>,
) -> Result<(), DeserializeError> {
    let name = root.name();
    if name != "sedML" {
        let error = DeserializeError::UnexpectedElement {
            expected: "sedML".to_string(),
            found: name,
        };
        cursor.log(ErrorCode::NOT_SCHEMA_CONFORMANT, Severity::Error, error.to_string());
        return Ok(());
    }

    let mut attrs = AttrReader::new(cursor, &root.start, TypeCode::Document)?;
    document.base = attrs.base();
    let level = attrs.required_u32("level");
    let version = attrs.required_u32("version");
    let namespaces = attrs.attrs().namespaces().to_vec();
    attrs.finish(cursor);

    let prefix = root
        .start
        .name()
        .prefix()
        .map(|p| String::from_utf8_lossy(p.as_ref()).to_string())
        .unwrap_or_default();
    let declared = namespaces
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, uri)| uri.clone());
    let from_uri = declared.as_deref().and_then(SedNamespace::from_uri);

    let default = from_uri.unwrap_or_default();
    let namespace = SedNamespace::new(
        level.unwrap_or(default.level),
        version.unwrap_or(default.version),
    );
    check_level_and_version(cursor, namespace);
    document.namespace = namespace;

    match (declared, from_uri) {
        (None, _) => cursor.log(
            ErrorCode::NS_UNDECLARED,
            Severity::Error,
            "The <sedML> element does not declare a SED-ML namespace.",
        ),
        (Some(uri), None) => cursor.log(
            ErrorCode::ELEMENT_NOT_IN_NS,
            Severity::Error,
            format!("The namespace '{}' is not a SED-ML namespace.", uri),
        ),
        (Some(uri), Some(ns)) if ns != namespace && namespace.is_supported() => cursor.log(
            ErrorCode::ELEMENT_NOT_IN_NS,
            Severity::Warning,
            format!("The namespace '{}' belongs to {}, not {}.", uri, ns, namespace),
        ),
        _ => {}
    }

    for (p, uri) in namespaces {
        if !p.is_empty() && p != prefix {
            document.add_namespace(p, uri);
        }
    }

    read_children(
        cursor,
        &root,
        TypeCode::Document,
        &mut document.base,
        |cursor, name, child| {
            match name {
                "listOfDataDescriptions" => read_items(
                    cursor,
                    &child,
                    "dataDescription",
                    &mut document.data_descriptions,
                    read_data_description,
                )?,
                "listOfModels" => read_items(cursor, &child, "model", &mut document.models, read_model)?,
                "listOfSimulations" => read_list(cursor, &child, |cursor, name, item| {
                    match simulation_code(name) {
                        Some(code) => {
                            document.simulations.push(read_simulation(cursor, item, code)?);
                            Ok(true)
                        }
                        None => Ok(false),
                    }
                })?,
                "listOfTasks" => read_list(cursor, &child, |cursor, name, item| {
                    match read_task(cursor, name, item)? {
                        Some(task) => {
                            document.tasks.push(task);
                            Ok(true)
                        }
                        None => Ok(false),
                    }
                })?,
                "listOfDataGenerators" => read_items(
                    cursor,
                    &child,
                    "dataGenerator",
                    &mut document.data_generators,
                    read_data_generator,
                )?,
                "listOfOutputs" => read_list(cursor, &child, |cursor, name, item| {
                    match read_output(cursor, name, item)? {
                        Some(output) => {
                            document.outputs.push(output);
                            Ok(true)
                        }
                        None => Ok(false),
                    }
                })?,
                "listOfStyles" => read_items(cursor, &child, "style", &mut document.styles, read_style)?,
                "listOfAlgorithmParameters" => read_items(
                    cursor,
                    &child,
                    "algorithmParameter",
                    &mut document.algorithm_parameters,
                    read_algorithm_parameter,
                )?,
                _ => return Ok(false),
            }
            Ok(true)
        },
    )
}

fn check_level_and_version(cursor: &mut XmlCursor<'_>, namespace: SedNamespace) {
    if namespace.level != 1 {
        cursor.log(
            ErrorCode::INVALID_LEVEL,
            Severity::Error,
            format!("SED-ML Level {} is not supported.", namespace.level),
        );
    } else if !namespace.is_supported() {
        cursor.log(
            ErrorCode::INVALID_VERSION,
            Severity::Error,
            format!("SED-ML Level 1 Version {} is not supported.", namespace.version),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document() {
        let doc = read_document(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<sedML xmlns="http://sed-ml.org/sed-ml/level1/version3" level="1" version="3"/>"#,
        );
        assert!(doc.error_log().is_empty(), "{}", doc.error_log());
        assert_eq!(doc.level(), 1);
        assert_eq!(doc.version(), 3);
    }

    #[test]
    fn test_wrong_root() {
        let doc = read_document("<sbml level=\"3\" version=\"1\"><model/></sbml>");
        assert!(doc.error_log().contains(ErrorCode::NOT_SCHEMA_CONFORMANT));
        assert_eq!(doc.error_log().len(), 1);
    }

    #[test]
    fn test_missing_encoding_and_namespace() {
        let doc = read_document("<?xml version=\"1.0\"?>\n<sedML level=\"1\" version=\"2\"/>");
        let log = doc.error_log();
        assert!(log.contains(ErrorCode::MISSING_XML_ENCODING));
        assert!(log.contains(ErrorCode::NS_UNDECLARED));
        assert_eq!(log.num_fails_with_severity(Severity::Warning), 1);
    }

    #[test]
    fn test_non_utf8_declaration() {
        let doc = read_document(
            "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><sedML xmlns=\"http://sed-ml.org/\" level=\"1\" version=\"1\"/>",
        );
        assert!(doc.error_log().contains(ErrorCode::NOT_UTF8));
    }

    #[test]
    fn test_missing_level_uses_namespace() {
        let doc = read_document(r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version2"/>"#);
        assert_eq!(doc.version(), 2);
        let log = doc.error_log();
        assert_eq!(log.num_errors(), 2);
        assert!(log.contains(ErrorCode::allowed_attributes(TypeCode::Document)));
    }

    #[test]
    fn test_unsupported_version() {
        let doc = read_document(
            r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version4" level="1" version="9"/>"#,
        );
        assert!(doc.error_log().contains(ErrorCode::INVALID_VERSION));
    }

    #[test]
    fn test_malformed_xml_is_fatal() {
        let doc = read_document(
            "<sedML xmlns=\"http://sed-ml.org/\" level=\"1\" version=\"1\">\n  <listOfModels>\n</sedML>",
        );
        let log = doc.error_log();
        assert_eq!(log.num_fails_with_severity(Severity::Fatal), 1);
        assert!(log.contains(ErrorCode::BADLY_FORMED_XML));
    }

    #[test]
    fn test_truncated_document() {
        let doc = read_document("<sedML xmlns=\"http://sed-ml.org/\" level=\"1\" version=\"1\">\n  <listOfModels>");
        assert_eq!(doc.error_log().num_fails_with_severity(Severity::Fatal), 1);
    }

    #[test]
    fn test_extra_namespaces_are_kept() {
        let doc = read_document(
            r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version4" xmlns:sbml="http://www.sbml.org/sbml/level3/version1/core" level="1" version="4"/>"#,
        );
        assert_eq!(
            doc.namespaces,
            vec![(
                "sbml".to_string(),
                "http://www.sbml.org/sbml/level3/version1/core".to_string()
            )]
        );
    }
}
