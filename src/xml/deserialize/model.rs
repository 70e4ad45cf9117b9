//! Readers for models and their changes.

use crate::model::{Change, ChangeKind, Model};
use crate::types::TypeCode;
use crate::xml::deserialize::DeserializeError;
use crate::xml::deserialize::data_generator::Computation;
use crate::xml::deserialize::helpers::{AttrReader, inner_xml, read_children, read_list};
use crate::xml::quick::de::{ChildElement, XmlCursor};

pub fn read_model<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<Model, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::Model)?;
    let mut model = Model {
        base: attrs.base(),
        language: attrs.opt("language"),
        source: attrs.required("source"),
        changes: Vec::new(),
    };
    attrs.finish(cursor);

    read_children(
        cursor,
        &element,
        TypeCode::Model,
        &mut model.base,
        |cursor, name, child| match name {
            "listOfChanges" => {
                read_list(cursor, &child, |cursor, name, item| {
                    let code = match name {
                        "addXML" => TypeCode::ChangeAddXml,
                        "changeXML" => TypeCode::ChangeXml,
                        "removeXML" => TypeCode::RemoveXml,
                        "changeAttribute" => TypeCode::ChangeAttribute,
                        "computeChange" => TypeCode::ComputeChange,
                        _ => return Ok(false),
                    };
                    model.changes.push(read_change(cursor, item, code)?);
                    Ok(true)
                })?;
                Ok(true)
            }
            _ => Ok(false),
        },
    )?;
    Ok(model)
}

/// Read any of the change elements; `code` selects which.
pub fn read_change<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
    code: TypeCode,
) -> Result<Change, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, code)?;
    let mut base = attrs.base();
    let target = attrs.required("target");
    let new_value = match code {
        TypeCode::ChangeAttribute => Some(attrs.required("newValue")),
        _ => None,
    };
    let symbol = match code {
        TypeCode::ComputeChange => attrs.opt("symbol"),
        _ => None,
    };
    attrs.finish(cursor);

    let mut new_xml: Option<String> = None;
    let mut computation = Computation::default();
    read_children(cursor, &element, code, &mut base, |cursor, name, child| {
        match (code, name) {
            (TypeCode::ChangeAddXml | TypeCode::ChangeXml, "newXML") => {
                new_xml = Some(inner_xml(cursor, &child)?);
                Ok(true)
            }
            (TypeCode::ComputeChange, _) => computation.read_child(cursor, name, child),
            _ => Ok(false),
        }
    })?;

    let kind = match code {
        TypeCode::ChangeAddXml => ChangeKind::AddXml {
            new_xml: new_xml.unwrap_or_default(),
        },
        TypeCode::ChangeXml => ChangeKind::ChangeXml {
            new_xml: new_xml.unwrap_or_default(),
        },
        TypeCode::ChangeAttribute => ChangeKind::ChangeAttribute {
            new_value: new_value.unwrap_or_default(),
        },
        TypeCode::ComputeChange => ChangeKind::ComputeChange {
            symbol,
            variables: computation.variables,
            parameters: computation.parameters,
            math: computation.math,
        },
        _ => ChangeKind::RemoveXml,
    };
    Ok(Change { base, target, kind })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::events::Event;

    fn read(xml: &str) -> (Model, crate::diagnostics::ErrorLog) {
        let mut cursor = XmlCursor::new(xml);
        let element = match cursor.next_event().unwrap() {
            Event::Start(start) => ChildElement {
                start,
                is_empty: false,
            },
            e => panic!("Expected Start, got {:?}", e),
        };
        let model = read_model(&mut cursor, element).unwrap();
        (model, cursor.into_log())
    }

    #[test]
    fn test_model_with_changes() {
        let (model, log) = read(
            r#"<model id="m1" language="urn:sedml:language:sbml" source="model.xml">
                 <listOfChanges>
                   <changeAttribute target="/sbml/model/p[@id='k1']/@value" newValue="0.1"/>
                   <addXML target="/sbml/model/listOfParameters">
                     <newXML><parameter id="k2" value="1"/></newXML>
                   </addXML>
                   <removeXML target="/sbml/model/p[@id='k3']"/>
                 </listOfChanges>
               </model>"#,
        );
        assert!(log.is_empty());
        assert_eq!(model.source, "model.xml");
        assert_eq!(model.changes.len(), 3);
        assert_eq!(
            model.changes[0].kind,
            ChangeKind::ChangeAttribute {
                new_value: "0.1".to_string()
            }
        );
        assert_eq!(
            model.changes[1].kind,
            ChangeKind::AddXml {
                new_xml: r#"<parameter id="k2" value="1"/>"#.to_string()
            }
        );
        assert_eq!(model.changes[2].kind, ChangeKind::RemoveXml);
    }

    #[test]
    fn test_unknown_change_is_reported() {
        let (model, log) = read(
            r#"<model id="m1" source="m.xml"><listOfChanges><replaceXML target="x"/></listOfChanges></model>"#,
        );
        assert!(model.changes.is_empty());
        assert!(log.contains(crate::diagnostics::ErrorCode::UNRECOGNIZED_ELEMENT));
    }
}
