//! Reader for data descriptions (external data files referenced by a
//! document), their data sources and slices.

use crate::model::{DataDescription, DataSource, Slice};
use crate::types::TypeCode;
use crate::xml::deserialize::DeserializeError;
use crate::xml::deserialize::helpers::{AttrReader, inner_xml, read_children, read_items};
use crate::xml::quick::de::{ChildElement, XmlCursor};

pub fn read_data_description<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<DataDescription, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::DataDescription)?;
    let mut description = DataDescription {
        base: attrs.base(),
        format: attrs.opt("format"),
        source: attrs.required("source"),
        dimension_description: None,
        data_sources: Vec::new(),
    };
    attrs.finish(cursor);

    read_children(
        cursor,
        &element,
        TypeCode::DataDescription,
        &mut description.base,
        |cursor, name, child| {
            match name {
                // kept as raw NuML markup
                "dimensionDescription" => {
                    description.dimension_description = Some(inner_xml(cursor, &child)?)
                }
                "listOfDataSources" => read_items(
                    cursor,
                    &child,
                    "dataSource",
                    &mut description.data_sources,
                    read_data_source,
                )?,
                _ => return Ok(false),
            }
            Ok(true)
        },
    )?;
    Ok(description)
}

fn read_data_source<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<DataSource, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::DataSource)?;
    let mut source = DataSource {
        base: attrs.base(),
        index_set: attrs.opt("indexSet"),
        slices: Vec::new(),
    };
    attrs.finish(cursor);

    read_children(
        cursor,
        &element,
        TypeCode::DataSource,
        &mut source.base,
        |cursor, name, child| match name {
            "listOfSlices" => {
                read_items(cursor, &child, "slice", &mut source.slices, read_slice)?;
                Ok(true)
            }
            _ => Ok(false),
        },
    )?;
    Ok(source)
}

fn read_slice<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<Slice, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::Slice)?;
    let mut slice = Slice {
        base: attrs.base(),
        reference: attrs.required("reference"),
        value: attrs.opt("value"),
        index: attrs.opt("index"),
        start_index: attrs.opt_i32("startIndex"),
        end_index: attrs.opt_i32("endIndex"),
    };
    attrs.finish(cursor);
    read_children(cursor, &element, TypeCode::Slice, &mut slice.base, |_, _, _| Ok(false))?;
    Ok(slice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::events::Event;

    #[test]
    fn test_read_data_description() {
        let xml = r#"<dataDescription id="data1" format="urn:sedml:format:numl" source="data.numl">
            <dimensionDescription>
              <compositeDescription xmlns="http://www.numl.org/numl/level1/version1" name="Time" indexType="double"/>
            </dimensionDescription>
            <listOfDataSources>
              <dataSource id="ds1" indexSet="Time">
                <listOfSlices><slice reference="SpeciesIds" value="S1"/></listOfSlices>
              </dataSource>
            </listOfDataSources>
          </dataDescription>"#;
        let mut cursor = XmlCursor::new(xml);
        let element = match cursor.next_event().unwrap() {
            Event::Start(start) => ChildElement {
                start,
                is_empty: false,
            },
            e => panic!("Expected Start, got {:?}", e),
        };
        let description = read_data_description(&mut cursor, element).unwrap();

        assert!(cursor.into_log().is_empty());
        assert!(
            description
                .dimension_description
                .as_deref()
                .unwrap()
                .starts_with("<compositeDescription")
        );
        let source = description.data_source("ds1").unwrap();
        assert_eq!(source.slices[0].value.as_deref(), Some("S1"));
    }
}
