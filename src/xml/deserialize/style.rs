//! Reader for styles.

use crate::model::{Fill, Line, Marker, Style};
use crate::types::TypeCode;
use crate::xml::deserialize::DeserializeError;
use crate::xml::deserialize::helpers::{AttrReader, read_children};
use crate::xml::quick::de::{ChildElement, XmlCursor};

pub fn read_style<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<Style, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::Style)?;
    let mut style = Style {
        base: attrs.base(),
        base_style: attrs.opt("baseStyle"),
        line: None,
        marker: None,
        fill: None,
    };
    attrs.finish(cursor);

    read_children(
        cursor,
        &element,
        TypeCode::Style,
        &mut style.base,
        |cursor, name, child| {
            match name {
                "line" => {
                    let mut attrs = AttrReader::new(cursor, &child.start, TypeCode::Line)?;
                    let mut line = Line {
                        base: attrs.base(),
                        kind: attrs.opt_enum("type"),
                        color: attrs.opt("color"),
                        thickness: attrs.opt_f64("thickness"),
                    };
                    attrs.finish(cursor);
                    read_children(cursor, &child, TypeCode::Line, &mut line.base, |_, _, _| {
                        Ok(false)
                    })?;
                    style.line = Some(line);
                }
                "marker" => {
                    let mut attrs = AttrReader::new(cursor, &child.start, TypeCode::Marker)?;
                    let mut marker = Marker {
                        base: attrs.base(),
                        size: attrs.opt_f64("size"),
                        kind: attrs.opt_enum("type"),
                        fill: attrs.opt("fill"),
                        line_color: attrs.opt("lineColor"),
                        line_thickness: attrs.opt_f64("lineThickness"),
                    };
                    attrs.finish(cursor);
                    read_children(cursor, &child, TypeCode::Marker, &mut marker.base, |_, _, _| {
                        Ok(false)
                    })?;
                    style.marker = Some(marker);
                }
                "fill" => {
                    let mut attrs = AttrReader::new(cursor, &child.start, TypeCode::Fill)?;
                    let mut fill = Fill {
                        base: attrs.base(),
                        color: attrs.opt("color"),
                        second_color: attrs.opt("secondColor"),
                    };
                    attrs.finish(cursor);
                    read_children(cursor, &child, TypeCode::Fill, &mut fill.base, |_, _, _| {
                        Ok(false)
                    })?;
                    style.fill = Some(fill);
                }
                _ => return Ok(false),
            }
            Ok(true)
        },
    )?;
    Ok(style)
}
