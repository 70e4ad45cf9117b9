//! Reading MathML content markup into [`Math`].

use quick_xml::events::Event;

use crate::diagnostics::{ErrorCode, Severity};
use crate::math::{Constant, Math, Operator};
use crate::xml::deserialize::DeserializeError;
use crate::xml::deserialize::helpers::text_content;
use crate::xml::quick::de::{ChildElement, XmlCursor};

/// Read a `<math>` element. Returns `None` when it holds no usable
/// expression; the reasons are in the cursor's log.
pub fn read_math<'a>(
    cursor: &mut XmlCursor<'a>,
    math: ChildElement<'a>,
) -> Result<Option<Math>, DeserializeError> {
    if math.is_empty {
        return Ok(None);
    }
    cursor.push_path("math");
    let mut result = None;
    cursor.for_each_child(|cursor, child| {
        if result.is_some() {
            invalid(cursor, &child.name(), "a <math> element holds a single expression");
            return cursor.skip_child(&child);
        }
        result = read_node(cursor, child)?;
        Ok(())
    })?;
    cursor.pop_path();
    Ok(result)
}

fn invalid(cursor: &mut XmlCursor<'_>, name: &str, reason: &str) {
    cursor.log(
        ErrorCode::INVALID_MATH_ELEMENT,
        Severity::Error,
        format!("Invalid MathML element <{}>: {}.", name, reason),
    );
}

fn read_node<'a>(
    cursor: &mut XmlCursor<'a>,
    node: ChildElement<'a>,
) -> Result<Option<Math>, DeserializeError> {
    let name = node.name();
    match name.as_str() {
        "cn" => read_cn(cursor, node),
        "ci" => {
            let text = text_content(cursor, &node)?;
            Ok(Some(Math::Identifier(text.trim().to_string())))
        }
        "csymbol" => {
            let attrs = cursor.parse_attrs(&node.start)?;
            let definition_url = attrs.get_opt_string("definitionURL").unwrap_or_default();
            let text = text_content(cursor, &node)?;
            Ok(Some(Math::Symbol {
                definition_url,
                name: text.trim().to_string(),
            }))
        }
        "apply" => read_apply(cursor, node),
        "piecewise" => read_piecewise(cursor, node),
        "semantics" => {
            // the first child is the expression, the rest are annotations
            let mut expression = None;
            let mut first = true;
            cursor.for_each_child(|cursor, child| {
                if first {
                    first = false;
                    expression = read_node(cursor, child)?;
                    Ok(())
                } else {
                    cursor.skip_child(&child)
                }
            })?;
            Ok(expression)
        }
        other => match Constant::from_mathml_name(other) {
            Some(constant) => {
                cursor.skip_child(&node)?;
                Ok(Some(Math::Constant(constant)))
            }
            None => {
                invalid(cursor, other, "not supported in SED-ML math");
                cursor.skip_child(&node)?;
                Ok(None)
            }
        },
    }
}

/// The text of a `<cn>`, split at `<sep/>` markers.
fn cn_parts(cursor: &mut XmlCursor<'_>, node: &ChildElement<'_>) -> Result<Vec<String>, DeserializeError> {
    let mut parts = vec![String::new()];
    if node.is_empty {
        return Ok(parts);
    }
    loop {
        match cursor.next_event()? {
            Event::Text(text) => {
                if let Some(last) = parts.last_mut() {
                    last.push_str(text.unescape()?.trim());
                }
            }
            Event::Empty(e) if e.local_name().as_ref() == b"sep" => parts.push(String::new()),
            Event::Start(_) => cursor.skip_to_end()?,
            Event::End(_) => return Ok(parts),
            Event::Eof => return Err(DeserializeError::UnexpectedEof),
            _ => {}
        }
    }
}

fn read_cn<'a>(
    cursor: &mut XmlCursor<'a>,
    node: ChildElement<'a>,
) -> Result<Option<Math>, DeserializeError> {
    let attrs = cursor.parse_attrs(&node.start)?;
    let kind = attrs.get_opt("type").unwrap_or("real").trim().to_string();
    let parts = cn_parts(cursor, &node)?;

    let number = match (kind.as_str(), parts.as_slice()) {
        ("integer", [value]) => value.parse().ok().map(Math::Integer),
        ("real", [value]) => value.parse().ok().map(Math::Real),
        ("rational", [numerator, denominator]) => numerator
            .parse()
            .ok()
            .zip(denominator.parse().ok())
            .map(|(n, d)| Math::Rational(n, d)),
        ("e-notation", [mantissa, exponent]) => mantissa
            .parse()
            .ok()
            .zip(exponent.parse().ok())
            .map(|(mantissa, exponent)| Math::ENotation { mantissa, exponent }),
        _ => None,
    };
    if number.is_none() {
        invalid(
            cursor,
            "cn",
            &format!("'{}' is not a valid number of type {}", parts.join(" "), kind),
        );
    }
    Ok(number)
}

fn read_apply<'a>(
    cursor: &mut XmlCursor<'a>,
    node: ChildElement<'a>,
) -> Result<Option<Math>, DeserializeError> {
    if node.is_empty {
        invalid(cursor, "apply", "an <apply> element needs an operator");
        return Ok(None);
    }
    let mut op: Option<Operator> = None;
    let mut qualifier: Option<Math> = None;
    let mut args = Vec::new();
    let mut valid = true;

    cursor.for_each_child(|cursor, child| {
        let name = child.name();
        if op.is_none() && valid {
            if let Some(operator) = Operator::from_mathml_name(&name) {
                op = Some(operator);
                return cursor.skip_child(&child);
            }
            if name == "ci" || name == "csymbol" {
                let function = text_content(cursor, &child)?;
                op = Some(Operator::Call(function.trim().to_string()));
                return Ok(());
            }
            invalid(cursor, &name, "expected an operator as first child of <apply>");
            valid = false;
            return cursor.skip_child(&child);
        }
        match name.as_str() {
            "logbase" | "degree" if !child.is_empty => {
                cursor.for_each_child(|cursor, inner| {
                    match read_node(cursor, inner)? {
                        Some(value) if qualifier.is_none() => qualifier = Some(value),
                        _ => valid = false,
                    }
                    Ok(())
                })?;
                Ok(())
            }
            _ => {
                match read_node(cursor, child)? {
                    Some(arg) => args.push(arg),
                    None => valid = false,
                }
                Ok(())
            }
        }
    })?;

    match op {
        Some(op) if valid => {
            if let Some(qualifier) = qualifier {
                args.insert(0, qualifier);
            }
            Ok(Some(Math::Apply { op, args }))
        }
        _ => Ok(None),
    }
}

fn read_piecewise<'a>(
    cursor: &mut XmlCursor<'a>,
    node: ChildElement<'a>,
) -> Result<Option<Math>, DeserializeError> {
    let mut pieces = Vec::new();
    let mut otherwise = None;
    let mut valid = true;
    if node.is_empty {
        return Ok(Some(Math::Piecewise { pieces, otherwise }));
    }

    cursor.for_each_child(|cursor, child| {
        let name = child.name();
        if child.is_empty {
            invalid(cursor, &name, "empty piecewise branch");
            valid = false;
            return Ok(());
        }
        let mut values = Vec::new();
        match name.as_str() {
            "piece" | "otherwise" => {
                cursor.for_each_child(|cursor, inner| {
                    match read_node(cursor, inner)? {
                        Some(value) => values.push(value),
                        None => valid = false,
                    }
                    Ok(())
                })?;
            }
            other => {
                invalid(cursor, other, "expected <piece> or <otherwise>");
                valid = false;
                return cursor.skip_child(&child);
            }
        }
        let mut values = values.into_iter();
        match (name.as_str(), values.next(), values.next(), values.next()) {
            ("piece", Some(value), Some(condition), None) => pieces.push((value, condition)),
            ("otherwise", Some(value), None, None) if otherwise.is_none() => {
                otherwise = Some(Box::new(value))
            }
            _ => {
                invalid(cursor, &name, "wrong number of children");
                valid = false;
            }
        }
        Ok(())
    })?;

    Ok(valid.then_some(Math::Piecewise { pieces, otherwise }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::formula_to_string;

    fn parse(xml: &str) -> (Option<Math>, crate::diagnostics::ErrorLog) {
        let mut cursor = XmlCursor::new(xml);
        let math = match cursor.next_event().unwrap() {
            Event::Start(start) => ChildElement {
                start,
                is_empty: false,
            },
            e => panic!("Expected <math>, got {:?}", e),
        };
        let result = read_math(&mut cursor, math).unwrap();
        (result, cursor.into_log())
    }

    #[test]
    fn test_apply_with_numbers() {
        let (math, log) = parse(
            r#"<math xmlns="http://www.w3.org/1998/Math/MathML">
                 <apply><times/><cn type="integer"> 2 </cn><ci> S1 </ci><cn>0.5</cn></apply>
               </math>"#,
        );
        assert!(log.is_empty());
        assert_eq!(
            math,
            Some(Math::apply(
                Operator::Times,
                vec![Math::Integer(2), Math::ident("S1"), Math::Real(0.5)]
            ))
        );
    }

    #[test]
    fn test_rational_and_enotation() {
        let (math, _) = parse(
            r#"<math><apply><plus/><cn type="rational">1<sep/>3</cn><cn type="e-notation">1.5<sep/>-3</cn></apply></math>"#,
        );
        assert_eq!(
            math,
            Some(Math::binary(
                Operator::Plus,
                Math::Rational(1, 3),
                Math::ENotation {
                    mantissa: 1.5,
                    exponent: -3
                }
            ))
        );
    }

    #[test]
    fn test_logbase_is_first_argument() {
        let (math, _) = parse(
            "<math><apply><log/><logbase><cn type=\"integer\">2</cn></logbase><ci>x</ci></apply></math>",
        );
        assert_eq!(formula_to_string(&math.unwrap()), "log(2, x)");
    }

    #[test]
    fn test_user_function_and_constants() {
        let (math, _) = parse("<math><apply><ci>f</ci><pi/><true/></apply></math>");
        assert_eq!(formula_to_string(&math.unwrap()), "f(pi, true)");
    }

    #[test]
    fn test_piecewise() {
        let (math, log) = parse(
            "<math><piecewise><piece><ci>a</ci><apply><gt/><ci>t</ci><cn>1</cn></apply></piece><otherwise><cn type=\"integer\">0</cn></otherwise></piecewise></math>",
        );
        assert!(log.is_empty());
        assert_eq!(formula_to_string(&math.unwrap()), "piecewise(a, gt(t, 1), 0)");
    }

    #[test]
    fn test_unknown_element_is_logged() {
        let (math, log) = parse("<math><apply><plus/><mfrac><mi>a</mi></mfrac><ci>b</ci></apply></math>");
        assert_eq!(math, None);
        assert!(log.contains(ErrorCode::INVALID_MATH_ELEMENT));
    }

    #[test]
    fn test_invalid_number() {
        let (math, log) = parse("<math><cn type=\"integer\">1.5</cn></math>");
        assert_eq!(math, None);
        assert_eq!(log.num_errors(), 1);
    }
}
