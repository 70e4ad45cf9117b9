//! Readers for data generators and the variables and parameters that
//! computations (data generators, computed changes, functional ranges, set
//! values) are built from.

use crate::math::Math;
use crate::model::{AppliedDimension, DataGenerator, Parameter, Variable};
use crate::types::TypeCode;
use crate::xml::deserialize::DeserializeError;
use crate::xml::deserialize::helpers::{AttrReader, read_children, read_items};
use crate::xml::deserialize::math::read_math;
use crate::xml::quick::de::{ChildElement, XmlCursor};

pub fn read_variable<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<Variable, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::Variable)?;
    let mut variable = Variable {
        base: attrs.base(),
        symbol: attrs.opt("symbol"),
        target: attrs.opt("target"),
        task_reference: attrs.opt("taskReference"),
        model_reference: attrs.opt("modelReference"),
        term: attrs.opt("term"),
        dimension_term: attrs.opt("dimensionTerm"),
        applied_dimensions: Vec::new(),
    };
    attrs.finish(cursor);

    read_children(
        cursor,
        &element,
        TypeCode::Variable,
        &mut variable.base,
        |cursor, name, child| match name {
            "listOfAppliedDimensions" => {
                read_items(
                    cursor,
                    &child,
                    "appliedDimension",
                    &mut variable.applied_dimensions,
                    read_applied_dimension,
                )?;
                Ok(true)
            }
            _ => Ok(false),
        },
    )?;
    Ok(variable)
}

fn read_applied_dimension<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<AppliedDimension, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::AppliedDimension)?;
    let mut dimension = AppliedDimension {
        base: attrs.base(),
        target: attrs.opt("target"),
        dimension_target: attrs.opt("dimensionTarget"),
    };
    attrs.finish(cursor);
    read_children(
        cursor,
        &element,
        TypeCode::AppliedDimension,
        &mut dimension.base,
        |_, _, _| Ok(false),
    )?;
    Ok(dimension)
}

pub fn read_parameter<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<Parameter, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::Parameter)?;
    let mut parameter = Parameter {
        base: attrs.base(),
        value: attrs.required_f64("value"),
    };
    attrs.finish(cursor);
    read_children(
        cursor,
        &element,
        TypeCode::Parameter,
        &mut parameter.base,
        |_, _, _| Ok(false),
    )?;
    Ok(parameter)
}

/// The parts shared by every computation: variables, parameters and math.
#[derive(Debug, Default)]
pub struct Computation {
    pub variables: Vec<Variable>,
    pub parameters: Vec<Parameter>,
    pub math: Option<Math>,
}

impl Computation {
    /// Try to consume `child` as one of the shared parts.
    pub fn read_child<'a>(
        &mut self,
        cursor: &mut XmlCursor<'a>,
        name: &str,
        child: ChildElement<'a>,
    ) -> Result<bool, DeserializeError> {
        match name {
            "listOfVariables" => {
                read_items(cursor, &child, "variable", &mut self.variables, read_variable)?
            }
            "listOfParameters" => {
                read_items(cursor, &child, "parameter", &mut self.parameters, read_parameter)?
            }
            "math" => self.math = read_math(cursor, child)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

pub fn read_data_generator<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<DataGenerator, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::DataGenerator)?;
    let mut base = attrs.base();
    attrs.finish(cursor);

    let mut computation = Computation::default();
    read_children(
        cursor,
        &element,
        TypeCode::DataGenerator,
        &mut base,
        |cursor, name, child| computation.read_child(cursor, name, child),
    )?;
    Ok(DataGenerator {
        base,
        variables: computation.variables,
        parameters: computation.parameters,
        math: computation.math,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::formula_to_string;
    use quick_xml::events::Event;

    #[test]
    fn test_read_data_generator() {
        let xml = r#"<dataGenerator id="dg1" name="scaled S1">
            <listOfVariables>
              <variable id="v1" taskReference="t1" target="/sbml:sbml/sbml:model/sbml:listOfSpecies/sbml:species[@id='S1']"/>
            </listOfVariables>
            <listOfParameters>
              <parameter id="k" value="2.5"/>
            </listOfParameters>
            <math xmlns="http://www.w3.org/1998/Math/MathML">
              <apply><times/><ci>k</ci><ci>v1</ci></apply>
            </math>
          </dataGenerator>"#;
        let mut cursor = XmlCursor::new(xml);
        let element = match cursor.next_event().unwrap() {
            Event::Start(start) => ChildElement {
                start,
                is_empty: false,
            },
            e => panic!("Expected Start, got {:?}", e),
        };
        let dg = read_data_generator(&mut cursor, element).unwrap();

        assert!(cursor.into_log().is_empty());
        assert_eq!(dg.base.name.as_deref(), Some("scaled S1"));
        assert_eq!(dg.variables.len(), 1);
        assert_eq!(dg.variables[0].task_reference.as_deref(), Some("t1"));
        assert_eq!(dg.parameters[0].value, 2.5);
        assert_eq!(formula_to_string(dg.math.as_ref().unwrap()), "k * v1");
    }

    #[test]
    fn test_parameter_without_value() {
        let mut cursor = XmlCursor::new(r#"<parameter id="k"/>"#);
        let element = match cursor.next_event().unwrap() {
            Event::Empty(start) => ChildElement {
                start,
                is_empty: true,
            },
            e => panic!("Expected Empty, got {:?}", e),
        };
        let parameter = read_parameter(&mut cursor, element).unwrap();
        assert_eq!(parameter.value, 0.0);
        assert_eq!(cursor.into_log().num_errors(), 1);
    }
}
