//! Readers for simulations, algorithms and algorithm parameters.

use crate::model::{Algorithm, AlgorithmParameter, Simulation, SimulationKind};
use crate::types::TypeCode;
use crate::xml::deserialize::DeserializeError;
use crate::xml::deserialize::helpers::{AttrReader, read_children, read_items};
use crate::xml::quick::de::{ChildElement, XmlCursor};

/// The type code of a simulation element name, if it is one.
pub fn simulation_code(name: &str) -> Option<TypeCode> {
    match name {
        "uniformTimeCourse" => Some(TypeCode::UniformTimeCourse),
        "oneStep" => Some(TypeCode::OneStep),
        "steadyState" => Some(TypeCode::SteadyState),
        "analysis" => Some(TypeCode::Analysis),
        _ => None,
    }
}

pub fn read_simulation<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
    code: TypeCode,
) -> Result<Simulation, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, code)?;
    let base = attrs.base();
    let kind = match code {
        TypeCode::UniformTimeCourse => {
            let initial_time = attrs.required_f64("initialTime");
            let output_start_time = attrs.required_f64("outputStartTime");
            let output_end_time = attrs.required_f64("outputEndTime");
            // numberOfPoints is the pre-Version 4 spelling
            let number_of_steps = if attrs.attrs().has("numberOfPoints") {
                attrs.opt_u32("numberOfPoints")
            } else {
                attrs.required_u32("numberOfSteps")
            };
            SimulationKind::UniformTimeCourse {
                initial_time,
                output_start_time,
                output_end_time,
                number_of_steps: number_of_steps.unwrap_or_default(),
            }
        }
        TypeCode::OneStep => SimulationKind::OneStep {
            step: attrs.required_f64("step"),
        },
        TypeCode::Analysis => SimulationKind::Analysis,
        _ => SimulationKind::SteadyState,
    };
    attrs.finish(cursor);

    let mut simulation = Simulation {
        base,
        algorithm: None,
        kind,
    };
    read_children(
        cursor,
        &element,
        code,
        &mut simulation.base,
        |cursor, name, child| match name {
            "algorithm" => {
                simulation.algorithm = Some(read_algorithm(cursor, child)?);
                Ok(true)
            }
            _ => Ok(false),
        },
    )?;
    Ok(simulation)
}

pub fn read_algorithm<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<Algorithm, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::Algorithm)?;
    let mut algorithm = Algorithm {
        base: attrs.base(),
        kisao_id: attrs.required("kisaoID"),
        parameters: Vec::new(),
    };
    attrs.finish(cursor);

    read_children(
        cursor,
        &element,
        TypeCode::Algorithm,
        &mut algorithm.base,
        |cursor, name, child| match name {
            "listOfAlgorithmParameters" => {
                read_items(
                    cursor,
                    &child,
                    "algorithmParameter",
                    &mut algorithm.parameters,
                    read_algorithm_parameter,
                )?;
                Ok(true)
            }
            _ => Ok(false),
        },
    )?;
    Ok(algorithm)
}

pub fn read_algorithm_parameter<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<AlgorithmParameter, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::AlgorithmParameter)?;
    let mut parameter = AlgorithmParameter {
        base: attrs.base(),
        kisao_id: attrs.required("kisaoID"),
        value: attrs.required("value"),
        parameters: Vec::new(),
    };
    attrs.finish(cursor);

    read_children(
        cursor,
        &element,
        TypeCode::AlgorithmParameter,
        &mut parameter.base,
        |cursor, name, child| match name {
            "listOfAlgorithmParameters" => {
                read_items(
                    cursor,
                    &child,
                    "algorithmParameter",
                    &mut parameter.parameters,
                    read_algorithm_parameter,
                )?;
                Ok(true)
            }
            _ => Ok(false),
        },
    )?;
    Ok(parameter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorCode;
    use quick_xml::events::Event;

    fn read(xml: &str) -> (Simulation, crate::diagnostics::ErrorLog) {
        let mut cursor = XmlCursor::new(xml);
        let (start, is_empty) = match cursor.next_event().unwrap() {
            Event::Start(start) => (start, false),
            Event::Empty(start) => (start, true),
            e => panic!("Expected an element, got {:?}", e),
        };
        let element = ChildElement { start, is_empty };
        let code = simulation_code(&element.name()).unwrap();
        let simulation = read_simulation(&mut cursor, element, code).unwrap();
        (simulation, cursor.into_log())
    }

    #[test]
    fn test_uniform_time_course_with_number_of_points() {
        let (simulation, log) = read(
            r#"<uniformTimeCourse id="sim1" initialTime="0" outputStartTime="0" outputEndTime="10" numberOfPoints="100">
                 <algorithm kisaoID="KISAO:0000019">
                   <listOfAlgorithmParameters>
                     <algorithmParameter kisaoID="KISAO:0000211" value="1e-6"/>
                   </listOfAlgorithmParameters>
                 </algorithm>
               </uniformTimeCourse>"#,
        );
        assert!(log.is_empty());
        assert_eq!(
            simulation.kind,
            SimulationKind::UniformTimeCourse {
                initial_time: 0.0,
                output_start_time: 0.0,
                output_end_time: 10.0,
                number_of_steps: 100,
            }
        );
        assert_eq!(simulation.kisao_id(), Some("KISAO:0000019"));
        let algorithm = simulation.algorithm.unwrap();
        assert_eq!(algorithm.parameters[0].value, "1e-6");
    }

    #[test]
    fn test_missing_steps_and_bad_double() {
        let (simulation, log) = read(
            r#"<uniformTimeCourse id="sim1" initialTime="zero" outputStartTime="0" outputEndTime="10"/>"#,
        );
        assert!(matches!(
            simulation.kind,
            SimulationKind::UniformTimeCourse {
                initial_time,
                number_of_steps: 0,
                ..
            } if initial_time == 0.0
        ));
        assert!(log.contains(ErrorCode::XML_ATTRIBUTE_TYPE_MISMATCH));
        assert!(log.contains(ErrorCode::allowed_attributes(TypeCode::UniformTimeCourse)));
    }

    #[test]
    fn test_one_step() {
        let (simulation, log) = read(r#"<oneStep id="s" step="0.5"/>"#);
        assert!(log.is_empty());
        assert_eq!(simulation.kind, SimulationKind::OneStep { step: 0.5 });
    }
}
