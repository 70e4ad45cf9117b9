//! Readers for tasks: plain tasks, repeated tasks with their ranges and
//! set values, and parameter estimation tasks.

use crate::model::{
    AbstractTask, AdjustableParameter, Bounds, DataRange, ExperimentReference, FitExperiment,
    FitMapping, FunctionalRange, Objective, ParameterEstimationTask, Range, RepeatedTask,
    SetValue, SubTask, Task, UniformRange, VectorRange,
};
use crate::diagnostics::{ErrorCode, Severity};
use crate::types::TypeCode;
use crate::xml::deserialize::DeserializeError;
use crate::xml::deserialize::data_generator::Computation;
use crate::xml::deserialize::helpers::{
    AttrReader, read_children, read_items, read_list, text_content,
};
use crate::xml::deserialize::simulation::read_algorithm;
use crate::xml::quick::de::{ChildElement, XmlCursor};

/// Read an item of `listOfTasks`. Returns `None` for unknown element names.
pub fn read_task<'a>(
    cursor: &mut XmlCursor<'a>,
    name: &str,
    element: ChildElement<'a>,
) -> Result<Option<AbstractTask>, DeserializeError> {
    let task = match name {
        "task" => AbstractTask::Task(read_plain_task(cursor, element)?),
        "repeatedTask" => AbstractTask::RepeatedTask(read_repeated_task(cursor, element)?),
        "parameterEstimationTask" => {
            AbstractTask::ParameterEstimationTask(read_estimation_task(cursor, element)?)
        }
        _ => return Ok(None),
    };
    Ok(Some(task))
}

fn read_plain_task<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<Task, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::Task)?;
    let mut task = Task {
        base: attrs.base(),
        model_reference: attrs.required("modelReference"),
        simulation_reference: attrs.required("simulationReference"),
    };
    attrs.finish(cursor);
    read_children(cursor, &element, TypeCode::Task, &mut task.base, |_, _, _| Ok(false))?;
    Ok(task)
}

fn read_repeated_task<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<RepeatedTask, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::RepeatedTask)?;
    let mut task = RepeatedTask {
        base: attrs.base(),
        range: attrs.opt("range"),
        reset_model: attrs.opt_bool("resetModel").unwrap_or(true),
        concatenate: attrs.opt_bool("concatenate"),
        ..RepeatedTask::default()
    };
    attrs.finish(cursor);

    read_children(
        cursor,
        &element,
        TypeCode::RepeatedTask,
        &mut task.base,
        |cursor, name, child| {
            match name {
                "listOfRanges" => read_list(cursor, &child, |cursor, name, item| {
                    match read_range(cursor, name, item)? {
                        Some(range) => {
                            task.ranges.push(range);
                            Ok(true)
                        }
                        None => Ok(false),
                    }
                })?,
                "listOfChanges" => {
                    read_items(cursor, &child, "setValue", &mut task.changes, read_set_value)?
                }
                "listOfSubTasks" => {
                    read_items(cursor, &child, "subTask", &mut task.sub_tasks, read_sub_task)?
                }
                _ => return Ok(false),
            }
            Ok(true)
        },
    )?;
    Ok(task)
}

/// Read an item of `listOfRanges`. Returns `None` for unknown element names.
pub fn read_range<'a>(
    cursor: &mut XmlCursor<'a>,
    name: &str,
    element: ChildElement<'a>,
) -> Result<Option<Range>, DeserializeError> {
    let range = match name {
        "uniformRange" => {
            let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::UniformRange)?;
            let base = attrs.base();
            let start = attrs.required_f64("start");
            let end = attrs.required_f64("end");
            let number_of_steps = if attrs.attrs().has("numberOfPoints") {
                attrs.opt_u32("numberOfPoints")
            } else {
                attrs.required_u32("numberOfSteps")
            };
            let kind = attrs.required("type");
            attrs.finish(cursor);
            let mut range = UniformRange {
                base,
                start,
                end,
                number_of_steps: number_of_steps.unwrap_or_default(),
                kind,
            };
            read_children(
                cursor,
                &element,
                TypeCode::UniformRange,
                &mut range.base,
                |_, _, _| Ok(false),
            )?;
            Range::Uniform(range)
        }
        "vectorRange" => {
            let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::VectorRange)?;
            let mut range = VectorRange {
                base: attrs.base(),
                values: Vec::new(),
            };
            attrs.finish(cursor);
            read_children(
                cursor,
                &element,
                TypeCode::VectorRange,
                &mut range.base,
                |cursor, name, child| match name {
                    "value" => {
                        let text = text_content(cursor, &child)?;
                        match text.trim().parse::<f64>() {
                            Ok(value) => range.values.push(value),
                            Err(_) => cursor.log(
                                ErrorCode::XML_ATTRIBUTE_TYPE_MISMATCH,
                                Severity::Error,
                                format!("The vector range value '{}' is not a valid double.", text.trim()),
                            ),
                        }
                        Ok(true)
                    }
                    _ => Ok(false),
                },
            )?;
            Range::Vector(range)
        }
        "functionalRange" => {
            let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::FunctionalRange)?;
            let mut base = attrs.base();
            let reference = attrs.opt("range");
            attrs.finish(cursor);
            let mut computation = Computation::default();
            read_children(
                cursor,
                &element,
                TypeCode::FunctionalRange,
                &mut base,
                |cursor, name, child| computation.read_child(cursor, name, child),
            )?;
            Range::Functional(FunctionalRange {
                base,
                range: reference,
                variables: computation.variables,
                parameters: computation.parameters,
                math: computation.math,
            })
        }
        "dataRange" => {
            let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::DataRange)?;
            let mut range = DataRange {
                base: attrs.base(),
                source_reference: attrs.required("sourceReference"),
            };
            attrs.finish(cursor);
            read_children(
                cursor,
                &element,
                TypeCode::DataRange,
                &mut range.base,
                |_, _, _| Ok(false),
            )?;
            Range::Data(range)
        }
        _ => return Ok(None),
    };
    Ok(Some(range))
}

pub fn read_set_value<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<SetValue, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::SetValue)?;
    let mut base = attrs.base();
    let model_reference = attrs.required("modelReference");
    let symbol = attrs.opt("symbol");
    let target = attrs.opt("target");
    let range = attrs.opt("range");
    attrs.finish(cursor);

    let mut computation = Computation::default();
    read_children(
        cursor,
        &element,
        TypeCode::SetValue,
        &mut base,
        |cursor, name, child| computation.read_child(cursor, name, child),
    )?;
    Ok(SetValue {
        base,
        model_reference,
        symbol,
        target,
        range,
        variables: computation.variables,
        parameters: computation.parameters,
        math: computation.math,
    })
}

fn read_sub_task<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<SubTask, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::SubTask)?;
    let mut sub_task = SubTask {
        base: attrs.base(),
        order: attrs.opt_i32("order"),
        task: attrs.required("task"),
        changes: Vec::new(),
    };
    attrs.finish(cursor);
    read_children(
        cursor,
        &element,
        TypeCode::SubTask,
        &mut sub_task.base,
        |cursor, name, child| match name {
            "listOfChanges" => {
                read_items(cursor, &child, "setValue", &mut sub_task.changes, read_set_value)?;
                Ok(true)
            }
            _ => Ok(false),
        },
    )?;
    Ok(sub_task)
}

fn read_estimation_task<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<ParameterEstimationTask, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::ParameterEstimationTask)?;
    let mut task = ParameterEstimationTask {
        base: attrs.base(),
        ..ParameterEstimationTask::default()
    };
    attrs.finish(cursor);

    read_children(
        cursor,
        &element,
        TypeCode::ParameterEstimationTask,
        &mut task.base,
        |cursor, name, child| {
            match name {
                "algorithm" => task.algorithm = Some(read_algorithm(cursor, child)?),
                "leastSquareObjectiveFunction" => {
                    let mut attrs = AttrReader::new(
                        cursor,
                        &child.start,
                        TypeCode::LeastSquareObjectiveFunction,
                    )?;
                    let mut base = attrs.base();
                    attrs.finish(cursor);
                    read_children(
                        cursor,
                        &child,
                        TypeCode::LeastSquareObjectiveFunction,
                        &mut base,
                        |_, _, _| Ok(false),
                    )?;
                    task.objective = Some(Objective::LeastSquare(base));
                }
                "listOfAdjustableParameters" => read_items(
                    cursor,
                    &child,
                    "adjustableParameter",
                    &mut task.adjustable_parameters,
                    read_adjustable_parameter,
                )?,
                "listOfFitExperiments" => read_items(
                    cursor,
                    &child,
                    "fitExperiment",
                    &mut task.fit_experiments,
                    read_fit_experiment,
                )?,
                _ => return Ok(false),
            }
            Ok(true)
        },
    )?;
    Ok(task)
}

fn read_adjustable_parameter<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<AdjustableParameter, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::AdjustableParameter)?;
    let mut parameter = AdjustableParameter {
        base: attrs.base(),
        initial_value: attrs.opt_f64("initialValue"),
        model_reference: attrs.opt("modelReference"),
        target: attrs.required("target"),
        bounds: None,
        experiment_references: Vec::new(),
    };
    attrs.finish(cursor);

    read_children(
        cursor,
        &element,
        TypeCode::AdjustableParameter,
        &mut parameter.base,
        |cursor, name, child| {
            match name {
                "bounds" => parameter.bounds = Some(read_bounds(cursor, child)?),
                "listOfExperimentReferences" => read_items(
                    cursor,
                    &child,
                    "experimentReference",
                    &mut parameter.experiment_references,
                    read_experiment_reference,
                )?,
                _ => return Ok(false),
            }
            Ok(true)
        },
    )?;
    Ok(parameter)
}

fn read_bounds<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<Bounds, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::Bounds)?;
    let mut bounds = Bounds {
        base: attrs.base(),
        lower_bound: attrs.required_f64("lowerBound"),
        upper_bound: attrs.required_f64("upperBound"),
        scale: attrs.opt_enum("scale").unwrap_or_default(),
    };
    attrs.finish(cursor);
    read_children(cursor, &element, TypeCode::Bounds, &mut bounds.base, |_, _, _| Ok(false))?;
    Ok(bounds)
}

fn read_experiment_reference<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<ExperimentReference, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::ExperimentReference)?;
    let mut reference = ExperimentReference {
        base: attrs.base(),
        experiment_id: attrs.required("experimentId"),
    };
    attrs.finish(cursor);
    read_children(
        cursor,
        &element,
        TypeCode::ExperimentReference,
        &mut reference.base,
        |_, _, _| Ok(false),
    )?;
    Ok(reference)
}

fn read_fit_experiment<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<FitExperiment, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::FitExperiment)?;
    let mut experiment = FitExperiment {
        base: attrs.base(),
        kind: attrs.opt_enum("type"),
        algorithm: None,
        fit_mappings: Vec::new(),
    };
    attrs.finish(cursor);

    read_children(
        cursor,
        &element,
        TypeCode::FitExperiment,
        &mut experiment.base,
        |cursor, name, child| {
            match name {
                "algorithm" => experiment.algorithm = Some(read_algorithm(cursor, child)?),
                "listOfFitMappings" => read_items(
                    cursor,
                    &child,
                    "fitMapping",
                    &mut experiment.fit_mappings,
                    read_fit_mapping,
                )?,
                _ => return Ok(false),
            }
            Ok(true)
        },
    )?;
    Ok(experiment)
}

fn read_fit_mapping<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<FitMapping, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::FitMapping)?;
    let mut mapping = FitMapping {
        base: attrs.base(),
        data_source: attrs.required("dataSource"),
        target: attrs.required("target"),
        kind: attrs.opt_enum("type").unwrap_or_default(),
        weight: attrs.opt_f64("weight"),
        point_weight: attrs.opt("pointWeight"),
    };
    attrs.finish(cursor);
    read_children(
        cursor,
        &element,
        TypeCode::FitMapping,
        &mut mapping.base,
        |_, _, _| Ok(false),
    )?;
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MappingType, ScaleType};
    use quick_xml::events::Event;

    fn read(xml: &str) -> (AbstractTask, crate::diagnostics::ErrorLog) {
        let mut cursor = XmlCursor::new(xml);
        let element = match cursor.next_event().unwrap() {
            Event::Start(start) => ChildElement {
                start,
                is_empty: false,
            },
            Event::Empty(start) => ChildElement {
                start,
                is_empty: true,
            },
            e => panic!("Expected an element, got {:?}", e),
        };
        let name = element.name();
        let task = read_task(&mut cursor, &name, element).unwrap().unwrap();
        (task, cursor.into_log())
    }

    #[test]
    fn test_plain_task() {
        let (task, log) = read(r#"<task id="t1" modelReference="m1" simulationReference="s1"/>"#);
        assert!(log.is_empty());
        match task {
            AbstractTask::Task(task) => {
                assert_eq!(task.model_reference, "m1");
                assert_eq!(task.simulation_reference, "s1");
            }
            other => panic!("Expected a task, got {:?}", other),
        }
    }

    #[test]
    fn test_repeated_task() {
        let (task, log) = read(
            r#"<repeatedTask id="rt" range="r1" resetModel="false">
                 <listOfRanges>
                   <vectorRange id="r1"><value>1</value><value> 4.5 </value></vectorRange>
                   <uniformRange id="r2" start="0" end="1" numberOfPoints="10" type="linear"/>
                 </listOfRanges>
                 <listOfChanges>
                   <setValue modelReference="m1" target="/p[@id='k']" range="r1">
                     <math xmlns="http://www.w3.org/1998/Math/MathML"><ci>r1</ci></math>
                   </setValue>
                 </listOfChanges>
                 <listOfSubTasks>
                   <subTask order="1" task="t1"/>
                 </listOfSubTasks>
               </repeatedTask>"#,
        );
        assert!(log.is_empty(), "{}", log);
        let AbstractTask::RepeatedTask(task) = task else {
            panic!("Expected a repeated task");
        };
        assert!(!task.reset_model);
        assert_eq!(task.ranges.len(), 2);
        assert_eq!(task.ranges[0].value_count(), Some(2));
        match &task.ranges[1] {
            Range::Uniform(range) => assert_eq!(range.number_of_steps, 10),
            other => panic!("Expected a uniform range, got {:?}", other),
        }
        assert_eq!(task.changes[0].range.as_deref(), Some("r1"));
        assert_eq!(task.sub_tasks[0].order, Some(1));
    }

    #[test]
    fn test_parameter_estimation_task() {
        let (task, log) = read(
            r#"<parameterEstimationTask id="pe">
                 <algorithm kisaoID="KISAO:0000514"/>
                 <leastSquareObjectiveFunction/>
                 <listOfAdjustableParameters>
                   <adjustableParameter initialValue="1" modelReference="m1" target="/p[@id='k']">
                     <bounds lowerBound="0.1" upperBound="10" scale="log"/>
                     <listOfExperimentReferences><experimentReference experimentId="fe1"/></listOfExperimentReferences>
                   </adjustableParameter>
                 </listOfAdjustableParameters>
                 <listOfFitExperiments>
                   <fitExperiment id="fe1" type="timeCourse">
                     <listOfFitMappings>
                       <fitMapping dataSource="ds1" target="dg1" type="experimentalCondition" weight="1"/>
                     </listOfFitMappings>
                   </fitExperiment>
                 </listOfFitExperiments>
               </parameterEstimationTask>"#,
        );
        assert!(log.is_empty(), "{}", log);
        let AbstractTask::ParameterEstimationTask(task) = task else {
            panic!("Expected a parameter estimation task");
        };
        assert!(task.objective.is_some());
        let parameter = &task.adjustable_parameters[0];
        assert_eq!(parameter.bounds.as_ref().unwrap().scale, ScaleType::Log);
        assert_eq!(parameter.experiment_references[0].experiment_id, "fe1");
        assert_eq!(
            task.fit_experiments[0].fit_mappings[0].kind,
            MappingType::ExperimentalCondition
        );
    }
}
