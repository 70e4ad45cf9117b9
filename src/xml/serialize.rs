//! Writing SED-ML documents.
//!
//! Every element has a `serialize_*` function taking the quick-xml writer.
//! Unset optional attributes are omitted, empty `listOf*` containers are not
//! written and level/version dependent spellings follow the document's
//! namespace.

use std::io::Write;
use std::string::FromUtf8Error;

use quick_xml::Writer;
use thiserror::Error;

use crate::core::SedBase;
use crate::math::formula::format_real;
use crate::math::{Math, Operator};
use crate::model::{
    AbstractTask, AdjustableParameter, Algorithm, AlgorithmParameter, AppliedDimension, Axis,
    Change, ChangeKind, Curve2D, DataDescription, DataGenerator, DataSet, DataSource,
    FitExperiment, FitMapping, Model, Objective, Output, Parameter, ParameterEstimationTask,
    PlotSettings, Range, RepeatedTask, SedDocument, SetValue, Simulation, SimulationKind, Slice,
    Style, SubPlot, SubTask, Surface, Variable,
};
use crate::namespace::{MATHML_XMLNS, SedNamespace};
use crate::types::SedElement;
use crate::xml::quick::{AttrList, XmlEmitter};

/// Errors that can occur while writing XML.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] FromUtf8Error),
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Serialization error: {0}")]
    Custom(String),
}

/// How a document is laid out when written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Spaces per nesting level, or `None` to write everything on one line.
    pub indent: Option<usize>,
    /// Whether to start with `<?xml version="1.0" encoding="UTF-8"?>`.
    pub xml_declaration: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: Some(2),
            xml_declaration: true,
        }
    }
}

/// Write a document to any byte sink.
pub fn write_document<W: Write>(
    out: W,
    document: &SedDocument,
    options: &WriteOptions,
) -> Result<(), SerializeError> {
    let mut writer = match options.indent {
        Some(width) => Writer::new_with_indent(out, b' ', width),
        None => Writer::new(out),
    };
    if options.xml_declaration {
        XmlEmitter::new(&mut writer).declaration()?;
    }
    serialize_document(&mut writer, document)?;
    log::debug!("wrote {}", document.namespace);
    Ok(())
}

/// Write a document to a string.
pub fn to_xml_string(document: &SedDocument, options: &WriteOptions) -> Result<String, SerializeError> {
    let mut buffer = Vec::new();
    write_document(&mut buffer, document, options)?;
    Ok(String::from_utf8(buffer)?)
}

impl SedDocument {
    /// The document as indented XML with a declaration.
    pub fn to_xml_string(&self) -> Result<String, SerializeError> {
        to_xml_string(self, &WriteOptions::default())
    }
}

/// Writes `<name attrs>notes annotation content</name>`, or an empty element
/// when there is nothing inside.
fn write_element<W, F>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &AttrList,
    base: &SedBase,
    has_content: bool,
    content: F,
) -> Result<(), SerializeError>
where
    W: Write,
    F: FnOnce(&mut Writer<W>) -> Result<(), SerializeError>,
{
    let mut emit = XmlEmitter::new(writer);
    if !has_content && base.notes.is_none() && base.annotation.is_none() {
        return emit.empty_with(name, attrs);
    }
    emit.open(name, attrs)?;
    if let Some(notes) = &base.notes {
        emit.raw("notes", notes)?;
    }
    if let Some(annotation) = &base.annotation {
        emit.raw("annotation", annotation)?;
    }
    content(writer)?;
    XmlEmitter::new(writer).close(name)
}

fn write_list<W, T, F>(
    writer: &mut Writer<W>,
    name: &str,
    items: &[T],
    mut write_item: F,
) -> Result<(), SerializeError>
where
    W: Write,
    F: FnMut(&mut Writer<W>, &T) -> Result<(), SerializeError>,
{
    if items.is_empty() {
        return Ok(());
    }
    writer
        .create_element(name)
        .write_inner_content(|writer| -> Result<(), SerializeError> {
            for item in items {
                write_item(writer, item)?;
            }
            Ok(())
        })?;
    Ok(())
}

/// Serialize the `<sedML>` root and everything below it.
pub fn serialize_document<W: Write>(
    writer: &mut Writer<W>,
    document: &SedDocument,
) -> Result<(), SerializeError> {
    let ns = document.namespace;
    let uri = ns
        .uri()
        .ok_or_else(|| SerializeError::Custom(format!("{} cannot be written", ns)))?;

    let mut attrs = AttrList::new();
    attrs.add("xmlns", uri);
    for (prefix, uri) in &document.namespaces {
        attrs.add(&format!("xmlns:{}", prefix), uri);
    }
    attrs
        .add_value("level", ns.level)
        .add_value("version", ns.version)
        .add_opt("metaid", document.base.metaid.as_deref())
        .add_opt("id", document.base.id.as_deref())
        .add_opt("name", document.base.name.as_deref());

    let has_content = !(document.algorithm_parameters.is_empty()
        && document.data_descriptions.is_empty()
        && document.models.is_empty()
        && document.simulations.is_empty()
        && document.tasks.is_empty()
        && document.data_generators.is_empty()
        && document.outputs.is_empty()
        && document.styles.is_empty());

    write_element(writer, "sedML", &attrs, &document.base, has_content, |writer| {
        if ns.at_least(1, 4) {
            write_list(
                writer,
                "listOfAlgorithmParameters",
                &document.algorithm_parameters,
                serialize_algorithm_parameter,
            )?;
        }
        write_list(
            writer,
            "listOfDataDescriptions",
            &document.data_descriptions,
            serialize_data_description,
        )?;
        write_list(writer, "listOfModels", &document.models, serialize_model)?;
        write_list(writer, "listOfSimulations", &document.simulations, |w, s| {
            serialize_simulation(w, s, ns)
        })?;
        write_list(writer, "listOfTasks", &document.tasks, |w, t| serialize_task(w, t, ns))?;
        write_list(
            writer,
            "listOfDataGenerators",
            &document.data_generators,
            serialize_data_generator,
        )?;
        write_list(writer, "listOfOutputs", &document.outputs, serialize_output)?;
        write_list(writer, "listOfStyles", &document.styles, serialize_style)
    })
}

pub fn serialize_data_description<W: Write>(
    writer: &mut Writer<W>,
    description: &DataDescription,
) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&description.base);
    attrs
        .add_opt("format", description.format.as_deref())
        .add("source", &description.source);
    let has_content =
        description.dimension_description.is_some() || !description.data_sources.is_empty();
    write_element(
        writer,
        "dataDescription",
        &attrs,
        &description.base,
        has_content,
        |writer| {
            if let Some(raw) = &description.dimension_description {
                XmlEmitter::new(writer).raw("dimensionDescription", raw)?;
            }
            write_list(
                writer,
                "listOfDataSources",
                &description.data_sources,
                serialize_data_source,
            )
        },
    )
}

fn serialize_data_source<W: Write>(
    writer: &mut Writer<W>,
    source: &DataSource,
) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&source.base);
    attrs.add_opt("indexSet", source.index_set.as_deref());
    write_element(
        writer,
        "dataSource",
        &attrs,
        &source.base,
        !source.slices.is_empty(),
        |writer| write_list(writer, "listOfSlices", &source.slices, serialize_slice),
    )
}

fn serialize_slice<W: Write>(writer: &mut Writer<W>, slice: &Slice) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&slice.base);
    attrs
        .add("reference", &slice.reference)
        .add_opt("value", slice.value.as_deref())
        .add_opt("index", slice.index.as_deref())
        .add_opt_value("startIndex", slice.start_index)
        .add_opt_value("endIndex", slice.end_index);
    write_element(writer, "slice", &attrs, &slice.base, false, |_| Ok(()))
}

/// Serialize a model with its changes.
pub fn serialize_model<W: Write>(writer: &mut Writer<W>, model: &Model) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&model.base);
    attrs
        .add_opt("language", model.language.as_deref())
        .add("source", &model.source);
    write_element(
        writer,
        "model",
        &attrs,
        &model.base,
        !model.changes.is_empty(),
        |writer| write_list(writer, "listOfChanges", &model.changes, serialize_change),
    )
}

fn serialize_change<W: Write>(writer: &mut Writer<W>, change: &Change) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&change.base);
    attrs.add("target", &change.target);
    let name = change.element_name();
    match &change.kind {
        ChangeKind::AddXml { new_xml } | ChangeKind::ChangeXml { new_xml } => {
            write_element(writer, name, &attrs, &change.base, true, |writer| {
                XmlEmitter::new(writer).raw("newXML", new_xml)
            })
        }
        ChangeKind::RemoveXml => write_element(writer, name, &attrs, &change.base, false, |_| Ok(())),
        ChangeKind::ChangeAttribute { new_value } => {
            attrs.add("newValue", new_value);
            write_element(writer, name, &attrs, &change.base, false, |_| Ok(()))
        }
        ChangeKind::ComputeChange {
            symbol,
            variables,
            parameters,
            math,
        } => {
            attrs.add_opt("symbol", symbol.as_deref());
            let has_content = !variables.is_empty() || !parameters.is_empty() || math.is_some();
            write_element(writer, name, &attrs, &change.base, has_content, |writer| {
                write_computation(writer, variables, parameters, math.as_ref())
            })
        }
    }
}

/// The `listOfVariables`, `listOfParameters` and `math` children shared by
/// data generators, compute changes, functional ranges and set values.
fn write_computation<W: Write>(
    writer: &mut Writer<W>,
    variables: &[Variable],
    parameters: &[Parameter],
    math: Option<&Math>,
) -> Result<(), SerializeError> {
    write_list(writer, "listOfVariables", variables, serialize_variable)?;
    write_list(writer, "listOfParameters", parameters, serialize_parameter)?;
    if let Some(math) = math {
        serialize_math(writer, math)?;
    }
    Ok(())
}

pub fn serialize_variable<W: Write>(
    writer: &mut Writer<W>,
    variable: &Variable,
) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&variable.base);
    attrs
        .add_opt("symbol", variable.symbol.as_deref())
        .add_opt("target", variable.target.as_deref())
        .add_opt("taskReference", variable.task_reference.as_deref())
        .add_opt("modelReference", variable.model_reference.as_deref())
        .add_opt("term", variable.term.as_deref())
        .add_opt("dimensionTerm", variable.dimension_term.as_deref());
    write_element(
        writer,
        "variable",
        &attrs,
        &variable.base,
        !variable.applied_dimensions.is_empty(),
        |writer| {
            write_list(
                writer,
                "listOfAppliedDimensions",
                &variable.applied_dimensions,
                serialize_applied_dimension,
            )
        },
    )
}

fn serialize_applied_dimension<W: Write>(
    writer: &mut Writer<W>,
    dimension: &AppliedDimension,
) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&dimension.base);
    attrs
        .add_opt("target", dimension.target.as_deref())
        .add_opt("dimensionTarget", dimension.dimension_target.as_deref());
    write_element(writer, "appliedDimension", &attrs, &dimension.base, false, |_| Ok(()))
}

pub fn serialize_parameter<W: Write>(
    writer: &mut Writer<W>,
    parameter: &Parameter,
) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&parameter.base);
    attrs.add_real("value", parameter.value);
    write_element(writer, "parameter", &attrs, &parameter.base, false, |_| Ok(()))
}

/// Serialize a simulation. Before Level 1 Version 4 a uniform time course
/// counts `numberOfPoints` instead of `numberOfSteps`.
pub fn serialize_simulation<W: Write>(
    writer: &mut Writer<W>,
    simulation: &Simulation,
    ns: SedNamespace,
) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&simulation.base);
    match &simulation.kind {
        SimulationKind::UniformTimeCourse {
            initial_time,
            output_start_time,
            output_end_time,
            number_of_steps,
        } => {
            attrs
                .add_real("initialTime", *initial_time)
                .add_real("outputStartTime", *output_start_time)
                .add_real("outputEndTime", *output_end_time)
                .add_value(steps_attribute(ns), *number_of_steps);
        }
        SimulationKind::OneStep { step } => {
            attrs.add_real("step", *step);
        }
        SimulationKind::SteadyState | SimulationKind::Analysis => {}
    }
    write_element(
        writer,
        simulation.element_name(),
        &attrs,
        &simulation.base,
        simulation.algorithm.is_some(),
        |writer| match &simulation.algorithm {
            Some(algorithm) => serialize_algorithm(writer, algorithm),
            None => Ok(()),
        },
    )
}

fn steps_attribute(ns: SedNamespace) -> &'static str {
    if ns.at_least(1, 4) {
        "numberOfSteps"
    } else {
        "numberOfPoints"
    }
}

pub fn serialize_algorithm<W: Write>(
    writer: &mut Writer<W>,
    algorithm: &Algorithm,
) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&algorithm.base);
    attrs.add("kisaoID", &algorithm.kisao_id);
    write_element(
        writer,
        "algorithm",
        &attrs,
        &algorithm.base,
        !algorithm.parameters.is_empty(),
        |writer| {
            write_list(
                writer,
                "listOfAlgorithmParameters",
                &algorithm.parameters,
                serialize_algorithm_parameter,
            )
        },
    )
}

fn serialize_algorithm_parameter<W: Write>(
    writer: &mut Writer<W>,
    parameter: &AlgorithmParameter,
) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&parameter.base);
    attrs
        .add("kisaoID", &parameter.kisao_id)
        .add("value", &parameter.value);
    write_element(
        writer,
        "algorithmParameter",
        &attrs,
        &parameter.base,
        !parameter.parameters.is_empty(),
        |writer| {
            write_list(
                writer,
                "listOfAlgorithmParameters",
                &parameter.parameters,
                serialize_algorithm_parameter,
            )
        },
    )
}

/// Serialize any task.
pub fn serialize_task<W: Write>(
    writer: &mut Writer<W>,
    task: &AbstractTask,
    ns: SedNamespace,
) -> Result<(), SerializeError> {
    match task {
        AbstractTask::Task(task) => {
            let mut attrs = AttrList::with_base(&task.base);
            attrs
                .add("modelReference", &task.model_reference)
                .add("simulationReference", &task.simulation_reference);
            write_element(writer, "task", &attrs, &task.base, false, |_| Ok(()))
        }
        AbstractTask::RepeatedTask(task) => serialize_repeated_task(writer, task, ns),
        AbstractTask::ParameterEstimationTask(task) => serialize_estimation_task(writer, task),
    }
}

fn serialize_repeated_task<W: Write>(
    writer: &mut Writer<W>,
    task: &RepeatedTask,
    ns: SedNamespace,
) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&task.base);
    attrs
        .add_opt("range", task.range.as_deref())
        .add_value("resetModel", task.reset_model)
        .add_opt_value("concatenate", task.concatenate);
    let has_content =
        !(task.ranges.is_empty() && task.changes.is_empty() && task.sub_tasks.is_empty());
    write_element(writer, "repeatedTask", &attrs, &task.base, has_content, |writer| {
        write_list(writer, "listOfRanges", &task.ranges, |w, r| serialize_range(w, r, ns))?;
        write_list(writer, "listOfChanges", &task.changes, serialize_set_value)?;
        write_list(writer, "listOfSubTasks", &task.sub_tasks, serialize_sub_task)
    })
}

pub fn serialize_range<W: Write>(
    writer: &mut Writer<W>,
    range: &Range,
    ns: SedNamespace,
) -> Result<(), SerializeError> {
    match range {
        Range::Uniform(range) => {
            let mut attrs = AttrList::with_base(&range.base);
            attrs
                .add_real("start", range.start)
                .add_real("end", range.end)
                .add_value(steps_attribute(ns), range.number_of_steps)
                .add("type", &range.kind);
            write_element(writer, "uniformRange", &attrs, &range.base, false, |_| Ok(()))
        }
        Range::Vector(range) => {
            let attrs = AttrList::with_base(&range.base);
            write_element(
                writer,
                "vectorRange",
                &attrs,
                &range.base,
                !range.values.is_empty(),
                |writer| {
                    let mut emit = XmlEmitter::new(writer);
                    for value in &range.values {
                        emit.text("value", &format_real(*value))?;
                    }
                    Ok(())
                },
            )
        }
        Range::Functional(range) => {
            let mut attrs = AttrList::with_base(&range.base);
            attrs.add_opt("range", range.range.as_deref());
            let has_content =
                !range.variables.is_empty() || !range.parameters.is_empty() || range.math.is_some();
            write_element(writer, "functionalRange", &attrs, &range.base, has_content, |writer| {
                write_computation(writer, &range.variables, &range.parameters, range.math.as_ref())
            })
        }
        Range::Data(range) => {
            let mut attrs = AttrList::with_base(&range.base);
            attrs.add("sourceReference", &range.source_reference);
            write_element(writer, "dataRange", &attrs, &range.base, false, |_| Ok(()))
        }
    }
}

fn serialize_set_value<W: Write>(
    writer: &mut Writer<W>,
    set_value: &SetValue,
) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&set_value.base);
    attrs
        .add("modelReference", &set_value.model_reference)
        .add_opt("symbol", set_value.symbol.as_deref())
        .add_opt("target", set_value.target.as_deref())
        .add_opt("range", set_value.range.as_deref());
    let has_content = !set_value.variables.is_empty()
        || !set_value.parameters.is_empty()
        || set_value.math.is_some();
    write_element(writer, "setValue", &attrs, &set_value.base, has_content, |writer| {
        write_computation(
            writer,
            &set_value.variables,
            &set_value.parameters,
            set_value.math.as_ref(),
        )
    })
}

fn serialize_sub_task<W: Write>(writer: &mut Writer<W>, sub_task: &SubTask) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&sub_task.base);
    attrs
        .add_opt_value("order", sub_task.order)
        .add("task", &sub_task.task);
    write_element(
        writer,
        "subTask",
        &attrs,
        &sub_task.base,
        !sub_task.changes.is_empty(),
        |writer| write_list(writer, "listOfChanges", &sub_task.changes, serialize_set_value),
    )
}

fn serialize_estimation_task<W: Write>(
    writer: &mut Writer<W>,
    task: &ParameterEstimationTask,
) -> Result<(), SerializeError> {
    let attrs = AttrList::with_base(&task.base);
    let has_content = task.algorithm.is_some()
        || task.objective.is_some()
        || !task.adjustable_parameters.is_empty()
        || !task.fit_experiments.is_empty();
    write_element(
        writer,
        "parameterEstimationTask",
        &attrs,
        &task.base,
        has_content,
        |writer| {
            if let Some(algorithm) = &task.algorithm {
                serialize_algorithm(writer, algorithm)?;
            }
            if let Some(Objective::LeastSquare(base)) = &task.objective {
                write_element(
                    writer,
                    "leastSquareObjectiveFunction",
                    &AttrList::with_base(base),
                    base,
                    false,
                    |_| Ok(()),
                )?;
            }
            write_list(
                writer,
                "listOfAdjustableParameters",
                &task.adjustable_parameters,
                serialize_adjustable_parameter,
            )?;
            write_list(
                writer,
                "listOfFitExperiments",
                &task.fit_experiments,
                serialize_fit_experiment,
            )
        },
    )
}

fn serialize_adjustable_parameter<W: Write>(
    writer: &mut Writer<W>,
    parameter: &AdjustableParameter,
) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&parameter.base);
    attrs
        .add_opt_real("initialValue", parameter.initial_value)
        .add_opt("modelReference", parameter.model_reference.as_deref())
        .add("target", &parameter.target);
    let has_content = parameter.bounds.is_some() || !parameter.experiment_references.is_empty();
    write_element(
        writer,
        "adjustableParameter",
        &attrs,
        &parameter.base,
        has_content,
        |writer| {
            if let Some(bounds) = &parameter.bounds {
                let mut attrs = AttrList::with_base(&bounds.base);
                attrs
                    .add_real("lowerBound", bounds.lower_bound)
                    .add_real("upperBound", bounds.upper_bound)
                    .add_value("scale", bounds.scale);
                write_element(writer, "bounds", &attrs, &bounds.base, false, |_| Ok(()))?;
            }
            write_list(
                writer,
                "listOfExperimentReferences",
                &parameter.experiment_references,
                |writer, reference| {
                    let mut attrs = AttrList::with_base(&reference.base);
                    attrs.add("experimentId", &reference.experiment_id);
                    write_element(
                        writer,
                        "experimentReference",
                        &attrs,
                        &reference.base,
                        false,
                        |_| Ok(()),
                    )
                },
            )
        },
    )
}

fn serialize_fit_experiment<W: Write>(
    writer: &mut Writer<W>,
    experiment: &FitExperiment,
) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&experiment.base);
    attrs.add_opt_value("type", experiment.kind);
    let has_content = experiment.algorithm.is_some() || !experiment.fit_mappings.is_empty();
    write_element(
        writer,
        "fitExperiment",
        &attrs,
        &experiment.base,
        has_content,
        |writer| {
            if let Some(algorithm) = &experiment.algorithm {
                serialize_algorithm(writer, algorithm)?;
            }
            write_list(
                writer,
                "listOfFitMappings",
                &experiment.fit_mappings,
                serialize_fit_mapping,
            )
        },
    )
}

fn serialize_fit_mapping<W: Write>(
    writer: &mut Writer<W>,
    mapping: &FitMapping,
) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&mapping.base);
    attrs
        .add("dataSource", &mapping.data_source)
        .add("target", &mapping.target)
        .add_value("type", mapping.kind)
        .add_opt_real("weight", mapping.weight)
        .add_opt("pointWeight", mapping.point_weight.as_deref());
    write_element(writer, "fitMapping", &attrs, &mapping.base, false, |_| Ok(()))
}

pub fn serialize_data_generator<W: Write>(
    writer: &mut Writer<W>,
    generator: &DataGenerator,
) -> Result<(), SerializeError> {
    let attrs = AttrList::with_base(&generator.base);
    let has_content = !generator.variables.is_empty()
        || !generator.parameters.is_empty()
        || generator.math.is_some();
    write_element(writer, "dataGenerator", &attrs, &generator.base, has_content, |writer| {
        write_computation(
            writer,
            &generator.variables,
            &generator.parameters,
            generator.math.as_ref(),
        )
    })
}

/// Serialize any output.
pub fn serialize_output<W: Write>(writer: &mut Writer<W>, output: &Output) -> Result<(), SerializeError> {
    match output {
        Output::Report(report) => write_element(
            writer,
            "report",
            &AttrList::with_base(&report.base),
            &report.base,
            !report.data_sets.is_empty(),
            |writer| write_list(writer, "listOfDataSets", &report.data_sets, serialize_data_set),
        ),
        Output::Plot2D(plot) => {
            let attrs = plot_attrs(&plot.base, &plot.plot);
            let has_content = !plot.curves.is_empty()
                || has_axes(&plot.plot)
                || plot.right_y_axis.is_some();
            write_element(writer, "plot2D", &attrs, &plot.base, has_content, |writer| {
                write_list(writer, "listOfCurves", &plot.curves, serialize_curve)?;
                write_axes(writer, &plot.plot)?;
                if let Some(axis) = &plot.right_y_axis {
                    serialize_axis(writer, "rightYAxis", axis)?;
                }
                Ok(())
            })
        }
        Output::Plot3D(plot) => {
            let attrs = plot_attrs(&plot.base, &plot.plot);
            let has_content =
                !plot.surfaces.is_empty() || has_axes(&plot.plot) || plot.z_axis.is_some();
            write_element(writer, "plot3D", &attrs, &plot.base, has_content, |writer| {
                write_list(writer, "listOfSurfaces", &plot.surfaces, serialize_surface)?;
                write_axes(writer, &plot.plot)?;
                if let Some(axis) = &plot.z_axis {
                    serialize_axis(writer, "zAxis", axis)?;
                }
                Ok(())
            })
        }
        Output::Figure(figure) => {
            let mut attrs = AttrList::with_base(&figure.base);
            attrs
                .add_opt_value("numRows", figure.num_rows)
                .add_opt_value("numCols", figure.num_cols);
            write_element(
                writer,
                "figure",
                &attrs,
                &figure.base,
                !figure.sub_plots.is_empty(),
                |writer| write_list(writer, "listOfSubPlots", &figure.sub_plots, serialize_sub_plot),
            )
        }
        Output::ParameterEstimationResultPlot(plot) => {
            let mut attrs = plot_attrs(&plot.base, &plot.plot);
            attrs.add("taskReference", &plot.task_reference);
            write_element(
                writer,
                "parameterEstimationResultPlot",
                &attrs,
                &plot.base,
                has_axes(&plot.plot),
                |writer| write_axes(writer, &plot.plot),
            )
        }
        Output::WaterfallPlot(plot) => {
            let mut attrs = plot_attrs(&plot.base, &plot.plot);
            attrs.add("taskRef", &plot.task_reference);
            write_element(
                writer,
                "waterfallPlot",
                &attrs,
                &plot.base,
                has_axes(&plot.plot),
                |writer| write_axes(writer, &plot.plot),
            )
        }
        Output::ParameterEstimationReport(report) => {
            let mut attrs = AttrList::with_base(&report.base);
            attrs.add("taskReference", &report.task_reference);
            write_element(
                writer,
                "parameterEstimationReport",
                &attrs,
                &report.base,
                false,
                |_| Ok(()),
            )
        }
    }
}

fn plot_attrs(base: &SedBase, plot: &PlotSettings) -> AttrList {
    let mut attrs = AttrList::with_base(base);
    attrs
        .add_opt_value("legend", plot.legend)
        .add_opt_real("height", plot.height)
        .add_opt_real("width", plot.width);
    attrs
}

fn has_axes(plot: &PlotSettings) -> bool {
    plot.x_axis.is_some() || plot.y_axis.is_some()
}

fn write_axes<W: Write>(writer: &mut Writer<W>, plot: &PlotSettings) -> Result<(), SerializeError> {
    if let Some(axis) = &plot.x_axis {
        serialize_axis(writer, "xAxis", axis)?;
    }
    if let Some(axis) = &plot.y_axis {
        serialize_axis(writer, "yAxis", axis)?;
    }
    Ok(())
}

fn serialize_axis<W: Write>(writer: &mut Writer<W>, name: &str, axis: &Axis) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&axis.base);
    attrs
        .add_opt_value("type", axis.kind)
        .add_opt_real("min", axis.min)
        .add_opt_real("max", axis.max)
        .add_opt_value("grid", axis.grid)
        .add_opt_value("reverse", axis.reverse)
        .add_opt("style", axis.style.as_deref());
    write_element(writer, name, &attrs, &axis.base, false, |_| Ok(()))
}

fn serialize_data_set<W: Write>(writer: &mut Writer<W>, data_set: &DataSet) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&data_set.base);
    attrs
        .add("label", &data_set.label)
        .add("dataReference", &data_set.data_reference);
    write_element(writer, "dataSet", &attrs, &data_set.base, false, |_| Ok(()))
}

fn serialize_curve<W: Write>(writer: &mut Writer<W>, curve: &Curve2D) -> Result<(), SerializeError> {
    match curve {
        Curve2D::Curve(curve) => {
            let mut attrs = AttrList::with_base(&curve.base);
            attrs
                .add_opt_value("logX", curve.log_x)
                .add_opt_value("logY", curve.log_y)
                .add_opt("xDataReference", curve.x_data_reference.as_deref())
                .add_opt("yDataReference", curve.y_data_reference.as_deref())
                .add_opt_value("order", curve.order)
                .add_opt("style", curve.style.as_deref())
                .add_opt("yAxis", curve.y_axis.as_deref())
                .add_opt_value("type", curve.kind)
                .add_opt("xErrorUpper", curve.x_error_upper.as_deref())
                .add_opt("xErrorLower", curve.x_error_lower.as_deref())
                .add_opt("yErrorUpper", curve.y_error_upper.as_deref())
                .add_opt("yErrorLower", curve.y_error_lower.as_deref());
            write_element(writer, "curve", &attrs, &curve.base, false, |_| Ok(()))
        }
        Curve2D::ShadedArea(area) => {
            let mut attrs = AttrList::with_base(&area.base);
            attrs
                .add_opt("xDataReference", area.x_data_reference.as_deref())
                .add_opt_value("order", area.order)
                .add_opt("style", area.style.as_deref())
                .add_opt("yAxis", area.y_axis.as_deref())
                .add("yDataReferenceFrom", &area.y_data_reference_from)
                .add("yDataReferenceTo", &area.y_data_reference_to);
            write_element(writer, "shadedArea", &attrs, &area.base, false, |_| Ok(()))
        }
    }
}

fn serialize_surface<W: Write>(writer: &mut Writer<W>, surface: &Surface) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&surface.base);
    attrs
        .add_opt_value("logX", surface.log_x)
        .add_opt_value("logY", surface.log_y)
        .add_opt_value("logZ", surface.log_z)
        .add_opt("xDataReference", surface.x_data_reference.as_deref())
        .add_opt("yDataReference", surface.y_data_reference.as_deref())
        .add_opt("zDataReference", surface.z_data_reference.as_deref())
        .add_opt_value("order", surface.order)
        .add_opt("style", surface.style.as_deref())
        .add_opt_value("type", surface.kind);
    write_element(writer, "surface", &attrs, &surface.base, false, |_| Ok(()))
}

fn serialize_sub_plot<W: Write>(writer: &mut Writer<W>, sub_plot: &SubPlot) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&sub_plot.base);
    attrs
        .add("plot", &sub_plot.plot)
        .add_opt_value("row", sub_plot.row)
        .add_opt_value("col", sub_plot.col)
        .add_opt_value("rowSpan", sub_plot.row_span)
        .add_opt_value("colSpan", sub_plot.col_span);
    write_element(writer, "subPlot", &attrs, &sub_plot.base, false, |_| Ok(()))
}

pub fn serialize_style<W: Write>(writer: &mut Writer<W>, style: &Style) -> Result<(), SerializeError> {
    let mut attrs = AttrList::with_base(&style.base);
    attrs.add_opt("baseStyle", style.base_style.as_deref());
    let has_content = style.line.is_some() || style.marker.is_some() || style.fill.is_some();
    write_element(writer, "style", &attrs, &style.base, has_content, |writer| {
        if let Some(line) = &style.line {
            let mut attrs = AttrList::with_base(&line.base);
            attrs
                .add_opt_value("type", line.kind)
                .add_opt("color", line.color.as_deref())
                .add_opt_real("thickness", line.thickness);
            write_element(writer, "line", &attrs, &line.base, false, |_| Ok(()))?;
        }
        if let Some(marker) = &style.marker {
            let mut attrs = AttrList::with_base(&marker.base);
            attrs
                .add_opt_real("size", marker.size)
                .add_opt_value("type", marker.kind)
                .add_opt("fill", marker.fill.as_deref())
                .add_opt("lineColor", marker.line_color.as_deref())
                .add_opt_real("lineThickness", marker.line_thickness);
            write_element(writer, "marker", &attrs, &marker.base, false, |_| Ok(()))?;
        }
        if let Some(fill) = &style.fill {
            let mut attrs = AttrList::with_base(&fill.base);
            attrs
                .add_opt("color", fill.color.as_deref())
                .add_opt("secondColor", fill.second_color.as_deref());
            write_element(writer, "fill", &attrs, &fill.base, false, |_| Ok(()))?;
        }
        Ok(())
    })
}

/// Serialize an expression as a MathML `<math>` element.
pub fn serialize_math<W: Write>(writer: &mut Writer<W>, math: &Math) -> Result<(), SerializeError> {
    XmlEmitter::new(writer).open("math", AttrList::new().add("xmlns", MATHML_XMLNS))?;
    write_math_node(writer, math)?;
    XmlEmitter::new(writer).close("math")
}

fn write_cn<W: Write>(
    writer: &mut Writer<W>,
    kind: Option<&str>,
    parts: &[String],
) -> Result<(), SerializeError> {
    let mut emit = XmlEmitter::new(writer);
    let mut attrs = AttrList::new();
    attrs.add_opt("type", kind);
    if let [single] = parts {
        return emit.text_with("cn", &attrs, single);
    }
    emit.open("cn", &attrs)?;
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            emit.empty("sep")?;
        }
        emit.text_node(part)?;
    }
    emit.close("cn")
}

fn write_math_node<W: Write>(writer: &mut Writer<W>, math: &Math) -> Result<(), SerializeError> {
    match math {
        Math::Integer(value) => write_cn(writer, Some("integer"), &[value.to_string()]),
        Math::Real(value) => write_cn(writer, None, &[format_real(*value)]),
        Math::Rational(numerator, denominator) => write_cn(
            writer,
            Some("rational"),
            &[numerator.to_string(), denominator.to_string()],
        ),
        Math::ENotation { mantissa, exponent } => write_cn(
            writer,
            Some("e-notation"),
            &[format_real(*mantissa), exponent.to_string()],
        ),
        Math::Identifier(name) => XmlEmitter::new(writer).text("ci", name),
        Math::Symbol {
            definition_url,
            name,
        } => {
            let mut attrs = AttrList::new();
            attrs.add("definitionURL", definition_url);
            XmlEmitter::new(writer).text_with("csymbol", &attrs, name)
        }
        Math::Constant(constant) => XmlEmitter::new(writer).empty(constant.mathml_name()),
        Math::Apply { op, args } => writer
            .create_element("apply")
            .write_inner_content(|writer| -> Result<(), SerializeError> {
                let mut rest = args.as_slice();
                match op {
                    Operator::Call(name) => XmlEmitter::new(writer).text("ci", name)?,
                    op => XmlEmitter::new(writer).empty(op.mathml_name())?,
                }
                let qualifier = match op {
                    Operator::Log => Some("logbase"),
                    Operator::Root => Some("degree"),
                    _ => None,
                };
                if let (Some(qualifier), [first, _]) = (qualifier, args.as_slice()) {
                    writer
                        .create_element(qualifier)
                        .write_inner_content(|writer| write_math_node(writer, first))?;
                    rest = &args[1..];
                }
                for arg in rest {
                    write_math_node(writer, arg)?;
                }
                Ok(())
            })
            .map(|_| ()),
        Math::Piecewise { pieces, otherwise } => writer
            .create_element("piecewise")
            .write_inner_content(|writer| -> Result<(), SerializeError> {
                for (value, condition) in pieces {
                    writer
                        .create_element("piece")
                        .write_inner_content(|writer| -> Result<(), SerializeError> {
                            write_math_node(writer, value)?;
                            write_math_node(writer, condition)
                        })?;
                }
                if let Some(otherwise) = otherwise {
                    writer
                        .create_element("otherwise")
                        .write_inner_content(|writer| write_math_node(writer, otherwise))?;
                }
                Ok(())
            })
            .map(|_| ()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Constant;
    use crate::model::{Curve, Plot2D, Report, Task, UniformRange, VectorRange};
    use crate::xml::deserialize::read_document;
    use pretty_assertions::assert_eq;

    fn compact(document: &SedDocument) -> String {
        let options = WriteOptions {
            indent: None,
            xml_declaration: false,
        };
        to_xml_string(document, &options).unwrap()
    }

    fn math_xml(math: &Math) -> String {
        let mut buffer = Vec::new();
        let mut writer = Writer::new(&mut buffer);
        serialize_math(&mut writer, math).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn sample_document(level: u32, version: u32) -> SedDocument {
        let mut doc = SedDocument::with_level_and_version(level, version);
        doc.add_namespace("sbml", "http://www.sbml.org/sbml/level2");
        doc.models
            .push(Model::new("model1", "urn:sedml:language:sbml", "oscli.xml"));
        doc.simulations.push(
            Simulation::uniform_time_course("sim1", 0.0, 0.0, 20.0, 1000)
                .with_algorithm(Algorithm::new("KISAO:0000019")),
        );
        doc.tasks
            .push(AbstractTask::Task(Task::new("task1", "model1", "sim1")));
        doc.data_generators.push(DataGenerator::for_variable(
            "dg_time",
            Variable::with_symbol("time", "urn:sedml:symbol:time").task_reference("task1"),
        ));
        doc.outputs.push(Output::Report(Report {
            base: SedBase::with_id("report1"),
            data_sets: vec![DataSet::new("ds1", "time", "dg_time")],
        }));
        doc
    }

    #[test]
    fn test_empty_document() {
        let doc = SedDocument::with_level_and_version(1, 3);
        assert_eq!(
            compact(&doc),
            r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version3" level="1" version="3"/>"#
        );
    }

    #[test]
    fn test_declaration_and_indent() {
        let xml = SedDocument::new().to_xml_string().unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));

        let doc = sample_document(1, 4);
        let xml = doc.to_xml_string().unwrap();
        assert!(xml.contains("\n  <listOfModels>\n    <model "));
    }

    #[test]
    fn test_unsupported_version_is_an_error() {
        let doc = SedDocument::with_level_and_version(2, 1);
        assert!(matches!(compact_result(&doc), Err(SerializeError::Custom(_))));
    }

    fn compact_result(document: &SedDocument) -> Result<String, SerializeError> {
        to_xml_string(
            document,
            &WriteOptions {
                indent: None,
                xml_declaration: false,
            },
        )
    }

    #[test]
    fn test_number_of_points_before_version_4() {
        let old = compact(&sample_document(1, 2));
        assert!(old.contains(r#"numberOfPoints="1000""#));
        assert!(!old.contains("numberOfSteps"));

        let new = compact(&sample_document(1, 4));
        assert!(new.contains(r#"numberOfSteps="1000""#));
    }

    #[test]
    fn test_namespaces_and_base_attributes() {
        let mut doc = sample_document(1, 3);
        doc.base.metaid = Some("_meta".to_string());
        let xml = compact(&doc);
        assert!(xml.starts_with(
            r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version3" xmlns:sbml="http://www.sbml.org/sbml/level2" level="1" version="3" metaid="_meta">"#
        ));
        assert!(xml.contains(r#"<algorithm name="CVODE" kisaoID="KISAO:0000019"/>"#));
    }

    #[test]
    fn test_notes_are_written_raw() {
        let mut doc = SedDocument::new();
        doc.base.notes = Some(r#"<p xmlns="http://www.w3.org/1999/xhtml">A &amp; B</p>"#.to_string());
        let xml = compact(&doc);
        assert!(xml.contains(
            r#"<notes><p xmlns="http://www.w3.org/1999/xhtml">A &amp; B</p></notes></sedML>"#
        ));
    }

    #[test]
    fn test_math_output() {
        let math = Math::binary(Operator::Times, Math::Integer(2), Math::ident("S1"));
        assert_eq!(
            math_xml(&math),
            r#"<math xmlns="http://www.w3.org/1998/Math/MathML"><apply><times/><cn type="integer">2</cn><ci>S1</ci></apply></math>"#
        );

        let log = Math::apply(Operator::Log, vec![Math::Integer(2), Math::ident("x")]);
        assert!(math_xml(&log).contains("<apply><log/><logbase><cn type=\"integer\">2</cn></logbase><ci>x</ci></apply>"));

        let rational = Math::Rational(1, 3);
        assert!(math_xml(&rational).contains(r#"<cn type="rational">1<sep/>3</cn>"#));

        let call = Math::apply(
            Operator::Call("f".to_string()),
            vec![Math::Constant(Constant::Pi), Math::Real(0.5)],
        );
        assert!(math_xml(&call).contains("<apply><ci>f</ci><pi/><cn>0.5</cn></apply>"));
    }

    #[test]
    fn test_round_trip() {
        for version in 1..=5 {
            let mut doc = sample_document(1, version);
            let mut task = RepeatedTask {
                base: SedBase::with_id("repeat"),
                range: Some("r1".to_string()),
                reset_model: false,
                ..RepeatedTask::default()
            };
            task.ranges.push(Range::Uniform(UniformRange {
                base: SedBase::with_id("r1"),
                start: 0.0,
                end: 10.0,
                number_of_steps: 100,
                kind: "linear".to_string(),
            }));
            task.ranges.push(Range::Vector(VectorRange {
                base: SedBase::with_id("r2"),
                values: vec![1.0, 4.5, 1e-9],
            }));
            task.sub_tasks.push(SubTask {
                base: SedBase::default(),
                order: Some(1),
                task: "task1".to_string(),
                changes: Vec::new(),
            });
            doc.tasks.push(AbstractTask::RepeatedTask(task));
            doc.models[0].changes.push(Change::change_attribute(
                "/sbml:sbml/sbml:model/sbml:listOfParameters/sbml:parameter[@id='k']/@value",
                "2.5",
            ));
            doc.outputs.push(Output::Plot2D(Plot2D {
                base: SedBase::with_id("plot1"),
                curves: vec![Curve2D::Curve(Curve::new("c1", "dg_time", "dg_time"))],
                ..Plot2D::default()
            }));

            let xml = doc.to_xml_string().unwrap();
            let read = read_document(&xml);
            assert!(read.error_log().is_empty(), "{}", read.error_log());
            assert_eq!(read, doc);
        }
    }
}
