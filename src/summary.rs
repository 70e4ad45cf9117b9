//! A plain-text overview of a document, as printed by `print_sedml`.
//!
//! One section per top-level collection, each starting with a count line and
//! listing one tab-indented line per element. Sections are separated by a
//! blank line.

use std::io::{self, Write};

use itertools::Itertools;

use crate::math::{Math, formula_to_string};
use crate::model::{
    AbstractTask, ChangeKind, Model, Output, Range, RepeatedTask, SedDocument, Simulation,
    SimulationKind,
};
use crate::types::SedElement;

fn formula(math: Option<&Math>) -> String {
    math.map(formula_to_string).unwrap_or_default()
}

fn or_empty(value: Option<&str>) -> &str {
    value.unwrap_or("")
}

/// Writes the summary of `doc` to `out`.
///
/// When the error log holds entries, they are printed first, prefixed with
/// `Warnings: `.
pub fn write_summary<W: Write>(doc: &SedDocument, out: &mut W) -> io::Result<()> {
    if !doc.error_log().is_empty() {
        writeln!(out, "Warnings: {}", doc.error_log())?;
    }
    if let Some(annotation) = &doc.base.annotation {
        writeln!(out, "document has annotation: {}", annotation)?;
    }

    writeln!(out, "The document has {} simulation(s).", doc.simulations.len())?;
    for simulation in &doc.simulations {
        write_simulation(simulation, out)?;
    }

    writeln!(out)?;
    writeln!(out, "The document has {} model(s).", doc.models.len())?;
    for model in &doc.models {
        write_model(model, out)?;
    }

    writeln!(out)?;
    writeln!(out, "The document has {} task(s).", doc.tasks.len())?;
    for task in &doc.tasks {
        match task {
            AbstractTask::Task(t) => writeln!(
                out,
                "\tTask id={} model={} sim={}",
                t.base.id_or_empty(),
                t.model_reference,
                t.simulation_reference
            )?,
            AbstractTask::RepeatedTask(t) => write_repeated_task(t, out)?,
            AbstractTask::ParameterEstimationTask(t) => writeln!(
                out,
                "\tParameterEstimationTask id={} numAdjustableParameters={} numFitExperiments={}",
                t.base.id_or_empty(),
                t.adjustable_parameters.len(),
                t.fit_experiments.len()
            )?,
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "The document has {} datagenerators(s).",
        doc.data_generators.len()
    )?;
    for generator in &doc.data_generators {
        writeln!(
            out,
            "\tDG id={} math={}",
            generator.base.id_or_empty(),
            formula(generator.math.as_ref())
        )?;
    }

    writeln!(out)?;
    writeln!(out, "The document has {} output(s).", doc.outputs.len())?;
    for output in &doc.outputs {
        match output {
            Output::Report(r) => writeln!(
                out,
                "\tReport id={} numDataSets={}",
                r.base.id_or_empty(),
                r.data_sets.len()
            )?,
            Output::Plot2D(p) => writeln!(
                out,
                "\tPlot2d id={} numCurves={}",
                p.base.id_or_empty(),
                p.curves.len()
            )?,
            Output::Plot3D(p) => writeln!(
                out,
                "\tPlot3d id={} numSurfaces={}",
                p.base.id_or_empty(),
                p.surfaces.len()
            )?,
            other => writeln!(out, "\tEncountered unknown output {}", or_empty(other.id()))?,
        }
    }
    Ok(())
}

fn write_simulation<W: Write>(simulation: &Simulation, out: &mut W) -> io::Result<()> {
    let id = simulation.base.id_or_empty();
    let kisao = simulation.kisao_id().unwrap_or("none");
    match &simulation.kind {
        SimulationKind::UniformTimeCourse {
            output_start_time,
            output_end_time,
            number_of_steps,
            ..
        } => writeln!(
            out,
            "\tTimecourse id={} start={} end={} numPoints={} kisao={}",
            id, output_start_time, output_end_time, number_of_steps, kisao
        ),
        SimulationKind::OneStep { step } => {
            writeln!(out, "\tOneStep id={} step={} kisao={}", id, step, kisao)
        }
        SimulationKind::SteadyState => writeln!(out, "\tSteadyState id={} kisao={}", id, kisao),
        SimulationKind::Analysis => writeln!(out, "\tAnalysis id={} kisao={}", id, kisao),
    }
}

fn write_model<W: Write>(model: &Model, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "\tModel id={} language={} source={} numChanges={}",
        model.base.id_or_empty(),
        or_empty(model.language.as_deref()),
        model.source,
        model.changes.len()
    )?;
    for (index, change) in model.changes.iter().enumerate() {
        write!(out, "\t\tchange {} target: {}", index + 1, change.target)?;
        match &change.kind {
            ChangeKind::AddXml { new_xml } => {
                write!(out, " adds the following child: \n\n\t\t\t{}\n", new_xml)?
            }
            ChangeKind::ChangeXml { new_xml } => {
                write!(out, " replaces the target with: \n\n\t\t\t{}\n", new_xml)?
            }
            ChangeKind::ChangeAttribute { new_value } => {
                write!(out, " changes the attribute to: {}", new_value)?
            }
            ChangeKind::ComputeChange { math, .. } => write!(
                out,
                " replaces the value with the computation: {}",
                formula(math.as_ref())
            )?,
            ChangeKind::RemoveXml => write!(out, " removes the target!")?,
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_repeated_task<W: Write>(task: &RepeatedTask, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "\tRepeatedTask id={} resetModel={} range={}",
        task.base.id_or_empty(),
        task.reset_model,
        or_empty(task.range.as_deref())
    )?;
    for range in &task.ranges {
        match range {
            Range::Uniform(r) => writeln!(
                out,
                "\t\tUniformRange id={} start={} end={} numPoints={} type={}",
                r.base.id_or_empty(),
                r.start,
                r.end,
                r.number_of_steps,
                r.kind
            )?,
            Range::Vector(r) => writeln!(
                out,
                "\t\tVectorRange id={} values={}",
                r.base.id_or_empty(),
                r.values.iter().join(", ")
            )?,
            Range::Functional(r) => writeln!(
                out,
                "\t\tFunctionalRange id={} range={} math={}",
                r.base.id_or_empty(),
                or_empty(r.range.as_deref()),
                formula(r.math.as_ref())
            )?,
            Range::Data(r) => writeln!(
                out,
                "\t\tDataRange id={} source={}",
                r.base.id_or_empty(),
                r.source_reference
            )?,
        }
    }
    writeln!(out)?;
    for set_value in &task.changes {
        writeln!(
            out,
            "\t\tSetValue range={} modelReference={} target={} math={}",
            or_empty(set_value.range.as_deref()),
            set_value.model_reference,
            or_empty(set_value.target.as_deref()),
            formula(set_value.math.as_ref())
        )?;
        for variable in &set_value.variables {
            writeln!(out, "\t\t\tVariable id={}", variable.base.id_or_empty())?;
        }
        for parameter in &set_value.parameters {
            writeln!(out, "\t\t\tParameter id={}", parameter.base.id_or_empty())?;
        }
    }
    writeln!(out)?;
    for sub_task in &task.sub_tasks {
        writeln!(
            out,
            "\t\tSubTask order={} task={}",
            sub_task.order.map(|o| o.to_string()).unwrap_or_default(),
            sub_task.task
        )?;
    }
    Ok(())
}
