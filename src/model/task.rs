use serde::{Deserialize, Serialize};

use crate::core::SedBase;
use crate::math::Math;
use crate::model::{
    Algorithm, ExperimentType, MappingType, Parameter, ScaleType, Variable,
};
use crate::types::{SedElement, TypeCode};

/// Anything listed under `listOfTasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AbstractTask {
    Task(Task),
    RepeatedTask(RepeatedTask),
    ParameterEstimationTask(ParameterEstimationTask),
}

impl AbstractTask {
    fn element(&self) -> &dyn SedElement {
        match self {
            AbstractTask::Task(t) => t,
            AbstractTask::RepeatedTask(t) => t,
            AbstractTask::ParameterEstimationTask(t) => t,
        }
    }

    fn element_mut(&mut self) -> &mut dyn SedElement {
        match self {
            AbstractTask::Task(t) => t,
            AbstractTask::RepeatedTask(t) => t,
            AbstractTask::ParameterEstimationTask(t) => t,
        }
    }
}

impl SedElement for AbstractTask {
    fn type_code(&self) -> TypeCode {
        self.element().type_code()
    }

    fn element_name(&self) -> &'static str {
        self.element().element_name()
    }

    fn base(&self) -> &SedBase {
        self.element().base()
    }

    fn base_mut(&mut self) -> &mut SedBase {
        self.element_mut().base_mut()
    }
}

/// Runs one simulation on one model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub base: SedBase,
    pub model_reference: String,
    pub simulation_reference: String,
}

sed_element!(Task, TypeCode::Task, "task");

impl Task {
    pub fn new(
        id: impl Into<String>,
        model_reference: impl Into<String>,
        simulation_reference: impl Into<String>,
    ) -> Self {
        Self {
            base: SedBase::with_id(id),
            model_reference: model_reference.into(),
            simulation_reference: simulation_reference.into(),
        }
    }
}

/// Runs its sub-tasks once per value of the master range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatedTask {
    pub base: SedBase,
    /// Id of the master range.
    pub range: Option<String>,
    pub reset_model: bool,
    pub concatenate: Option<bool>,
    pub ranges: Vec<Range>,
    pub changes: Vec<SetValue>,
    pub sub_tasks: Vec<SubTask>,
}

sed_element!(RepeatedTask, TypeCode::RepeatedTask, "repeatedTask");

impl Default for RepeatedTask {
    fn default() -> Self {
        Self {
            base: SedBase::default(),
            range: None,
            reset_model: true,
            concatenate: None,
            ranges: Vec::new(),
            changes: Vec::new(),
            sub_tasks: Vec::new(),
        }
    }
}

impl RepeatedTask {
    pub fn range_by_id(&self, id: &str) -> Option<&Range> {
        self.ranges.iter().find(|r| r.id() == Some(id))
    }
}

/// Values iterated over by a repeated task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Range {
    Uniform(UniformRange),
    Vector(VectorRange),
    Functional(FunctionalRange),
    Data(DataRange),
}

impl Range {
    fn element(&self) -> &dyn SedElement {
        match self {
            Range::Uniform(r) => r,
            Range::Vector(r) => r,
            Range::Functional(r) => r,
            Range::Data(r) => r,
        }
    }

    fn element_mut(&mut self) -> &mut dyn SedElement {
        match self {
            Range::Uniform(r) => r,
            Range::Vector(r) => r,
            Range::Functional(r) => r,
            Range::Data(r) => r,
        }
    }

    /// Number of values the range produces, when known without a model.
    pub fn value_count(&self) -> Option<usize> {
        match self {
            Range::Uniform(r) => Some(r.number_of_steps as usize + 1),
            Range::Vector(r) => Some(r.values.len()),
            Range::Functional(_) | Range::Data(_) => None,
        }
    }
}

impl SedElement for Range {
    fn type_code(&self) -> TypeCode {
        self.element().type_code()
    }

    fn element_name(&self) -> &'static str {
        self.element().element_name()
    }

    fn base(&self) -> &SedBase {
        self.element().base()
    }

    fn base_mut(&mut self) -> &mut SedBase {
        self.element_mut().base_mut()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniformRange {
    pub base: SedBase,
    pub start: f64,
    pub end: f64,
    pub number_of_steps: u32,
    /// `linear` or `log`.
    pub kind: String,
}

sed_element!(UniformRange, TypeCode::UniformRange, "uniformRange");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorRange {
    pub base: SedBase,
    pub values: Vec<f64>,
}

sed_element!(VectorRange, TypeCode::VectorRange, "vectorRange");

/// Values computed from another range's values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionalRange {
    pub base: SedBase,
    pub range: Option<String>,
    pub variables: Vec<Variable>,
    pub parameters: Vec<Parameter>,
    pub math: Option<Math>,
}

sed_element!(FunctionalRange, TypeCode::FunctionalRange, "functionalRange");

/// Values taken from a data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataRange {
    pub base: SedBase,
    pub source_reference: String,
}

sed_element!(DataRange, TypeCode::DataRange, "dataRange");

/// Sets a model quantity for each iteration of a repeated task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetValue {
    pub base: SedBase,
    pub model_reference: String,
    pub symbol: Option<String>,
    pub target: Option<String>,
    pub range: Option<String>,
    pub variables: Vec<Variable>,
    pub parameters: Vec<Parameter>,
    pub math: Option<Math>,
}

sed_element!(SetValue, TypeCode::SetValue, "setValue");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubTask {
    pub base: SedBase,
    pub order: Option<i32>,
    pub task: String,
    pub changes: Vec<SetValue>,
}

sed_element!(SubTask, TypeCode::SubTask, "subTask");

/// Fits model parameters to experimental data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterEstimationTask {
    pub base: SedBase,
    pub algorithm: Option<Algorithm>,
    pub objective: Option<Objective>,
    pub adjustable_parameters: Vec<AdjustableParameter>,
    pub fit_experiments: Vec<FitExperiment>,
}

sed_element!(
    ParameterEstimationTask,
    TypeCode::ParameterEstimationTask,
    "parameterEstimationTask"
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Objective {
    LeastSquare(SedBase),
}

impl SedElement for Objective {
    fn type_code(&self) -> TypeCode {
        TypeCode::LeastSquareObjectiveFunction
    }

    fn element_name(&self) -> &'static str {
        "leastSquareObjectiveFunction"
    }

    fn base(&self) -> &SedBase {
        match self {
            Objective::LeastSquare(base) => base,
        }
    }

    fn base_mut(&mut self) -> &mut SedBase {
        match self {
            Objective::LeastSquare(base) => base,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjustableParameter {
    pub base: SedBase,
    pub initial_value: Option<f64>,
    pub model_reference: Option<String>,
    pub target: String,
    pub bounds: Option<Bounds>,
    pub experiment_references: Vec<ExperimentReference>,
}

sed_element!(AdjustableParameter, TypeCode::AdjustableParameter, "adjustableParameter");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub base: SedBase,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub scale: ScaleType,
}

sed_element!(Bounds, TypeCode::Bounds, "bounds");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReference {
    pub base: SedBase,
    pub experiment_id: String,
}

sed_element!(ExperimentReference, TypeCode::ExperimentReference, "experimentReference");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitExperiment {
    pub base: SedBase,
    pub kind: Option<ExperimentType>,
    pub algorithm: Option<Algorithm>,
    pub fit_mappings: Vec<FitMapping>,
}

sed_element!(FitExperiment, TypeCode::FitExperiment, "fitExperiment");

/// Maps a column of experimental data onto a data generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitMapping {
    pub base: SedBase,
    pub data_source: String,
    pub target: String,
    pub kind: MappingType,
    pub weight: Option<f64>,
    pub point_weight: Option<String>,
}

sed_element!(FitMapping, TypeCode::FitMapping, "fitMapping");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abstract_task_dispatch() {
        let task = AbstractTask::Task(Task::new("task1", "model1", "sim1"));
        assert_eq!(task.type_code(), TypeCode::Task);
        assert_eq!(task.id(), Some("task1"));

        let repeated = AbstractTask::RepeatedTask(RepeatedTask::default());
        assert_eq!(repeated.element_name(), "repeatedTask");
    }

    #[test]
    fn test_range_lengths() {
        let uniform = Range::Uniform(UniformRange {
            base: SedBase::with_id("r1"),
            start: 0.0,
            end: 10.0,
            number_of_steps: 10,
            kind: "linear".into(),
        });
        assert_eq!(uniform.value_count(), Some(11));

        let vector = Range::Vector(VectorRange {
            base: SedBase::with_id("r2"),
            values: vec![1.0, 5.0, 10.0],
        });
        assert_eq!(vector.value_count(), Some(3));
        assert_eq!(vector.type_code(), TypeCode::VectorRange);
    }

    #[test]
    fn test_repeated_task_defaults_to_reset() {
        assert!(RepeatedTask::default().reset_model);
    }
}
