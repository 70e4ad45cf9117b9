//! Type codes for SED-ML elements.
//!
//! Each element of a SED-ML document carries a type code identifying its
//! concrete kind (which output, which simulation, ...). Code that only has a
//! generic handle on an element can dispatch on the code, and diagnostics use
//! it to pick the error number family for the element.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::SedBase;

/// The concrete kind of a SED-ML element.
///
/// Discriminants follow the numbering used by other SED-ML tooling so the
/// numeric values can be exchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u32)]
pub enum TypeCode {
    Unknown = 0,
    Document,
    Model,
    Change,
    ChangeAddXml,
    ChangeAttribute,
    Variable,
    Parameter,
    Simulation,
    UniformTimeCourse,
    Algorithm,
    AbstractTask,
    Task,
    DataGenerator,
    Output,
    Plot,
    Plot2D,
    Plot3D,
    AbstractCurve,
    Curve,
    Surface,
    DataSet,
    Report,
    AlgorithmParameter,
    Range,
    ChangeXml,
    RemoveXml,
    SetValue,
    UniformRange,
    VectorRange,
    FunctionalRange,
    SubTask,
    Analysis,
    OneStep,
    SteadyState,
    RepeatedTask,
    ComputeChange,
    DataDescription,
    DataSource,
    Slice,
    ParameterEstimationTask,
    Objective,
    LeastSquareObjectiveFunction,
    AdjustableParameter,
    ExperimentReference,
    FitExperiment,
    FitMapping,
    Bounds,
    Figure,
    SubPlot,
    Axis,
    Style,
    Line,
    Marker,
    Fill,
    AppliedDimension,
    DataRange,
    ShadedArea,
    ParameterEstimationResultPlot,
    WaterfallPlot,
    ParameterEstimationReport,
    ListOf,
}

impl TypeCode {
    /// The human readable name of the type code.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeCode::Unknown => "(Unknown SED-ML Type)",
            TypeCode::Document => "SedDocument",
            TypeCode::Model => "Model",
            TypeCode::Change => "Change",
            TypeCode::ChangeAddXml => "AddXML",
            TypeCode::ChangeAttribute => "ChangeAttribute",
            TypeCode::Variable => "Variable",
            TypeCode::Parameter => "Parameter",
            TypeCode::Simulation => "Simulation",
            TypeCode::UniformTimeCourse => "UniformTimeCourse",
            TypeCode::Algorithm => "Algorithm",
            TypeCode::AbstractTask => "AbstractTask",
            TypeCode::Task => "Task",
            TypeCode::DataGenerator => "DataGenerator",
            TypeCode::Output => "Output",
            TypeCode::Plot => "Plot",
            TypeCode::Plot2D => "Plot2D",
            TypeCode::Plot3D => "Plot3D",
            TypeCode::AbstractCurve => "AbstractCurve",
            TypeCode::Curve => "Curve",
            TypeCode::Surface => "Surface",
            TypeCode::DataSet => "DataSet",
            TypeCode::Report => "Report",
            TypeCode::AlgorithmParameter => "AlgorithmParameter",
            TypeCode::Range => "Range",
            TypeCode::ChangeXml => "ChangeXML",
            TypeCode::RemoveXml => "RemoveXML",
            TypeCode::SetValue => "SetValue",
            TypeCode::UniformRange => "UniformRange",
            TypeCode::VectorRange => "VectorRange",
            TypeCode::FunctionalRange => "FunctionalRange",
            TypeCode::SubTask => "SubTask",
            TypeCode::Analysis => "Analysis",
            TypeCode::OneStep => "OneStep",
            TypeCode::SteadyState => "SteadyState",
            TypeCode::RepeatedTask => "RepeatedTask",
            TypeCode::ComputeChange => "ComputeChange",
            TypeCode::DataDescription => "DataDescription",
            TypeCode::DataSource => "DataSource",
            TypeCode::Slice => "Slice",
            TypeCode::ParameterEstimationTask => "ParameterEstimationTask",
            TypeCode::Objective => "Objective",
            TypeCode::LeastSquareObjectiveFunction => "LeastSquareObjectiveFunction",
            TypeCode::AdjustableParameter => "AdjustableParameter",
            TypeCode::ExperimentReference => "ExperimentReference",
            TypeCode::FitExperiment => "FitExperiment",
            TypeCode::FitMapping => "FitMapping",
            TypeCode::Bounds => "Bounds",
            TypeCode::Figure => "Figure",
            TypeCode::SubPlot => "SubPlot",
            TypeCode::Axis => "Axis",
            TypeCode::Style => "Style",
            TypeCode::Line => "Line",
            TypeCode::Marker => "Marker",
            TypeCode::Fill => "Fill",
            TypeCode::AppliedDimension => "AppliedDimension",
            TypeCode::DataRange => "DataRange",
            TypeCode::ShadedArea => "ShadedArea",
            TypeCode::ParameterEstimationResultPlot => "ParameterEstimationResultPlot",
            TypeCode::WaterfallPlot => "WaterfallPlot",
            TypeCode::ParameterEstimationReport => "ParameterEstimationReport",
            TypeCode::ListOf => "SedListOf",
        }
    }

    /// The numeric value of the type code.
    pub fn value(&self) -> u32 {
        *self as u32
    }

    /// The hundreds block of the core error table reserved for this kind of
    /// element, e.g. `203` for models (codes 20301..20399).
    ///
    /// Returns `None` for kinds without their own block.
    pub fn error_block(&self) -> Option<u32> {
        let block = match self {
            TypeCode::Document => 202,
            TypeCode::Model => 203,
            TypeCode::Change => 204,
            TypeCode::ChangeAddXml => 205,
            TypeCode::ChangeAttribute => 206,
            TypeCode::Variable => 207,
            TypeCode::Parameter => 208,
            TypeCode::Simulation => 209,
            TypeCode::UniformTimeCourse => 210,
            TypeCode::Algorithm => 211,
            TypeCode::AbstractTask => 212,
            TypeCode::Task => 213,
            TypeCode::DataGenerator => 214,
            TypeCode::Output => 215,
            TypeCode::Plot => 216,
            TypeCode::Plot2D => 217,
            TypeCode::Plot3D => 218,
            TypeCode::AbstractCurve => 219,
            TypeCode::Curve => 220,
            TypeCode::Surface => 221,
            TypeCode::DataSet => 222,
            TypeCode::Report => 223,
            TypeCode::AlgorithmParameter => 224,
            TypeCode::Range => 225,
            TypeCode::ChangeXml => 226,
            TypeCode::RemoveXml => 227,
            TypeCode::SetValue => 228,
            TypeCode::UniformRange => 229,
            TypeCode::VectorRange => 230,
            TypeCode::FunctionalRange => 231,
            TypeCode::SubTask => 232,
            TypeCode::OneStep => 233,
            TypeCode::SteadyState => 234,
            TypeCode::RepeatedTask => 235,
            TypeCode::ComputeChange => 236,
            TypeCode::DataDescription => 237,
            TypeCode::DataSource => 238,
            TypeCode::Slice => 239,
            TypeCode::ParameterEstimationTask => 240,
            TypeCode::Objective => 241,
            TypeCode::LeastSquareObjectiveFunction => 242,
            TypeCode::AdjustableParameter => 243,
            TypeCode::ExperimentReference => 244,
            TypeCode::FitExperiment => 245,
            TypeCode::FitMapping => 246,
            TypeCode::Bounds => 247,
            TypeCode::Figure => 248,
            TypeCode::SubPlot => 249,
            TypeCode::Axis => 250,
            TypeCode::Style => 251,
            TypeCode::Line => 252,
            TypeCode::Marker => 253,
            TypeCode::Fill => 254,
            TypeCode::AppliedDimension => 256,
            TypeCode::DataRange => 257,
            TypeCode::ShadedArea => 259,
            TypeCode::ParameterEstimationResultPlot => 260,
            TypeCode::WaterfallPlot => 261,
            TypeCode::ParameterEstimationReport => 262,
            // Analysis shares the generic simulation block
            TypeCode::Analysis => 209,
            TypeCode::Unknown | TypeCode::ListOf => return None,
        };
        Some(block)
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common behaviour of every SED-ML element in the object model.
pub trait SedElement {
    /// The concrete kind of this element.
    fn type_code(&self) -> TypeCode;

    /// The XML element name this element is written as.
    fn element_name(&self) -> &'static str;

    /// The attributes and annotations shared by all elements.
    fn base(&self) -> &SedBase;

    fn base_mut(&mut self) -> &mut SedBase;

    /// The `id` attribute, if set.
    fn id(&self) -> Option<&str> {
        self.base().id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_values_follow_table_order() {
        assert_eq!(TypeCode::Unknown.value(), 0);
        assert_eq!(TypeCode::Document.value(), 1);
        assert_eq!(TypeCode::UniformTimeCourse.value(), 9);
        assert_eq!(TypeCode::Report.value(), 22);
        assert_eq!(TypeCode::RepeatedTask.value(), 35);
        assert_eq!(TypeCode::ListOf.value(), 61);
    }

    #[test]
    fn test_names() {
        assert_eq!(TypeCode::ChangeAddXml.to_string(), "AddXML");
        assert_eq!(TypeCode::ListOf.as_str(), "SedListOf");
    }

    #[test]
    fn test_error_blocks() {
        assert_eq!(TypeCode::Task.error_block(), Some(213));
        assert_eq!(TypeCode::ParameterEstimationReport.error_block(), Some(262));
        assert_eq!(TypeCode::ListOf.error_block(), None);
    }
}
