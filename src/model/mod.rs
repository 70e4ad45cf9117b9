//! The SED-ML object model.
//!
//! A [`SedDocument`] owns every element of an experiment description. The
//! abstract classes of the SED-ML schema (simulation, task, range, output,
//! curve) are expressed as enums over their concrete kinds, so a document can
//! be walked with exhaustive `match`es.

/// Implements [`SedElement`](crate::types::SedElement) for a struct with a
/// `base: SedBase` field.
macro_rules! sed_element {
    ($ty:ty, $code:expr, $name:literal) => {
        impl $crate::types::SedElement for $ty {
            fn type_code(&self) -> $crate::types::TypeCode {
                $code
            }

            fn element_name(&self) -> &'static str {
                $name
            }

            fn base(&self) -> &$crate::core::SedBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::core::SedBase {
                &mut self.base
            }
        }
    };
}

pub mod data;
pub mod document;
pub mod enums;
pub mod output;
pub mod sed_model;
pub mod simulation;
pub mod style;
pub mod task;
pub mod variable;

pub use data::{DataDescription, DataSource, Slice};
pub use document::SedDocument;
pub use enums::{
    AxisType, CurveType, ExperimentType, LineType, MappingType, MarkerType, ParseEnumError,
    ScaleType, SurfaceType,
};
pub use output::{
    Axis, Curve, Curve2D, DataSet, Figure, Output, ParameterEstimationReport,
    ParameterEstimationResultPlot, Plot2D, Plot3D, PlotSettings, Report, ShadedArea, SubPlot,
    Surface, WaterfallPlot,
};
pub use sed_model::{Change, ChangeKind, Model};
pub use simulation::{Algorithm, AlgorithmParameter, Simulation, SimulationKind};
pub use style::{Fill, Line, Marker, Style};
pub use task::{
    AbstractTask, AdjustableParameter, Bounds, DataRange, ExperimentReference, FitExperiment,
    FitMapping, FunctionalRange, Objective, ParameterEstimationTask, Range, RepeatedTask,
    SetValue, SubTask, Task, UniformRange, VectorRange,
};
pub use variable::{AppliedDimension, DataGenerator, Parameter, Variable};
