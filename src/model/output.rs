use serde::{Deserialize, Serialize};

use crate::core::SedBase;
use crate::model::{AxisType, CurveType, SurfaceType};
use crate::types::{SedElement, TypeCode};

/// Anything listed under `listOfOutputs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    Report(Report),
    Plot2D(Plot2D),
    Plot3D(Plot3D),
    Figure(Figure),
    ParameterEstimationResultPlot(ParameterEstimationResultPlot),
    WaterfallPlot(WaterfallPlot),
    ParameterEstimationReport(ParameterEstimationReport),
}

impl Output {
    fn element(&self) -> &dyn SedElement {
        match self {
            Output::Report(o) => o,
            Output::Plot2D(o) => o,
            Output::Plot3D(o) => o,
            Output::Figure(o) => o,
            Output::ParameterEstimationResultPlot(o) => o,
            Output::WaterfallPlot(o) => o,
            Output::ParameterEstimationReport(o) => o,
        }
    }

    fn element_mut(&mut self) -> &mut dyn SedElement {
        match self {
            Output::Report(o) => o,
            Output::Plot2D(o) => o,
            Output::Plot3D(o) => o,
            Output::Figure(o) => o,
            Output::ParameterEstimationResultPlot(o) => o,
            Output::WaterfallPlot(o) => o,
            Output::ParameterEstimationReport(o) => o,
        }
    }

    /// The shared plot settings, for outputs that are plots.
    pub fn plot_settings(&self) -> Option<&PlotSettings> {
        match self {
            Output::Plot2D(p) => Some(&p.plot),
            Output::Plot3D(p) => Some(&p.plot),
            Output::ParameterEstimationResultPlot(p) => Some(&p.plot),
            Output::WaterfallPlot(p) => Some(&p.plot),
            Output::Report(_) | Output::Figure(_) | Output::ParameterEstimationReport(_) => None,
        }
    }
}

impl SedElement for Output {
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
pub struct Report {
    pub base: SedBase,
    pub data_sets: Vec<DataSet>,
}

sed_element!(Report, TypeCode::Report, "report");

/// A column of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    pub base: SedBase,
    pub label: String,
    pub data_reference: String,
}

sed_element!(DataSet, TypeCode::DataSet, "dataSet");

impl DataSet {
    pub fn new(id: impl Into<String>, label: impl Into<String>, data_reference: impl Into<String>) -> Self {
        Self {
            base: SedBase::with_id(id),
            label: label.into(),
            data_reference: data_reference.into(),
        }
    }
}

/// Attributes and axes common to all plots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotSettings {
    pub legend: Option<bool>,
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub x_axis: Option<Axis>,
    pub y_axis: Option<Axis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plot2D {
    pub base: SedBase,
    pub plot: PlotSettings,
    pub curves: Vec<Curve2D>,
    pub right_y_axis: Option<Axis>,
}

sed_element!(Plot2D, TypeCode::Plot2D, "plot2D");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plot3D {
    pub base: SedBase,
    pub plot: PlotSettings,
    pub surfaces: Vec<Surface>,
    pub z_axis: Option<Axis>,
}

sed_element!(Plot3D, TypeCode::Plot3D, "plot3D");

/// Anything listed under a 2D plot's `listOfCurves`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Curve2D {
    Curve(Curve),
    ShadedArea(ShadedArea),
}

impl Curve2D {
    pub fn style(&self) -> Option<&str> {
        match self {
            Curve2D::Curve(c) => c.style.as_deref(),
            Curve2D::ShadedArea(s) => s.style.as_deref(),
        }
    }

    pub fn x_data_reference(&self) -> Option<&str> {
        match self {
            Curve2D::Curve(c) => c.x_data_reference.as_deref(),
            Curve2D::ShadedArea(s) => s.x_data_reference.as_deref(),
        }
    }
}

impl SedElement for Curve2D {
    fn type_code(&self) -> TypeCode {
        match self {
            Curve2D::Curve(_) => TypeCode::Curve,
            Curve2D::ShadedArea(_) => TypeCode::ShadedArea,
        }
    }

    fn element_name(&self) -> &'static str {
        match self {
            Curve2D::Curve(_) => "curve",
            Curve2D::ShadedArea(_) => "shadedArea",
        }
    }

    fn base(&self) -> &SedBase {
        match self {
            Curve2D::Curve(c) => &c.base,
            Curve2D::ShadedArea(s) => &s.base,
        }
    }

    fn base_mut(&mut self) -> &mut SedBase {
        match self {
            Curve2D::Curve(c) => &mut c.base,
            Curve2D::ShadedArea(s) => &mut s.base,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub base: SedBase,
    pub log_x: Option<bool>,
    pub log_y: Option<bool>,
    pub x_data_reference: Option<String>,
    pub y_data_reference: Option<String>,
    pub order: Option<i32>,
    pub style: Option<String>,
    /// `left` or `right`.
    pub y_axis: Option<String>,
    pub kind: Option<CurveType>,
    pub x_error_upper: Option<String>,
    pub x_error_lower: Option<String>,
    pub y_error_upper: Option<String>,
    pub y_error_lower: Option<String>,
}

sed_element!(Curve, TypeCode::Curve, "curve");

impl Curve {
    pub fn new(id: impl Into<String>, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            base: SedBase::with_id(id),
            x_data_reference: Some(x.into()),
            y_data_reference: Some(y.into()),
            ..Self::default()
        }
    }
}

/// The area between two data generators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShadedArea {
    pub base: SedBase,
    pub x_data_reference: Option<String>,
    pub order: Option<i32>,
    pub style: Option<String>,
    pub y_axis: Option<String>,
    pub y_data_reference_from: String,
    pub y_data_reference_to: String,
}

sed_element!(ShadedArea, TypeCode::ShadedArea, "shadedArea");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub base: SedBase,
    pub log_x: Option<bool>,
    pub log_y: Option<bool>,
    pub log_z: Option<bool>,
    pub x_data_reference: Option<String>,
    pub y_data_reference: Option<String>,
    pub z_data_reference: Option<String>,
    pub order: Option<i32>,
    pub style: Option<String>,
    pub kind: Option<SurfaceType>,
}

sed_element!(Surface, TypeCode::Surface, "surface");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub base: SedBase,
    pub kind: Option<AxisType>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub grid: Option<bool>,
    pub reverse: Option<bool>,
    pub style: Option<String>,
}

sed_element!(Axis, TypeCode::Axis, "axis");

/// A grid of plots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub base: SedBase,
    pub num_rows: Option<i32>,
    pub num_cols: Option<i32>,
    pub sub_plots: Vec<SubPlot>,
}

sed_element!(Figure, TypeCode::Figure, "figure");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubPlot {
    pub base: SedBase,
    pub plot: String,
    pub row: Option<i32>,
    pub col: Option<i32>,
    pub row_span: Option<i32>,
    pub col_span: Option<i32>,
}

sed_element!(SubPlot, TypeCode::SubPlot, "subPlot");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterEstimationResultPlot {
    pub base: SedBase,
    pub plot: PlotSettings,
    pub task_reference: String,
}

sed_element!(
    ParameterEstimationResultPlot,
    TypeCode::ParameterEstimationResultPlot,
    "parameterEstimationResultPlot"
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterfallPlot {
    pub base: SedBase,
    pub plot: PlotSettings,
    pub task_reference: String,
}

sed_element!(WaterfallPlot, TypeCode::WaterfallPlot, "waterfallPlot");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterEstimationReport {
    pub base: SedBase,
    pub task_reference: String,
}

sed_element!(
    ParameterEstimationReport,
    TypeCode::ParameterEstimationReport,
    "parameterEstimationReport"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dispatch() {
        let report = Output::Report(Report {
            base: SedBase::with_id("report1"),
            data_sets: vec![DataSet::new("ds1", "time", "dg_time")],
        });
        assert_eq!(report.type_code(), TypeCode::Report);
        assert_eq!(report.id(), Some("report1"));
        assert!(report.plot_settings().is_none());

        let plot = Output::Plot2D(Plot2D {
            base: SedBase::with_id("plot1"),
            plot: PlotSettings {
                legend: Some(true),
                ..PlotSettings::default()
            },
            ..Plot2D::default()
        });
        assert_eq!(plot.element_name(), "plot2D");
        assert_eq!(plot.plot_settings().unwrap().legend, Some(true));
    }

    #[test]
    fn test_curve_accessors() {
        let curve = Curve2D::Curve(Curve::new("c1", "dg_time", "dg_s1"));
        assert_eq!(curve.x_data_reference(), Some("dg_time"));
        assert_eq!(curve.type_code(), TypeCode::Curve);
        assert_eq!(curve.style(), None);
    }
}
