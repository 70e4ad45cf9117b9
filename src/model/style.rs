use serde::{Deserialize, Serialize};

use crate::core::SedBase;
use crate::model::{LineType, MarkerType};
use crate::types::TypeCode;

/// Visual properties shared by curves, surfaces and axes (L1V4).
///
/// A style may derive from another style through `base_style`; properties it
/// sets override the inherited ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub base: SedBase,
    pub base_style: Option<String>,
    pub line: Option<Line>,
    pub marker: Option<Marker>,
    pub fill: Option<Fill>,
}

sed_element!(Style, TypeCode::Style, "style");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub base: SedBase,
    pub kind: Option<LineType>,
    /// Hex colour, `#RRGGBB` or `#RRGGBBAA`.
    pub color: Option<String>,
    pub thickness: Option<f64>,
}

sed_element!(Line, TypeCode::Line, "line");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub base: SedBase,
    pub size: Option<f64>,
    pub kind: Option<MarkerType>,
    pub fill: Option<String>,
    pub line_color: Option<String>,
    pub line_thickness: Option<f64>,
}

sed_element!(Marker, TypeCode::Marker, "marker");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub base: SedBase,
    pub color: Option<String>,
    pub second_color: Option<String>,
}

sed_element!(Fill, TypeCode::Fill, "fill");
