//! Numeric diagnostic codes.
//!
//! Codes below 10000 come from the XML layer, codes from 10000 upwards are
//! SED-ML rules. Element-specific rules live in per-element blocks of one
//! hundred codes (see [`TypeCode::error_block`]).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Category;
use crate::types::TypeCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(pub u32);

impl ErrorCode {
    // XML layer
    pub const XML_FILE_UNREADABLE: ErrorCode = ErrorCode(2);
    pub const MISSING_XML_ENCODING: ErrorCode = ErrorCode(1002);
    pub const BAD_XML_DECL: ErrorCode = ErrorCode(1003);
    pub const BADLY_FORMED_XML: ErrorCode = ErrorCode(1006);
    pub const XML_ATTRIBUTE_TYPE_MISMATCH: ErrorCode = ErrorCode(1016);
    pub const XML_UNEXPECTED_EOF: ErrorCode = ErrorCode(1024);

    // SED-ML core
    pub const UNKNOWN: ErrorCode = ErrorCode(10000);
    pub const NOT_UTF8: ErrorCode = ErrorCode(10001);
    pub const UNRECOGNIZED_ELEMENT: ErrorCode = ErrorCode(10002);
    pub const NOT_SCHEMA_CONFORMANT: ErrorCode = ErrorCode(10003);
    pub const NS_UNDECLARED: ErrorCode = ErrorCode(10101);
    pub const ELEMENT_NOT_IN_NS: ErrorCode = ErrorCode(10102);
    pub const INVALID_MATH_ELEMENT: ErrorCode = ErrorCode(10201);
    pub const DUPLICATE_COMPONENT_ID: ErrorCode = ErrorCode(10301);
    pub const ID_SYNTAX_RULE: ErrorCode = ErrorCode(10302);
    pub const MULTIPLE_ANNOTATIONS: ErrorCode = ErrorCode(10404);
    pub const ONLY_ONE_NOTES_ELEMENT_ALLOWED: ErrorCode = ErrorCode(10805);

    // Document level
    pub const INVALID_LEVEL: ErrorCode = ErrorCode(20201);
    pub const INVALID_VERSION: ErrorCode = ErrorCode(20202);

    // References
    pub const VARIABLE_TARGET_OR_SYMBOL: ErrorCode = ErrorCode(20703);
    pub const VARIABLE_TASK_REF: ErrorCode = ErrorCode(20707);
    pub const VARIABLE_MODEL_REF: ErrorCode = ErrorCode(20708);
    pub const TIME_COURSE_ORDER: ErrorCode = ErrorCode(21008);
    pub const TASK_MODEL_REF: ErrorCode = ErrorCode(21304);
    pub const TASK_SIMULATION_REF: ErrorCode = ErrorCode(21305);
    pub const CURVE_STYLE_REF: ErrorCode = ErrorCode(21907);
    pub const CURVE_X_DATA_REF: ErrorCode = ErrorCode(21909);
    pub const CURVE_Y_DATA_REF: ErrorCode = ErrorCode(22004);
    pub const CURVE_X_ERROR_UPPER_REF: ErrorCode = ErrorCode(22007);
    pub const CURVE_X_ERROR_LOWER_REF: ErrorCode = ErrorCode(22008);
    pub const CURVE_Y_ERROR_UPPER_REF: ErrorCode = ErrorCode(22009);
    pub const CURVE_Y_ERROR_LOWER_REF: ErrorCode = ErrorCode(22010);
    pub const SURFACE_Z_DATA_REF: ErrorCode = ErrorCode(22104);
    pub const SURFACE_X_DATA_REF: ErrorCode = ErrorCode(22106);
    pub const SURFACE_Y_DATA_REF: ErrorCode = ErrorCode(22107);
    pub const SURFACE_STYLE_REF: ErrorCode = ErrorCode(22109);
    pub const DATA_SET_DATA_REF: ErrorCode = ErrorCode(22205);
    pub const SET_VALUE_MODEL_REF: ErrorCode = ErrorCode(22805);
    pub const SET_VALUE_RANGE_REF: ErrorCode = ErrorCode(22808);
    pub const FUNCTIONAL_RANGE_REF: ErrorCode = ErrorCode(23105);
    pub const SUB_TASK_TASK_REF: ErrorCode = ErrorCode(23205);
    pub const REPEATED_TASK_RANGE_REF: ErrorCode = ErrorCode(23505);
    pub const ADJUSTABLE_PARAMETER_MODEL_REF: ErrorCode = ErrorCode(24306);
    pub const EXPERIMENT_REFERENCE_REF: ErrorCode = ErrorCode(24404);
    pub const FIT_MAPPING_DATA_SOURCE_REF: ErrorCode = ErrorCode(24604);
    pub const FIT_MAPPING_TARGET_REF: ErrorCode = ErrorCode(24605);
    pub const SUB_PLOT_PLOT_REF: ErrorCode = ErrorCode(24904);
    pub const AXIS_STYLE_REF: ErrorCode = ErrorCode(25008);
    pub const STYLE_BASE_STYLE_REF: ErrorCode = ErrorCode(25105);
    pub const DATA_RANGE_SOURCE_REF: ErrorCode = ErrorCode(25704);
    pub const SHADED_AREA_Y_DATA_FROM_REF: ErrorCode = ErrorCode(25904);
    pub const SHADED_AREA_Y_DATA_TO_REF: ErrorCode = ErrorCode(25905);
    pub const PE_RESULT_PLOT_TASK_REF: ErrorCode = ErrorCode(26004);
    pub const WATERFALL_PLOT_TASK_REF: ErrorCode = ErrorCode(26104);
    pub const PE_REPORT_TASK_REF: ErrorCode = ErrorCode(26204);

    /// The "only the allowed attributes may appear" rule for an element kind.
    pub fn allowed_attributes(kind: TypeCode) -> ErrorCode {
        match kind.error_block() {
            Some(block) => ErrorCode(block * 100 + 3),
            None => ErrorCode::NOT_SCHEMA_CONFORMANT,
        }
    }

    /// The "only the allowed child elements may appear" rule for an element kind.
    pub fn allowed_elements(kind: TypeCode) -> ErrorCode {
        match kind.error_block() {
            Some(block) => ErrorCode(block * 100 + 4),
            None => ErrorCode::UNRECOGNIZED_ELEMENT,
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// The rule family the code belongs to.
    pub fn category(&self) -> Category {
        match self.0 {
            0..=99 => Category::System,
            100..=9999 => Category::Xml,
            10201..=10299 => Category::MathmlConsistency,
            10301..=10399 => Category::IdentifierConsistency,
            10000..=10999 => Category::Sedml,
            20000..=29999 => Category::GeneralConsistency,
            _ => Category::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ErrorCode> for u32 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}
