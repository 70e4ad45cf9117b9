use serde::{Deserialize, Serialize};

use crate::core::SedBase;
use crate::math::Math;
use crate::types::TypeCode;

/// A reference to a model quantity or an implicit symbol such as time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub base: SedBase,
    /// An implicit variable, e.g. `urn:sedml:symbol:time`.
    pub symbol: Option<String>,
    /// An XPath into the model.
    pub target: Option<String>,
    pub task_reference: Option<String>,
    pub model_reference: Option<String>,
    /// A KiSAO term applied to the variable (L1V4).
    pub term: Option<String>,
    pub dimension_term: Option<String>,
    pub applied_dimensions: Vec<AppliedDimension>,
}

sed_element!(Variable, TypeCode::Variable, "variable");

impl Variable {
    pub fn with_target(id: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            base: SedBase::with_id(id),
            target: Some(target.into()),
            ..Self::default()
        }
    }

    pub fn with_symbol(id: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            base: SedBase::with_id(id),
            symbol: Some(symbol.into()),
            ..Self::default()
        }
    }

    pub fn task_reference(mut self, task: impl Into<String>) -> Self {
        self.task_reference = Some(task.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppliedDimension {
    pub base: SedBase,
    pub target: Option<String>,
    pub dimension_target: Option<String>,
}

sed_element!(AppliedDimension, TypeCode::AppliedDimension, "appliedDimension");

/// A named constant used in math.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub base: SedBase,
    pub value: f64,
}

sed_element!(Parameter, TypeCode::Parameter, "parameter");

impl Parameter {
    pub fn new(id: impl Into<String>, value: f64) -> Self {
        Self {
            base: SedBase::with_id(id),
            value,
        }
    }
}

/// Post-processing of task results into the values that outputs display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataGenerator {
    pub base: SedBase,
    pub variables: Vec<Variable>,
    pub parameters: Vec<Parameter>,
    pub math: Option<Math>,
}

sed_element!(DataGenerator, TypeCode::DataGenerator, "dataGenerator");

impl DataGenerator {
    /// A data generator that passes a single variable through unchanged.
    pub fn for_variable(id: impl Into<String>, variable: Variable) -> Self {
        let math = variable.base.id.clone().map(Math::Identifier);
        Self {
            base: SedBase::with_id(id),
            variables: vec![variable],
            parameters: Vec::new(),
            math,
        }
    }

    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variables
            .iter()
            .find(|v| v.base.id.as_deref() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SedElement;

    #[test]
    fn test_data_generator_for_variable() {
        let var = Variable::with_symbol("time", "urn:sedml:symbol:time").task_reference("task1");
        let dg = DataGenerator::for_variable("dg_time", var);
        assert_eq!(dg.math, Some(Math::ident("time")));
        assert_eq!(dg.variable("time").unwrap().task_reference.as_deref(), Some("task1"));
        assert_eq!(dg.type_code(), TypeCode::DataGenerator);
        assert_eq!(dg.id(), Some("dg_time"));
    }
}
