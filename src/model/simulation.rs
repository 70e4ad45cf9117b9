use serde::{Deserialize, Serialize};

use crate::core::SedBase;
use crate::kisao;
use crate::types::{SedElement, TypeCode};

/// How a model is simulated, and with which algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub base: SedBase,
    pub algorithm: Option<Algorithm>,
    pub kind: SimulationKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationKind {
    UniformTimeCourse {
        initial_time: f64,
        output_start_time: f64,
        output_end_time: f64,
        /// Written as `numberOfPoints` before Level 1 Version 4.
        number_of_steps: u32,
    },
    OneStep {
        step: f64,
    },
    SteadyState,
    Analysis,
}

impl Simulation {
    pub fn uniform_time_course(
        id: impl Into<String>,
        initial_time: f64,
        output_start_time: f64,
        output_end_time: f64,
        number_of_steps: u32,
    ) -> Self {
        Self {
            base: SedBase::with_id(id),
            algorithm: None,
            kind: SimulationKind::UniformTimeCourse {
                initial_time,
                output_start_time,
                output_end_time,
                number_of_steps,
            },
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// The algorithm's KiSAO id, if an algorithm is set.
    pub fn kisao_id(&self) -> Option<&str> {
        self.algorithm.as_ref().map(|a| a.kisao_id.as_str())
    }
}

impl SedElement for Simulation {
    fn type_code(&self) -> TypeCode {
        match self.kind {
            SimulationKind::UniformTimeCourse { .. } => TypeCode::UniformTimeCourse,
            SimulationKind::OneStep { .. } => TypeCode::OneStep,
            SimulationKind::SteadyState => TypeCode::SteadyState,
            SimulationKind::Analysis => TypeCode::Analysis,
        }
    }

    fn element_name(&self) -> &'static str {
        match self.kind {
            SimulationKind::UniformTimeCourse { .. } => "uniformTimeCourse",
            SimulationKind::OneStep { .. } => "oneStep",
            SimulationKind::SteadyState => "steadyState",
            SimulationKind::Analysis => "analysis",
        }
    }

    fn base(&self) -> &SedBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SedBase {
        &mut self.base
    }
}

/// A simulation algorithm identified by a KiSAO term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Algorithm {
    pub base: SedBase,
    pub kisao_id: String,
    pub parameters: Vec<AlgorithmParameter>,
}

sed_element!(Algorithm, TypeCode::Algorithm, "algorithm");

impl Algorithm {
    /// Creates an algorithm, naming it after its KiSAO term when the term is known.
    pub fn new(kisao_id: impl Into<String>) -> Self {
        let kisao_id = kisao_id.into();
        let base = SedBase {
            name: kisao::name(&kisao_id).map(str::to_string),
            ..SedBase::default()
        };
        Self {
            base,
            kisao_id,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: AlgorithmParameter) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// A setting of an algorithm, e.g. an absolute tolerance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmParameter {
    pub base: SedBase,
    pub kisao_id: String,
    pub value: String,
    /// Nested parameters (L1V4).
    pub parameters: Vec<AlgorithmParameter>,
}

sed_element!(AlgorithmParameter, TypeCode::AlgorithmParameter, "algorithmParameter");

impl AlgorithmParameter {
    pub fn new(kisao_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            base: SedBase::default(),
            kisao_id: kisao_id.into(),
            value: value.into(),
            parameters: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_named_from_kisao() {
        let algorithm = Algorithm::new("KISAO:0000019");
        assert_eq!(algorithm.base.name.as_deref(), Some("CVODE"));

        let unknown = Algorithm::new("KISAO:9999999");
        assert!(unknown.base.name.is_none());
    }

    #[test]
    fn test_time_course() {
        let sim = Simulation::uniform_time_course("sim1", 0.0, 0.0, 100.0, 1000)
            .with_algorithm(Algorithm::new("KISAO:0000019"));
        assert_eq!(sim.type_code(), TypeCode::UniformTimeCourse);
        assert_eq!(sim.element_name(), "uniformTimeCourse");
        assert_eq!(sim.kisao_id(), Some("KISAO:0000019"));
    }
}
