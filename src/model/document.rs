use serde::{Deserialize, Serialize};

use crate::core::SedBase;
use crate::diagnostics::{ErrorLog, Severity};
use crate::model::{
    AbstractTask, AlgorithmParameter, DataDescription, DataGenerator, Model, Output, Simulation,
    Style,
};
use crate::namespace::SedNamespace;
use crate::types::{SedElement, TypeCode};

/// A complete SED-ML experiment description.
///
/// Documents produced by [`read_sedml`](crate::read_sedml) carry the
/// diagnostics found while reading in their [`ErrorLog`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SedDocument {
    pub base: SedBase,
    pub namespace: SedNamespace,
    /// Extra `xmlns:prefix="uri"` declarations of the root element, in
    /// document order. XPath targets such as `sbml:model` rely on them.
    pub namespaces: Vec<(String, String)>,
    pub data_descriptions: Vec<DataDescription>,
    pub models: Vec<Model>,
    pub simulations: Vec<Simulation>,
    pub tasks: Vec<AbstractTask>,
    pub data_generators: Vec<DataGenerator>,
    pub outputs: Vec<Output>,
    pub styles: Vec<Style>,
    /// Document-wide algorithm parameters (L1V4).
    pub algorithm_parameters: Vec<AlgorithmParameter>,
    #[serde(skip)]
    error_log: ErrorLog,
}

sed_element!(SedDocument, TypeCode::Document, "sedML");

impl SedDocument {
    /// An empty Level 1 Version 4 document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level_and_version(level: u32, version: u32) -> Self {
        Self {
            namespace: SedNamespace::new(level, version),
            ..Self::default()
        }
    }

    pub fn level(&self) -> u32 {
        self.namespace.level
    }

    pub fn version(&self) -> u32 {
        self.namespace.version
    }

    /// Declares an extra namespace on the root element, replacing any
    /// existing declaration of the same prefix.
    pub fn add_namespace(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        let prefix = prefix.into();
        let uri = uri.into();
        match self.namespaces.iter_mut().find(|(p, _)| *p == prefix) {
            Some(entry) => entry.1 = uri,
            None => self.namespaces.push((prefix, uri)),
        }
    }

    pub fn model(&self, id: &str) -> Option<&Model> {
        find_by_id(&self.models, id)
    }

    pub fn simulation(&self, id: &str) -> Option<&Simulation> {
        find_by_id(&self.simulations, id)
    }

    pub fn task(&self, id: &str) -> Option<&AbstractTask> {
        find_by_id(&self.tasks, id)
    }

    pub fn data_generator(&self, id: &str) -> Option<&DataGenerator> {
        find_by_id(&self.data_generators, id)
    }

    pub fn output(&self, id: &str) -> Option<&Output> {
        find_by_id(&self.outputs, id)
    }

    pub fn style(&self, id: &str) -> Option<&Style> {
        find_by_id(&self.styles, id)
    }

    pub fn data_description(&self, id: &str) -> Option<&DataDescription> {
        find_by_id(&self.data_descriptions, id)
    }

    pub fn error_log(&self) -> &ErrorLog {
        &self.error_log
    }

    pub fn error_log_mut(&mut self) -> &mut ErrorLog {
        &mut self.error_log
    }

    /// Number of diagnostics of any severity.
    pub fn num_errors(&self) -> usize {
        self.error_log.num_errors()
    }

    pub fn num_errors_with_severity(&self, severity: Severity) -> usize {
        self.error_log.num_fails_with_severity(severity)
    }

    /// Whether the log holds any Error or Fatal diagnostic.
    pub fn has_errors(&self) -> bool {
        self.error_log.has_errors()
    }
}

fn find_by_id<'a, T: SedElement>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == Some(id))
}
