use serde::{Deserialize, Serialize};

use crate::core::SedBase;
use crate::math::Math;
use crate::model::{Parameter, Variable};
use crate::types::{SedElement, TypeCode};

/// A model to simulate, with the changes to apply before simulating it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub base: SedBase,
    /// A URN such as `urn:sedml:language:sbml`.
    pub language: Option<String>,
    /// A file path, URL, URN or `#id` reference to another model.
    pub source: String,
    pub changes: Vec<Change>,
}

sed_element!(Model, TypeCode::Model, "model");

impl Model {
    pub fn new(id: impl Into<String>, language: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            base: SedBase::with_id(id),
            language: Some(language.into()),
            source: source.into(),
            changes: Vec::new(),
        }
    }
}

/// A modification of the model, addressed by an XPath `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub base: SedBase,
    pub target: String,
    pub kind: ChangeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChangeKind {
    AddXml {
        new_xml: String,
    },
    ChangeXml {
        new_xml: String,
    },
    RemoveXml,
    ChangeAttribute {
        new_value: String,
    },
    ComputeChange {
        symbol: Option<String>,
        variables: Vec<Variable>,
        parameters: Vec<Parameter>,
        math: Option<Math>,
    },
}

impl Change {
    pub fn new(target: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            base: SedBase::default(),
            target: target.into(),
            kind,
        }
    }

    pub fn change_attribute(target: impl Into<String>, new_value: impl Into<String>) -> Self {
        Self::new(
            target,
            ChangeKind::ChangeAttribute {
                new_value: new_value.into(),
            },
        )
    }
}

impl SedElement for Change {
    fn type_code(&self) -> TypeCode {
        match self.kind {
            ChangeKind::AddXml { .. } => TypeCode::ChangeAddXml,
            ChangeKind::ChangeXml { .. } => TypeCode::ChangeXml,
            ChangeKind::RemoveXml => TypeCode::RemoveXml,
            ChangeKind::ChangeAttribute { .. } => TypeCode::ChangeAttribute,
            ChangeKind::ComputeChange { .. } => TypeCode::ComputeChange,
        }
    }

    fn element_name(&self) -> &'static str {
        match self.kind {
            ChangeKind::AddXml { .. } => "addXML",
            ChangeKind::ChangeXml { .. } => "changeXML",
            ChangeKind::RemoveXml => "removeXML",
            ChangeKind::ChangeAttribute { .. } => "changeAttribute",
            ChangeKind::ComputeChange { .. } => "computeChange",
        }
    }

    fn base(&self) -> &SedBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SedBase {
        &mut self.base
    }
}
