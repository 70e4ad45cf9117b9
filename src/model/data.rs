use serde::{Deserialize, Serialize};

use crate::core::SedBase;
use crate::types::TypeCode;

/// External experimental data referenced by the experiment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataDescription {
    pub base: SedBase,
    /// A URN naming the data format, e.g. `urn:sedml:format:numl`.
    pub format: Option<String>,
    pub source: String,
    /// Raw inner XML of `<dimensionDescription>`.
    pub dimension_description: Option<String>,
    pub data_sources: Vec<DataSource>,
}

sed_element!(DataDescription, TypeCode::DataDescription, "dataDescription");

impl DataDescription {
    pub fn data_source(&self, id: &str) -> Option<&DataSource> {
        self.data_sources
            .iter()
            .find(|s| s.base.id.as_deref() == Some(id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub base: SedBase,
    pub index_set: Option<String>,
    pub slices: Vec<Slice>,
}

sed_element!(DataSource, TypeCode::DataSource, "dataSource");

/// A restriction of a data source along one dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub base: SedBase,
    pub reference: String,
    pub value: Option<String>,
    pub index: Option<String>,
    pub start_index: Option<i32>,
    pub end_index: Option<i32>,
}

sed_element!(Slice, TypeCode::Slice, "slice");
