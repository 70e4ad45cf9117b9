use serde::{Deserialize, Serialize};

/// Attributes and children every SED-ML element may carry.
///
/// `notes` and `annotation` hold the raw inner XML of the respective child
/// element. They are written back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SedBase {
    pub id: Option<String>,
    pub name: Option<String>,
    pub metaid: Option<String>,
    pub notes: Option<String>,
    pub annotation: Option<String>,
}

impl SedBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The id, or an empty string when unset.
    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let base = SedBase::with_id("task1").named("First task");
        assert_eq!(base.id.as_deref(), Some("task1"));
        assert_eq!(base.name.as_deref(), Some("First task"));
        assert!(base.notes.is_none());
        assert_eq!(SedBase::new().id_or_empty(), "");
    }
}
