use super::enums::ParameterType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic version of a model: `[major, minor, patch]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version(pub [u32; 3]);

impl Version {
    /// Parses `major.minor.patch`. Returns `None` unless all three parts are numeric.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.trim().split('.');
        let mut version = [0u32; 3];
        for slot in version.iter_mut() {
            *slot = parts.next()?.parse().ok()?;
        }
        if parts.next().is_some() {
            return None;
        }
        Some(Version(version))
    }

    pub fn major(&self) -> u32 {
        self.0[0]
    }

    pub fn minor(&self) -> u32 {
        self.0[1]
    }

    pub fn patch(&self) -> u32 {
        self.0[2]
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.0[0], self.0[1], self.0[2])
    }
}

/// A typed field declared by one of the model's data stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStoreField {
    pub data_storage_id: String,
    pub data_path: String,
    pub parameter_type: ParameterType,
}

/// Collaboration-level metadata shared by every process of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    pub name: String,
    pub version: Version,
    pub private: bool,
    pub data_store_fields: Vec<DataStoreField>,
}

impl Model {
    pub fn field(&self, data_path: &str) -> Option<&DataStoreField> {
        self.data_store_fields
            .iter()
            .find(|f| f.data_path == data_path)
    }
}
