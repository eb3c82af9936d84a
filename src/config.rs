use crate::error::ConfigError;
use crate::model::{DataType, ParameterType};
use serde::{Deserialize, Serialize};
use std::fs;

/// Maps one user-facing parameter type to the storage type conditions are coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMapping {
    pub parameter_type: ParameterType,
    pub data_type: DataType,
}

/// Reserved names and type tables the parser works against.
///
/// Every field has a default, so a configuration file only needs to name what it overrides:
///
/// ```json
/// { "agreementStore": "contract", "inDataPrefix": "IN" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserConfig {
    /// Id of the process instance's own data store. Also the sentinel normalized to `""`.
    pub process_instance_store: String,
    pub agreement_store: String,
    /// Field the process-instance store must declare as a contract address.
    pub agreement_field: String,
    pub in_data_prefix: String,
    pub out_data_prefix: String,
    /// Process extension property holding the interface tag.
    pub interface_property: String,
    pub type_mappings: Vec<TypeMapping>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        use DataType as D;
        use ParameterType as P;

        let table = [
            (P::Boolean, D::Bool),
            (P::String, D::String),
            (P::Number, D::Int256),
            (P::Date, D::Uint256),
            (P::Datetime, D::Uint256),
            (P::MonetaryAmount, D::Int256),
            (P::UserOrganization, D::Address),
            (P::ContractAddress, D::Address),
            (P::SigningParty, D::Address),
            (P::Bytes32, D::Bytes32),
            (P::Document, D::String),
            (P::LargeText, D::String),
            (P::PositiveNumber, D::Uint256),
        ];

        Self {
            process_instance_store: "PROCESS_INSTANCE".to_string(),
            agreement_store: "agreement".to_string(),
            agreement_field: "agreement".to_string(),
            in_data_prefix: "INDATA".to_string(),
            out_data_prefix: "OUTDATA".to_string(),
            interface_property: "processInterface".to_string(),
            type_mappings: table
                .into_iter()
                .map(|(parameter_type, data_type)| TypeMapping {
                    parameter_type,
                    data_type,
                })
                .collect(),
        }
    }
}

impl ParserConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn data_type_for(&self, parameter_type: ParameterType) -> Option<DataType> {
        self.type_mappings
            .iter()
            .find(|m| m.parameter_type == parameter_type)
            .map(|m| m.data_type)
    }

    /// Maps the process-instance sentinel to `""`, leaving every other id untouched.
    pub fn normalize_storage_id(&self, data_storage_id: &str) -> String {
        if data_storage_id == self.process_instance_store {
            String::new()
        } else {
            data_storage_id.to_string()
        }
    }
}
