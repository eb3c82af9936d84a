//! Semantic checks on assembled processes.
//!
//! Unlike the structural passes, validation never stops at the first problem: every
//! transition is checked and all violations are reported together.

use crate::config::ParserConfig;
use crate::error::{ValidationError, Violation};
use crate::model::{ConditionValue, DataStoreField, DataType, Model, Operator, Process};
use tracing::debug;

/// Validates every transition condition of `process` against the model's data-store fields
/// and the gateway topology.
///
/// On success the process is returned with each condition's value coerced, its comparator
/// normalized, and its data type resolved.
pub fn validate_process(
    mut process: Process,
    model: &Model,
    config: &ParserConfig,
) -> Result<Process, ValidationError> {
    let mut violations = Vec::new();

    for transition in process.transitions.iter_mut() {
        let Some(condition) = transition.condition.as_mut() else {
            continue;
        };
        let mut violate = |message: String| {
            violations.push(Violation {
                transition_id: transition.id.clone(),
                message,
            })
        };

        let Some(field) = lookup_field(
            model,
            config,
            &condition.lh_data_storage_id,
            &condition.lh_data_path,
        ) else {
            violate(format!(
                "condition references unknown data path '{}'",
                condition.lh_data_path
            ));
            continue;
        };

        match config.data_type_for(field.parameter_type) {
            Some(data_type) => {
                condition.data_type = Some(data_type);
                if let Some(raw) = condition.rh_value.as_raw() {
                    match coerce(raw, data_type) {
                        Ok(value) => condition.rh_value = value,
                        Err(message) => violate(message),
                    }
                }
            }
            None => violate(format!(
                "no data type is mapped for parameter type {} of '{}'",
                field.parameter_type, field.data_path
            )),
        }

        match Operator::parse_code(&condition.operator) {
            Some(operator) => condition.comparator = Some(operator),
            None => violate(format!(
                "invalid operator '{}', expected a code between 0 and {}",
                condition.operator,
                Operator::ALL.len() - 1
            )),
        }

        let source = &transition.source;
        let xor_sources = process.xor_gateways.iter().filter(|g| &g.id == source).count();
        let and_sources = process.and_gateways.iter().filter(|g| &g.id == source).count();
        if xor_sources != 1 || and_sources != 0 {
            violate(format!(
                "conditions are only allowed on transitions leaving a single XOR gateway, but source '{}' is not one",
                source
            ));
        }
    }

    if violations.is_empty() {
        debug!(process = %process.id, "process validated");
        Ok(process)
    } else {
        debug!(process = %process.id, violations = violations.len(), "process failed validation");
        Err(ValidationError::Process {
            process_id: process.id,
            violations,
        })
    }
}

/// The field declared at `data_path` in the condition's own store, else the first field
/// with that path in any store.
fn lookup_field<'m>(
    model: &'m Model,
    config: &ParserConfig,
    data_storage_id: &str,
    data_path: &str,
) -> Option<&'m DataStoreField> {
    model
        .data_store_fields
        .iter()
        .find(|f| {
            f.data_path == data_path
                && config.normalize_storage_id(&f.data_storage_id) == data_storage_id
        })
        .or_else(|| model.field(data_path))
}

/// Coerces a raw right-hand value to the representation of `data_type`.
pub fn coerce(raw: &str, data_type: DataType) -> Result<ConditionValue, String> {
    let trimmed = raw.trim();
    match data_type {
        DataType::Bool => {
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(ConditionValue::Bool(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(ConditionValue::Bool(false))
            } else {
                Err(format!("'{}' is not a boolean keyword", raw))
            }
        }
        DataType::Int256 => trimmed
            .parse::<i64>()
            .map(ConditionValue::Int)
            .map_err(|_| format!("'{}' is not an integer", raw)),
        DataType::Uint256 => trimmed
            .parse::<u64>()
            .map(ConditionValue::Uint)
            .map_err(|_| format!("'{}' is not an unsigned integer", raw)),
        DataType::String | DataType::Address | DataType::Bytes32 => {
            Ok(ConditionValue::Text(raw.to_string()))
        }
    }
}
