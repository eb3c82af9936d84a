//! Reads the vendor-neutral `extensionElements/properties` block attached to a node.
//!
//! Indexed data-mapping declarations are spread over several properties:
//!
//! ```text
//! INDATAID_1            = "customer"
//! INDATA_customer_dataPath      = "buyer"
//! INDATA_customer_dataStorageId = "PROCESS_INSTANCE"
//! ```
//!
//! They are set aside while scanning and decoded into `DataMapping`s afterwards.

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::model::{DataMapping, Direction};
use crate::xml::Element;
use ahash::AHashMap;

const EXTENSION_BLOCK: &str = "extensionElements";
const PROPERTIES: &str = "properties";
const PROPERTY: &str = "property";

/// Flat custom properties of a node, plus any decoded data mappings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtensionProperties {
    pub values: AHashMap<String, String>,
    /// `None` when the node declares no indexed mapping keys at all.
    pub data_mappings: Option<Vec<DataMapping>>,
}

impl ExtensionProperties {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Like `get`, but treats an empty value as absent.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.data_mappings.is_none()
    }
}

/// Reads the extension block of `node`.
///
/// Returns `Ok(None)` when the node carries no properties block at all, which callers
/// distinguish from a present-but-empty block where it matters (lanes, collaboration).
pub fn read_extension(
    node: &Element,
    config: &ParserConfig,
) -> Result<Option<ExtensionProperties>, ParseError> {
    let Some(block) = node
        .first_child(EXTENSION_BLOCK)
        .and_then(|ext| ext.first_child(PROPERTIES))
    else {
        return Ok(None);
    };

    // Phase 1: accumulate. Indexed mapping keys are diverted, everything else is copied.
    let mut values = AHashMap::new();
    let mut diverted: Vec<(String, String)> = Vec::new();
    for property in block.children_named(PROPERTY) {
        let Some(name) = property.attr("name") else {
            continue;
        };
        let value = property.attr("value").unwrap_or_default().to_string();
        if name.starts_with(&config.in_data_prefix) || name.starts_with(&config.out_data_prefix) {
            diverted.push((name.to_string(), value));
        } else {
            values.insert(name.to_string(), value);
        }
    }

    // Phase 2: decode.
    let data_mappings = if diverted.is_empty() {
        None
    } else {
        let mappings = decode_data_mappings(&diverted, config).map_err(|reason| {
            ParseError::MalformedExtension {
                node_id: node.id().to_string(),
                reason,
            }
        })?;
        Some(mappings)
    };

    Ok(Some(ExtensionProperties {
        values,
        data_mappings,
    }))
}

/// Decodes diverted `INDATA*`/`OUTDATA*` entries, in the order their id keys appear.
pub fn decode_data_mappings(
    entries: &[(String, String)],
    config: &ParserConfig,
) -> Result<Vec<DataMapping>, String> {
    let lookup: AHashMap<&str, &str> = entries
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let in_id_key = format!("{}ID", config.in_data_prefix);
    let out_id_key = format!("{}ID", config.out_data_prefix);

    let mut mappings = Vec::new();
    for (key, value) in entries {
        let (direction, prefix) = if key.starts_with(&in_id_key) {
            (Direction::In, config.in_data_prefix.as_str())
        } else if key.starts_with(&out_id_key) {
            (Direction::Out, config.out_data_prefix.as_str())
        } else {
            continue;
        };

        let id = value.trim();
        if id.is_empty() {
            return Err(format!("'{}' does not name a data mapping id", key));
        }
        let companion = |suffix: &str| {
            let companion_key = format!("{}_{}_{}", prefix, id, suffix);
            lookup
                .get(companion_key.as_str())
                .map(|v| v.to_string())
                .ok_or_else(|| format!("data mapping '{}' is missing '{}'", id, companion_key))
        };
        let data_path = companion("dataPath")?;
        let data_storage_id = companion("dataStorageId")?;

        mappings.push(DataMapping {
            id: id.to_string(),
            direction,
            data_path,
            data_storage_id: config.normalize_storage_id(&data_storage_id),
        });
    }
    Ok(mappings)
}

/// Inverse of [`decode_data_mappings`]: flattens mappings back into indexed properties.
pub fn encode_data_mappings(
    mappings: &[DataMapping],
    config: &ParserConfig,
) -> Vec<(String, String)> {
    mappings
        .iter()
        .flat_map(|m| {
            let prefix = match m.direction {
                Direction::In => &config.in_data_prefix,
                Direction::Out => &config.out_data_prefix,
            };
            [
                (format!("{}ID_{}", prefix, m.id), m.id.clone()),
                (format!("{}_{}_dataPath", prefix, m.id), m.data_path.clone()),
                (
                    format!("{}_{}_dataStorageId", prefix, m.id),
                    m.data_storage_id.clone(),
                ),
            ]
        })
        .collect()
}
