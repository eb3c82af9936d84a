use super::{Classified, ClassifyContext};
use crate::error::ParseError;
use crate::extension::read_extension;
use crate::model::{Condition, ConditionValue, Transition};
use crate::xml::Element;

/// Keys that make up a condition. They must be declared together or not at all.
const CONDITION_KEYS: [&str; 4] = ["lhDataPath", "lhDataStorageId", "operator", "rhValue"];

pub fn classify_sequence_flow(
    node: &Element,
    ctx: &ClassifyContext<'_>,
) -> Result<Classified, ParseError> {
    let id = node.id().to_string();
    let source = required_attr(node, "sourceRef")?;
    let target = required_attr(node, "targetRef")?;

    let condition = match read_extension(node, ctx.config)? {
        None => None,
        Some(props) => {
            let missing: Vec<String> = CONDITION_KEYS
                .iter()
                .filter(|key| !props.contains(key))
                .map(|key| key.to_string())
                .collect();

            if missing.len() == CONDITION_KEYS.len() {
                None
            } else if !missing.is_empty() {
                return Err(ParseError::IncompleteCondition {
                    transition_id: id,
                    missing,
                });
            } else {
                let get = |key: &str| props.get(key).unwrap_or_default().to_string();
                Some(Condition {
                    lh_data_storage_id: ctx.config.normalize_storage_id(&get("lhDataStorageId")),
                    lh_data_path: get("lhDataPath"),
                    operator: get("operator").trim().to_string(),
                    comparator: None,
                    rh_value: ConditionValue::Raw(get("rhValue")),
                    rh_data_storage_id: props
                        .get("rhDataStorageId")
                        .map(|s| ctx.config.normalize_storage_id(s)),
                    rh_data_path: props.get("rhDataPath").map(str::to_string),
                    data_type: None,
                })
            }
        }
    };

    Ok(Classified::Transition(Transition {
        id,
        source,
        target,
        condition,
    }))
}

fn required_attr(node: &Element, attribute: &str) -> Result<String, ParseError> {
    node.attr(attribute)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ParseError::MissingAttribute {
            element: node.id().to_string(),
            attribute: attribute.to_string(),
        })
}
