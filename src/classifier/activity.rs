use super::{Classified, ClassifyContext};
use crate::error::ParseError;
use crate::extension::{ExtensionProperties, read_extension};
use crate::model::{Activity, ActivityKind, ActivityType, TaskBehavior, TaskType};
use crate::xml::Element;

const BEHAVIOR: &str = "behavior";
const APPLICATION: &str = "application";
const SUB_PROCESS_MODEL_ID: &str = "subProcessModelId";
const PROCESS_ID: &str = "processId";

pub fn classify_task(node: &Element, ctx: &ClassifyContext<'_>) -> Result<Classified, ParseError> {
    let props = properties(node, ctx)?;
    let mut activity = seed(node, ActivityKind::Task, &props);
    activity.behavior = resolve_behavior(node, &props, TaskBehavior::Send)?;
    Ok(Classified::Activity(activity))
}

pub fn classify_user_task(
    node: &Element,
    ctx: &ClassifyContext<'_>,
) -> Result<Classified, ParseError> {
    // First match wins when several lanes list the same task.
    let assignee = ctx
        .participants
        .iter()
        .find(|p| p.performs(node.id()))
        .ok_or_else(|| ParseError::NoAssigneeFound {
            task_id: node.id().to_string(),
        })?;

    let props = properties(node, ctx)?;
    let mut activity = seed(node, ActivityKind::UserTask, &props);
    activity.assignee = assignee.id.clone();
    activity.task_type = TaskType::User;
    activity.behavior = TaskBehavior::SendReceive;
    activity.multi_instance = has_loop_characteristics(node);
    Ok(Classified::Activity(activity))
}

pub fn classify_send_task(
    node: &Element,
    ctx: &ClassifyContext<'_>,
) -> Result<Classified, ParseError> {
    let props = properties(node, ctx)?;
    let mut activity = seed(node, ActivityKind::SendTask, &props);
    activity.task_type = TaskType::Event;
    activity.behavior = resolve_behavior(node, &props, TaskBehavior::SendReceive)?;
    Ok(Classified::Activity(activity))
}

pub fn classify_service_task(
    node: &Element,
    ctx: &ClassifyContext<'_>,
) -> Result<Classified, ParseError> {
    let props = properties(node, ctx)?;
    if props.non_empty(APPLICATION).is_none() {
        return Err(ParseError::MissingApplication {
            task_id: node.id().to_string(),
        });
    }
    let mut activity = seed(node, ActivityKind::ServiceTask, &props);
    activity.task_type = TaskType::Service;
    activity.behavior = TaskBehavior::Send;
    Ok(Classified::Activity(activity))
}

pub fn classify_sub_process(
    node: &Element,
    ctx: &ClassifyContext<'_>,
) -> Result<Classified, ParseError> {
    let props = properties(node, ctx)?;
    if props.non_empty(PROCESS_ID).is_none() {
        return Err(ParseError::MissingProcessId {
            activity_id: node.id().to_string(),
        });
    }
    let mut activity = seed(node, ActivityKind::SubProcess, &props);
    activity.activity_type = ActivityType::Subprocess;
    Ok(Classified::Activity(activity))
}

/// A missing block and an empty block both mean "no customization" for activities.
fn properties(node: &Element, ctx: &ClassifyContext<'_>) -> Result<ExtensionProperties, ParseError> {
    Ok(read_extension(node, ctx.config)?.unwrap_or_default())
}

/// Builds the default record for `kind` and overlays the known extension properties.
fn seed(node: &Element, kind: ActivityKind, props: &ExtensionProperties) -> Activity {
    let mut activity = Activity::new(node.id(), node.name(), kind);
    if let Some(application) = props.get(APPLICATION) {
        activity.application = application.to_string();
    }
    if let Some(model_id) = props.get(SUB_PROCESS_MODEL_ID) {
        activity.sub_process_model_id = model_id.to_string();
    }
    if let Some(process_id) = props.get(PROCESS_ID) {
        activity.sub_process_definition_id = process_id.to_string();
    }
    activity.data_mappings = props.data_mappings.clone();
    activity
}

fn resolve_behavior(
    node: &Element,
    props: &ExtensionProperties,
    default: TaskBehavior,
) -> Result<TaskBehavior, ParseError> {
    match props.get(BEHAVIOR) {
        None => Ok(default),
        Some(raw) => TaskBehavior::parse_code(raw).ok_or_else(|| ParseError::InvalidTaskBehavior {
            task_id: node.id().to_string(),
            value: raw.to_string(),
        }),
    }
}

fn has_loop_characteristics(node: &Element) -> bool {
    node.children
        .iter()
        .any(|c| c.tag.ends_with("LoopCharacteristics"))
}
