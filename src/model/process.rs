use super::enums::{ActivityType, DataType, Direction, GatewayType, Operator, TaskBehavior, TaskType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Binds an activity's input or output slot to a data-store field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataMapping {
    pub id: String,
    pub direction: Direction,
    pub data_path: String,
    /// Empty when the mapping targets the process instance's own storage.
    pub data_storage_id: String,
}

/// Which classifier produced an activity, and therefore which collection it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    Task,
    UserTask,
    SendTask,
    ServiceTask,
    SubProcess,
}

/// Every activity kind shares this shape; fields irrelevant to a kind keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub kind: ActivityKind,
    pub assignee: String,
    pub activity_type: ActivityType,
    pub task_type: TaskType,
    pub behavior: TaskBehavior,
    pub multi_instance: bool,
    pub application: String,
    pub sub_process_model_id: String,
    pub sub_process_definition_id: String,
    pub data_mappings: Option<Vec<DataMapping>>,
}

impl Activity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ActivityKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            assignee: String::new(),
            activity_type: ActivityType::Task,
            task_type: TaskType::None,
            behavior: TaskBehavior::Send,
            multi_instance: false,
            application: String::new(),
            sub_process_model_id: String::new(),
            sub_process_definition_id: String::new(),
            data_mappings: None,
        }
    }
}

/// A gateway's fallback edge: taken when no condition on the other outgoing edges holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultTransition {
    pub gateway: String,
    pub transition: String,
    /// Target activity of `transition`; empty until the assembler resolves it.
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gateway {
    pub id: String,
    pub gateway_type: GatewayType,
    pub incoming: Vec<String>,
    pub outgoing: Vec<String>,
    /// The declared default transition id, XOR gateways only.
    pub default: Option<String>,
}

/// The right-hand side of a condition, before and after coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionValue {
    Raw(String),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Text(String),
}

impl ConditionValue {
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            ConditionValue::Raw(raw) => Some(raw),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub lh_data_storage_id: String,
    pub lh_data_path: String,
    /// The operator exactly as declared in the document.
    pub operator: String,
    /// The normalized comparator, set once the condition has been validated.
    pub comparator: Option<Operator>,
    pub rh_value: ConditionValue,
    pub rh_data_storage_id: Option<String>,
    pub rh_data_path: Option<String>,
    /// Storage type of the left-hand field, set once the condition has been validated.
    pub data_type: Option<DataType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub id: String,
    pub source: String,
    pub target: String,
    pub condition: Option<Condition>,
}

/// The actor responsible for the tasks of one lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub tasks: Vec<String>,
    pub conditional_performer: Option<bool>,
    /// Every extension property of the lane, verbatim.
    pub properties: BTreeMap<String, String>,
}

impl Participant {
    pub fn performs(&self, task_id: &str) -> bool {
        self.tasks.iter().any(|t| t == task_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub id: String,
    pub name: String,
    pub interface: String,
    pub participants: Vec<Participant>,
    pub tasks: Vec<Activity>,
    pub user_tasks: Vec<Activity>,
    pub send_tasks: Vec<Activity>,
    pub service_tasks: Vec<Activity>,
    pub sub_processes: Vec<Activity>,
    pub xor_gateways: Vec<Gateway>,
    pub and_gateways: Vec<Gateway>,
    pub transitions: Vec<Transition>,
    /// Activity id -> display name. Later writers win on colliding ids.
    pub activity_map: BTreeMap<String, String>,
    pub default_transitions: Vec<DefaultTransition>,
}

impl Process {
    pub fn new(id: impl Into<String>, name: impl Into<String>, interface: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            interface: interface.into(),
            participants: Vec::new(),
            tasks: Vec::new(),
            user_tasks: Vec::new(),
            send_tasks: Vec::new(),
            service_tasks: Vec::new(),
            sub_processes: Vec::new(),
            xor_gateways: Vec::new(),
            and_gateways: Vec::new(),
            transitions: Vec::new(),
            activity_map: BTreeMap::new(),
            default_transitions: Vec::new(),
        }
    }

    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.tasks
            .iter()
            .chain(&self.user_tasks)
            .chain(&self.send_tasks)
            .chain(&self.service_tasks)
            .chain(&self.sub_processes)
    }

    pub fn activity_count(&self) -> usize {
        self.tasks.len()
            + self.user_tasks.len()
            + self.send_tasks.len()
            + self.service_tasks.len()
            + self.sub_processes.len()
    }

    pub fn gateway_count(&self) -> usize {
        self.xor_gateways.len() + self.and_gateways.len()
    }

    pub fn transition(&self, id: &str) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.id == id)
    }

    pub(crate) fn collection_mut(&mut self, kind: ActivityKind) -> &mut Vec<Activity> {
        match kind {
            ActivityKind::Task => &mut self.tasks,
            ActivityKind::UserTask => &mut self.user_tasks,
            ActivityKind::SendTask => &mut self.send_tasks,
            ActivityKind::ServiceTask => &mut self.service_tasks,
            ActivityKind::SubProcess => &mut self.sub_processes,
        }
    }
}
