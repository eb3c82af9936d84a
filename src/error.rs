use itertools::Itertools;
use std::fmt;
use thiserror::Error;

/// Errors raised while turning raw XML text into an `ElementTree`.
#[derive(Error, Debug, Clone)]
pub enum XmlError {
    #[error("Malformed XML at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("Invalid attribute on element '{element}': {message}")]
    Attribute { element: String, message: String },

    #[error("Closing tag '{found}' does not match open element '{expected}'")]
    MismatchedTag { expected: String, found: String },

    #[error("Element '{0}' was never closed")]
    Unclosed(String),

    #[error("Document contains no root element")]
    EmptyDocument,
}

/// Structural errors. Any of these aborts the parse immediately.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Malformed extension properties on node '{node_id}': {reason}")]
    MalformedExtension { node_id: String, reason: String },

    #[error("Task '{task_id}' declares invalid behavior '{value}'")]
    InvalidTaskBehavior { task_id: String, value: String },

    #[error("No assignee found for user task '{task_id}': no participant lists it")]
    NoAssigneeFound { task_id: String },

    #[error("Service task '{task_id}' does not declare an application")]
    MissingApplication { task_id: String },

    #[error("Sub-process '{activity_id}' does not declare a processId")]
    MissingProcessId { activity_id: String },

    #[error("Gateway '{gateway_id}' must have at least one incoming and one outgoing transition")]
    GatewayMissingEdges { gateway_id: String },

    #[error("Gateway '{gateway_id}' has exactly one incoming and one outgoing transition; a gateway must fork or join")]
    DegenerateGateway { gateway_id: String },

    #[error("Condition on transition '{transition_id}' is incomplete, missing: {}", .missing.join(", "))]
    IncompleteCondition {
        transition_id: String,
        missing: Vec<String>,
    },

    #[error("Default transition '{transition_id}' of gateway '{gateway_id}' does not exist")]
    DanglingDefaultTransition {
        gateway_id: String,
        transition_id: String,
    },

    #[error("Required data store '{0}' is not declared")]
    MissingDataStore(String),

    #[error("Data store '{data_storage_id}' must declare field '{field}' of type CONTRACT_ADDRESS")]
    InvalidAgreementField {
        data_storage_id: String,
        field: String,
    },

    #[error("Field '{data_path}' of data store '{data_storage_id}' has invalid parameter type '{value}'")]
    InvalidParameterType {
        data_storage_id: String,
        data_path: String,
        value: String,
    },

    #[error("No model details found: the collaboration is missing or has no extension properties")]
    NoModelDetails,

    #[error("Invalid model version '{0}': expected numeric 'major.minor.patch'")]
    InvalidVersion(String),

    #[error("Element '{element}' is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    #[error("Expected a 'definitions' root element, found '{0}'")]
    UnexpectedRoot(String),

    #[error("Element '{id}' of kind '{tag}' is not supported")]
    UnsupportedElement { id: String, tag: String },

    #[error("Document declares no process")]
    NoProcesses,
}

/// A single semantic problem found on a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub transition_id: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transition '{}': {}", self.transition_id, self.message)
    }
}

/// Semantic errors, gathered across a whole process before being reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Process '{process_id}' failed validation: {}", .violations.iter().join("; "))]
    Process {
        process_id: String,
        violations: Vec<Violation>,
    },
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationError::Process { violations, .. } => violations,
        }
    }
}

/// Errors raised while saving or loading a compiled document artifact.
#[derive(Error, Debug, Clone)]
pub enum ArtifactError {
    #[error("Artifact I/O failed for '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Artifact encoding failed: {0}")]
    Encode(String),

    #[error("Artifact decoding failed: {0}")]
    Decode(String),
}

/// Errors raised while loading a `ParserConfig`.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Could not read configuration file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level error returned by the parser façade.
#[derive(Error, Debug, Clone)]
pub enum ZumenError {
    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ZumenError {
    /// HTTP-style hint: 400 when the document is at fault, 500 otherwise.
    pub fn status_code(&self) -> u16 {
        match self {
            ZumenError::Xml(_) | ZumenError::Parse(_) | ZumenError::Validation(_) => 400,
            ZumenError::Artifact(_) | ZumenError::Config(_) => 500,
        }
    }

    /// Every violation carried by a validation failure, empty for other kinds.
    pub fn violations(&self) -> &[Violation] {
        match self {
            ZumenError::Validation(err) => err.violations(),
            _ => &[],
        }
    }
}
