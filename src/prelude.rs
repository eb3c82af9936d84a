//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the zumen crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use zumen::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let xml = std::fs::read_to_string("path/to/process.bpmn")?;
//!
//! let mut parser = ModelParser::new();
//! parser.parse(&xml)?;
//!
//! let document = parser.document().expect("parsed");
//! document.save("path/to/process.bin")?;
//! println!("{}", document.summary());
//! # Ok(())
//! # }
//! ```

// Façade and configuration
pub use crate::config::ParserConfig;
pub use crate::parser::{ModelParser, ModelParserBuilder};

// Model types
pub use crate::model::{
    Activity, ActivityKind, ActivityType, Condition, ConditionValue, DataMapping, DataStoreField,
    DataType, DefaultTransition, Direction, Gateway, GatewayType, Model, Operator, ParameterType,
    ParsedDocument, Participant, Process, TaskBehavior, TaskType, Transition, Version,
};

// Tree input
pub use crate::xml::{Element, ElementTree, parse_xml};

// Error types
pub use crate::error::{ParseError, ValidationError, Violation, XmlError, ZumenError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
