//! # Zumen - BPMN Process-Model Compiler
//!
//! **Zumen** compiles BPMN 2.0 process diagrams into validated, strongly-typed process
//! models that a downstream execution engine can drive directly. It reads the
//! collaboration metadata and data-store declarations of a document, classifies every
//! flow element of every process, resolves cross references, and checks each
//! transition condition against the declared data-store fields.
//!
//! ## Core Workflow
//!
//! 1.  **Read the Document**: [`xml::parse_xml`] turns BPMN XML into a read-only
//!     [`xml::ElementTree`]. Any other XML reader can be used instead, as long as it
//!     produces the same tree.
//! 2.  **Extract**: the collaboration becomes a [`model::Model`], each lane carrying
//!     extension properties becomes a [`model::Participant`].
//! 3.  **Assemble**: each flow element is dispatched to the classifier registered for
//!     its tag, producing activities, gateways and transitions in document order.
//! 4.  **Validate**: every transition condition is checked against the data-store fields
//!     and the gateway topology. All violations of a process are reported together.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zumen::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let xml = std::fs::read_to_string("path/to/agreement.bpmn")?;
//!
//!     let mut parser = ModelParser::builder()
//!         .with_tag_mapping("approvalTask", "userTask")
//!         .build();
//!
//!     match parser.parse(&xml) {
//!         Ok(()) => {
//!             let model = parser.model().expect("model is set after a successful parse");
//!             println!("Model '{}' v{}", model.name, model.version);
//!             for process in parser.processes() {
//!                 println!("  {} user task(s) in '{}'", process.user_tasks.len(), process.id);
//!             }
//!         }
//!         Err(err) => {
//!             eprintln!("[{}] {}", err.status_code(), err);
//!             for violation in err.violations() {
//!                 eprintln!("  - {}", violation);
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod extension;
pub mod model;
pub mod parser;
pub mod prelude;
pub mod validator;
pub mod xml;

mod assembler;
mod extractor;
