//! Node classifiers: one pure function per BPMN element kind.
//!
//! Each classifier turns a raw tree node into a typed record. They are registered by tag
//! in a registry owned by the parser, so callers can alias their own tag names to a
//! built-in classifier or plug in their own.

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::model::{Activity, DefaultTransition, Gateway, Participant, Transition};
use crate::xml::Element;
use ahash::AHashMap;

mod activity;
mod gateway;
mod participant;
mod transition;

pub use participant::classify_lane;

/// What a classifier may look at besides the node itself.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyContext<'a> {
    /// Participants of the owning process, needed to resolve user-task assignees.
    pub participants: &'a [Participant],
    pub config: &'a ParserConfig,
}

/// The closed set of records a flow element can classify into.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Activity(Activity),
    Gateway {
        gateway: Gateway,
        /// Stub whose `activity` is resolved once every transition is known.
        default: Option<DefaultTransition>,
    },
    Transition(Transition),
}

/// Defines the contract for classifying one kind of flow element.
pub trait NodeClassifier: Send + Sync {
    fn node_type(&self) -> &str;
    fn classify(&self, node: &Element, ctx: &ClassifyContext<'_>)
    -> Result<Classified, ParseError>;
}

/// Master macro to define the built-in classifiers, their registration, and their creation.
macro_rules! define_classifiers {
    ( $( ($struct_name:ident, $node_type:literal, $classify:path) ),* $(,)? ) => {
        // 1. A unit struct per classifier, delegating to its pure function
        $(
            struct $struct_name;
            impl NodeClassifier for $struct_name {
                fn node_type(&self) -> &str { $node_type }
                fn classify(&self, node: &Element, ctx: &ClassifyContext<'_>) -> Result<Classified, ParseError> {
                    $classify(node, ctx)
                }
            }
        )*

        // 2. Register every built-in classifier under its BPMN tag
        pub(crate) fn register_default_classifiers(registry: &mut AHashMap<String, Box<dyn NodeClassifier>>) {
            $( registry.insert($node_type.to_string(), Box::new($struct_name)); )*
        }

        // 3. Create a built-in classifier by its BPMN tag
        pub(crate) fn create_classifier_by_name(name: &str) -> Option<Box<dyn NodeClassifier>> {
            match name {
                $( $node_type => Some(Box::new($struct_name)), )*
                _ => None,
            }
        }
    };
}

define_classifiers! {
    (TaskClassifier, "task", activity::classify_task),
    (UserTaskClassifier, "userTask", activity::classify_user_task),
    (SendTaskClassifier, "sendTask", activity::classify_send_task),
    (ServiceTaskClassifier, "serviceTask", activity::classify_service_task),
    (SubProcessClassifier, "subProcess", activity::classify_sub_process),
    (ExclusiveGatewayClassifier, "exclusiveGateway", gateway::classify_exclusive_gateway),
    (ParallelGatewayClassifier, "parallelGateway", gateway::classify_parallel_gateway),
    (SequenceFlowClassifier, "sequenceFlow", transition::classify_sequence_flow),
}

/// Gateway kinds the model cannot represent. Meeting one is a structural error.
pub(crate) const UNSUPPORTED_GATEWAYS: &[&str] =
    &["inclusiveGateway", "eventBasedGateway", "complexGateway"];

pub use activity::{
    classify_send_task, classify_service_task, classify_sub_process, classify_task,
    classify_user_task,
};
pub use gateway::{classify_exclusive_gateway, classify_parallel_gateway};
pub use transition::classify_sequence_flow;
