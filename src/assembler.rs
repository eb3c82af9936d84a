use crate::classifier::{Classified, ClassifyContext, NodeClassifier, UNSUPPORTED_GATEWAYS};
use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::model::{DefaultTransition, GatewayType, Process};
use crate::xml::Element;
use ahash::AHashMap;
use tracing::{debug, trace, warn};

/// Builds the flow graph of one process from its flat list of flow elements.
pub(crate) struct FlowGraphAssembler<'a> {
    registry: &'a AHashMap<String, Box<dyn NodeClassifier>>,
    config: &'a ParserConfig,
}

impl<'a> FlowGraphAssembler<'a> {
    pub(crate) fn new(
        registry: &'a AHashMap<String, Box<dyn NodeClassifier>>,
        config: &'a ParserConfig,
    ) -> Self {
        Self { registry, config }
    }

    /// Classifies every child of `process_node` exactly once, in document order, then
    /// resolves the target activity of each default transition.
    ///
    /// `process` must already carry its participants.
    pub(crate) fn assemble(
        &self,
        process_node: &Element,
        mut process: Process,
    ) -> Result<Process, ParseError> {
        let mut pending_defaults: Vec<DefaultTransition> = Vec::new();

        for node in &process_node.children {
            let Some(classifier) = self.registry.get(&node.tag) else {
                if UNSUPPORTED_GATEWAYS.contains(&node.tag.as_str()) {
                    return Err(ParseError::UnsupportedElement {
                        id: node.id().to_string(),
                        tag: node.tag.clone(),
                    });
                }
                trace!(tag = %node.tag, id = node.id(), "skipping element without classifier");
                continue;
            };

            let ctx = ClassifyContext {
                participants: &process.participants,
                config: self.config,
            };
            match classifier.classify(node, &ctx)? {
                Classified::Activity(activity) => {
                    let previous = process
                        .activity_map
                        .insert(activity.id.clone(), activity.name.clone());
                    if previous.is_some() {
                        warn!(process = %process.id, id = %activity.id, "duplicate activity id, keeping the later name");
                    }
                    process.collection_mut(activity.kind).push(activity);
                }
                Classified::Gateway { gateway, default } => {
                    pending_defaults.extend(default);
                    match gateway.gateway_type {
                        GatewayType::Xor => process.xor_gateways.push(gateway),
                        GatewayType::And => process.and_gateways.push(gateway),
                        GatewayType::Or => {
                            return Err(ParseError::UnsupportedElement {
                                id: gateway.id,
                                tag: node.tag.clone(),
                            });
                        }
                    }
                }
                Classified::Transition(transition) => process.transitions.push(transition),
            }
        }

        // Transitions may follow their gateway in the document, so defaults resolve last.
        for mut stub in pending_defaults {
            let transition = process.transition(&stub.transition).ok_or_else(|| {
                ParseError::DanglingDefaultTransition {
                    gateway_id: stub.gateway.clone(),
                    transition_id: stub.transition.clone(),
                }
            })?;
            stub.activity = transition.target.clone();
            process.default_transitions.push(stub);
        }

        debug!(
            process = %process.id,
            activities = process.activity_count(),
            gateways = process.gateway_count(),
            transitions = process.transitions.len(),
            "assembled flow graph"
        );
        Ok(process)
    }
}
