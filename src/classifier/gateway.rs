use super::{Classified, ClassifyContext};
use crate::error::ParseError;
use crate::model::{DefaultTransition, Gateway, GatewayType};
use crate::xml::Element;

pub fn classify_exclusive_gateway(
    node: &Element,
    _ctx: &ClassifyContext<'_>,
) -> Result<Classified, ParseError> {
    classify_gateway(node, GatewayType::Xor)
}

pub fn classify_parallel_gateway(
    node: &Element,
    _ctx: &ClassifyContext<'_>,
) -> Result<Classified, ParseError> {
    classify_gateway(node, GatewayType::And)
}

/// Checks the topology of a gateway. Only XOR gateways keep a declared default edge.
pub fn classify_gateway(node: &Element, gateway_type: GatewayType) -> Result<Classified, ParseError> {
    let id = node.id().to_string();
    let incoming = node.child_texts("incoming");
    let outgoing = node.child_texts("outgoing");

    if incoming.is_empty() || outgoing.is_empty() {
        return Err(ParseError::GatewayMissingEdges { gateway_id: id });
    }
    if incoming.len() == 1 && outgoing.len() == 1 {
        return Err(ParseError::DegenerateGateway { gateway_id: id });
    }

    let default = match gateway_type {
        GatewayType::Xor => node.attr("default").filter(|d| !d.is_empty()),
        GatewayType::Or | GatewayType::And => None,
    };

    let stub = default.map(|transition| DefaultTransition {
        gateway: id.clone(),
        transition: transition.to_string(),
        activity: String::new(),
    });

    Ok(Classified::Gateway {
        gateway: Gateway {
            id,
            gateway_type,
            incoming,
            outgoing,
            default: default.map(str::to_string),
        },
        default: stub,
    })
}
