use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::extension::read_extension;
use crate::model::Participant;
use crate::xml::Element;

const CONDITIONAL_PERFORMER: &str = "conditionalPerformer";

/// Turns a lane into a participant. Lanes without an extension block are not
/// participants and yield `Ok(None)`.
pub fn classify_lane(lane: &Element, config: &ParserConfig) -> Result<Option<Participant>, ParseError> {
    let Some(props) = read_extension(lane, config)? else {
        return Ok(None);
    };

    let conditional_performer = props
        .get(CONDITIONAL_PERFORMER)
        .map(|v| v.trim().eq_ignore_ascii_case("true"));

    Ok(Some(Participant {
        id: lane.id().to_string(),
        name: lane.name().to_string(),
        tasks: lane.child_texts("flowNodeRef"),
        conditional_performer,
        properties: props.values.into_iter().collect(),
    }))
}
