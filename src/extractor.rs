use crate::assembler::FlowGraphAssembler;
use crate::classifier::{NodeClassifier, classify_lane};
use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::extension::read_extension;
use crate::model::{DataStoreField, Model, ParameterType, Participant, Process, Version};
use crate::xml::Element;
use ahash::AHashMap;
use tracing::debug;

const DATA_STORE: &str = "dataStore";
const COLLABORATION: &str = "collaboration";
const PROCESS: &str = "process";
const LANE_SET: &str = "laneSet";
const LANE: &str = "lane";
const VERSION: &str = "version";
const PRIVATE: &str = "private";

/// Reads the collaboration-level model: metadata plus the fields of both reserved data stores.
pub(crate) fn extract_model(root: &Element, config: &ParserConfig) -> Result<Model, ParseError> {
    let instance_fields = data_store_fields(root, &config.process_instance_store, config)?;
    let agreement_fields = data_store_fields(root, &config.agreement_store, config)?;

    let has_agreement_field = instance_fields.iter().any(|f| {
        f.data_path == config.agreement_field && f.parameter_type == ParameterType::ContractAddress
    });
    if !has_agreement_field {
        return Err(ParseError::InvalidAgreementField {
            data_storage_id: config.process_instance_store.clone(),
            field: config.agreement_field.clone(),
        });
    }

    let collaboration = root
        .descendants_named(COLLABORATION)
        .into_iter()
        .next()
        .ok_or(ParseError::NoModelDetails)?;
    let props = read_extension(collaboration, config)?.ok_or(ParseError::NoModelDetails)?;

    let raw_version = props.get(VERSION).unwrap_or_default();
    let version =
        Version::parse(raw_version).ok_or_else(|| ParseError::InvalidVersion(raw_version.to_string()))?;
    let private = props
        .get(PRIVATE)
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));

    let model = Model {
        id: collaboration.id().to_string(),
        name: collaboration.name().to_string(),
        version,
        private,
        data_store_fields: instance_fields.into_iter().chain(agreement_fields).collect(),
    };
    debug!(model = %model.id, version = %model.version, fields = model.data_store_fields.len(), "extracted model");
    Ok(model)
}

/// Fields of the data store with the given id, sorted by data path.
fn data_store_fields(
    root: &Element,
    store_id: &str,
    config: &ParserConfig,
) -> Result<Vec<DataStoreField>, ParseError> {
    let store = root
        .find_by_id(DATA_STORE, store_id)
        .ok_or_else(|| ParseError::MissingDataStore(store_id.to_string()))?;
    let Some(props) = read_extension(store, config)? else {
        return Ok(Vec::new());
    };

    // Sorted by path before the fallible pass.
    let mut entries: Vec<(&String, &String)> = props.values.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    entries
        .into_iter()
        .map(|(data_path, raw_type)| {
            ParameterType::parse_code(raw_type)
                .map(|parameter_type| DataStoreField {
                    data_storage_id: store_id.to_string(),
                    data_path: data_path.clone(),
                    parameter_type,
                })
                .ok_or_else(|| ParseError::InvalidParameterType {
                    data_storage_id: store_id.to_string(),
                    data_path: data_path.clone(),
                    value: raw_type.clone(),
                })
        })
        .collect()
}

/// Extracts every process of the document, participants first, then the flow graph.
pub(crate) fn extract_processes(
    root: &Element,
    registry: &AHashMap<String, Box<dyn NodeClassifier>>,
    config: &ParserConfig,
) -> Result<Vec<Process>, ParseError> {
    let process_nodes: Vec<&Element> = root.children_named(PROCESS).collect();
    if process_nodes.is_empty() {
        return Err(ParseError::NoProcesses);
    }

    let assembler = FlowGraphAssembler::new(registry, config);
    process_nodes
        .into_iter()
        .map(|node| {
            let interface = read_extension(node, config)?
                .and_then(|props| props.get(&config.interface_property).map(str::to_string))
                .unwrap_or_default();

            let mut process = Process::new(node.id(), node.name(), interface);
            process.participants = extract_participants(node, config)?;
            debug!(process = %process.id, participants = process.participants.len(), "extracting process");
            assembler.assemble(node, process)
        })
        .collect()
}

/// Participants from every lane set of the process. Lanes without an extension block are skipped.
fn extract_participants(
    process_node: &Element,
    config: &ParserConfig,
) -> Result<Vec<Participant>, ParseError> {
    let mut participants = Vec::new();
    for lane_set in process_node.children_named(LANE_SET) {
        for lane in lane_set.descendants_named(LANE) {
            if let Some(participant) = classify_lane(lane, config)? {
                participants.push(participant);
            }
        }
    }
    Ok(participants)
}
