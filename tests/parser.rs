mod common;
use common::*;
use zumen::classifier::{Classified, ClassifyContext, NodeClassifier};
use zumen::prelude::*;

fn parse(xml: &str) -> ModelParser {
    let mut parser = ModelParser::new();
    parser.parse(xml).unwrap();
    parser
}

fn parse_err(xml: &str) -> ZumenError {
    ModelParser::new().parse(xml).unwrap_err()
}

// --- Model extraction ---

#[test]
fn test_model_metadata_and_fields() {
    let parser = parse(&document(&linear_process()));
    let model = parser.model().unwrap();

    assert_eq!(model.id, "Collab_1");
    assert_eq!(model.name, "Sale Agreement");
    assert_eq!(model.version, Version([1, 2, 3]));
    assert!(model.private);

    let paths: Vec<&str> = model
        .data_store_fields
        .iter()
        .map(|f| f.data_path.as_str())
        .collect();
    assert_eq!(
        paths,
        vec!["agreement", "amount", "approved", "buyer", "quantity", "effectiveDate"]
    );
    let agreement = model.field("agreement").unwrap();
    assert_eq!(agreement.data_storage_id, "PROCESS_INSTANCE");
    assert_eq!(agreement.parameter_type, ParameterType::ContractAddress);
    assert_eq!(
        model.field("effectiveDate").unwrap().data_storage_id,
        "agreement"
    );
}

#[test]
fn test_missing_data_store() {
    let stores = format!(
        r#"<bpmn:dataStore id="PROCESS_INSTANCE">{}</bpmn:dataStore>"#,
        properties(&[("agreement", "7")])
    );
    let err = parse_err(&document_with(&stores, &collaboration("1.0.0"), &linear_process()));
    assert!(matches!(
        err,
        ZumenError::Parse(ParseError::MissingDataStore(ref id)) if id == "agreement"
    ));
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_agreement_field_must_be_contract_address() {
    let stores = format!(
        r#"<bpmn:dataStore id="PROCESS_INSTANCE">{}</bpmn:dataStore>
           <bpmn:dataStore id="agreement">{}</bpmn:dataStore>"#,
        properties(&[("agreement", "1")]),
        properties(&[("effectiveDate", "3")])
    );
    let err = parse_err(&document_with(&stores, &collaboration("1.0.0"), &linear_process()));
    assert!(matches!(
        err,
        ZumenError::Parse(ParseError::InvalidAgreementField { .. })
    ));
}

#[test]
fn test_invalid_parameter_type() {
    let stores = format!(
        r#"<bpmn:dataStore id="PROCESS_INSTANCE">{}</bpmn:dataStore>
           <bpmn:dataStore id="agreement">{}</bpmn:dataStore>"#,
        properties(&[("agreement", "7"), ("amount", "99")]),
        properties(&[])
    );
    let err = parse_err(&document_with(&stores, &collaboration("1.0.0"), &linear_process()));
    assert!(matches!(
        err,
        ZumenError::Parse(ParseError::InvalidParameterType { ref data_path, .. }) if data_path == "amount"
    ));
}

#[test]
fn test_invalid_parameter_type_names_first_path() {
    let stores = format!(
        r#"<bpmn:dataStore id="PROCESS_INSTANCE">{}</bpmn:dataStore>
           <bpmn:dataStore id="agreement">{}</bpmn:dataStore>"#,
        properties(&[("zeta", "40"), ("agreement", "7"), ("beta", "x"), ("mu", "13")]),
        properties(&[])
    );
    let xml = document_with(&stores, &collaboration("1.0.0"), &linear_process());
    for _ in 0..5 {
        assert!(matches!(
            parse_err(&xml),
            ZumenError::Parse(ParseError::InvalidParameterType { ref data_path, .. }) if data_path == "beta"
        ));
    }
}

#[test]
fn test_missing_collaboration() {
    let err = parse_err(&document_with(&data_stores(), "", &linear_process()));
    assert!(matches!(err, ZumenError::Parse(ParseError::NoModelDetails)));

    let bare = r#"<bpmn:collaboration id="Collab_1" name="Bare" />"#;
    let err = parse_err(&document_with(&data_stores(), bare, &linear_process()));
    assert!(matches!(err, ZumenError::Parse(ParseError::NoModelDetails)));
}

#[test]
fn test_invalid_version() {
    let err = parse_err(&document_with(&data_stores(), &collaboration("1.0"), &linear_process()));
    assert!(matches!(
        err,
        ZumenError::Parse(ParseError::InvalidVersion(ref v)) if v == "1.0"
    ));
}

#[test]
fn test_document_without_processes() {
    let err = parse_err(&document(""));
    assert!(matches!(err, ZumenError::Parse(ParseError::NoProcesses)));
}

#[test]
fn test_unexpected_root() {
    let err = parse_err("<process id=\"P\" />");
    assert!(matches!(
        err,
        ZumenError::Parse(ParseError::UnexpectedRoot(ref tag)) if tag == "process"
    ));
}

#[test]
fn test_malformed_xml() {
    let err = parse_err("<definitions><process></definitions>");
    assert!(matches!(err, ZumenError::Xml(_)));
    assert_eq!(err.status_code(), 400);
}

// --- Process assembly ---

#[test]
fn test_linear_process() {
    let parser = parse(&document(&linear_process()));
    let processes = parser.processes();
    assert_eq!(processes.len(), 1);

    let process = &processes[0];
    assert_eq!(process.id, "Process_1");
    assert_eq!(process.interface, "Agreement Formation");
    assert_eq!(process.participants.len(), 1);
    assert_eq!(process.user_tasks.len(), 1);
    assert_eq!(process.service_tasks.len(), 1);
    assert!(process.xor_gateways.is_empty());
    assert!(process.and_gateways.is_empty());
    assert_eq!(process.transitions.len(), 1);
    assert!(process.default_transitions.is_empty());

    let user_task = &process.user_tasks[0];
    assert_eq!(user_task.assignee, "Lane_Buyer");
    let mappings = user_task.data_mappings.as_ref().unwrap();
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].data_path, "buyer");
    assert_eq!(mappings[0].data_storage_id, "");

    assert_eq!(process.service_tasks[0].application, "EmailNotifier");
    assert_eq!(process.activity_map.get("Task_S").map(String::as_str), Some("Notify"));
    assert_eq!(process.activity_map.len(), 2);
}

#[test]
fn test_xor_process_with_valid_condition() {
    let parser = parse(&document(&xor_process("amount", "2", "100")));
    let process = &parser.processes()[0];

    assert_eq!(process.user_tasks.len(), 2);
    assert_eq!(process.user_tasks[0].assignee, "Lane_Buyer");
    assert_eq!(process.user_tasks[1].assignee, "Lane_Seller");
    assert_eq!(process.xor_gateways.len(), 1);
    assert_eq!(process.transitions.len(), 3);

    // Document order is kept: the conditional flow comes first.
    let conditional = &process.transitions[0];
    assert_eq!(conditional.id, "Flow_cond");
    let condition = conditional.condition.as_ref().unwrap();
    assert_eq!(condition.comparator, Some(Operator::Gt));
    assert_eq!(condition.data_type, Some(DataType::Int256));
    assert_eq!(condition.rh_value, ConditionValue::Int(100));
    assert_eq!(condition.lh_data_storage_id, "");

    assert_eq!(
        process.default_transitions,
        vec![DefaultTransition {
            gateway: "Gateway_1".to_string(),
            transition: "Flow_default".to_string(),
            activity: "End_1".to_string(),
        }]
    );
}

#[test]
fn test_condition_values_follow_field_types() {
    let parser = parse(&document(&xor_process("approved", "0", "TRUE")));
    assert_eq!(parser.processes()[0].xor_gateways.len(), 1);
    let condition = parser.processes()[0].transitions[0].condition.clone().unwrap();
    assert_eq!(condition.data_type, Some(DataType::Bool));
    assert_eq!(condition.rh_value, ConditionValue::Bool(true));

    let parser = parse(&document(&xor_process("buyer", "5", "0xB0B")));
    let condition = parser.processes()[0].transitions[0].condition.clone().unwrap();
    assert_eq!(condition.data_type, Some(DataType::Address));
    assert_eq!(condition.rh_value, ConditionValue::Text("0xB0B".to_string()));
}

#[test]
fn test_parallel_gateway_process() {
    let body = format!(
        r#"<bpmn:userTask id="Task_A">{}</bpmn:userTask>
           <bpmn:parallelGateway id="Fork">{}</bpmn:parallelGateway>
           <bpmn:userTask id="Task_B" />
           <bpmn:userTask id="Task_C" />
           {}{}{}"#,
        edges(&[], &["F1"]),
        edges(&["F1"], &["F2", "F3"]),
        flow("F1", "Task_A", "Fork"),
        flow("F2", "Fork", "Task_B"),
        flow("F3", "Fork", "Task_C"),
    );
    let xml = document(&process(
        "Process_P",
        &lane("Lane_All", &["Task_A", "Task_B", "Task_C"]),
        &body,
    ));
    let parser = parse(&xml);
    let process = &parser.processes()[0];
    assert_eq!(process.and_gateways.len(), 1);
    assert_eq!(process.and_gateways[0].gateway_type, GatewayType::And);
    assert_eq!(process.gateway_count(), 1);
    assert_eq!(process.activity_count(), 3);
}

#[test]
fn test_unsupported_gateway_kind() {
    let body = format!(
        r#"<bpmn:inclusiveGateway id="Incl">{}</bpmn:inclusiveGateway>"#,
        edges(&["F1"], &["F2", "F3"])
    );
    let err = parse_err(&document(&process("Process_1", &lane("L", &[]), &body)));
    assert!(matches!(
        err,
        ZumenError::Parse(ParseError::UnsupportedElement { ref tag, .. }) if tag == "inclusiveGateway"
    ));
}

#[test]
fn test_dangling_default_transition() {
    let body = format!(
        r#"<bpmn:exclusiveGateway id="G1" default="Flow_missing">{}</bpmn:exclusiveGateway>"#,
        edges(&["F1"], &["F2", "F3"])
    );
    let err = parse_err(&document(&process("Process_1", &lane("L", &[]), &body)));
    assert_eq!(
        err.to_string(),
        ParseError::DanglingDefaultTransition {
            gateway_id: "G1".to_string(),
            transition_id: "Flow_missing".to_string(),
        }
        .to_string()
    );
}

#[test]
fn test_user_task_outside_every_lane() {
    let body = r#"<bpmn:userTask id="Task_Orphan" />"#;
    let err = parse_err(&document(&process("Process_1", &lane("L", &["Task_A"]), body)));
    assert!(matches!(
        err,
        ZumenError::Parse(ParseError::NoAssigneeFound { ref task_id }) if task_id == "Task_Orphan"
    ));
}

#[test]
fn test_missing_assignee_stops_before_later_elements() {
    // The degenerate gateway after the task would fail too if it were reached.
    let body = format!(
        r#"<bpmn:userTask id="Task_Orphan" />
           <bpmn:exclusiveGateway id="G1">{}</bpmn:exclusiveGateway>"#,
        edges(&["F1"], &["F2"])
    );
    let err = parse_err(&document(&process("Process_1", &lane("L", &[]), &body)));
    assert!(matches!(
        err,
        ZumenError::Parse(ParseError::NoAssigneeFound { .. })
    ));
}

#[test]
fn test_sub_process_without_process_id_exposes_nothing() {
    let body = r#"<bpmn:subProcess id="Sub_1" name="Nested" />"#;
    let mut parser = ModelParser::new();
    let err = parser
        .parse(&document(&process("Process_1", &lane("L", &[]), body)))
        .unwrap_err();
    assert!(matches!(
        err,
        ZumenError::Parse(ParseError::MissingProcessId { ref activity_id }) if activity_id == "Sub_1"
    ));
    assert!(parser.model().is_none());
    assert!(parser.processes().is_empty());
}

#[test]
fn test_duplicate_activity_ids_keep_later_name() {
    let body = r#"<bpmn:task id="T1" name="First" /><bpmn:sendTask id="T1" name="Second" />"#;
    let parser = parse(&document(&process("Process_1", &lane("L", &[]), body)));
    let process = &parser.processes()[0];
    assert_eq!(process.activity_map.len(), 1);
    assert_eq!(process.activity_map.get("T1").map(String::as_str), Some("Second"));
    assert_eq!(process.activity_count(), 2);
}

#[test]
fn test_nested_lanes_become_participants() {
    let lanes = format!(
        r#"<bpmn:lane id="Lane_Outer"><bpmn:childLaneSet id="Inner">{}</bpmn:childLaneSet></bpmn:lane>"#,
        lane("Lane_Inner", &["Task_A"])
    );
    let body = r#"<bpmn:userTask id="Task_A" />"#;
    let parser = parse(&document(&process("Process_1", &lanes, body)));
    let process = &parser.processes()[0];
    assert_eq!(process.participants.len(), 1);
    assert_eq!(process.user_tasks[0].assignee, "Lane_Inner");
}

#[test]
fn test_multiple_processes() {
    let second = process(
        "Process_2",
        &lane("Lane_Two", &["Task_X"]),
        r#"<bpmn:userTask id="Task_X" name="Approve" />"#,
    );
    let xml = document(&format!("{}{}", linear_process(), second));
    let parser = parse(&xml);
    let ids: Vec<&str> = parser.processes().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["Process_1", "Process_2"]);
}

// --- Façade behavior ---

#[test]
fn test_parse_is_deterministic() {
    let xml = document(&xor_process("quantity", "4", "10"));
    let first = parse(&xml).document().unwrap();
    let second = parse(&xml).document().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_compiled_output_is_reproducible() {
    let lanes = format!(
        "{}{}",
        lane("Lane_Buyer", &["Task_A"]),
        lane("Lane_Seller", &["Task_B"])
    );
    let body = format!(
        r#"<bpmn:userTask id="Task_A" name="Draft" />
           <bpmn:userTask id="Task_B" name="Sign" />
           <bpmn:task id="Task_C" name="Archive" />
           <bpmn:sendTask id="Task_D" name="Notify" />
           {}{}{}"#,
        flow("F1", "Task_A", "Task_B"),
        flow("F2", "Task_B", "Task_C"),
        flow("F3", "Task_C", "Task_D"),
    );
    let xml = document(&process("Process_1", &lanes, &body));

    let first = parse(&xml).document().unwrap();
    let second = parse(&xml).document().unwrap();
    assert_eq!(first.to_bytes().unwrap(), second.to_bytes().unwrap());
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());

    let ids: Vec<&str> = first.processes[0]
        .activity_map
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(ids, vec!["Task_A", "Task_B", "Task_C", "Task_D"]);
}

#[test]
fn test_parser_is_restartable() {
    let mut parser = ModelParser::new();
    parser.parse(&document(&linear_process())).unwrap();
    parser.parse(&document(&xor_process("amount", "0", "5"))).unwrap();

    assert_eq!(parser.processes().len(), 1);
    assert_eq!(parser.processes()[0].xor_gateways.len(), 1);
    assert!(parser.processes()[0].service_tasks.is_empty());
}

#[test]
fn test_failed_parse_clears_previous_result() {
    let mut parser = ModelParser::new();
    parser.parse(&document(&linear_process())).unwrap();
    assert!(parser.model().is_some());

    assert!(parser.parse(&document(&xor_process("unknown", "0", "1"))).is_err());
    assert!(parser.model().is_none());
    assert!(parser.processes().is_empty());
    assert!(parser.document().is_none());
}

#[test]
fn test_parse_tree_accepts_prebuilt_tree() {
    let tree = parse_xml(&document(&linear_process())).unwrap();
    let mut parser = ModelParser::new();
    parser.parse_tree(&tree).unwrap();
    assert_eq!(parser.processes()[0].id, "Process_1");

    let compiled = parser.compile(&tree).unwrap();
    assert_eq!(Some(compiled), parser.document());
}

#[test]
fn test_tag_mapping() {
    let body = r#"<bpmn:approvalTask id="Task_A" name="Approve" />"#;
    let xml = document(&process("Process_1", &lane("Lane_Buyer", &["Task_A"]), body));

    // Unmapped, the element is skipped.
    let parser = parse(&xml);
    assert!(parser.processes()[0].user_tasks.is_empty());

    let mut parser = ModelParser::builder()
        .with_tag_mapping("approvalTask", "userTask")
        .build();
    parser.parse(&xml).unwrap();
    let process = &parser.processes()[0];
    assert_eq!(process.user_tasks.len(), 1);
    assert_eq!(process.user_tasks[0].assignee, "Lane_Buyer");
}

struct ScriptTaskClassifier;

impl NodeClassifier for ScriptTaskClassifier {
    fn node_type(&self) -> &str {
        "scriptTask"
    }

    fn classify(&self, node: &Element, _ctx: &ClassifyContext<'_>) -> std::result::Result<Classified, ParseError> {
        let mut activity = Activity::new(node.id(), node.name(), ActivityKind::Task);
        activity.application = "ScriptRunner".to_string();
        Ok(Classified::Activity(activity))
    }
}

#[test]
fn test_custom_classifier() {
    let body = r#"<bpmn:scriptTask id="Script_1" name="Compute" />"#;
    let xml = document(&process("Process_1", &lane("L", &[]), body));
    let mut parser = ModelParser::builder()
        .with_custom_classifier(Box::new(ScriptTaskClassifier))
        .build();
    parser.parse(&xml).unwrap();
    let process = &parser.processes()[0];
    assert_eq!(process.tasks.len(), 1);
    assert_eq!(process.tasks[0].application, "ScriptRunner");
}

#[test]
fn test_custom_config() {
    let config = ParserConfig::from_json(r#"{ "agreementStore": "contract" }"#).unwrap();
    let stores = data_stores().replace(r#"id="agreement" name="Agreement""#, r#"id="contract""#);
    let xml = document_with(&stores, &collaboration("2.0.0"), &linear_process());

    let mut parser = ModelParser::builder().with_config(config).build();
    parser.parse(&xml).unwrap();
    assert_eq!(parser.config().agreement_store, "contract");
    assert_eq!(
        parser.model().unwrap().field("effectiveDate").unwrap().data_storage_id,
        "contract"
    );
}

// --- Artifacts ---

#[test]
fn test_artifact_bytes_round_trip() {
    let parsed = parse(&document(&xor_process("amount", "1", "-3"))).document().unwrap();
    let bytes = parsed.to_bytes().unwrap();
    let restored = ParsedDocument::from_bytes(&bytes).unwrap();
    assert_eq!(restored, parsed);
}

#[test]
fn test_artifact_file_round_trip() {
    let parsed = parse(&document(&linear_process())).document().unwrap();
    let path = std::env::temp_dir().join("zumen_artifact_test.bin");
    let path = path.to_str().unwrap();
    parsed.save(path).unwrap();
    assert_eq!(ParsedDocument::from_file(path).unwrap(), parsed);
    let _ = std::fs::remove_file(path);
}

#[test]
fn test_artifact_rejects_garbage() {
    assert!(ParsedDocument::from_bytes(&[0xFF, 0x01]).is_err());
    assert!(ParsedDocument::from_file("/nonexistent/zumen.bin").is_err());
}

#[test]
fn test_summary_and_json() {
    let parsed = parse(&document(&xor_process("amount", "2", "100"))).document().unwrap();
    let summary = parsed.summary();
    assert!(summary.starts_with("Model 'Sale Agreement' (Collab_1) v1.2.3 [private]"));
    assert!(summary.contains("Process 'Process_1 process' (Process_1)"));
    assert_eq!(summary.lines().count(), 2);

    let json = parsed.to_json().unwrap();
    assert!(json.contains("\"Flow_cond\""));
    assert!(json.contains("\"XOR\""));
}
