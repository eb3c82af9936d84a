//! Common test utilities for building BPMN documents.
#![allow(dead_code)]

/// Renders an `extensionElements/properties` block.
pub fn properties(props: &[(&str, &str)]) -> String {
    let entries: String = props
        .iter()
        .map(|(name, value)| format!(r#"<camunda:property name="{}" value="{}" />"#, name, value))
        .collect();
    format!(
        "<bpmn:extensionElements><camunda:properties>{}</camunda:properties></bpmn:extensionElements>",
        entries
    )
}

/// The reserved data stores, with these process-instance fields:
/// `agreement` (CONTRACT_ADDRESS), `approved` (BOOLEAN), `amount` (NUMBER),
/// `quantity` (POSITIVE_NUMBER), `buyer` (USER_ORGANIZATION).
pub fn data_stores() -> String {
    format!(
        r#"<bpmn:dataStore id="PROCESS_INSTANCE" name="Process Instance">{}</bpmn:dataStore>
           <bpmn:dataStore id="agreement" name="Agreement">{}</bpmn:dataStore>"#,
        properties(&[
            ("agreement", "7"),
            ("approved", "0"),
            ("amount", "2"),
            ("quantity", "12"),
            ("buyer", "6"),
        ]),
        properties(&[("effectiveDate", "3")]),
    )
}

pub fn collaboration(version: &str) -> String {
    format!(
        r#"<bpmn:collaboration id="Collab_1" name="Sale Agreement">{}</bpmn:collaboration>"#,
        properties(&[("version", version), ("private", "true")])
    )
}

/// Wraps data stores, a collaboration and the given processes into a document.
pub fn document_with(data_stores: &str, collaboration: &str, processes: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<bpmn:definitions xmlns:bpmn="http://www.omg.org/spec/BPMN/20100524/MODEL"
                  xmlns:camunda="http://camunda.org/schema/1.0/bpmn" id="Definitions_1">
  {}
  {}
  {}
</bpmn:definitions>"#,
        data_stores, collaboration, processes
    )
}

pub fn document(processes: &str) -> String {
    document_with(&data_stores(), &collaboration("1.2.3"), processes)
}

/// A lane owning the given tasks, with an extension block.
pub fn lane(id: &str, tasks: &[&str]) -> String {
    let refs: String = tasks
        .iter()
        .map(|t| format!("<bpmn:flowNodeRef>{}</bpmn:flowNodeRef>", t))
        .collect();
    format!(
        r#"<bpmn:lane id="{}" name="{} lane">{}{}</bpmn:lane>"#,
        id,
        id,
        properties(&[("dataPath", "buyer"), ("dataStorageId", "PROCESS_INSTANCE")]),
        refs
    )
}

pub fn process(id: &str, lanes: &str, body: &str) -> String {
    format!(
        r#"<bpmn:process id="{}" name="{} process">{}<bpmn:laneSet id="LaneSet_{}">{}</bpmn:laneSet>{}</bpmn:process>"#,
        id,
        id,
        properties(&[("processInterface", "Agreement Formation")]),
        id,
        lanes,
        body
    )
}

pub fn edges(incoming: &[&str], outgoing: &[&str]) -> String {
    let inc: String = incoming
        .iter()
        .map(|f| format!("<bpmn:incoming>{}</bpmn:incoming>", f))
        .collect();
    let out: String = outgoing
        .iter()
        .map(|f| format!("<bpmn:outgoing>{}</bpmn:outgoing>", f))
        .collect();
    format!("{}{}", inc, out)
}

pub fn flow(id: &str, source: &str, target: &str) -> String {
    format!(
        r#"<bpmn:sequenceFlow id="{}" sourceRef="{}" targetRef="{}" />"#,
        id, source, target
    )
}

pub fn conditional_flow(id: &str, source: &str, target: &str, props: &[(&str, &str)]) -> String {
    format!(
        r#"<bpmn:sequenceFlow id="{}" sourceRef="{}" targetRef="{}">{}</bpmn:sequenceFlow>"#,
        id,
        source,
        target,
        properties(props)
    )
}

/// Two user tasks joined by an XOR gateway:
///
/// `Task_A -> Gateway_1 -[lh_data_path op rh_value]-> Task_B`, default `Gateway_1 -> End_1`.
///
/// The conditional flow is the first transition of the process.
pub fn xor_process(lh_data_path: &str, operator: &str, rh_value: &str) -> String {
    let body = format!(
        r#"{cond}
           <bpmn:userTask id="Task_A" name="Draft">{a_edges}</bpmn:userTask>
           <bpmn:exclusiveGateway id="Gateway_1" default="Flow_default">{gw_edges}</bpmn:exclusiveGateway>
           <bpmn:userTask id="Task_B" name="Sign">{b_edges}</bpmn:userTask>
           <bpmn:endEvent id="End_1" />
           {f1}
           {f3}"#,
        cond = conditional_flow(
            "Flow_cond",
            "Gateway_1",
            "Task_B",
            &[
                ("lhDataStorageId", "PROCESS_INSTANCE"),
                ("lhDataPath", lh_data_path),
                ("operator", operator),
                ("rhValue", rh_value),
            ],
        ),
        a_edges = edges(&[], &["Flow_1"]),
        gw_edges = edges(&["Flow_1"], &["Flow_cond", "Flow_default"]),
        b_edges = edges(&["Flow_cond"], &[]),
        f1 = flow("Flow_1", "Task_A", "Gateway_1"),
        f3 = flow("Flow_default", "Gateway_1", "End_1"),
    );
    process(
        "Process_1",
        &format!("{}{}", lane("Lane_Buyer", &["Task_A"]), lane("Lane_Seller", &["Task_B"])),
        &body,
    )
}

/// A single process with no gateways: one user task followed by a service task.
pub fn linear_process() -> String {
    let body = format!(
        r#"<bpmn:userTask id="Task_A" name="Draft">{}</bpmn:userTask>
           <bpmn:serviceTask id="Task_S" name="Notify">{}{}</bpmn:serviceTask>
           {}"#,
        properties(&[
            ("INDATAID_1", "customer"),
            ("INDATA_customer_dataPath", "buyer"),
            ("INDATA_customer_dataStorageId", "PROCESS_INSTANCE"),
        ]),
        properties(&[("application", "EmailNotifier")]),
        edges(&["Flow_1"], &[]),
        flow("Flow_1", "Task_A", "Task_S"),
    );
    process("Process_1", &lane("Lane_Buyer", &["Task_A"]), &body)
}
