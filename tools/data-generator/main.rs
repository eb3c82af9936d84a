use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fmt::Write as _;
use std::fs;
use zumen::config::ParserConfig;
use zumen::extension::encode_data_mappings;
use zumen::model::{DataMapping, Direction, Operator, ParameterType};

/// A CLI tool to generate well-formed BPMN documents for the zumen parser
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated BPMN file to
    #[arg(short, long, default_value = "generated.bpmn")]
    output: String,

    /// The number of processes to generate
    #[arg(long, default_value_t = 1)]
    processes: usize,

    /// The number of user tasks per process
    #[arg(long, default_value_t = 5)]
    tasks: usize,

    /// The number of lanes (participants) per process
    #[arg(long, default_value_t = 2)]
    lanes: usize,

    /// Join consecutive tasks through XOR gateways with conditions
    #[arg(long)]
    conditions: bool,
}

/// Fields declared on the process-instance store besides the mandatory agreement field.
const FIELDS: &[(&str, ParameterType, &[&str])] = &[
    ("approved", ParameterType::Boolean, &["true", "false"]),
    ("amount", ParameterType::Number, &["-50", "100", "2500"]),
    ("quantity", ParameterType::PositiveNumber, &["1", "10", "42"]),
    ("buyer", ParameterType::UserOrganization, &["0xA11CE", "0xB0B"]),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.tasks < 2 && cli.conditions {
        eprintln!("Error: --conditions needs at least 2 tasks per process");
        std::process::exit(1);
    }
    if cli.lanes == 0 {
        eprintln!("Error: --lanes must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating {} process(es) with {} task(s) and {} lane(s) each...",
        cli.processes, cli.tasks, cli.lanes
    );

    let config = ParserConfig::default();
    let mut xml = String::new();
    writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        xml,
        r#"<bpmn:definitions xmlns:bpmn="http://www.omg.org/spec/BPMN/20100524/MODEL" xmlns:camunda="http://camunda.org/schema/1.0/bpmn" id="Definitions_generated">"#
    )?;
    write_data_stores(&mut xml, &config)?;
    write_collaboration(&mut xml, cli.processes)?;
    for index in 0..cli.processes {
        write_process(&mut xml, &mut rng, &config, index, &cli)?;
    }
    writeln!(xml, "</bpmn:definitions>")?;

    fs::write(&cli.output, xml)?;
    println!("Successfully generated and saved document to '{}'", cli.output);
    Ok(())
}

fn write_properties(xml: &mut String, indent: &str, props: &[(String, String)]) -> std::fmt::Result {
    writeln!(xml, "{indent}<bpmn:extensionElements>")?;
    writeln!(xml, "{indent}  <camunda:properties>")?;
    for (name, value) in props {
        writeln!(
            xml,
            r#"{indent}    <camunda:property name="{name}" value="{value}" />"#
        )?;
    }
    writeln!(xml, "{indent}  </camunda:properties>")?;
    writeln!(xml, "{indent}</bpmn:extensionElements>")
}

fn write_data_stores(xml: &mut String, config: &ParserConfig) -> std::fmt::Result {
    let mut instance_fields = vec![(
        config.agreement_field.clone(),
        ParameterType::ContractAddress.code().to_string(),
    )];
    instance_fields.extend(
        FIELDS
            .iter()
            .map(|(path, kind, _)| (path.to_string(), kind.code().to_string())),
    );

    writeln!(
        xml,
        r#"  <bpmn:dataStore id="{}" name="Process Instance">"#,
        config.process_instance_store
    )?;
    write_properties(xml, "    ", &instance_fields)?;
    writeln!(xml, "  </bpmn:dataStore>")?;

    writeln!(
        xml,
        r#"  <bpmn:dataStore id="{}" name="Agreement">"#,
        config.agreement_store
    )?;
    write_properties(
        xml,
        "    ",
        &[("effectiveDate".to_string(), ParameterType::Date.code().to_string())],
    )?;
    writeln!(xml, "  </bpmn:dataStore>")
}

fn write_collaboration(xml: &mut String, processes: usize) -> std::fmt::Result {
    writeln!(xml, r#"  <bpmn:collaboration id="Collaboration_generated" name="Generated Model">"#)?;
    write_properties(
        xml,
        "    ",
        &[
            ("version".to_string(), "1.0.0".to_string()),
            ("private".to_string(), "false".to_string()),
        ],
    )?;
    for index in 0..processes {
        writeln!(
            xml,
            r#"    <bpmn:participant id="Participant_{index}" processRef="Process_{index}" />"#
        )?;
    }
    writeln!(xml, "  </bpmn:collaboration>")
}

fn write_process(
    xml: &mut String,
    rng: &mut ThreadRng,
    config: &ParserConfig,
    index: usize,
    cli: &Cli,
) -> std::fmt::Result {
    let task_id = |t: usize| format!("Task_{index}_{t}");
    let gateway_id = |t: usize| format!("Gateway_{index}_{t}");
    let end_id = format!("End_{index}");

    writeln!(
        xml,
        r#"  <bpmn:process id="Process_{index}" name="Generated Process {index}" isExecutable="true">"#
    )?;
    write_properties(
        xml,
        "    ",
        &[("processInterface".to_string(), "Agreement Formation".to_string())],
    )?;

    // Lanes: every task is assigned to one randomly chosen lane.
    let mut lane_tasks: Vec<Vec<String>> = vec![Vec::new(); cli.lanes];
    for t in 0..cli.tasks {
        lane_tasks[rng.random_range(0..cli.lanes)].push(task_id(t));
    }
    writeln!(xml, r#"    <bpmn:laneSet id="LaneSet_{index}">"#)?;
    for (lane, tasks) in lane_tasks.iter().enumerate() {
        writeln!(xml, r#"      <bpmn:lane id="Lane_{index}_{lane}" name="Signatory {lane}">"#)?;
        write_properties(
            xml,
            "        ",
            &[
                ("dataPath".to_string(), "buyer".to_string()),
                ("dataStorageId".to_string(), config.process_instance_store.clone()),
            ],
        )?;
        for task in tasks {
            writeln!(xml, "        <bpmn:flowNodeRef>{task}</bpmn:flowNodeRef>")?;
        }
        writeln!(xml, "      </bpmn:lane>")?;
    }
    writeln!(xml, "    </bpmn:laneSet>")?;

    // Sequence flows, built first so tasks and gateways can list their edges.
    let mut flows: Vec<(String, String, String, Option<Vec<(String, String)>>)> = Vec::new();
    for t in 0..cli.tasks.saturating_sub(1) {
        if cli.conditions {
            let (path, _, values) = FIELDS[rng.random_range(0..FIELDS.len())];
            let value = values[rng.random_range(0..values.len())];
            let operator = Operator::ALL[rng.random_range(0..Operator::ALL.len())];
            flows.push((format!("Flow_{index}_{t}_in"), task_id(t), gateway_id(t), None));
            flows.push((
                format!("Flow_{index}_{t}_cond"),
                gateway_id(t),
                task_id(t + 1),
                Some(vec![
                    ("lhDataStorageId".to_string(), config.process_instance_store.clone()),
                    ("lhDataPath".to_string(), path.to_string()),
                    ("operator".to_string(), operator.code().to_string()),
                    ("rhValue".to_string(), value.to_string()),
                ]),
            ));
            flows.push((format!("Flow_{index}_{t}_default"), gateway_id(t), end_id.clone(), None));
        } else {
            flows.push((format!("Flow_{index}_{t}"), task_id(t), task_id(t + 1), None));
        }
    }

    let edges = |node: &str, outgoing: bool| -> Vec<String> {
        flows
            .iter()
            .filter(|(_, source, target, _)| if outgoing { source == node } else { target == node })
            .map(|(id, _, _, _)| id.clone())
            .collect()
    };

    for t in 0..cli.tasks {
        let id = task_id(t);
        writeln!(xml, r#"    <bpmn:userTask id="{id}" name="Review step {t}">"#)?;
        if rng.random_bool(0.5) {
            let mappings = vec![
                DataMapping {
                    id: format!("in{t}"),
                    direction: Direction::In,
                    data_path: "amount".to_string(),
                    data_storage_id: config.process_instance_store.clone(),
                },
                DataMapping {
                    id: format!("out{t}"),
                    direction: Direction::Out,
                    data_path: "approved".to_string(),
                    data_storage_id: String::new(),
                },
            ];
            write_properties(xml, "      ", &encode_data_mappings(&mappings, config))?;
        }
        for flow in edges(&id, false) {
            writeln!(xml, "      <bpmn:incoming>{flow}</bpmn:incoming>")?;
        }
        for flow in edges(&id, true) {
            writeln!(xml, "      <bpmn:outgoing>{flow}</bpmn:outgoing>")?;
        }
        writeln!(xml, "    </bpmn:userTask>")?;
    }

    if cli.conditions {
        for t in 0..cli.tasks - 1 {
            let id = gateway_id(t);
            writeln!(
                xml,
                r#"    <bpmn:exclusiveGateway id="{id}" default="Flow_{index}_{t}_default">"#
            )?;
            for flow in edges(&id, false) {
                writeln!(xml, "      <bpmn:incoming>{flow}</bpmn:incoming>")?;
            }
            for flow in edges(&id, true) {
                writeln!(xml, "      <bpmn:outgoing>{flow}</bpmn:outgoing>")?;
            }
            writeln!(xml, "    </bpmn:exclusiveGateway>")?;
        }
        writeln!(xml, r#"    <bpmn:endEvent id="{end_id}" />"#)?;
    }

    for (id, source, target, condition) in &flows {
        match condition {
            None => writeln!(
                xml,
                r#"    <bpmn:sequenceFlow id="{id}" sourceRef="{source}" targetRef="{target}" />"#
            )?,
            Some(props) => {
                writeln!(
                    xml,
                    r#"    <bpmn:sequenceFlow id="{id}" sourceRef="{source}" targetRef="{target}">"#
                )?;
                write_properties(xml, "      ", props)?;
                writeln!(xml, "    </bpmn:sequenceFlow>")?;
            }
        }
    }

    writeln!(xml, "  </bpmn:process>")
}
