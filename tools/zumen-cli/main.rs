use clap::{Parser, ValueEnum};
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use zumen::prelude::*;

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One line per process
    Summary,
    /// The full model as pretty-printed JSON
    Json,
}

/// Compiles a BPMN 2.0 document into a validated process model
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the BPMN XML document
    document_path: String,

    /// Optional JSON file overriding the parser configuration
    #[arg(short, long)]
    config: Option<String>,

    /// How to print the parsed model
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,

    /// Write the compiled model as a binary artifact to this path
    #[arg(short, long)]
    artifact: Option<String>,

    /// Log every pass (overrides RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let total_start = Instant::now();

    // --- 1. File Loading ---
    let load_start = Instant::now();
    let xml = fs::read_to_string(&cli.document_path).unwrap_or_else(|e| {
        exit_with_error(
            &format!("Failed to read document '{}': {}", &cli.document_path, e),
            1,
        )
    });
    let config = match &cli.config {
        Some(path) => ParserConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load configuration: {}", e), 1)),
        None => ParserConfig::default(),
    };
    let load_duration = load_start.elapsed();

    // --- 2. XML Tree ---
    let tree_start = Instant::now();
    let tree = parse_xml(&xml).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read XML: {}", e), 2)
    });
    let tree_duration = tree_start.elapsed();

    // --- 3. Model Compilation ---
    let compile_start = Instant::now();
    let mut parser = ModelParser::builder().with_config(config).build();
    if let Err(e) = parser.parse_tree(&tree) {
        report_failure(&e);
    }
    let compile_duration = compile_start.elapsed();

    let document = parser
        .document()
        .unwrap_or_else(|| exit_with_error("Parser returned no model", 1));

    // --- 4. Output ---
    match cli.format {
        OutputFormat::Summary => println!("{}", document.summary()),
        OutputFormat::Json => {
            let json = document
                .to_json()
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to render JSON: {}", e), 1));
            println!("{}", json);
        }
    }

    if let Some(path) = &cli.artifact {
        document
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write artifact: {}", e), 1));
        eprintln!("Wrote artifact to '{}'", path);
    }

    let total_duration = total_start.elapsed();
    eprintln!("\n--- Performance Summary ---");
    eprintln!("File Loading:         {:?}", load_duration);
    eprintln!("XML Tree:             {:?}", tree_duration);
    eprintln!("Model Compilation:    {:?}", compile_duration);
    eprintln!("-----------------------------");
    eprintln!("Total Execution:      {:?}", total_duration);
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("zumen=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints the error and every violation it carries, then exits with a code derived from
/// the error's status hint.
fn report_failure(error: &ZumenError) -> ! {
    eprintln!("\nError [{}]: {}", error.status_code(), error);
    for violation in error.violations() {
        eprintln!("  - {}", violation);
    }
    let code = if error.status_code() == 400 { 2 } else { 1 };
    std::process::exit(code);
}

fn exit_with_error(message: &str, code: i32) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(code);
}
