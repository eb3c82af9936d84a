use crate::classifier::{NodeClassifier, create_classifier_by_name, register_default_classifiers};
use crate::config::ParserConfig;
use crate::error::{ParseError, ZumenError};
use crate::extractor::{extract_model, extract_processes};
use crate::model::{Model, ParsedDocument, Process};
use crate::validator::validate_process;
use crate::xml::{ElementTree, parse_xml};
use ahash::AHashMap;
use tracing::{debug, info};

const DEFINITIONS: &str = "definitions";

/// The parser façade.
///
/// Holds the classifier registry and configuration, plus the result of the last
/// successful `parse`. Each call replaces that result entirely; a failed call
/// leaves no model behind. Use one instance per in-flight document.
pub struct ModelParser {
    config: ParserConfig,
    registry: AHashMap<String, Box<dyn NodeClassifier>>,
    model: Option<Model>,
    processes: Vec<Process>,
}

pub struct ModelParserBuilder {
    config: ParserConfig,
    registry: AHashMap<String, Box<dyn NodeClassifier>>,
}

impl ModelParserBuilder {
    pub fn new() -> Self {
        let mut registry: AHashMap<String, Box<dyn NodeClassifier>> = AHashMap::new();
        register_default_classifiers(&mut registry);
        Self {
            config: ParserConfig::default(),
            registry,
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Classifies elements tagged `user_tag` with the built-in classifier for `bpmn_tag`.
    /// Unknown built-in tags are ignored.
    pub fn with_tag_mapping(mut self, user_tag: &str, bpmn_tag: &str) -> Self {
        if let Some(classifier) = create_classifier_by_name(bpmn_tag) {
            self.registry.insert(user_tag.to_string(), classifier);
        }
        self
    }

    pub fn with_custom_classifier(mut self, classifier: Box<dyn NodeClassifier>) -> Self {
        self.registry
            .insert(classifier.node_type().to_string(), classifier);
        self
    }

    pub fn build(self) -> ModelParser {
        ModelParser {
            config: self.config,
            registry: self.registry,
            model: None,
            processes: Vec::new(),
        }
    }
}

impl Default for ModelParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for ModelParser {
    fn default() -> Self {
        ModelParserBuilder::new().build()
    }
}

impl ModelParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ModelParserBuilder {
        ModelParserBuilder::new()
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a BPMN XML document and keeps the result for `model()` / `processes()`.
    pub fn parse(&mut self, xml: &str) -> Result<(), ZumenError> {
        self.reset();
        let tree = parse_xml(xml)?;
        self.parse_tree(&tree)
    }

    /// Like [`ModelParser::parse`], for a tree produced by another XML reader.
    pub fn parse_tree(&mut self, tree: &ElementTree) -> Result<(), ZumenError> {
        self.reset();
        let document = self.compile(tree)?;
        self.model = Some(document.model);
        self.processes = document.processes;
        Ok(())
    }

    /// Runs every pass against `tree` without touching the parser's stored result.
    pub fn compile(&self, tree: &ElementTree) -> Result<ParsedDocument, ZumenError> {
        let root = &tree.root;
        if root.tag != DEFINITIONS {
            return Err(ParseError::UnexpectedRoot(root.tag.clone()).into());
        }

        // Pass 1: model metadata and data-store fields
        let model = extract_model(root, &self.config)?;

        // Pass 2: participants, then the flow graph of each process
        let processes = extract_processes(root, &self.registry, &self.config)?;

        // Pass 3: semantic validation
        let processes = processes
            .into_iter()
            .map(|process| validate_process(process, &model, &self.config))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            model = %model.id,
            processes = processes.len(),
            "parsed BPMN document"
        );
        Ok(ParsedDocument::new(model, processes))
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// A copy of the last successful result.
    pub fn document(&self) -> Option<ParsedDocument> {
        self.model
            .clone()
            .map(|model| ParsedDocument::new(model, self.processes.clone()))
    }

    fn reset(&mut self) {
        if self.model.is_some() {
            debug!("discarding previous parse result");
        }
        self.model = None;
        self.processes.clear();
    }
}
