use super::definition::Model;
use super::process::Process;
use crate::error::ArtifactError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

/// The complete output of a successful parse: one model and its processes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub model: Model,
    pub processes: Vec<Process>,
}

impl ParsedDocument {
    pub fn new(model: Model, processes: Vec<Process>) -> Self {
        Self { model, processes }
    }

    /// Saves the document to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), ArtifactError> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: format!("could not create file: {}", e),
        })?;
        file.write_all(&bytes).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: format!("could not write file: {}", e),
        })?;
        Ok(())
    }

    /// Loads a document previously written by [`ParsedDocument::save`].
    pub fn from_file(path: &str) -> Result<Self, ArtifactError> {
        let mut file = fs::File::open(path).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: format!("could not open file: {}", e),
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: format!("could not read file: {}", e),
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        encode_to_vec(self, standard()).map_err(|e| ArtifactError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        decode_from_slice(bytes, standard())
            .map(|(document, _)| document) // bincode 2 returns (data, bytes_read)
            .map_err(|e| ArtifactError::Decode(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ArtifactError> {
        serde_json::to_string_pretty(self).map_err(|e| ArtifactError::Encode(e.to_string()))
    }

    /// One header line for the model, then one line per process.
    pub fn summary(&self) -> String {
        let header = format!(
            "Model '{}' ({}) v{}{} with {} data-store field(s)",
            self.model.name,
            self.model.id,
            self.model.version,
            if self.model.private { " [private]" } else { "" },
            self.model.data_store_fields.len()
        );
        let lines = self.processes.iter().map(|p| {
            format!(
                "  - Process '{}' ({}): {} participant(s), {} activit(y/ies), {} gateway(s), {} transition(s)",
                p.name,
                p.id,
                p.participants.len(),
                p.activity_count(),
                p.gateway_count(),
                p.transitions.len()
            )
        });
        std::iter::once(header).chain(lines).join("\n")
    }
}
