//! File I/O operations for prompt documents.

use super::PromptDocument;
use crate::error::{ForgeError, Result};
use std::path::Path;

impl PromptDocument {
    /// Load a prompt document from disk.
    ///
    /// Parsing and structural validation happen before the document is
    /// returned, so callers never see a malformed document.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ForgeError::UserError(format!(
                "failed to read prompt file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    /// Parse a prompt document from a JSON string.
    ///
    /// Unknown fields are preserved for forward compatibility.
    pub fn parse(content: &str) -> Result<Self> {
        let document: PromptDocument = serde_json::from_str(content)
            .map_err(|e| ForgeError::Document(format!("failed to parse JSON: {}", e)))?;

        document.validate()?;
        Ok(document)
    }

    /// Serialize the document to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| ForgeError::UserError(format!("failed to serialize document: {}", e)))?;
        json.push('\n');
        Ok(json)
    }

    /// Atomically save the document to disk.
    ///
    /// Uses atomic write (temp file + rename) so the prompt file is never
    /// left in a corrupted state.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_json()?;
        crate::fs::atomic_write_file(path, &content)
    }
}
