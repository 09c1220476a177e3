use crate::codegen::sha256_hex;
use crate::errors::InternalError;
use indexmap::IndexMap;
use std::path::Path;

/// The persisted-query side table: content-addressed id to operation text.
///
/// Rebuilt from scratch and rewritten wholesale once per full compile when
/// persisted output is enabled.
#[derive(Debug, Default)]
pub struct PersistedQueryMap {
    entries: IndexMap<String, String>,
}
impl PersistedQueryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text` and return its id.
    pub fn persist(&mut self, text: &str) -> String {
        let id = sha256_hex(text);
        self.entries.insert(id.clone(), text.to_string());
        id
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Serialize the whole table as a flat JSON object.
    pub fn to_json(&self) -> Result<String, InternalError> {
        serde_json::to_string_pretty(&self.entries).map_err(|err| {
            InternalError::SchemaContract {
                message: format!("failed to serialize persisted-query map: {err}"),
            }
        })
    }

    pub fn write_to(&self, path: &Path) -> Result<(), InternalError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|err| InternalError::Io {
            action: "write persisted-query map to",
            path: path.to_path_buf(),
            err,
        })
    }
}
