use crate::ir::ConnectionMetadata;
use indexmap::IndexMap;

/// A value in a document's open metadata map.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Connections(Vec<ConnectionMetadata>),
    Int(i64),
    List(Vec<MetadataValue>),
    String(String),
}

/// The open metadata map passes write into documents.
///
/// Keys are pass-defined; insertion order is preserved so repeated compiles
/// serialize identically.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Metadata(IndexMap<String, MetadataValue>);
impl Metadata {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A copy of this map with `key` set to `value`.
    pub fn with(&self, key: impl AsRef<str>, value: MetadataValue) -> Self {
        let mut next = self.0.clone();
        next.insert(key.as_ref().to_string(), value);
        Self(next)
    }
}
