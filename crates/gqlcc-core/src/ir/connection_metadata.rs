/// One record per `@connection_resolver` field, attached to the metadata of
/// the document that contains the field once its traversal completes.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct ConnectionMetadata {
    pub is_stream: bool,
    pub label: String,
    /// Aliased field names from the document root down to the connection
    /// field.
    pub path: Vec<String>,
}
