use crate::codegen::ConcreteDocument;
use crate::codegen::PersistedQueryMap;
use crate::codegen::print_document;
use crate::errors::InternalError;
use crate::ir::Document;
use sha2::Digest;
use sha2::Sha256;

/// The input handed to a language plugin's format function.
#[derive(Clone, Debug)]
pub struct ModuleDescriptor {
    /// The serialized [`ConcreteDocument`] payload.
    pub concrete_text: String,
    /// Canonical operation text; `None` for fragments and split operations.
    pub doc_text: Option<String>,
    pub document_kind: &'static str,
    pub module_name: String,
    pub persisted_id: Option<String>,
    /// Hash of the canonical printed source this artifact was generated
    /// from.
    pub source_hash: String,
}

/// One generated output, compared by content hash against the last-written
/// artifact before touching the filesystem.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Artifact {
    pub content_hash: String,
    pub name: String,
    pub persisted_id: Option<String>,
    pub text: String,
}

pub fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Translate one final document into its artifact.
///
/// When `persisted_queries` is provided, operations additionally get a
/// content-addressed id recorded in the side table.
pub fn build_artifact(
    document: &Document,
    format_module: fn(&ModuleDescriptor) -> String,
    persisted_queries: Option<&mut PersistedQueryMap>,
) -> Result<Artifact, InternalError> {
    let concrete = ConcreteDocument::from_document(document);
    let concrete_text = serde_json::to_string_pretty(&concrete).map_err(|err| {
        InternalError::SchemaContract {
            message: format!(
                "failed to serialize concrete document '{}': {err}",
                document.name(),
            ),
        }
    })?;

    let printed = print_document(document);
    let source_hash = sha256_hex(printed.as_str());

    let doc_text = match document {
        Document::Operation(_) => Some(printed),
        _ => None,
    };

    let persisted_id = match (&doc_text, persisted_queries) {
        (Some(text), Some(persisted_queries)) =>
            Some(persisted_queries.persist(text.as_str())),
        _ => None,
    };

    let descriptor = ModuleDescriptor {
        concrete_text,
        doc_text,
        document_kind: document.kind_name(),
        module_name: document.name().to_string(),
        persisted_id: persisted_id.clone(),
        source_hash,
    };
    let text = format_module(&descriptor);

    Ok(Artifact {
        content_hash: sha256_hex(text.as_str()),
        name: document.name().to_string(),
        persisted_id,
        text,
    })
}
