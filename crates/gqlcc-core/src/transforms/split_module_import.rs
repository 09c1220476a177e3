use crate::errors::DiagnosticsResult;
use crate::feature_flags::FeatureFlags;
use crate::ir::Document;
use crate::ir::Metadata;
use crate::ir::MetadataValue;
use crate::ir::ModuleImport;
use crate::ir::Selection;
use crate::ir::SplitOperation;
use crate::store::DocumentStore;
use crate::transform::Transform;
use crate::transform::TransformResult;
use crate::transform::Transformed;
use crate::transform::TraversalContext;
use crate::transform::transform_documents;
use indexmap::IndexMap;

/// Synthesizes one standalone [`SplitOperation`] document per distinct
/// [`ModuleImport`] name, carrying the type in scope at the import.
///
/// Imports are deduplicated by name (last wins) and the synthesized
/// documents are appended to the store once traversal finishes.
pub fn transform(
    store: &DocumentStore,
    _flags: &FeatureFlags,
) -> DiagnosticsResult<DocumentStore> {
    transform_documents(store, &SplitModuleImportTransform)
}

struct SplitModuleImportTransform;

#[derive(Default)]
struct SplitState {
    split_operations: IndexMap<String, Document>,
}

impl Transform for SplitModuleImportTransform {
    type State = SplitState;

    fn name(&self) -> &'static str {
        "split-module-import"
    }

    fn initial_state(&self, _document: &Document) -> Self::State {
        SplitState::default()
    }

    fn transform_module_import(
        &self,
        import: &ModuleImport,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        let traversed = self.traverse_module_import(import, ctx, state)?;
        let current = match &traversed {
            Transformed::Replace(Selection::ModuleImport(current)) => current,
            _ => import,
        };

        let split_operation = Document::SplitOperation(SplitOperation {
            loc: import.loc.to_derived(),
            metadata: Metadata::new().with(
                "derived_from",
                MetadataValue::String(current.fragment_name.clone()),
            ),
            name: format!("{}$normalization", current.fragment_name),
            selections: current.selections.clone(),
            type_name: ctx.parent_type_name().to_string(),
        });
        state
            .split_operations
            .insert(current.fragment_name.clone(), split_operation);

        Ok(traversed)
    }

    fn appended_documents(&self, state: Self::State) -> Vec<Document> {
        state.split_operations.into_values().collect()
    }
}
