use crate::errors::DiagnosticsResult;
use crate::errors::UserError;
use crate::feature_flags::FeatureFlags;
use crate::ir::Document;
use crate::ir::Selection;
use crate::store::DocumentStore;
use crate::transform::TraversalContext;
use crate::transform::Validate;
use crate::transform::validate_documents;

/// Rejects `__typename` selected directly on an operation root.
///
/// Root records have no stable identity to attach a typename to. Descent
/// stops at fragment boundaries: `__typename` is legal inside fragments.
pub fn transform(
    store: &DocumentStore,
    _flags: &FeatureFlags,
) -> DiagnosticsResult<DocumentStore> {
    validate_documents(store, &DisallowTypenameOnRoot)?;
    Ok(store.clone())
}

struct DisallowTypenameOnRoot;

impl Validate for DisallowTypenameOnRoot {
    type State = ();

    fn name(&self) -> &'static str {
        "disallow-typename-on-root"
    }

    fn initial_state(&self, _document: &Document) -> Self::State {}

    fn validate_document(
        &self,
        document: &Document,
        _ctx: &TraversalContext<'_>,
        _state: &mut Self::State,
    ) -> DiagnosticsResult<()> {
        let Document::Operation(operation) = document else {
            return Ok(());
        };

        let mut errors = vec![];
        for selection in &operation.selections {
            if let Selection::ScalarField(field) = selection
                && field.name == "__typename"
            {
                errors.push(UserError::TypenameOnOperationRoot {
                    location: field.loc.clone(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
