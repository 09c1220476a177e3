use crate::errors::DiagnosticsResult;
use crate::feature_flags::FeatureFlags;
use crate::ir::Document;
use crate::ir::Handle;
use crate::ir::LinkedField;
use crate::ir::Selection;
use crate::schema::GraphQLType;
use crate::store::DocumentStore;
use crate::transform::Transform;
use crate::transform::TransformResult;
use crate::transform::Transformed;
use crate::transform::TraversalContext;
use crate::transform::transform_documents;

const ID_FIELD: &str = "id";
const VIEWER_HANDLE: &str = "viewer";
const VIEWER_TYPE: &str = "Viewer";

/// Adds a `"viewer"` client handle to every field whose type is the
/// schema's singular `Viewer` type.
///
/// The whole pass is skipped when no `Viewer` object type exists, or when
/// `Viewer` declares its own identifier field (the runtime can key it
/// without a handle in that case).
pub fn transform(
    store: &DocumentStore,
    _flags: &FeatureFlags,
) -> DiagnosticsResult<DocumentStore> {
    let applies = match store.schema().server_type_named(VIEWER_TYPE) {
        Some(GraphQLType::Object(viewer_type)) =>
            !viewer_type.fields.contains_key(ID_FIELD),
        _ => false,
    };
    if !applies {
        return Ok(store.clone());
    }

    transform_documents(store, &ViewerHandleTransform)
}

struct ViewerHandleTransform;

impl Transform for ViewerHandleTransform {
    type State = ();

    fn name(&self) -> &'static str {
        "viewer-handle"
    }

    fn initial_state(&self, _document: &Document) -> Self::State {}

    fn transform_linked_field(
        &self,
        field: &LinkedField,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        let traversed = self.traverse_linked_field(field, ctx, state)?;
        let current = match &traversed {
            Transformed::Replace(Selection::LinkedField(current)) => current,
            _ => field,
        };

        if current.type_annotation.raw_type_name() != VIEWER_TYPE {
            return Ok(traversed);
        }

        // An argumented field named `viewer` is not globally keyed: a payload
        // field (e.g. on a mutation) can also return the Viewer type.
        if !current.arguments.is_empty() && current.name == VIEWER_HANDLE {
            return Ok(traversed);
        }

        if current
            .handles
            .iter()
            .any(|handle| handle.name == VIEWER_HANDLE)
        {
            return Ok(traversed);
        }

        let mut handles = current.handles.clone();
        handles.push(Handle::new(VIEWER_HANDLE));
        Ok(Transformed::Replace(Selection::LinkedField(LinkedField {
            handles,
            ..current.clone()
        })))
    }
}
