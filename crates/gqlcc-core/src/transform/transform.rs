use crate::errors::DiagnosticsResult;
use crate::ir::Condition;
use crate::ir::ConnectionField;
use crate::ir::Defer;
use crate::ir::Document;
use crate::ir::FragmentSpread;
use crate::ir::InlineFragment;
use crate::ir::LinkedField;
use crate::ir::ModuleImport;
use crate::ir::ScalarField;
use crate::ir::Selection;
use crate::ir::Stream;
use crate::store::DocumentStore;
use crate::transform::Transformed;
use crate::transform::TraversalContext;
use std::sync::Arc;

pub type TransformResult = DiagnosticsResult<Transformed<Selection>>;

/// A kind-dispatched tree rewrite over one document at a time.
///
/// Implementors override the `transform_*` handler for each selection kind
/// they care about; unhandled kinds fall back to the structural `traverse_*`
/// default, which recurses into children first and rebuilds the node only if
/// a child changed. A handler typically calls the matching `traverse_*`
/// itself to get the rewritten node, then inspects that result.
///
/// `State` is created per document and threaded down the strictly sequential
/// traversal by exclusive borrow; whatever a pass accumulates there is merged
/// into its output on the way out (via `transform_document` or
/// [`Transform::appended_documents`]), never through a shared cell.
pub trait Transform {
    type State;

    fn name(&self) -> &'static str;

    fn initial_state(&self, document: &Document) -> Self::State;

    fn transform_document(
        &self,
        document: &Document,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> DiagnosticsResult<Transformed<Document>> {
        self.traverse_document(document, ctx, state)
    }

    /// Documents synthesized while traversing one document, appended to the
    /// output store after that document completes. Appends replace by name
    /// (last wins).
    fn appended_documents(&self, _state: Self::State) -> Vec<Document> {
        vec![]
    }

    fn transform_selection(
        &self,
        selection: &Selection,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        match selection {
            Selection::Condition(node) => self.transform_condition(node, ctx, state),
            Selection::ConnectionField(node) =>
                self.transform_connection_field(node, ctx, state),
            Selection::Defer(node) => self.transform_defer(node, ctx, state),
            Selection::FragmentSpread(node) =>
                self.transform_fragment_spread(node, ctx, state),
            Selection::InlineFragment(node) =>
                self.transform_inline_fragment(node, ctx, state),
            Selection::LinkedField(node) =>
                self.transform_linked_field(node, ctx, state),
            Selection::ModuleImport(node) =>
                self.transform_module_import(node, ctx, state),
            Selection::ScalarField(node) =>
                self.transform_scalar_field(node, ctx, state),
            Selection::Stream(node) => self.transform_stream(node, ctx, state),
        }
    }

    fn transform_condition(
        &self,
        condition: &Condition,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        self.traverse_condition(condition, ctx, state)
    }

    fn transform_connection_field(
        &self,
        field: &ConnectionField,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        self.traverse_connection_field(field, ctx, state)
    }

    fn transform_defer(
        &self,
        defer: &Defer,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        self.traverse_defer(defer, ctx, state)
    }

    fn transform_fragment_spread(
        &self,
        _spread: &FragmentSpread,
        _ctx: &TraversalContext<'_>,
        _state: &mut Self::State,
    ) -> TransformResult {
        Ok(Transformed::Keep)
    }

    fn transform_inline_fragment(
        &self,
        fragment: &InlineFragment,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        self.traverse_inline_fragment(fragment, ctx, state)
    }

    fn transform_linked_field(
        &self,
        field: &LinkedField,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        self.traverse_linked_field(field, ctx, state)
    }

    fn transform_module_import(
        &self,
        import: &ModuleImport,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        self.traverse_module_import(import, ctx, state)
    }

    fn transform_scalar_field(
        &self,
        _field: &ScalarField,
        _ctx: &TraversalContext<'_>,
        _state: &mut Self::State,
    ) -> TransformResult {
        Ok(Transformed::Keep)
    }

    fn transform_stream(
        &self,
        stream: &Stream,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        self.traverse_stream(stream, ctx, state)
    }

    // ---- Structural defaults ----

    fn traverse_document(
        &self,
        document: &Document,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> DiagnosticsResult<Transformed<Document>> {
        match self.traverse_selections(document.selections(), ctx, state)? {
            Some(selections) =>
                Ok(Transformed::Replace(document.with_selections(selections))),
            None => Ok(Transformed::Keep),
        }
    }

    fn traverse_condition(
        &self,
        condition: &Condition,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        rebuild(
            Selection::Condition(condition.clone()),
            self.traverse_selections(&condition.selections, ctx, state)?,
        )
    }

    fn traverse_connection_field(
        &self,
        field: &ConnectionField,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        let child_ctx = ctx.for_composite_field(
            field.alias_or_name(),
            field.type_annotation.raw_type_name(),
        );
        rebuild(
            Selection::ConnectionField(field.clone()),
            self.traverse_selections(&field.selections, &child_ctx, state)?,
        )
    }

    fn traverse_defer(
        &self,
        defer: &Defer,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        rebuild(
            Selection::Defer(defer.clone()),
            self.traverse_selections(&defer.selections, ctx, state)?,
        )
    }

    fn traverse_inline_fragment(
        &self,
        fragment: &InlineFragment,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        let child_ctx = match &fragment.type_condition {
            Some(type_name) => ctx.with_parent_type(type_name),
            None => ctx.clone(),
        };
        rebuild(
            Selection::InlineFragment(fragment.clone()),
            self.traverse_selections(&fragment.selections, &child_ctx, state)?,
        )
    }

    fn traverse_linked_field(
        &self,
        field: &LinkedField,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        let child_ctx = ctx.for_composite_field(
            field.alias_or_name(),
            field.type_annotation.raw_type_name(),
        );
        rebuild(
            Selection::LinkedField(field.clone()),
            self.traverse_selections(&field.selections, &child_ctx, state)?,
        )
    }

    fn traverse_module_import(
        &self,
        import: &ModuleImport,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        rebuild(
            Selection::ModuleImport(import.clone()),
            self.traverse_selections(&import.selections, ctx, state)?,
        )
    }

    fn traverse_stream(
        &self,
        stream: &Stream,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        rebuild(
            Selection::Stream(stream.clone()),
            self.traverse_selections(&stream.selections, ctx, state)?,
        )
    }

    /// Transform a selection list. Returns `None` when every child was kept,
    /// so parents can share the original node. Diagnostics from every sibling
    /// are collected before failing.
    fn traverse_selections(
        &self,
        selections: &[Selection],
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> DiagnosticsResult<Option<Vec<Selection>>> {
        let mut errors = vec![];
        let mut result: Option<Vec<Selection>> = None;

        for (index, selection) in selections.iter().enumerate() {
            let transformed = match self.transform_selection(selection, ctx, state) {
                Ok(transformed) => transformed,
                Err(errs) => {
                    errors.extend(errs);
                    continue;
                },
            };
            match transformed {
                Transformed::Keep => {
                    if let Some(acc) = result.as_mut() {
                        acc.push(selection.clone());
                    }
                },
                Transformed::Replace(new_selection) => {
                    result
                        .get_or_insert_with(|| selections[..index].to_vec())
                        .push(new_selection);
                },
                Transformed::ReplaceMany(new_selections) => {
                    result
                        .get_or_insert_with(|| selections[..index].to_vec())
                        .extend(new_selections);
                },
                Transformed::Delete => {
                    result.get_or_insert_with(|| selections[..index].to_vec());
                },
            }
        }

        if errors.is_empty() {
            Ok(result)
        } else {
            Err(errors)
        }
    }
}

fn rebuild(
    original: Selection,
    traversed: Option<Vec<Selection>>,
) -> TransformResult {
    match traversed {
        Some(selections) =>
            Ok(Transformed::Replace(original.with_selections(selections))),
        None => Ok(Transformed::Keep),
    }
}

/// Run one pass over every document in the store, producing the next store
/// revision.
///
/// A diagnostic aborts the pass for the offending document only; the
/// remaining documents are still visited and every collected diagnostic is
/// reported together.
pub fn transform_documents<T: Transform>(
    store: &DocumentStore,
    transform: &T,
) -> DiagnosticsResult<DocumentStore> {
    let mut appended = vec![];
    let mut errors = vec![];
    let mut next = store.next_revision();

    for document in store.documents() {
        let base = store.is_base(document.name());
        let mut state = transform.initial_state(document);
        let ctx = TraversalContext::for_document(store, document);

        match transform.transform_document(document, &ctx, &mut state) {
            Ok(Transformed::Keep) => next.insert_arc(Arc::clone(document), base),
            Ok(Transformed::Replace(new_document)) =>
                next.insert_replacing(new_document, base),
            Ok(Transformed::ReplaceMany(new_documents)) => {
                for new_document in new_documents {
                    next.insert_replacing(new_document, base);
                }
            },
            Ok(Transformed::Delete) => {},
            Err(errs) => {
                errors.extend(errs);
                continue;
            },
        }

        appended.extend(transform.appended_documents(state));
    }

    for document in appended {
        next.insert_replacing(document, /* base = */ false);
    }

    if errors.is_empty() {
        Ok(next)
    } else {
        Err(errors)
    }
}
