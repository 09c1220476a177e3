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
use crate::transform::TraversalContext;

/// The read-only companion of [`Transform`](crate::transform::Transform):
/// the same kind-dispatched traversal, but handlers can only inspect and
/// raise diagnostics — replacement is impossible by construction.
pub trait Validate {
    type State;

    fn name(&self) -> &'static str;

    fn initial_state(&self, document: &Document) -> Self::State;

    fn validate_document(
        &self,
        document: &Document,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> DiagnosticsResult<()> {
        self.traverse_selections(document.selections(), ctx, state)
    }

    fn validate_selection(
        &self,
        selection: &Selection,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> DiagnosticsResult<()> {
        match selection {
            Selection::Condition(node) => self.validate_condition(node, ctx, state),
            Selection::ConnectionField(node) =>
                self.validate_connection_field(node, ctx, state),
            Selection::Defer(node) => self.validate_defer(node, ctx, state),
            Selection::FragmentSpread(node) =>
                self.validate_fragment_spread(node, ctx, state),
            Selection::InlineFragment(node) =>
                self.validate_inline_fragment(node, ctx, state),
            Selection::LinkedField(node) =>
                self.validate_linked_field(node, ctx, state),
            Selection::ModuleImport(node) =>
                self.validate_module_import(node, ctx, state),
            Selection::ScalarField(node) =>
                self.validate_scalar_field(node, ctx, state),
            Selection::Stream(node) => self.validate_stream(node, ctx, state),
        }
    }

    fn validate_condition(
        &self,
        condition: &Condition,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> DiagnosticsResult<()> {
        self.traverse_selections(&condition.selections, ctx, state)
    }

    fn validate_connection_field(
        &self,
        field: &ConnectionField,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> DiagnosticsResult<()> {
        let child_ctx = ctx.for_composite_field(
            field.alias_or_name(),
            field.type_annotation.raw_type_name(),
        );
        self.traverse_selections(&field.selections, &child_ctx, state)
    }

    fn validate_defer(
        &self,
        defer: &Defer,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> DiagnosticsResult<()> {
        self.traverse_selections(&defer.selections, ctx, state)
    }

    fn validate_fragment_spread(
        &self,
        _spread: &FragmentSpread,
        _ctx: &TraversalContext<'_>,
        _state: &mut Self::State,
    ) -> DiagnosticsResult<()> {
        Ok(())
    }

    fn validate_inline_fragment(
        &self,
        fragment: &InlineFragment,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> DiagnosticsResult<()> {
        let child_ctx = match &fragment.type_condition {
            Some(type_name) => ctx.with_parent_type(type_name),
            None => ctx.clone(),
        };
        self.traverse_selections(&fragment.selections, &child_ctx, state)
    }

    fn validate_linked_field(
        &self,
        field: &LinkedField,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> DiagnosticsResult<()> {
        let child_ctx = ctx.for_composite_field(
            field.alias_or_name(),
            field.type_annotation.raw_type_name(),
        );
        self.traverse_selections(&field.selections, &child_ctx, state)
    }

    fn validate_module_import(
        &self,
        import: &ModuleImport,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> DiagnosticsResult<()> {
        self.traverse_selections(&import.selections, ctx, state)
    }

    fn validate_scalar_field(
        &self,
        _field: &ScalarField,
        _ctx: &TraversalContext<'_>,
        _state: &mut Self::State,
    ) -> DiagnosticsResult<()> {
        Ok(())
    }

    fn validate_stream(
        &self,
        stream: &Stream,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> DiagnosticsResult<()> {
        self.traverse_selections(&stream.selections, ctx, state)
    }

    /// Validate a selection list, collecting diagnostics from every sibling.
    fn traverse_selections(
        &self,
        selections: &[Selection],
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> DiagnosticsResult<()> {
        let mut errors = vec![];
        for selection in selections {
            if let Err(errs) = self.validate_selection(selection, ctx, state) {
                errors.extend(errs);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Run a read-only validator over every document in the store, collecting
/// diagnostics across all of them.
pub fn validate_documents<V: Validate>(
    store: &DocumentStore,
    validator: &V,
) -> DiagnosticsResult<()> {
    let mut errors = vec![];

    for document in store.documents() {
        let mut state = validator.initial_state(document);
        let ctx = TraversalContext::for_document(store, document);
        if let Err(errs) = validator.validate_document(document, &ctx, &mut state) {
            errors.extend(errs);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
