use crate::errors::DiagnosticsResult;
use crate::errors::UserError;
use crate::feature_flags::FeatureFlags;
use crate::feature_flags::INCREMENTAL_DELIVERY_VARIABLE_NAME;
use crate::ir::Defer;
use crate::ir::DirectiveAnnotation;
use crate::ir::Document;
use crate::ir::FragmentSpread;
use crate::ir::InlineFragment;
use crate::ir::LinkedField;
use crate::ir::ScalarField;
use crate::ir::Selection;
use crate::ir::Stream;
use crate::ir::Value;
use crate::ir::find_directive;
use crate::ir::strip_directive;
use crate::loc;
use crate::store::DocumentStore;
use crate::transform::Transform;
use crate::transform::TransformResult;
use crate::transform::Transformed;
use crate::transform::TraversalContext;
use crate::transform::transform_documents;
use indexmap::IndexMap;

const DEFER: &str = "defer";
const STREAM: &str = "stream";

/// Finds usages of `@defer` and `@stream`, validates them, and converts the
/// annotated node into a first-class [`Defer`]/[`Stream`] node.
pub fn transform(
    store: &DocumentStore,
    flags: &FeatureFlags,
) -> DiagnosticsResult<DocumentStore> {
    transform_documents(store, &DeferStreamTransform { flags })
}

struct DeferStreamTransform<'f> {
    flags: &'f FeatureFlags,
}

#[derive(Default)]
struct DeferStreamState {
    /// Derived label to the location of the directive that claimed it.
    labels: IndexMap<String, loc::SourceLocation>,
}

/// What the rollout-gated `if` argument check decided.
enum IfOutcome {
    /// The directive is honored; wrap the node, carrying this `if` value.
    Honor(Option<Value>),
    /// Literal `if: false` under the enabled flag: strip the directive and
    /// keep the node as-is.
    StripOnly,
}

impl Transform for DeferStreamTransform<'_> {
    type State = DeferStreamState;

    fn name(&self) -> &'static str {
        "defer-stream"
    }

    fn initial_state(&self, _document: &Document) -> Self::State {
        DeferStreamState::default()
    }

    fn transform_scalar_field(
        &self,
        field: &ScalarField,
        _ctx: &TraversalContext<'_>,
        _state: &mut Self::State,
    ) -> TransformResult {
        if let Some(stream_directive) = find_directive(&field.directives, STREAM) {
            return Err(vec![UserError::StreamOnScalarField {
                field_name: field.name.clone(),
                location: stream_directive.loc.clone(),
            }]);
        }
        Ok(Transformed::Keep)
    }

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

        let Some(stream_directive) =
            find_directive(&current.directives, STREAM).cloned()
        else {
            return Ok(traversed);
        };

        if !current.type_annotation.is_list() {
            return Err(vec![UserError::StreamOnNonListField {
                field_name: current.name.clone(),
                location: stream_directive.loc.clone(),
            }]);
        }

        let stripped = LinkedField {
            directives: strip_directive(&current.directives, STREAM),
            ..current.clone()
        };

        let if_arg = match self.check_if_argument(&stream_directive)? {
            IfOutcome::Honor(if_arg) => if_arg,
            IfOutcome::StripOnly =>
                return Ok(Transformed::Replace(Selection::LinkedField(stripped))),
        };

        let initial_count = match stream_directive.argument_value("initial_count") {
            Some(value) if value.is_int_or_variable() => value.clone(),
            _ => {
                return Err(vec![UserError::StreamInitialCountRequired {
                    location: stream_directive.loc.clone(),
                }]);
            },
        };

        let label = derive_label(
            state,
            ctx.document_name(),
            STREAM,
            &stream_directive,
        )?;

        Ok(Transformed::Replace(Selection::Stream(Stream {
            if_arg,
            initial_count,
            label,
            loc: stream_directive.loc.to_derived(),
            selections: vec![Selection::LinkedField(stripped)],
        })))
    }

    fn transform_inline_fragment(
        &self,
        fragment: &InlineFragment,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        let traversed = self.traverse_inline_fragment(fragment, ctx, state)?;
        let current = match &traversed {
            Transformed::Replace(Selection::InlineFragment(current)) => current,
            _ => fragment,
        };

        let Some(defer_directive) =
            find_directive(&current.directives, DEFER).cloned()
        else {
            return Ok(traversed);
        };

        let stripped = Selection::InlineFragment(InlineFragment {
            directives: strip_directive(&current.directives, DEFER),
            ..current.clone()
        });
        self.defer_node(stripped, &defer_directive, ctx, state)
    }

    fn transform_fragment_spread(
        &self,
        spread: &FragmentSpread,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        let Some(defer_directive) =
            find_directive(&spread.directives, DEFER).cloned()
        else {
            return Ok(Transformed::Keep);
        };

        let stripped = Selection::FragmentSpread(FragmentSpread {
            directives: strip_directive(&spread.directives, DEFER),
            ..spread.clone()
        });
        self.defer_node(stripped, &defer_directive, ctx, state)
    }
}

impl DeferStreamTransform<'_> {
    fn defer_node(
        &self,
        stripped: Selection,
        defer_directive: &DirectiveAnnotation,
        ctx: &TraversalContext<'_>,
        state: &mut DeferStreamState,
    ) -> TransformResult {
        let if_arg = match self.check_if_argument(defer_directive)? {
            IfOutcome::Honor(if_arg) => if_arg,
            IfOutcome::StripOnly => return Ok(Transformed::Replace(stripped)),
        };

        let label =
            derive_label(state, ctx.document_name(), DEFER, defer_directive)?;

        Ok(Transformed::Replace(Selection::Defer(Defer {
            if_arg,
            label,
            loc: defer_directive.loc.to_derived(),
            selections: vec![stripped],
        })))
    }

    fn check_if_argument(
        &self,
        directive: &DirectiveAnnotation,
    ) -> Result<IfOutcome, Vec<UserError>> {
        let if_arg = directive.argument("if");

        if self.flags.enable_incremental_delivery {
            if if_arg.map(|arg| arg.value.is_literal_false()).unwrap_or(false) {
                return Ok(IfOutcome::StripOnly);
            }
            return Ok(IfOutcome::Honor(if_arg.map(|arg| arg.value.clone())));
        }

        match if_arg.map(|arg| &arg.value) {
            Some(value @ Value::Variable(variable_name))
                if variable_name.as_str() == INCREMENTAL_DELIVERY_VARIABLE_NAME =>
            {
                Ok(IfOutcome::Honor(Some(value.clone())))
            },

            _ => Err(vec![UserError::IncrementalDeliveryIfArgument {
                directive_name: directive.name.clone(),
                variable_name: INCREMENTAL_DELIVERY_VARIABLE_NAME.to_string(),
                location: if_arg
                    .map(|arg| arg.loc.clone())
                    .unwrap_or_else(|| directive.loc.clone()),
            }]),
        }
    }
}

/// Derive the unique branch label from (document name, directive kind,
/// optional literal suffix), rejecting collisions within the document.
fn derive_label(
    state: &mut DeferStreamState,
    document_name: &str,
    kind: &str,
    directive: &DirectiveAnnotation,
) -> Result<String, Vec<UserError>> {
    let suffix = match directive.argument_value("label") {
        Some(value) => match value.as_literal_str() {
            Some(suffix) => Some(suffix),
            None => {
                return Err(vec![UserError::ExpectedStringLiteralArgument {
                    argument_name: "label".to_string(),
                    directive_name: directive.name.clone(),
                    location: directive.loc.clone(),
                }]);
            },
        },
        None => None,
    };

    let label = match suffix {
        Some(suffix) => format!("{document_name}${kind}${suffix}"),
        None => format!("{document_name}${kind}"),
    };

    if let Some(first) = state.labels.get(label.as_str()) {
        return Err(vec![UserError::DuplicateIncrementalLabel {
            label,
            first: first.clone(),
            second: directive.loc.clone(),
        }]);
    }
    state.labels.insert(label.clone(), directive.loc.clone());

    Ok(label)
}
