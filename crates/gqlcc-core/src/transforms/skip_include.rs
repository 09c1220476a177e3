use crate::errors::DiagnosticsResult;
use crate::errors::UserError;
use crate::feature_flags::FeatureFlags;
use crate::ir::Condition;
use crate::ir::ConstantValue;
use crate::ir::DirectiveAnnotation;
use crate::ir::Document;
use crate::ir::FragmentSpread;
use crate::ir::InlineFragment;
use crate::ir::LinkedField;
use crate::ir::ScalarField;
use crate::ir::Selection;
use crate::ir::Value;
use crate::store::DocumentStore;
use crate::transform::Transform;
use crate::transform::TransformResult;
use crate::transform::Transformed;
use crate::transform::TraversalContext;
use crate::transform::transform_documents;

const INCLUDE: &str = "include";
const SKIP: &str = "skip";

/// Lowers `@include`/`@skip` into [`Condition`] nodes.
///
/// Statically-decided literals never reach the runtime: a passing literal
/// just strips the directive, a failing literal deletes the node outright.
pub fn transform(
    store: &DocumentStore,
    _flags: &FeatureFlags,
) -> DiagnosticsResult<DocumentStore> {
    transform_documents(store, &SkipIncludeTransform)
}

struct SkipIncludeTransform;

impl Transform for SkipIncludeTransform {
    type State = ();

    fn name(&self) -> &'static str {
        "skip-include"
    }

    fn initial_state(&self, _document: &Document) -> Self::State {}

    fn transform_scalar_field(
        &self,
        field: &ScalarField,
        _ctx: &TraversalContext<'_>,
        _state: &mut Self::State,
    ) -> TransformResult {
        if !has_condition_directive(&field.directives) {
            return Ok(Transformed::Keep);
        }
        let stripped = Selection::ScalarField(ScalarField {
            directives: strip_condition_directives(&field.directives),
            ..field.clone()
        });
        apply_conditions(stripped, &field.directives)
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
        if !has_condition_directive(&current.directives) {
            return Ok(traversed);
        }
        let stripped = Selection::LinkedField(LinkedField {
            directives: strip_condition_directives(&current.directives),
            ..current.clone()
        });
        apply_conditions(stripped, &current.directives)
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
        if !has_condition_directive(&current.directives) {
            return Ok(traversed);
        }
        let stripped = Selection::InlineFragment(InlineFragment {
            directives: strip_condition_directives(&current.directives),
            ..current.clone()
        });
        apply_conditions(stripped, &current.directives)
    }

    fn transform_fragment_spread(
        &self,
        spread: &FragmentSpread,
        _ctx: &TraversalContext<'_>,
        _state: &mut Self::State,
    ) -> TransformResult {
        if !has_condition_directive(&spread.directives) {
            return Ok(Transformed::Keep);
        }
        let stripped = Selection::FragmentSpread(FragmentSpread {
            directives: strip_condition_directives(&spread.directives),
            ..spread.clone()
        });
        apply_conditions(stripped, &spread.directives)
    }
}

fn has_condition_directive(directives: &[DirectiveAnnotation]) -> bool {
    directives
        .iter()
        .any(|directive| directive.name == INCLUDE || directive.name == SKIP)
}

fn strip_condition_directives(
    directives: &[DirectiveAnnotation],
) -> Vec<DirectiveAnnotation> {
    directives
        .iter()
        .filter(|directive| directive.name != INCLUDE && directive.name != SKIP)
        .cloned()
        .collect()
}

/// Wrap `node` in one [`Condition`] per variable-bound `@include`/`@skip`,
/// innermost-first. Literal conditions are decided here instead.
fn apply_conditions(
    node: Selection,
    directives: &[DirectiveAnnotation],
) -> TransformResult {
    let mut current = node;

    for directive in directives {
        let passing_value = match directive.name.as_str() {
            INCLUDE => true,
            SKIP => false,
            _ => continue,
        };

        let Some(if_value) = directive.argument_value("if") else {
            return Err(vec![UserError::ConditionMissingIfArgument {
                directive_name: directive.name.clone(),
                location: directive.loc.clone(),
            }]);
        };

        match if_value {
            Value::Literal(ConstantValue::Bool(value)) => {
                if *value != passing_value {
                    return Ok(Transformed::Delete);
                }
                // A passing literal: the directive is already stripped.
            },

            Value::Variable(_) => {
                current = Selection::Condition(Condition {
                    loc: directive.loc.to_derived(),
                    passing_value,
                    selections: vec![current],
                    value: if_value.clone(),
                });
            },

            _ => {
                return Err(vec![UserError::ConditionMissingIfArgument {
                    directive_name: directive.name.clone(),
                    location: directive.loc.clone(),
                }]);
            },
        }
    }

    Ok(Transformed::Replace(current))
}
