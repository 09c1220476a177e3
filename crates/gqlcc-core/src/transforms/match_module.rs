use crate::errors::DiagnosticsResult;
use crate::errors::UserError;
use crate::feature_flags::FeatureFlags;
use crate::ir::Argument;
use crate::ir::ConstantValue;
use crate::ir::Document;
use crate::ir::FragmentSpread;
use crate::ir::InlineFragment;
use crate::ir::LinkedField;
use crate::ir::ModuleImport;
use crate::ir::ScalarField;
use crate::ir::Selection;
use crate::ir::Value;
use crate::ir::find_directive;
use crate::ir::strip_directive;
use crate::loc;
use crate::schema::GraphQLType;
use crate::schema::TypeAnnotation;
use crate::store::DocumentStore;
use crate::transform::Transform;
use crate::transform::TransformResult;
use crate::transform::Transformed;
use crate::transform::TraversalContext;
use crate::transform::transform_documents;
use indexmap::IndexMap;

const MATCH: &str = "match";
const MODULE: &str = "module";
const SUPPORTED_ARGUMENT_NAME: &str = "supported";
const JS_FIELD_NAME: &str = "js";
const JS_FIELD_ARG: &str = "module";
const JS_FIELD_TYPE: &str = "JSDependency";
const MODULE_COMPONENT_ALIAS: &str = "__module_component";
const MODULE_OPERATION_ALIAS: &str = "__module_operation";

/// Rewrites `@module` fragment spreads into [`ModuleImport`]s and `@match`
/// fields into plain fields carrying a literal `supported` argument.
pub fn transform(
    store: &DocumentStore,
    _flags: &FeatureFlags,
) -> DiagnosticsResult<DocumentStore> {
    transform_documents(store, &MatchTransform)
}

struct MatchTransform;

impl Transform for MatchTransform {
    type State = ();

    fn name(&self) -> &'static str {
        "match-module"
    }

    fn initial_state(&self, _document: &Document) -> Self::State {}

    fn transform_scalar_field(
        &self,
        field: &ScalarField,
        ctx: &TraversalContext<'_>,
        _state: &mut Self::State,
    ) -> TransformResult {
        // Synthesized module selections are aliased `js` fields themselves;
        // they carry a storage key and are exempt.
        if field.name == JS_FIELD_NAME && field.storage_key.is_none() {
            let js_type = ctx.schema().server_type_named(JS_FIELD_TYPE);
            if matches!(js_type, Some(GraphQLType::Scalar(_)))
                && field.type_annotation.raw_type_name() == JS_FIELD_TYPE
            {
                return Err(vec![UserError::DirectJsFieldUse {
                    location: field.loc.clone(),
                }]);
            }
        }
        Ok(Transformed::Keep)
    }

    // Lower `@module` on a spread into an inline fragment holding a
    // ModuleImport.
    fn transform_fragment_spread(
        &self,
        spread: &FragmentSpread,
        ctx: &TraversalContext<'_>,
        _state: &mut Self::State,
    ) -> TransformResult {
        let Some(module_directive) = find_directive(&spread.directives, MODULE)
        else {
            return Ok(Transformed::Keep);
        };

        if let Some(first_argument) = spread.arguments.first() {
            return Err(vec![UserError::ModuleWithArguments {
                location: first_argument.loc.clone(),
            }]);
        }

        let schema = ctx.schema();
        let js_type = schema.server_type_named(JS_FIELD_TYPE);
        if !matches!(js_type, Some(GraphQLType::Scalar(_))) {
            return Err(vec![UserError::ModuleMissingJsDependencyType {
                location: module_directive.loc.clone(),
            }]);
        }

        let fragment = ctx
            .store()
            .fragment(&spread.fragment_name, &spread.loc)
            .map_err(|err| vec![err])?;

        let fragment_type = schema.type_named(&fragment.type_condition);
        let Some(GraphQLType::Object(fragment_type)) = fragment_type else {
            return Err(vec![UserError::ModuleOnAbstractType {
                fragment_name: spread.fragment_name.clone(),
                type_string: fragment.type_condition.clone(),
                spread_location: spread.loc.clone(),
                fragment_location: fragment.loc.clone(),
            }]);
        };

        let js_field = fragment_type.fields.get(JS_FIELD_NAME);
        let js_field_ok = js_field
            .map(|field_def| {
                let module_arg_ok = field_def
                    .argument(JS_FIELD_ARG)
                    .map(|arg| {
                        matches!(
                            &arg.type_annotation,
                            TypeAnnotation::Named { name, .. } if name == "String",
                        )
                    })
                    .unwrap_or(false);
                let return_type_ok = matches!(
                    &field_def.type_annotation,
                    TypeAnnotation::Named { name, .. } if name == JS_FIELD_TYPE,
                );
                module_arg_ok && return_type_ok
            })
            .unwrap_or(false);
        if !js_field_ok {
            return Err(vec![UserError::ModuleFragmentMissingJsField {
                fragment_name: spread.fragment_name.clone(),
                type_name: fragment.type_condition.clone(),
                location: module_directive.loc.clone(),
            }]);
        }

        if spread.directives.len() != 1 {
            return Err(vec![UserError::ModuleWithAdditionalDirectives {
                fragment_name: spread.fragment_name.clone(),
                location: spread.loc.clone(),
            }]);
        }

        let Some(module_name) = module_directive
            .argument_value("name")
            .and_then(|value| value.as_literal_str())
        else {
            return Err(vec![UserError::ExpectedStringLiteralArgument {
                argument_name: "name".to_string(),
                directive_name: MODULE.to_string(),
                location: module_directive.loc.clone(),
            }]);
        };

        let normalization_name =
            format!("{}$normalization.graphql", spread.fragment_name);
        let js_type_annotation = TypeAnnotation::named(JS_FIELD_TYPE, true);

        let component_field = synthetic_js_field(
            MODULE_COMPONENT_ALIAS,
            module_name,
            &js_type_annotation,
            &module_directive.loc,
        );
        let operation_field = synthetic_js_field(
            MODULE_OPERATION_ALIAS,
            normalization_name.as_str(),
            &js_type_annotation,
            &module_directive.loc,
        );

        let stripped_spread = FragmentSpread {
            directives: strip_directive(&spread.directives, MODULE),
            ..spread.clone()
        };

        Ok(Transformed::Replace(Selection::InlineFragment(InlineFragment {
            directives: vec![],
            loc: module_directive.loc.to_derived(),
            selections: vec![
                Selection::ModuleImport(ModuleImport {
                    fragment_name: spread.fragment_name.clone(),
                    loc: module_directive.loc.to_derived(),
                    module: module_name.to_string(),
                    selections: vec![
                        Selection::FragmentSpread(stripped_spread),
                        Selection::ScalarField(operation_field),
                    ],
                }),
                Selection::ScalarField(component_field),
            ],
            type_condition: Some(fragment.type_condition.clone()),
        })))
    }

    // Lower `@match` on a field whose sub-selections are (by now) lowered
    // `@module` inline fragments.
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

        if find_directive(&current.directives, MATCH).is_none() {
            return Ok(traversed);
        }

        let schema = ctx.schema();
        let parent_type = schema.type_named(ctx.parent_type_name());
        let parent_is_valid = matches!(
            parent_type,
            Some(GraphQLType::Interface(_)) | Some(GraphQLType::Object(_)),
        );
        if !parent_is_valid {
            return Err(vec![UserError::MatchInvalidParentType {
                field_name: current.name.clone(),
                type_string: ctx.parent_type_name().to_string(),
                location: field.loc.clone(),
            }]);
        }

        let field_def = schema.field(ctx.parent_type_name(), &current.name);
        let supported_ok = field_def
            .and_then(|field_def| field_def.argument(SUPPORTED_ARGUMENT_NAME))
            .map(|arg| match &arg.type_annotation {
                TypeAnnotation::List { inner, .. } => matches!(
                    inner.as_ref(),
                    TypeAnnotation::Named { name, .. } if name == "String",
                ),
                TypeAnnotation::Named { .. } => false,
            })
            .unwrap_or(false);
        if !supported_ok {
            return Err(vec![UserError::MatchFieldMissingSupportedArgument {
                field_name: current.name.clone(),
                location: field.loc.clone(),
            }]);
        }

        let raw_field_type = schema.type_named(current.type_annotation.raw_type_name());
        let Some(raw_field_type) = raw_field_type.filter(|t| t.is_abstract()) else {
            return Err(vec![UserError::MatchFieldMustReturnAbstractType {
                field_name: current.name.clone(),
                location: field.loc.clone(),
            }]);
        };

        let possible_type_names: Vec<&str> = schema
            .possible_types(raw_field_type)
            .into_iter()
            .map(|t| t.name())
            .collect();

        let mut seen_types: IndexMap<String, loc::SourceLocation> = IndexMap::new();
        let mut type_to_selection: IndexMap<String, (String, String)> =
            IndexMap::new();

        for match_selection in &current.selections {
            let inline = match match_selection {
                Selection::InlineFragment(inline) => inline,
                other => {
                    return Err(vec![UserError::MatchInvalidSelection {
                        locations: vec![other.loc().clone()],
                    }]);
                },
            };
            let module_import = match inline.selections.first() {
                Some(Selection::ModuleImport(module_import)) => module_import,
                _ => {
                    return Err(vec![UserError::MatchInvalidSelection {
                        locations: vec![inline.loc.clone()],
                    }]);
                },
            };
            let Some(matched_type) = inline.type_condition.as_deref() else {
                return Err(vec![UserError::MatchInvalidSelection {
                    locations: vec![inline.loc.clone()],
                }]);
            };

            if let Some(first) = seen_types.get(matched_type) {
                return Err(vec![UserError::MatchDuplicateTypeCondition {
                    abstract_type: raw_field_type.name().to_string(),
                    type_name: matched_type.to_string(),
                    first: first.clone(),
                    second: inline.loc.clone(),
                }]);
            }
            seen_types.insert(matched_type.to_string(), inline.loc.clone());

            if !possible_type_names.contains(&matched_type) {
                let suggestions = if possible_type_names.is_empty() {
                    "but no concrete types are defined".to_string()
                } else {
                    format!(
                        "expected one of {}, etc.",
                        possible_type_names
                            .iter()
                            .take(3)
                            .map(|name| format!("'{name}'"))
                            .collect::<Vec<_>>()
                            .join(", "),
                    )
                };
                return Err(vec![UserError::MatchTypeNotAMember {
                    field_type: current.type_annotation.raw_type_name().to_string(),
                    type_name: matched_type.to_string(),
                    suggestions,
                    locations: vec![inline.loc.clone()],
                }]);
            }

            type_to_selection.insert(
                matched_type.to_string(),
                (module_import.fragment_name.clone(), module_import.module.clone()),
            );
        }

        // Storage keys sort their `fragment:component` pairs by type name so
        // the cache key is order-independent.
        let mut stable_args: Vec<String> = vec![];
        let mut sorted_type_names: Vec<&String> = type_to_selection.keys().collect();
        sorted_type_names.sort();
        for type_name in sorted_type_names {
            let (fragment, component) = &type_to_selection[type_name.as_str()];
            stable_args.push(format!("{fragment}:{component}"));
        }
        let storage_key =
            format!("{}({})", current.alias_or_name(), stable_args.join(","));

        let supported_value = Value::List(
            seen_types
                .keys()
                .map(|name| Value::Literal(ConstantValue::String(name.clone())))
                .collect(),
        );

        Ok(Transformed::Replace(Selection::LinkedField(LinkedField {
            alias: current.alias.clone(),
            arguments: vec![Argument {
                loc: field.loc.clone(),
                name: SUPPORTED_ARGUMENT_NAME.to_string(),
                value: supported_value,
            }],
            directives: vec![],
            handles: vec![],
            loc: current.loc.clone(),
            name: current.name.clone(),
            selections: current.selections.clone(),
            storage_key: Some(storage_key),
            type_annotation: current.type_annotation.clone(),
        })))
    }
}

fn synthetic_js_field(
    alias: &str,
    module_value: &str,
    type_annotation: &TypeAnnotation,
    directive_loc: &loc::SourceLocation,
) -> ScalarField {
    ScalarField {
        alias: Some(alias.to_string()),
        arguments: vec![Argument {
            loc: directive_loc.clone(),
            name: JS_FIELD_ARG.to_string(),
            value: Value::Literal(ConstantValue::String(module_value.to_string())),
        }],
        directives: vec![],
        loc: directive_loc.to_derived(),
        name: JS_FIELD_NAME.to_string(),
        storage_key: Some(alias.to_string()),
        type_annotation: type_annotation.clone(),
    }
}
