use crate::ast;
use crate::errors::DiagnosticsResult;
use crate::errors::UserError;
use crate::ir::Argument;
use crate::ir::DirectiveAnnotation;
use crate::ir::Document;
use crate::ir::Fragment;
use crate::ir::FragmentSpread;
use crate::ir::InlineFragment;
use crate::ir::LinkedField;
use crate::ir::Metadata;
use crate::ir::Operation;
use crate::ir::OperationKind;
use crate::ir::ScalarField;
use crate::ir::Selection;
use crate::ir::Value;
use crate::ir::VariableDefinition;
use crate::loc;
use crate::schema::Schema;
use crate::schema::TypeAnnotation;
use std::path::Path;

/// Lowers `graphql-parser` executable documents into raw IR documents,
/// resolving every field against the schema as it goes.
///
/// The output is "raw" in the sense that no semantic pass has run yet:
/// compiler directives are still plain [`DirectiveAnnotation`]s.
#[derive(Debug)]
pub struct IrBuilder<'schema> {
    schema: &'schema Schema,
}
impl<'schema> IrBuilder<'schema> {
    pub fn new(schema: &'schema Schema) -> Self {
        Self { schema }
    }

    /// Parse `content` and lower every definition in it. All diagnostics
    /// across all definitions are collected before failing.
    pub fn build_from_str(
        &self,
        content: &str,
        file_path: Option<&Path>,
    ) -> DiagnosticsResult<Vec<Document>> {
        let ast_doc = ast::operation::parse(content).map_err(|err| {
            vec![UserError::DocumentParseError {
                message: err.to_string(),
                location: loc::SourceLocation::Source(loc::FilePosition {
                    col: 1,
                    file: file_path.map(|p| p.to_path_buf()),
                    line: 1,
                }),
            }]
        })?;

        let mut documents = vec![];
        let mut errors = vec![];
        for def in &ast_doc.definitions {
            match self.build_definition(def, file_path) {
                Ok(document) => documents.push(document),
                Err(errs) => errors.extend(errs),
            }
        }

        if errors.is_empty() {
            Ok(documents)
        } else {
            Err(errors)
        }
    }

    fn build_definition(
        &self,
        def: &ast::operation::Definition,
        file_path: Option<&Path>,
    ) -> DiagnosticsResult<Document> {
        use ast::operation::Definition;
        use ast::operation::OperationDefinition as OpDef;
        match def {
            Definition::Fragment(frag_def) =>
                self.build_fragment(frag_def, file_path),

            // The no-name shorthand: artifact names come from operation
            // names, so it is rejected rather than defaulted.
            Definition::Operation(OpDef::SelectionSet(sel_set)) =>
                Err(vec![UserError::AnonymousOperation {
                    location: loc::SourceLocation::from_ast_position(
                        file_path,
                        &sel_set.span.0,
                    ),
                }]),

            Definition::Operation(OpDef::Query(op)) => self.build_operation(
                OperationKind::Query,
                op.name.as_deref(),
                &op.position,
                &op.variable_definitions,
                &op.directives,
                &op.selection_set,
                file_path,
            ),

            Definition::Operation(OpDef::Mutation(op)) => self.build_operation(
                OperationKind::Mutation,
                op.name.as_deref(),
                &op.position,
                &op.variable_definitions,
                &op.directives,
                &op.selection_set,
                file_path,
            ),

            Definition::Operation(OpDef::Subscription(op)) => self.build_operation(
                OperationKind::Subscription,
                op.name.as_deref(),
                &op.position,
                &op.variable_definitions,
                &op.directives,
                &op.selection_set,
                file_path,
            ),
        }
    }

    fn build_fragment(
        &self,
        frag_def: &ast::operation::FragmentDefinition,
        file_path: Option<&Path>,
    ) -> DiagnosticsResult<Document> {
        let frag_loc = loc::SourceLocation::from_ast_position(
            file_path,
            &frag_def.position,
        );
        let ast::operation::TypeCondition::On(type_condition) =
            &frag_def.type_condition;

        if self.schema.type_named(type_condition).is_none() {
            return Err(vec![UserError::UnknownType {
                type_name: type_condition.to_string(),
                location: frag_loc,
            }]);
        }

        let selections = self.build_selection_set(
            &frag_def.selection_set,
            type_condition,
            file_path,
        )?;

        Ok(Document::Fragment(Fragment {
            directives: convert_directives(&frag_def.directives, file_path),
            loc: frag_loc,
            metadata: Metadata::new(),
            name: frag_def.name.to_string(),
            selections,
            type_condition: type_condition.to_string(),
        }))
    }

    #[allow(clippy::too_many_arguments)]
    fn build_operation(
        &self,
        kind: OperationKind,
        name: Option<&str>,
        position: &graphql_parser::Pos,
        variable_definitions: &[ast::operation::VariableDefinition],
        directives: &[ast::operation::Directive],
        selection_set: &ast::operation::SelectionSet,
        file_path: Option<&Path>,
    ) -> DiagnosticsResult<Document> {
        let op_loc = loc::SourceLocation::from_ast_position(file_path, position);

        let Some(name) = name else {
            return Err(vec![UserError::AnonymousOperation { location: op_loc }]);
        };

        let type_name = match kind {
            OperationKind::Query => Some(self.schema.query_type_name()),
            OperationKind::Mutation => self.schema.mutation_type_name(),
            OperationKind::Subscription => self.schema.subscription_type_name(),
        };
        let Some(type_name) = type_name else {
            // A mutation/subscription written against a schema that defines
            // no such root type.
            return Err(vec![UserError::UnknownType {
                type_name: match kind {
                    OperationKind::Mutation => "Mutation".to_string(),
                    _ => "Subscription".to_string(),
                },
                location: op_loc,
            }]);
        };

        let mut errors = vec![];
        let mut var_defs = vec![];
        for ast_var_def in variable_definitions {
            let vardef_loc = loc::SourceLocation::from_ast_position(
                file_path,
                &ast_var_def.position,
            );
            let type_annotation = TypeAnnotation::from_ast_type(&ast_var_def.var_type);

            if self.schema.type_named(type_annotation.raw_type_name()).is_none() {
                errors.push(UserError::UnknownType {
                    type_name: type_annotation.raw_type_name().to_string(),
                    location: vardef_loc,
                });
                continue;
            }

            var_defs.push(VariableDefinition {
                default_value: ast_var_def
                    .default_value
                    .as_ref()
                    .map(Value::from_ast),
                loc: vardef_loc,
                name: ast_var_def.name.to_string(),
                type_annotation,
            });
        }

        let selections =
            match self.build_selection_set(selection_set, type_name, file_path) {
                Ok(selections) => selections,
                Err(errs) => {
                    errors.extend(errs);
                    return Err(errors);
                },
            };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Document::Operation(Operation {
            directives: convert_directives(directives, file_path),
            kind,
            loc: op_loc,
            metadata: Metadata::new(),
            name: name.to_string(),
            selections,
            type_name: type_name.to_string(),
            variable_definitions: var_defs,
        }))
    }

    fn build_selection_set(
        &self,
        selection_set: &ast::operation::SelectionSet,
        parent_type_name: &str,
        file_path: Option<&Path>,
    ) -> DiagnosticsResult<Vec<Selection>> {
        let mut errors = vec![];
        let mut selections = vec![];

        for ast_selection in &selection_set.items {
            match self.build_selection(ast_selection, parent_type_name, file_path) {
                Ok(selection) => selections.push(selection),
                Err(errs) => errors.extend(errs),
            }
        }

        if errors.is_empty() {
            Ok(selections)
        } else {
            Err(errors)
        }
    }

    fn build_selection(
        &self,
        ast_selection: &ast::operation::Selection,
        parent_type_name: &str,
        file_path: Option<&Path>,
    ) -> DiagnosticsResult<Selection> {
        use ast::operation::Selection as AstSelection;
        match ast_selection {
            AstSelection::Field(field) =>
                self.build_field(field, parent_type_name, file_path),

            AstSelection::FragmentSpread(spread) => {
                Ok(Selection::FragmentSpread(FragmentSpread {
                    arguments: vec![],
                    directives: convert_directives(&spread.directives, file_path),
                    fragment_name: spread.fragment_name.to_string(),
                    loc: loc::SourceLocation::from_ast_position(
                        file_path,
                        &spread.position,
                    ),
                }))
            },

            AstSelection::InlineFragment(inline) => {
                let inline_loc = loc::SourceLocation::from_ast_position(
                    file_path,
                    &inline.position,
                );
                let type_condition = inline.type_condition.as_ref().map(
                    |ast::operation::TypeCondition::On(name)| name.to_string(),
                );

                let child_parent_type = match &type_condition {
                    Some(name) => {
                        if self.schema.type_named(name).is_none() {
                            return Err(vec![UserError::UnknownType {
                                type_name: name.to_string(),
                                location: inline_loc,
                            }]);
                        }
                        name.as_str()
                    },
                    None => parent_type_name,
                };

                let selections = self.build_selection_set(
                    &inline.selection_set,
                    child_parent_type,
                    file_path,
                )?;

                Ok(Selection::InlineFragment(InlineFragment {
                    directives: convert_directives(&inline.directives, file_path),
                    loc: inline_loc,
                    selections,
                    type_condition,
                }))
            },
        }
    }

    fn build_field(
        &self,
        field: &ast::operation::Field,
        parent_type_name: &str,
        file_path: Option<&Path>,
    ) -> DiagnosticsResult<Selection> {
        let field_loc =
            loc::SourceLocation::from_ast_position(file_path, &field.position);

        let Some(field_def) = self.schema.field(parent_type_name, &field.name)
        else {
            return Err(vec![UserError::UnknownField {
                type_name: parent_type_name.to_string(),
                field_name: field.name.to_string(),
                location: field_loc,
            }]);
        };

        let type_annotation = field_def.type_annotation.clone();
        let raw_type_name = type_annotation.raw_type_name();
        let is_composite = self
            .schema
            .type_named(raw_type_name)
            .map(|t| t.is_composite())
            .unwrap_or(false);

        let arguments = convert_arguments(&field.arguments, &field_loc);
        let directives = convert_directives(&field.directives, file_path);

        if is_composite {
            if field.selection_set.items.is_empty() {
                return Err(vec![UserError::FieldMissingCompositeSelections {
                    field_name: field.name.to_string(),
                    location: field_loc,
                }]);
            }

            let selections = self.build_selection_set(
                &field.selection_set,
                raw_type_name,
                file_path,
            )?;

            Ok(Selection::LinkedField(LinkedField {
                alias: field.alias.as_ref().map(|a| a.to_string()),
                arguments,
                directives,
                handles: vec![],
                loc: field_loc,
                name: field.name.to_string(),
                selections,
                storage_key: None,
                type_annotation,
            }))
        } else {
            if !field.selection_set.items.is_empty() {
                return Err(vec![UserError::SelectionsOnScalarField {
                    field_name: field.name.to_string(),
                    location: field_loc,
                }]);
            }

            Ok(Selection::ScalarField(ScalarField {
                alias: field.alias.as_ref().map(|a| a.to_string()),
                arguments,
                directives,
                loc: field_loc,
                name: field.name.to_string(),
                storage_key: None,
                type_annotation,
            }))
        }
    }
}

fn convert_directives(
    directives: &[ast::operation::Directive],
    file_path: Option<&Path>,
) -> Vec<DirectiveAnnotation> {
    directives
        .iter()
        .map(|ast_directive| {
            let directive_loc = loc::SourceLocation::from_ast_position(
                file_path,
                &ast_directive.position,
            );
            DirectiveAnnotation {
                arguments: convert_arguments(&ast_directive.arguments, &directive_loc),
                loc: directive_loc,
                name: ast_directive.name.to_string(),
            }
        })
        .collect()
}

fn convert_arguments(
    arguments: &[(String, ast::operation::Value)],
    loc: &loc::SourceLocation,
) -> Vec<Argument> {
    arguments
        .iter()
        .map(|(name, ast_value)| Argument {
            loc: loc.clone(),
            name: name.to_string(),
            value: Value::from_ast(ast_value),
        })
        .collect()
}
