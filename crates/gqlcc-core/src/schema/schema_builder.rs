use crate::ast;
use crate::file_reader;
use crate::loc;
use crate::schema::ArgumentDef;
use crate::schema::EnumTypeDef;
use crate::schema::FieldDef;
use crate::schema::GraphQLType;
use crate::schema::InputObjectTypeDef;
use crate::schema::InterfaceTypeDef;
use crate::schema::ObjectTypeDef;
use crate::schema::ScalarTypeDef;
use crate::schema::Schema;
use crate::schema::TypeAnnotation;
use crate::schema::UnionTypeDef;
use crate::schema::schema::make_meta_field;
use indexmap::IndexMap;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

type Result<T> = std::result::Result<T, Box<SchemaBuildError>>;

/// Utility for building a [`Schema`] from SDL text.
///
/// Server SDL is loaded first; client schema-extension SDL (types that only
/// exist in the client's cache) is layered on afterwards with
/// [`SchemaBuilder::add_client_types_str`].
#[derive(Debug)]
pub struct SchemaBuilder {
    client_types: IndexMap<String, GraphQLType>,
    mutation_type_name: Option<String>,
    query_type_name: Option<String>,
    subscription_type_name: Option<String>,
    types: IndexMap<String, GraphQLType>,
}
impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            client_types: IndexMap::new(),
            mutation_type_name: None,
            query_type_name: None,
            subscription_type_name: None,
            types: IndexMap::new(),
        }
    }

    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();
        let content = file_reader::read_content(file_path)
            .map_err(|err| SchemaBuildError::SchemaFileReadError(Box::new(err)))?;
        Self::from_str(Some(file_path.to_path_buf()), content.as_str())
    }

    pub fn from_str(
        file_path: Option<PathBuf>,
        content: &str,
    ) -> Result<Self> {
        let mut builder = Self::new();
        builder.load_content(file_path, content, /* client = */ false)?;
        Ok(builder)
    }

    /// Layer client schema-extension SDL over the server types.
    pub fn add_client_types_str(
        &mut self,
        file_path: Option<PathBuf>,
        content: &str,
    ) -> Result<()> {
        self.load_content(file_path, content, /* client = */ true)
    }

    pub fn build(self) -> Result<Schema> {
        let query_type_name = match self.query_type_name {
            Some(name) => name,
            None if self.types.contains_key("Query") => "Query".to_string(),
            None => return Err(SchemaBuildError::NoQueryTypeDefined)?,
        };

        let mutation_type_name = self.mutation_type_name.or_else(|| {
            self.types.contains_key("Mutation").then(|| "Mutation".to_string())
        });
        let subscription_type_name = self.subscription_type_name.or_else(|| {
            self.types
                .contains_key("Subscription")
                .then(|| "Subscription".to_string())
        });

        Ok(Schema {
            client_types: self.client_types,
            id_meta_field: make_meta_field("__id", "ID"),
            mutation_type_name,
            query_type_name,
            server_types: self.types,
            subscription_type_name,
            typename_meta_field: make_meta_field("__typename", "String"),
        })
    }

    fn load_content(
        &mut self,
        file_path: Option<PathBuf>,
        content: &str,
        client: bool,
    ) -> Result<()> {
        let doc = ast::schema::parse(content)
            .map_err(|err| SchemaBuildError::SchemaParseError {
                file: file_path.to_owned(),
                message: err.to_string(),
            })?;

        for def in doc.definitions {
            self.visit_definition(file_path.as_deref(), def, client)?;
        }

        Ok(())
    }

    fn visit_definition(
        &mut self,
        file_path: Option<&Path>,
        def: ast::schema::Definition,
        client: bool,
    ) -> Result<()> {
        use ast::schema::Definition;
        match def {
            Definition::SchemaDefinition(schema_def) => {
                self.query_type_name = schema_def.query.or(self.query_type_name.take());
                self.mutation_type_name =
                    schema_def.mutation.or(self.mutation_type_name.take());
                self.subscription_type_name =
                    schema_def.subscription.or(self.subscription_type_name.take());
                Ok(())
            },

            Definition::TypeDefinition(type_def) => {
                let graphql_type = convert_type_definition(file_path, type_def);
                self.add_type(graphql_type, client)
            },

            // Directive definitions carry no information the compiler needs
            // beyond the directives it already knows; type extensions are
            // handled by the client-extension overlay instead.
            Definition::DirectiveDefinition(_) => Ok(()),
            Definition::TypeExtension(_) => Ok(()),
        }
    }

    fn add_type(&mut self, graphql_type: GraphQLType, client: bool) -> Result<()> {
        let name = graphql_type.name().to_string();
        let existing = self
            .types
            .get(name.as_str())
            .or_else(|| self.client_types.get(name.as_str()));

        if let Some(conflicting_type) = existing {
            return Err(SchemaBuildError::DuplicateTypeDefinition {
                type_name: name,
                def1: conflicting_type.def_location().clone(),
                def2: graphql_type.def_location().clone(),
            })?;
        }

        if client {
            self.client_types.insert(name, graphql_type);
        } else {
            self.types.insert(name, graphql_type);
        }
        Ok(())
    }
}
impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn convert_type_definition(
    file_path: Option<&Path>,
    type_def: ast::schema::TypeDefinition,
) -> GraphQLType {
    use ast::schema::TypeDefinition;
    match type_def {
        TypeDefinition::Enum(enum_type) => GraphQLType::Enum(EnumTypeDef {
            def_location: loc::SourceLocation::from_ast_position(
                file_path,
                &enum_type.position,
            ),
            name: enum_type.name,
            values: enum_type.values.into_iter().map(|v| v.name).collect(),
        }),

        TypeDefinition::InputObject(input_type) => {
            GraphQLType::InputObject(InputObjectTypeDef {
                def_location: loc::SourceLocation::from_ast_position(
                    file_path,
                    &input_type.position,
                ),
                fields: input_type
                    .fields
                    .into_iter()
                    .map(|field| {
                        (field.name, TypeAnnotation::from_ast_type(&field.value_type))
                    })
                    .collect(),
                name: input_type.name,
            })
        },

        TypeDefinition::Interface(iface_type) => {
            GraphQLType::Interface(InterfaceTypeDef {
                def_location: loc::SourceLocation::from_ast_position(
                    file_path,
                    &iface_type.position,
                ),
                fields: convert_field_definitions(file_path, iface_type.fields),
                name: iface_type.name,
            })
        },

        TypeDefinition::Object(object_type) => GraphQLType::Object(ObjectTypeDef {
            def_location: loc::SourceLocation::from_ast_position(
                file_path,
                &object_type.position,
            ),
            fields: convert_field_definitions(file_path, object_type.fields),
            interfaces: object_type.implements_interfaces,
            name: object_type.name,
        }),

        TypeDefinition::Scalar(scalar_type) => GraphQLType::Scalar(ScalarTypeDef {
            def_location: loc::SourceLocation::from_ast_position(
                file_path,
                &scalar_type.position,
            ),
            name: scalar_type.name,
        }),

        TypeDefinition::Union(union_type) => GraphQLType::Union(UnionTypeDef {
            def_location: loc::SourceLocation::from_ast_position(
                file_path,
                &union_type.position,
            ),
            members: union_type.types,
            name: union_type.name,
        }),
    }
}

fn convert_field_definitions(
    file_path: Option<&Path>,
    fields: Vec<ast::schema::Field>,
) -> IndexMap<String, FieldDef> {
    fields
        .into_iter()
        .map(|field| {
            let field_def = FieldDef {
                arguments: field
                    .arguments
                    .into_iter()
                    .map(|arg| {
                        (arg.name.clone(), ArgumentDef {
                            name: arg.name,
                            type_annotation: TypeAnnotation::from_ast_type(
                                &arg.value_type,
                            ),
                        })
                    })
                    .collect(),
                def_location: loc::SourceLocation::from_ast_position(
                    file_path,
                    &field.position,
                ),
                name: field.name.clone(),
                type_annotation: TypeAnnotation::from_ast_type(&field.field_type),
            };
            (field.name, field_def)
        })
        .collect()
}

#[derive(Debug, Error)]
pub enum SchemaBuildError {
    #[error("Found multiple definitions for the type '{type_name}'")]
    DuplicateTypeDefinition {
        type_name: String,
        def1: loc::SourceLocation,
        def2: loc::SourceLocation,
    },

    #[error("The schema defines no query root type")]
    NoQueryTypeDefined,

    #[error("Failure while trying to read a schema file from disk")]
    SchemaFileReadError(Box<file_reader::ReadContentError>),

    #[error("Error parsing schema: {message}")]
    SchemaParseError {
        file: Option<PathBuf>,
        message: String,
    },
}
