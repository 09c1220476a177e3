mod graphql_type;
#[allow(clippy::module_inception)]
mod schema;
mod schema_builder;
mod type_annotation;

pub use graphql_type::ArgumentDef;
pub use graphql_type::EnumTypeDef;
pub use graphql_type::FieldDef;
pub use graphql_type::GraphQLType;
pub use graphql_type::InputObjectTypeDef;
pub use graphql_type::InterfaceTypeDef;
pub use graphql_type::ObjectTypeDef;
pub use graphql_type::ScalarTypeDef;
pub use graphql_type::UnionTypeDef;
pub use schema::Schema;
pub use schema_builder::SchemaBuildError;
pub use schema_builder::SchemaBuilder;
pub use type_annotation::TypeAnnotation;

#[cfg(test)]
mod tests;
