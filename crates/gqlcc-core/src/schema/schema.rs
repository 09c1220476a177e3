use crate::loc;
use crate::schema::FieldDef;
use crate::schema::GraphQLType;
use crate::schema::TypeAnnotation;
use indexmap::IndexMap;

/// An immutable view over the server schema plus any client schema
/// extensions.
///
/// Lookups default to the client-extended view (server types shadowed by
/// nothing, extension types appended); passes that must reject client-only
/// types go through [`Schema::server_type_named`].
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub(super) client_types: IndexMap<String, GraphQLType>,
    pub(super) id_meta_field: FieldDef,
    pub(super) mutation_type_name: Option<String>,
    pub(super) query_type_name: String,
    pub(super) server_types: IndexMap<String, GraphQLType>,
    pub(super) subscription_type_name: Option<String>,
    pub(super) typename_meta_field: FieldDef,
}
impl Schema {
    /// Look a type up in the client-extended schema.
    pub fn type_named(&self, name: &str) -> Option<&GraphQLType> {
        self.server_types
            .get(name)
            .or_else(|| self.client_types.get(name))
    }

    /// Look a type up in the server schema only.
    pub fn server_type_named(&self, name: &str) -> Option<&GraphQLType> {
        self.server_types.get(name)
    }

    /// Resolve a field selectable on `type_name`, including the `__typename`
    /// and `__id` meta fields available on every composite type.
    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&FieldDef> {
        match field_name {
            "__typename" => Some(&self.typename_meta_field),
            "__id" => Some(&self.id_meta_field),
            _ => self.type_named(type_name)?.field(field_name),
        }
    }

    /// Concrete object types reachable from an abstract type: a union's
    /// members, or every object implementing an interface (in both the
    /// server and client-extended type maps).
    pub fn possible_types(&self, abstract_type: &GraphQLType) -> Vec<&GraphQLType> {
        match abstract_type {
            GraphQLType::Union(union_type) => union_type
                .members
                .iter()
                .filter_map(|member| self.type_named(member))
                .collect(),

            GraphQLType::Interface(interface_type) => self
                .all_types()
                .filter(|candidate| match candidate {
                    GraphQLType::Object(object_type) => object_type
                        .interfaces
                        .iter()
                        .any(|iface| iface == &interface_type.name),
                    _ => false,
                })
                .collect(),

            _ => vec![],
        }
    }

    pub fn query_type_name(&self) -> &str {
        self.query_type_name.as_str()
    }

    pub fn mutation_type_name(&self) -> Option<&str> {
        self.mutation_type_name.as_deref()
    }

    pub fn subscription_type_name(&self) -> Option<&str> {
        self.subscription_type_name.as_deref()
    }

    pub fn is_operation_root_type(&self, name: &str) -> bool {
        name == self.query_type_name
            || self.mutation_type_name.as_deref() == Some(name)
            || self.subscription_type_name.as_deref() == Some(name)
    }

    fn all_types(&self) -> impl Iterator<Item = &GraphQLType> {
        self.server_types
            .values()
            .chain(self.client_types.values())
    }
}

pub(super) fn make_meta_field(name: &str, type_name: &str) -> FieldDef {
    FieldDef {
        arguments: IndexMap::new(),
        def_location: loc::SourceLocation::Generated,
        name: name.to_string(),
        type_annotation: TypeAnnotation::named(type_name, false),
    }
}
