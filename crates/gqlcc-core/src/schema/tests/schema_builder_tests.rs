use crate::schema::GraphQLType;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaBuilder;
use crate::schema::TypeAnnotation;

#[test]
fn builds_types_and_root_names() {
    let schema = SchemaBuilder::from_str(
        None,
        r#"
        type Query {
            user(id: ID!): User
        }

        type Mutation {
            rename(id: ID!, name: String!): User
        }

        type User {
            id: ID!
            name: String
            friends: [User!]
        }
        "#,
    )
    .unwrap()
    .build()
    .unwrap();

    assert_eq!(schema.query_type_name(), "Query");
    assert_eq!(schema.mutation_type_name(), Some("Mutation"));
    assert_eq!(schema.subscription_type_name(), None);
    assert!(matches!(
        schema.type_named("User"),
        Some(GraphQLType::Object(_)),
    ));

    let friends = schema.field("User", "friends").unwrap();
    assert!(friends.type_annotation.is_list());
    assert_eq!(friends.type_annotation.raw_type_name(), "User");
}

#[test]
fn explicit_schema_definition_overrides_default_root_names() {
    let schema = SchemaBuilder::from_str(
        None,
        r#"
        schema {
            query: Root
        }

        type Root {
            ok: Boolean
        }
        "#,
    )
    .unwrap()
    .build()
    .unwrap();

    assert_eq!(schema.query_type_name(), "Root");
    assert!(schema.is_operation_root_type("Root"));
    assert!(!schema.is_operation_root_type("Query"));
}

#[test]
fn missing_query_type_is_an_error() {
    let result = SchemaBuilder::from_str(None, "type User { id: ID! }")
        .unwrap()
        .build();
    assert!(matches!(
        result,
        Err(boxed) if matches!(*boxed, SchemaBuildError::NoQueryTypeDefined),
    ));
}

#[test]
fn duplicate_type_definition_is_an_error() {
    let result = SchemaBuilder::from_str(
        None,
        r#"
        type Query { ok: Boolean }
        type User { id: ID! }
        type User { name: String }
        "#,
    );
    assert!(matches!(
        result,
        Err(boxed) if matches!(
            *boxed,
            SchemaBuildError::DuplicateTypeDefinition { ref type_name, .. }
                if type_name == "User",
        ),
    ));
}

#[test]
fn client_extension_types_overlay_the_server_schema() {
    let mut builder = SchemaBuilder::from_str(
        None,
        "type Query { ok: Boolean }",
    )
    .unwrap();
    builder
        .add_client_types_str(None, "type LocalSetting { enabled: Boolean }")
        .unwrap();
    let schema = builder.build().unwrap();

    assert!(schema.type_named("LocalSetting").is_some());
    assert!(schema.server_type_named("LocalSetting").is_none());
}

#[test]
fn possible_types_covers_unions_and_interfaces() {
    let schema = SchemaBuilder::from_str(
        None,
        r#"
        type Query { ok: Boolean }

        interface Named { name: String }

        union Renderer = Plain | Markdown

        type Plain implements Named { name: String }
        type Markdown { markup: String }
        "#,
    )
    .unwrap()
    .build()
    .unwrap();

    let union_type = schema.type_named("Renderer").unwrap();
    let members: Vec<&str> = schema
        .possible_types(union_type)
        .into_iter()
        .map(|t| t.name())
        .collect();
    assert_eq!(members, vec!["Plain", "Markdown"]);

    let interface_type = schema.type_named("Named").unwrap();
    let implementors: Vec<&str> = schema
        .possible_types(interface_type)
        .into_iter()
        .map(|t| t.name())
        .collect();
    assert_eq!(implementors, vec!["Plain"]);
}

#[test]
fn meta_fields_resolve_on_composite_types() {
    let schema = SchemaBuilder::from_str(None, "type Query { ok: Boolean }")
        .unwrap()
        .build()
        .unwrap();

    let typename = schema.field("Query", "__typename").unwrap();
    assert_eq!(
        typename.type_annotation,
        TypeAnnotation::named("String", false),
    );
    assert!(schema.field("Query", "__id").is_some());
}
