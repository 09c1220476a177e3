mod builder_tests;

use crate::schema::Schema;
use crate::schema::SchemaBuilder;

pub(super) fn test_schema() -> Schema {
    SchemaBuilder::from_str(
        None,
        r#"
        type Query {
            me: User
            user(id: ID!): User
        }

        type User {
            id: ID!
            name: String
            emails: [String]
            friends(first: Int): [User!]
        }
        "#,
    )
    .unwrap()
    .build()
    .unwrap()
}
