mod transformer_tests;

use crate::ir::IrBuilder;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;
use crate::store::DocumentStore;
use std::sync::Arc;

pub(super) fn test_schema() -> Schema {
    SchemaBuilder::from_str(
        None,
        r#"
        type Query {
            me: User
        }

        type User {
            id: ID!
            name: String
            bestFriend: User
        }
        "#,
    )
    .unwrap()
    .build()
    .unwrap()
}

pub(super) fn store_with(documents: &str) -> DocumentStore {
    let schema = Arc::new(test_schema());
    let built = IrBuilder::new(&schema)
        .build_from_str(documents, None)
        .unwrap();
    let mut store = DocumentStore::new(schema);
    for document in built {
        store.insert(document, /* base = */ false).unwrap();
    }
    store
}
