use crate::codegen::ConcreteDocument;
use crate::codegen::ConcreteSelection;
use crate::codegen::PersistedQueryMap;
use crate::codegen::build_artifact;
use crate::codegen::print_document;
use crate::codegen::sha256_hex;
use crate::compiler::plugin_for_tag;
use crate::feature_flags::FeatureFlags;
use crate::ir::IrBuilder;
use crate::schema::SchemaBuilder;
use crate::store::DocumentStore;
use crate::transforms::default_pipeline;
use crate::transforms::run_pipeline;
use std::sync::Arc;

fn compiled_store(documents: &str) -> DocumentStore {
    let schema = Arc::new(
        SchemaBuilder::from_str(
            None,
            r#"
            type Query {
                me: User
            }

            type User {
                id: ID!
                name: String
                friendsList: [User!]
            }
            "#,
        )
        .unwrap()
        .build()
        .unwrap(),
    );
    let built = IrBuilder::new(&schema)
        .build_from_str(documents, None)
        .unwrap();
    let mut store = DocumentStore::new(schema);
    for document in built {
        store.insert(document, false).unwrap();
    }
    let flags = FeatureFlags {
        enable_incremental_delivery: true,
    };
    run_pipeline(&store, &default_pipeline(), &flags).unwrap()
}

#[test]
fn artifacts_are_deterministic_and_hash_their_own_text() {
    let store = compiled_store("query Q { me { id name } }");
    let document = store.document("Q").unwrap();
    let plugin = plugin_for_tag("javascript").unwrap();

    let first = build_artifact(document, plugin.format_module, None).unwrap();
    let second = build_artifact(document, plugin.format_module, None).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.content_hash, sha256_hex(first.text.as_str()));
    assert!(first.text.contains("module.exports = node;"));
}

#[test]
fn the_reader_representation_flattens_defer_boundaries() {
    let store = compiled_store(
        r#"
        fragment UserFields on User { name }
        query Q { me { ...UserFields @defer } }
        "#,
    );
    let document = store.document("Q").unwrap();
    let concrete = ConcreteDocument::from_document(document);

    let ConcreteSelection::LinkedField {
        selections: normalization_me,
        ..
    } = &concrete.normalization[0]
    else {
        panic!("expected the me field");
    };
    assert!(matches!(
        &normalization_me[0],
        ConcreteSelection::Defer { label, .. } if label == "Q$defer",
    ));

    let ConcreteSelection::LinkedField {
        selections: reader_me,
        ..
    } = &concrete.reader[0]
    else {
        panic!("expected the me field");
    };
    assert!(matches!(
        &reader_me[0],
        ConcreteSelection::FragmentSpread { name } if name == "UserFields",
    ));
}

#[test]
fn operations_get_persisted_ids_and_fragments_do_not() {
    let store = compiled_store(
        r#"
        fragment UserFields on User { name }
        query Q { me { ...UserFields } }
        "#,
    );
    let plugin = plugin_for_tag("javascript").unwrap();
    let mut persisted = PersistedQueryMap::new();

    let operation_artifact = build_artifact(
        store.document("Q").unwrap(),
        plugin.format_module,
        Some(&mut persisted),
    )
    .unwrap();
    let fragment_artifact = build_artifact(
        store.document("UserFields").unwrap(),
        plugin.format_module,
        Some(&mut persisted),
    )
    .unwrap();

    let persisted_id = operation_artifact.persisted_id.unwrap();
    assert_eq!(
        persisted_id,
        sha256_hex(print_document(store.document("Q").unwrap()).as_str()),
    );
    assert!(fragment_artifact.persisted_id.is_none());
    assert_eq!(persisted.len(), 1);

    let json = persisted.to_json().unwrap();
    assert!(json.contains(persisted_id.as_str()));
    assert!(json.contains("query Q"));
}

#[test]
fn printed_documents_are_stable_across_identical_builds() {
    let first = compiled_store("query Q { me { id name } }");
    let second = compiled_store("query Q { me { id name } }");
    assert_eq!(
        print_document(first.document("Q").unwrap()),
        print_document(second.document("Q").unwrap()),
    );
}
