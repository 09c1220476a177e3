use crate::feature_flags::FeatureFlags;
use crate::ir::Document;
use crate::ir::MetadataValue;
use crate::ir::Selection;
use crate::store::DocumentStore;
use crate::transforms::match_module;
use crate::transforms::split_module_import;
use crate::transforms::tests::default_test_store;

fn lower(documents: &str) -> DocumentStore {
    let store = default_test_store(documents);
    let flags = FeatureFlags::default();
    let store = match_module::transform(&store, &flags).unwrap();
    split_module_import::transform(&store, &flags).unwrap()
}

#[test]
fn synthesizes_one_split_operation_per_import() {
    let store = lower(
        r#"
        fragment PlainName on PlainUserNameRenderer { plaintext }
        query NameQuery {
            me {
                nameRenderer @match {
                    ...PlainName @module(name: "PlainName.react")
                }
            }
        }
        "#,
    );

    let document = store.document("PlainName$normalization").unwrap();
    let Document::SplitOperation(split) = document.as_ref() else {
        panic!("expected a SplitOperation, got: {document:?}");
    };
    assert_eq!(split.type_name, "PlainUserNameRenderer");
    assert_eq!(
        split.metadata.get("derived_from"),
        Some(&MetadataValue::String("PlainName".to_string())),
    );
    // The split root carries the import's selections: the stripped spread
    // plus the synthetic __module_operation field.
    assert!(matches!(
        &split.selections[0],
        Selection::FragmentSpread(spread) if spread.fragment_name == "PlainName",
    ));
    assert!(matches!(
        &split.selections[1],
        Selection::ScalarField(field)
            if field.alias.as_deref() == Some("__module_operation"),
    ));
}

#[test]
fn imports_are_deduplicated_by_name_with_last_wins() {
    let store = lower(
        r#"
        fragment PlainName on PlainUserNameRenderer { plaintext }
        query First {
            me {
                nameRenderer @match {
                    ...PlainName @module(name: "First.react")
                }
            }
        }
        query Second {
            me {
                nameRenderer @match {
                    ...PlainName @module(name: "Second.react")
                }
            }
        }
        "#,
    );

    let split_names: Vec<&str> = store
        .documents()
        .filter(|doc| matches!(doc.as_ref(), Document::SplitOperation(_)))
        .map(|doc| doc.name())
        .collect();
    assert_eq!(split_names, vec!["PlainName$normalization"]);

    // Last processed import wins.
    let Document::SplitOperation(split) =
        store.document("PlainName$normalization").unwrap().as_ref()
    else {
        panic!("expected a SplitOperation");
    };
    let Selection::ScalarField(operation_field) = &split.selections[1] else {
        panic!("expected the __module_operation field");
    };
    assert_eq!(
        operation_field.arguments[0].value.as_literal_str(),
        Some("PlainName$normalization.graphql"),
    );
}
