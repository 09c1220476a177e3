use crate::codegen::build_artifact;
use crate::compiler::plugin_for_tag;
use crate::feature_flags::FeatureFlags;
use crate::store::DocumentStore;
use crate::transforms::default_pipeline;
use crate::transforms::run_pipeline;
use crate::transforms::tests::default_test_store;

const FULL_SOURCE: &str = r#"
fragment PlainName on PlainUserNameRenderer { plaintext }

fragment FriendsFragment on User {
    friends(first: 10) @connection_resolver {
        edges { cursor }
        pageInfo { hasNextPage }
    }
}

query ProfileQuery($show: Boolean) {
    viewer {
        actor {
            name @include(if: $show)
            ...FriendsFragment @defer
            nameRenderer @match {
                ...PlainName @module(name: "PlainName.react")
            }
        }
    }
}
"#;

fn incremental_flags() -> FeatureFlags {
    FeatureFlags {
        enable_incremental_delivery: true,
    }
}

fn compiled_store() -> DocumentStore {
    let store = default_test_store(FULL_SOURCE);
    run_pipeline(&store, &default_pipeline(), &incremental_flags()).unwrap()
}

#[test]
fn the_full_pipeline_is_idempotent_on_its_own_output() {
    let once = compiled_store();
    let twice =
        run_pipeline(&once, &default_pipeline(), &incremental_flags()).unwrap();

    let names_once: Vec<&str> = once.documents().map(|doc| doc.name()).collect();
    let names_twice: Vec<&str> = twice.documents().map(|doc| doc.name()).collect();
    assert_eq!(names_once, names_twice);

    for document in once.documents() {
        let again = twice.document(document.name()).unwrap();
        assert_eq!(document.as_ref(), again.as_ref());
    }
}

#[test]
fn two_compiles_of_identical_source_are_byte_identical() {
    let first = compiled_store();
    let second = compiled_store();
    let plugin = plugin_for_tag("javascript").unwrap();

    for document in first.documents() {
        let artifact_a =
            build_artifact(document, plugin.format_module, None).unwrap();
        let artifact_b = build_artifact(
            second.document(document.name()).unwrap(),
            plugin.format_module,
            None,
        )
        .unwrap();
        assert_eq!(artifact_a.text, artifact_b.text);
        assert_eq!(artifact_a.content_hash, artifact_b.content_hash);
    }
}

#[test]
fn the_pipeline_synthesizes_split_operations_alongside_sources() {
    let store = compiled_store();
    assert!(store.document("PlainName$normalization").is_some());
    assert!(store.document("ProfileQuery").is_some());
    assert!(store.document("FriendsFragment").is_some());
}
