use crate::errors::UserError;
use crate::feature_flags::FeatureFlags;
use crate::ir::ConstantValue;
use crate::ir::MetadataValue;
use crate::ir::Selection;
use crate::ir::Value;
use crate::transforms::connection_resolver;
use crate::transforms::tests::default_test_store;

fn flags() -> FeatureFlags {
    FeatureFlags::default()
}

#[test]
fn lowers_a_connection_field_and_records_metadata() {
    let store = default_test_store(
        r#"
        fragment FriendsFragment on User {
            friends(first: 10) @connection_resolver {
                count
                edges { cursor }
                pageInfo { hasNextPage }
            }
        }
        "#,
    );
    let next = connection_resolver::transform(&store, &flags()).unwrap();

    let document = next.document("FriendsFragment").unwrap();
    let Selection::ConnectionField(connection) = &document.selections()[0] else {
        panic!("expected a ConnectionField, got: {:?}", document.selections()[0]);
    };
    assert_eq!(connection.label, "FriendsFragment");
    assert!(connection.stream.is_none());
    assert!(connection.directives.is_empty());

    // Selection order: carried-through extras, then edges, then pageInfo.
    let Selection::ScalarField(count) = &connection.selections[0] else {
        panic!("expected the count field");
    };
    assert_eq!(count.name, "count");
    let Selection::LinkedField(edges) = &connection.selections[1] else {
        panic!("expected the edges field");
    };
    assert_eq!(edges.name, "edges");
    let Selection::LinkedField(page_info) = &connection.selections[2] else {
        panic!("expected the pageInfo field");
    };
    assert_eq!(page_info.name, "pageInfo");

    // Implicit identity selections on the edge and on edges.node.
    assert!(matches!(
        &edges.selections[1],
        Selection::ScalarField(field) if field.name == "__id",
    ));
    let Selection::LinkedField(node) = &edges.selections[2] else {
        panic!("expected the injected node field");
    };
    assert_eq!(node.name, "node");
    assert_eq!(node.type_annotation.raw_type_name(), "User");
    assert!(matches!(
        &node.selections[0],
        Selection::ScalarField(field) if field.name == "__id",
    ));

    // One metadata record, rooted at the document.
    let Some(MetadataValue::Connections(records)) =
        document.metadata().get("connection")
    else {
        panic!("expected connection metadata");
    };
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label, "FriendsFragment");
    assert_eq!(records[0].path, vec!["friends".to_string()]);
    assert!(!records[0].is_stream);
}

#[test]
fn explicit_duplicate_labels_fail_citing_both_usages() {
    let store = default_test_store(
        r#"
        fragment F on User {
            a: friends @connection_resolver(label: "F$x") {
                edges { cursor }
                pageInfo { hasNextPage }
            }
            b: friends @connection_resolver(label: "F$x") {
                edges { cursor }
                pageInfo { hasNextPage }
            }
        }
        "#,
    );
    let errors = connection_resolver::transform(&store, &flags()).unwrap_err();
    let [error @ UserError::ConnectionLabelNotUnique { .. }] = errors.as_slice()
    else {
        panic!("expected one ConnectionLabelNotUnique error, got: {errors:?}");
    };
    assert_eq!(error.locations().len(), 2);
}

#[test]
fn default_label_collisions_are_reported_distinctly() {
    let store = default_test_store(
        r#"
        fragment F on User {
            a: friends @connection_resolver {
                edges { cursor }
                pageInfo { hasNextPage }
            }
            b: friends @connection_resolver {
                edges { cursor }
                pageInfo { hasNextPage }
            }
        }
        "#,
    );
    let errors = connection_resolver::transform(&store, &flags()).unwrap_err();
    assert!(matches!(
        errors.as_slice(),
        [UserError::ConnectionLabelCollision { .. }],
    ));
}

#[test]
fn distinct_labels_succeed() {
    let store = default_test_store(
        r#"
        fragment F on User {
            a: friends @connection_resolver(label: "F$a") {
                edges { cursor }
                pageInfo { hasNextPage }
            }
            b: friends @connection_resolver(label: "F$b") {
                edges { cursor }
                pageInfo { hasNextPage }
            }
        }
        "#,
    );
    assert!(connection_resolver::transform(&store, &flags()).is_ok());
}

#[test]
fn labels_must_be_prefixed_with_the_document_name() {
    let store = default_test_store(
        r#"
        fragment F on User {
            friends @connection_resolver(label: "Other") {
                edges { cursor }
                pageInfo { hasNextPage }
            }
        }
        "#,
    );
    let errors = connection_resolver::transform(&store, &flags()).unwrap_err();
    assert!(matches!(
        errors.as_slice(),
        [UserError::ConnectionLabelInvalid { document_name, .. }]
            if document_name == "F",
    ));
}

#[test]
fn edges_and_page_info_are_both_required() {
    let store = default_test_store(
        r#"
        fragment F on User {
            friends @connection_resolver {
                edges { cursor }
            }
        }
        "#,
    );
    let errors = connection_resolver::transform(&store, &flags()).unwrap_err();
    assert!(matches!(
        errors.as_slice(),
        [UserError::ConnectionMissingEdgesOrPageInfo { .. }],
    ));
}

#[test]
fn connection_fields_must_not_return_lists() {
    let store = default_test_store(
        r#"
        fragment F on User {
            friendsList @connection_resolver { name }
        }
        "#,
    );
    let errors = connection_resolver::transform(&store, &flags()).unwrap_err();
    assert!(matches!(
        errors.as_slice(),
        [UserError::ConnectionOnListField { .. }],
    ));
}

#[test]
fn connection_directives_are_rejected_on_scalar_fields() {
    let store = default_test_store(
        "fragment F on User { emails @connection_resolver }",
    );
    let errors = connection_resolver::transform(&store, &flags()).unwrap_err();
    assert!(matches!(
        errors.as_slice(),
        [UserError::ConnectionOnScalarField { .. }],
    ));
}

#[test]
fn streamed_connections_require_an_initial_count() {
    let store = default_test_store(
        r#"
        fragment F on User {
            friends @stream_connection_resolver(label: "F$s") {
                edges { cursor }
                pageInfo { hasNextPage }
            }
        }
        "#,
    );
    let errors = connection_resolver::transform(&store, &flags()).unwrap_err();
    assert!(matches!(
        errors.as_slice(),
        [UserError::ConnectionStreamInitialCountInvalid { .. }],
    ));
}

#[test]
fn streamed_connections_carry_a_stream_descriptor() {
    let store = default_test_store(
        r#"
        fragment F on User {
            friends @stream_connection_resolver(label: "F$s", initial_count: 3) {
                edges { cursor }
                pageInfo { hasNextPage }
            }
        }
        "#,
    );
    let next = connection_resolver::transform(&store, &flags()).unwrap();

    let document = next.document("F").unwrap();
    let Selection::ConnectionField(connection) = &document.selections()[0] else {
        panic!("expected a ConnectionField");
    };
    let stream = connection.stream.as_ref().unwrap();
    assert_eq!(stream.defer_label, "F$s");
    assert_eq!(stream.stream_label, "F$s");
    assert_eq!(
        stream.initial_count,
        Value::Literal(ConstantValue::Int(3)),
    );

    let Some(MetadataValue::Connections(records)) =
        document.metadata().get("connection")
    else {
        panic!("expected connection metadata");
    };
    assert!(records[0].is_stream);
}

#[test]
fn nested_connections_record_their_full_path() {
    let store = default_test_store(
        r#"
        query ViewerFeed {
            viewer {
                newsFeed @connection_resolver(label: "ViewerFeed$feed") {
                    edges { cursor }
                    pageInfo { hasNextPage }
                }
            }
        }
        "#,
    );
    let next = connection_resolver::transform(&store, &flags()).unwrap();

    let document = next.document("ViewerFeed").unwrap();
    let Some(MetadataValue::Connections(records)) =
        document.metadata().get("connection")
    else {
        panic!("expected connection metadata");
    };
    assert_eq!(
        records[0].path,
        vec!["viewer".to_string(), "newsFeed".to_string()],
    );
}
