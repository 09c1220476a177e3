use crate::errors::UserError;
use crate::feature_flags::FeatureFlags;
use crate::ir::Selection;
use crate::ir::Value;
use crate::transforms::skip_include;
use crate::transforms::tests::default_test_store;

fn flags() -> FeatureFlags {
    FeatureFlags::default()
}

#[test]
fn literal_false_include_deletes_the_node() {
    let store = default_test_store(
        "query Q { me { name @include(if: false) id } }",
    );
    let next = skip_include::transform(&store, &flags()).unwrap();

    let operation = next.document("Q").unwrap().as_operation().unwrap();
    let Selection::LinkedField(me_field) = &operation.selections[0] else {
        panic!("expected a linked field");
    };
    assert_eq!(me_field.selections.len(), 1);
    assert!(matches!(
        &me_field.selections[0],
        Selection::ScalarField(field) if field.name == "id",
    ));
}

#[test]
fn literal_true_include_just_strips_the_directive() {
    let store = default_test_store(
        "query Q { me { name @include(if: true) } }",
    );
    let next = skip_include::transform(&store, &flags()).unwrap();

    let operation = next.document("Q").unwrap().as_operation().unwrap();
    let Selection::LinkedField(me_field) = &operation.selections[0] else {
        panic!("expected a linked field");
    };
    assert!(matches!(
        &me_field.selections[0],
        Selection::ScalarField(field)
            if field.name == "name" && field.directives.is_empty(),
    ));
}

#[test]
fn variable_conditions_wrap_the_node() {
    let store = default_test_store(
        "query Q($show: Boolean) { me { name @include(if: $show) } }",
    );
    let next = skip_include::transform(&store, &flags()).unwrap();

    let operation = next.document("Q").unwrap().as_operation().unwrap();
    let Selection::LinkedField(me_field) = &operation.selections[0] else {
        panic!("expected a linked field");
    };
    let Selection::Condition(condition) = &me_field.selections[0] else {
        panic!("expected a Condition node, got: {:?}", me_field.selections[0]);
    };
    assert!(condition.passing_value);
    assert_eq!(condition.value, Value::Variable("show".to_string()));
    assert!(matches!(
        &condition.selections[0],
        Selection::ScalarField(field) if field.name == "name",
    ));
}

#[test]
fn skip_inverts_the_passing_value() {
    let store = default_test_store(
        "query Q($hide: Boolean) { me { name @skip(if: $hide) } }",
    );
    let next = skip_include::transform(&store, &flags()).unwrap();

    let operation = next.document("Q").unwrap().as_operation().unwrap();
    let Selection::LinkedField(me_field) = &operation.selections[0] else {
        panic!("expected a linked field");
    };
    assert!(matches!(
        &me_field.selections[0],
        Selection::Condition(condition) if !condition.passing_value,
    ));
}

#[test]
fn the_if_argument_is_required() {
    let store = default_test_store("query Q { me { name @include } }");
    let errors = skip_include::transform(&store, &flags()).unwrap_err();
    assert!(matches!(
        errors.as_slice(),
        [UserError::ConditionMissingIfArgument { directive_name, .. }]
            if directive_name == "include",
    ));
}
