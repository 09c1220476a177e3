use crate::errors::UserError;
use crate::ir::ConstantValue;
use crate::ir::Document;
use crate::ir::IrBuilder;
use crate::ir::OperationKind;
use crate::ir::Selection;
use crate::ir::Value;
use crate::ir::tests::test_schema;

#[test]
fn lowers_an_operation_with_nested_fields() {
    let schema = test_schema();
    let documents = IrBuilder::new(&schema)
        .build_from_str(
            r#"
            query ProfileQuery($id: ID!) {
                user(id: $id) {
                    id
                    name
                    friends(first: 10) {
                        name
                    }
                }
            }
            "#,
            None,
        )
        .unwrap();

    assert_eq!(documents.len(), 1);
    let Document::Operation(operation) = &documents[0] else {
        panic!("expected an operation");
    };
    assert_eq!(operation.name, "ProfileQuery");
    assert_eq!(operation.kind, OperationKind::Query);
    assert_eq!(operation.type_name, "Query");
    assert_eq!(operation.variable_definitions.len(), 1);

    let Selection::LinkedField(user_field) = &operation.selections[0] else {
        panic!("expected a linked field");
    };
    assert_eq!(user_field.name, "user");
    assert_eq!(user_field.type_annotation.raw_type_name(), "User");
    assert_eq!(
        user_field.arguments[0].value,
        Value::Variable("id".to_string()),
    );
    assert_eq!(user_field.selections.len(), 3);

    let Selection::LinkedField(friends_field) = &user_field.selections[2] else {
        panic!("expected a linked field");
    };
    assert!(friends_field.type_annotation.is_list());
    assert_eq!(
        friends_field.arguments[0].value,
        Value::Literal(ConstantValue::Int(10)),
    );
}

#[test]
fn lowers_fragments_and_spreads() {
    let schema = test_schema();
    let documents = IrBuilder::new(&schema)
        .build_from_str(
            r#"
            fragment UserFields on User {
                id
                name
            }

            query MeQuery {
                me {
                    ...UserFields
                }
            }
            "#,
            None,
        )
        .unwrap();

    assert_eq!(documents.len(), 2);
    let Document::Fragment(fragment) = &documents[0] else {
        panic!("expected a fragment");
    };
    assert_eq!(fragment.name, "UserFields");
    assert_eq!(fragment.type_condition, "User");

    let Document::Operation(operation) = &documents[1] else {
        panic!("expected an operation");
    };
    let Selection::LinkedField(me_field) = &operation.selections[0] else {
        panic!("expected a linked field");
    };
    assert!(matches!(
        &me_field.selections[0],
        Selection::FragmentSpread(spread) if spread.fragment_name == "UserFields",
    ));
}

#[test]
fn anonymous_operations_are_rejected() {
    let schema = test_schema();
    let result = IrBuilder::new(&schema).build_from_str("{ me { id } }", None);
    assert!(matches!(
        result.unwrap_err().as_slice(),
        [UserError::AnonymousOperation { .. }],
    ));
}

#[test]
fn unknown_fields_are_rejected_with_their_location() {
    let schema = test_schema();
    let errors = IrBuilder::new(&schema)
        .build_from_str("query Q { me { mispeled } }", None)
        .unwrap_err();

    let [UserError::UnknownField {
        type_name,
        field_name,
        location,
    }] = errors.as_slice()
    else {
        panic!("expected exactly one UnknownField error, got: {errors:?}");
    };
    assert_eq!(type_name, "User");
    assert_eq!(field_name, "mispeled");
    assert!(location.file_position().is_some());
}

#[test]
fn scalar_fields_cannot_carry_selections() {
    let schema = test_schema();
    let errors = IrBuilder::new(&schema)
        .build_from_str("query Q { me { name { length } } }", None)
        .unwrap_err();
    assert!(matches!(
        errors.as_slice(),
        [UserError::SelectionsOnScalarField { field_name, .. }]
            if field_name == "name",
    ));
}

#[test]
fn composite_fields_require_selections() {
    let schema = test_schema();
    let errors = IrBuilder::new(&schema)
        .build_from_str("query Q { me }", None)
        .unwrap_err();
    assert!(matches!(
        errors.as_slice(),
        [UserError::FieldMissingCompositeSelections { field_name, .. }]
            if field_name == "me",
    ));
}

#[test]
fn sibling_errors_are_collected_together() {
    let schema = test_schema();
    let errors = IrBuilder::new(&schema)
        .build_from_str("query Q { me { bad1 bad2 } }", None)
        .unwrap_err();
    assert_eq!(errors.len(), 2);
}
