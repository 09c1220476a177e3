use crate::errors::UserError;
use crate::ir::Document;
use crate::ir::MetadataValue;
use crate::ir::ScalarField;
use crate::ir::Selection;
use crate::loc;
use crate::transform::Transform;
use crate::transform::TransformResult;
use crate::transform::Transformed;
use crate::transform::TraversalContext;
use crate::transform::transform_documents;
use crate::transform::tests::store_with;
use std::sync::Arc;

/// Aliases every `name` field; used to exercise single-node replacement.
struct AliasNameFields;
impl Transform for AliasNameFields {
    type State = ();

    fn name(&self) -> &'static str {
        "alias-name-fields"
    }

    fn initial_state(&self, _document: &Document) -> Self::State {}

    fn transform_scalar_field(
        &self,
        field: &ScalarField,
        _ctx: &TraversalContext<'_>,
        _state: &mut Self::State,
    ) -> TransformResult {
        if field.name != "name" {
            return Ok(Transformed::Keep);
        }
        Ok(Transformed::Replace(Selection::ScalarField(ScalarField {
            alias: Some("displayName".to_string()),
            ..field.clone()
        })))
    }
}

/// Deletes `id` fields and splices `name` into two aliased copies.
struct SpliceFields;
impl Transform for SpliceFields {
    type State = ();

    fn name(&self) -> &'static str {
        "splice-fields"
    }

    fn initial_state(&self, _document: &Document) -> Self::State {}

    fn transform_scalar_field(
        &self,
        field: &ScalarField,
        _ctx: &TraversalContext<'_>,
        _state: &mut Self::State,
    ) -> TransformResult {
        match field.name.as_str() {
            "id" => Ok(Transformed::Delete),
            "name" => Ok(Transformed::ReplaceMany(vec![
                Selection::ScalarField(ScalarField {
                    alias: Some("first".to_string()),
                    ..field.clone()
                }),
                Selection::ScalarField(ScalarField {
                    alias: Some("second".to_string()),
                    ..field.clone()
                }),
            ])),
            _ => Ok(Transformed::Keep),
        }
    }
}

/// Records `parent:field` pairs in per-document state and merges them into
/// the document's metadata on the way out.
struct ParentTypeProbe;
impl Transform for ParentTypeProbe {
    type State = Vec<String>;

    fn name(&self) -> &'static str {
        "parent-type-probe"
    }

    fn initial_state(&self, _document: &Document) -> Self::State {
        vec![]
    }

    fn transform_document(
        &self,
        document: &Document,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> crate::errors::DiagnosticsResult<Transformed<Document>> {
        let traversed = self.traverse_document(document, ctx, state)?;
        let current = match traversed {
            Transformed::Replace(current) => current,
            _ => document.clone(),
        };
        let probes = state
            .iter()
            .map(|probe| MetadataValue::String(probe.clone()))
            .collect();
        Ok(Transformed::Replace(current.with_metadata(
            current.metadata().with("probes", MetadataValue::List(probes)),
        )))
    }

    fn transform_scalar_field(
        &self,
        field: &ScalarField,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        state.push(format!("{}:{}", ctx.parent_type_name(), field.name));
        Ok(Transformed::Keep)
    }
}

/// Raises a user error on every `id` field.
struct RejectForbiddenFields;
impl Transform for RejectForbiddenFields {
    type State = ();

    fn name(&self) -> &'static str {
        "reject-forbidden-fields"
    }

    fn initial_state(&self, _document: &Document) -> Self::State {}

    fn transform_scalar_field(
        &self,
        field: &ScalarField,
        _ctx: &TraversalContext<'_>,
        _state: &mut Self::State,
    ) -> TransformResult {
        if field.name == "id" {
            return Err(vec![UserError::UnknownField {
                type_name: "User".to_string(),
                field_name: field.name.clone(),
                location: field.loc.clone(),
            }]);
        }
        Ok(Transformed::Keep)
    }
}

#[test]
fn replacement_rebuilds_only_the_changed_spine() {
    let store = store_with("query Q { me { id name } }");
    let next = transform_documents(&store, &AliasNameFields).unwrap();

    let operation = next.document("Q").unwrap().as_operation().unwrap();
    let Selection::LinkedField(me_field) = &operation.selections[0] else {
        panic!("expected a linked field");
    };
    let Selection::ScalarField(id_field) = &me_field.selections[0] else {
        panic!("expected a scalar field");
    };
    assert_eq!(id_field.alias, None);
    let Selection::ScalarField(name_field) = &me_field.selections[1] else {
        panic!("expected a scalar field");
    };
    assert_eq!(name_field.alias.as_deref(), Some("displayName"));
}

#[test]
fn untouched_documents_share_their_allocation_across_revisions() {
    let store = store_with(
        r#"
        query Untouched { me { id } }
        query Touched { me { name } }
        "#,
    );
    let next = transform_documents(&store, &AliasNameFields).unwrap();

    assert!(Arc::ptr_eq(
        store.document("Untouched").unwrap(),
        next.document("Untouched").unwrap(),
    ));
    assert!(!Arc::ptr_eq(
        store.document("Touched").unwrap(),
        next.document("Touched").unwrap(),
    ));
}

#[test]
fn delete_and_splice_reshape_the_sibling_list() {
    let store = store_with("query Q { me { id name bestFriend { id } } }");
    let next = transform_documents(&store, &SpliceFields).unwrap();

    let operation = next.document("Q").unwrap().as_operation().unwrap();
    let Selection::LinkedField(me_field) = &operation.selections[0] else {
        panic!("expected a linked field");
    };

    let rendered: Vec<String> = me_field
        .selections
        .iter()
        .map(|selection| match selection {
            Selection::ScalarField(field) => field.alias_or_name().to_string(),
            Selection::LinkedField(field) => field.alias_or_name().to_string(),
            other => panic!("unexpected selection: {other:?}"),
        })
        .collect();
    assert_eq!(rendered, vec!["first", "second", "bestFriend"]);

    // The nested `id` under bestFriend is deleted too.
    let Selection::LinkedField(best_friend) = &me_field.selections[2] else {
        panic!("expected a linked field");
    };
    assert!(best_friend.selections.is_empty());
}

#[test]
fn state_is_refined_per_level_and_merged_upward() {
    let store = store_with("query Q { me { name bestFriend { id } } }");
    let next = transform_documents(&store, &ParentTypeProbe).unwrap();

    let document = next.document("Q").unwrap();
    let Some(MetadataValue::List(probes)) = document.metadata().get("probes")
    else {
        panic!("expected probe metadata");
    };
    let probes: Vec<&str> = probes
        .iter()
        .map(|value| match value {
            MetadataValue::String(value) => value.as_str(),
            other => panic!("unexpected metadata value: {other:?}"),
        })
        .collect();
    assert_eq!(probes, vec!["User:name", "User:id"]);
}

#[test]
fn errors_abort_only_the_affected_document_and_are_collected() {
    let store = store_with(
        r#"
        query Broken1 { me { id } }
        query Fine { me { name } }
        query Broken2 { me { id name } }
        "#,
    );
    let errors = transform_documents(&store, &RejectForbiddenFields).unwrap_err();
    assert_eq!(errors.len(), 2);
    for error in &errors {
        assert!(!error.locations().is_empty());
        assert!(matches!(
            error,
            UserError::UnknownField { location, .. }
                if location != &loc::SourceLocation::Generated,
        ));
    }
}
