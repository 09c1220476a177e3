use crate::errors::DiagnosticsResult;
use crate::errors::UserError;
use crate::feature_flags::FeatureFlags;
use crate::ir::ConnectionField;
use crate::ir::ConnectionMetadata;
use crate::ir::ConnectionStream;
use crate::ir::Document;
use crate::ir::LinkedField;
use crate::ir::MetadataValue;
use crate::ir::ScalarField;
use crate::ir::Selection;
use crate::ir::strip_directive;
use crate::loc;
use crate::schema::TypeAnnotation;
use crate::store::DocumentStore;
use crate::transform::Transform;
use crate::transform::TransformResult;
use crate::transform::Transformed;
use crate::transform::TraversalContext;
use crate::transform::transform_documents;
use indexmap::IndexMap;

const CONNECTION_RESOLVER: &str = "connection_resolver";
const STREAM_CONNECTION_RESOLVER: &str = "stream_connection_resolver";
const EDGES: &str = "edges";
const PAGE_INFO: &str = "pageInfo";

/// Rewrites `@connection_resolver` fields into [`ConnectionField`] nodes
/// with implicit `__id` selections, and records per-connection metadata on
/// the enclosing document.
pub fn transform(
    store: &DocumentStore,
    _flags: &FeatureFlags,
) -> DiagnosticsResult<DocumentStore> {
    transform_documents(store, &ConnectionResolverTransform)
}

struct ConnectionResolverTransform;

#[derive(Default)]
struct ConnectionState {
    connection_metadata: Vec<ConnectionMetadata>,
    /// Label to (claiming location, whether the label was explicit).
    labels: IndexMap<String, (loc::SourceLocation, bool)>,
}

impl Transform for ConnectionResolverTransform {
    type State = ConnectionState;

    fn name(&self) -> &'static str {
        "connection-resolver"
    }

    fn initial_state(&self, _document: &Document) -> Self::State {
        ConnectionState::default()
    }

    // Attach the accumulated connection records to the document's metadata
    // once its whole tree has been traversed.
    fn transform_document(
        &self,
        document: &Document,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> DiagnosticsResult<Transformed<Document>> {
        let traversed = self.traverse_document(document, ctx, state)?;
        if state.connection_metadata.is_empty() {
            return Ok(traversed);
        }

        let current = match traversed {
            Transformed::Replace(current) => current,
            _ => document.clone(),
        };
        let metadata = current.metadata().with(
            "connection",
            MetadataValue::Connections(std::mem::take(
                &mut state.connection_metadata,
            )),
        );
        Ok(Transformed::Replace(current.with_metadata(metadata)))
    }

    fn transform_scalar_field(
        &self,
        field: &ScalarField,
        _ctx: &TraversalContext<'_>,
        _state: &mut Self::State,
    ) -> TransformResult {
        let connection_directive = field.directives.iter().find(|directive| {
            directive.name == CONNECTION_RESOLVER
                || directive.name == STREAM_CONNECTION_RESOLVER
        });
        if let Some(directive) = connection_directive {
            return Err(vec![UserError::ConnectionOnScalarField {
                location: directive.loc.clone(),
            }]);
        }
        Ok(Transformed::Keep)
    }

    fn transform_linked_field(
        &self,
        field: &LinkedField,
        ctx: &TraversalContext<'_>,
        state: &mut Self::State,
    ) -> TransformResult {
        let traversed = self.traverse_linked_field(field, ctx, state)?;
        let current = match &traversed {
            Transformed::Replace(Selection::LinkedField(current)) => current,
            _ => field,
        };

        let Some(connection_directive) = current
            .directives
            .iter()
            .find(|directive| {
                directive.name == CONNECTION_RESOLVER
                    || directive.name == STREAM_CONNECTION_RESOLVER
            })
            .cloned()
        else {
            return Ok(traversed);
        };

        if current.type_annotation.is_list() {
            return Err(vec![UserError::ConnectionOnListField {
                type_string: current.type_annotation.to_string(),
                location: current.loc.clone(),
            }]);
        }

        // Label rules: default is the document name; explicit labels must be
        // the document name or prefixed with it.
        let document_name = ctx.document_name();
        let label_arg = connection_directive.argument("label");
        let label = match label_arg {
            Some(arg) => match arg.value.as_literal_str() {
                Some(label) => label.to_string(),
                None => {
                    return Err(vec![UserError::ConnectionLabelInvalid {
                        document_name: document_name.to_string(),
                        location: arg.loc.clone(),
                    }]);
                },
            },
            None => document_name.to_string(),
        };
        let label_is_valid = label == document_name
            || label.starts_with(&format!("{document_name}$"));
        if !label_is_valid {
            return Err(vec![UserError::ConnectionLabelInvalid {
                document_name: document_name.to_string(),
                location: label_arg
                    .map(|arg| arg.loc.clone())
                    .unwrap_or_else(|| connection_directive.loc.clone()),
            }]);
        }

        let claim_location = label_arg
            .map(|arg| arg.loc.clone())
            .unwrap_or_else(|| connection_directive.loc.clone());
        if let Some((first, _)) = state.labels.get(label.as_str()) {
            // Explicit duplicates and default-label collisions read
            // differently to the developer; cite both locations either way.
            return Err(vec![if label_arg.is_some() {
                UserError::ConnectionLabelNotUnique {
                    first: first.clone(),
                    second: claim_location,
                }
            } else {
                UserError::ConnectionLabelCollision {
                    first: first.clone(),
                    second: claim_location,
                }
            }]);
        }
        state
            .labels
            .insert(label.clone(), (claim_location, label_arg.is_some()));

        let stream = if connection_directive.name == STREAM_CONNECTION_RESOLVER {
            let initial_count = connection_directive.argument("initial_count");
            let initial_count_value = initial_count
                .map(|arg| arg.value.clone())
                .filter(|value| value.is_int_or_variable());
            let Some(initial_count_value) = initial_count_value else {
                return Err(vec![UserError::ConnectionStreamInitialCountInvalid {
                    location: initial_count
                        .map(|arg| arg.loc.clone())
                        .unwrap_or_else(|| connection_directive.loc.clone()),
                }]);
            };
            Some(ConnectionStream {
                defer_label: label.clone(),
                if_arg: connection_directive.argument_value("if").cloned(),
                initial_count: initial_count_value,
                stream_label: label.clone(),
            })
        } else {
            None
        };

        // Locate edges/pageInfo (any order); everything else is carried
        // through unchanged, but must be a plain field.
        let mut edges_field: Option<LinkedField> = None;
        let mut page_info_field: Option<Selection> = None;
        let mut selections: Vec<Selection> = vec![];
        for selection in &current.selections {
            match selection {
                Selection::LinkedField(linked) if linked.name == EDGES =>
                    edges_field = Some(linked.clone()),
                Selection::LinkedField(linked) if linked.name == PAGE_INFO =>
                    page_info_field = Some(selection.clone()),
                Selection::LinkedField(_) | Selection::ScalarField(_) =>
                    selections.push(selection.clone()),
                other => {
                    return Err(vec![UserError::ConnectionSelectionNotAField {
                        location: other.loc().clone(),
                    }]);
                },
            }
        }
        let (Some(edges_field), Some(page_info_field)) =
            (edges_field, page_info_field)
        else {
            return Err(vec![UserError::ConnectionMissingEdgesOrPageInfo {
                location: connection_directive.loc.clone(),
            }]);
        };

        // The schema must expose the `field { edges { node { ... } } }`
        // shape, with `node` resolving to an object/interface/union.
        let schema = ctx.schema();
        let node_type_annotation = schema
            .type_named(current.type_annotation.raw_type_name())
            .filter(|connection_type| connection_type.is_object())
            .and_then(|connection_type| connection_type.field(EDGES))
            .and_then(|edges_def| {
                schema.type_named(edges_def.type_annotation.raw_type_name())
            })
            .filter(|edges_type| edges_type.is_object())
            .and_then(|edges_type| edges_type.field("node"))
            .filter(|node_def| {
                schema
                    .type_named(node_def.type_annotation.raw_type_name())
                    .map(|node_type| node_type.is_composite())
                    .unwrap_or(false)
            })
            .map(|node_def| node_def.type_annotation.clone());
        let Some(node_type_annotation) = node_type_annotation else {
            return Err(vec![UserError::ConnectionInvalidNodeShape {
                location: current.loc.clone(),
            }]);
        };

        // Inject `__id` on the edge and on `edges.node` so the runtime can
        // key both records.
        let edge_id_field = implicit_id_field(&edges_field.loc);
        let node_field = LinkedField {
            alias: None,
            arguments: vec![],
            directives: vec![],
            handles: vec![],
            loc: edges_field.loc.clone(),
            name: "node".to_string(),
            selections: vec![Selection::ScalarField(implicit_id_field(
                &edges_field.loc,
            ))],
            storage_key: None,
            type_annotation: node_type_annotation,
        };
        let mut edges_selections = edges_field.selections.clone();
        edges_selections.push(Selection::ScalarField(edge_id_field));
        edges_selections.push(Selection::LinkedField(node_field));
        let edges_field = LinkedField {
            selections: edges_selections,
            ..edges_field
        };

        let mut path = ctx.path().to_vec();
        path.push(current.alias_or_name().to_string());
        state.connection_metadata.push(ConnectionMetadata {
            is_stream: stream.is_some(),
            label: label.clone(),
            path,
        });

        selections.push(Selection::LinkedField(edges_field));
        selections.push(page_info_field);

        Ok(Transformed::Replace(Selection::ConnectionField(ConnectionField {
            alias: current.alias.clone(),
            arguments: current.arguments.clone(),
            directives: strip_directive(
                &current.directives,
                connection_directive.name.as_str(),
            ),
            label,
            loc: current.loc.clone(),
            name: current.name.clone(),
            selections,
            stream,
            type_annotation: current.type_annotation.clone(),
        })))
    }
}

fn implicit_id_field(loc: &loc::SourceLocation) -> ScalarField {
    ScalarField {
        alias: None,
        arguments: vec![],
        directives: vec![],
        loc: loc.to_derived(),
        name: "__id".to_string(),
        storage_key: None,
        type_annotation: TypeAnnotation::named("ID", false),
    }
}
