use crate::ir::Document;
use crate::ir::Handle;
use crate::ir::Metadata;
use crate::ir::Selection;
use crate::ir::Value;
use indexmap::IndexMap;

/// The serializable shape of one selection, shared by the normalization and
/// reader representations.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind")]
pub enum ConcreteSelection {
    Condition {
        #[serde(rename = "passingValue")]
        passing_value: bool,
        condition: Value,
        selections: Vec<ConcreteSelection>,
    },
    Connection {
        label: String,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
        #[serde(skip_serializing_if = "IndexMap::is_empty")]
        args: IndexMap<String, Value>,
        #[serde(rename = "isStream")]
        is_stream: bool,
        selections: Vec<ConcreteSelection>,
    },
    Defer {
        label: String,
        #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
        if_arg: Option<Value>,
        selections: Vec<ConcreteSelection>,
    },
    FragmentSpread {
        name: String,
    },
    InlineFragment {
        #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
        type_condition: Option<String>,
        selections: Vec<ConcreteSelection>,
    },
    LinkedField {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
        #[serde(skip_serializing_if = "IndexMap::is_empty")]
        args: IndexMap<String, Value>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        handles: Vec<Handle>,
        #[serde(rename = "storageKey", skip_serializing_if = "Option::is_none")]
        storage_key: Option<String>,
        selections: Vec<ConcreteSelection>,
    },
    ModuleImport {
        #[serde(rename = "documentName")]
        document_name: String,
        module: String,
        selections: Vec<ConcreteSelection>,
    },
    ScalarField {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
        #[serde(skip_serializing_if = "IndexMap::is_empty")]
        args: IndexMap<String, Value>,
        #[serde(rename = "storageKey", skip_serializing_if = "Option::is_none")]
        storage_key: Option<String>,
    },
    Stream {
        label: String,
        #[serde(rename = "initialCount")]
        initial_count: Value,
        #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
        if_arg: Option<Value>,
        selections: Vec<ConcreteSelection>,
    },
}

/// The serializable payload of one generated artifact: the shape used to
/// write server responses into the cache (`normalization`) and the shape
/// used to read UI data back out (`reader`).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ConcreteDocument {
    pub kind: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    pub normalization: Vec<ConcreteSelection>,
    pub reader: Vec<ConcreteSelection>,
}
impl ConcreteDocument {
    pub fn from_document(document: &Document) -> Self {
        Self {
            kind: document.kind_name(),
            name: document.name().to_string(),
            metadata: document.metadata().clone(),
            normalization: build_normalization(document.selections()),
            reader: build_reader(document.selections()),
        }
    }
}

/// The normalization form keeps every node: storage keys, handles, module
/// imports, and the defer/stream/condition structure the response writer
/// needs.
fn build_normalization(selections: &[Selection]) -> Vec<ConcreteSelection> {
    selections
        .iter()
        .map(|selection| match selection {
            Selection::Condition(node) => ConcreteSelection::Condition {
                passing_value: node.passing_value,
                condition: node.value.clone(),
                selections: build_normalization(&node.selections),
            },

            Selection::ConnectionField(node) => ConcreteSelection::Connection {
                label: node.label.clone(),
                name: node.name.clone(),
                alias: node.alias.clone(),
                args: argument_map(&node.arguments),
                is_stream: node.stream.is_some(),
                selections: build_normalization(&node.selections),
            },

            Selection::Defer(node) => ConcreteSelection::Defer {
                label: node.label.clone(),
                if_arg: node.if_arg.clone(),
                selections: build_normalization(&node.selections),
            },

            Selection::FragmentSpread(node) => ConcreteSelection::FragmentSpread {
                name: node.fragment_name.clone(),
            },

            Selection::InlineFragment(node) => ConcreteSelection::InlineFragment {
                type_condition: node.type_condition.clone(),
                selections: build_normalization(&node.selections),
            },

            Selection::LinkedField(node) => ConcreteSelection::LinkedField {
                name: node.name.clone(),
                alias: node.alias.clone(),
                args: argument_map(&node.arguments),
                handles: node.handles.clone(),
                storage_key: node.storage_key.clone(),
                selections: build_normalization(&node.selections),
            },

            Selection::ModuleImport(node) => ConcreteSelection::ModuleImport {
                document_name: node.fragment_name.clone(),
                module: node.module.clone(),
                selections: build_normalization(&node.selections),
            },

            Selection::ScalarField(node) => ConcreteSelection::ScalarField {
                name: node.name.clone(),
                alias: node.alias.clone(),
                args: argument_map(&node.arguments),
                storage_key: node.storage_key.clone(),
            },

            Selection::Stream(node) => ConcreteSelection::Stream {
                label: node.label.clone(),
                initial_count: node.initial_count.clone(),
                if_arg: node.if_arg.clone(),
                selections: build_normalization(&node.selections),
            },
        })
        .collect()
}

/// The reader form drops normalization-only machinery: defer/stream wrappers
/// flatten into their inner selections and handles are omitted.
fn build_reader(selections: &[Selection]) -> Vec<ConcreteSelection> {
    let mut result = vec![];
    for selection in selections {
        match selection {
            Selection::Defer(node) => result.extend(build_reader(&node.selections)),
            Selection::Stream(node) => result.extend(build_reader(&node.selections)),

            Selection::Condition(node) => result.push(ConcreteSelection::Condition {
                passing_value: node.passing_value,
                condition: node.value.clone(),
                selections: build_reader(&node.selections),
            }),

            Selection::ConnectionField(node) => {
                result.push(ConcreteSelection::Connection {
                    label: node.label.clone(),
                    name: node.name.clone(),
                    alias: node.alias.clone(),
                    args: argument_map(&node.arguments),
                    is_stream: node.stream.is_some(),
                    selections: build_reader(&node.selections),
                });
            },

            Selection::FragmentSpread(node) => {
                result.push(ConcreteSelection::FragmentSpread {
                    name: node.fragment_name.clone(),
                });
            },

            Selection::InlineFragment(node) => {
                result.push(ConcreteSelection::InlineFragment {
                    type_condition: node.type_condition.clone(),
                    selections: build_reader(&node.selections),
                });
            },

            Selection::LinkedField(node) => {
                result.push(ConcreteSelection::LinkedField {
                    name: node.name.clone(),
                    alias: node.alias.clone(),
                    args: argument_map(&node.arguments),
                    handles: vec![],
                    storage_key: node.storage_key.clone(),
                    selections: build_reader(&node.selections),
                });
            },

            Selection::ModuleImport(node) => {
                result.push(ConcreteSelection::ModuleImport {
                    document_name: node.fragment_name.clone(),
                    module: node.module.clone(),
                    selections: build_reader(&node.selections),
                });
            },

            Selection::ScalarField(node) => {
                result.push(ConcreteSelection::ScalarField {
                    name: node.name.clone(),
                    alias: node.alias.clone(),
                    args: argument_map(&node.arguments),
                    storage_key: node.storage_key.clone(),
                });
            },
        }
    }
    result
}

fn argument_map(arguments: &[crate::ir::Argument]) -> IndexMap<String, Value> {
    arguments
        .iter()
        .map(|arg| (arg.name.clone(), arg.value.clone()))
        .collect()
}
