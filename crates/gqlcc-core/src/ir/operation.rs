use crate::ir::DirectiveAnnotation;
use crate::ir::Metadata;
use crate::ir::Selection;
use crate::ir::Value;
use crate::loc;
use crate::schema::TypeAnnotation;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperationKind {
    Mutation,
    Query,
    Subscription,
}
impl OperationKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mutation => "mutation",
            Self::Query => "query",
            Self::Subscription => "subscription",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    pub default_value: Option<Value>,
    pub loc: loc::SourceLocation,
    pub name: String,
    pub type_annotation: TypeAnnotation,
}

/// A named query, mutation, or subscription.
#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    pub directives: Vec<DirectiveAnnotation>,
    pub kind: OperationKind,
    pub loc: loc::SourceLocation,
    pub metadata: Metadata,
    pub name: String,
    pub selections: Vec<Selection>,
    /// The schema's root type for this operation kind.
    pub type_name: String,
    pub variable_definitions: Vec<VariableDefinition>,
}
