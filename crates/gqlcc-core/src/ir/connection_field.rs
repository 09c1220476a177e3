use crate::ir::Argument;
use crate::ir::DirectiveAnnotation;
use crate::ir::Selection;
use crate::ir::Value;
use crate::loc;
use crate::schema::TypeAnnotation;

/// Incremental-delivery arguments for a streamed connection.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionStream {
    pub defer_label: String,
    pub if_arg: Option<Value>,
    pub initial_count: Value,
    pub stream_label: String,
}

/// A `@connection_resolver` field after lowering: a cursor-paginated
/// `edges`/`pageInfo` shape the runtime resolves through a connection
/// handler.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionField {
    pub alias: Option<String>,
    pub arguments: Vec<Argument>,
    pub directives: Vec<DirectiveAnnotation>,
    pub label: String,
    pub loc: loc::SourceLocation,
    pub name: String,
    pub selections: Vec<Selection>,
    pub stream: Option<ConnectionStream>,
    pub type_annotation: TypeAnnotation,
}
impl ConnectionField {
    pub fn alias_or_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.name.as_str())
    }
}
