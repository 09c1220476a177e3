use crate::ir::Selection;
use crate::ir::Value;
use crate::loc;

/// A lowered `@stream` branch wrapping the (directive-stripped) list field it
/// was written on.
#[derive(Clone, Debug, PartialEq)]
pub struct Stream {
    pub if_arg: Option<Value>,
    pub initial_count: Value,
    pub label: String,
    pub loc: loc::SourceLocation,
    pub selections: Vec<Selection>,
}
