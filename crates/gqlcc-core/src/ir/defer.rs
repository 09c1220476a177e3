use crate::ir::Selection;
use crate::ir::Value;
use crate::loc;

/// A lowered `@defer` branch wrapping the (directive-stripped) fragment it
/// was written on.
#[derive(Clone, Debug, PartialEq)]
pub struct Defer {
    pub if_arg: Option<Value>,
    pub label: String,
    pub loc: loc::SourceLocation,
    pub selections: Vec<Selection>,
}
