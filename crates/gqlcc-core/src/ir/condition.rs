use crate::ir::Selection;
use crate::ir::Value;
use crate::loc;

/// A `@include`/`@skip` branch: the wrapped selections are taken when the
/// condition value matches `passing_value`.
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    pub loc: loc::SourceLocation,
    /// `true` for `@include`, `false` for `@skip`.
    pub passing_value: bool,
    pub selections: Vec<Selection>,
    pub value: Value,
}
