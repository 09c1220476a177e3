use crate::ir::Value;
use crate::loc;

/// One named argument on a field or directive.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub loc: loc::SourceLocation,
    pub name: String,
    pub value: Value,
}
