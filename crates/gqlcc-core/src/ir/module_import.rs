use crate::ir::Selection;
use crate::loc;

/// A lowered `@module` usage: the runtime loads `module` when the matched
/// fragment's data arrives.
#[derive(Clone, Debug, PartialEq)]
pub struct ModuleImport {
    pub fragment_name: String,
    pub loc: loc::SourceLocation,
    pub module: String,
    pub selections: Vec<Selection>,
}
