use crate::ir::DirectiveAnnotation;
use crate::ir::Selection;
use crate::loc;

/// An `... on Type { ... }` spread. A missing type condition keeps the
/// enclosing type in scope.
#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub directives: Vec<DirectiveAnnotation>,
    pub loc: loc::SourceLocation,
    pub selections: Vec<Selection>,
    pub type_condition: Option<String>,
}
