use crate::ir::DirectiveAnnotation;
use crate::ir::Metadata;
use crate::ir::Selection;
use crate::loc;

/// A named fragment definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    pub directives: Vec<DirectiveAnnotation>,
    pub loc: loc::SourceLocation,
    pub metadata: Metadata,
    pub name: String,
    pub selections: Vec<Selection>,
    pub type_condition: String,
}
