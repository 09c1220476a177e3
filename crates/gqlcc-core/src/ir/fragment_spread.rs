use crate::ir::Argument;
use crate::ir::DirectiveAnnotation;
use crate::loc;

/// A `...FragmentName` spread. The name is resolved against the document
/// store, never against a partial per-file view.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    /// `@arguments`-style fragment arguments. Kept so passes can reject
    /// directives that do not compose with them.
    pub arguments: Vec<Argument>,
    pub directives: Vec<DirectiveAnnotation>,
    pub fragment_name: String,
    pub loc: loc::SourceLocation,
}
