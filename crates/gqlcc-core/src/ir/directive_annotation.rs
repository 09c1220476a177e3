use crate::ir::Argument;
use crate::ir::Value;
use crate::loc;

/// A `@directive(...)` usage on a document, field, or spread.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveAnnotation {
    pub arguments: Vec<Argument>,
    pub loc: loc::SourceLocation,
    pub name: String,
}
impl DirectiveAnnotation {
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name == name)
    }

    pub fn argument_value(&self, name: &str) -> Option<&Value> {
        self.argument(name).map(|arg| &arg.value)
    }
}

/// Find a directive usage by name in an ordered directive list.
pub fn find_directive<'a>(
    directives: &'a [DirectiveAnnotation],
    name: &str,
) -> Option<&'a DirectiveAnnotation> {
    directives.iter().find(|directive| directive.name == name)
}

/// A copy of `directives` with the named directive removed.
pub fn strip_directive(
    directives: &[DirectiveAnnotation],
    name: &str,
) -> Vec<DirectiveAnnotation> {
    directives
        .iter()
        .filter(|directive| directive.name != name)
        .cloned()
        .collect()
}
