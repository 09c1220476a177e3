use crate::ir::Argument;
use crate::ir::DirectiveAnnotation;
use crate::ir::Handle;
use crate::ir::Selection;
use crate::loc;
use crate::schema::TypeAnnotation;

/// A field selection whose type is composite; always carries sub-selections.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkedField {
    pub alias: Option<String>,
    pub arguments: Vec<Argument>,
    pub directives: Vec<DirectiveAnnotation>,
    pub handles: Vec<Handle>,
    pub loc: loc::SourceLocation,
    pub name: String,
    pub selections: Vec<Selection>,
    /// Overrides the runtime's derived cache storage key when set.
    pub storage_key: Option<String>,
    pub type_annotation: TypeAnnotation,
}
impl LinkedField {
    pub fn alias_or_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.name.as_str())
    }

    pub fn with_selections(&self, selections: Vec<Selection>) -> Self {
        Self {
            selections,
            ..self.clone()
        }
    }
}
