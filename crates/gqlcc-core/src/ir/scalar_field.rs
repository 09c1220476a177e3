use crate::ir::Argument;
use crate::ir::DirectiveAnnotation;
use crate::loc;
use crate::schema::TypeAnnotation;

/// A leaf field selection. Never carries sub-selections, by construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    pub alias: Option<String>,
    pub arguments: Vec<Argument>,
    pub directives: Vec<DirectiveAnnotation>,
    pub loc: loc::SourceLocation,
    pub name: String,
    /// Overrides the runtime's derived cache storage key when set.
    pub storage_key: Option<String>,
    pub type_annotation: TypeAnnotation,
}
impl ScalarField {
    pub fn alias_or_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.name.as_str())
    }
}
