use crate::ast;

/// The annotated type of a field, argument, or variable as written in the
/// schema or in an operation: a named type or a list type, each with its own
/// nullability.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub enum TypeAnnotation {
    List {
        inner: Box<TypeAnnotation>,
        nullable: bool,
    },
    Named {
        name: String,
        nullable: bool,
    },
}
impl TypeAnnotation {
    pub fn named(name: impl AsRef<str>, nullable: bool) -> Self {
        Self::Named {
            name: name.as_ref().to_string(),
            nullable,
        }
    }

    pub(crate) fn from_ast_type(ast_type: &ast::operation::Type) -> Self {
        Self::from_ast_type_impl(ast_type, /* nullable = */ true)
    }

    fn from_ast_type_impl(
        ast_type: &ast::operation::Type,
        nullable: bool,
    ) -> Self {
        match ast_type {
            ast::operation::Type::ListType(inner) => Self::List {
                inner: Box::new(Self::from_ast_type_impl(inner, true)),
                nullable,
            },

            ast::operation::Type::NamedType(name) => Self::Named {
                name: name.to_string(),
                nullable,
            },

            ast::operation::Type::NonNullType(inner) =>
                Self::from_ast_type_impl(inner, false),
        }
    }

    /// Whether this annotation is a list once nullability is ignored.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List { .. })
    }

    pub fn nullable(&self) -> bool {
        match self {
            Self::List { nullable, .. } => *nullable,
            Self::Named { nullable, .. } => *nullable,
        }
    }

    /// Recursively unwrap list/non-null wrappers down to the inner-most named
    /// type.
    pub fn raw_type_name(&self) -> &str {
        match self {
            Self::List { inner, .. } => inner.raw_type_name(),
            Self::Named { name, .. } => name.as_str(),
        }
    }
}
impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List { inner, nullable } => write!(
                f,
                "[{inner}]{}",
                if *nullable { "" } else { "!" },
            ),

            Self::Named { name, nullable } => write!(
                f,
                "{name}{}",
                if *nullable { "" } else { "!" },
            ),
        }
    }
}
