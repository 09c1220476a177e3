use crate::loc;
use crate::schema::TypeAnnotation;
use indexmap::IndexMap;

#[derive(Clone, Debug, PartialEq)]
pub struct ArgumentDef {
    pub name: String,
    pub type_annotation: TypeAnnotation,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDef {
    pub arguments: IndexMap<String, ArgumentDef>,
    pub def_location: loc::SourceLocation,
    pub name: String,
    pub type_annotation: TypeAnnotation,
}
impl FieldDef {
    pub fn argument(&self, name: &str) -> Option<&ArgumentDef> {
        self.arguments.get(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeDef {
    pub def_location: loc::SourceLocation,
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectTypeDef {
    pub def_location: loc::SourceLocation,
    pub fields: IndexMap<String, TypeAnnotation>,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceTypeDef {
    pub def_location: loc::SourceLocation,
    pub fields: IndexMap<String, FieldDef>,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeDef {
    pub def_location: loc::SourceLocation,
    pub fields: IndexMap<String, FieldDef>,
    pub interfaces: Vec<String>,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeDef {
    pub def_location: loc::SourceLocation,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeDef {
    pub def_location: loc::SourceLocation,
    pub members: Vec<String>,
    pub name: String,
}

/// A type defined by the server schema or by a client schema extension.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphQLType {
    Enum(EnumTypeDef),
    InputObject(InputObjectTypeDef),
    Interface(InterfaceTypeDef),
    Object(ObjectTypeDef),
    Scalar(ScalarTypeDef),
    Union(UnionTypeDef),
}
impl GraphQLType {
    pub fn name(&self) -> &str {
        match self {
            Self::Enum(t) => t.name.as_str(),
            Self::InputObject(t) => t.name.as_str(),
            Self::Interface(t) => t.name.as_str(),
            Self::Object(t) => t.name.as_str(),
            Self::Scalar(t) => t.name.as_str(),
            Self::Union(t) => t.name.as_str(),
        }
    }

    pub fn def_location(&self) -> &loc::SourceLocation {
        match self {
            Self::Enum(t) => &t.def_location,
            Self::InputObject(t) => &t.def_location,
            Self::Interface(t) => &t.def_location,
            Self::Object(t) => &t.def_location,
            Self::Scalar(t) => &t.def_location,
            Self::Union(t) => &t.def_location,
        }
    }

    /// Fields selectable on this type (objects and interfaces only).
    pub fn fields(&self) -> Option<&indexmap::IndexMap<String, FieldDef>> {
        match self {
            Self::Interface(t) => Some(&t.fields),
            Self::Object(t) => Some(&t.fields),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields().and_then(|fields| fields.get(name))
    }

    /// Interfaces and unions: types whose concrete shape is only known per
    /// response object.
    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Union(_))
    }

    /// Types that can carry a sub-selection.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Object(_) | Self::Union(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Lowercase kind name for use in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Enum(_) => "enum",
            Self::InputObject(_) => "input object",
            Self::Interface(_) => "interface",
            Self::Object(_) => "object",
            Self::Scalar(_) => "scalar",
            Self::Union(_) => "union",
        }
    }
}
