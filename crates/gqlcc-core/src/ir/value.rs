use crate::ast;
use indexmap::IndexMap;

/// A literal (variable-free) value.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ConstantValue {
    Bool(bool),
    Enum(String),
    Float(f64),
    Int(i64),
    Null,
    String(String),
}

/// The closed union of argument-value shapes.
///
/// Every directive/field argument in the IR is one of these; passes match
/// exhaustively instead of introspecting loosely-typed values.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum Value {
    List(Vec<Value>),
    Literal(ConstantValue),
    Object(IndexMap<String, Value>),
    Variable(String),
}
impl Value {
    pub(crate) fn from_ast(ast_value: &ast::operation::Value) -> Self {
        match ast_value {
            ast::operation::Value::Variable(var_name) =>
                Value::Variable(var_name.to_string()),

            ast::operation::Value::Int(value) =>
                Value::Literal(ConstantValue::Int(
                    value.as_i64().unwrap_or_default(),
                )),

            ast::operation::Value::Float(value) =>
                Value::Literal(ConstantValue::Float(*value)),

            ast::operation::Value::String(value) =>
                Value::Literal(ConstantValue::String(value.clone())),

            ast::operation::Value::Boolean(value) =>
                Value::Literal(ConstantValue::Bool(*value)),

            ast::operation::Value::Null =>
                Value::Literal(ConstantValue::Null),

            ast::operation::Value::Enum(value) =>
                Value::Literal(ConstantValue::Enum(value.to_string())),

            ast::operation::Value::List(values) =>
                Value::List(values.iter().map(Value::from_ast).collect()),

            ast::operation::Value::Object(entries) =>
                Value::Object(entries.iter().map(|(key, ast_value)|
                    (key.to_string(), Value::from_ast(ast_value))
                ).collect()),
        }
    }

    /// The string contents if this is a string literal.
    pub fn as_literal_str(&self) -> Option<&str> {
        match self {
            Self::Literal(ConstantValue::String(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_variable_name(&self) -> Option<&str> {
        match self {
            Self::Variable(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_literal_false(&self) -> bool {
        matches!(self, Self::Literal(ConstantValue::Bool(false)))
    }

    /// Integer literals and variable references are the two shapes accepted
    /// by `initial_count`-style arguments.
    pub fn is_int_or_variable(&self) -> bool {
        matches!(
            self,
            Self::Literal(ConstantValue::Int(_)) | Self::Variable(_),
        )
    }
}
