mod argument;
mod builder;
mod condition;
mod connection_field;
mod connection_metadata;
mod defer;
mod directive_annotation;
mod document;
mod fragment;
mod fragment_spread;
mod handle;
mod inline_fragment;
mod linked_field;
mod metadata;
mod module_import;
mod operation;
mod scalar_field;
mod selection;
mod split_operation;
mod stream;
mod value;

pub use argument::Argument;
pub use builder::IrBuilder;
pub use condition::Condition;
pub use connection_field::ConnectionField;
pub use connection_field::ConnectionStream;
pub use connection_metadata::ConnectionMetadata;
pub use defer::Defer;
pub use directive_annotation::DirectiveAnnotation;
pub use directive_annotation::find_directive;
pub use directive_annotation::strip_directive;
pub use document::Document;
pub use fragment::Fragment;
pub use fragment_spread::FragmentSpread;
pub use handle::Handle;
pub use inline_fragment::InlineFragment;
pub use linked_field::LinkedField;
pub use metadata::Metadata;
pub use metadata::MetadataValue;
pub use module_import::ModuleImport;
pub use operation::Operation;
pub use operation::OperationKind;
pub use operation::VariableDefinition;
pub use scalar_field::ScalarField;
pub use selection::Selection;
pub use split_operation::SplitOperation;
pub use stream::Stream;
pub use value::ConstantValue;
pub use value::Value;

#[cfg(test)]
mod tests;
