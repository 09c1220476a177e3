mod artifact;
mod codegen_ast;
mod persisted_queries;
mod printer;

pub use artifact::Artifact;
pub use artifact::ModuleDescriptor;
pub use artifact::build_artifact;
pub use artifact::sha256_hex;
pub use codegen_ast::ConcreteDocument;
pub use codegen_ast::ConcreteSelection;
pub use persisted_queries::PersistedQueryMap;
pub use printer::print_document;

#[cfg(test)]
mod tests;
