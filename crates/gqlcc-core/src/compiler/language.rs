use crate::codegen::ModuleDescriptor;

/// One target-language backend, selected via configuration from a statically
/// registered table (no runtime module resolution).
#[derive(Clone, Copy, Debug)]
pub struct LanguagePlugin {
    /// Pure function from artifact descriptor to output text.
    pub format_module: fn(&ModuleDescriptor) -> String,
    /// Source-file extensions this language's parser accepts.
    pub input_extensions: &'static [&'static str],
    /// Extension of the generated artifact files.
    pub output_extension: &'static str,
    pub tag: &'static str,
}

static PLUGINS: &[LanguagePlugin] = &[LanguagePlugin {
    format_module: format_javascript_module,
    input_extensions: &["js", "jsx", "graphql"],
    output_extension: "graphql.js",
    tag: "javascript",
}];

pub fn plugin_for_tag(tag: &str) -> Option<&'static LanguagePlugin> {
    PLUGINS.iter().find(|plugin| plugin.tag == tag)
}

fn format_javascript_module(descriptor: &ModuleDescriptor) -> String {
    let doc_text_comment = match &descriptor.doc_text {
        Some(doc_text) => format!("\n/*\n{}\n*/\n", doc_text.trim()),
        None => String::new(),
    };
    let persisted_comment = match &descriptor.persisted_id {
        Some(id) => format!("// @relayRequestID {id}\n"),
        None => String::new(),
    };

    format!(
        "/**\n * {kind}: {name}\n */\n\n/* eslint-disable */\n\n'use strict';\n\
        \n{persisted_comment}{doc_text_comment}\nconst node = {concrete_text};\n\
        \nnode.hash = '{source_hash}';\n\nmodule.exports = node;\n",
        kind = descriptor.document_kind,
        name = descriptor.module_name,
        persisted_comment = persisted_comment,
        doc_text_comment = doc_text_comment,
        concrete_text = descriptor.concrete_text,
        source_hash = descriptor.source_hash,
    )
}
