use crate::feature_flags::FeatureFlags;
use crate::transforms::Pass;
use crate::transforms::default_pipeline;
use indexmap::IndexMap;
use std::path::PathBuf;

/// One named input source category: a base directory and the file extensions
/// to pick up under it.
#[derive(Clone, Debug)]
pub struct ParserConfig {
    pub base_dir: PathBuf,
    /// Extensions with or without a leading dot; normalized at scan time.
    pub extensions: Vec<String>,
}
impl ParserConfig {
    pub fn new(base_dir: impl Into<PathBuf>, extensions: &[&str]) -> Self {
        Self {
            base_dir: base_dir.into(),
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

/// One named output pipeline: which parser supplies its documents, which
/// parsers are resolvable-but-not-generated dependencies, and how artifacts
/// are produced.
#[derive(Clone, Debug)]
pub struct WriterConfig {
    /// Parsers whose documents resolve fragment spreads but are never
    /// independently code-generated.
    pub base_parsers: Vec<String>,
    /// Language-plugin tag, resolved against the static plugin table.
    pub language: String,
    pub output_dir: PathBuf,
    /// The parser whose documents this writer generates artifacts for.
    pub parser: String,
    /// The ordered pass list this writer runs.
    pub passes: Vec<Pass>,
    /// When set, the persisted-query side table is rewritten here each
    /// cycle.
    pub persisted_query_path: Option<PathBuf>,
}
impl WriterConfig {
    pub fn new(
        parser: impl AsRef<str>,
        language: impl AsRef<str>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            base_parsers: vec![],
            language: language.as_ref().to_string(),
            output_dir: output_dir.into(),
            parser: parser.as_ref().to_string(),
            passes: default_pipeline(),
            persisted_query_path: None,
        }
    }
}

/// Everything one [`CompilerRunner`](crate::compiler::CompilerRunner) run is
/// configured with.
#[derive(Clone, Debug, Default)]
pub struct CompilerConfig {
    pub feature_flags: FeatureFlags,
    /// Validate mode: run the identical pipeline, write nothing, report
    /// whether anything would change.
    pub only_validate: bool,
    pub parsers: IndexMap<String, ParserConfig>,
    pub writers: IndexMap<String, WriterConfig>,
}
