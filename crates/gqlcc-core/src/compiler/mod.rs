mod artifact_writer;
mod config;
mod file_source;
mod language;
mod outcome;
mod runner;
mod watcher;

pub use artifact_writer::ArtifactFileWriter;
pub use config::CompilerConfig;
pub use config::ParserConfig;
pub use config::WriterConfig;
pub use file_source::FileChanges;
pub use file_source::FileSnapshot;
pub use file_source::diff_snapshots;
pub use file_source::scan_parser_files;
pub use language::LanguagePlugin;
pub use language::plugin_for_tag;
pub use outcome::CompileOutcome;
pub use runner::CompilerPhase;
pub use runner::CompilerRunner;
pub use watcher::FileEvent;
pub use watcher::FileEventKind;

#[cfg(test)]
mod tests;
