use crate::codegen::sha256_hex;
use crate::compiler::ParserConfig;
use crate::errors::InternalError;
use crate::file_reader;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Path to content hash, for every file a parser currently owns.
pub type FileSnapshot = IndexMap<PathBuf, String>;

/// The per-cycle dirty set for one parser, computed by diffing snapshots.
#[derive(Clone, Debug, Default)]
pub struct FileChanges {
    pub changed: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
}
impl FileChanges {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.removed.is_empty()
    }
}

/// Walk a parser's base directory and snapshot every matching file.
pub fn scan_parser_files(
    config: &ParserConfig,
) -> Result<FileSnapshot, InternalError> {
    // Normalize the configured extensions so both `graphql` and `.graphql`
    // spellings work.
    let extensions: HashSet<String> = config
        .extensions
        .iter()
        .map(|ext| ext.trim_start_matches('.').to_string())
        .collect();

    let mut snapshot = FileSnapshot::new();
    for entry in WalkDir::new(config.base_dir.as_path())
        .sort_by_file_name()
        .follow_links(true)
    {
        let entry = entry.map_err(|err| InternalError::Io {
            action: "walk source directory",
            path: config.base_dir.clone(),
            err: err
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("walkdir loop")),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        // Generated artifacts are named `<doc>.graphql.<ext>`; never pick
        // them up as sources.
        let file_name = entry.file_name().to_string_lossy();
        if file_name.contains(".graphql.") {
            continue;
        }
        let matches = path
            .extension()
            .map(|ext| extensions.contains(&ext.to_string_lossy().to_string()))
            .unwrap_or(false);
        if !matches {
            log::trace!("Skipping non-matching file: {path:#?}.");
            continue;
        }

        let content =
            file_reader::read_content(path).map_err(|err| InternalError::Io {
                action: "read source file",
                path: path.to_path_buf(),
                err: std::io::Error::other(err.to_string()),
            })?;
        snapshot.insert(path.to_path_buf(), sha256_hex(content.as_str()));
    }

    Ok(snapshot)
}

/// Diff two snapshots into the set of files that must be re-parsed and the
/// set whose documents must be dropped.
pub fn diff_snapshots(
    previous: &FileSnapshot,
    next: &FileSnapshot,
) -> FileChanges {
    let mut changes = FileChanges::default();

    for (path, hash) in next {
        match previous.get(path) {
            Some(previous_hash) if previous_hash == hash => {},
            _ => changes.changed.push(path.clone()),
        }
    }

    for path in previous.keys() {
        if !next.contains_key(path) {
            changes.removed.push(path.clone());
        }
    }

    changes
}
