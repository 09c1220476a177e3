use std::path::Path;
use std::path::PathBuf;

/// Very similar to graphql_parser's [Pos](graphql_parser::Pos), except it
/// includes a PathBuf to the file when one is known.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FilePosition {
    pub col: usize,
    pub file: Option<PathBuf>,
    pub line: usize,
}
impl FilePosition {
    pub(crate) fn from_pos(
        file: Option<&Path>,
        pos: graphql_parser::Pos,
    ) -> Self {
        Self {
            col: pos.column,
            file: file.map(|f| f.to_path_buf()),
            line: pos.line,
        }
    }
}
impl std::fmt::Display for FilePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(path) => write!(f, "{}:{}:{}", path.display(), self.line, self.col),
            None => write!(f, "{}:{}", self.line, self.col),
        }
    }
}

/// Where an IR node came from.
///
/// Nodes produced by a transform point back at the node they were derived
/// from so diagnostics raised against synthesized nodes can still cite the
/// user's source.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SourceLocation {
    /// A node synthesized from another node during a transform.
    Derived(Box<SourceLocation>),
    /// A node with no user-visible origin (e.g. an injected `__id` field).
    Generated,
    /// A node parsed out of an executable document.
    Source(FilePosition),
}
impl SourceLocation {
    pub fn from_ast_position(
        file: Option<&Path>,
        pos: &graphql_parser::Pos,
    ) -> Self {
        Self::Source(FilePosition::from_pos(file, *pos))
    }

    /// A new location derived from this one.
    pub fn to_derived(&self) -> Self {
        Self::Derived(Box::new(self.clone()))
    }

    /// Unwrap through any `Derived` layers to the underlying user-source
    /// position, if there is one.
    pub fn file_position(&self) -> Option<&FilePosition> {
        match self {
            Self::Derived(inner) => inner.file_position(),
            Self::Generated => None,
            Self::Source(pos) => Some(pos),
        }
    }
}
impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.file_position() {
            Some(pos) => pos.fmt(f),
            None => write!(f, "<generated>"),
        }
    }
}
