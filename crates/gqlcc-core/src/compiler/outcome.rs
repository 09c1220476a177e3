/// The result of one compile cycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompileOutcome {
    /// At least one artifact was written or deleted (or, in validate mode,
    /// would have been).
    Changes,
    /// A user error or broken invariant was reported; affected writers
    /// performed zero writes.
    Error,
    /// The on-disk tree already matches the sources.
    NoChanges,
}
impl std::fmt::Display for CompileOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Changes => "CHANGES",
            Self::Error => "ERROR",
            Self::NoChanges => "NO_CHANGES",
        })
    }
}
