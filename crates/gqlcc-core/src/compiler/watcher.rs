use std::path::PathBuf;

/// The change-notification contract with the externally-owned file-watch
/// subscription.
///
/// Events are delivered on a `tokio` mpsc channel; anything arriving while a
/// cycle is in flight queues in the channel and is drained between cycles,
/// never preempting the running cycle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileEvent {
    pub kind: FileEventKind,
    pub path: PathBuf,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileEventKind {
    Created,
    Modified,
    Removed,
}
