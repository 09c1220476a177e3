/// A client-side handle attached to a field by a transform, instructing the
/// runtime to route the field's payload through a handler (e.g. the global
/// `"viewer"` handle).
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct Handle {
    pub key: String,
    pub name: String,
}
impl Handle {
    /// The handle key used when a transform does not need a custom one.
    pub const DEFAULT_KEY: &'static str = "";

    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            key: Self::DEFAULT_KEY.to_string(),
            name: name.as_ref().to_string(),
        }
    }
}
