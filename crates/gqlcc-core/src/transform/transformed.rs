/// What a transform handler decided to do with a node.
#[derive(Clone, Debug, PartialEq)]
pub enum Transformed<T> {
    /// Remove the node from its parent's list.
    Delete,
    /// The node (and everything under it) is unchanged.
    Keep,
    /// Substitute a single replacement node.
    Replace(T),
    /// Splice zero-or-more replacement nodes in place of the node.
    ReplaceMany(Vec<T>),
}
