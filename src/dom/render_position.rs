/// Possible ways that a node may be rendered relative to an existing one.
pub enum RenderPosition<'a, N> {
    /// Render as an appended child of the provided node.
    Append(&'a N),

    /// Replace the provided node, which must be mounted.
    Replace(&'a N),
}

impl<'a, N> RenderPosition<'a, N> {
    /// The node the position is expressed relative to.
    pub fn target(&self) -> &'a N {
        use RenderPosition::*;

        match self {
            Append(node) | Replace(node) => node,
        }
    }
}

impl<N> Clone for RenderPosition<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for RenderPosition<'_, N> {}
