mod event;
pub mod memory;
mod render_position;
pub mod web;

use std::rc::Rc;

pub use event::EventType;
pub use render_position::RenderPosition;

use crate::{error::RenderError, util::Subscription};

/// Document level key handler. Receives the key name (eg `"Escape"`), and returns whether the
/// key was handled, in which case the backend suppresses its default action.
pub type KeyHandler = Rc<dyn Fn(&str) -> bool>;

/// The rendering primitives the presenters are built on. A surface knows how to place, swap and
/// remove its nodes, and how to listen for key presses on the whole document.
pub trait Surface {
    type Node: Clone + 'static;

    /// Render a detached `node` at the provided position.
    fn render(
        &self,
        node: &Self::Node,
        position: RenderPosition<'_, Self::Node>,
    ) -> Result<(), RenderError>;

    /// Unmount `node`. Does nothing if it is not mounted.
    fn detach(&self, node: &Self::Node) -> Result<(), RenderError>;

    /// Register a document level key listener, which stays registered for as long as the returned
    /// [`Subscription`] is alive.
    fn listen_key_down(&self, handler: KeyHandler) -> Result<Subscription, RenderError>;

    /// Mount `node` as the last child of `container`.
    fn attach(&self, node: &Self::Node, container: &Self::Node) -> Result<(), RenderError> {
        self.render(node, RenderPosition::Append(container))
    }

    /// Swap the mounted `old` node for `new`, in the same position.
    fn replace(&self, new: &Self::Node, old: &Self::Node) -> Result<(), RenderError> {
        self.render(new, RenderPosition::Replace(old))
    }
}
