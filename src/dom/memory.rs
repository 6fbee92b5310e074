//! A headless [`Surface`], keeping a tree of labelled nodes in memory. Used to drive the
//! presenters without a browser.

use std::{
    cell::RefCell,
    collections::BTreeMap,
    fmt,
    rc::{Rc, Weak},
};

use super::{KeyHandler, RenderPosition, Surface};
use crate::{error::RenderError, util::Subscription};

struct NodeData {
    label: String,
    parent: Weak<RefCell<NodeData>>,
    children: Vec<MemoryNode>,
}

/// A node in the in-memory tree. Clones refer to the same node, and equality is identity.
#[derive(Clone)]
pub struct MemoryNode(Rc<RefCell<NodeData>>);

impl MemoryNode {
    /// Create a new detached node.
    pub fn new<S>(label: S) -> Self
    where
        S: Into<String>,
    {
        Self(Rc::new(RefCell::new(NodeData {
            label: label.into(),
            parent: Weak::new(),
            children: Vec::new(),
        })))
    }

    pub fn label(&self) -> String {
        self.0.borrow().label.clone()
    }

    pub fn parent(&self) -> Option<MemoryNode> {
        self.0.borrow().parent.upgrade().map(MemoryNode)
    }

    pub fn is_mounted(&self) -> bool {
        self.parent().is_some()
    }

    pub fn children(&self) -> Vec<MemoryNode> {
        self.0.borrow().children.clone()
    }

    /// Labels of the direct children, in order.
    pub fn child_labels(&self) -> Vec<String> {
        self.0
            .borrow()
            .children
            .iter()
            .map(MemoryNode::label)
            .collect()
    }

    fn set_parent(&self, parent: Option<&MemoryNode>) {
        self.0.borrow_mut().parent = parent
            .map(|parent| Rc::downgrade(&parent.0))
            .unwrap_or_default();
    }

    fn position_in(&self, parent: &MemoryNode) -> Option<usize> {
        parent
            .0
            .borrow()
            .children
            .iter()
            .position(|child| child == self)
    }
}

impl PartialEq for MemoryNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for MemoryNode {}

impl fmt::Debug for MemoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();

        if data.children.is_empty() {
            write!(f, "{}", data.label)
        } else {
            f.debug_tuple(&data.label).field(&data.children).finish()
        }
    }
}

#[derive(Default)]
struct KeyListeners {
    next_id: u64,
    handlers: BTreeMap<u64, KeyHandler>,
}

/// In-memory rendering surface.
#[derive(Clone, Default)]
pub struct MemorySurface {
    key_listeners: Rc<RefCell<KeyListeners>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch a key press to every registered listener, returning whether any of them
    /// handled it.
    pub fn press_key(&self, key: &str) -> bool {
        // Listeners may (un)register others while running
        let handlers = self
            .key_listeners
            .borrow()
            .handlers
            .values()
            .cloned()
            .collect::<Vec<_>>();

        handlers
            .into_iter()
            .fold(false, |handled, handler| handler(key) || handled)
    }

    pub fn key_listener_count(&self) -> usize {
        self.key_listeners.borrow().handlers.len()
    }
}

impl Surface for MemorySurface {
    type Node = MemoryNode;

    fn render(
        &self,
        node: &MemoryNode,
        position: RenderPosition<'_, MemoryNode>,
    ) -> Result<(), RenderError> {
        if node.is_mounted() {
            return Err(RenderError::AlreadyMounted);
        }

        match position {
            RenderPosition::Append(parent) => {
                parent.0.borrow_mut().children.push(node.clone());
                node.set_parent(Some(parent));
            }
            RenderPosition::Replace(old) => {
                let parent = old.parent().ok_or(RenderError::NotMounted)?;
                let index = old.position_in(&parent).ok_or(RenderError::NotMounted)?;

                parent.0.borrow_mut().children[index] = node.clone();
                node.set_parent(Some(&parent));
                old.set_parent(None);
            }
        }

        tracing::trace!(node = ?node.label(), relative_to = ?position.target().label(), "rendered");

        Ok(())
    }

    fn detach(&self, node: &MemoryNode) -> Result<(), RenderError> {
        if let Some(parent) = node.parent() {
            if let Some(index) = node.position_in(&parent) {
                parent.0.borrow_mut().children.remove(index);
            }
            node.set_parent(None);
        }

        Ok(())
    }

    fn listen_key_down(&self, handler: KeyHandler) -> Result<Subscription, RenderError> {
        let id = {
            let mut listeners = self.key_listeners.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.handlers.insert(id, handler);
            id
        };

        let listeners = Rc::downgrade(&self.key_listeners);
        Ok(Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().handlers.remove(&id);
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn attach_and_replace_keep_position() {
        let surface = MemorySurface::new();
        let root = MemoryNode::new("root");
        let a = MemoryNode::new("a");
        let b = MemoryNode::new("b");
        let c = MemoryNode::new("c");

        surface.attach(&a, &root).unwrap();
        surface.attach(&b, &root).unwrap();
        surface.replace(&c, &a).unwrap();

        assert_eq!(root.child_labels(), vec!["c", "b"]);
        assert!(!a.is_mounted());
        assert_eq!(c.parent(), Some(root));
    }

    #[test]
    fn replace_requires_mounted_target() {
        let surface = MemorySurface::new();

        assert!(matches!(
            surface.replace(&MemoryNode::new("new"), &MemoryNode::new("old")),
            Err(RenderError::NotMounted)
        ));
    }

    #[test]
    fn attach_rejects_mounted_node() {
        let surface = MemorySurface::new();
        let root = MemoryNode::new("root");
        let other = MemoryNode::new("other");
        let node = MemoryNode::new("node");

        surface.attach(&node, &root).unwrap();
        assert!(matches!(
            surface.attach(&node, &other),
            Err(RenderError::AlreadyMounted)
        ));
    }

    #[test]
    fn detach_is_idempotent() {
        let surface = MemorySurface::new();
        let root = MemoryNode::new("root");
        let node = MemoryNode::new("node");

        surface.attach(&node, &root).unwrap();
        surface.detach(&node).unwrap();
        surface.detach(&node).unwrap();

        assert!(root.children().is_empty());
        assert!(!node.is_mounted());
    }

    #[test]
    fn key_listener_lives_with_subscription() {
        let surface = MemorySurface::new();
        let presses = Rc::new(Cell::new(0));

        let subscription = surface
            .listen_key_down(Rc::new({
                let presses = Rc::clone(&presses);
                move |key| {
                    presses.set(presses.get() + 1);
                    key == "Escape"
                }
            }))
            .unwrap();

        assert!(surface.press_key("Escape"));
        assert!(!surface.press_key("Enter"));
        assert_eq!(surface.key_listener_count(), 1);

        drop(subscription);

        assert!(!surface.press_key("Escape"));
        assert_eq!(presses.get(), 2);
        assert_eq!(surface.key_listener_count(), 0);
    }
}
