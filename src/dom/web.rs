//! [`Surface`] backed by the browser DOM.

use js_sys::Function;
use wasm_bindgen::{prelude::Closure, JsCast};
use web_sys::{Document, KeyboardEvent, Node};

use super::{EventType, KeyHandler, RenderPosition, Surface};
use crate::{error::RenderError, util::Subscription};

/// Renders into the document it was created with.
#[derive(Clone)]
pub struct WebSurface {
    document: Document,
}

impl WebSurface {
    pub fn new(document: &Document) -> Self {
        Self {
            document: document.clone(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Surface for WebSurface {
    type Node = Node;

    fn render(&self, node: &Node, position: RenderPosition<'_, Node>) -> Result<(), RenderError> {
        use RenderPosition::*;

        match position {
            Append(parent) => {
                parent.append_child(node)?;
            }
            Replace(old) => {
                old.parent_node()
                    .ok_or(RenderError::NotMounted)?
                    .replace_child(node, old)?;
            }
        }

        Ok(())
    }

    fn detach(&self, node: &Node) -> Result<(), RenderError> {
        if let Some(parent) = node.parent_node() {
            parent.remove_child(node)?;
        }

        Ok(())
    }

    fn listen_key_down(&self, handler: KeyHandler) -> Result<Subscription, RenderError> {
        let listener: Function = Closure::<dyn Fn(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if handler(&event.key()) {
                event.prevent_default();
            }
        })
        .into_js_value()
        .unchecked_into();

        self.document
            .add_event_listener_with_callback(EventType::KeyDown.name(), &listener)?;

        let document = self.document.clone();
        Ok(Subscription::new(move || {
            if let Err(error) = document
                .remove_event_listener_with_callback(EventType::KeyDown.name(), &listener)
            {
                tracing::error!(?error, "failed to remove key listener");
            }
        }))
    }
}
