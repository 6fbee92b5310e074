use js_sys::Function;
use web_sys::{Document, Node as WsNode};

use crate::{dom::EventType, error::RenderError};

/// Information required to build a [`web_sys::Node`].
enum NodeType {
    /// A [`web_sys::Text`] node with the contained content.
    Text(String),

    /// A [`web_sys::Element`] of the contained kind (eg `p`, `div`).
    Element(String),

    /// A node that was already created, and only needs to be placed.
    Existing(WsNode),
}

/// Friendly interface for describing a small tree of DOM nodes before creating it.
pub struct Node {
    node_type: NodeType,
    attributes: Vec<(String, String)>,
    events: Vec<(EventType, Function)>,
    children: Vec<Node>,
}

impl Node {
    fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            attributes: Vec::new(),
            events: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text<S>(content: S) -> Self
    where
        S: AsRef<str>,
    {
        Self::new(NodeType::Text(content.as_ref().to_string()))
    }

    pub fn element<S>(kind: S) -> Self
    where
        S: AsRef<str>,
    {
        Self::new(NodeType::Element(kind.as_ref().to_string()))
    }

    pub fn existing<N>(node: &N) -> Self
    where
        N: AsRef<WsNode>,
    {
        Self::new(NodeType::Existing(node.as_ref().clone()))
    }

    pub fn with_class<S>(self, class: S) -> Self
    where
        S: AsRef<str>,
    {
        self.with_attribute("class", class)
    }

    pub fn with_attribute<K, V>(mut self, key: K, value: V) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.attributes
            .push((key.as_ref().to_string(), value.as_ref().to_string()));
        self
    }

    pub fn with_event(mut self, event_type: EventType, listener: Function) -> Self {
        self.events.push((event_type, listener));
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        self.children.extend(children);
        self
    }

    /// Build the [`web_sys::Node`] tree described by this node.
    pub fn create_node(self, document: &Document) -> Result<WsNode, RenderError> {
        let node: WsNode = match self.node_type {
            NodeType::Element(element_kind) => {
                let element = document.create_element(&element_kind)?;

                for (key, value) in &self.attributes {
                    element.set_attribute(key, value)?;
                }

                element.into()
            }
            NodeType::Text(text_content) => document.create_text_node(&text_content).into(),
            NodeType::Existing(node) => node,
        };

        for (event_type, listener) in &self.events {
            node.add_event_listener_with_callback(event_type.name(), listener)?;
        }

        for child in self.children {
            node.append_child(&child.create_node(document)?)?;
        }

        Ok(node)
    }
}
