//! Browser views, rendered with `web-sys`. The markup is kept to the minimum the presenters and
//! their event contracts need.

mod events;
mod node;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement, Node as WsNode};

use self::{events::emit_into, node::Node};
use super::{PointEditView, PointView, SortView, View, ViewFactory};
use crate::{
    dom::{web::WebSurface, EventType, KeyHandler, RenderPosition, Surface},
    error::RenderError,
    model::{Point, SortOrder},
    util::{HandlerSlot, Subscription},
};

pub struct WebView {
    node: WsNode,
}

impl View<WsNode> for WebView {
    fn node(&self) -> &WsNode {
        &self.node
    }
}

pub struct WebPointView {
    node: WsNode,
    edit_click: HandlerSlot<()>,
}

impl WebPointView {
    fn new(document: &Document, point: &Point) -> Result<Self, RenderError> {
        let edit_click = HandlerSlot::new();

        let node = Node::element("li")
            .with_class("trip-events__item")
            .with_child(
                Node::element("div")
                    .with_class("event")
                    .with_child(
                        Node::element("time")
                            .with_class("event__date")
                            .with_attribute("datetime", point.date_from.format("%Y-%m-%d").to_string())
                            .with_child(Node::text(point.date_from.format("%b %d").to_string())),
                    )
                    .with_child(
                        Node::element("h3").with_class("event__title").with_child(Node::text(
                            format!("{} {}", point.kind.label(), point.destination),
                        )),
                    )
                    .with_child(
                        Node::element("p").with_class("event__schedule").with_child(Node::text(
                            format!(
                                "{} - {}",
                                point.date_from.format("%H:%M"),
                                point.date_to.format("%H:%M")
                            ),
                        )),
                    )
                    .with_child(
                        Node::element("p")
                            .with_class("event__price")
                            .with_child(Node::text(format!("€ {}", point.base_price))),
                    )
                    .with_child(
                        Node::element("button")
                            .with_class("event__rollup-btn")
                            .with_attribute("type", "button")
                            .with_event(EventType::Click, emit_into(&edit_click, ()))
                            .with_child(Node::text("Open event")),
                    ),
            )
            .create_node(document)?;

        Ok(Self { node, edit_click })
    }
}

impl View<WsNode> for WebPointView {
    fn node(&self) -> &WsNode {
        &self.node
    }
}

impl PointView<WsNode> for WebPointView {
    fn set_edit_click_handler(&self, handler: Box<dyn Fn()>) {
        self.edit_click.set(move |()| handler());
    }
}

pub struct WebPointEditView {
    node: WsNode,
    destination: HtmlInputElement,
    price: HtmlInputElement,
    submit: HandlerSlot<Point>,
    reset: HandlerSlot<()>,
}

impl WebPointEditView {
    fn new(document: &Document, point: &Point) -> Result<Self, RenderError> {
        let destination = input(document, "event-destination", "text")?;
        let price = input(document, "event-price", "number")?;
        let submit = HandlerSlot::<Point>::new();
        let reset = HandlerSlot::new();

        let on_submit = events::listener({
            let destination = destination.clone();
            let price = price.clone();
            let submit = submit.clone();
            // Edits are applied on top of the point the form was built for
            let base = point.clone();
            move |event| {
                event.prevent_default();

                let mut point = base.clone();
                point.destination = destination.value();
                if let Ok(base_price) = price.value().parse() {
                    point.base_price = base_price;
                }

                submit.emit(point);
            }
        });

        let node = Node::element("li")
            .with_class("trip-events__item")
            .with_child(
                Node::element("form")
                    .with_class("event event--edit")
                    .with_event(EventType::Submit, on_submit)
                    .with_event(EventType::Reset, emit_into(&reset, ()))
                    .with_child(labelled("Destination", &destination))
                    .with_child(labelled("Price", &price))
                    .with_child(
                        Node::element("button")
                            .with_class("event__save-btn")
                            .with_attribute("type", "submit")
                            .with_child(Node::text("Save")),
                    )
                    .with_child(
                        Node::element("button")
                            .with_class("event__reset-btn")
                            .with_attribute("type", "reset")
                            .with_child(Node::text("Cancel")),
                    ),
            )
            .create_node(document)?;

        let view = Self {
            node,
            destination,
            price,
            submit,
            reset,
        };
        view.fill(point);

        Ok(view)
    }

    fn fill(&self, point: &Point) {
        self.destination.set_value(&point.destination);
        self.price.set_value(&point.base_price.to_string());
    }
}

impl View<WsNode> for WebPointEditView {
    fn node(&self) -> &WsNode {
        &self.node
    }
}

impl PointEditView<WsNode> for WebPointEditView {
    fn set_form_submit_handler(&self, handler: Box<dyn Fn(Point)>) {
        self.submit.set(handler);
    }

    fn set_form_reset_handler(&self, handler: Box<dyn Fn()>) {
        self.reset.set(move |()| handler());
    }

    fn reset(&self, point: &Point) {
        self.fill(point);
    }
}

fn input(document: &Document, name: &str, kind: &str) -> Result<HtmlInputElement, RenderError> {
    let input = document
        .create_element("input")?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| RenderError::Dom("created element is not an input".into()))?;

    input.set_name(name);
    input.set_type(kind);
    input.set_class_name("event__input");

    Ok(input)
}

fn labelled(label: &str, input: &HtmlInputElement) -> Node {
    Node::element("label")
        .with_class("event__field")
        .with_child(Node::text(label))
        .with_child(Node::existing(input))
}

pub struct WebSortView {
    node: WsNode,
    sort_change: HandlerSlot<SortOrder>,
}

impl WebSortView {
    fn new(document: &Document, current: SortOrder) -> Result<Self, RenderError> {
        let sort_change = HandlerSlot::new();

        let items = SortOrder::ALL.into_iter().map(|order| {
            let id = format!("sort-{}", order.key());

            let mut radio = Node::element("input")
                .with_class("trip-sort__input")
                .with_attribute("type", "radio")
                .with_attribute("name", "trip-sort")
                .with_attribute("id", &id)
                .with_attribute("value", order.key())
                .with_event(EventType::Click, emit_into(&sort_change, order));
            if order == current {
                radio = radio.with_attribute("checked", "");
            }

            Node::element("div")
                .with_class(format!("trip-sort__item trip-sort__item--{}", order.key()))
                .with_child(radio)
                .with_child(
                    Node::element("label")
                        .with_class("trip-sort__btn")
                        .with_attribute("for", &id)
                        .with_child(Node::text(order.label())),
                )
        });

        let node = Node::element("form")
            .with_class("trip-events__trip-sort trip-sort")
            .with_children(items.collect::<Vec<_>>())
            .create_node(document)?;

        Ok(Self { node, sort_change })
    }
}

impl View<WsNode> for WebSortView {
    fn node(&self) -> &WsNode {
        &self.node
    }
}

impl SortView<WsNode> for WebSortView {
    fn set_sort_change_handler(&self, handler: Box<dyn Fn(SortOrder)>) {
        self.sort_change.set(handler);
    }
}

/// Renders presenters into a browser document.
#[derive(Clone)]
pub struct WebPlatform {
    surface: WebSurface,
}

impl WebPlatform {
    pub fn new(document: &Document) -> Self {
        Self {
            surface: WebSurface::new(document),
        }
    }

    fn document(&self) -> &Document {
        self.surface.document()
    }
}

impl Surface for WebPlatform {
    type Node = WsNode;

    fn render(&self, node: &WsNode, position: RenderPosition<'_, WsNode>) -> Result<(), RenderError> {
        self.surface.render(node, position)
    }

    fn detach(&self, node: &WsNode) -> Result<(), RenderError> {
        self.surface.detach(node)
    }

    fn listen_key_down(&self, handler: KeyHandler) -> Result<Subscription, RenderError> {
        self.surface.listen_key_down(handler)
    }
}

impl ViewFactory for WebPlatform {
    fn point_view(&self, point: &Point) -> Result<Box<dyn PointView<WsNode>>, RenderError> {
        Ok(Box::new(WebPointView::new(self.document(), point)?))
    }

    fn point_edit_view(&self, point: &Point) -> Result<Box<dyn PointEditView<WsNode>>, RenderError> {
        Ok(Box::new(WebPointEditView::new(self.document(), point)?))
    }

    fn sort_view(&self, current: SortOrder) -> Result<Box<dyn SortView<WsNode>>, RenderError> {
        Ok(Box::new(WebSortView::new(self.document(), current)?))
    }

    fn empty_view(&self) -> Result<Box<dyn View<WsNode>>, RenderError> {
        let node = Node::element("p")
            .with_class("trip-events__msg")
            .with_child(Node::text("Click New Event to create your first point"))
            .create_node(self.document())?;

        Ok(Box::new(WebView { node }))
    }

    fn list_view(&self) -> Result<Box<dyn View<WsNode>>, RenderError> {
        let node = Node::element("ul")
            .with_class("trip-events__list")
            .create_node(self.document())?;

        Ok(Box::new(WebView { node }))
    }
}
