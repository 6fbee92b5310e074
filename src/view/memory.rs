//! Headless views over a [`MemorySurface`]. Every view the platform builds is remembered, so that
//! user interaction can be simulated against whatever is currently on screen.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::{PointEditView, PointView, SortView, View, ViewFactory};
use crate::{
    dom::{
        memory::{MemoryNode, MemorySurface},
        KeyHandler, RenderPosition, Surface,
    },
    error::RenderError,
    model::{Point, PointId, SortOrder},
    util::{HandlerSlot, Subscription},
};

#[derive(Clone)]
pub struct MemoryView {
    node: MemoryNode,
}

impl View<MemoryNode> for MemoryView {
    fn node(&self) -> &MemoryNode {
        &self.node
    }
}

#[derive(Clone)]
pub struct MemoryPointView {
    node: MemoryNode,
    point: Point,
    edit_click: HandlerSlot<()>,
}

impl MemoryPointView {
    /// The point as it is displayed.
    pub fn point(&self) -> &Point {
        &self.point
    }
}

impl View<MemoryNode> for MemoryPointView {
    fn node(&self) -> &MemoryNode {
        &self.node
    }
}

impl PointView<MemoryNode> for MemoryPointView {
    fn set_edit_click_handler(&self, handler: Box<dyn Fn()>) {
        self.edit_click.set(move |()| handler());
    }
}

#[derive(Clone)]
pub struct MemoryPointEditView {
    node: MemoryNode,
    /// Current value of the form fields.
    draft: Rc<RefCell<Point>>,
    submit: HandlerSlot<Point>,
    reset: HandlerSlot<()>,
}

impl MemoryPointEditView {
    pub fn draft(&self) -> Point {
        self.draft.borrow().clone()
    }

    /// Run the submit handler with the current fields, mounted or not.
    #[cfg(test)]
    pub(crate) fn emit_submit(&self) -> bool {
        self.submit.emit(self.draft())
    }
}

impl View<MemoryNode> for MemoryPointEditView {
    fn node(&self) -> &MemoryNode {
        &self.node
    }
}

impl PointEditView<MemoryNode> for MemoryPointEditView {
    fn set_form_submit_handler(&self, handler: Box<dyn Fn(Point)>) {
        self.submit.set(handler);
    }

    fn set_form_reset_handler(&self, handler: Box<dyn Fn()>) {
        self.reset.set(move |()| handler());
    }

    fn reset(&self, point: &Point) {
        *self.draft.borrow_mut() = point.clone();
    }
}

#[derive(Clone)]
pub struct MemorySortView {
    node: MemoryNode,
    current: SortOrder,
    sort_change: HandlerSlot<SortOrder>,
}

impl MemorySortView {
    pub fn current(&self) -> SortOrder {
        self.current
    }
}

impl View<MemoryNode> for MemorySortView {
    fn node(&self) -> &MemoryNode {
        &self.node
    }
}

impl SortView<MemoryNode> for MemorySortView {
    fn set_sort_change_handler(&self, handler: Box<dyn Fn(SortOrder)>) {
        self.sort_change.set(handler);
    }
}

/// Latest views built for each purpose.
#[derive(Default)]
struct Built {
    point_views: HashMap<PointId, MemoryPointView>,
    edit_views: HashMap<PointId, MemoryPointEditView>,
    sort_view: Option<MemorySortView>,
    point_view_count: usize,
}

/// Headless platform, building labelled [`MemoryNode`]s:
///
/// - `point:<id>` and `edit:<id>` for a point's display and edit views
/// - `sort:<order>` for the sort controls
/// - `list` and `empty` for the list container and the placeholder
#[derive(Clone, Default)]
pub struct MemoryPlatform {
    surface: MemorySurface,
    built: Rc<RefCell<Built>>,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest display view built for `id`.
    pub fn point_view_for(&self, id: PointId) -> Option<MemoryPointView> {
        self.built.borrow().point_views.get(&id).cloned()
    }

    /// Latest edit view built for `id`.
    pub fn edit_view_for(&self, id: PointId) -> Option<MemoryPointEditView> {
        self.built.borrow().edit_views.get(&id).cloned()
    }

    pub fn current_sort_view(&self) -> Option<MemorySortView> {
        self.built.borrow().sort_view.clone()
    }

    /// Number of display views built so far.
    pub fn point_view_count(&self) -> usize {
        self.built.borrow().point_view_count
    }

    pub fn key_listener_count(&self) -> usize {
        self.surface.key_listener_count()
    }

    /// Click the edit button of the point `id`. Returns `false` if its display view is not on
    /// screen.
    pub fn click_edit(&self, id: PointId) -> bool {
        match self.point_view_for(id) {
            Some(view) if view.node.is_mounted() => view.edit_click.emit(()),
            _ => false,
        }
    }

    /// Change the fields of the edit form of `id` without submitting.
    pub fn edit_draft<F>(&self, id: PointId, edit: F) -> bool
    where
        F: FnOnce(&mut Point),
    {
        match self.edit_view_for(id) {
            Some(view) if view.node.is_mounted() => {
                edit(&mut view.draft.borrow_mut());
                true
            }
            _ => false,
        }
    }

    /// Submit the edit form of `id` with its current fields.
    pub fn submit(&self, id: PointId) -> bool {
        match self.edit_view_for(id) {
            Some(view) if view.node.is_mounted() => view.submit.emit(view.draft()),
            _ => false,
        }
    }

    /// Press the cancel button of the edit form of `id`.
    pub fn cancel(&self, id: PointId) -> bool {
        match self.edit_view_for(id) {
            Some(view) if view.node.is_mounted() => view.reset.emit(()),
            _ => false,
        }
    }

    pub fn select_sort(&self, order: SortOrder) -> bool {
        match self.current_sort_view() {
            Some(view) if view.node.is_mounted() => view.sort_change.emit(order),
            _ => false,
        }
    }

    pub fn press_key(&self, key: &str) -> bool {
        self.surface.press_key(key)
    }
}

impl Surface for MemoryPlatform {
    type Node = MemoryNode;

    fn render(
        &self,
        node: &MemoryNode,
        position: RenderPosition<'_, MemoryNode>,
    ) -> Result<(), RenderError> {
        self.surface.render(node, position)
    }

    fn detach(&self, node: &MemoryNode) -> Result<(), RenderError> {
        self.surface.detach(node)
    }

    fn listen_key_down(&self, handler: KeyHandler) -> Result<Subscription, RenderError> {
        self.surface.listen_key_down(handler)
    }
}

impl ViewFactory for MemoryPlatform {
    fn point_view(&self, point: &Point) -> Result<Box<dyn PointView<MemoryNode>>, RenderError> {
        let view = MemoryPointView {
            node: MemoryNode::new(format!("point:{}", point.id)),
            point: point.clone(),
            edit_click: HandlerSlot::new(),
        };

        let mut built = self.built.borrow_mut();
        built.point_views.insert(point.id, view.clone());
        built.point_view_count += 1;

        Ok(Box::new(view))
    }

    fn point_edit_view(
        &self,
        point: &Point,
    ) -> Result<Box<dyn PointEditView<MemoryNode>>, RenderError> {
        let view = MemoryPointEditView {
            node: MemoryNode::new(format!("edit:{}", point.id)),
            draft: Rc::new(RefCell::new(point.clone())),
            submit: HandlerSlot::new(),
            reset: HandlerSlot::new(),
        };

        self.built
            .borrow_mut()
            .edit_views
            .insert(point.id, view.clone());

        Ok(Box::new(view))
    }

    fn sort_view(&self, current: SortOrder) -> Result<Box<dyn SortView<MemoryNode>>, RenderError> {
        let view = MemorySortView {
            node: MemoryNode::new(format!("sort:{}", current.key())),
            current,
            sort_change: HandlerSlot::new(),
        };

        self.built.borrow_mut().sort_view = Some(view.clone());

        Ok(Box::new(view))
    }

    fn empty_view(&self) -> Result<Box<dyn View<MemoryNode>>, RenderError> {
        Ok(Box::new(MemoryView {
            node: MemoryNode::new("empty"),
        }))
    }

    fn list_view(&self) -> Result<Box<dyn View<MemoryNode>>, RenderError> {
        Ok(Box::new(MemoryView {
            node: MemoryNode::new("list"),
        }))
    }
}
