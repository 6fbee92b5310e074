//! Contracts of the visual components the presenters drive. A view owns exactly one root node,
//! and reports user intent through the handlers bound to it.

pub mod memory;
pub mod web;

use crate::{
    dom::Surface,
    error::RenderError,
    model::{Point, SortOrder},
};

pub trait View<N> {
    /// Root node of the view.
    fn node(&self) -> &N;
}

/// Read only representation of a point.
pub trait PointView<N>: View<N> {
    fn set_edit_click_handler(&self, handler: Box<dyn Fn()>);
}

/// Edit form for a point.
pub trait PointEditView<N>: View<N> {
    /// Called with the edited point when the form is submitted.
    fn set_form_submit_handler(&self, handler: Box<dyn Fn(Point)>);

    fn set_form_reset_handler(&self, handler: Box<dyn Fn()>);

    /// Restore the form fields to the values of `point`, discarding unsaved changes.
    fn reset(&self, point: &Point);
}

pub trait SortView<N>: View<N> {
    fn set_sort_change_handler(&self, handler: Box<dyn Fn(SortOrder)>);
}

/// A [`Surface`] that can also build the views rendered onto it.
pub trait ViewFactory: Surface {
    fn point_view(&self, point: &Point) -> Result<Box<dyn PointView<Self::Node>>, RenderError>;

    fn point_edit_view(
        &self,
        point: &Point,
    ) -> Result<Box<dyn PointEditView<Self::Node>>, RenderError>;

    /// Sort controls, with `current` shown as selected.
    fn sort_view(&self, current: SortOrder) -> Result<Box<dyn SortView<Self::Node>>, RenderError>;

    /// Placeholder shown instead of the list when there is nothing to show.
    fn empty_view(&self) -> Result<Box<dyn View<Self::Node>>, RenderError>;

    /// Container the point views are rendered into.
    fn list_view(&self) -> Result<Box<dyn View<Self::Node>>, RenderError>;
}
