use std::{
    cell::RefCell,
    collections::HashMap,
    rc::{Rc, Weak},
};

use super::{report, Mode, PointPresenter};
use crate::{
    config::PresenterConfig,
    error::RenderError,
    model::{update_item, Point, PointId, PointSource, SortOrder},
    view::{SortView, View, ViewFactory},
};

struct Inner<P>
where
    P: ViewFactory,
{
    platform: Rc<P>,

    /// Node the sort controls, and either the list or the placeholder, are rendered in.
    container: P::Node,

    source: Box<dyn PointSource>,

    config: PresenterConfig,

    /// Working copy of the points, in display order.
    points: Vec<Point>,

    current_sort: SortOrder,

    presenters: HashMap<PointId, PointPresenter<P>>,

    sort_view: Option<Box<dyn SortView<P::Node>>>,

    list_view: Option<Box<dyn View<P::Node>>>,

    empty_view: Option<Box<dyn View<P::Node>>>,
}

/// Presents the points of a trip as a sortable list, with at most one of them open for editing.
///
/// Clones share the same presenter.
pub struct TripPresenter<P>(Rc<RefCell<Inner<P>>>)
where
    P: ViewFactory;

impl<P> TripPresenter<P>
where
    P: ViewFactory + 'static,
{
    pub fn new<S>(platform: Rc<P>, container: P::Node, source: S, config: PresenterConfig) -> Self
    where
        S: 'static + PointSource,
    {
        Self(Rc::new(RefCell::new(Inner {
            platform,
            container,
            source: Box::new(source),
            current_sort: config.initial_sort,
            config,
            points: Vec::new(),
            presenters: HashMap::new(),
            sort_view: None,
            list_view: None,
            empty_view: None,
        })))
    }

    /// Take a snapshot of the source and render it, sorted by the configured initial order.
    pub fn init(&self) -> Result<(), RenderError> {
        let inner = &mut *self.0.borrow_mut();

        Self::clear_page(inner)?;

        inner.points = inner.source.points();
        inner.current_sort = inner.config.initial_sort;
        inner.current_sort.sort(&mut inner.points);

        tracing::debug!(count = inner.points.len(), "rendering trip");

        if inner.points.is_empty() {
            return Self::render_empty(inner);
        }

        self.render_sort(inner)?;
        self.render_list(inner)
    }

    /// Apply a point confirmed in an editor. Only the matching presenter is re-initialised.
    pub fn handle_point_change(&self, point: Point) -> Result<(), RenderError> {
        let presenter = {
            let mut inner = self.0.borrow_mut();

            if !update_item(&mut inner.points, &point) {
                tracing::warn!(id = %point.id, "ignoring change to unknown point");
                return Ok(());
            }

            inner.presenters.get(&point.id).cloned()
        };

        match presenter {
            Some(presenter) => presenter.init(point),
            None => Ok(()),
        }
    }

    /// Collapse every open editor. Presenters that are not editing are left alone.
    pub fn handle_mode_change(&self) -> Result<(), RenderError> {
        // Released before resetting, presenters may call back in
        let presenters = self
            .0
            .borrow()
            .presenters
            .values()
            .cloned()
            .collect::<Vec<_>>();

        presenters.iter().try_for_each(PointPresenter::reset_view)
    }

    /// Close any open editor, eg when the page loses focus.
    pub fn collapse_editors(&self) -> Result<(), RenderError> {
        self.handle_mode_change()
    }

    /// Re-sort and re-render the list. Selecting the current order does nothing.
    pub fn handle_sort_change(&self, order: SortOrder) -> Result<(), RenderError> {
        let inner = &mut *self.0.borrow_mut();

        if inner.current_sort == order {
            return Ok(());
        }

        tracing::debug!(from = ?inner.current_sort, to = ?order, "sorting points");

        order.sort(&mut inner.points);
        inner.current_sort = order;

        self.render_sort(inner)?;
        Self::clear_point_list(inner)?;
        self.render_list(inner)
    }

    pub fn points(&self) -> Vec<Point> {
        self.0.borrow().points.clone()
    }

    pub fn current_sort(&self) -> SortOrder {
        self.0.borrow().current_sort
    }

    pub fn presenter(&self, id: PointId) -> Option<PointPresenter<P>> {
        self.0.borrow().presenters.get(&id).cloned()
    }

    /// Ids with a registered presenter, in ascending order.
    pub fn presenter_ids(&self) -> Vec<PointId> {
        let mut ids = self
            .0
            .borrow()
            .presenters
            .keys()
            .copied()
            .collect::<Vec<_>>();
        ids.sort();
        ids
    }

    /// Number of presenters with an open editor.
    pub fn editing_count(&self) -> usize {
        self.0
            .borrow()
            .presenters
            .values()
            .filter(|presenter| presenter.mode() == Mode::Editing)
            .count()
    }

    fn upgrade(inner: &Weak<RefCell<Inner<P>>>) -> Option<Self> {
        inner.upgrade().map(Self)
    }

    fn render_empty(inner: &mut Inner<P>) -> Result<(), RenderError> {
        let view = inner.platform.empty_view()?;
        inner.platform.attach(view.node(), &inner.container)?;
        inner.empty_view = Some(view);

        Ok(())
    }

    /// Render the sort controls for the current order, in place of the previous ones if any.
    fn render_sort(&self, inner: &mut Inner<P>) -> Result<(), RenderError> {
        let view = inner.platform.sort_view(inner.current_sort)?;

        view.set_sort_change_handler(Box::new({
            let trip = Rc::downgrade(&self.0);
            move |order| {
                if let Some(trip) = Self::upgrade(&trip) {
                    report(trip.handle_sort_change(order));
                }
            }
        }));

        match &inner.sort_view {
            Some(previous) => inner.platform.replace(view.node(), previous.node())?,
            None => inner.platform.attach(view.node(), &inner.container)?,
        }
        inner.sort_view = Some(view);

        Ok(())
    }

    /// Render a presenter for every point, mounting the list container first if required.
    fn render_list(&self, inner: &mut Inner<P>) -> Result<(), RenderError> {
        if inner.list_view.is_none() {
            let view = inner.platform.list_view()?;
            inner.platform.attach(view.node(), &inner.container)?;
            inner.list_view = Some(view);
        }
        let Some(list) = inner.list_view.as_ref().map(|view| view.node().clone()) else {
            return Ok(());
        };

        for point in &inner.points {
            let presenter = self.create_point_presenter(inner, list.clone());
            presenter.init(point.clone())?;
            inner.presenters.insert(point.id, presenter);
        }

        Ok(())
    }

    fn create_point_presenter(&self, inner: &Inner<P>, container: P::Node) -> PointPresenter<P> {
        let trip = Rc::downgrade(&self.0);

        PointPresenter::new(
            Rc::clone(&inner.platform),
            container,
            &inner.config,
            {
                let trip = trip.clone();
                move |point| {
                    if let Some(trip) = Self::upgrade(&trip) {
                        report(trip.handle_point_change(point));
                    }
                }
            },
            move || {
                if let Some(trip) = Self::upgrade(&trip) {
                    report(trip.handle_mode_change());
                }
            },
        )
    }

    fn clear_point_list(inner: &mut Inner<P>) -> Result<(), RenderError> {
        for presenter in inner.presenters.values() {
            presenter.destroy()?;
        }
        inner.presenters.clear();

        Ok(())
    }

    fn clear_page(inner: &mut Inner<P>) -> Result<(), RenderError> {
        Self::clear_point_list(inner)?;

        if let Some(view) = inner.sort_view.take() {
            inner.platform.detach(view.node())?;
        }
        for view in [inner.list_view.take(), inner.empty_view.take()]
            .into_iter()
            .flatten()
        {
            inner.platform.detach(view.node())?;
        }

        Ok(())
    }
}

impl<P> Clone for TripPresenter<P>
where
    P: ViewFactory,
{
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}
