use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use super::report;
use crate::{
    config::PresenterConfig,
    dom::KeyHandler,
    error::RenderError,
    model::{Point, PointId},
    util::Subscription,
    view::{PointEditView, PointView, ViewFactory},
};

/// Which of its two views a [`PointPresenter`] is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Display,
    Editing,
}

/// Mode, along with anything only held while in it. The cancel key listener lives inside
/// [`State::Editing`], so leaving the editor by any path releases it.
enum State {
    Display,
    Editing { _cancel_listener: Subscription },
}

struct Views<N> {
    point: Box<dyn PointView<N>>,
    edit: Box<dyn PointEditView<N>>,
}

struct Inner<P>
where
    P: ViewFactory,
{
    platform: Rc<P>,

    /// Node the views of this point are rendered in.
    container: P::Node,

    cancel_key: String,

    /// Receives points confirmed in the editor.
    commit: Rc<dyn Fn(Point)>,

    /// Called right before this presenter opens its editor.
    mode_change: Rc<dyn Fn()>,

    /// Last point this presenter was initialised with.
    point: Option<Point>,

    views: Option<Views<P::Node>>,

    state: State,
}

/// Presents a single point, either as a read only item or as an edit form.
///
/// Clones share the same presenter.
pub struct PointPresenter<P>(Rc<RefCell<Inner<P>>>)
where
    P: ViewFactory;

impl<P> PointPresenter<P>
where
    P: ViewFactory + 'static,
{
    pub fn new<C, M>(
        platform: Rc<P>,
        container: P::Node,
        config: &PresenterConfig,
        commit: C,
        mode_change: M,
    ) -> Self
    where
        C: 'static + Fn(Point),
        M: 'static + Fn(),
    {
        Self(Rc::new(RefCell::new(Inner {
            platform,
            container,
            cancel_key: config.cancel_key.clone(),
            commit: Rc::new(commit),
            mode_change: Rc::new(mode_change),
            point: None,
            views: None,
            state: State::Display,
        })))
    }

    /// Build fresh views for `point`. The first call mounts the display view into the
    /// container; later calls swap in the new counterpart of whichever view is showing, keeping
    /// the current mode.
    pub fn init(&self, point: Point) -> Result<(), RenderError> {
        let platform = Rc::clone(&self.0.borrow().platform);

        let views = Views {
            point: platform.point_view(&point)?,
            edit: platform.point_edit_view(&point)?,
        };
        self.bind(&views);

        let inner = &mut *self.0.borrow_mut();

        match (&inner.views, &inner.state) {
            (None, _) => platform.attach(views.point.node(), &inner.container)?,
            (Some(previous), State::Display) => {
                platform.replace(views.point.node(), previous.point.node())?
            }
            (Some(previous), State::Editing { .. }) => {
                platform.replace(views.edit.node(), previous.edit.node())?
            }
        }

        tracing::trace!(id = %point.id, "point presenter initialised");

        inner.point = Some(point);
        // Releases the previous views
        inner.views = Some(views);

        Ok(())
    }

    /// Close the editor, discarding unsaved changes. Does nothing while displaying.
    pub fn reset_view(&self) -> Result<(), RenderError> {
        if self.mode() == Mode::Display {
            return Ok(());
        }

        self.restore_form();
        self.close_editor()
    }

    /// Remove both views from the container, whatever the mode.
    pub fn destroy(&self) -> Result<(), RenderError> {
        let inner = &mut *self.0.borrow_mut();

        inner.state = State::Display;

        if let Some(views) = inner.views.take() {
            inner.platform.detach(views.point.node())?;
            inner.platform.detach(views.edit.node())?;
        }

        Ok(())
    }

    pub fn mode(&self) -> Mode {
        match self.0.borrow().state {
            State::Display => Mode::Display,
            State::Editing { .. } => Mode::Editing,
        }
    }

    pub fn point(&self) -> Option<Point> {
        self.0.borrow().point.clone()
    }

    /// Whether both handles refer to the same presenter.
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn id(&self) -> Option<PointId> {
        self.0.borrow().point.as_ref().map(|point| point.id)
    }

    fn upgrade(inner: &Weak<RefCell<Inner<P>>>) -> Option<Self> {
        inner.upgrade().map(Self)
    }

    fn bind(&self, views: &Views<P::Node>) {
        let presenter = Rc::downgrade(&self.0);

        views.point.set_edit_click_handler(Box::new({
            let presenter = presenter.clone();
            move || {
                if let Some(presenter) = Self::upgrade(&presenter) {
                    report(presenter.open_editor());
                }
            }
        }));

        views.edit.set_form_submit_handler(Box::new({
            let presenter = presenter.clone();
            move |point| {
                if let Some(presenter) = Self::upgrade(&presenter) {
                    report(presenter.submit(point));
                }
            }
        }));

        views.edit.set_form_reset_handler(Box::new(move || {
            if let Some(presenter) = Self::upgrade(&presenter) {
                report(presenter.reset_view());
            }
        }));
    }

    fn open_editor(&self) -> Result<(), RenderError> {
        if self.mode() == Mode::Editing || self.0.borrow().views.is_none() {
            return Ok(());
        }

        tracing::debug!(id = ?self.id(), "opening editor");

        // Still displaying, so the broadcast only collapses the other presenters
        let mode_change = Rc::clone(&self.0.borrow().mode_change);
        mode_change();

        let platform = Rc::clone(&self.0.borrow().platform);
        let cancel_listener = platform.listen_key_down(self.cancel_key_handler())?;

        let inner = &mut *self.0.borrow_mut();
        if let Some(views) = &inner.views {
            platform.replace(views.edit.node(), views.point.node())?;
            inner.state = State::Editing {
                _cancel_listener: cancel_listener,
            };
        }

        Ok(())
    }

    fn close_editor(&self) -> Result<(), RenderError> {
        let inner = &mut *self.0.borrow_mut();

        if let State::Display = inner.state {
            return Ok(());
        }
        let Some(views) = &inner.views else {
            return Ok(());
        };

        inner.platform.replace(views.point.node(), views.edit.node())?;
        inner.state = State::Display;

        tracing::debug!(
            id = ?inner.point.as_ref().map(|point| point.id),
            "closed editor"
        );

        Ok(())
    }

    fn submit(&self, point: Point) -> Result<(), RenderError> {
        if self.mode() != Mode::Editing {
            return Ok(());
        }

        tracing::debug!(id = %point.id, "committing point");

        // May re-initialise this presenter, so nothing can be borrowed while it runs
        let commit = Rc::clone(&self.0.borrow().commit);
        commit(point);

        self.close_editor()
    }

    /// Reset the edit form to the last committed point.
    fn restore_form(&self) {
        let inner = self.0.borrow();

        if let (Some(views), Some(point)) = (&inner.views, &inner.point) {
            views.edit.reset(point);
        }
    }

    fn cancel_key_handler(&self) -> KeyHandler {
        let presenter = Rc::downgrade(&self.0);

        Rc::new(move |key| {
            let Some(presenter) = Self::upgrade(&presenter) else {
                return false;
            };

            if key != presenter.0.borrow().cancel_key || presenter.mode() != Mode::Editing {
                return false;
            }

            report(presenter.reset_view());
            true
        })
    }
}

impl<P> Clone for PointPresenter<P>
where
    P: ViewFactory,
{
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{
        dom::memory::MemoryNode,
        model::PointId,
        view::{memory::MemoryPlatform, View},
    };

    struct Fixture {
        platform: Rc<MemoryPlatform>,
        container: MemoryNode,
        presenter: PointPresenter<MemoryPlatform>,
        committed: Rc<RefCell<Vec<Point>>>,
        mode_changes: Rc<Cell<usize>>,
    }

    fn fixture() -> Fixture {
        let platform = Rc::new(MemoryPlatform::new());
        let container = MemoryNode::new("list");
        let committed = Rc::new(RefCell::new(Vec::new()));
        let mode_changes = Rc::new(Cell::new(0));

        let presenter = PointPresenter::new(
            Rc::clone(&platform),
            container.clone(),
            &PresenterConfig::default(),
            {
                let committed = Rc::clone(&committed);
                move |point| committed.borrow_mut().push(point)
            },
            {
                let mode_changes = Rc::clone(&mode_changes);
                move || mode_changes.set(mode_changes.get() + 1)
            },
        );
        presenter.init(Point::sample(1, 2, 50)).unwrap();

        Fixture {
            platform,
            container,
            presenter,
            committed,
            mode_changes,
        }
    }

    const ID: PointId = PointId::new(1);

    #[test]
    fn init_mounts_display_view() {
        let f = fixture();

        assert_eq!(f.container.child_labels(), vec!["point:1"]);
        assert_eq!(f.presenter.mode(), Mode::Display);
        assert_eq!(f.platform.key_listener_count(), 0);
    }

    #[test]
    fn edit_click_opens_editor() {
        let f = fixture();

        assert!(f.platform.click_edit(ID));

        assert_eq!(f.presenter.mode(), Mode::Editing);
        assert_eq!(f.container.child_labels(), vec!["edit:1"]);
        assert_eq!(f.mode_changes.get(), 1);
        assert_eq!(f.platform.key_listener_count(), 1);
    }

    #[test]
    fn submit_commits_and_closes() {
        let f = fixture();
        f.platform.click_edit(ID);

        f.platform.edit_draft(ID, |point| point.base_price = 75);
        assert!(f.platform.submit(ID));

        let committed = f.committed.borrow();
        assert_eq!(committed.len(), 1);
        assert_eq!(committed[0].base_price, 75);

        assert_eq!(f.presenter.mode(), Mode::Display);
        assert_eq!(f.container.child_labels(), vec!["point:1"]);
        assert_eq!(f.platform.key_listener_count(), 0);
    }

    #[test]
    fn cancel_key_discards_changes() {
        let f = fixture();
        f.platform.click_edit(ID);
        f.platform.edit_draft(ID, |point| point.destination = "Nowhere".into());

        assert!(f.platform.press_key("Escape"));

        assert!(f.committed.borrow().is_empty());
        assert_eq!(f.presenter.mode(), Mode::Display);
        assert_eq!(
            f.platform.edit_view_for(ID).unwrap().draft(),
            Point::sample(1, 2, 50)
        );
        assert_eq!(f.platform.key_listener_count(), 0);
    }

    #[test]
    fn other_keys_are_ignored() {
        let f = fixture();
        f.platform.click_edit(ID);

        assert!(!f.platform.press_key("Enter"));
        assert_eq!(f.presenter.mode(), Mode::Editing);
    }

    #[test]
    fn configured_cancel_key() {
        let platform = Rc::new(MemoryPlatform::new());
        let container = MemoryNode::new("list");
        let presenter = PointPresenter::new(
            Rc::clone(&platform),
            container,
            &PresenterConfig::default().with_cancel_key("q"),
            |_| {},
            || {},
        );
        presenter.init(Point::sample(1, 2, 50)).unwrap();
        platform.click_edit(ID);

        assert!(!platform.press_key("Escape"));
        assert!(platform.press_key("q"));
        assert_eq!(presenter.mode(), Mode::Display);
    }

    #[test]
    fn cancel_button_discards_changes() {
        let f = fixture();
        f.platform.click_edit(ID);
        f.platform.edit_draft(ID, |point| point.base_price = 1);

        assert!(f.platform.cancel(ID));

        assert!(f.committed.borrow().is_empty());
        assert_eq!(f.presenter.mode(), Mode::Display);
        assert_eq!(f.platform.edit_view_for(ID).unwrap().draft().base_price, 50);
        assert_eq!(f.platform.key_listener_count(), 0);
    }

    #[test]
    fn reset_view_while_displaying_does_nothing() {
        let f = fixture();

        f.presenter.reset_view().unwrap();

        assert_eq!(f.presenter.mode(), Mode::Display);
        assert_eq!(f.container.child_labels(), vec!["point:1"]);
    }

    #[test]
    fn reinit_while_editing_swaps_edit_view() {
        let f = fixture();
        f.platform.click_edit(ID);
        let old_edit = f.platform.edit_view_for(ID).unwrap();

        let mut updated = Point::sample(1, 2, 50);
        updated.destination = "Amsterdam".into();
        f.presenter.init(updated.clone()).unwrap();

        let new_edit = f.platform.edit_view_for(ID).unwrap();
        assert_eq!(f.presenter.mode(), Mode::Editing);
        assert_eq!(f.container.children(), vec![new_edit.node().clone()]);
        assert!(!old_edit.node().is_mounted());
        assert_eq!(new_edit.draft(), updated);
        assert_eq!(f.presenter.point(), Some(updated));
    }

    #[test]
    fn reinit_while_displaying_swaps_display_view() {
        let f = fixture();
        let old_view = f.platform.point_view_for(ID).unwrap();

        let mut updated = Point::sample(1, 2, 50);
        updated.base_price = 10;
        f.presenter.init(updated).unwrap();

        let new_view = f.platform.point_view_for(ID).unwrap();
        assert_eq!(f.container.children(), vec![new_view.node().clone()]);
        assert!(!old_view.node().is_mounted());
        assert_eq!(new_view.point().base_price, 10);
    }

    #[test]
    fn destroy_while_editing() {
        let f = fixture();
        f.platform.click_edit(ID);
        let edit = f.platform.edit_view_for(ID).unwrap();

        f.presenter.destroy().unwrap();

        assert!(f.container.children().is_empty());
        assert_eq!(f.platform.key_listener_count(), 0);
        assert!(!f.platform.press_key("Escape"));

        // Handlers of the removed form are still reachable, but do nothing
        assert!(edit.emit_submit());
        assert!(f.committed.borrow().is_empty());
        assert_eq!(f.presenter.mode(), Mode::Display);
        assert!(f.container.children().is_empty());

        // Idempotent
        f.presenter.destroy().unwrap();
        assert_eq!(f.presenter.mode(), Mode::Display);
    }

    #[test]
    fn second_edit_click_is_ignored() {
        let f = fixture();
        let view = f.platform.point_view_for(ID).unwrap();
        f.platform.click_edit(ID);

        // The display view is detached, but its handler can still be reached
        f.presenter.open_editor().unwrap();

        assert!(!view.node().is_mounted());
        assert_eq!(f.mode_changes.get(), 1);
        assert_eq!(f.platform.key_listener_count(), 1);
    }
}
