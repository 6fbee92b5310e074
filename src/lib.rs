//! Presenters for a trip's route points: each point is shown either as a read only item or as
//! an edit form, the list can be re-sorted, and at most one editor is open at a time.
//!
//! Rendering goes through a [`view::ViewFactory`], so the same presenters drive the browser DOM
//! ([`view::web::WebPlatform`]) or a headless tree ([`view::memory::MemoryPlatform`]).

pub mod config;
pub mod dom;
pub mod error;
pub mod model;
pub mod presenter;
pub mod util;
pub mod view;

use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::prelude::*;
use web_sys::window;

pub use config::PresenterConfig;
pub use error::RenderError;
pub use model::{Point, PointId, PointKind, PointSource, SortOrder, TripModel};
pub use presenter::{Mode, PointPresenter, TripPresenter};

use view::web::WebPlatform;

thread_local! {
    /// Presenters mounted from JS. They own the event handlers bound into the DOM, so they are
    /// kept alive for the lifetime of the page.
    static MOUNTED: RefCell<Vec<TripPresenter<WebPlatform>>> = const { RefCell::new(Vec::new()) };
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    // Configure the panic hook to log to console.error
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    tracing_wasm::set_as_global_default();
}

/// Render `points_json` (a JSON array of points) into the element with id `container_id`.
#[wasm_bindgen]
pub fn mount_trip(container_id: &str, points_json: &str) -> Result<(), JsValue> {
    let document = window()
        .and_then(|window| window.document())
        .ok_or_else(|| RenderError::MissingElement("document".into()))?;

    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| RenderError::MissingElement(format!("#{container_id}")))?;

    let trip = TripPresenter::new(
        Rc::new(WebPlatform::new(&document)),
        container.into(),
        TripModel::from_json(points_json)?,
        PresenterConfig::default(),
    );
    trip.init()?;

    MOUNTED.with(|mounted| mounted.borrow_mut().push(trip));

    Ok(())
}
