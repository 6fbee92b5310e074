mod point;
mod trip;

pub use point::{Mode, PointPresenter};
pub use trip::TripPresenter;

use crate::error::RenderError;

/// Event handlers have nowhere to propagate errors to, so they end up here.
fn report(result: Result<(), RenderError>) {
    if let Err(error) = result {
        tracing::error!(%error, "failed to handle event");
    }
}
