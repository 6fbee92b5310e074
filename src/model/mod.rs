mod point;
mod sort;

pub use point::{Point, PointId, PointKind};
pub use sort::SortOrder;

use crate::error::RenderError;

/// Anything able to hand over a snapshot of the points to render. The presenters read it once
/// on `init`, there is no live binding.
pub trait PointSource {
    fn points(&self) -> Vec<Point>;
}

/// Plain in-memory point source.
#[derive(Debug, Clone, Default)]
pub struct TripModel {
    points: Vec<Point>,
}

impl TripModel {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Parse a JSON array of points.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

impl PointSource for TripModel {
    fn points(&self) -> Vec<Point> {
        self.points.clone()
    }
}

impl PointSource for Vec<Point> {
    fn points(&self) -> Vec<Point> {
        self.clone()
    }
}

/// Replace the point sharing an id with `updated`, keeping its position. Returns `false` if no
/// point matched.
pub fn update_item(points: &mut [Point], updated: &Point) -> bool {
    match points.iter_mut().find(|point| point.id == updated.id) {
        Some(point) => {
            *point = updated.clone();
            true
        }
        None => false,
    }
}
