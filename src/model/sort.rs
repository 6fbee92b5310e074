use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::Point;

/// Orders a trip's points can be listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Earliest start first.
    #[default]
    Day,
    /// Longest stay first.
    Time,
    /// Cheapest first.
    Price,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [SortOrder::Day, SortOrder::Time, SortOrder::Price];

    pub fn compare(self, a: &Point, b: &Point) -> Ordering {
        use SortOrder::*;
        match self {
            Day => a.date_from.cmp(&b.date_from),
            Time => b.duration().cmp(&a.duration()),
            Price => a.base_price.cmp(&b.base_price),
        }
    }

    /// Stable sort, points that compare equal keep their relative order.
    pub fn sort(self, points: &mut [Point]) {
        points.sort_by(|a, b| self.compare(a, b));
    }

    pub fn label(self) -> &'static str {
        use SortOrder::*;
        match self {
            Day => "Day",
            Time => "Time",
            Price => "Price",
        }
    }

    /// Value used to tag the matching control in the DOM.
    pub fn key(self) -> &'static str {
        use SortOrder::*;
        match self {
            Day => "day",
            Time => "time",
            Price => "price",
        }
    }
}
