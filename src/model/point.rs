use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Stable identifier of a [`Point`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(u32);

impl PointId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointKind {
    Taxi,
    Bus,
    Train,
    Ship,
    Drive,
    #[default]
    Flight,
    CheckIn,
    Sightseeing,
    Restaurant,
}

impl PointKind {
    pub fn label(self) -> &'static str {
        use PointKind::*;
        match self {
            Taxi => "Taxi",
            Bus => "Bus",
            Train => "Train",
            Ship => "Ship",
            Drive => "Drive",
            Flight => "Flight",
            CheckIn => "Check-in",
            Sightseeing => "Sightseeing",
            Restaurant => "Restaurant",
        }
    }
}

/// A single stop of a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    #[serde(default)]
    pub kind: PointKind,
    pub destination: String,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub base_price: u32,
    /// Ids of the selected offers.
    #[serde(default)]
    pub offers: Vec<u32>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Point {
    pub fn duration(&self) -> TimeDelta {
        self.date_to - self.date_from
    }
}

#[cfg(test)]
impl Point {
    /// Point on day `day` of March 2024, lasting `day` hours.
    pub(crate) fn sample(id: u32, day: u32, price: u32) -> Self {
        let date_from = chrono::NaiveDate::from_ymd_opt(2024, 3, day)
            .and_then(|date| date.and_hms_opt(9, 0, 0))
            .unwrap();

        Self {
            id: PointId::new(id),
            kind: PointKind::Flight,
            destination: format!("Stop {id}"),
            date_from,
            date_to: date_from + TimeDelta::hours(i64::from(day)),
            base_price: price,
            offers: Vec::new(),
            is_favorite: false,
        }
    }
}
