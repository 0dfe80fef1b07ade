//! Month/year period the view is scoped to.

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::time::today;

/// A calendar month. `month` is 1-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub month: u32,
    pub year: i32,
}

impl Period {
    /// Build a period, rejecting out-of-range months.
    pub fn new(month: u32, year: i32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Period { month, year })
    }

    /// The device's current month in `tz`.
    pub fn current(tz: Tz) -> Self {
        let now = today(tz);
        Period {
            month: now.month(),
            year: now.year(),
        }
    }

    /// Shift by `delta` months, rolling across year boundaries in either
    /// direction (December +1 -> January of the next year, January -1 ->
    /// December of the previous one).
    pub fn shifted(self, delta: i32) -> Period {
        let zero_based = self.year * 12 + (self.month as i32 - 1) + delta;
        Period {
            month: (zero_based.rem_euclid(12) + 1) as u32,
            year: zero_based.div_euclid(12),
        }
    }

    /// True when `day` falls inside this calendar month.
    pub fn contains(&self, day: NaiveDate) -> bool {
        day.month() == self.month && day.year() == self.year
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}
