//! Inclusive date ranges for report filters.

use chrono::NaiveDate;
use serde::Serialize;

use super::ReportError;
use crate::repository::Entity;

/// An optional inclusive start and end date. Missing bounds are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// Build a range, refusing a start after the end.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidRange`] if `start > end`.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, ReportError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(ReportError::InvalidRange { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// The unbounded range.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    #[must_use]
    pub const fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Whether `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    /// Records created (UTC date) inside the range, in their original order.
    pub fn filter<'a, E: Entity>(&self, records: &'a [E]) -> Vec<&'a E> {
        records
            .iter()
            .filter(|record| self.contains(record.created_at().date_naive()))
            .collect()
    }
}
