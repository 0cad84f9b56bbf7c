use std::str::FromStr;

use chrono::NaiveDate;

use super::errors::BookingError;
use super::types::{Booking, BookingStatus};

/// Client-side status filter for booking lists. The store returns full
/// lists; the admin views narrow them here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(BookingStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: BookingStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Only(s.parse()?))
        }
    }
}

/// Narrow `bookings` to those matching `filter`, preserving input order.
pub fn filter_by_status(bookings: &[Booking], filter: StatusFilter) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|b| filter.matches(b.status))
        .cloned()
        .collect()
}

/// Bookings whose scheduled time falls on `day` (UTC), for the calendar
/// view. Order preserved.
pub fn bookings_on_day(bookings: &[Booking], day: NaiveDate) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|b| b.scheduled_at.date_naive() == day)
        .cloned()
        .collect()
}
