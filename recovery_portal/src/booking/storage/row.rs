use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::booking::errors::BookingError;
use crate::booking::types::{Booking, BookingStatus};

/// Raw booking row: status travels as its string form, add-ons as a JSON
/// text array.
#[derive(Debug, Clone, FromRow)]
pub(super) struct BookingRow {
    pub(super) id: String,
    pub(super) customer_id: String,
    pub(super) scheduled_at: DateTime<Utc>,
    pub(super) duration_minutes: i64,
    pub(super) status: String,
    pub(super) address: String,
    pub(super) add_ons: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl BookingRow {
    pub(super) fn into_booking(self) -> Result<Booking, BookingError> {
        Ok(Booking {
            id: self.id,
            customer_id: self.customer_id,
            scheduled_at: self.scheduled_at,
            duration_minutes: self.duration_minutes,
            status: self.status.parse::<BookingStatus>()?,
            address: self.address,
            add_ons: serde_json::from_str(&self.add_ons)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    pub(super) fn from_booking(booking: &Booking) -> Result<Self, BookingError> {
        Ok(Self {
            id: booking.id.clone(),
            customer_id: booking.customer_id.clone(),
            scheduled_at: booking.scheduled_at,
            duration_minutes: booking.duration_minutes,
            status: booking.status.as_str().to_string(),
            address: booking.address.clone(),
            add_ons: serde_json::to_string(&booking.add_ons)?,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        })
    }
}
