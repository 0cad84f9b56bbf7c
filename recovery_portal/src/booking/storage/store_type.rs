use chrono::{DateTime, Utc};

use crate::booking::errors::BookingError;
use crate::booking::types::{Booking, BookingStatus};
use crate::storage::{DATA_STORE, StorageError};

use super::postgres::*;
use super::row::BookingRow;
use super::sqlite::*;

pub struct BookingStore;

impl BookingStore {
    pub(crate) async fn init() -> Result<(), BookingError> {
        let store = DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_booking_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_booking_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(BookingError::Storage(StorageError::Storage(
                "Unsupported database type".to_string(),
            ))),
        }
    }

    pub async fn create_booking(booking: &Booking) -> Result<(), BookingError> {
        let row = BookingRow::from_booking(booking)?;
        let store = DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            create_booking_sqlite(pool, row).await
        } else if let Some(pool) = store.as_postgres() {
            create_booking_postgres(pool, row).await
        } else {
            Err(BookingError::Storage(StorageError::Storage(
                "Unsupported database type".to_string(),
            )))
        }
    }

    pub async fn get_booking(id: &str) -> Result<Option<Booking>, BookingError> {
        let store = DATA_STORE.lock().await;

        let row = if let Some(pool) = store.as_sqlite() {
            get_booking_sqlite(pool, id).await?
        } else if let Some(pool) = store.as_postgres() {
            get_booking_postgres(pool, id).await?
        } else {
            return Err(BookingError::Storage(StorageError::Storage(
                "Unsupported database type".to_string(),
            )));
        };

        row.map(|r| r.into_booking()).transpose()
    }

    /// All bookings ordered by scheduled time. Status filtering happens
    /// client-side, see [`crate::booking::filter_by_status`].
    pub async fn list_bookings() -> Result<Vec<Booking>, BookingError> {
        let store = DATA_STORE.lock().await;

        let rows = if let Some(pool) = store.as_sqlite() {
            list_bookings_sqlite(pool).await?
        } else if let Some(pool) = store.as_postgres() {
            list_bookings_postgres(pool).await?
        } else {
            return Err(BookingError::Storage(StorageError::Storage(
                "Unsupported database type".to_string(),
            )));
        };

        rows.into_iter().map(|r| r.into_booking()).collect()
    }

    /// Bookings scheduled in the half-open interval `[start, end)`.
    pub async fn list_bookings_between(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Booking>, BookingError> {
        let store = DATA_STORE.lock().await;

        let rows = if let Some(pool) = store.as_sqlite() {
            list_bookings_between_sqlite(pool, start, end).await?
        } else if let Some(pool) = store.as_postgres() {
            list_bookings_between_postgres(pool, start, end).await?
        } else {
            return Err(BookingError::Storage(StorageError::Storage(
                "Unsupported database type".to_string(),
            )));
        };

        rows.into_iter().map(|r| r.into_booking()).collect()
    }

    /// Move a booking to `next`, enforcing the transition lattice.
    /// Terminal states are frozen and the main path is forward-only.
    pub async fn update_status(id: &str, next: BookingStatus) -> Result<Booking, BookingError> {
        let current = Self::get_booking(id)
            .await?
            .ok_or_else(|| BookingError::NotFound(id.to_string()))?;

        if !current.status.can_transition_to(next) {
            return Err(BookingError::InvalidTransition {
                from: current.status.to_string(),
                to: next.to_string(),
            });
        }

        let now = Utc::now();
        let updated = {
            let store = DATA_STORE.lock().await;

            if let Some(pool) = store.as_sqlite() {
                update_status_sqlite(pool, id, current.status.as_str(), next.as_str(), now).await?
            } else if let Some(pool) = store.as_postgres() {
                update_status_postgres(pool, id, current.status.as_str(), next.as_str(), now)
                    .await?
            } else {
                return Err(BookingError::Storage(StorageError::Storage(
                    "Unsupported database type".to_string(),
                )));
            }
        };

        if !updated {
            // The guarded UPDATE matched nothing: either the booking is gone
            // or a concurrent transition won the race. Re-read to tell which.
            return match Self::get_booking(id).await? {
                None => Err(BookingError::NotFound(id.to_string())),
                Some(latest) => Err(BookingError::InvalidTransition {
                    from: latest.status.to_string(),
                    to: next.to_string(),
                }),
            };
        }

        Ok(Booking {
            status: next,
            updated_at: now,
            ..current
        })
    }
}
