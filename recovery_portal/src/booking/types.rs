use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::BookingError;

/// Lifecycle of a booking. The main path is forward-only; the two
/// terminal alternates are reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }

    /// `completed`, `cancelled` and `no_show` are frozen; no transition
    /// leaves them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }

    /// Position along the main path. Terminal alternates have no rank.
    fn rank(&self) -> Option<u8> {
        match self {
            Self::Scheduled => Some(0),
            Self::Confirmed => Some(1),
            Self::InProgress => Some(2),
            Self::Completed => Some(3),
            Self::Cancelled | Self::NoShow => None,
        }
    }

    /// Transition lattice: forward along
    /// scheduled → confirmed → in_progress → completed, with cancelled
    /// and no_show allowed from any non-terminal state. Same-state moves
    /// are rejected.
    pub fn can_transition_to(&self, next: Self) -> bool {
        if self.is_terminal() || *self == next {
            return false;
        }
        match next {
            Self::Cancelled | Self::NoShow => true,
            _ => match (self.rank(), next.rank()) {
                (Some(from), Some(to)) => to > from,
                _ => false,
            },
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "confirmed" => Ok(Self::Confirmed),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no_show" => Ok(Self::NoShow),
            other => Err(BookingError::UnknownStatus(other.to_string())),
        }
    }
}

/// A scheduled service visit. Owned by the data store; the portal reads
/// lists and issues individual status-transition writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub customer_id: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i64,
    pub status: BookingStatus,
    pub address: String,
    pub add_ons: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        customer_id: impl Into<String>,
        scheduled_at: DateTime<Utc>,
        duration_minutes: i64,
        address: impl Into<String>,
        add_ons: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.into(),
            scheduled_at,
            duration_minutes,
            status: BookingStatus::Scheduled,
            address: address.into(),
            add_ons,
            created_at: now,
            updated_at: now,
        }
    }
}
