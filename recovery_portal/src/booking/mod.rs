mod errors;
mod filter;
mod storage;
mod types;

pub use errors::BookingError;
pub use filter::{StatusFilter, bookings_on_day, filter_by_status};
pub use storage::BookingStore;
pub use types::{Booking, BookingStatus};

pub(crate) async fn init() -> Result<(), BookingError> {
    BookingStore::init().await
}
