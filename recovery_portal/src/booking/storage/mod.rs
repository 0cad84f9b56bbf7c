mod config;
mod postgres;
mod row;
mod sqlite;
mod store_type;

pub use store_type::BookingStore;
