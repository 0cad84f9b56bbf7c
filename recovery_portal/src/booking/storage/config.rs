use std::{env, sync::LazyLock};

use crate::storage::DB_TABLE_PREFIX;

/// Bookings table name
pub(crate) static DB_TABLE_BOOKINGS: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_BOOKINGS").unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "bookings"))
});
