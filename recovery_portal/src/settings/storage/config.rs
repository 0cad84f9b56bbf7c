use std::{env, sync::LazyLock};

use crate::storage::DB_TABLE_PREFIX;

/// Business settings table name
pub(crate) static DB_TABLE_SETTINGS: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_SETTINGS")
        .unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "business_settings"))
});
