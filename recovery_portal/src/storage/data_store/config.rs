//! Shared data store configuration
//!
//! One pool per process, selected by `DATA_STORE_TYPE`/`DATA_STORE_URL`.
//! Defaults to an in-memory SQLite database so the crate works out of the
//! box; production deployments point these at the hosted Postgres.

use std::{env, str::FromStr, sync::LazyLock};
use tokio::sync::Mutex;

use super::types::{DataStore, PostgresDataStore, SqliteDataStore};

static DATA_STORE_TYPE: LazyLock<String> =
    LazyLock::new(|| env::var("DATA_STORE_TYPE").unwrap_or_else(|_| "sqlite".to_string()));

static DATA_STORE_URL: LazyLock<String> =
    LazyLock::new(|| env::var("DATA_STORE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string()));

pub(crate) static DATA_STORE: LazyLock<Mutex<Box<dyn DataStore>>> = LazyLock::new(|| {
    let store_type = DATA_STORE_TYPE.as_str();
    let store_url = DATA_STORE_URL.as_str();

    tracing::info!(
        "Initializing data store with type: {}, url: {}",
        store_type,
        store_url
    );

    let store = match store_type {
        "sqlite" => {
            let opts = sqlx::sqlite::SqliteConnectOptions::from_str(store_url)
                .expect("Failed to parse SQLite connection string")
                .create_if_missing(true);

            Box::new(SqliteDataStore {
                pool: sqlx::sqlite::SqlitePool::connect_lazy_with(opts),
            }) as Box<dyn DataStore>
        }
        "postgres" => Box::new(PostgresDataStore {
            pool: sqlx::PgPool::connect_lazy(store_url).expect("Failed to create Postgres pool"),
        }) as Box<dyn DataStore>,
        t => panic!("Unsupported DATA_STORE_TYPE: {t}. Supported: sqlite, postgres"),
    };

    Mutex::new(store)
});
