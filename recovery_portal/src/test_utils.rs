//! Shared test initialization
//!
//! Centralized setup so every test sees the same environment and a fresh
//! store. SQLite functions ensure tables exist at the point of use, so
//! setup here stays minimal.

use std::sync::Once;

/// Initialize the test environment and the shared data store.
///
/// The first caller loads `.env_test` (falling back to `.env`), points the
/// data store at a file-backed SQLite database under the system temp
/// directory when no URL is configured, and removes any stale database
/// file from a previous run. A pooled `sqlite::memory:` store would give
/// each pooled connection its own empty database, so tests always use a
/// file.
pub async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        if std::env::var("DATA_STORE_URL").is_err() {
            let db_path = std::env::temp_dir().join("recovery_portal_test.db");
            let _ = std::fs::remove_file(&db_path);
            unsafe {
                std::env::set_var("DATA_STORE_TYPE", "sqlite");
                std::env::set_var("DATA_STORE_URL", format!("sqlite:{}", db_path.display()));
            }
        } else if let Some(db_path) = extract_sqlite_file_path() {
            let _ = std::fs::remove_file(&db_path);
        }
    });

    ensure_stores_initialized().await;
}

/// Initialize stores, logging failures instead of panicking so individual
/// tests report their own errors.
async fn ensure_stores_initialized() {
    use crate::booking::BookingStore;
    use crate::settings::SettingsStore;

    if let Err(e) = SettingsStore::init().await {
        eprintln!("Warning: Failed to initialize SettingsStore: {e}");
    }
    if let Err(e) = BookingStore::init().await {
        eprintln!("Warning: Failed to initialize BookingStore: {e}");
    }
}

/// File path of the configured SQLite database, if the configured URL
/// points at one. In-memory URLs yield `None`.
fn extract_sqlite_file_path() -> Option<String> {
    let url = std::env::var("DATA_STORE_URL").ok()?;
    let path = url.strip_prefix("sqlite:")?;
    if path.contains(":memory:") {
        return None;
    }
    Some(path.trim_start_matches("//").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sqlite_file_path_skips_memory() {
        // The helper reads DATA_STORE_URL, so exercise the parsing inline
        let parse = |url: &str| -> Option<String> {
            let path = url.strip_prefix("sqlite:")?;
            if path.contains(":memory:") {
                return None;
            }
            Some(path.trim_start_matches("//").to_string())
        };

        assert_eq!(parse("sqlite:/tmp/test.db"), Some("/tmp/test.db".to_string()));
        assert_eq!(parse("sqlite::memory:"), None);
        assert_eq!(parse("postgresql://localhost/db"), None);
    }
}
