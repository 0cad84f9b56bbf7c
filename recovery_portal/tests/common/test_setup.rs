use std::sync::Once;

/// One-time environment setup plus store initialization for integration
/// tests.
///
/// Points the data store at a file-backed SQLite database under the
/// system temp directory (a pooled `sqlite::memory:` store would give
/// each pooled connection its own empty database) and removes any stale
/// file from a previous run before the pool is first touched.
pub async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        if std::env::var("DATA_STORE_URL").is_err() {
            let db_path = std::env::temp_dir().join("recovery_portal_integration_test.db");
            let _ = std::fs::remove_file(&db_path);
            unsafe {
                std::env::set_var("DATA_STORE_TYPE", "sqlite");
                std::env::set_var("DATA_STORE_URL", format!("sqlite:{}", db_path.display()));
            }
        }
    });

    if let Err(e) = recovery_portal::init().await {
        eprintln!("Warning: Failed to initialize stores: {e}");
    }
}
