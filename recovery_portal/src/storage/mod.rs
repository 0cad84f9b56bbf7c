mod config;
mod data_store;
mod errors;
mod schema_validation;

pub use errors::StorageError;

pub(crate) use config::DB_TABLE_PREFIX;
pub(crate) use data_store::DATA_STORE;
pub(crate) use schema_validation::{validate_postgres_table_schema, validate_sqlite_table_schema};

pub(crate) async fn init() -> Result<(), StorageError> {
    let _ = &*DATA_STORE;
    Ok(())
}
