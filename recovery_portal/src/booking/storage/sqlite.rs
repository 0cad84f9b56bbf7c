use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};

use crate::booking::errors::BookingError;
use crate::storage::validate_sqlite_table_schema;

use super::config::DB_TABLE_BOOKINGS;
use super::row::BookingRow;

// SQLite implementations
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), BookingError> {
    let table_name = DB_TABLE_BOOKINGS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id TEXT PRIMARY KEY,
            customer_id TEXT NOT NULL,
            scheduled_at TIMESTAMP NOT NULL,
            duration_minutes INTEGER NOT NULL,
            status TEXT NOT NULL,
            address TEXT NOT NULL,
            add_ons TEXT NOT NULL DEFAULT '[]',
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| BookingError::Storage(e.into()))?;

    Ok(())
}

pub(super) async fn validate_booking_tables_sqlite(
    pool: &Pool<Sqlite>,
) -> Result<(), BookingError> {
    let expected_columns = vec![
        ("id", "TEXT"),
        ("customer_id", "TEXT"),
        ("scheduled_at", "TIMESTAMP"),
        ("duration_minutes", "INTEGER"),
        ("status", "TEXT"),
        ("address", "TEXT"),
        ("add_ons", "TEXT"),
        ("created_at", "TIMESTAMP"),
        ("updated_at", "TIMESTAMP"),
    ];

    validate_sqlite_table_schema(pool, DB_TABLE_BOOKINGS.as_str(), &expected_columns)
        .await
        .map_err(BookingError::Storage)
}

pub(super) async fn create_booking_sqlite(
    pool: &Pool<Sqlite>,
    row: BookingRow,
) -> Result<(), BookingError> {
    // Ensure tables exist before any operations
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_BOOKINGS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name}
            (id, customer_id, scheduled_at, duration_minutes, status, address,
             add_ons, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#
    ))
    .bind(&row.id)
    .bind(&row.customer_id)
    .bind(row.scheduled_at)
    .bind(row.duration_minutes)
    .bind(&row.status)
    .bind(&row.address)
    .bind(&row.add_ons)
    .bind(row.created_at)
    .bind(row.updated_at)
    .execute(pool)
    .await
    .map_err(|e| BookingError::Storage(e.into()))?;

    Ok(())
}

pub(super) async fn get_booking_sqlite(
    pool: &Pool<Sqlite>,
    id: &str,
) -> Result<Option<BookingRow>, BookingError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_BOOKINGS.as_str();

    sqlx::query_as::<_, BookingRow>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE id = ?
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| BookingError::Storage(e.into()))
}

pub(super) async fn list_bookings_sqlite(
    pool: &Pool<Sqlite>,
) -> Result<Vec<BookingRow>, BookingError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_BOOKINGS.as_str();

    sqlx::query_as::<_, BookingRow>(&format!(
        r#"
        SELECT * FROM {table_name} ORDER BY scheduled_at ASC, id ASC
        "#
    ))
    .fetch_all(pool)
    .await
    .map_err(|e| BookingError::Storage(e.into()))
}

pub(super) async fn list_bookings_between_sqlite(
    pool: &Pool<Sqlite>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<BookingRow>, BookingError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_BOOKINGS.as_str();

    sqlx::query_as::<_, BookingRow>(&format!(
        r#"
        SELECT * FROM {table_name}
        WHERE scheduled_at >= ? AND scheduled_at < ?
        ORDER BY scheduled_at ASC, id ASC
        "#
    ))
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
    .map_err(|e| BookingError::Storage(e.into()))
}

pub(super) async fn update_status_sqlite(
    pool: &Pool<Sqlite>,
    id: &str,
    from_status: &str,
    status: &str,
    updated_at: DateTime<Utc>,
) -> Result<bool, BookingError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_BOOKINGS.as_str();

    // The status guard makes the write a compare-and-swap: a concurrent
    // transition that already moved the booking leaves rows_affected at 0.
    let result = sqlx::query(&format!(
        r#"
        UPDATE {table_name} SET status = ?, updated_at = ? WHERE id = ? AND status = ?
        "#
    ))
    .bind(status)
    .bind(updated_at)
    .bind(id)
    .bind(from_status)
    .execute(pool)
    .await
    .map_err(|e| BookingError::Storage(e.into()))?;

    Ok(result.rows_affected() > 0)
}
