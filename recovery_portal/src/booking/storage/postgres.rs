use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::booking::errors::BookingError;
use crate::storage::validate_postgres_table_schema;

use super::config::DB_TABLE_BOOKINGS;
use super::row::BookingRow;

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), BookingError> {
    let table_name = DB_TABLE_BOOKINGS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id TEXT PRIMARY KEY,
            customer_id TEXT NOT NULL,
            scheduled_at TIMESTAMPTZ NOT NULL,
            duration_minutes BIGINT NOT NULL,
            status TEXT NOT NULL,
            address TEXT NOT NULL,
            add_ons TEXT NOT NULL DEFAULT '[]',
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| BookingError::Storage(e.into()))?;

    Ok(())
}

pub(super) async fn validate_booking_tables_postgres(
    pool: &Pool<Postgres>,
) -> Result<(), BookingError> {
    let expected_columns = vec![
        ("id", "text"),
        ("customer_id", "text"),
        ("scheduled_at", "timestamp with time zone"),
        ("duration_minutes", "bigint"),
        ("status", "text"),
        ("address", "text"),
        ("add_ons", "text"),
        ("created_at", "timestamp with time zone"),
        ("updated_at", "timestamp with time zone"),
    ];

    validate_postgres_table_schema(pool, DB_TABLE_BOOKINGS.as_str(), &expected_columns)
        .await
        .map_err(BookingError::Storage)
}

pub(super) async fn create_booking_postgres(
    pool: &Pool<Postgres>,
    row: BookingRow,
) -> Result<(), BookingError> {
    let table_name = DB_TABLE_BOOKINGS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name}
            (id, customer_id, scheduled_at, duration_minutes, status, address,
             add_ons, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
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

pub(super) async fn get_booking_postgres(
    pool: &Pool<Postgres>,
    id: &str,
) -> Result<Option<BookingRow>, BookingError> {
    let table_name = DB_TABLE_BOOKINGS.as_str();

    sqlx::query_as::<_, BookingRow>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| BookingError::Storage(e.into()))
}

pub(super) async fn list_bookings_postgres(
    pool: &Pool<Postgres>,
) -> Result<Vec<BookingRow>, BookingError> {
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

pub(super) async fn list_bookings_between_postgres(
    pool: &Pool<Postgres>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<BookingRow>, BookingError> {
    let table_name = DB_TABLE_BOOKINGS.as_str();

    sqlx::query_as::<_, BookingRow>(&format!(
        r#"
        SELECT * FROM {table_name}
        WHERE scheduled_at >= $1 AND scheduled_at < $2
        ORDER BY scheduled_at ASC, id ASC
        "#
    ))
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
    .map_err(|e| BookingError::Storage(e.into()))
}

pub(super) async fn update_status_postgres(
    pool: &Pool<Postgres>,
    id: &str,
    from_status: &str,
    status: &str,
    updated_at: DateTime<Utc>,
) -> Result<bool, BookingError> {
    let table_name = DB_TABLE_BOOKINGS.as_str();

    // Compare-and-swap on the previously read status.
    let result = sqlx::query(&format!(
        r#"
        UPDATE {table_name} SET status = $1, updated_at = $2 WHERE id = $3 AND status = $4
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
