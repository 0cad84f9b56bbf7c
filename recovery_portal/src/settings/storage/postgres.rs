use sqlx::{Pool, Postgres};

use crate::settings::errors::SettingsError;
use crate::storage::validate_postgres_table_schema;

use super::config::DB_TABLE_SETTINGS;
use super::row::SettingRow;

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), SettingsError> {
    let table_name = DB_TABLE_SETTINGS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            key TEXT PRIMARY KEY,
            category TEXT NOT NULL,
            value_type TEXT NOT NULL,
            value TEXT NOT NULL,
            label TEXT NOT NULL,
            description TEXT,
            visible BOOLEAN NOT NULL DEFAULT true,
            required BOOLEAN NOT NULL DEFAULT false,
            display_order BIGINT NOT NULL DEFAULT 0,
            validation_rules TEXT,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| SettingsError::Storage(e.into()))?;

    Ok(())
}

pub(super) async fn validate_settings_tables_postgres(
    pool: &Pool<Postgres>,
) -> Result<(), SettingsError> {
    let expected_columns = vec![
        ("key", "text"),
        ("category", "text"),
        ("value_type", "text"),
        ("value", "text"),
        ("label", "text"),
        ("description", "text"),
        ("visible", "boolean"),
        ("required", "boolean"),
        ("display_order", "bigint"),
        ("validation_rules", "text"),
        ("updated_at", "timestamp with time zone"),
    ];

    validate_postgres_table_schema(pool, DB_TABLE_SETTINGS.as_str(), &expected_columns)
        .await
        .map_err(SettingsError::Storage)
}

pub(super) async fn get_setting_postgres(
    pool: &Pool<Postgres>,
    key: &str,
) -> Result<Option<SettingRow>, SettingsError> {
    let table_name = DB_TABLE_SETTINGS.as_str();

    sqlx::query_as::<_, SettingRow>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE key = $1
        "#
    ))
    .bind(key)
    .fetch_optional(pool)
    .await
    .map_err(|e| SettingsError::Storage(e.into()))
}

pub(super) async fn list_settings_postgres(
    pool: &Pool<Postgres>,
    category: Option<&str>,
) -> Result<Vec<SettingRow>, SettingsError> {
    let table_name = DB_TABLE_SETTINGS.as_str();

    match category {
        Some(category) => sqlx::query_as::<_, SettingRow>(&format!(
            r#"
            SELECT * FROM {table_name} WHERE category = $1 ORDER BY display_order ASC, key ASC
            "#
        ))
        .bind(category)
        .fetch_all(pool)
        .await
        .map_err(|e| SettingsError::Storage(e.into())),
        None => sqlx::query_as::<_, SettingRow>(&format!(
            r#"
            SELECT * FROM {table_name} ORDER BY display_order ASC, key ASC
            "#
        ))
        .fetch_all(pool)
        .await
        .map_err(|e| SettingsError::Storage(e.into())),
    }
}

pub(super) async fn upsert_setting_postgres(
    pool: &Pool<Postgres>,
    row: SettingRow,
) -> Result<(), SettingsError> {
    let table_name = DB_TABLE_SETTINGS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name}
            (key, category, value_type, value, label, description, visible, required,
             display_order, validation_rules, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ON CONFLICT (key) DO UPDATE SET
            category = EXCLUDED.category,
            value_type = EXCLUDED.value_type,
            value = EXCLUDED.value,
            label = EXCLUDED.label,
            description = EXCLUDED.description,
            visible = EXCLUDED.visible,
            required = EXCLUDED.required,
            display_order = EXCLUDED.display_order,
            validation_rules = EXCLUDED.validation_rules,
            updated_at = EXCLUDED.updated_at
        "#
    ))
    .bind(&row.key)
    .bind(&row.category)
    .bind(&row.value_type)
    .bind(&row.value)
    .bind(&row.label)
    .bind(&row.description)
    .bind(row.visible)
    .bind(row.required)
    .bind(row.display_order)
    .bind(&row.validation_rules)
    .bind(row.updated_at)
    .execute(pool)
    .await
    .map_err(|e| SettingsError::Storage(e.into()))?;

    Ok(())
}

pub(super) async fn update_value_postgres(
    pool: &Pool<Postgres>,
    key: &str,
    value: &str,
    updated_at: chrono::DateTime<chrono::Utc>,
) -> Result<bool, SettingsError> {
    let table_name = DB_TABLE_SETTINGS.as_str();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {table_name} SET value = $1, updated_at = $2 WHERE key = $3
        "#
    ))
    .bind(value)
    .bind(updated_at)
    .bind(key)
    .execute(pool)
    .await
    .map_err(|e| SettingsError::Storage(e.into()))?;

    Ok(result.rows_affected() > 0)
}
