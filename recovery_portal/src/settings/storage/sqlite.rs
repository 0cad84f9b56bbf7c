use sqlx::{Pool, Sqlite};

use crate::settings::errors::SettingsError;
use crate::storage::validate_sqlite_table_schema;

use super::config::DB_TABLE_SETTINGS;
use super::row::SettingRow;

// SQLite implementations
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), SettingsError> {
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
            display_order INTEGER NOT NULL DEFAULT 0,
            validation_rules TEXT,
            updated_at TIMESTAMP NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| SettingsError::Storage(e.into()))?;

    Ok(())
}

pub(super) async fn validate_settings_tables_sqlite(
    pool: &Pool<Sqlite>,
) -> Result<(), SettingsError> {
    let expected_columns = vec![
        ("key", "TEXT"),
        ("category", "TEXT"),
        ("value_type", "TEXT"),
        ("value", "TEXT"),
        ("label", "TEXT"),
        ("description", "TEXT"),
        ("visible", "BOOLEAN"),
        ("required", "BOOLEAN"),
        ("display_order", "INTEGER"),
        ("validation_rules", "TEXT"),
        ("updated_at", "TIMESTAMP"),
    ];

    validate_sqlite_table_schema(pool, DB_TABLE_SETTINGS.as_str(), &expected_columns)
        .await
        .map_err(SettingsError::Storage)
}

pub(super) async fn get_setting_sqlite(
    pool: &Pool<Sqlite>,
    key: &str,
) -> Result<Option<SettingRow>, SettingsError> {
    // Ensure tables exist before any operations
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_SETTINGS.as_str();

    sqlx::query_as::<_, SettingRow>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE key = ?
        "#
    ))
    .bind(key)
    .fetch_optional(pool)
    .await
    .map_err(|e| SettingsError::Storage(e.into()))
}

pub(super) async fn list_settings_sqlite(
    pool: &Pool<Sqlite>,
    category: Option<&str>,
) -> Result<Vec<SettingRow>, SettingsError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_SETTINGS.as_str();

    match category {
        Some(category) => sqlx::query_as::<_, SettingRow>(&format!(
            r#"
            SELECT * FROM {table_name} WHERE category = ? ORDER BY display_order ASC, key ASC
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

pub(super) async fn upsert_setting_sqlite(
    pool: &Pool<Sqlite>,
    row: SettingRow,
) -> Result<(), SettingsError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_SETTINGS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name}
            (key, category, value_type, value, label, description, visible, required,
             display_order, validation_rules, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (key) DO UPDATE SET
            category = excluded.category,
            value_type = excluded.value_type,
            value = excluded.value,
            label = excluded.label,
            description = excluded.description,
            visible = excluded.visible,
            required = excluded.required,
            display_order = excluded.display_order,
            validation_rules = excluded.validation_rules,
            updated_at = excluded.updated_at
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

/// Single-row value write; the caller has already re-validated the value
/// against the stored rules.
pub(super) async fn update_value_sqlite(
    pool: &Pool<Sqlite>,
    key: &str,
    value: &str,
    updated_at: chrono::DateTime<chrono::Utc>,
) -> Result<bool, SettingsError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_SETTINGS.as_str();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {table_name} SET value = ?, updated_at = ? WHERE key = ?
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
