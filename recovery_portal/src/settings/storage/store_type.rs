use chrono::Utc;

use crate::settings::errors::SettingsError;
use crate::settings::types::{BusinessSetting, SettingCategory, SettingValue};
use crate::storage::{DATA_STORE, StorageError};

use super::postgres::*;
use super::sqlite::*;

pub struct SettingsStore;

impl SettingsStore {
    pub(crate) async fn init() -> Result<(), SettingsError> {
        let store = DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_settings_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_settings_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(SettingsError::Storage(StorageError::Storage(
                "Unsupported database type".to_string(),
            ))),
        }
    }

    pub async fn get_setting(key: &str) -> Result<Option<BusinessSetting>, SettingsError> {
        let store = DATA_STORE.lock().await;

        let row = if let Some(pool) = store.as_sqlite() {
            get_setting_sqlite(pool, key).await?
        } else if let Some(pool) = store.as_postgres() {
            get_setting_postgres(pool, key).await?
        } else {
            return Err(SettingsError::Storage(StorageError::Storage(
                "Unsupported database type".to_string(),
            )));
        };

        row.map(|r| r.into_setting()).transpose()
    }

    /// List settings, optionally restricted to one category, ordered by
    /// `display_order` with key as the tie-breaker.
    pub async fn list_settings(
        category: Option<SettingCategory>,
    ) -> Result<Vec<BusinessSetting>, SettingsError> {
        let store = DATA_STORE.lock().await;
        let category = category.map(|c| c.as_str());

        let rows = if let Some(pool) = store.as_sqlite() {
            list_settings_sqlite(pool, category).await?
        } else if let Some(pool) = store.as_postgres() {
            list_settings_postgres(pool, category).await?
        } else {
            return Err(SettingsError::Storage(StorageError::Storage(
                "Unsupported database type".to_string(),
            )));
        };

        rows.into_iter().map(|r| r.into_setting()).collect()
    }

    /// Insert or fully replace a setting definition keyed by `setting.key`.
    pub async fn upsert_setting(setting: &BusinessSetting) -> Result<(), SettingsError> {
        let row = super::row::SettingRow::from_setting(setting)?;
        let store = DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            upsert_setting_sqlite(pool, row).await
        } else if let Some(pool) = store.as_postgres() {
            upsert_setting_postgres(pool, row).await
        } else {
            Err(SettingsError::Storage(StorageError::Storage(
                "Unsupported database type".to_string(),
            )))
        }
    }

    /// Change only the value of an existing setting. The new value must carry
    /// the same type tag as the stored one and satisfy the stored validation
    /// rules; definitions never change through this path.
    pub async fn update_value(key: &str, value: SettingValue) -> Result<(), SettingsError> {
        let current = Self::get_setting(key)
            .await?
            .ok_or_else(|| SettingsError::NotFound(key.to_string()))?;

        if current.value.type_tag() != value.type_tag() {
            return Err(SettingsError::InvalidValue {
                key: key.to_string(),
                reason: format!(
                    "expected a {} value, got {}",
                    current.value.type_tag(),
                    value.type_tag()
                ),
            });
        }

        current
            .rules
            .check(&value)
            .map_err(|reason| SettingsError::InvalidValue {
                key: key.to_string(),
                reason,
            })?;

        let stored = value.to_stored()?;
        let now = Utc::now();
        let store = DATA_STORE.lock().await;

        let updated = if let Some(pool) = store.as_sqlite() {
            update_value_sqlite(pool, key, &stored, now).await?
        } else if let Some(pool) = store.as_postgres() {
            update_value_postgres(pool, key, &stored, now).await?
        } else {
            return Err(SettingsError::Storage(StorageError::Storage(
                "Unsupported database type".to_string(),
            )));
        };

        if updated {
            Ok(())
        } else {
            // The row vanished between the read and the write.
            Err(SettingsError::NotFound(key.to_string()))
        }
    }
}
