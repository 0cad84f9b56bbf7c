use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::settings::errors::SettingsError;
use crate::settings::types::{BusinessSetting, SettingCategory, SettingValue, ValidationRules};

/// Raw settings row as both backends store it: the typed value rides a
/// (type tag, JSON text) pair, rules are a JSON text column.
#[derive(Debug, Clone, FromRow)]
pub(super) struct SettingRow {
    pub(super) key: String,
    pub(super) category: String,
    pub(super) value_type: String,
    pub(super) value: String,
    pub(super) label: String,
    pub(super) description: Option<String>,
    pub(super) visible: bool,
    pub(super) required: bool,
    pub(super) display_order: i64,
    pub(super) validation_rules: Option<String>,
    pub(super) updated_at: DateTime<Utc>,
}

impl SettingRow {
    pub(super) fn into_setting(self) -> Result<BusinessSetting, SettingsError> {
        let value = SettingValue::from_stored(&self.value_type, &self.value)?;
        let rules = match &self.validation_rules {
            Some(raw) => serde_json::from_str::<ValidationRules>(raw)?,
            None => ValidationRules::default(),
        };
        Ok(BusinessSetting {
            key: self.key,
            category: self.category.parse::<SettingCategory>()?,
            label: self.label,
            description: self.description,
            value,
            visible: self.visible,
            required: self.required,
            display_order: self.display_order,
            rules,
            updated_at: self.updated_at,
        })
    }

    pub(super) fn from_setting(setting: &BusinessSetting) -> Result<Self, SettingsError> {
        Ok(Self {
            key: setting.key.clone(),
            category: setting.category.as_str().to_string(),
            value_type: setting.value.type_tag().to_string(),
            value: setting.value.to_stored()?,
            label: setting.label.clone(),
            description: setting.description.clone(),
            visible: setting.visible,
            required: setting.required,
            display_order: setting.display_order,
            validation_rules: Some(serde_json::to_string(&setting.rules)?),
            updated_at: setting.updated_at,
        })
    }
}
