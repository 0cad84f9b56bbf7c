use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::SettingsError;

/// Grouping used by the admin UI to lay out setting controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingCategory {
    General,
    Booking,
    Pricing,
    Notifications,
}

impl SettingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Booking => "booking",
            Self::Pricing => "pricing",
            Self::Notifications => "notifications",
        }
    }
}

impl std::fmt::Display for SettingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SettingCategory {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Self::General),
            "booking" => Ok(Self::Booking),
            "pricing" => Ok(Self::Pricing),
            "notifications" => Ok(Self::Notifications),
            other => Err(SettingsError::UnknownCategory(other.to_string())),
        }
    }
}

/// A structured service address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    pub region: String,
    pub postal_code: String,
}

/// Opening hours for one day, "HH:MM" local time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: String,
    pub close: String,
}

/// Weekly opening hours; `None` means closed that day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<DayHours>,
}

/// Closed tagged union for setting values, keyed by the declared type of
/// the stored record. Monetary amounts are integer cents, never floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SettingValue {
    Boolean(bool),
    Number(f64),
    Text(String),
    MoneyCents(i64),
    Address(Address),
    WeeklyHours(WeeklyHours),
}

impl SettingValue {
    /// The type tag stored alongside the value
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::MoneyCents(_) => "money_cents",
            Self::Address(_) => "address",
            Self::WeeklyHours(_) => "weekly_hours",
        }
    }

    /// Parse a stored (type tag, JSON text) pair back into a typed value
    pub fn from_stored(value_type: &str, raw: &str) -> Result<Self, SettingsError> {
        match value_type {
            "boolean" => Ok(Self::Boolean(serde_json::from_str(raw)?)),
            "number" => Ok(Self::Number(serde_json::from_str(raw)?)),
            "text" => Ok(Self::Text(serde_json::from_str(raw)?)),
            "money_cents" => Ok(Self::MoneyCents(serde_json::from_str(raw)?)),
            "address" => Ok(Self::Address(serde_json::from_str(raw)?)),
            "weekly_hours" => Ok(Self::WeeklyHours(serde_json::from_str(raw)?)),
            other => Err(SettingsError::UnknownType(other.to_string())),
        }
    }

    /// JSON text for the value column
    pub fn to_stored(&self) -> Result<String, SettingsError> {
        let raw = match self {
            Self::Boolean(v) => serde_json::to_string(v)?,
            Self::Number(v) => serde_json::to_string(v)?,
            Self::Text(v) => serde_json::to_string(v)?,
            Self::MoneyCents(v) => serde_json::to_string(v)?,
            Self::Address(v) => serde_json::to_string(v)?,
            Self::WeeklyHours(v) => serde_json::to_string(v)?,
        };
        Ok(raw)
    }
}

/// Per-setting validation rules, stored with the record and applied on
/// every write
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Lower bound for numeric and money values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound for numeric and money values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Maximum character count for text values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl ValidationRules {
    pub fn check(&self, value: &SettingValue) -> Result<(), String> {
        let numeric = match value {
            SettingValue::Number(n) => Some(*n),
            SettingValue::MoneyCents(c) => Some(*c as f64),
            _ => None,
        };

        if let Some(n) = numeric {
            if let Some(min) = self.min {
                if n < min {
                    return Err(format!("value {n} is below the minimum {min}"));
                }
            }
            if let Some(max) = self.max {
                if n > max {
                    return Err(format!("value {n} is above the maximum {max}"));
                }
            }
        }

        if let SettingValue::Text(text) = value {
            if let Some(max_length) = self.max_length {
                if text.chars().count() > max_length {
                    return Err(format!("text exceeds the maximum length {max_length}"));
                }
            }
        }

        Ok(())
    }
}

/// One named configuration record owned by the data store. Presence of a
/// given key is never assumed; callers check before rendering a control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessSetting {
    pub key: String,
    pub category: SettingCategory,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value: SettingValue,
    pub visible: bool,
    pub required: bool,
    pub display_order: i64,
    #[serde(default)]
    pub rules: ValidationRules,
    pub updated_at: DateTime<Utc>,
}

impl BusinessSetting {
    pub fn new(
        key: impl Into<String>,
        category: SettingCategory,
        label: impl Into<String>,
        value: SettingValue,
    ) -> Self {
        Self {
            key: key.into(),
            category,
            label: label.into(),
            description: None,
            value,
            visible: true,
            required: false,
            display_order: 0,
            rules: ValidationRules::default(),
            updated_at: Utc::now(),
        }
    }
}
