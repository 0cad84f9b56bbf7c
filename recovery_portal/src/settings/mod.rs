mod errors;
mod storage;
mod types;

pub use errors::SettingsError;
pub use storage::SettingsStore;
pub use types::{
    Address, BusinessSetting, DayHours, SettingCategory, SettingValue, ValidationRules, WeeklyHours,
};

pub(crate) async fn init() -> Result<(), SettingsError> {
    SettingsStore::init().await
}
