use serial_test::serial;

use recovery_portal::{
    BookingError, BookingStatus, BookingStore, SettingCategory, SettingValue, SettingsError,
    SettingsStore, StatusFilter, filter_by_status,
};

use crate::common::fixtures::{booking_with_status, price_setting};
use crate::common::test_setup::init_test_environment;

#[tokio::test]
#[serial]
async fn test_setting_upsert_get_and_update() {
    init_test_environment().await;

    // Given a stored price setting
    let setting = price_setting("admin_session_price");
    SettingsStore::upsert_setting(&setting)
        .await
        .expect("upsert must succeed");

    // When updating its value within the stored rules
    SettingsStore::update_value("admin_session_price", SettingValue::MoneyCents(17500))
        .await
        .expect("update must succeed");

    // Then the read-back reflects the new value only
    let loaded = SettingsStore::get_setting("admin_session_price")
        .await
        .expect("get must succeed")
        .expect("setting must exist");
    assert_eq!(loaded.value, SettingValue::MoneyCents(17500));
    assert_eq!(loaded.label, setting.label);
    assert_eq!(loaded.category, SettingCategory::Pricing);
}

#[tokio::test]
#[serial]
async fn test_setting_update_rejects_type_change() {
    init_test_environment().await;

    let setting = price_setting("admin_typed_price");
    SettingsStore::upsert_setting(&setting)
        .await
        .expect("upsert must succeed");

    // When writing a value with a different type tag
    let result = SettingsStore::update_value(
        "admin_typed_price",
        SettingValue::Text("fifteen dollars".to_string()),
    )
    .await;

    // Then the write is rejected and the stored value is untouched
    assert!(matches!(result, Err(SettingsError::InvalidValue { .. })));
    let loaded = SettingsStore::get_setting("admin_typed_price")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.value, SettingValue::MoneyCents(15000));
}

#[tokio::test]
#[serial]
async fn test_setting_update_enforces_stored_rules() {
    init_test_environment().await;

    let setting = price_setting("admin_bounded_price");
    SettingsStore::upsert_setting(&setting)
        .await
        .expect("upsert must succeed");

    // The stored rules cap the price at 1,000,000 cents
    let result =
        SettingsStore::update_value("admin_bounded_price", SettingValue::MoneyCents(2_000_000))
            .await;

    assert!(matches!(result, Err(SettingsError::InvalidValue { .. })));
}

#[tokio::test]
#[serial]
async fn test_setting_update_missing_key() {
    init_test_environment().await;

    let result =
        SettingsStore::update_value("admin_absent_key", SettingValue::Boolean(true)).await;

    assert!(matches!(result, Err(SettingsError::NotFound(_))));
}

#[tokio::test]
#[serial]
async fn test_list_settings_by_category_ordered() {
    init_test_environment().await;

    let mut first = price_setting("admin_order_a");
    first.display_order = 10;
    let mut second = price_setting("admin_order_b");
    second.display_order = 5;
    SettingsStore::upsert_setting(&first).await.unwrap();
    SettingsStore::upsert_setting(&second).await.unwrap();

    // When listing the pricing category
    let listed = SettingsStore::list_settings(Some(SettingCategory::Pricing))
        .await
        .expect("list must succeed");

    // Then display_order decides the position
    let keys: Vec<_> = listed
        .iter()
        .filter(|s| s.key.starts_with("admin_order_"))
        .map(|s| s.key.as_str())
        .collect();
    assert_eq!(keys, ["admin_order_b", "admin_order_a"]);
}

#[tokio::test]
#[serial]
async fn test_booking_lifecycle_and_filtering() {
    init_test_environment().await;

    // Given three bookings in distinct states
    let scheduled = booking_with_status("cust-filter-1", BookingStatus::Scheduled);
    let confirmed = booking_with_status("cust-filter-2", BookingStatus::Confirmed);
    let completed = booking_with_status("cust-filter-3", BookingStatus::Completed);
    for booking in [&scheduled, &confirmed, &completed] {
        BookingStore::create_booking(booking)
            .await
            .expect("create must succeed");
    }

    let all = BookingStore::list_bookings().await.expect("list");
    let ours: Vec<_> = all
        .into_iter()
        .filter(|b| b.customer_id.starts_with("cust-filter-"))
        .collect();
    assert_eq!(ours.len(), 3);

    // When filtering client-side by "confirmed"
    let filter: StatusFilter = "confirmed".parse().unwrap();
    let matched = filter_by_status(&ours, filter);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, confirmed.id);

    // And by "all"
    let everything = filter_by_status(&ours, StatusFilter::All);
    assert_eq!(everything.len(), 3);
}

#[tokio::test]
#[serial]
async fn test_booking_status_transition_enforced() {
    init_test_environment().await;

    let booking = booking_with_status("cust-transition-1", BookingStatus::Scheduled);
    BookingStore::create_booking(&booking).await.unwrap();

    // A forward move is accepted and reflected in the store
    let updated = BookingStore::update_status(&booking.id, BookingStatus::Confirmed)
        .await
        .expect("forward transition must succeed");
    assert_eq!(updated.status, BookingStatus::Confirmed);

    let loaded = BookingStore::get_booking(&booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.status, BookingStatus::Confirmed);

    // A backward move is rejected
    let result = BookingStore::update_status(&booking.id, BookingStatus::Scheduled).await;
    assert!(matches!(
        result,
        Err(BookingError::InvalidTransition { .. })
    ));
}

#[tokio::test]
#[serial]
async fn test_booking_terminal_state_is_frozen() {
    init_test_environment().await;

    let booking = booking_with_status("cust-terminal-1", BookingStatus::Scheduled);
    BookingStore::create_booking(&booking).await.unwrap();

    BookingStore::update_status(&booking.id, BookingStatus::Cancelled)
        .await
        .expect("cancel must succeed");

    let result = BookingStore::update_status(&booking.id, BookingStatus::Confirmed).await;
    assert!(matches!(
        result,
        Err(BookingError::InvalidTransition { .. })
    ));
}

#[tokio::test]
#[serial]
async fn test_booking_update_missing_id() {
    init_test_environment().await;

    let result = BookingStore::update_status("does-not-exist", BookingStatus::Confirmed).await;
    assert!(matches!(result, Err(BookingError::NotFound(_))));
}

#[tokio::test]
#[serial]
async fn test_list_bookings_between() {
    init_test_environment().await;

    use chrono::{Duration, TimeZone, Utc};

    let mut inside = booking_with_status("cust-window-1", BookingStatus::Scheduled);
    inside.scheduled_at = Utc.with_ymd_and_hms(2030, 3, 10, 9, 0, 0).unwrap();
    let mut outside = booking_with_status("cust-window-2", BookingStatus::Scheduled);
    outside.scheduled_at = Utc.with_ymd_and_hms(2030, 3, 12, 9, 0, 0).unwrap();
    BookingStore::create_booking(&inside).await.unwrap();
    BookingStore::create_booking(&outside).await.unwrap();

    let start = Utc.with_ymd_and_hms(2030, 3, 10, 0, 0, 0).unwrap();
    let listed = BookingStore::list_bookings_between(start, start + Duration::days(1))
        .await
        .expect("list must succeed");

    let ids: Vec<_> = listed
        .iter()
        .filter(|b| b.customer_id.starts_with("cust-window-"))
        .map(|b| b.id.as_str())
        .collect();
    assert_eq!(ids, [inside.id.as_str()]);
}
