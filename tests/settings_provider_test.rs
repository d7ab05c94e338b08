// ==========================================
// ForecastSettingsProvider 集成测试
// ==========================================
// 测试目标: forecast_settings 表 → 权重表, 逐键回落默认值
// ==========================================


use gerai_forecast::config::ForecastSettingsProvider;
use gerai_forecast::domain::{DowKey, ForecastSettings, HolidayKey, WeatherKey};
use gerai_forecast::repository::ForecastSettingsRepository;
use std::sync::Arc;
use test_helpers::*;

fn provider(db_path: &str) -> ForecastSettingsProvider {
    let repo = ForecastSettingsRepository::new(db_path).expect("Failed to create settings repo");
    ForecastSettingsProvider::new(Arc::new(repo))
}

#[tokio::test]
async fn test_no_row_returns_defaults() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let settings = provider(&db_path).fetch().await;
    assert_eq!(settings, ForecastSettings::default());
}

#[tokio::test]
async fn test_stored_values_with_per_key_fallback() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    {
        let conn = open_test_connection(&db_path).unwrap();
        insert_settings_json(
            &conn,
            Some(r#"{"fri": "1.3", "sat": 1.5, "sun": "tutup", "mon": 0}"#),
            Some(r#"{"rain": 0.7}"#),
            Some("not json"),
        )
        .unwrap();
    }

    let settings = provider(&db_path).fetch().await;

    assert_eq!(settings.dow[&DowKey::Fri], 1.3);
    assert_eq!(settings.dow[&DowKey::Sat], 1.5);
    assert_eq!(settings.dow[&DowKey::Sun], 1.10);
    assert_eq!(settings.dow[&DowKey::Mon], 0.90);
    assert_eq!(settings.dow[&DowKey::Wed], 1.00);

    assert_eq!(settings.weather[&WeatherKey::Rain], 0.7);
    assert_eq!(settings.weather[&WeatherKey::Clear], 1.00);

    assert_eq!(settings.holiday[&HolidayKey::PublicHoliday], 1.20);
    assert_eq!(settings.holiday[&HolidayKey::LocalEvent], 1.15);
}

#[tokio::test]
async fn test_read_error_returns_defaults() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let provider = provider(&db_path);
    {
        let conn = open_test_connection(&db_path).unwrap();
        conn.execute_batch("DROP TABLE forecast_settings;").unwrap();
    }

    assert_eq!(provider.fetch().await, ForecastSettings::default());
}

#[tokio::test]
async fn test_saved_settings_round_trip_through_provider() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let repo = Arc::new(ForecastSettingsRepository::new(&db_path).unwrap());

    let mut custom = ForecastSettings::default();
    custom.weather.insert(WeatherKey::Hot, 0.8);
    custom.holiday.insert(HolidayKey::Ramadan, 1.6);
    repo.save(&custom).unwrap();

    let provider = ForecastSettingsProvider::new(repo);
    assert_eq!(provider.fetch().await, custom);
}
