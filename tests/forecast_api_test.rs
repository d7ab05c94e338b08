// ==========================================
// ForecastApi / InventoryApi 集成测试
// ==========================================
// 测试目标: 数据库 → 仓储 → 引擎 → 看板快照 的完整链路
// ==========================================


use chrono::Duration;
use gerai_forecast::api::ApiError;
use gerai_forecast::domain::{
    AlertSeverity, AlertType, DemoOverride, DowKey, InventoryStatus, NewIngredientInput,
    ReceiveBatchInput, WeatherKey,
};
use gerai_forecast::i18n::Locale;
use gerai_forecast::logging;
use test_helpers::*;

/// 2025-06-18 是周三, 晴天下乘数为 1.0
const PLAIN_WEDNESDAY: &str = "2025-06-18";

#[tokio::test]
async fn test_dashboard_low_stock_telur() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let today = date(PLAIN_WEDNESDAY);
    {
        let conn = open_test_connection(&db_path).unwrap();
        seed_nasi_lemak(&conn, today).unwrap();
    }

    let state = create_test_state(&db_path, today, Locale::Ms);
    let snap = state.forecast_api.load_dashboard().await.expect("load_dashboard");

    assert_eq!(snap.context.date, today);
    assert_eq!(snap.context.dow_key, DowKey::Wed);
    assert_eq!(snap.multiplier, 1.0);
    assert_eq!(snap.total_forecast_units, 20);

    assert_eq!(snap.variants.len(), 1);
    assert_eq!(snap.variants[0].item_name, "Nasi Lemak");
    assert_eq!(snap.variants[0].forecast_units, 20);

    assert_eq!(snap.alerts.len(), 1);
    let alert = &snap.alerts[0];
    assert_eq!(alert.id, "low_telur");
    assert_eq!(alert.alert_type, AlertType::LowStock);
    assert_eq!(alert.severity, AlertSeverity::Critical);
    assert!(alert.message.contains("18 biji"), "message: {}", alert.message);

    let beras = snap
        .ingredient_usage
        .iter()
        .find(|u| u.ingredient_id == "beras")
        .unwrap();
    assert_eq!(beras.usage, 2000.0);
    assert_eq!(beras.available, 5000.0);
    assert_eq!(beras.coverage_days, Some(2));
}

#[tokio::test]
async fn test_expiring_soon_500g() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let today = date(PLAIN_WEDNESDAY);
    {
        let conn = open_test_connection(&db_path).unwrap();
        insert_ingredient(&conn, "santan", "Santan", "g").unwrap();
        let expiry = (today + Duration::days(2)).format("%Y-%m-%d").to_string();
        insert_batch(&conn, "b1", "santan", 500.0, Some(&expiry), None).unwrap();
    }

    let state = create_test_state(&db_path, today, Locale::Ms);
    let snap = state.forecast_api.load_dashboard().await.unwrap();

    assert_eq!(snap.alerts.len(), 1);
    assert_eq!(snap.alerts[0].alert_type, AlertType::ExpiringSoon);
    assert_eq!(snap.alerts[0].severity, AlertSeverity::Warn);
    assert!(snap.alerts[0].message.contains("akan luput dalam 2 hari"));
}

#[tokio::test]
async fn test_expired_yesterday_not_available() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let today = date(PLAIN_WEDNESDAY);
    {
        let conn = open_test_connection(&db_path).unwrap();
        insert_ingredient(&conn, "ayam", "Ayam", "g").unwrap();
        insert_batch(&conn, "old", "ayam", 1200.0, Some("2025-06-17"), Some("2025-06-10")).unwrap();
        insert_batch(&conn, "ancient", "ayam", 800.0, Some("2025-06-10"), Some("2025-06-01")).unwrap();
        insert_menu_item(&conn, "ag", "Ayam Goreng").unwrap();
        insert_variant(&conn, "ag-1", "ag", "Peha", 6.0, 5.0).unwrap();
        insert_recipe(&conn, "ag-1", "ayam", 200.0).unwrap();
    }

    let state = create_test_state(&db_path, today, Locale::Ms);
    let snap = state.forecast_api.load_dashboard().await.unwrap();

    let types: Vec<AlertType> = snap.alerts.iter().map(|a| a.alert_type).collect();
    assert_eq!(types.len(), 2);
    assert!(types.contains(&AlertType::LowStock));
    assert!(types.contains(&AlertType::Expired));

    let low = snap.alerts.iter().find(|a| a.alert_type == AlertType::LowStock).unwrap();
    // 5 份 × 200 g, 过期批次不计入可用
    assert!(low.message.contains("1.0 kg (~1000 g)"), "message: {}", low.message);

    let expired = snap.alerts.iter().find(|a| a.alert_type == AlertType::Expired).unwrap();
    assert!(expired.message.contains("1.2 kg (~1200 g)"));
    assert!(expired.message.contains("batch diterima pada 2025-06-10"));
}

#[tokio::test]
async fn test_demo_override_drives_context() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let state = create_test_state(&db_path, date(PLAIN_WEDNESDAY), Locale::Ms);

    state
        .inventory_api
        .set_demo_override(DemoOverride {
            enabled: true,
            demo_date: Some(date("2025-06-15")),
            weather: Some(WeatherKey::Hot),
            is_public_holiday: true,
            local_event_label: None,
        })
        .unwrap();

    let snap = state.forecast_api.load_dashboard().await.unwrap();
    assert_eq!(snap.context.date_iso, "2025-06-15");
    assert_eq!(snap.context.dow_key, DowKey::Sun);
    assert_eq!(snap.context.weather, WeatherKey::Hot);
    assert!(snap.context.is_public_holiday);
    assert!(!snap.context.has_local_event);
    assert!((snap.multiplier - 1.10 * 0.95 * 1.20).abs() < 1e-12);
    assert!(snap.briefing.iter().any(|l| l == "Cuaca: Panas"));
    assert!(snap.briefing.iter().any(|l| l == "Hari ini cuti umum."));

    state.inventory_api.clear_demo_override().unwrap();
    let snap = state.forecast_api.load_dashboard().await.unwrap();
    assert_eq!(snap.context.date_iso, PLAIN_WEDNESDAY);
}

#[tokio::test]
async fn test_required_read_failure_propagates() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let today = date(PLAIN_WEDNESDAY);
    {
        let conn = open_test_connection(&db_path).unwrap();
        seed_nasi_lemak(&conn, today).unwrap();
    }

    // AppState 初始化时会建表, 所以在初始化之后再删表
    let state = create_test_state(&db_path, today, Locale::Ms);
    {
        let conn = open_test_connection(&db_path).unwrap();
        conn.execute_batch("DROP TABLE recipe_items;").unwrap();
    }

    let err = state.forecast_api.load_dashboard().await.unwrap_err();

    match &err {
        ApiError::DataLoadFailed { collection, .. } => assert_eq!(collection, "recipe_items"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.user_message(Locale::Ms), "Tak dapat memuatkan data ramalan.");
    assert_eq!(err.user_message(Locale::En), "Couldn't load forecast data.");
}

#[tokio::test]
async fn test_malformed_numeric_fields_read_as_zero() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let today = date(PLAIN_WEDNESDAY);
    {
        let conn = open_test_connection(&db_path).unwrap();
        insert_ingredient(&conn, "telur", "Telur", "biji").unwrap();
        conn.execute(
            "INSERT INTO ingredient_batches (id, ingredient_id, qty_remaining) VALUES ('b1', 'telur', 'banyak')",
            [],
        )
        .unwrap();
        insert_menu_item(&conn, "nl", "Nasi Lemak").unwrap();
        conn.execute(
            "INSERT INTO menu_variants (id, menu_item_id, name, price, baseline_daily) VALUES ('v1', 'nl', 'Biasa', 'x', 'abc')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO menu_variants (id, menu_item_id, name, price, baseline_daily) VALUES ('v2', 'nl', 'Special', '5.5', '10')",
            [],
        )
        .unwrap();
        insert_recipe(&conn, "v1", "telur", 1.0).unwrap();
        insert_recipe(&conn, "v2", "telur", 1.0).unwrap();
    }

    let state = create_test_state(&db_path, today, Locale::Ms);
    let snap = state.forecast_api.load_dashboard().await.unwrap();

    let units: Vec<(String, i64)> = snap
        .variants
        .iter()
        .map(|v| (v.variant_name.clone(), v.forecast_units))
        .collect();
    assert!(units.contains(&("Biasa".to_string(), 0)));
    assert!(units.contains(&("Special".to_string(), 10)));
    assert_eq!(snap.total_forecast_units, 10);

    // 库存读为 0 → 缺 10 biji
    assert_eq!(snap.alerts.len(), 1);
    assert!(snap.alerts[0].message.contains("10 biji"));
}

#[tokio::test]
async fn test_inventory_overview_statuses() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let today = date(PLAIN_WEDNESDAY);
    {
        let conn = open_test_connection(&db_path).unwrap();
        insert_ingredient(&conn, "a", "Ayam", "g").unwrap();
        insert_ingredient(&conn, "b", "Bawang", "g").unwrap();
        insert_ingredient(&conn, "c", "Cili", "g").unwrap();
        insert_batch(&conn, "b1", "b", 300.0, Some("2025-06-16"), None).unwrap();
        insert_batch(&conn, "c1", "c", 100.0, Some("2025-06-19"), None).unwrap();
    }

    let state = create_test_state(&db_path, today, Locale::Ms);
    let rows = state.forecast_api.inventory_overview().await.unwrap();

    let statuses: Vec<(&str, InventoryStatus)> =
        rows.iter().map(|r| (r.name.as_str(), r.status)).collect();
    assert_eq!(
        statuses,
        vec![
            ("Ayam", InventoryStatus::Empty),
            ("Bawang", InventoryStatus::Expired),
            ("Cili", InventoryStatus::Expiring),
        ]
    );
    assert_eq!(rows[2].next_expiry_days, Some(1));
}

#[tokio::test]
async fn test_receive_batch_and_validation() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let today = date(PLAIN_WEDNESDAY);
    {
        let conn = open_test_connection(&db_path).unwrap();
        insert_ingredient(&conn, "telur", "Telur", "biji").unwrap();
    }
    let state = create_test_state(&db_path, today, Locale::Ms);

    let batch = state
        .inventory_api
        .receive_batch(ReceiveBatchInput {
            ingredient_id: "telur".to_string(),
            qty: 30.0,
            expiry_date: Some(" ".to_string()),
            received_at: None,
        })
        .await
        .unwrap();
    assert!(batch.id.is_some());
    assert_eq!(batch.received_at, Some(today));
    assert_eq!(batch.expiry_date, None);

    let err = state
        .inventory_api
        .receive_batch(ReceiveBatchInput {
            ingredient_id: "telur".to_string(),
            qty: -1.0,
            expiry_date: None,
            received_at: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert_eq!(err.user_message(Locale::Ms), "Masukkan kuantiti yang sah (>= 0).");

    let err = state
        .inventory_api
        .receive_batch(ReceiveBatchInput {
            ingredient_id: "ghost".to_string(),
            qty: 1.0,
            expiry_date: None,
            received_at: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    let rows = state.forecast_api.inventory_overview().await.unwrap();
    assert_eq!(rows[0].available, 30.0);
    assert_eq!(rows[0].status, InventoryStatus::Ok);
}

#[tokio::test]
async fn test_add_ingredient_requires_name_and_unit() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let state = create_test_state(&db_path, date(PLAIN_WEDNESDAY), Locale::En);

    let err = state
        .inventory_api
        .add_ingredient(NewIngredientInput {
            name: "   ".to_string(),
            unit: "g".to_string(),
            low_stock_days_override: None,
        })
        .unwrap_err();
    assert_eq!(err.user_message(Locale::En), "Ingredient name and unit are required.");

    let ing = state
        .inventory_api
        .add_ingredient(NewIngredientInput {
            name: "  Kicap Manis ".to_string(),
            unit: " ml ".to_string(),
            low_stock_days_override: Some(0),
        })
        .unwrap();
    assert_eq!(ing.name, "Kicap Manis");
    assert_eq!(ing.unit, "ml");
    assert_eq!(ing.low_stock_days_override, None);

    let rows = state.forecast_api.inventory_overview().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, InventoryStatus::Empty);
}

#[tokio::test]
async fn test_english_locale_messages() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let today = date(PLAIN_WEDNESDAY);
    {
        let conn = open_test_connection(&db_path).unwrap();
        seed_nasi_lemak(&conn, today).unwrap();
    }

    let state = create_test_state(&db_path, today, Locale::En);
    let snap = state.forecast_api.load_dashboard().await.unwrap();
    assert!(snap.alerts[0].message.starts_with("Telur: not enough stock"));
    assert_eq!(snap.briefing[1], "Weather: Clear");
}

#[tokio::test]
async fn test_compute_stock_alerts_with_explicit_multiplier() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let today = date(PLAIN_WEDNESDAY);
    {
        let conn = open_test_connection(&db_path).unwrap();
        seed_nasi_lemak(&conn, today).unwrap();
    }
    let state = create_test_state(&db_path, today, Locale::Ms);
    let snap = state.forecast_api.load_dashboard().await.unwrap();

    // 乘数 3.0 → 60 份 → 米 6000 g > 5000 g
    let alerts = state
        .forecast_api
        .compute_stock_alerts(3.0, &snap.context)
        .await
        .unwrap();
    let ids: Vec<&str> = alerts.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["low_beras", "low_telur"]);
    assert!(alerts[0].message.contains("1.0 kg (~1000 g)"));
}
