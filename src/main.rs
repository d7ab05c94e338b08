// ==========================================
// 夜市摊位库存系统 - 命令行入口
// ==========================================
// 用途: 对配置的数据库计算一次看板快照, 以 JSON 输出
// 环境变量: GERAI_FORECAST_DB_PATH / GERAI_FORECAST_LOCALE / RUST_LOG
// ==========================================

use gerai_forecast::app::AppState;
use gerai_forecast::config::AppConfig;
use gerai_forecast::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", gerai_forecast::APP_NAME, gerai_forecast::VERSION);
    tracing::info!("==================================================");

    let config = AppConfig::from_env();
    tracing::info!("使用数据库: {}", config.db_path);

    let state = AppState::new(config).map_err(anyhow::Error::msg)?;

    match state.forecast_api.load_dashboard().await {
        Ok(snapshot) => {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "看板快照计算失败");
            eprintln!("{}", e.user_message(state.locale));
            std::process::exit(1);
        }
    }
}
