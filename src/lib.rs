pub mod alerts;
pub mod brooder;
pub mod history;
pub mod models;
pub mod sensing;
pub mod settings;
pub mod utils;

#[cfg(feature = "app")]
use settings::SettingsStore;

pub use brooder::{BrooderController, BrooderEvent, EventSink, SessionSnapshot};
pub use settings::MonitorSettings;

#[cfg(feature = "app")]
pub(crate) struct AppState {
    pub(crate) brooder: BrooderController,
}

#[cfg(feature = "app")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use std::sync::Arc;

    use brooder::commands::{
        dismiss_notification, get_monitor_settings, get_recent_readings, get_session_snapshot,
        get_weekly_trend,
        mark_all_notifications_read, mark_notification_read, reset_session, set_target_temperature,
        start_monitoring, stop_monitoring, toggle_light, toggle_light_mode, TauriEventSink,
    };
    use tauri::Manager;

    utils::init_logging();

    log::info!("Brooder Monitor starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let settings_path = app_data_dir.join("settings.json");
                let settings_store = SettingsStore::new(settings_path)?;
                let settings = settings_store.current().with_env_overrides();

                let sink = Arc::new(TauriEventSink::new(app.handle().clone()));
                let controller = BrooderController::new(settings, sink);

                app.manage(AppState {
                    brooder: controller,
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            get_session_snapshot,
            get_weekly_trend,
            get_recent_readings,
            get_monitor_settings,
            start_monitoring,
            stop_monitoring,
            set_target_temperature,
            toggle_light,
            toggle_light_mode,
            dismiss_notification,
            mark_notification_read,
            mark_all_notifications_read,
            reset_session,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// Headless monitor: runs the simulated feed and logs every event until Ctrl-C.
#[cfg(not(feature = "app"))]
pub fn run() {
    utils::init_logging();

    log::info!("Brooder Monitor starting up (headless)...");

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            log::error!("failed to start async runtime: {err}");
            return;
        }
    };

    if let Err(err) = runtime.block_on(run_headless()) {
        log::error!("headless monitor failed: {err:?}");
    }
}

#[cfg(not(feature = "app"))]
async fn run_headless() -> anyhow::Result<()> {
    use anyhow::Context;
    use std::sync::Arc;

    let settings = MonitorSettings::default().with_env_overrides();
    let controller = BrooderController::new(settings, Arc::new(brooder::LogSink));

    controller.start_monitoring().await;
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;

    log::info!("shutting down");
    controller.stop_monitoring().await
}
