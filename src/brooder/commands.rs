use anyhow::anyhow;
use tauri::{AppHandle, Emitter, State};

use crate::{
    brooder::{BrooderController, BrooderEvent, EventSink, SessionSnapshot},
    history::{Sample, WeeklyAverage},
    settings::MonitorSettings,
    AppState,
};

/// Forwards engine events to the web view.
pub struct TauriEventSink {
    app_handle: AppHandle,
}

impl TauriEventSink {
    pub fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }
}

impl EventSink for TauriEventSink {
    fn publish(&self, event: &BrooderEvent) -> anyhow::Result<()> {
        self.app_handle
            .emit(event.name(), event)
            .map_err(|err| anyhow!("failed to emit {}: {err}", event.name()))
    }
}

fn controller_from_state(state: &State<'_, AppState>) -> BrooderController {
    state.brooder.clone()
}

#[tauri::command]
pub async fn get_session_snapshot(state: State<'_, AppState>) -> Result<SessionSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.get_snapshot().await)
}

#[tauri::command]
pub async fn get_weekly_trend(state: State<'_, AppState>) -> Result<Vec<WeeklyAverage>, String> {
    let controller = controller_from_state(&state);
    Ok(controller.get_weekly_trend().await)
}

#[tauri::command]
pub async fn get_recent_readings(
    state: State<'_, AppState>,
    count: usize,
) -> Result<Vec<Sample>, String> {
    let controller = controller_from_state(&state);
    Ok(controller.get_recent_readings(count).await)
}

#[tauri::command]
pub fn get_monitor_settings(state: State<'_, AppState>) -> Result<MonitorSettings, String> {
    Ok(state.brooder.settings().clone())
}

#[tauri::command]
pub async fn start_monitoring(state: State<'_, AppState>) -> Result<bool, String> {
    let controller = controller_from_state(&state);
    Ok(controller.start_monitoring().await)
}

#[tauri::command]
pub async fn stop_monitoring(state: State<'_, AppState>) -> Result<(), String> {
    let controller = controller_from_state(&state);
    controller.stop_monitoring().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn set_target_temperature(state: State<'_, AppState>, value: f64) -> Result<(), String> {
    let controller = controller_from_state(&state);
    controller
        .set_target_temperature(value)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn toggle_light(state: State<'_, AppState>) -> Result<(), String> {
    let controller = controller_from_state(&state);
    controller.toggle_light().await;
    Ok(())
}

#[tauri::command]
pub async fn toggle_light_mode(state: State<'_, AppState>) -> Result<(), String> {
    let controller = controller_from_state(&state);
    controller.toggle_light_mode().await;
    Ok(())
}

#[tauri::command]
pub async fn dismiss_notification(state: State<'_, AppState>, id: String) -> Result<(), String> {
    let controller = controller_from_state(&state);
    controller.dismiss_notification(&id).await;
    Ok(())
}

#[tauri::command]
pub async fn mark_notification_read(state: State<'_, AppState>, id: String) -> Result<(), String> {
    let controller = controller_from_state(&state);
    controller.mark_notification_read(&id).await;
    Ok(())
}

#[tauri::command]
pub async fn mark_all_notifications_read(state: State<'_, AppState>) -> Result<(), String> {
    let controller = controller_from_state(&state);
    controller.mark_all_notifications_read().await;
    Ok(())
}

/// The web view shows the yes/no prompt and passes the answer along.
#[tauri::command]
pub async fn reset_session(state: State<'_, AppState>, confirmed: bool) -> Result<bool, String> {
    let controller = controller_from_state(&state);
    Ok(controller.reset_session(|_| confirmed).await)
}
