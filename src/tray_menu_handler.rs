use tauri::AppHandle;

use crate::{append_desktop_log, exit_events, tray_actions, window_actions};

pub(crate) fn handle_tray_menu_event(app_handle: &AppHandle, menu_id: &str) {
    match tray_actions::action_from_menu_id(menu_id) {
        Some(tray_actions::TrayMenuAction::ShowWindow) => {
            window_actions::show_main_window(app_handle, append_desktop_log)
        }
        Some(tray_actions::TrayMenuAction::Quit) => exit_events::request_quit(app_handle, "tray"),
        None => append_desktop_log(&format!("ignored unknown tray menu id '{menu_id}'")),
    }
}
