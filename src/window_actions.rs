use tauri::{AppHandle, Manager};

use crate::{
    window_control::{reveal_and_focus, toggle_visibility, VisibilityChange, WindowControl},
    MAIN_WINDOW_LABEL,
};

pub(crate) fn show_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("show_main_window skipped: main window not found");
        return;
    };
    if let Err(error) = reveal_and_focus(&window) {
        log(&format!("failed to show main window: {error}"));
    }
}

pub(crate) fn hide_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("hide_main_window skipped: main window not found");
        return;
    };
    match window.hide_window() {
        Ok(()) => log("main window hidden to tray"),
        Err(error) => log(&format!("failed to hide main window: {error}")),
    }
}

pub(crate) fn toggle_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("toggle_main_window skipped: main window not found");
        return;
    };

    match toggle_visibility(&window) {
        Ok(VisibilityChange::Shown) => log("main window shown from tray"),
        Ok(VisibilityChange::Hidden) => log("main window hidden from tray"),
        Err(error) => log(&format!("failed to toggle main window: {error}")),
    }
}
