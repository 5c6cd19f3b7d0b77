#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_runtime;
mod app_types;
mod bridge_channels;
mod bridge_error;
mod close_policy;
mod content_source;
mod desktop_bridge;
mod desktop_bridge_commands;
mod dialog_options;
mod dialogs;
mod exit_events;
mod logging;
mod main_window;
mod path_keys;
mod runtime_paths;
mod settings_window;
mod shell_locale;
mod startup_mode;
mod startup_resolver;
mod tray_actions;
mod tray_menu_handler;
mod tray_setup;
mod window_actions;
mod window_control;
mod window_reveal;

use std::sync::Mutex;

use logging::DesktopLogCategory;

pub(crate) use app_constants::*;
pub(crate) use app_types::{AtomicFlagGuard, ShellState};

static DESKTOP_LOG_WRITE_LOCK: Mutex<()> = Mutex::new(());

fn append_categorized_log(category: DesktopLogCategory, message: &str) {
    logging::append_desktop_log(
        category,
        message,
        runtime_paths::default_log_dir(),
        DESKTOP_LOG_FILE,
        DESKTOP_LOG_MAX_BYTES,
        LOG_BACKUP_COUNT,
        &DESKTOP_LOG_WRITE_LOCK,
    );
}

pub(crate) fn append_desktop_log(message: &str) {
    append_categorized_log(DesktopLogCategory::Runtime, message);
}

pub(crate) fn append_startup_log(message: &str) {
    append_categorized_log(DesktopLogCategory::Startup, message);
}

pub(crate) fn append_bridge_log(message: &str) {
    append_categorized_log(DesktopLogCategory::Bridge, message);
}

pub(crate) fn append_shutdown_log(message: &str) {
    append_categorized_log(DesktopLogCategory::Shutdown, message);
}

fn main() {
    app_runtime::run();
}
