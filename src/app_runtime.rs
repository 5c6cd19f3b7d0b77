use tauri::{ipc::CapabilityBuilder, webview::PageLoadEvent, App, Manager, RunEvent, WindowEvent};

use crate::{
    append_desktop_log, append_startup_log,
    close_policy::{decide_main_window_close, MainWindowCloseDecision},
    exit_events, logging, main_window, runtime_paths,
    settings_window::SlotRelease,
    startup_mode::{self, StartupMode},
    startup_resolver, tray_setup, window_actions, ShellState, DESKTOP_LOG_FILE,
    DEV_SERVER_CAPABILITY, DEV_SERVER_REMOTE_PATTERN, MAIN_WINDOW_LABEL, SETTINGS_WINDOW_LABEL,
    STARTUP_MODE_ENV,
};

/// Remote pages from the renderer dev server may only reach the bridge in
/// debug builds started in development mode.
fn grants_dev_server_bridge(debug_build: bool, startup_mode: StartupMode) -> bool {
    debug_build && startup_mode == StartupMode::Development
}

fn add_dev_server_capability(app: &App, startup_mode: StartupMode) {
    if !grants_dev_server_bridge(cfg!(debug_assertions), startup_mode) {
        return;
    }
    let capability = CapabilityBuilder::new(DEV_SERVER_CAPABILITY)
        .windows([MAIN_WINDOW_LABEL, SETTINGS_WINDOW_LABEL])
        .remote(DEV_SERVER_REMOTE_PATTERN.to_string())
        .permission("core:event:default");
    match app.add_capability(capability) {
        Ok(()) => append_startup_log(&format!(
            "granted bridge access to {DEV_SERVER_REMOTE_PATTERN}"
        )),
        Err(error) => append_startup_log(&format!(
            "failed to grant bridge access to the dev server: {error}"
        )),
    }
}

pub(crate) fn run() {
    append_startup_log("desktop process starting");
    append_startup_log(&format!(
        "desktop log path: {}",
        logging::resolve_desktop_log_path(runtime_paths::default_log_dir(), DESKTOP_LOG_FILE)
            .display()
    ));
    let startup_mode = startup_mode::resolve_startup_mode(STARTUP_MODE_ENV, append_startup_log);
    append_startup_log(&format!("startup mode: {}", startup_mode.as_str()));

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, argv, _cwd| {
            append_desktop_log(&format!(
                "second instance launched with {} args, focusing main window",
                argv.len()
            ));
            window_actions::show_main_window(app, append_desktop_log);
        }))
        .plugin(tauri_plugin_dialog::init())
        .manage(ShellState::new(startup_mode))
        .invoke_handler(tauri::generate_handler![
            crate::desktop_bridge_commands::shell_bridge_is_desktop_runtime,
            crate::desktop_bridge_commands::shell_bridge_invoke,
        ])
        .on_window_event(|window, event| match event {
            WindowEvent::CloseRequested { api, .. } if window.label() == MAIN_WINDOW_LABEL => {
                let app_handle = window.app_handle();
                let state = app_handle.state::<ShellState>();
                match decide_main_window_close(state.has_tray(), state.is_quitting()) {
                    MainWindowCloseDecision::HideToTray => {
                        api.prevent_close();
                        window_actions::hide_main_window(app_handle, append_desktop_log);
                    }
                    MainWindowCloseDecision::Close => append_desktop_log("main window closing"),
                }
            }
            WindowEvent::Destroyed => {
                let state = window.app_handle().state::<ShellState>();
                state.drop_reveal_gate(window.label());
                if window.label() == SETTINGS_WINDOW_LABEL {
                    match state.settings_window.release(window.label()) {
                        SlotRelease::Released => append_desktop_log("settings window closed"),
                        SlotRelease::Deferred => {
                            append_desktop_log("settings window closed while its slot was busy")
                        }
                        SlotRelease::NotHeld => {}
                    }
                }
            }
            _ => {}
        })
        .on_page_load(|webview, payload| match payload.event() {
            PageLoadEvent::Started => {
                append_desktop_log(&format!(
                    "page-load started [{}]: {}",
                    webview.label(),
                    payload.url()
                ));
            }
            PageLoadEvent::Finished => {
                append_desktop_log(&format!(
                    "page-load finished [{}]: {}",
                    webview.label(),
                    payload.url()
                ));
                main_window::handle_page_load_finished(
                    webview.app_handle(),
                    webview.label(),
                    payload.url(),
                    append_desktop_log,
                );
            }
        })
        .setup(|app| {
            let app_handle = app.handle().clone();
            add_dev_server_capability(app, app_handle.state::<ShellState>().startup_mode);
            main_window::create_main_window(&app_handle, append_startup_log)?;

            if let Err(error) = tray_setup::setup_tray(&app_handle) {
                append_startup_log(&format!("failed to initialize tray: {error}"));
            }

            startup_resolver::spawn_content_load(app_handle, append_startup_log);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { code, api, .. } => {
                exit_events::handle_exit_requested(app_handle, code, &api);
            }
            RunEvent::Exit => {
                exit_events::handle_exit_event(app_handle);
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen { .. } => {
                main_window::ensure_main_window(app_handle, append_startup_log);
            }
            _ => {}
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_server_bridge_is_granted_only_to_debug_development_runs() {
        assert!(grants_dev_server_bridge(true, StartupMode::Development));
        assert!(!grants_dev_server_bridge(true, StartupMode::Packaged));
        assert!(!grants_dev_server_bridge(false, StartupMode::Development));
        assert!(!grants_dev_server_bridge(false, StartupMode::Packaged));
    }
}
