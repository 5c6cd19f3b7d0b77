use tauri::{AppHandle, ExitRequestApi, Manager};

use crate::{
    append_shutdown_log,
    close_policy::{decide_all_windows_closed, AllWindowsClosedDecision, HostPlatform},
    ShellState, TRAY_ID,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitRequestKind {
    /// `AppHandle::exit`, or any request made after quitting began.
    Explicit,
    LastWindowClosed,
}

fn classify_exit_request(code: Option<i32>, is_quitting: bool) -> ExitRequestKind {
    if code.is_some() || is_quitting {
        ExitRequestKind::Explicit
    } else {
        ExitRequestKind::LastWindowClosed
    }
}

pub(crate) fn request_quit(app_handle: &AppHandle, source: &str) {
    app_handle.state::<ShellState>().mark_quitting();
    append_shutdown_log(&format!("quit requested by {source}, exiting desktop process"));
    app_handle.exit(0);
}

pub(crate) fn handle_exit_requested(
    app_handle: &AppHandle,
    code: Option<i32>,
    api: &ExitRequestApi,
) {
    let state = app_handle.state::<ShellState>();
    match classify_exit_request(code, state.is_quitting()) {
        ExitRequestKind::Explicit => {
            state.mark_quitting();
            append_shutdown_log(&format!("exit requested with code {code:?}"));
        }
        ExitRequestKind::LastWindowClosed => {
            match decide_all_windows_closed(HostPlatform::current(), state.has_tray()) {
                AllWindowsClosedDecision::KeepRunning => {
                    api.prevent_exit();
                    append_shutdown_log("last window closed, shell keeps running");
                }
                AllWindowsClosedDecision::Exit => {
                    state.mark_quitting();
                    append_shutdown_log("last window closed, exiting desktop process");
                }
            }
        }
    }
}

pub(crate) fn handle_exit_event(app_handle: &AppHandle) {
    let state = app_handle.state::<ShellState>();
    if app_handle.remove_tray_by_id(TRAY_ID).is_some() {
        append_shutdown_log("tray icon removed");
    }
    state.mark_tray_removed();
    append_shutdown_log("desktop process exit");
}
