use serde::Serialize;
use serde_json::Value;
use tauri::{AppHandle, Manager, Webview, WebviewWindow};

use crate::{
    append_bridge_log, append_desktop_log,
    bridge_channels::BridgeChannel,
    bridge_error::BridgeError,
    dialog_options::{parse_options, MessageBoxOptions, OpenDialogOptions, SaveDialogOptions},
    dialogs, exit_events,
    path_keys::{resolve_path_key, PathKey},
    settings_window,
    window_control::{toggle_maximize, WindowControl},
};

fn resolve_channel(name: &str) -> Result<BridgeChannel, BridgeError> {
    BridgeChannel::from_name(name).ok_or_else(|| BridgeError::UnknownChannel(name.to_string()))
}

fn to_json_or_null<T: Serialize>(value: Option<T>) -> Value {
    value
        .and_then(|value| serde_json::to_value(value).ok())
        .unwrap_or(Value::Null)
}

/// Runs a window channel against the calling window. Host failures are only
/// logged, so the webview always receives `null`.
fn run_window_command<W, F>(owner: Option<&W>, channel: BridgeChannel, log: F) -> Value
where
    W: WindowControl + ?Sized,
    F: Fn(&str),
{
    let Some(window) = owner else {
        log(&format!("{} ignored: no owning window", channel.name()));
        return Value::Null;
    };

    let result = match channel {
        BridgeChannel::WindowMinimize => window.minimize_window(),
        BridgeChannel::WindowMaximize => toggle_maximize(window).map(|_| ()),
        BridgeChannel::WindowClose => window.close_window(),
        _ => Err(format!("{} is not a window command", channel.name())),
    };
    if let Err(error) = result {
        log(&format!("{} failed: {error}", channel.name()));
    }
    Value::Null
}

async fn dispatch_bridge_call(
    app_handle: &AppHandle,
    owner: Option<WebviewWindow>,
    channel: BridgeChannel,
    payload: Option<Value>,
) -> Result<Value, BridgeError> {
    match channel {
        BridgeChannel::WindowMinimize | BridgeChannel::WindowMaximize | BridgeChannel::WindowClose => {
            Ok(run_window_command(owner.as_ref(), channel, append_bridge_log))
        }
        BridgeChannel::WindowOpenSettings => {
            if let Err(error) = settings_window::open_settings_window(app_handle, append_desktop_log)
            {
                append_bridge_log(&format!("failed to open settings window: {error}"));
            }
            Ok(Value::Null)
        }
        BridgeChannel::AppGetVersion => Ok(Value::String(
            app_handle.package_info().version.to_string(),
        )),
        BridgeChannel::AppGetPath => {
            let key = PathKey::from_payload(payload.as_ref())?;
            let path = resolve_path_key(app_handle, key)?;
            Ok(Value::String(path.display().to_string()))
        }
        BridgeChannel::AppQuit => {
            exit_events::request_quit(app_handle, "renderer");
            Ok(Value::Null)
        }
        BridgeChannel::DialogShowOpen => {
            let options: OpenDialogOptions = parse_options(channel, payload)?;
            let Some(owner) = owner else {
                return Ok(Value::Null);
            };
            Ok(to_json_or_null(
                dialogs::show_open_dialog(app_handle, &owner, options).await,
            ))
        }
        BridgeChannel::DialogShowSave => {
            let options: SaveDialogOptions = parse_options(channel, payload)?;
            let Some(owner) = owner else {
                return Ok(Value::Null);
            };
            Ok(to_json_or_null(
                dialogs::show_save_dialog(app_handle, &owner, options).await,
            ))
        }
        BridgeChannel::DialogShowMessage => {
            let options: MessageBoxOptions = parse_options(channel, payload)?;
            let Some(owner) = owner else {
                return Ok(Value::Null);
            };
            Ok(to_json_or_null(
                dialogs::show_message_box(app_handle, &owner, options).await,
            ))
        }
    }
}

#[tauri::command]
pub(crate) fn shell_bridge_is_desktop_runtime() -> bool {
    true
}

#[tauri::command]
pub(crate) async fn shell_bridge_invoke(
    app_handle: AppHandle,
    webview: Webview,
    channel: String,
    payload: Option<Value>,
) -> Result<Value, BridgeError> {
    let channel = resolve_channel(&channel).inspect_err(|error| {
        append_bridge_log(&format!("rejected bridge call: {error}"));
    })?;
    let owner = app_handle.get_webview_window(webview.label());

    dispatch_bridge_call(&app_handle, owner, channel, payload)
        .await
        .inspect_err(|error| {
            append_bridge_log(&format!("{} failed: {error}", channel.name()));
        })
}
