use std::sync::Arc;

use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder, Wry};
use url::Url;

use crate::{
    desktop_bridge, startup_resolver,
    window_control::reveal_and_focus,
    window_reveal::{wait_for_reveal, LoadOutcome, RevealGate, RevealTrigger},
    ShellState, MAIN_WINDOW_DEFAULT_SIZE, MAIN_WINDOW_LABEL, MAIN_WINDOW_MIN_SIZE,
    MAIN_WINDOW_TITLE, WINDOW_REVEAL_TIMEOUT,
};

const LOAD_ERROR_HEADLINE: &str = "Unable to load the application";

/// Window settings shared by every shell window: hidden until revealed,
/// frameless and transparent, with the bridge installed before page scripts.
pub(crate) fn shell_window_builder<'a>(
    app_handle: &'a AppHandle,
    label: &str,
    url: WebviewUrl,
) -> WebviewWindowBuilder<'a, Wry, AppHandle> {
    let builder = WebviewWindowBuilder::new(app_handle, label, url)
        .visible(false)
        .transparent(true)
        .shadow(true)
        .initialization_script(&desktop_bridge::bridge_init_script(std::env::consts::OS));

    #[cfg(target_os = "macos")]
    let builder = builder
        .title_bar_style(tauri::TitleBarStyle::Overlay)
        .hidden_title(true);
    #[cfg(not(target_os = "macos"))]
    let builder = builder.decorations(false);

    builder
}

pub(crate) fn create_main_window<F>(app_handle: &AppHandle, log: F) -> Result<WebviewWindow, String>
where
    F: Fn(&str) + Copy + Send + 'static,
{
    let blank = Url::parse("about:blank")
        .map_err(|error| format!("Failed to build initial main window url: {error}"))?;
    let gate = arm_window_reveal(app_handle, MAIN_WINDOW_LABEL, log);

    let window = shell_window_builder(app_handle, MAIN_WINDOW_LABEL, WebviewUrl::External(blank))
        .title(MAIN_WINDOW_TITLE)
        .inner_size(MAIN_WINDOW_DEFAULT_SIZE.0, MAIN_WINDOW_DEFAULT_SIZE.1)
        .min_inner_size(MAIN_WINDOW_MIN_SIZE.0, MAIN_WINDOW_MIN_SIZE.1)
        .build()
        .map_err(|error| {
            app_handle
                .state::<ShellState>()
                .drop_reveal_gate(MAIN_WINDOW_LABEL);
            format!("Failed to create main window: {error}")
        })?;
    log(&format!(
        "main window created, reveal phase {:?}",
        gate.phase()
    ));

    #[cfg(debug_assertions)]
    if app_handle.state::<ShellState>().startup_mode
        == crate::startup_mode::StartupMode::Development
    {
        window.open_devtools();
    }

    Ok(window)
}

/// Brings back the main window, recreating it and reloading its content when
/// it was closed (macOS dock re-activation).
pub(crate) fn ensure_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str) + Copy + Send + 'static,
{
    if let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
        if let Err(error) = reveal_and_focus(&window) {
            log(&format!("failed to reveal main window: {error}"));
        }
        return;
    }

    match create_main_window(app_handle, log) {
        Ok(_) => startup_resolver::spawn_content_load(app_handle.clone(), log),
        Err(error) => log(&format!("failed to recreate main window: {error}")),
    }
}

fn describe_trigger(trigger: RevealTrigger) -> &'static str {
    match trigger {
        RevealTrigger::Loaded => "content loaded",
        RevealTrigger::LoadFailed => "content failed to load",
        RevealTrigger::TimedOut => "reveal timeout elapsed",
    }
}

/// Installs a fresh reveal gate for `label` and starts the watcher that shows
/// the window on the first of load, load failure, or timeout.
pub(crate) fn arm_window_reveal<F>(
    app_handle: &AppHandle,
    label: &'static str,
    log: F,
) -> Arc<RevealGate>
where
    F: Fn(&str) + Send + 'static,
{
    let (gate, signal) = RevealGate::arm();
    let gate = Arc::new(gate);
    app_handle
        .state::<ShellState>()
        .install_reveal_gate(label, Arc::clone(&gate));

    let watched_gate = Arc::clone(&gate);
    let app_handle = app_handle.clone();
    tauri::async_runtime::spawn(async move {
        let trigger = wait_for_reveal(signal, WINDOW_REVEAL_TIMEOUT).await;

        // A window recreated under the same label owns a newer gate.
        let still_current = app_handle
            .state::<ShellState>()
            .reveal_gate(label)
            .is_some_and(|current| Arc::ptr_eq(&current, &watched_gate));
        if !still_current || !watched_gate.settle(trigger) {
            return;
        }

        let Some(window) = app_handle.get_webview_window(label) else {
            log(&format!("window '{label}' closed before it could be revealed"));
            return;
        };
        log(&format!(
            "revealing window '{label}': {}",
            describe_trigger(trigger)
        ));
        if let Err(error) = reveal_and_focus(&window) {
            log(&format!("failed to reveal window '{label}': {error}"));
        }
    });

    gate
}

/// Page-load hook: a finished navigation to real content releases the
/// window's reveal gate. The initial `about:blank` document does not count.
pub(crate) fn handle_page_load_finished<F>(app_handle: &AppHandle, label: &str, url: &Url, log: F)
where
    F: Fn(&str),
{
    if url.scheme() == "about" {
        return;
    }
    let Some(gate) = app_handle.state::<ShellState>().reveal_gate(label) else {
        return;
    };
    if gate.report(LoadOutcome::Loaded) {
        log(&format!("window '{label}' finished loading {url}"));
    }
}

pub(crate) fn load_error_script(message: &str) -> String {
    let headline = serde_json::to_string(LOAD_ERROR_HEADLINE).unwrap_or_default();
    let detail = serde_json::to_string(message).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"(() => {{
  const root = document.body || document.documentElement.appendChild(document.createElement("body"));
  root.replaceChildren();
  root.style.cssText = "margin:0;height:100vh;display:flex;align-items:center;justify-content:center;background:#1f1f1f;color:#e8e8e8;font-family:system-ui,sans-serif;";
  const panel = document.createElement("div");
  panel.style.cssText = "max-width:560px;padding:24px;text-align:center;";
  const headline = document.createElement("h1");
  headline.style.cssText = "font-size:18px;margin:0 0 12px;";
  headline.textContent = {headline};
  const detail = document.createElement("p");
  detail.style.cssText = "font-size:13px;opacity:0.75;word-break:break-word;";
  detail.textContent = {detail};
  panel.append(headline, detail);
  root.append(panel);
}})();
"#
    )
}

pub(crate) fn render_load_error<F>(app_handle: &AppHandle, label: &str, message: &str, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(label) else {
        log(&format!("cannot render load error: window '{label}' not found"));
        return;
    };
    if let Err(error) = window.eval(&load_error_script(message)) {
        log(&format!(
            "failed to render load error in window '{label}': {error}"
        ));
    }
}
