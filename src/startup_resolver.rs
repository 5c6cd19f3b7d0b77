use std::{env, future::Future, path::PathBuf, time::Duration};

use tauri::{path::BaseDirectory, AppHandle, Manager, WebviewWindow};
use tokio::net::TcpStream;

use crate::{
    content_source::{dev_port_candidates, ContentSource},
    main_window,
    startup_mode::StartupMode,
    window_reveal::LoadOutcome,
    AtomicFlagGuard, ShellState, DEV_PORT_ENV, DEV_PORT_PROBE_TIMEOUT, DEV_SERVER_HOST,
    MAIN_WINDOW_LABEL, PACKAGED_ENTRY_DOCUMENT,
};

pub(crate) fn resolve_resource_path(
    app_handle: &AppHandle,
    relative_path: &str,
) -> Result<PathBuf, String> {
    app_handle
        .path()
        .resolve(relative_path, BaseDirectory::Resource)
        .map_err(|error| format!("Failed to resolve resource '{relative_path}': {error}"))
}

/// The content source a window would use before any load has succeeded:
/// the packaged entry, or the first dev server candidate.
pub(crate) fn default_content_source(startup_mode: StartupMode) -> Result<ContentSource, String> {
    match startup_mode {
        StartupMode::Packaged => Ok(ContentSource::PackagedApp),
        StartupMode::Development => {
            let configured = env::var(DEV_PORT_ENV).ok();
            let port = dev_port_candidates(configured.as_deref(), |_| {})
                .first()
                .copied()
                .ok_or_else(|| "No dev server port candidates configured.".to_string())?;
            Ok(ContentSource::DevServer { port })
        }
    }
}

pub(crate) async fn probe_tcp(host: &str, port: u16, timeout: Duration) -> Result<(), String> {
    match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(_stream)) => Ok(()),
        Ok(Err(error)) => Err(format!("connect to {host}:{port} failed: {error}")),
        Err(_) => Err(format!(
            "connect to {host}:{port} timed out after {}ms",
            timeout.as_millis()
        )),
    }
}

/// Tries each port in order and stops at the first successful attempt.
pub(crate) async fn load_first_reachable<A, Fut, L>(
    candidates: &[u16],
    mut attempt: A,
    log: L,
) -> Option<u16>
where
    A: FnMut(u16) -> Fut,
    Fut: Future<Output = Result<(), String>>,
    L: Fn(&str),
{
    for &port in candidates {
        match attempt(port).await {
            Ok(()) => return Some(port),
            Err(error) => log(&format!("dev server port {port} skipped: {error}")),
        }
    }
    None
}

/// Probes each dev server candidate and navigates the target resolved after
/// that probe, so a window recreated mid-probe still receives the content.
pub(crate) async fn load_dev_candidates<P, Fut, R, T, N, L>(
    candidates: &[u16],
    probe: P,
    resolve_target: R,
    navigate: N,
    log: L,
) -> Option<u16>
where
    P: Fn(u16) -> Fut,
    Fut: Future<Output = Result<(), String>>,
    R: Fn() -> Result<T, String>,
    N: Fn(&T, u16) -> Result<(), String>,
    L: Fn(&str),
{
    let probe = &probe;
    let resolve_target = &resolve_target;
    let navigate = &navigate;
    load_first_reachable(
        candidates,
        |port| async move {
            probe(port).await?;
            let target = resolve_target()?;
            navigate(&target, port)
        },
        log,
    )
    .await
}

fn main_window_handle(app_handle: &AppHandle) -> Result<WebviewWindow, String> {
    app_handle
        .get_webview_window(MAIN_WINDOW_LABEL)
        .ok_or_else(|| "Main window is not available.".to_string())
}

fn navigate_to(window: &WebviewWindow, source: &ContentSource) -> Result<(), String> {
    let url = source.entry_url()?;
    window
        .navigate(url.clone())
        .map_err(|error| format!("Failed to navigate main window to {url}: {error}"))
}

fn load_packaged_entry(app_handle: &AppHandle) -> Result<ContentSource, String> {
    if app_handle
        .asset_resolver()
        .get(PACKAGED_ENTRY_DOCUMENT.to_string())
        .is_none()
    {
        return Err(format!(
            "Packaged entry document '{PACKAGED_ENTRY_DOCUMENT}' is not embedded in the app."
        ));
    }

    let source = ContentSource::PackagedApp;
    navigate_to(&main_window_handle(app_handle)?, &source)?;
    Ok(source)
}

async fn load_dev_server<F>(app_handle: &AppHandle, log: F) -> Result<ContentSource, String>
where
    F: Fn(&str) + Copy,
{
    let configured = env::var(DEV_PORT_ENV).ok();
    let candidates = dev_port_candidates(configured.as_deref(), log);

    let port = load_dev_candidates(
        &candidates,
        |port| probe_tcp(DEV_SERVER_HOST, port, DEV_PORT_PROBE_TIMEOUT),
        || main_window_handle(app_handle),
        |window, port| navigate_to(window, &ContentSource::DevServer { port }),
        log,
    )
    .await
    .ok_or_else(|| format!("No dev server reachable on ports {candidates:?}"))?;

    log(&format!("dev server answered on port {port}"));
    Ok(ContentSource::DevServer { port })
}

/// Resolves the main window's content in the background. Success is
/// confirmed later by the page-load hook; failure reveals the window with an
/// error message in place of the content.
pub(crate) fn spawn_content_load<F>(app_handle: AppHandle, log: F)
where
    F: Fn(&str) + Copy + Send + 'static,
{
    tauri::async_runtime::spawn(async move {
        let state = app_handle.state::<ShellState>();
        let Some(_resolving) = AtomicFlagGuard::try_set(&state.is_resolving_content) else {
            if let Some(gate) = state.reveal_gate(MAIN_WINDOW_LABEL) {
                gate.mark_loading();
            }
            log("content load already in progress, skipping");
            return;
        };
        if let Some(gate) = state.reveal_gate(MAIN_WINDOW_LABEL) {
            gate.mark_loading();
        }

        log(&format!(
            "resolving main window content in {} mode",
            state.startup_mode.as_str()
        ));
        let outcome = match state.startup_mode {
            StartupMode::Packaged => load_packaged_entry(&app_handle),
            StartupMode::Development => load_dev_server(&app_handle, log).await,
        };

        match outcome {
            Ok(source) => state.set_content_source(source),
            Err(error) => {
                log(&format!("main window content failed to load: {error}"));
                main_window::render_load_error(&app_handle, MAIN_WINDOW_LABEL, &error, log);
                if let Some(gate) = state.reveal_gate(MAIN_WINDOW_LABEL) {
                    gate.report(LoadOutcome::Failed(error));
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        future::ready,
    };

    use tokio::net::TcpListener;

    use super::*;

    #[tokio::test]
    async fn load_first_reachable_stops_at_first_success() {
        let attempts = RefCell::new(Vec::new());
        let candidates = dev_port_candidates(Some("3100"), |_| {});

        let loaded = load_first_reachable(
            &candidates,
            |port| {
                attempts.borrow_mut().push(port);
                ready(if port == 3002 {
                    Ok(())
                } else {
                    Err("connection refused".to_string())
                })
            },
            |_| {},
        )
        .await;

        assert_eq!(loaded, Some(3002));
        assert_eq!(*attempts.borrow(), vec![3100, 3000, 3001, 3002]);
    }

    #[tokio::test]
    async fn load_first_reachable_logs_every_failure_when_nothing_answers() {
        let messages = RefCell::new(Vec::new());
        let candidates = [3000, 3001, 3002];

        let loaded = load_first_reachable(
            &candidates,
            |_| ready(Err("connection refused".to_string())),
            |message| messages.borrow_mut().push(message.to_string()),
        )
        .await;

        assert_eq!(loaded, None);
        assert_eq!(messages.borrow().len(), candidates.len());
        assert!(messages.borrow()[0].contains("3000"));
    }

    #[tokio::test]
    async fn dev_load_navigates_the_window_current_after_each_attempt() {
        let window_generation = Cell::new(1_u32);
        let navigations = RefCell::new(Vec::new());

        let loaded = load_dev_candidates(
            &[3100, 3000],
            |port| {
                if port == 3100 {
                    // The main window is recreated while this port is tried.
                    window_generation.set(2);
                    ready(Err("connection refused".to_string()))
                } else {
                    ready(Ok(()))
                }
            },
            || Ok(window_generation.get()),
            |generation, port| {
                navigations.borrow_mut().push((*generation, port));
                Ok(())
            },
            |_| {},
        )
        .await;

        assert_eq!(loaded, Some(3000));
        assert_eq!(*navigations.borrow(), vec![(2, 3000)]);
    }

    #[tokio::test]
    async fn dev_load_skips_a_port_when_no_window_is_available() {
        let window_available = Cell::new(false);
        let navigations = RefCell::new(Vec::new());

        let loaded = load_dev_candidates(
            &[3000, 3001],
            |port| {
                if port == 3001 {
                    window_available.set(true);
                }
                ready(Ok(()))
            },
            || {
                if window_available.get() {
                    Ok("main")
                } else {
                    Err("Main window is not available.".to_string())
                }
            },
            |label, port| {
                navigations.borrow_mut().push((*label, port));
                Ok(())
            },
            |_| {},
        )
        .await;

        assert_eq!(loaded, Some(3001));
        assert_eq!(*navigations.borrow(), vec![("main", 3001)]);
    }

    #[tokio::test]
    async fn probe_tcp_accepts_a_listening_port() {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let port = listener.local_addr().expect("listener addr").port();

        assert_eq!(
            probe_tcp("127.0.0.1", port, Duration::from_secs(1)).await,
            Ok(())
        );
    }

    #[tokio::test]
    async fn probe_tcp_rejects_a_closed_port() {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let port = listener.local_addr().expect("listener addr").port();
        drop(listener);

        assert!(probe_tcp("127.0.0.1", port, Duration::from_secs(1))
            .await
            .is_err());
    }
}
