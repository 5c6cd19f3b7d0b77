use std::time::Duration;

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const SETTINGS_WINDOW_LABEL: &str = "settings";
pub(crate) const MAIN_WINDOW_TITLE: &str = "Desktop Shell";
pub(crate) const SETTINGS_WINDOW_TITLE: &str = "Settings";
pub(crate) const MAIN_WINDOW_DEFAULT_SIZE: (f64, f64) = (1200.0, 800.0);
pub(crate) const MAIN_WINDOW_MIN_SIZE: (f64, f64) = (800.0, 600.0);
pub(crate) const SETTINGS_WINDOW_DEFAULT_SIZE: (f64, f64) = (720.0, 560.0);
pub(crate) const SETTINGS_WINDOW_MIN_SIZE: (f64, f64) = (560.0, 420.0);

pub(crate) const WINDOW_REVEAL_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) const DEV_PORT_ENV: &str = "RENDERER_PORT";
pub(crate) const DEFAULT_DEV_PORT: u16 = 3000;
pub(crate) const FALLBACK_DEV_PORTS: [u16; 7] = [3000, 3001, 3002, 3003, 3004, 3005, 3006];
pub(crate) const DEV_SERVER_HOST: &str = "localhost";
pub(crate) const DEV_PORT_PROBE_TIMEOUT: Duration = Duration::from_millis(1_500);
pub(crate) const DEV_SERVER_CAPABILITY: &str = "dev-server";
pub(crate) const DEV_SERVER_REMOTE_PATTERN: &str = "http://localhost:*";

pub(crate) const STARTUP_MODE_ENV: &str = "DESKTOP_SHELL_STARTUP_MODE";
pub(crate) const PACKAGED_ENTRY_DOCUMENT: &str = "index.html";
#[cfg(any(windows, target_os = "android"))]
pub(crate) const PACKAGED_APP_ORIGIN: &str = "http://tauri.localhost/";
#[cfg(not(any(windows, target_os = "android")))]
pub(crate) const PACKAGED_APP_ORIGIN: &str = "tauri://localhost/";
pub(crate) const SETTINGS_PAGE: &str = "settings";

pub(crate) const TRAY_ID: &str = "desktop-shell-tray";
pub(crate) const TRAY_ICON_RESOURCE: &str = "icons/tray.png";
pub(crate) const DEFAULT_SHELL_LOCALE: &str = "zh-CN";
pub(crate) const LOCALE_ENV: &str = "DESKTOP_SHELL_LOCALE";

pub(crate) const LOG_DIR_ENV: &str = "DESKTOP_SHELL_LOG_DIR";
pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";
pub(crate) const DESKTOP_LOG_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub(crate) const LOG_BACKUP_COUNT: usize = 5;
