#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HostPlatform {
    /// Dock/menu-bar convention: apps outlive their windows.
    MacOs,
    Other,
}

impl HostPlatform {
    pub(crate) fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MainWindowCloseDecision {
    HideToTray,
    Close,
}

pub(crate) fn decide_main_window_close(
    tray_present: bool,
    is_quitting: bool,
) -> MainWindowCloseDecision {
    if tray_present && !is_quitting {
        MainWindowCloseDecision::HideToTray
    } else {
        MainWindowCloseDecision::Close
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AllWindowsClosedDecision {
    KeepRunning,
    Exit,
}

pub(crate) fn decide_all_windows_closed(
    platform: HostPlatform,
    tray_present: bool,
) -> AllWindowsClosedDecision {
    match platform {
        HostPlatform::MacOs => AllWindowsClosedDecision::KeepRunning,
        HostPlatform::Other if tray_present => AllWindowsClosedDecision::KeepRunning,
        HostPlatform::Other => AllWindowsClosedDecision::Exit,
    }
}
