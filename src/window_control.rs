use tauri::{Runtime, WebviewWindow};

/// The window operations the shell relies on, kept narrow so window
/// behaviour can be exercised without a running webview.
pub(crate) trait WindowControl {
    fn window_label(&self) -> String;
    fn is_window_visible(&self) -> Result<bool, String>;
    fn is_window_focused(&self) -> Result<bool, String>;
    fn is_window_maximized(&self) -> Result<bool, String>;
    fn is_window_minimized(&self) -> Result<bool, String>;
    fn show_window(&self) -> Result<(), String>;
    fn hide_window(&self) -> Result<(), String>;
    fn focus_window(&self) -> Result<(), String>;
    fn minimize_window(&self) -> Result<(), String>;
    fn unminimize_window(&self) -> Result<(), String>;
    fn maximize_window(&self) -> Result<(), String>;
    fn unmaximize_window(&self) -> Result<(), String>;
    fn close_window(&self) -> Result<(), String>;
}

impl<R: Runtime> WindowControl for WebviewWindow<R> {
    fn window_label(&self) -> String {
        self.label().to_string()
    }

    fn is_window_visible(&self) -> Result<bool, String> {
        self.is_visible()
            .map_err(|error| format!("Failed to read visibility of '{}': {error}", self.label()))
    }

    fn is_window_focused(&self) -> Result<bool, String> {
        self.is_focused()
            .map_err(|error| format!("Failed to read focus of '{}': {error}", self.label()))
    }

    fn is_window_maximized(&self) -> Result<bool, String> {
        self.is_maximized().map_err(|error| {
            format!(
                "Failed to read maximized state of '{}': {error}",
                self.label()
            )
        })
    }

    fn is_window_minimized(&self) -> Result<bool, String> {
        self.is_minimized().map_err(|error| {
            format!(
                "Failed to read minimized state of '{}': {error}",
                self.label()
            )
        })
    }

    fn show_window(&self) -> Result<(), String> {
        self.show()
            .map_err(|error| format!("Failed to show '{}': {error}", self.label()))
    }

    fn hide_window(&self) -> Result<(), String> {
        self.hide()
            .map_err(|error| format!("Failed to hide '{}': {error}", self.label()))
    }

    fn focus_window(&self) -> Result<(), String> {
        self.set_focus()
            .map_err(|error| format!("Failed to focus '{}': {error}", self.label()))
    }

    fn minimize_window(&self) -> Result<(), String> {
        self.minimize()
            .map_err(|error| format!("Failed to minimize '{}': {error}", self.label()))
    }

    fn unminimize_window(&self) -> Result<(), String> {
        self.unminimize()
            .map_err(|error| format!("Failed to unminimize '{}': {error}", self.label()))
    }

    fn maximize_window(&self) -> Result<(), String> {
        self.maximize()
            .map_err(|error| format!("Failed to maximize '{}': {error}", self.label()))
    }

    fn unmaximize_window(&self) -> Result<(), String> {
        self.unmaximize()
            .map_err(|error| format!("Failed to unmaximize '{}': {error}", self.label()))
    }

    fn close_window(&self) -> Result<(), String> {
        self.close()
            .map_err(|error| format!("Failed to close '{}': {error}", self.label()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MaximizeChange {
    Maximized,
    Restored,
}

pub(crate) fn toggle_maximize<W: WindowControl + ?Sized>(
    window: &W,
) -> Result<MaximizeChange, String> {
    if window.is_window_maximized()? {
        window.unmaximize_window()?;
        Ok(MaximizeChange::Restored)
    } else {
        window.maximize_window()?;
        Ok(MaximizeChange::Maximized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VisibilityChange {
    Shown,
    Hidden,
}

pub(crate) fn reveal_and_focus<W: WindowControl + ?Sized>(window: &W) -> Result<(), String> {
    if window.is_window_minimized().unwrap_or(false) {
        window.unminimize_window()?;
    }
    window.show_window()?;
    window.focus_window()
}

/// Hides a window that is visible and focused; anything else is brought to
/// the front.
pub(crate) fn toggle_visibility<W: WindowControl + ?Sized>(
    window: &W,
) -> Result<VisibilityChange, String> {
    let visible = window.is_window_visible()?;
    let focused = window.is_window_focused().unwrap_or(false);
    let minimized = window.is_window_minimized().unwrap_or(false);

    if visible && focused && !minimized {
        window.hide_window()?;
        Ok(VisibilityChange::Hidden)
    } else {
        reveal_and_focus(window)?;
        Ok(VisibilityChange::Shown)
    }
}
