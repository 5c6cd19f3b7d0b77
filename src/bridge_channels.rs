/// The closed set of channels the webview may invoke through the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BridgeChannel {
    WindowMinimize,
    WindowMaximize,
    WindowClose,
    WindowOpenSettings,
    AppGetVersion,
    AppGetPath,
    AppQuit,
    DialogShowOpen,
    DialogShowSave,
    DialogShowMessage,
}

impl BridgeChannel {
    pub(crate) const ALL: [Self; 10] = [
        Self::WindowMinimize,
        Self::WindowMaximize,
        Self::WindowClose,
        Self::WindowOpenSettings,
        Self::AppGetVersion,
        Self::AppGetPath,
        Self::AppQuit,
        Self::DialogShowOpen,
        Self::DialogShowSave,
        Self::DialogShowMessage,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::WindowMinimize => "window:minimize",
            Self::WindowMaximize => "window:maximize",
            Self::WindowClose => "window:close",
            Self::WindowOpenSettings => "window:open-settings",
            Self::AppGetVersion => "app:get-version",
            Self::AppGetPath => "app:get-path",
            Self::AppQuit => "app:quit",
            Self::DialogShowOpen => "dialog:show-open",
            Self::DialogShowSave => "dialog:show-save",
            Self::DialogShowMessage => "dialog:show-message",
        }
    }

    /// Method name on the object installed into the webview.
    pub(crate) fn js_method(self) -> &'static str {
        match self {
            Self::WindowMinimize => "minimizeWindow",
            Self::WindowMaximize => "maximizeWindow",
            Self::WindowClose => "closeWindow",
            Self::WindowOpenSettings => "openSettings",
            Self::AppGetVersion => "getVersion",
            Self::AppGetPath => "getPath",
            Self::AppQuit => "quit",
            Self::DialogShowOpen => "showOpenDialog",
            Self::DialogShowSave => "showSaveDialog",
            Self::DialogShowMessage => "showMessageBox",
        }
    }

    pub(crate) fn takes_payload(self) -> bool {
        matches!(
            self,
            Self::AppGetPath | Self::DialogShowOpen | Self::DialogShowSave | Self::DialogShowMessage
        )
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|channel| channel.name() == name)
    }
}
