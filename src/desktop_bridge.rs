use crate::bridge_channels::BridgeChannel;

pub(crate) const BRIDGE_GLOBAL_NAME: &str = "desktopShell";
pub(crate) const BRIDGE_INVOKE_COMMAND: &str = "shell_bridge_invoke";
pub(crate) const DESKTOP_RUNTIME_COMMAND: &str = "shell_bridge_is_desktop_runtime";

fn js_string(raw: &str) -> String {
    serde_json::to_string(raw).unwrap_or_else(|_| "\"\"".to_string())
}

fn bridge_method_entry(channel: BridgeChannel) -> String {
    let channel_name = js_string(channel.name());
    if channel.takes_payload() {
        format!(
            "    {}: (payload) => invoke({channel_name}, payload),\n",
            channel.js_method()
        )
    } else {
        format!(
            "    {}: () => invoke({channel_name}),\n",
            channel.js_method()
        )
    }
}

/// Script installed before any page script runs. It exposes a frozen
/// `window.desktopShell` object whose methods can only reach the channels
/// listed in [`BridgeChannel::ALL`].
pub(crate) fn bridge_init_script(os: &str) -> String {
    let methods: String = BridgeChannel::ALL
        .into_iter()
        .map(bridge_method_entry)
        .collect();
    let global_name = js_string(BRIDGE_GLOBAL_NAME);
    let command = js_string(BRIDGE_INVOKE_COMMAND);
    let runtime_command = js_string(DESKTOP_RUNTIME_COMMAND);

    format!(
        r#"(() => {{
  if (Object.prototype.hasOwnProperty.call(window, {global_name})) {{
    return;
  }}
  const internals = window.__TAURI_INTERNALS__;
  const invoke = (channel, payload) =>
    internals.invoke({command}, {{ channel, payload: payload === undefined ? null : payload }});
  const api = {{
    platform: {platform},
    isMac: {is_mac},
    isWindows: {is_windows},
    isLinux: {is_linux},
    isDesktopRuntime: () => internals.invoke({runtime_command}),
{methods}  }};
  Object.defineProperty(window, {global_name}, {{
    value: Object.freeze(api),
    enumerable: true,
    configurable: false,
    writable: false,
  }});
}})();
"#,
        platform = js_string(os),
        is_mac = os == "macos",
        is_windows = os == "windows",
        is_linux = os == "linux",
    )
}
