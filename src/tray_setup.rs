use tauri::{
    image::Image,
    menu::{Menu, MenuItem, PredefinedMenuItem},
    tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
    AppHandle, Manager,
};

use crate::{
    append_desktop_log, shell_locale, startup_resolver, tray_actions, tray_menu_handler,
    window_actions, ShellState, DEFAULT_SHELL_LOCALE, TRAY_ICON_RESOURCE, TRAY_ID,
};

fn load_tray_icon(app_handle: &AppHandle) -> Result<Image<'static>, String> {
    let icon_path = startup_resolver::resolve_resource_path(app_handle, TRAY_ICON_RESOURCE)?;
    Image::from_path(&icon_path).map_err(|error| {
        format!(
            "Failed to load tray icon {}: {error}",
            icon_path.display()
        )
    })
}

/// Builds the tray icon and records its presence in [`ShellState`]. Any
/// failure leaves the shell without a tray; the caller only logs it.
pub(crate) fn setup_tray(app_handle: &AppHandle) -> Result<(), String> {
    let icon = load_tray_icon(app_handle)?;
    let locale = shell_locale::resolve_shell_locale(DEFAULT_SHELL_LOCALE);
    let shell_texts = shell_locale::shell_texts_for_locale(locale);

    let show_item = MenuItem::with_id(
        app_handle,
        tray_actions::TRAY_MENU_SHOW_WINDOW,
        shell_texts.tray_show,
        true,
        None::<&str>,
    )
    .map_err(|error| format!("Failed to create tray show menu item: {error}"))?;
    let quit_item = MenuItem::with_id(
        app_handle,
        tray_actions::TRAY_MENU_QUIT,
        shell_texts.tray_quit,
        true,
        None::<&str>,
    )
    .map_err(|error| format!("Failed to create tray quit menu item: {error}"))?;
    let separator = PredefinedMenuItem::separator(app_handle)
        .map_err(|error| format!("Failed to create tray separator menu item: {error}"))?;

    let menu = Menu::with_items(app_handle, &[&show_item, &separator, &quit_item])
        .map_err(|error| format!("Failed to build tray menu: {error}"))?;

    let tray_builder = TrayIconBuilder::with_id(TRAY_ID)
        .menu(&menu)
        .tooltip(shell_texts.tray_tooltip)
        .icon(icon)
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| {
            tray_menu_handler::handle_tray_menu_event(app, event.id().as_ref())
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                window_actions::toggle_main_window(tray.app_handle(), append_desktop_log);
            }
        });

    #[cfg(target_os = "macos")]
    let tray_builder = tray_builder.icon_as_template(true);

    tray_builder
        .build(app_handle)
        .map_err(|error| format!("Failed to create tray icon: {error}"))?;

    app_handle.state::<ShellState>().mark_tray_present();
    append_desktop_log(&format!("tray initialized with locale {locale}"));
    Ok(())
}
