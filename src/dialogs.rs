use std::path::Path;

use tauri::{AppHandle, WebviewWindow};
use tauri_plugin_dialog::{
    DialogExt, FileDialogBuilder, FilePath, MessageDialogButtons, MessageDialogKind,
};
use tokio::sync::oneshot;

use crate::dialog_options::{
    split_default_path, FileFilter, MessageBoxOptions, MessageBoxResult, MessageBoxType,
    MessageButtons, OpenDialogOptions, OpenDialogProperty, OpenDialogResult, PickMode,
    SaveDialogOptions, SaveDialogResult,
};

fn apply_common_file_options(
    mut builder: FileDialogBuilder<tauri::Wry>,
    title: Option<String>,
    default_path: Option<String>,
    filters: &[FileFilter],
) -> FileDialogBuilder<tauri::Wry> {
    if let Some(title) = title {
        builder = builder.set_title(title);
    }
    for filter in filters {
        let extensions: Vec<&str> = filter.extensions.iter().map(String::as_str).collect();
        builder = builder.add_filter(filter.name.clone(), &extensions);
    }
    if let Some(raw_path) = default_path.filter(|raw| !raw.trim().is_empty()) {
        let path = Path::new(&raw_path);
        let (directory, file_name) = split_default_path(path, path.is_dir());
        if let Some(directory) = directory {
            builder = builder.set_directory(directory);
        }
        if let Some(file_name) = file_name {
            builder = builder.set_file_name(file_name);
        }
    }
    builder
}

fn file_path_strings(paths: Vec<FilePath>) -> Vec<String> {
    paths.into_iter().map(|path| path.to_string()).collect()
}

/// Shows a native open dialog parented to `owner`. `None` when dismissed.
pub(crate) async fn show_open_dialog(
    app_handle: &AppHandle,
    owner: &WebviewWindow,
    options: OpenDialogOptions,
) -> Option<OpenDialogResult> {
    let pick_mode = options.pick_mode();
    let can_create_directories = options.has_property(OpenDialogProperty::CreateDirectory)
        || options.has_property(OpenDialogProperty::PromptToCreate);
    let builder = apply_common_file_options(
        app_handle.dialog().file().set_parent(owner),
        options.title,
        options.default_path,
        &options.filters,
    )
    .set_can_create_directories(can_create_directories);

    let (sender, receiver) = oneshot::channel::<Option<Vec<FilePath>>>();
    match pick_mode {
        PickMode::File => builder.pick_file(move |picked| {
            let _ = sender.send(picked.map(|path| vec![path]));
        }),
        PickMode::Files => builder.pick_files(move |picked| {
            let _ = sender.send(picked);
        }),
        PickMode::Folder => builder.pick_folder(move |picked| {
            let _ = sender.send(picked.map(|path| vec![path]));
        }),
        PickMode::Folders => builder.pick_folders(move |picked| {
            let _ = sender.send(picked);
        }),
    }

    let picked = receiver.await.ok().flatten()?;
    if picked.is_empty() {
        return None;
    }
    Some(OpenDialogResult {
        file_paths: file_path_strings(picked),
    })
}

pub(crate) async fn show_save_dialog(
    app_handle: &AppHandle,
    owner: &WebviewWindow,
    options: SaveDialogOptions,
) -> Option<SaveDialogResult> {
    let builder = apply_common_file_options(
        app_handle.dialog().file().set_parent(owner),
        options.title,
        options.default_path,
        &options.filters,
    )
    .set_can_create_directories(true);

    let (sender, receiver) = oneshot::channel::<Option<FilePath>>();
    builder.save_file(move |picked| {
        let _ = sender.send(picked);
    });

    let picked = receiver.await.ok().flatten()?;
    Some(SaveDialogResult {
        file_path: picked.to_string(),
    })
}

fn message_kind(kind: MessageBoxType) -> MessageDialogKind {
    match kind {
        MessageBoxType::Warning => MessageDialogKind::Warning,
        MessageBoxType::Error => MessageDialogKind::Error,
        MessageBoxType::None | MessageBoxType::Info | MessageBoxType::Question => {
            MessageDialogKind::Info
        }
    }
}

fn message_dialog_buttons(buttons: &MessageButtons) -> MessageDialogButtons {
    match buttons {
        MessageButtons::Ok => MessageDialogButtons::Ok,
        MessageButtons::OkCustom(label) => MessageDialogButtons::OkCustom(label.clone()),
        MessageButtons::OkCancelCustom(ok, cancel) => {
            MessageDialogButtons::OkCancelCustom(ok.clone(), cancel.clone())
        }
    }
}

/// Shows a message box and reports which button was pressed. `None` only
/// when the dialog callback never fires.
pub(crate) async fn show_message_box(
    app_handle: &AppHandle,
    owner: &WebviewWindow,
    options: MessageBoxOptions,
) -> Option<MessageBoxResult> {
    let buttons = MessageButtons::from_labels(&options.buttons);
    let mut builder = app_handle
        .dialog()
        .message(options.full_text())
        .parent(owner)
        .kind(message_kind(options.kind))
        .buttons(message_dialog_buttons(&buttons));
    if let Some(title) = options.title {
        builder = builder.title(title);
    }

    let (sender, receiver) = oneshot::channel::<bool>();
    builder.show(move |confirmed| {
        let _ = sender.send(confirmed);
    });

    let confirmed = receiver.await.ok()?;
    Some(MessageBoxResult {
        response: buttons.response_index(confirmed),
    })
}
