use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{bridge_channels::BridgeChannel, bridge_error::BridgeError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct FileFilter {
    pub(crate) name: String,
    pub(crate) extensions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum OpenDialogProperty {
    OpenFile,
    OpenDirectory,
    MultiSelections,
    ShowHiddenFiles,
    CreateDirectory,
    PromptToCreate,
    NoResolveAliases,
    TreatPackageAsDirectory,
    DontAddToRecent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct OpenDialogOptions {
    pub(crate) title: Option<String>,
    pub(crate) default_path: Option<String>,
    pub(crate) filters: Vec<FileFilter>,
    pub(crate) properties: Vec<OpenDialogProperty>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PickMode {
    File,
    Files,
    Folder,
    Folders,
}

impl OpenDialogOptions {
    pub(crate) fn has_property(&self, property: OpenDialogProperty) -> bool {
        self.properties.contains(&property)
    }

    pub(crate) fn pick_mode(&self) -> PickMode {
        let directories = self.has_property(OpenDialogProperty::OpenDirectory);
        let multiple = self.has_property(OpenDialogProperty::MultiSelections);
        match (directories, multiple) {
            (false, false) => PickMode::File,
            (false, true) => PickMode::Files,
            (true, false) => PickMode::Folder,
            (true, true) => PickMode::Folders,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct SaveDialogOptions {
    pub(crate) title: Option<String>,
    pub(crate) default_path: Option<String>,
    pub(crate) filters: Vec<FileFilter>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum MessageBoxType {
    #[default]
    None,
    Info,
    Warning,
    Error,
    Question,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MessageBoxOptions {
    pub(crate) message: String,
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) detail: Option<String>,
    #[serde(default, rename = "type")]
    pub(crate) kind: MessageBoxType,
    #[serde(default)]
    pub(crate) buttons: Vec<String>,
}

impl MessageBoxOptions {
    pub(crate) fn full_text(&self) -> String {
        match self.detail.as_deref().map(str::trim) {
            Some(detail) if !detail.is_empty() => format!("{}\n\n{}", self.message, detail),
            _ => self.message.clone(),
        }
    }
}

/// Native message boxes offer at most two buttons; extra labels are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MessageButtons {
    Ok,
    OkCustom(String),
    OkCancelCustom(String, String),
}

impl MessageButtons {
    pub(crate) fn from_labels(labels: &[String]) -> Self {
        match labels {
            [] => Self::Ok,
            [only] => Self::OkCustom(only.clone()),
            [first, second, ..] => Self::OkCancelCustom(first.clone(), second.clone()),
        }
    }

    /// Index of the pressed button, counted the way `buttons` was given.
    pub(crate) fn response_index(&self, confirmed: bool) -> usize {
        match self {
            Self::Ok | Self::OkCustom(_) => 0,
            Self::OkCancelCustom(..) if confirmed => 0,
            Self::OkCancelCustom(..) => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OpenDialogResult {
    pub(crate) file_paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SaveDialogResult {
    pub(crate) file_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MessageBoxResult {
    pub(crate) response: usize,
}

/// Splits a default path into the directory to open and a preselected file
/// name. Existing directories are opened as-is.
pub(crate) fn split_default_path(path: &Path, is_dir: bool) -> (Option<PathBuf>, Option<String>) {
    if is_dir {
        return (Some(path.to_path_buf()), None);
    }

    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf);
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    (directory, file_name)
}

pub(crate) fn parse_options<T>(
    channel: BridgeChannel,
    payload: Option<Value>,
) -> Result<T, BridgeError>
where
    T: DeserializeOwned,
{
    let payload = match payload {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(value) => value,
    };
    serde_json::from_value(payload).map_err(|error| BridgeError::InvalidOptions {
        channel: channel.name(),
        reason: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn open_options_parse_filters_and_properties() {
        let options: OpenDialogOptions = parse_options(
            BridgeChannel::DialogShowOpen,
            Some(json!({
                "title": "Pick images",
                "defaultPath": "/tmp",
                "filters": [{ "name": "Images", "extensions": ["png", "jpg"] }],
                "properties": ["openFile", "multiSelections"],
                "securityScopedBookmarks": true
            })),
        )
        .expect("valid options");

        assert_eq!(options.title.as_deref(), Some("Pick images"));
        assert_eq!(options.filters[0].extensions, vec!["png", "jpg"]);
        assert_eq!(options.pick_mode(), PickMode::Files);
    }

    #[test]
    fn open_options_default_to_single_file() {
        let options: OpenDialogOptions =
            parse_options(BridgeChannel::DialogShowOpen, None).expect("empty options");
        assert_eq!(options.pick_mode(), PickMode::File);

        let folders: OpenDialogOptions = parse_options(
            BridgeChannel::DialogShowOpen,
            Some(json!({ "properties": ["openDirectory", "multiSelections"] })),
        )
        .expect("folder options");
        assert_eq!(folders.pick_mode(), PickMode::Folders);
    }

    #[test]
    fn open_options_reject_unknown_property() {
        let error = parse_options::<OpenDialogOptions>(
            BridgeChannel::DialogShowOpen,
            Some(json!({ "properties": ["runScript"] })),
        )
        .expect_err("unknown property");
        assert_eq!(error.code(), "INVALID_OPTIONS");
    }

    #[test]
    fn message_options_require_a_message_and_known_type() {
        let missing = parse_options::<MessageBoxOptions>(BridgeChannel::DialogShowMessage, None);
        assert!(missing.is_err());

        let unknown_type = parse_options::<MessageBoxOptions>(
            BridgeChannel::DialogShowMessage,
            Some(json!({ "message": "hi", "type": "fatal" })),
        );
        assert!(unknown_type.is_err());

        let options: MessageBoxOptions = parse_options(
            BridgeChannel::DialogShowMessage,
            Some(json!({
                "message": "Delete chat?",
                "detail": "This cannot be undone.",
                "type": "warning",
                "buttons": ["Delete", "Cancel"]
            })),
        )
        .expect("valid message options");
        assert_eq!(options.kind, MessageBoxType::Warning);
        assert_eq!(options.full_text(), "Delete chat?\n\nThis cannot be undone.");
    }

    #[test]
    fn message_buttons_follow_label_count() {
        assert_eq!(MessageButtons::from_labels(&[]), MessageButtons::Ok);
        assert_eq!(
            MessageButtons::from_labels(&["Got it".to_string()]),
            MessageButtons::OkCustom("Got it".to_string())
        );

        let labels = ["Yes".to_string(), "No".to_string(), "Later".to_string()];
        let buttons = MessageButtons::from_labels(&labels);
        assert_eq!(
            buttons,
            MessageButtons::OkCancelCustom("Yes".to_string(), "No".to_string())
        );
        assert_eq!(buttons.response_index(true), 0);
        assert_eq!(buttons.response_index(false), 1);
        assert_eq!(MessageButtons::Ok.response_index(false), 0);
    }

    #[test]
    fn split_default_path_separates_directory_and_file() {
        let dir = std::env::temp_dir();
        assert_eq!(split_default_path(&dir, true), (Some(dir.clone()), None));

        let file = dir.join("notes.txt");
        assert_eq!(
            split_default_path(&file, false),
            (Some(dir), Some("notes.txt".to_string()))
        );
        assert_eq!(
            split_default_path(Path::new("notes.txt"), false),
            (None, Some("notes.txt".to_string()))
        );
    }
}
