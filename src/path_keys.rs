use std::{env, path::PathBuf};

use serde_json::Value;
use tauri::{AppHandle, Manager, Runtime};

use crate::bridge_error::BridgeError;

/// The host directory a [`PathKey`] is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathBase {
    Home,
    /// Per-user configuration root (`%APPDATA%`, `~/Library/Application Support`, `~/.config`).
    Config,
    /// The application's own directory under [`PathBase::Config`].
    AppConfig,
    Temp,
    Exe,
    Desktop,
    Documents,
    Downloads,
    Audio,
    Pictures,
    Videos,
    AppLog,
    AppCache,
}

/// Well-known directories the webview may ask for by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathKey {
    Home,
    AppData,
    UserData,
    Temp,
    Exe,
    Desktop,
    Documents,
    Downloads,
    Music,
    Pictures,
    Videos,
    Logs,
    Cache,
}

impl PathKey {
    pub(crate) const ALL: [Self; 13] = [
        Self::Home,
        Self::AppData,
        Self::UserData,
        Self::Temp,
        Self::Exe,
        Self::Desktop,
        Self::Documents,
        Self::Downloads,
        Self::Music,
        Self::Pictures,
        Self::Videos,
        Self::Logs,
        Self::Cache,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::AppData => "appData",
            Self::UserData => "userData",
            Self::Temp => "temp",
            Self::Exe => "exe",
            Self::Desktop => "desktop",
            Self::Documents => "documents",
            Self::Downloads => "downloads",
            Self::Music => "music",
            Self::Pictures => "pictures",
            Self::Videos => "videos",
            Self::Logs => "logs",
            Self::Cache => "cache",
        }
    }

    pub(crate) fn from_name(name: &str) -> Result<Self, BridgeError> {
        Self::ALL
            .into_iter()
            .find(|key| key.name() == name)
            .ok_or_else(|| BridgeError::InvalidPathKey(name.to_string()))
    }

    pub(crate) fn base(self) -> PathBase {
        match self {
            Self::Home => PathBase::Home,
            Self::AppData => PathBase::Config,
            Self::UserData => PathBase::AppConfig,
            Self::Temp => PathBase::Temp,
            Self::Exe => PathBase::Exe,
            Self::Desktop => PathBase::Desktop,
            Self::Documents => PathBase::Documents,
            Self::Downloads => PathBase::Downloads,
            Self::Music => PathBase::Audio,
            Self::Pictures => PathBase::Pictures,
            Self::Videos => PathBase::Videos,
            Self::Logs => PathBase::AppLog,
            Self::Cache => PathBase::AppCache,
        }
    }

    /// Accepts the key as a bare string payload. Anything else is rejected
    /// rather than coerced.
    pub(crate) fn from_payload(payload: Option<&Value>) -> Result<Self, BridgeError> {
        match payload {
            Some(Value::String(name)) => Self::from_name(name),
            Some(other) => Err(BridgeError::InvalidPathKey(other.to_string())),
            None => Err(BridgeError::InvalidPathKey(String::new())),
        }
    }
}

pub(crate) fn resolve_path_key<R: Runtime>(
    app_handle: &AppHandle<R>,
    key: PathKey,
) -> Result<PathBuf, BridgeError> {
    let resolver = app_handle.path();
    let resolved = match key.base() {
        PathBase::Home => resolver.home_dir(),
        PathBase::Config => resolver.config_dir(),
        PathBase::AppConfig => resolver.app_config_dir(),
        PathBase::Temp => resolver.temp_dir(),
        PathBase::Exe => {
            return env::current_exe().map_err(|error| BridgeError::PathUnavailable {
                key: key.name(),
                reason: error.to_string(),
            })
        }
        PathBase::Desktop => resolver.desktop_dir(),
        PathBase::Documents => resolver.document_dir(),
        PathBase::Downloads => resolver.download_dir(),
        PathBase::Audio => resolver.audio_dir(),
        PathBase::Pictures => resolver.picture_dir(),
        PathBase::Videos => resolver.video_dir(),
        PathBase::AppLog => resolver.app_log_dir(),
        PathBase::AppCache => resolver.app_cache_dir(),
    };
    resolved.map_err(|error| BridgeError::PathUnavailable {
        key: key.name(),
        reason: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn from_name_accepts_every_known_key() {
        for key in PathKey::ALL {
            assert_eq!(PathKey::from_name(key.name()), Ok(key));
        }
    }

    #[test]
    fn app_data_and_user_data_read_the_config_directories() {
        assert_eq!(PathKey::AppData.base(), PathBase::Config);
        assert_eq!(PathKey::UserData.base(), PathBase::AppConfig);
        assert_eq!(PathKey::Logs.base(), PathBase::AppLog);
        assert_eq!(PathKey::Cache.base(), PathBase::AppCache);
    }

    #[test]
    fn from_name_rejects_unknown_keys() {
        assert_eq!(
            PathKey::from_name("sessionSecrets"),
            Err(BridgeError::InvalidPathKey("sessionSecrets".to_string()))
        );
        assert_eq!(
            PathKey::from_name("Home"),
            Err(BridgeError::InvalidPathKey("Home".to_string()))
        );
        assert_eq!(
            PathKey::from_name(""),
            Err(BridgeError::InvalidPathKey(String::new()))
        );
    }

    #[test]
    fn from_payload_requires_a_string() {
        assert_eq!(
            PathKey::from_payload(Some(&json!("downloads"))),
            Ok(PathKey::Downloads)
        );
        assert_eq!(
            PathKey::from_payload(Some(&json!({ "name": "home" }))),
            Err(BridgeError::InvalidPathKey("{\"name\":\"home\"}".to_string()))
        );
        assert_eq!(
            PathKey::from_payload(None),
            Err(BridgeError::InvalidPathKey(String::new()))
        );
    }
}
