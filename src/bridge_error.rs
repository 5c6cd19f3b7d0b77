use std::fmt;

use serde::{ser::SerializeStruct, Serialize, Serializer};

/// Errors returned to the webview. Serialised as `{ code, message }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BridgeError {
    UnknownChannel(String),
    InvalidPathKey(String),
    InvalidOptions { channel: &'static str, reason: String },
    PathUnavailable { key: &'static str, reason: String },
}

impl BridgeError {
    pub(crate) fn code(&self) -> &'static str {
        match self {
            Self::UnknownChannel(_) => "UNKNOWN_CHANNEL",
            Self::InvalidPathKey(_) => "INVALID_PATH_KEY",
            Self::InvalidOptions { .. } => "INVALID_OPTIONS",
            Self::PathUnavailable { .. } => "PATH_UNAVAILABLE",
        }
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownChannel(channel) => write!(f, "Unknown bridge channel '{channel}'."),
            Self::InvalidPathKey(key) => write!(f, "'{key}' is not a recognized path key."),
            Self::InvalidOptions { channel, reason } => {
                write!(f, "Invalid options for '{channel}': {reason}")
            }
            Self::PathUnavailable { key, reason } => {
                write!(f, "Path '{key}' is unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for BridgeError {}

impl Serialize for BridgeError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("BridgeError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}
