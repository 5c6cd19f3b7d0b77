use std::{env, path::PathBuf};

use crate::LOG_DIR_ENV;

const DEFAULT_STATE_DIR_NAME: &str = ".desktop-shell";

pub(crate) fn default_log_dir() -> Option<PathBuf> {
    if let Ok(raw) = env::var(LOG_DIR_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    home::home_dir().map(|home| home.join(DEFAULT_STATE_DIR_NAME).join("logs"))
}
