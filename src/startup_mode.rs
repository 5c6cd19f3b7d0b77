use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StartupMode {
    Development,
    Packaged,
}

impl StartupMode {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Packaged => "packaged",
        }
    }

    fn build_default() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Packaged
        }
    }
}

pub(crate) fn parse_startup_mode(raw: &str) -> Option<StartupMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "dev" | "development" => Some(StartupMode::Development),
        "packaged" | "production" | "prod" => Some(StartupMode::Packaged),
        _ => None,
    }
}

pub(crate) fn resolve_startup_mode<F>(env_name: &str, log: F) -> StartupMode
where
    F: Fn(&str),
{
    let Ok(raw) = env::var(env_name) else {
        return StartupMode::build_default();
    };
    if raw.trim().is_empty() {
        return StartupMode::build_default();
    }

    match parse_startup_mode(&raw) {
        Some(mode) => mode,
        None => {
            let fallback = StartupMode::build_default();
            log(&format!(
                "invalid {env_name}='{raw}', falling back to {}",
                fallback.as_str()
            ));
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startup_mode_accepts_aliases() {
        assert_eq!(parse_startup_mode("dev"), Some(StartupMode::Development));
        assert_eq!(
            parse_startup_mode(" Development "),
            Some(StartupMode::Development)
        );
        assert_eq!(parse_startup_mode("PRODUCTION"), Some(StartupMode::Packaged));
        assert_eq!(parse_startup_mode("packaged"), Some(StartupMode::Packaged));
    }

    #[test]
    fn parse_startup_mode_rejects_unknown_values() {
        assert_eq!(parse_startup_mode("staging"), None);
        assert_eq!(parse_startup_mode(""), None);
    }
}
