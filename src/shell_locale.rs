use std::env;

use crate::LOCALE_ENV;

pub(crate) const SUPPORTED_SHELL_LOCALES: [&str; 3] = ["zh-CN", "en-US", "ja-JP"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ShellTexts {
    pub(crate) tray_show: &'static str,
    pub(crate) tray_quit: &'static str,
    pub(crate) tray_tooltip: &'static str,
}

pub(crate) fn shell_texts_for_locale(locale: &str) -> ShellTexts {
    match locale {
        "en-US" => ShellTexts {
            tray_show: "Show Window",
            tray_quit: "Quit",
            tray_tooltip: "Desktop Shell",
        },
        "ja-JP" => ShellTexts {
            tray_show: "ウィンドウを表示",
            tray_quit: "終了",
            tray_tooltip: "Desktop Shell",
        },
        _ => ShellTexts {
            tray_show: "显示窗口",
            tray_quit: "退出",
            tray_tooltip: "Desktop Shell",
        },
    }
}

/// Maps values such as `en_GB.UTF-8` or `ja` onto a supported locale.
pub(crate) fn normalize_shell_locale(raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(exact) = SUPPORTED_SHELL_LOCALES
        .into_iter()
        .find(|locale| *locale == raw)
    {
        return Some(exact);
    }

    let lowered = raw.to_ascii_lowercase();
    if lowered.starts_with("zh") {
        return Some("zh-CN");
    }
    if lowered.starts_with("en") {
        return Some("en-US");
    }
    if lowered.starts_with("ja") {
        return Some("ja-JP");
    }
    None
}

fn first_supported_locale<I, S>(candidates: I) -> Option<&'static str>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .find_map(|candidate| normalize_shell_locale(candidate.as_ref()))
}

pub(crate) fn resolve_shell_locale(default_shell_locale: &'static str) -> &'static str {
    let candidates = [LOCALE_ENV, "LC_ALL", "LANG"]
        .into_iter()
        .filter_map(|env_key| env::var(env_key).ok());
    first_supported_locale(candidates).unwrap_or(default_shell_locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_texts_for_locale_returns_english_copy() {
        let texts = shell_texts_for_locale("en-US");
        assert_eq!(texts.tray_show, "Show Window");
        assert_eq!(texts.tray_quit, "Quit");
    }

    #[test]
    fn shell_texts_for_locale_returns_japanese_copy() {
        assert_eq!(shell_texts_for_locale("ja-JP").tray_quit, "終了");
    }

    #[test]
    fn shell_texts_for_locale_falls_back_to_zh_cn_copy() {
        let texts = shell_texts_for_locale("fr-FR");
        assert_eq!(texts.tray_show, "显示窗口");
        assert_eq!(texts.tray_quit, "退出");
    }

    #[test]
    fn normalize_shell_locale_accepts_language_prefixes() {
        assert_eq!(normalize_shell_locale("EN_us"), Some("en-US"));
        assert_eq!(normalize_shell_locale("zh_TW"), Some("zh-CN"));
        assert_eq!(normalize_shell_locale("ja_JP.UTF-8"), Some("ja-JP"));
        assert_eq!(normalize_shell_locale("fr-FR"), None);
        assert_eq!(normalize_shell_locale("  "), None);
    }

    #[test]
    fn first_supported_locale_skips_unsupported_values() {
        assert_eq!(first_supported_locale(["C", "fr_FR.UTF-8", "ja_JP"]), Some("ja-JP"));
        assert_eq!(first_supported_locale(["C.UTF-8"]), None);
    }
}
