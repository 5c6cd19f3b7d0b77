use url::Url;

use crate::{
    DEFAULT_DEV_PORT, DEV_SERVER_HOST, FALLBACK_DEV_PORTS, PACKAGED_APP_ORIGIN,
    PACKAGED_ENTRY_DOCUMENT,
};

/// Where a shell window takes its document from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContentSource {
    DevServer { port: u16 },
    /// Documents embedded in the binary, served from the app origin.
    PackagedApp,
}

impl ContentSource {
    pub(crate) fn entry_url(&self) -> Result<Url, String> {
        match self {
            Self::DevServer { port } => dev_server_url(*port),
            Self::PackagedApp => app_asset_url(PACKAGED_ENTRY_DOCUMENT),
        }
    }

    /// Resolves a secondary page such as `settings` against this source:
    /// `/settings` on the dev server, `settings.html` on the app origin.
    pub(crate) fn page_url(&self, page: &str) -> Result<Url, String> {
        match self {
            Self::DevServer { port } => dev_server_url(*port)?
                .join(page)
                .map_err(|error| format!("Invalid dev server page '{page}': {error}")),
            Self::PackagedApp => app_asset_url(&format!("{page}.html")),
        }
    }
}

pub(crate) fn dev_server_url(port: u16) -> Result<Url, String> {
    Url::parse(&format!("http://{DEV_SERVER_HOST}:{port}/"))
        .map_err(|error| format!("Invalid dev server url for port {port}: {error}"))
}

fn app_asset_url(asset: &str) -> Result<Url, String> {
    Url::parse(PACKAGED_APP_ORIGIN)
        .and_then(|origin| origin.join(asset))
        .map_err(|error| format!("Invalid packaged asset url for '{asset}': {error}"))
}

pub(crate) fn parse_dev_port(raw: &str) -> Option<u16> {
    raw.trim().parse::<u16>().ok().filter(|port| *port != 0)
}

/// Configured port first, then the fixed fallback list, without duplicates.
pub(crate) fn dev_port_candidates<F>(configured: Option<&str>, log: F) -> Vec<u16>
where
    F: Fn(&str),
{
    let preferred = match configured.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => parse_dev_port(raw).unwrap_or_else(|| {
            log(&format!(
                "ignoring invalid dev port '{raw}', using {DEFAULT_DEV_PORT}"
            ));
            DEFAULT_DEV_PORT
        }),
        None => DEFAULT_DEV_PORT,
    };

    let mut candidates = Vec::with_capacity(FALLBACK_DEV_PORTS.len() + 1);
    for port in std::iter::once(preferred).chain(FALLBACK_DEV_PORTS) {
        if !candidates.contains(&port) {
            candidates.push(port);
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn dev_port_candidates_puts_configured_port_first() {
        assert_eq!(
            dev_port_candidates(Some("3100"), |_| {}),
            vec![3100, 3000, 3001, 3002, 3003, 3004, 3005, 3006]
        );
    }

    #[test]
    fn dev_port_candidates_deduplicates_preserving_order() {
        assert_eq!(
            dev_port_candidates(Some("3003"), |_| {}),
            vec![3003, 3000, 3001, 3002, 3004, 3005, 3006]
        );
        assert_eq!(
            dev_port_candidates(None, |_| {}),
            vec![3000, 3001, 3002, 3003, 3004, 3005, 3006]
        );
    }

    #[test]
    fn dev_port_candidates_logs_and_ignores_invalid_override() {
        let messages = RefCell::new(Vec::new());
        let candidates = dev_port_candidates(Some("not-a-port"), |message| {
            messages.borrow_mut().push(message.to_string())
        });

        assert_eq!(candidates.first(), Some(&DEFAULT_DEV_PORT));
        assert_eq!(candidates.len(), FALLBACK_DEV_PORTS.len());
        assert_eq!(messages.borrow().len(), 1);
    }

    #[test]
    fn parse_dev_port_rejects_zero_and_out_of_range() {
        assert_eq!(parse_dev_port(" 5173 "), Some(5173));
        assert_eq!(parse_dev_port("0"), None);
        assert_eq!(parse_dev_port("70000"), None);
    }

    #[test]
    fn dev_server_source_builds_localhost_urls() {
        let source = ContentSource::DevServer { port: 3002 };
        assert_eq!(
            source.entry_url().expect("entry url").as_str(),
            "http://localhost:3002/"
        );
        assert_eq!(
            source.page_url("settings").expect("page url").as_str(),
            "http://localhost:3002/settings"
        );
    }

    #[test]
    fn packaged_source_serves_pages_from_the_app_origin() {
        let source = ContentSource::PackagedApp;
        let origin = Url::parse(PACKAGED_APP_ORIGIN).expect("app origin");

        let entry_url = source.entry_url().expect("entry url");
        assert_ne!(entry_url.scheme(), "file");
        assert_eq!(entry_url.scheme(), origin.scheme());
        assert_eq!(entry_url.host_str(), origin.host_str());
        assert_eq!(entry_url.path(), "/index.html");

        let settings_url = source.page_url("settings").expect("page url");
        assert_ne!(settings_url.scheme(), "file");
        assert_eq!(settings_url.path(), "/settings.html");
    }
}
