//! Page fixture: the banner markup fields plus the configuration snapshot

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{BannerConfig, SettingsError};

/// Fields the page renderer prints into the banner markup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BannerMarkup {
    /// Main notice markup
    pub text: String,
    /// Markup printed in front of the countdown
    pub countdown_prefix: String,
    pub countdown_active: bool,
    pub link: Option<String>,
    pub link_text: Option<String>,
    pub link_tab: bool,
    pub bg_color: Option<String>,
    pub text_color: Option<String>,
}

/// Everything the host needs to render one page with the widget on it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub banner: BannerMarkup,
    #[serde(default)]
    pub data: BannerConfig,
}

impl PageConfig {
    /// Read a page fixture from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let page = Self::from_json(&raw)?;
        info!("Loaded page fixture from {}", path.display());
        Ok(page)
    }

    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Stamp the server time the way a page render would, unless the fixture pins one
    pub fn stamp_server_time(&mut self, now: i64) {
        if self.data.server_time.is_none() {
            debug!("Stamping serverTime={}", now);
            self.data.server_time = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_fixture() {
        let page = PageConfig::from_json(
            r##"{
                "banner": { "text": "<b>Sale</b>", "countdownActive": true, "bgColor": "#111" },
                "data": { "countdownTarget": 1700000000, "showSeconds": true }
            }"##,
        )
        .unwrap();
        assert_eq!(page.banner.text, "<b>Sale</b>");
        assert!(page.banner.countdown_active);
        assert_eq!(page.banner.bg_color.as_deref(), Some("#111"));
        assert_eq!(page.data.deadline(), Some(1_700_000_000));
        assert!(page.data.show_seconds);
    }

    #[test]
    fn stamping_keeps_pinned_server_time() {
        let mut page = PageConfig::default();
        page.stamp_server_time(100);
        assert_eq!(page.data.server_time, Some(100));
        page.stamp_server_time(200);
        assert_eq!(page.data.server_time, Some(100));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = PageConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
