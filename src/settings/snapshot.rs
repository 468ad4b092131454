//! Configuration snapshot handed to the widget by the page

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// What happens to the banner once the countdown reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishAction {
    #[default]
    Hide,
    ShowAlternative,
}

/// Whether the alternative state keeps the banner colors or brings its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorsMode {
    #[default]
    Inherit,
    Custom,
}

/// Display suffix for each countdown unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            days: "d".to_string(),
            hours: "h".to_string(),
            minutes: "m".to_string(),
            seconds: "s".to_string(),
        }
    }
}

/// Immutable widget configuration for the lifetime of one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerConfig {
    #[serde(default)]
    pub finish_action: FinishAction,
    #[serde(default)]
    pub alternative_text: Option<String>,
    #[serde(default)]
    pub alternative_link: Option<String>,
    #[serde(default = "default_link_text", deserialize_with = "null_as_default")]
    pub alternative_link_text: String,
    #[serde(default)]
    pub alternative_link_tab: bool,
    #[serde(default)]
    pub alternative_colors_mode: ColorsMode,
    #[serde(default)]
    pub alternative_bg_color: Option<String>,
    #[serde(default)]
    pub alternative_text_color: Option<String>,
    /// Deadline as a Unix timestamp in seconds
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub countdown_target: Option<i64>,
    /// Server clock at page render, Unix seconds
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub server_time: Option<i64>,
    #[serde(default)]
    pub show_seconds: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Labels,
    #[serde(default)]
    pub debug_mode: bool,
}

fn default_link_text() -> String {
    "Learn more".to_string()
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            finish_action: FinishAction::default(),
            alternative_text: None,
            alternative_link: None,
            alternative_link_text: default_link_text(),
            alternative_link_tab: false,
            alternative_colors_mode: ColorsMode::default(),
            alternative_bg_color: None,
            alternative_text_color: None,
            countdown_target: None,
            server_time: None,
            show_seconds: false,
            labels: Labels::default(),
            debug_mode: false,
        }
    }
}

impl BannerConfig {
    /// Deadline if one is configured; zero and negative targets mean "no countdown"
    pub fn deadline(&self) -> Option<i64> {
        self.countdown_target.filter(|target| *target > 0)
    }

    /// Alternative link, treating an empty string as unset
    pub fn alternative_link(&self) -> Option<&str> {
        self.alternative_link.as_deref().filter(|link| !link.is_empty())
    }

    /// Alternative markup, treating an empty string as unset
    pub fn alternative_text(&self) -> Option<&str> {
        self.alternative_text.as_deref().filter(|text| !text.is_empty())
    }

    pub fn link_text(&self) -> &str {
        if self.alternative_link_text.is_empty() {
            "Learn more"
        } else {
            &self.alternative_link_text
        }
    }

    pub fn uses_custom_colors(&self) -> bool {
        self.alternative_colors_mode == ColorsMode::Custom
    }
}

/// `null` decodes like a missing field would, minus any custom default;
/// `link_text()` covers the empty link label.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a JSON number or a string; strings keep their leading integer
/// (`"1700000000abc"` -> 1700000000), anything unparseable becomes `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(timestamp_from_value))
}

fn timestamp_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

/// Integer prefix of a string: optional whitespace, optional sign, digits.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: BannerConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(config.finish_action, FinishAction::Hide);
        assert_eq!(config.alternative_link_text, "Learn more");
        assert_eq!(config.labels, Labels::default());
        assert_eq!(config.deadline(), None);
    }

    #[test]
    fn timestamps_accept_numbers_and_numeric_strings() {
        let config: BannerConfig = serde_json::from_value(json!({
            "countdownTarget": "1700000000",
            "serverTime": 1699990000,
        }))
        .unwrap();
        assert_eq!(config.countdown_target, Some(1_700_000_000));
        assert_eq!(config.server_time, Some(1_699_990_000));
    }

    #[test]
    fn malformed_target_means_no_countdown() {
        for raw in [json!("soon"), json!(""), json!(0), json!(-5), json!(null), json!(true)] {
            let config: BannerConfig =
                serde_json::from_value(json!({ "countdownTarget": raw.clone() })).unwrap();
            assert_eq!(config.deadline(), None, "target {raw:?}");
        }
    }

    #[test]
    fn null_link_text_and_labels_fall_back() {
        let config: BannerConfig = serde_json::from_value(json!({
            "countdownTarget": 1_700_000_000,
            "alternativeLinkText": null,
            "labels": null,
        }))
        .unwrap();
        assert_eq!(config.link_text(), "Learn more");
        assert_eq!(config.labels, Labels::default());
    }

    #[test]
    fn partial_labels_keep_remaining_defaults() {
        let config: BannerConfig =
            serde_json::from_value(json!({ "labels": { "days": " days" } })).unwrap();
        assert_eq!(config.labels.days, " days");
        assert_eq!(config.labels.seconds, "s");
    }

    #[test]
    fn parse_int_prefix_keeps_leading_digits() {
        assert_eq!(parse_int_prefix("  42px"), Some(42));
        assert_eq!(parse_int_prefix("-7"), Some(-7));
        assert_eq!(parse_int_prefix("+"), None);
        assert_eq!(parse_int_prefix("x1"), None);
    }

    #[test]
    fn finish_action_uses_snake_case_names() {
        let config: BannerConfig = serde_json::from_value(json!({
            "finishAction": "show_alternative",
            "alternativeColorsMode": "custom",
        }))
        .unwrap();
        assert_eq!(config.finish_action, FinishAction::ShowAlternative);
        assert!(config.uses_custom_colors());
    }
}
