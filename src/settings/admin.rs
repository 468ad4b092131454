//! Admin settings panel rules: conditional field visibility and color previews

use serde::{Deserialize, Serialize};

use super::{ColorsMode, FinishAction};

const DEFAULT_BG: &str = "#f8f9fa";
const DEFAULT_TEXT: &str = "#212529";
const DEFAULT_BORDER: &str = "1px solid rgba(33, 37, 41, 0.25)";

/// How the countdown target is chosen in the settings form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetMode {
    #[default]
    Preset,
    Custom,
}

/// Current values of the settings form inputs that drive the preview
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsForm {
    pub finish_action: FinishAction,
    pub countdown_active: bool,
    pub countdown_target_mode: TargetMode,
    pub alternative_colors_mode: ColorsMode,
    pub bg_color: Option<String>,
    pub text_color: Option<String>,
    pub alternative_bg_color: Option<String>,
    pub alternative_text_color: Option<String>,
}

/// Which field groups of the form are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldVisibility {
    pub alternative_fields: bool,
    pub alternative_color_fields: bool,
    pub countdown_fields: bool,
    pub custom_target_field: bool,
}

/// Inline colors of a preview swatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub background: String,
    pub color: String,
    pub border: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPreview {
    pub main: Swatch,
    pub alternative: Swatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminPreview {
    pub visibility: FieldVisibility,
    pub colors: ColorPreview,
}

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn border_for(text: Option<&str>) -> String {
    match text {
        Some(color) => format!("1px solid {color}40"),
        None => DEFAULT_BORDER.to_string(),
    }
}

impl SettingsForm {
    pub fn visibility(&self) -> FieldVisibility {
        let alternative_fields = self.finish_action == FinishAction::ShowAlternative;
        let countdown_fields = self.countdown_active;
        FieldVisibility {
            alternative_fields,
            alternative_color_fields: alternative_fields
                && self.alternative_colors_mode == ColorsMode::Custom,
            countdown_fields,
            custom_target_field: countdown_fields
                && self.countdown_target_mode == TargetMode::Custom,
        }
    }

    pub fn color_preview(&self) -> ColorPreview {
        let bg = filled(&self.bg_color);
        let text = filled(&self.text_color);
        let main = Swatch {
            background: bg.unwrap_or(DEFAULT_BG).to_string(),
            color: text.unwrap_or(DEFAULT_TEXT).to_string(),
            border: border_for(text),
        };

        let alternative = if self.alternative_colors_mode == ColorsMode::Custom {
            let alt_text = filled(&self.alternative_text_color).or(text);
            Swatch {
                background: filled(&self.alternative_bg_color)
                    .or(bg)
                    .unwrap_or(DEFAULT_BG)
                    .to_string(),
                color: alt_text.unwrap_or(DEFAULT_TEXT).to_string(),
                border: border_for(alt_text),
            }
        } else {
            main.clone()
        };

        ColorPreview { main, alternative }
    }

    pub fn preview(&self) -> AdminPreview {
        AdminPreview {
            visibility: self.visibility(),
            colors: self.color_preview(),
        }
    }
}
