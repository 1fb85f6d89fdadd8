//! Presentation templates and per-slide color schemes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Dark,
    Blue,
    Purple,
    Green,
    Corporate,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 5] = [
        Self::Dark,
        Self::Blue,
        Self::Purple,
        Self::Green,
        Self::Corporate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Green => "green",
            Self::Corporate => "corporate",
        }
    }
}

/// Deck-wide visual theme.
///
/// Applying a template overwrites every slide background; element content is
/// never touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TemplateKind,
    pub background: String,
    pub text_color: String,
    pub accent_color: String,
}

impl Default for Template {
    fn default() -> Self {
        Self::preset(TemplateKind::Dark)
    }
}

impl Template {
    /// Built-in template for `kind`.
    pub fn preset(kind: TemplateKind) -> Self {
        let (name, background, accent) = match kind {
            TemplateKind::Dark => (
                "Dark Tech",
                "linear-gradient(135deg, #1e293b 0%, #0f172a 100%)",
                "#38BDF8",
            ),
            TemplateKind::Blue => (
                "Blue Business",
                "linear-gradient(135deg, #1e3a5f 0%, #0f172a 100%)",
                "#3B82F6",
            ),
            TemplateKind::Purple => (
                "Purple Gradient",
                "linear-gradient(135deg, #312e81 0%, #1e1b4b 100%)",
                "#A78BFA",
            ),
            TemplateKind::Green => (
                "Fresh Green",
                "linear-gradient(135deg, #064e3b 0%, #022c22 100%)",
                "#34D399",
            ),
            TemplateKind::Corporate => (
                "Corporate",
                "linear-gradient(135deg, #1e293b 0%, #334155 100%)",
                "#F59E0B",
            ),
        };

        Self {
            id: kind.as_str().to_string(),
            name: name.to_string(),
            kind,
            background: background.to_string(),
            text_color: "#FFFFFF".to_string(),
            accent_color: accent.to_string(),
        }
    }

    /// All built-in templates.
    pub fn presets() -> Vec<Template> {
        TemplateKind::ALL.into_iter().map(Self::preset).collect()
    }
}

/// Built-in color schemes applied to a single slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    DarkBlue,
    BluePurple,
    GreenNature,
    OrangeWarm,
    Corporate,
    LightMinimal,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 6] = [
        Self::DarkBlue,
        Self::BluePurple,
        Self::GreenNature,
        Self::OrangeWarm,
        Self::Corporate,
        Self::LightMinimal,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::DarkBlue => "dark-blue",
            Self::BluePurple => "blue-purple",
            Self::GreenNature => "green-nature",
            Self::OrangeWarm => "orange-warm",
            Self::Corporate => "corporate",
            Self::LightMinimal => "light-minimal",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn background(&self) -> &'static str {
        match self {
            Self::DarkBlue => "linear-gradient(135deg, #1e293b 0%, #0f172a 100%)",
            Self::BluePurple => "linear-gradient(135deg, #312e81 0%, #1e1b4b 100%)",
            Self::GreenNature => "linear-gradient(135deg, #064e3b 0%, #022c22 100%)",
            Self::OrangeWarm => "linear-gradient(135deg, #7c2d12 0%, #451a03 100%)",
            Self::Corporate => "linear-gradient(135deg, #1e293b 0%, #334155 100%)",
            Self::LightMinimal => "#FFFFFF",
        }
    }

    pub fn text_color(&self) -> &'static str {
        match self {
            Self::LightMinimal => "#1E293B",
            _ => "#FFFFFF",
        }
    }

    pub fn accent_color(&self) -> &'static str {
        match self {
            Self::DarkBlue => "#38BDF8",
            Self::BluePurple => "#A78BFA",
            Self::GreenNature => "#34D399",
            Self::OrangeWarm => "#FB923C",
            Self::Corporate => "#F59E0B",
            Self::LightMinimal => "#2563EB",
        }
    }
}
