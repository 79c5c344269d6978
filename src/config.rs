use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::color::Color;
use crate::error::ConfigError;
use crate::theme::{
    Element, FontAttributes, MarkdownStyle, MarkdownTheme, TextDecorations, Thickness,
};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Theme file contents: a preset plus field-by-field overrides.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub preset: Preset,
    pub base_font_size: f32,
    /// Base URL relative links and images resolve against.
    pub relative_url_host: Option<String>,
    pub background: Option<Color>,
    pub vertical_spacing: Option<f32>,
    pub control_padding: Option<Padding>,
    pub paragraph: StyleOverride,
    pub heading1: StyleOverride,
    pub heading2: StyleOverride,
    pub heading3: StyleOverride,
    pub heading4: StyleOverride,
    pub heading5: StyleOverride,
    pub heading6: StyleOverride,
    pub list: ListOverride,
    pub quote: StyleOverride,
    pub code: StyleOverride,
    pub link: StyleOverride,
    pub separator: StyleOverride,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            base_font_size: 12.0,
            relative_url_host: None,
            background: None,
            vertical_spacing: None,
            control_padding: None,
            paragraph: StyleOverride::default(),
            heading1: StyleOverride::default(),
            heading2: StyleOverride::default(),
            heading3: StyleOverride::default(),
            heading4: StyleOverride::default(),
            heading5: StyleOverride::default(),
            heading6: StyleOverride::default(),
            list: ListOverride::default(),
            quote: StyleOverride::default(),
            code: StyleOverride::default(),
            link: StyleOverride::default(),
            separator: StyleOverride::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Light,
    Dark,
}

/// Padding written either as one number for all edges or as a table.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum Padding {
    Uniform(f32),
    Edges(Thickness),
}

impl From<Padding> for Thickness {
    fn from(padding: Padding) -> Self {
        match padding {
            Padding::Uniform(value) => Thickness::uniform(value),
            Padding::Edges(edges) => edges,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct StyleOverride {
    pub attributes: Option<FontAttributes>,
    pub decorations: Option<TextDecorations>,
    pub font_size: Option<f32>,
    pub font_family: Option<String>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub border_color: Option<Color>,
    pub border_size: Option<f32>,
    pub padding: Option<Padding>,
}

impl StyleOverride {
    pub fn apply(&self, style: &mut MarkdownStyle) {
        if let Some(attributes) = self.attributes {
            style.attributes = attributes;
        }
        if let Some(decorations) = self.decorations {
            style.decorations = decorations;
        }
        if let Some(size) = self.font_size {
            style.font_size = size;
        }
        if let Some(family) = &self.font_family {
            style.font_family = Some(family.clone());
        }
        if let Some(color) = self.foreground {
            style.foreground = color;
        }
        if let Some(color) = self.background {
            style.background = color;
        }
        if let Some(color) = self.border_color {
            style.border_color = Some(color);
        }
        if let Some(size) = self.border_size {
            style.border_size = size;
        }
        if let Some(padding) = self.padding {
            style.padding = padding.into();
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ListOverride {
    #[serde(flatten)]
    pub style: StyleOverride,
    pub vertical_spacing: Option<f32>,
    pub indentation: Option<f32>,
}

impl Config {
    /// The bundled configuration (validated by `build.rs`).
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Load config from a TOML file, or return the compiled default if it is
    /// missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to default theme config");
                Self::compiled_default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Build the theme: preset first, then every override on top.
    pub fn theme(&self) -> MarkdownTheme {
        let mut theme = match self.preset {
            Preset::Light => MarkdownTheme::light(self.base_font_size),
            Preset::Dark => MarkdownTheme::dark(self.base_font_size),
        };

        if let Some(color) = self.background {
            theme.background = color;
        }
        if let Some(spacing) = self.vertical_spacing {
            theme.vertical_spacing = spacing;
        }
        if let Some(padding) = self.control_padding {
            theme.control_padding = padding.into();
        }

        let overrides = [
            (Element::Paragraph, &self.paragraph),
            (Element::Heading(1), &self.heading1),
            (Element::Heading(2), &self.heading2),
            (Element::Heading(3), &self.heading3),
            (Element::Heading(4), &self.heading4),
            (Element::Heading(5), &self.heading5),
            (Element::Heading(6), &self.heading6),
            (Element::List, &self.list.style),
            (Element::Quote, &self.quote),
            (Element::Code, &self.code),
            (Element::Link, &self.link),
            (Element::Separator, &self.separator),
        ];
        for (element, style) in overrides {
            style.apply(theme.style_mut(element));
        }

        if let Some(spacing) = self.list.vertical_spacing {
            theme.list.vertical_spacing = spacing;
        }
        if let Some(indentation) = self.list.indentation {
            theme.list.indentation = indentation;
        }

        theme
    }
}
