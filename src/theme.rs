//! Visual attributes for every kind of document element.
//!
//! A [`MarkdownTheme`] is plain data: one [`MarkdownStyle`] per element kind
//! plus a few global spacing values. It is built once per base font size and
//! not mutated while a render pass reads it.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::color::Color;

bitflags! {
    /// Font attributes; nested emphasis unions these, never overwrites.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct FontAttributes: u8 {
        const BOLD   = 0b0000_0001;
        const ITALIC = 0b0000_0010;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct TextDecorations: u8 {
        const UNDERLINE     = 0b0000_0001;
        const STRIKETHROUGH = 0b0000_0010;
    }
}

/// Space around the four edges of a node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Thickness {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Thickness {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Resolved style for one element kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownStyle {
    pub attributes: FontAttributes,
    pub decorations: TextDecorations,
    pub font_size: f32,
    pub font_family: Option<String>,
    pub foreground: Color,
    pub background: Color,
    /// Unset is fine whenever `border_size` is zero.
    pub border_color: Option<Color>,
    pub border_size: f32,
    pub padding: Thickness,
}

impl Default for MarkdownStyle {
    fn default() -> Self {
        Self {
            attributes: FontAttributes::empty(),
            decorations: TextDecorations::empty(),
            font_size: 12.0,
            font_family: None,
            foreground: Color::BLACK,
            background: Color::TRANSPARENT,
            border_color: None,
            border_size: 0.0,
            padding: Thickness::uniform(10.0),
        }
    }
}

impl MarkdownStyle {
    fn sized(attributes: FontAttributes, font_size: f32) -> Self {
        Self {
            attributes,
            font_size,
            ..Self::default()
        }
    }

    pub fn has_border(&self) -> bool {
        self.border_size > 0.0
    }

    /// Border color, transparent when none is configured.
    pub fn border(&self) -> Color {
        self.border_color.unwrap_or(Color::TRANSPARENT)
    }
}

/// List style: a regular style plus per-level indentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListStyle {
    #[serde(flatten)]
    pub style: MarkdownStyle,
    pub vertical_spacing: f32,
    /// Left margin per nesting level; sub-lists multiply it by their depth.
    pub indentation: f32,
}

impl Default for ListStyle {
    fn default() -> Self {
        Self {
            style: MarkdownStyle::default(),
            vertical_spacing: 10.0,
            indentation: 10.0,
        }
    }
}

/// Element kinds a theme carries a style for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Paragraph,
    Heading(u8),
    List,
    Quote,
    Code,
    Link,
    Separator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownTheme {
    pub background: Color,
    pub paragraph: MarkdownStyle,
    pub heading1: MarkdownStyle,
    pub heading2: MarkdownStyle,
    pub heading3: MarkdownStyle,
    pub heading4: MarkdownStyle,
    pub heading5: MarkdownStyle,
    pub heading6: MarkdownStyle,
    pub list: ListStyle,
    pub quote: MarkdownStyle,
    pub code: MarkdownStyle,
    pub link: MarkdownStyle,
    pub separator: MarkdownStyle,
    /// Vertical spacing between markdown elements.
    pub vertical_spacing: f32,
    /// Padding for the whole rendered document.
    pub control_padding: Thickness,
}

/// Fixed colors a named preset paints over the base theme.
struct Palette {
    background: &'static str,
    accent: &'static str,
    text: &'static str,
    code_background: &'static str,
    separator: &'static str,
    quote_text: &'static str,
    quote_border: &'static str,
}

const LIGHT: Palette = Palette {
    background: "#ffffff",
    accent: "#0366d6",
    text: "#24292e",
    code_background: "#f6f8fa",
    separator: "#eaecef",
    quote_text: "#6a737d",
    quote_border: "#dfe2e5",
};

const DARK: Palette = Palette {
    background: "#2b303b",
    accent: "#d08770",
    text: "#eff1f5",
    code_background: "#4f5b66",
    separator: "#65737e",
    quote_text: "#a7adba",
    quote_border: "#a7adba",
};

impl MarkdownTheme {
    /// Uncolored theme with every size derived from `base_font_size`.
    pub fn new(base_font_size: f32) -> Self {
        let bold = FontAttributes::BOLD;
        let none = FontAttributes::empty();

        let heading = |offset: f32, border_size: f32| MarkdownStyle {
            border_size,
            ..MarkdownStyle::sized(bold, base_font_size + offset)
        };

        Self {
            background: Color::TRANSPARENT,
            paragraph: MarkdownStyle::sized(none, base_font_size),
            heading1: heading(14.0, 1.0),
            heading2: heading(10.0, 1.0),
            heading3: heading(8.0, 0.0),
            heading4: heading(6.0, 0.0),
            heading5: heading(4.0, 0.0),
            heading6: heading(2.0, 0.0),
            list: ListStyle {
                style: MarkdownStyle::sized(none, base_font_size),
                ..ListStyle::default()
            },
            quote: MarkdownStyle {
                border_size: 4.0,
                background: Color::GRAY.multiply_alpha(0.1),
                ..MarkdownStyle::sized(none, base_font_size)
            },
            code: MarkdownStyle {
                font_family: Some("monospace".to_string()),
                ..MarkdownStyle::sized(none, base_font_size)
            },
            link: MarkdownStyle::sized(none, base_font_size),
            separator: MarkdownStyle {
                border_size: 2.0,
                ..MarkdownStyle::default()
            },
            vertical_spacing: 10.0,
            control_padding: Thickness::uniform(10.0),
        }
    }

    /// Dark text on a white background.
    pub fn light(base_font_size: f32) -> Self {
        Self::new(base_font_size).painted(&LIGHT)
    }

    /// Light text on a slate background.
    pub fn dark(base_font_size: f32) -> Self {
        Self::new(base_font_size).painted(&DARK)
    }

    fn painted(mut self, palette: &Palette) -> Self {
        // Palette entries are compile-time literals
        let color = |hex: &str| Color::from_hex(hex).unwrap_or_default();
        let text = color(palette.text);
        let separator = color(palette.separator);

        self.background = color(palette.background);
        self.paragraph.foreground = text;
        for heading in [
            &mut self.heading1,
            &mut self.heading2,
            &mut self.heading3,
            &mut self.heading4,
            &mut self.heading5,
            &mut self.heading6,
        ] {
            heading.foreground = text;
        }
        self.heading1.border_color = Some(separator);
        self.heading2.border_color = Some(separator);
        self.link.foreground = color(palette.accent);
        self.code.foreground = text;
        self.code.background = color(palette.code_background);
        self.quote.foreground = color(palette.quote_text);
        self.quote.border_color = Some(color(palette.quote_border));
        self.separator.border_color = Some(separator);
        self
    }

    /// Heading style for `level`; levels past 5 (and 0) share the level-6 style.
    pub fn heading(&self, level: u8) -> &MarkdownStyle {
        match level {
            1 => &self.heading1,
            2 => &self.heading2,
            3 => &self.heading3,
            4 => &self.heading4,
            5 => &self.heading5,
            _ => &self.heading6,
        }
    }

    pub fn style(&self, element: Element) -> &MarkdownStyle {
        match element {
            Element::Paragraph => &self.paragraph,
            Element::Heading(level) => self.heading(level),
            Element::List => &self.list.style,
            Element::Quote => &self.quote,
            Element::Code => &self.code,
            Element::Link => &self.link,
            Element::Separator => &self.separator,
        }
    }

    pub fn style_mut(&mut self, element: Element) -> &mut MarkdownStyle {
        match element {
            Element::Paragraph => &mut self.paragraph,
            Element::Heading(1) => &mut self.heading1,
            Element::Heading(2) => &mut self.heading2,
            Element::Heading(3) => &mut self.heading3,
            Element::Heading(4) => &mut self.heading4,
            Element::Heading(5) => &mut self.heading5,
            Element::Heading(_) => &mut self.heading6,
            Element::List => &mut self.list.style,
            Element::Quote => &mut self.quote,
            Element::Code => &mut self.code,
            Element::Link => &mut self.link,
            Element::Separator => &mut self.separator,
        }
    }
}

impl Default for MarkdownTheme {
    fn default() -> Self {
        Self::light(12.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_sizes_follow_base() {
        let theme = MarkdownTheme::new(16.0);
        let sizes: Vec<f32> = (1..=6).map(|l| theme.heading(l).font_size).collect();
        assert_eq!(sizes, vec![30.0, 26.0, 24.0, 22.0, 20.0, 18.0]);
        assert_eq!(theme.paragraph.font_size, 16.0);
        assert!(theme.heading(3).attributes.contains(FontAttributes::BOLD));
    }

    #[test]
    fn heading_levels_past_five_share_level_six() {
        let mut theme = MarkdownTheme::default();
        theme.heading6.foreground = Color::rgb(1, 2, 3);
        for level in [0, 6, 7, 42, u8::MAX] {
            assert_eq!(theme.heading(level), &theme.heading6);
        }
        for level in 1..=5 {
            assert_ne!(theme.heading(level).foreground, Color::rgb(1, 2, 3));
        }
    }

    #[test]
    fn presets_share_sizes_but_not_colors() {
        let light = MarkdownTheme::light(12.0);
        let dark = MarkdownTheme::dark(12.0);
        assert_eq!(light.heading1.font_size, dark.heading1.font_size);
        assert_eq!(light.background, Color::WHITE);
        assert_eq!(dark.background, Color::rgb(0x2b, 0x30, 0x3b));
        assert_eq!(light.link.foreground, Color::rgb(0x03, 0x66, 0xd6));
        assert_eq!(dark.quote.border_color, Some(Color::rgb(0xa7, 0xad, 0xba)));
    }

    #[test]
    fn base_theme_leaves_optional_fields_unset() {
        let theme = MarkdownTheme::new(12.0);
        assert_eq!(theme.paragraph.font_family, None);
        assert_eq!(theme.separator.border_color, None);
        assert_eq!(theme.separator.border(), Color::TRANSPARENT);
        assert_eq!(theme.code.font_family.as_deref(), Some("monospace"));
    }

    #[test]
    fn style_mut_clamps_heading_levels() {
        let mut theme = MarkdownTheme::new(12.0);
        theme.style_mut(Element::Heading(9)).font_size = 99.0;
        assert_eq!(theme.style(Element::Heading(6)).font_size, 99.0);
    }
}
