//! Inline content rendering to styled runs

use crate::block::Span;
use crate::color::Color;
use crate::links::Link;
use crate::node::{Image, Run};
use crate::theme::{FontAttributes, MarkdownStyle, MarkdownTheme, TextDecorations};
use crate::url;

/// Padding either side of an inline code span (an en space).
const CODE_SPACER: &str = "\u{2002}";

/// Styling a span inherits from the block and its enclosing spans.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStyle {
    pub font_family: Option<String>,
    pub attributes: FontAttributes,
    pub decorations: TextDecorations,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub font_size: Option<f32>,
}

impl RunStyle {
    /// Block-level styling from `style`, with the foreground chosen by the caller.
    pub fn for_block(style: &MarkdownStyle, foreground: Color) -> Self {
        Self {
            font_family: style.font_family.clone(),
            attributes: style.attributes,
            decorations: style.decorations,
            foreground: Some(foreground),
            background: Some(style.background),
            font_size: Some(style.font_size),
        }
    }

    pub(crate) fn run(&self, text: impl Into<String>) -> Run {
        Run {
            text: text.into(),
            attributes: self.attributes,
            decorations: self.decorations,
            font_size: self.font_size,
            font_family: self.font_family.clone(),
            foreground: self.foreground,
            background: self.background,
        }
    }
}

/// Output of formatting one block's inline content.
///
/// `links` and `images` are side channels: links become the block's tap
/// action, images are appended after the block.
#[derive(Debug, Default, PartialEq)]
pub struct Formatted {
    pub runs: Vec<Run>,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
}

impl Formatted {
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

pub struct InlineFormatter<'a> {
    theme: &'a MarkdownTheme,
    base_url: Option<&'a str>,
}

impl<'a> InlineFormatter<'a> {
    pub fn new(theme: &'a MarkdownTheme, base_url: Option<&'a str>) -> Self {
        Self { theme, base_url }
    }

    /// Convert inline content to styled runs, collecting links and images.
    pub fn format(&self, content: &[Span], style: &RunStyle) -> Formatted {
        let mut out = Formatted::default();
        for span in content {
            self.format_span(span, style, &mut out);
        }
        out
    }

    fn format_span(&self, span: &Span, style: &RunStyle, out: &mut Formatted) {
        match span {
            Span::Text(text) => out.runs.push(style.run(text.as_str())),
            Span::Bold(content) => {
                let style = RunStyle {
                    attributes: style.attributes | FontAttributes::BOLD,
                    ..style.clone()
                };
                for inner in content {
                    self.format_span(inner, &style, out);
                }
            }
            Span::Italic(content) => {
                let style = RunStyle {
                    attributes: style.attributes | FontAttributes::ITALIC,
                    ..style.clone()
                };
                for inner in content {
                    self.format_span(inner, &style, out);
                }
            }
            Span::LineBreak => out.runs.push(Run::plain("\n")),
            Span::Code(code) => self.format_code(code, out),
            Span::Link { url, content } => {
                let link = &self.theme.link;
                let style = RunStyle {
                    font_family: link.font_family.clone().or_else(|| style.font_family.clone()),
                    attributes: link.attributes,
                    decorations: link.decorations,
                    foreground: Some(link.foreground),
                    background: Some(link.background),
                    font_size: style.font_size,
                };
                let start = out.runs.len();
                for inner in content {
                    self.format_span(inner, &style, out);
                }
                let label: String = out.runs[start..]
                    .iter()
                    .map(|run| run.text.as_str())
                    .collect();
                out.links.push(Link::new(label, url::resolve(url, self.base_url)));
            }
            Span::Image { url, .. } => {
                let url = url::resolve(url, self.base_url);
                let format = url::image_format(&url);
                out.images.push(Image { url, format });
            }
            Span::Unsupported(kind) => {
                tracing::warn!(kind = %kind, "Can't render inline content");
            }
        }
    }

    /// Code styling is absolute: nothing is inherited from the surroundings.
    fn format_code(&self, code: &str, out: &mut Formatted) {
        let theme = &self.theme.code;
        let styled = |text: &str, attributes: FontAttributes| Run {
            text: text.to_string(),
            attributes,
            decorations: TextDecorations::empty(),
            font_size: Some(theme.font_size),
            font_family: theme.font_family.clone(),
            foreground: Some(theme.foreground),
            background: Some(theme.background),
        };
        out.runs.push(styled(CODE_SPACER, FontAttributes::empty()));
        out.runs.push(styled(code, theme.attributes));
        out.runs.push(styled(CODE_SPACER, FontAttributes::empty()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ImageFormat;
    use crate::parser::parse;
    use crate::block::Block;
    use pretty_assertions::assert_eq;

    fn first_paragraph(markdown: &str) -> Vec<Span> {
        match parse(markdown).into_iter().next() {
            Some(Block::Paragraph { content }) => content,
            other => panic!("expected a paragraph, got {other:?}"),
        }
    }

    fn format(markdown: &str, base: Option<&str>) -> Formatted {
        let theme = MarkdownTheme::default();
        let style = RunStyle::for_block(&theme.paragraph, theme.paragraph.foreground);
        InlineFormatter::new(&theme, base).format(&first_paragraph(markdown), &style)
    }

    #[test]
    fn literal_inherits_block_style() {
        let theme = MarkdownTheme::default();
        let formatted = format("hello", None);
        assert_eq!(
            formatted.runs,
            vec![Run {
                text: "hello".to_string(),
                attributes: FontAttributes::empty(),
                decorations: TextDecorations::empty(),
                font_size: Some(12.0),
                font_family: None,
                foreground: Some(theme.paragraph.foreground),
                background: Some(Color::TRANSPARENT),
            }]
        );
    }

    #[test]
    fn nested_emphasis_unions_attributes() {
        let both = FontAttributes::BOLD | FontAttributes::ITALIC;
        for markdown in ["**bold _italic_**", "*italic __bold__*"] {
            let formatted = format(markdown, None);
            let last = formatted.runs.last().unwrap();
            assert_eq!(last.attributes, both, "{markdown}");
        }
        let formatted = format("**bold _italic_**", None);
        assert_eq!(formatted.runs[0].attributes, FontAttributes::BOLD);
    }

    #[test]
    fn emphasis_keeps_block_attributes() {
        let theme = MarkdownTheme::default();
        let style = RunStyle::for_block(&theme.heading1, Color::WHITE);
        let formatted = InlineFormatter::new(&theme, None).format(&first_paragraph("*x*"), &style);
        assert_eq!(
            formatted.runs[0].attributes,
            FontAttributes::BOLD | FontAttributes::ITALIC
        );
        assert_eq!(formatted.runs[0].font_size, Some(26.0));
    }

    #[test]
    fn line_break_is_unstyled_newline() {
        let formatted = format("a  \nb", None);
        assert_eq!(formatted.runs[1], Run::plain("\n"));
        assert_eq!(formatted.text(), "a\nb");
    }

    #[test]
    fn code_span_ignores_inherited_style() {
        let theme = MarkdownTheme::default();
        let formatted = format("**`x`**", None);
        assert_eq!(formatted.runs.len(), 3);
        assert_eq!(formatted.text(), "\u{2002}x\u{2002}");
        for run in &formatted.runs {
            assert_eq!(run.attributes, FontAttributes::empty());
            assert_eq!(run.font_family.as_deref(), Some("monospace"));
            assert_eq!(run.foreground, Some(theme.code.foreground));
            assert_eq!(run.background, Some(theme.code.background));
        }
    }

    #[test]
    fn links_collect_in_source_order() {
        let theme = MarkdownTheme::default();
        let formatted = format("see [A](https://a) and [*B*](b.html)", Some("https://host/"));
        assert_eq!(
            formatted.links,
            vec![
                Link::new("A", "https://a"),
                Link::new("B", "https://host/b.html"),
            ]
        );
        let link_run = &formatted.runs[1];
        assert_eq!(link_run.text, "A");
        assert_eq!(link_run.foreground, Some(theme.link.foreground));
        assert_eq!(link_run.font_size, Some(12.0));
        // Link attributes replace inherited ones; emphasis inside still unions
        assert_eq!(formatted.runs[3].attributes, FontAttributes::ITALIC);
    }

    #[test]
    fn link_replaces_inherited_attributes() {
        let formatted = format("**[A](https://a)**", None);
        assert_eq!(formatted.runs[0].attributes, FontAttributes::empty());
    }

    #[test]
    fn link_family_falls_back_to_inherited() {
        let mut theme = MarkdownTheme::default();
        theme.paragraph.font_family = Some("Serif".to_string());
        let style = RunStyle::for_block(&theme.paragraph, Color::BLACK);
        let spans = first_paragraph("[A](https://a)");

        let formatted = InlineFormatter::new(&theme, None).format(&spans, &style);
        assert_eq!(formatted.runs[0].font_family.as_deref(), Some("Serif"));

        theme.link.font_family = Some("Sans".to_string());
        let formatted = InlineFormatter::new(&theme, None).format(&spans, &style);
        assert_eq!(formatted.runs[0].font_family.as_deref(), Some("Sans"));
    }

    #[test]
    fn image_is_deferred_not_inline() {
        let formatted = format("![alt](pic.svg)", Some("https://host/docs/"));
        assert!(formatted.runs.is_empty());
        assert!(formatted.links.is_empty());
        assert_eq!(
            formatted.images,
            vec![Image {
                url: "https://host/docs/pic.svg".to_string(),
                format: ImageFormat::Vector,
            }]
        );
    }

    #[test]
    fn unsupported_inline_is_dropped() {
        let formatted = format("a <b>x</b>", None);
        assert_eq!(formatted.text(), "a x");
    }
}
