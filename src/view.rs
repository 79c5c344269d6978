//! The render pipeline and a bindable view around it.

use crate::config::Config;
use crate::node::RenderedDocument;
use crate::parser;
use crate::render::BlockRenderer;
use crate::theme::MarkdownTheme;

/// Render markdown into a fresh presentation tree.
///
/// A pure function of its inputs: nothing carries over between calls. Empty
/// input yields a document with only the theme's background and padding.
pub fn render(
    markdown: &str,
    theme: &MarkdownTheme,
    relative_url_host: Option<&str>,
) -> RenderedDocument {
    let blocks = if markdown.is_empty() {
        Vec::new()
    } else {
        parser::parse(markdown)
    };
    tracing::debug!(blocks = blocks.len(), "Rendering markdown");

    let content = BlockRenderer::new(theme, relative_url_host).render(&blocks);
    RenderedDocument {
        background: theme.background,
        padding: theme.control_padding,
        content,
    }
}

/// Markdown source, theme and link base bound together.
///
/// Changing any of the three re-renders from scratch; [`content`](Self::content)
/// always reflects the current inputs.
#[derive(Debug, Clone)]
pub struct MarkdownView {
    markdown: String,
    theme: Option<MarkdownTheme>,
    default_theme: MarkdownTheme,
    relative_url_host: Option<String>,
    content: RenderedDocument,
}

impl MarkdownView {
    /// An empty view that uses `default_theme` until a theme is set.
    pub fn new(default_theme: MarkdownTheme) -> Self {
        let content = render("", &default_theme, None);
        Self {
            markdown: String::new(),
            theme: None,
            default_theme,
            relative_url_host: None,
            content,
        }
    }

    /// A view themed and based as `config` describes.
    pub fn from_config(config: &Config) -> Self {
        let mut view = Self::new(config.theme());
        view.set_relative_url_host(config.relative_url_host.clone());
        view
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn set_markdown(&mut self, markdown: impl Into<String>) {
        self.markdown = markdown.into();
        self.rerender();
    }

    /// The bound theme, or the default theme when none is bound.
    pub fn theme(&self) -> &MarkdownTheme {
        self.theme.as_ref().unwrap_or(&self.default_theme)
    }

    /// Bind a theme; `None` falls back to the default theme.
    pub fn set_theme(&mut self, theme: Option<MarkdownTheme>) {
        self.theme = theme;
        self.rerender();
    }

    pub fn relative_url_host(&self) -> Option<&str> {
        self.relative_url_host.as_deref()
    }

    pub fn set_relative_url_host(&mut self, host: Option<String>) {
        self.relative_url_host = host;
        self.rerender();
    }

    /// The tree for the current inputs.
    pub fn content(&self) -> &RenderedDocument {
        &self.content
    }

    fn rerender(&mut self) {
        self.content = render(&self.markdown, self.theme(), self.relative_url_host());
    }
}

impl Default for MarkdownView {
    fn default() -> Self {
        Self::new(MarkdownTheme::default())
    }
}
