mod block;
mod color;
mod config;
mod error;
mod host;
mod inline;
mod links;
mod node;
mod parser;
mod render;
mod theme;
mod url;
mod view;

pub use block::{Block, List, ListItem, Span};
pub use color::Color;
pub use config::{Config, ListOverride, Padding, Preset, StyleOverride};
pub use error::{ColorParseError, ConfigError, HostError};
pub use host::SystemHost;
pub use inline::{Formatted, InlineFormatter, RunStyle};
pub use links::{CHOOSE_CANCEL, CHOOSE_TITLE, Link, LinkAction, LinkHost};
pub use node::{
    Card, Image, ImageFormat, Node, Orientation, RenderedDocument, Rule, Run, Stack, TextBlock,
};
pub use render::BlockRenderer;
pub use theme::{
    Element, FontAttributes, ListStyle, MarkdownStyle, MarkdownTheme, TextDecorations, Thickness,
};
pub use url::{image_format, resolve as resolve_url};
pub use view::{MarkdownView, render};

/// Parse markdown text into a vector of blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Render markdown with the default light theme and no link base.
pub fn markdown_to_tree(markdown: &str) -> RenderedDocument {
    render(markdown, &MarkdownTheme::default(), None)
}

/// Render markdown with the theme and link base from `config`.
pub fn markdown_to_tree_with_config(markdown: &str, config: &Config) -> RenderedDocument {
    render(markdown, &config.theme(), config.relative_url_host.as_deref())
}
