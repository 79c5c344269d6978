//! Presentation tree handed to the host UI.
//!
//! Nodes describe shape and style only; laying them out and painting them is
//! up to the host.

use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::color::Color;
use crate::links::LinkAction;
use crate::theme::{FontAttributes, TextDecorations, Thickness};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Stack(Stack),
    Text(TextBlock),
    Rule(Rule),
    Card(Card),
    Image(Image),
}

/// A group laying its children out in one direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stack {
    pub orientation: Orientation,
    pub spacing: f32,
    pub margin: Thickness,
    pub background: Option<Color>,
    pub children: Vec<Node>,
}

impl Stack {
    pub fn vertical(spacing: f32) -> Self {
        Self {
            orientation: Orientation::Vertical,
            spacing,
            margin: Thickness::ZERO,
            background: None,
            children: Vec::new(),
        }
    }

    pub fn horizontal(spacing: f32) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            ..Self::vertical(spacing)
        }
    }

    pub fn with_margin(mut self, margin: Thickness) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }
}

/// One styled stretch of text. Unset fields fall back to the host defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Run {
    pub text: String,
    pub attributes: FontAttributes,
    pub decorations: TextDecorations,
    pub font_size: Option<f32>,
    pub font_family: Option<String>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

impl Run {
    /// A run with no styling of its own.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// A formatted label: runs laid out as one flowing paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextBlock {
    pub runs: Vec<Run>,
    /// Set when the block contains links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_tap: Option<LinkAction>,
}

impl TextBlock {
    pub fn new(runs: Vec<Run>) -> Self {
        Self { runs, on_tap: None }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// A filled rectangle: rules, quote bars and list bullets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub margin: Thickness,
    pub color: Color,
}

impl Rule {
    /// Full-width rule `thickness` tall.
    pub fn horizontal(thickness: f32, color: Color) -> Self {
        Self {
            width: None,
            height: Some(thickness),
            margin: Thickness::ZERO,
            color,
        }
    }

    /// Full-height bar `thickness` wide.
    pub fn vertical(thickness: f32, color: Color) -> Self {
        Self {
            width: Some(thickness),
            height: None,
            margin: Thickness::ZERO,
            color,
        }
    }
}

/// Padded, rounded frame around a single child.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub corner_radius: f32,
    pub padding: Thickness,
    pub background: Color,
    pub content: Box<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Vector,
    Raster,
}

/// Image loaded by the host from `url`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub url: String,
    pub format: ImageFormat,
}

impl From<Stack> for Node {
    fn from(stack: Stack) -> Self {
        Node::Stack(stack)
    }
}

impl From<TextBlock> for Node {
    fn from(text: TextBlock) -> Self {
        Node::Text(text)
    }
}

impl From<Rule> for Node {
    fn from(rule: Rule) -> Self {
        Node::Rule(rule)
    }
}

impl From<Card> for Node {
    fn from(card: Card) -> Self {
        Node::Card(card)
    }
}

impl From<Image> for Node {
    fn from(image: Image) -> Self {
        Node::Image(image)
    }
}

/// Root of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedDocument {
    pub background: Color,
    pub padding: Thickness,
    pub content: Stack,
}

impl RenderedDocument {
    /// Every text block carrying a link action, in document order.
    pub fn tappable(&self) -> Vec<&TextBlock> {
        let mut found = Vec::new();
        for child in &self.content.children {
            collect_tappable(child, &mut found);
        }
        found
    }
}

fn collect_tappable<'a>(node: &'a Node, found: &mut Vec<&'a TextBlock>) {
    match node {
        Node::Stack(stack) => {
            for child in &stack.children {
                collect_tappable(child, found);
            }
        }
        Node::Text(text) if text.on_tap.is_some() => found.push(text),
        Node::Card(card) => collect_tappable(&card.content, found),
        Node::Text(_) | Node::Rule(_) | Node::Image(_) => {}
    }
}

/// Indented outline, one node per line.
impl fmt::Display for RenderedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "document background={}", self.background)?;
        for child in &self.content.children {
            write_node(f, child, 1)?;
        }
        Ok(())
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match node {
        Node::Stack(stack) => {
            let mut line = format!("{indent}{:?} stack", stack.orientation).to_lowercase();
            if stack.margin.left > 0.0 {
                let _ = write!(line, " indent={}", stack.margin.left);
            }
            if let Some(background) = stack.background.filter(|c| !c.is_transparent()) {
                let _ = write!(line, " background={background}");
            }
            writeln!(f, "{line}")?;
            for child in &stack.children {
                write_node(f, child, depth + 1)?;
            }
        }
        Node::Text(text) => {
            let mut line = format!("{indent}text {:?}", text.text());
            if let Some(action) = &text.on_tap {
                let _ = write!(line, " links={}", action.links().len());
            }
            writeln!(f, "{line}")?;
        }
        Node::Rule(rule) => {
            let size = match (rule.width, rule.height) {
                (Some(w), Some(h)) => format!("{w}x{h}"),
                (Some(w), None) => format!("width={w}"),
                (None, Some(h)) => format!("height={h}"),
                (None, None) => String::new(),
            };
            writeln!(f, "{indent}rule {size} {}", rule.color)?;
        }
        Node::Card(card) => {
            writeln!(f, "{indent}card background={}", card.background)?;
            write_node(f, &card.content, depth + 1)?;
        }
        Node::Image(image) => {
            writeln!(f, "{indent}image {:?} {}", image.format, image.url)?;
        }
    }
    Ok(())
}
