//! Block rendering: document blocks to presentation nodes.

use crate::block::{Block, List, Span};
use crate::inline::{InlineFormatter, RunStyle};
use crate::links::{Link, LinkAction};
use crate::node::{Card, Node, Rule, Run, Stack, TextBlock};
use crate::theme::{MarkdownStyle, MarkdownTheme, Thickness};

/// Spacing inside heading groups, quote groups and list rows.
const GROUP_SPACING: f32 = 6.0;
const CODE_CORNER_RADIUS: f32 = 3.0;
const BULLET_SIZE: f32 = 4.0;
/// Drops the bullet to roughly the first line's x-height.
const BULLET_TOP_MARGIN: f32 = 6.0;

/// Mutable context threaded through one render pass.
///
/// `container` is swapped out on entry to a quote or list item and swapped
/// back on exit. `pending_links` and `deferred` only hold anything while a
/// single block is being built.
struct RenderState {
    container: Stack,
    quoted: bool,
    list_depth: u32,
    pending_links: Vec<Link>,
    deferred: Vec<Node>,
}

impl RenderState {
    fn new(root: Stack) -> Self {
        Self {
            container: root,
            quoted: false,
            list_depth: 0,
            pending_links: Vec::new(),
            deferred: Vec::new(),
        }
    }
}

pub struct BlockRenderer<'a> {
    theme: &'a MarkdownTheme,
    inline: InlineFormatter<'a>,
}

impl<'a> BlockRenderer<'a> {
    pub fn new(theme: &'a MarkdownTheme, base_url: Option<&'a str>) -> Self {
        Self {
            theme,
            inline: InlineFormatter::new(theme, base_url),
        }
    }

    /// Render top-level blocks into a fresh vertical stack.
    pub fn render(&self, blocks: &[Block]) -> Stack {
        let mut state = RenderState::new(Stack::vertical(self.theme.vertical_spacing));
        self.render_blocks(blocks, &mut state);
        state.container
    }

    fn render_blocks(&self, blocks: &[Block], state: &mut RenderState) {
        for block in blocks {
            self.render_block(block, state);
        }
    }

    fn render_block(&self, block: &Block, state: &mut RenderState) {
        match block {
            Block::Heading { level, content } => self.render_heading(*level, content, state),
            Block::Paragraph { content } => {
                let text = self.text_block(content, &self.theme.paragraph, state);
                state.container.push(text);
            }
            Block::Quote(children) => self.render_quote(children, state),
            Block::CodeBlock { lines, .. } => self.render_code(lines, state),
            Block::List(list) => self.render_list(list, state),
            Block::Rule => {
                let separator = &self.theme.separator;
                if separator.has_border() {
                    state
                        .container
                        .push(Rule::horizontal(separator.border_size, separator.border()));
                }
            }
            Block::Html(_) => {
                tracing::debug!("Skipping raw HTML block");
            }
            Block::Unsupported(_) => {
                tracing::warn!(kind = block.kind(), "Can't render block");
            }
        }

        // Images found while formatting go after the block that held them
        let deferred = std::mem::take(&mut state.deferred);
        state.container.children.extend(deferred);
        debug_assert!(state.pending_links.is_empty());
    }

    /// Format inline content into a text block, attaching the block's links
    /// as one tap action.
    fn text_block(
        &self,
        content: &[Span],
        style: &MarkdownStyle,
        state: &mut RenderState,
    ) -> TextBlock {
        // Quote color wins over the element's own color
        let foreground = if state.quoted {
            self.theme.quote.foreground
        } else {
            style.foreground
        };
        let formatted = self
            .inline
            .format(content, &RunStyle::for_block(style, foreground));

        state.pending_links.extend(formatted.links);
        state
            .deferred
            .extend(formatted.images.into_iter().map(Node::Image));

        let mut text = TextBlock::new(formatted.runs);
        text.on_tap = LinkAction::from_links(std::mem::take(&mut state.pending_links));
        text
    }

    fn render_heading(&self, level: u8, content: &[Span], state: &mut RenderState) {
        let style = self.theme.heading(level);
        let text = self.text_block(content, style, state);

        if style.has_border() {
            let mut group = Stack::vertical(GROUP_SPACING);
            group.push(text);
            group.push(Rule::horizontal(style.border_size, style.border()));
            state.container.push(group);
        } else {
            state.container.push(text);
        }
    }

    fn render_quote(&self, children: &[Block], state: &mut RenderState) {
        let style = &self.theme.quote;
        let was_quoted = std::mem::replace(&mut state.quoted, true);
        let inner = self.render_nested(children, self.theme.vertical_spacing, state);
        state.quoted = was_quoted;

        if style.has_border() {
            let mut group = Stack::horizontal(GROUP_SPACING).with_background(style.background);
            group.push(Rule::vertical(style.border_size, style.border()));
            group.push(inner);
            state.container.push(group);
        } else {
            state.container.push(inner.with_background(style.background));
        }
    }

    fn render_code(&self, lines: &[String], state: &mut RenderState) {
        let style = &self.theme.code;
        let run = Run {
            text: lines.join("\n"),
            attributes: style.attributes,
            font_size: Some(style.font_size),
            font_family: style.font_family.clone(),
            foreground: Some(style.foreground),
            ..Run::default()
        };
        state.container.push(Card {
            corner_radius: CODE_CORNER_RADIUS,
            padding: style.padding,
            background: style.background,
            content: Box::new(TextBlock::new(vec![run]).into()),
        });
    }

    fn render_list(&self, list: &List, state: &mut RenderState) {
        let style = &self.theme.list;
        state.list_depth += 1;

        for (index, item) in list.items.iter().enumerate() {
            let content = self.render_nested(&item.blocks, style.vertical_spacing, state);

            let indent = state.list_depth as f32 * style.indentation;
            let mut row = Stack::horizontal(GROUP_SPACING)
                .with_margin(Thickness::new(indent, 0.0, 0.0, 0.0));
            row.push(self.bullet(list.ordered, index + 1));
            row.push(content);
            state.container.push(row);
        }

        state.list_depth -= 1;
    }

    /// Leading cell of a list row: "N." for ordered lists, a square otherwise.
    fn bullet(&self, ordered: bool, number: usize) -> Node {
        let paragraph = &self.theme.paragraph;
        if ordered {
            let style = RunStyle::for_block(paragraph, paragraph.foreground);
            TextBlock::new(vec![style.run(format!("{number}."))]).into()
        } else {
            Rule {
                width: Some(BULLET_SIZE),
                height: Some(BULLET_SIZE),
                margin: Thickness::new(0.0, BULLET_TOP_MARGIN, 0.0, 0.0),
                color: paragraph.foreground,
            }
            .into()
        }
    }

    /// Render `blocks` into a fresh container, restoring the caller's
    /// container afterwards.
    fn render_nested(&self, blocks: &[Block], spacing: f32, state: &mut RenderState) -> Stack {
        let outer = std::mem::replace(&mut state.container, Stack::vertical(spacing));
        self.render_blocks(blocks, state);
        std::mem::replace(&mut state.container, outer)
    }
}
