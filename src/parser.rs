use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::block::{Block, List, ListItem, Span};

/// Parse markdown text into a list of blocks.
///
/// Never fails: anything pulldown-cmark cannot make sense of arrives here as
/// literal text.
pub fn parse(markdown: &str) -> Vec<Block> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    let parser = Parser::new_ext(markdown, options);
    let mut blocks = Vec::new();
    let mut state = ParseState::default();

    for event in parser {
        process_event(event, &mut state, &mut blocks);
    }

    blocks
}

#[derive(Default)]
struct ParseState {
    // Current inline content being built
    spans: Vec<Span>,
    // Parent span buffers while inside bold/italic/link/image
    span_stack: Vec<Vec<Span>>,
    // Destinations of the links and images currently open
    target_stack: Vec<String>,

    // Current heading level (if in a heading)
    heading_level: Option<u8>,

    // Code block state
    in_code_block: bool,
    code_language: Option<String>,
    code_content: String,

    // Raw HTML block state
    in_html_block: bool,
    html_content: String,

    // Tables are skipped wholesale
    in_table: bool,

    // YAML front matter is not content
    in_metadata: bool,

    // Open quotes, lists and list items, innermost last
    containers: Vec<Container>,
}

enum Container {
    Quote(Vec<Block>),
    List { ordered: bool, items: Vec<ListItem> },
    Item(Vec<Block>),
}

/// Append a finished block to the innermost open quote or list item, or to
/// the document when none is open.
fn push_block(state: &mut ParseState, blocks: &mut Vec<Block>, block: Block) {
    match state.containers.last_mut() {
        Some(Container::Quote(children)) | Some(Container::Item(children)) => children.push(block),
        Some(Container::List { .. }) | None => blocks.push(block),
    }
}

/// Tight list items carry their text without a paragraph wrapper; turn any
/// such loose text into a paragraph before the next block starts.
fn flush_loose_spans(state: &mut ParseState, blocks: &mut Vec<Block>) {
    if state.spans.is_empty() || state.heading_level.is_some() {
        return;
    }
    let content = std::mem::take(&mut state.spans);
    push_block(state, blocks, Block::Paragraph { content });
}

fn open_span(state: &mut ParseState) {
    state.span_stack.push(std::mem::take(&mut state.spans));
}

fn close_span(state: &mut ParseState, wrap: impl FnOnce(Vec<Span>) -> Span) {
    let inner = std::mem::take(&mut state.spans);
    if let Some(mut parent) = state.span_stack.pop() {
        parent.push(wrap(inner));
        state.spans = parent;
    }
}

fn process_event(event: Event, state: &mut ParseState, blocks: &mut Vec<Block>) {
    match event {
        // Headings
        Event::Start(Tag::Heading { level, .. }) => {
            flush_loose_spans(state, blocks);
            state.heading_level = Some(heading_level_to_u8(level));
        }
        Event::End(TagEnd::Heading(_)) => {
            if let Some(level) = state.heading_level.take() {
                let content = std::mem::take(&mut state.spans);
                push_block(state, blocks, Block::Heading { level, content });
            }
        }

        // Paragraphs
        Event::Start(Tag::Paragraph) => {
            flush_loose_spans(state, blocks);
        }
        Event::End(TagEnd::Paragraph) => {
            if state.in_table {
                return;
            }
            let content = std::mem::take(&mut state.spans);
            if !content.is_empty() {
                push_block(state, blocks, Block::Paragraph { content });
            }
        }

        // Text content
        Event::Text(text) => {
            if state.in_metadata {
                return;
            }
            if state.in_code_block {
                state.code_content.push_str(&text);
            } else if !state.in_table {
                state.spans.push(Span::Text(text.into_string()));
            }
        }

        // Inline code
        Event::Code(code) => {
            if !state.in_table {
                state.spans.push(Span::Code(code.into_string()));
            }
        }

        // Bold
        Event::Start(Tag::Strong) => open_span(state),
        Event::End(TagEnd::Strong) => close_span(state, Span::Bold),

        // Italic
        Event::Start(Tag::Emphasis) => open_span(state),
        Event::End(TagEnd::Emphasis) => close_span(state, Span::Italic),

        // Links
        Event::Start(Tag::Link { dest_url, .. }) => {
            state.target_stack.push(dest_url.into_string());
            open_span(state);
        }
        Event::End(TagEnd::Link) => {
            let url = state.target_stack.pop().unwrap_or_default();
            close_span(state, |content| Span::Link { url, content });
        }

        // Images
        Event::Start(Tag::Image { dest_url, .. }) => {
            state.target_stack.push(dest_url.into_string());
            open_span(state);
        }
        Event::End(TagEnd::Image) => {
            let url = state.target_stack.pop().unwrap_or_default();
            close_span(state, |alt| Span::Image { url, alt });
        }

        // Code blocks
        Event::Start(Tag::CodeBlock(kind)) => {
            flush_loose_spans(state, blocks);
            state.in_code_block = true;
            state.code_language = match kind {
                CodeBlockKind::Fenced(lang) => {
                    let lang = lang.into_string();
                    if lang.is_empty() { None } else { Some(lang) }
                }
                CodeBlockKind::Indented => None,
            };
            state.code_content.clear();
        }
        Event::End(TagEnd::CodeBlock) => {
            state.in_code_block = false;
            let content = std::mem::take(&mut state.code_content);
            let lines = content.lines().map(str::to_string).collect();
            let language = state.code_language.take();
            push_block(state, blocks, Block::CodeBlock { language, lines });
        }

        // Raw HTML
        Event::Start(Tag::HtmlBlock) => {
            flush_loose_spans(state, blocks);
            state.in_html_block = true;
            state.html_content.clear();
        }
        Event::Html(html) => {
            if state.in_html_block {
                state.html_content.push_str(&html);
            }
        }
        Event::End(TagEnd::HtmlBlock) => {
            state.in_html_block = false;
            let html = std::mem::take(&mut state.html_content);
            push_block(state, blocks, Block::Html(html));
        }
        Event::InlineHtml(_) => {
            if !state.in_table {
                state
                    .spans
                    .push(Span::Unsupported("inline html".to_string()));
            }
        }

        // Block quotes
        Event::Start(Tag::BlockQuote(_)) => {
            flush_loose_spans(state, blocks);
            state.containers.push(Container::Quote(Vec::new()));
        }
        Event::End(TagEnd::BlockQuote(_)) => {
            flush_loose_spans(state, blocks);
            if let Some(Container::Quote(children)) = state.containers.pop() {
                push_block(state, blocks, Block::Quote(children));
            }
        }

        // Lists
        Event::Start(Tag::List(first_item)) => {
            flush_loose_spans(state, blocks);
            state.containers.push(Container::List {
                ordered: first_item.is_some(),
                items: Vec::new(),
            });
        }
        Event::End(TagEnd::List(_)) => {
            if let Some(Container::List { ordered, items }) = state.containers.pop() {
                push_block(state, blocks, Block::List(List { ordered, items }));
            }
        }

        Event::Start(Tag::Item) => {
            state.containers.push(Container::Item(Vec::new()));
        }
        Event::End(TagEnd::Item) => {
            // Collect any remaining spans
            flush_loose_spans(state, blocks);
            if let Some(Container::Item(item_blocks)) = state.containers.pop() {
                if let Some(Container::List { items, .. }) = state.containers.last_mut() {
                    items.push(ListItem {
                        blocks: item_blocks,
                    });
                }
            }
        }

        // Tables have no presentation; swallow their content
        Event::Start(Tag::Table(_)) => {
            flush_loose_spans(state, blocks);
            state.in_table = true;
        }
        Event::End(TagEnd::Table) => {
            state.in_table = false;
            state.spans.clear();
            state.span_stack.clear();
            state.target_stack.clear();
            push_block(state, blocks, Block::Unsupported("table".to_string()));
        }

        Event::Start(Tag::MetadataBlock(_)) => {
            state.in_metadata = true;
        }
        Event::End(TagEnd::MetadataBlock(_)) => {
            state.in_metadata = false;
        }

        // Horizontal rule
        Event::Rule => {
            flush_loose_spans(state, blocks);
            push_block(state, blocks, Block::Rule);
        }

        // Soft breaks render as line breaks too, matching what the view shows
        Event::SoftBreak | Event::HardBreak => {
            if !state.in_table {
                state.spans.push(Span::LineBreak);
            }
        }

        // Task list markers, footnotes and the like carry nothing we render
        _ => {}
    }
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::block::{Block, List, ListItem, Span};
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    fn paragraph(spans: Vec<Span>) -> Block {
        Block::Paragraph { content: spans }
    }

    #[test]
    fn heading_and_paragraph() {
        assert_eq!(
            parse("# Title\n\nBody"),
            vec![
                Block::Heading {
                    level: 1,
                    content: vec![text("Title")]
                },
                paragraph(vec![text("Body")]),
            ]
        );
    }

    #[test]
    fn nested_emphasis() {
        assert_eq!(
            parse("***both***"),
            vec![paragraph(vec![Span::Italic(vec![Span::Bold(vec![text(
                "both"
            )])])])]
        );
    }

    #[test]
    fn link_and_image() {
        assert_eq!(
            parse("[a](http://x) ![pic](y.svg)"),
            vec![paragraph(vec![
                Span::Link {
                    url: "http://x".to_string(),
                    content: vec![text("a")]
                },
                text(" "),
                Span::Image {
                    url: "y.svg".to_string(),
                    alt: vec![text("pic")]
                },
            ])]
        );
    }

    #[test]
    fn breaks_become_line_breaks() {
        assert_eq!(
            parse("one\ntwo  \nthree"),
            vec![paragraph(vec![
                text("one"),
                Span::LineBreak,
                text("two"),
                Span::LineBreak,
                text("three"),
            ])]
        );
    }

    #[test]
    fn quote_nests_blocks() {
        assert_eq!(
            parse("> # Q\n> body\n>> deeper"),
            vec![Block::Quote(vec![
                Block::Heading {
                    level: 1,
                    content: vec![text("Q")]
                },
                paragraph(vec![text("body")]),
                Block::Quote(vec![paragraph(vec![text("deeper")])]),
            ])]
        );
    }

    #[test]
    fn tight_list_items_become_paragraphs() {
        assert_eq!(
            parse("- one\n- two\n  1. inner"),
            vec![Block::List(List {
                ordered: false,
                items: vec![
                    ListItem {
                        blocks: vec![paragraph(vec![text("one")])]
                    },
                    ListItem {
                        blocks: vec![
                            paragraph(vec![text("two")]),
                            Block::List(List {
                                ordered: true,
                                items: vec![ListItem {
                                    blocks: vec![paragraph(vec![text("inner")])]
                                }],
                            }),
                        ]
                    },
                ],
            })]
        );
    }

    #[test]
    fn code_block_keeps_lines() {
        assert_eq!(
            parse("```rust\nlet x = 1;\nlet y = 2;\n```"),
            vec![Block::CodeBlock {
                language: Some("rust".to_string()),
                lines: vec!["let x = 1;".to_string(), "let y = 2;".to_string()],
            }]
        );
    }

    #[test]
    fn table_is_unsupported() {
        let blocks = parse("| A | B |\n|---|---|\n| 1 | 2 |\n\nafter");
        assert_eq!(
            blocks,
            vec![
                Block::Unsupported("table".to_string()),
                paragraph(vec![text("after")]),
            ]
        );
    }

    #[test]
    fn html_block_is_kept_raw() {
        let blocks = parse("<div>hi</div>\n\nafter");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], Block::Html(html) if html.starts_with("<div>hi</div>")));
    }

    #[test]
    fn frontmatter_is_stripped() {
        assert_eq!(
            parse("---\ntitle: x\n---\n\nBody"),
            vec![paragraph(vec![text("Body")])]
        );
    }

    #[test]
    fn leading_rule_is_not_frontmatter() {
        assert_eq!(
            parse("---\n\nIntro\n\n---\n\nEnd"),
            vec![
                Block::Rule,
                paragraph(vec![text("Intro")]),
                Block::Rule,
                paragraph(vec![text("End")]),
            ]
        );
    }

    #[test]
    fn empty_input() {
        assert!(parse("").is_empty());
    }
}
