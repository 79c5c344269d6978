/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq)]
pub enum Span {
    Text(String),
    Bold(Vec<Span>),
    Italic(Vec<Span>),
    Code(String),
    Link { url: String, content: Vec<Span> },
    Image { url: String, alt: Vec<Span> },
    LineBreak,
    /// Inline construct the renderer has no presentation for (e.g. inline HTML)
    Unsupported(String),
}

/// A single list item, which holds its own block sequence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItem {
    pub blocks: Vec<Block>,
}

/// A list (ordered or unordered)
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

/// Block-level elements parsed from Markdown
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        level: u8,
        content: Vec<Span>,
    },
    Paragraph {
        content: Vec<Span>,
    },
    Quote(Vec<Block>),
    CodeBlock {
        language: Option<String>,
        lines: Vec<String>,
    },
    List(List),
    Rule,
    /// Raw HTML block, kept verbatim but never rendered
    Html(String),
    /// Block construct the renderer has no presentation for (e.g. tables)
    Unsupported(String),
}

impl Block {
    /// Short name of the block kind, used in diagnostics.
    pub fn kind(&self) -> &str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::Quote(_) => "quote",
            Block::CodeBlock { .. } => "code",
            Block::List(_) => "list",
            Block::Rule => "rule",
            Block::Html(_) => "html",
            Block::Unsupported(kind) => kind,
        }
    }
}
