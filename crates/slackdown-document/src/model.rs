//! Block and span tree produced by the parser and consumed read-only by the
//! renderers. Rendering never mutates a node; output is built fresh per call.

/// An ordered sequence of top-level blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// Block-level node.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    Quote { children: Vec<Block> },
    Paragraph { spans: Vec<Span> },
    /// Code content is kept literal; it never runs through span styling.
    CodeBlock {
        literal: String,
        language: Option<String>,
        fenced: bool,
    },
    List(List),
    Table(Table),
    ThematicBreak,
    /// Opaque HTML, never interpreted.
    RawHtml { literal: String },
}

/// A list. `start` carries the ordinal of the first item for ordered lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List {
    pub start: Option<u64>,
    pub items: Vec<ListItem>,
}

impl List {
    pub fn ordered(&self) -> bool {
        self.start.is_some()
    }
}

/// A list item. The first child is the item's paragraph; an optional second
/// child is a nested list. Nesting is structural, not a depth counter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItem {
    pub children: Vec<Block>,
}

/// A table. The first row is the header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    pub cells: Vec<Vec<Span>>,
}

/// Inline node.
#[derive(Debug, Clone, PartialEq)]
pub enum Span {
    Text { content: String },
    Strong { children: Vec<Span> },
    Emphasis { children: Vec<Span> },
    Strikethrough { children: Vec<Span> },
    InlineCode { content: String },
    Link {
        target: String,
        title: Option<String>,
        form: DestForm,
        children: Vec<Span>,
    },
    AutoLink { target: String, children: Vec<Span> },
    Image {
        src: String,
        title: Option<String>,
        children: Vec<Span>,
    },
}

/// How the source wrote a link destination. Mirrors the parser's own
/// classification so a serializer can reproduce the bracket convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestForm {
    /// `[text](dest)`
    Direct,
    /// `[text](<dest>)`
    Angle,
    /// `[text][label]`
    Reference(String),
    /// `[text][]`
    Collapsed,
    /// `[text]`
    Bare,
}

/// Recursively flattens spans to their plain text content, with no style
/// interpretation. Images contribute nothing.
pub fn plain_text(spans: &[Span]) -> String {
    let mut out = String::new();
    collect_plain_text(spans, &mut out);
    out
}

fn collect_plain_text(spans: &[Span], out: &mut String) {
    for span in spans {
        match span {
            Span::Text { content } | Span::InlineCode { content } => out.push_str(content),
            Span::Strong { children }
            | Span::Emphasis { children }
            | Span::Strikethrough { children }
            | Span::Link { children, .. }
            | Span::AutoLink { children, .. } => collect_plain_text(children, out),
            Span::Image { .. } => {}
        }
    }
}
