//! pulldown-cmark adapter: folds the event stream into the shared tree.

use pulldown_cmark::{CodeBlockKind, Event, LinkType, Options, Parser, Tag, TagEnd};

use crate::model::{Block, DestForm, Document, List, ListItem, Span, Table, TableRow};

/// Parse Markdown text into a [`Document`].
pub fn parse(markdown: &str) -> Document {
    let markdown = strip_frontmatter(markdown);
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut builder = TreeBuilder::default();
    for event in Parser::new_ext(markdown, options) {
        builder.push(event);
    }
    Document {
        blocks: builder.finish(),
    }
}

/// Strip a leading YAML frontmatter fence before parsing.
fn strip_frontmatter(markdown: &str) -> &str {
    if !markdown.starts_with("---") {
        return markdown;
    }
    if let Some(end) = markdown[3..].find("\n---") {
        markdown[3 + end + 4..].trim_start_matches('\n')
    } else {
        markdown
    }
}

/// An inline span that has been opened but not yet closed.
enum OpenSpan {
    Strong,
    Emphasis,
    Strikethrough,
    /// `form` is `None` for autolinks.
    Link {
        target: String,
        title: Option<String>,
        form: Option<DestForm>,
    },
    Image {
        src: String,
        title: Option<String>,
    },
}

#[derive(Default)]
struct CodeAccum {
    literal: String,
    language: Option<String>,
    fenced: bool,
}

#[derive(Default)]
struct TableAccum {
    rows: Vec<TableRow>,
    current_row: Vec<Vec<Span>>,
}

#[derive(Default)]
struct TreeBuilder {
    /// Block container frames: document, then one per open quote or list item.
    frames: Vec<Vec<Block>>,
    /// Inline buffer for the innermost open span context.
    spans: Vec<Span>,
    /// Parent buffers of open styled spans, innermost last.
    span_stack: Vec<(OpenSpan, Vec<Span>)>,

    heading_level: Option<u8>,
    code: Option<CodeAccum>,
    html: Option<String>,
    list_stack: Vec<List>,
    table: Option<TableAccum>,
}

impl TreeBuilder {
    fn push(&mut self, event: Event) {
        match event {
            Event::Start(Tag::Paragraph) => {}
            Event::End(TagEnd::Paragraph) => self.flush_paragraph(),

            Event::Start(Tag::Heading { level, .. }) => {
                self.heading_level = Some(level as u8);
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(level) = self.heading_level.take() {
                    let spans = std::mem::take(&mut self.spans);
                    self.push_block(Block::Heading { level, spans });
                }
            }

            Event::Start(Tag::BlockQuote(_)) => self.frames.push(Vec::new()),
            Event::End(TagEnd::BlockQuote(_)) => {
                let children = self.frames.pop().unwrap_or_default();
                self.push_block(Block::Quote { children });
            }

            Event::Start(Tag::List(start)) => {
                // Tight list items carry their text without paragraph tags;
                // flush it so the item paragraph precedes the nested list.
                self.flush_paragraph();
                self.list_stack.push(List {
                    start,
                    items: Vec::new(),
                });
            }
            Event::End(TagEnd::List(_)) => {
                if let Some(list) = self.list_stack.pop() {
                    self.push_block(Block::List(list));
                }
            }
            Event::Start(Tag::Item) => self.frames.push(Vec::new()),
            Event::End(TagEnd::Item) => {
                self.flush_paragraph();
                let children = self.frames.pop().unwrap_or_default();
                if let Some(list) = self.list_stack.last_mut() {
                    list.items.push(ListItem { children });
                }
            }

            Event::Start(Tag::CodeBlock(kind)) => {
                let (fenced, language) = match kind {
                    CodeBlockKind::Fenced(lang) => {
                        let lang = lang.into_string();
                        (true, if lang.is_empty() { None } else { Some(lang) })
                    }
                    CodeBlockKind::Indented => (false, None),
                };
                self.code = Some(CodeAccum {
                    literal: String::new(),
                    language,
                    fenced,
                });
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(code) = self.code.take() {
                    self.push_block(Block::CodeBlock {
                        literal: code.literal,
                        language: code.language,
                        fenced: code.fenced,
                    });
                }
            }

            Event::Start(Tag::HtmlBlock) => self.html = Some(String::new()),
            Event::End(TagEnd::HtmlBlock) => {
                if let Some(literal) = self.html.take() {
                    self.push_block(Block::RawHtml { literal });
                }
            }

            Event::Start(Tag::Table(_)) => self.table = Some(TableAccum::default()),
            Event::End(TagEnd::Table) => {
                if let Some(table) = self.table.take() {
                    self.push_block(Block::Table(Table { rows: table.rows }));
                }
            }
            Event::Start(Tag::TableHead) | Event::Start(Tag::TableRow) => {
                if let Some(table) = self.table.as_mut() {
                    table.current_row.clear();
                }
            }
            Event::End(TagEnd::TableHead) | Event::End(TagEnd::TableRow) => {
                if let Some(table) = self.table.as_mut() {
                    let cells = std::mem::take(&mut table.current_row);
                    table.rows.push(TableRow { cells });
                }
            }
            Event::Start(Tag::TableCell) => {}
            Event::End(TagEnd::TableCell) => {
                let cell = std::mem::take(&mut self.spans);
                if let Some(table) = self.table.as_mut() {
                    table.current_row.push(cell);
                }
            }

            Event::Start(Tag::Strong) => self.open_span(OpenSpan::Strong),
            Event::End(TagEnd::Strong) => self.close_span(),
            Event::Start(Tag::Emphasis) => self.open_span(OpenSpan::Emphasis),
            Event::End(TagEnd::Emphasis) => self.close_span(),
            Event::Start(Tag::Strikethrough) => self.open_span(OpenSpan::Strikethrough),
            Event::End(TagEnd::Strikethrough) => self.close_span(),

            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                let form = match link_type {
                    LinkType::Autolink | LinkType::Email => None,
                    other => Some(dest_form(other, &id)),
                };
                self.open_span(OpenSpan::Link {
                    target: dest_url.into_string(),
                    title: non_empty(title.into_string()),
                    form,
                });
            }
            Event::End(TagEnd::Link) => self.close_span(),

            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => self.open_span(OpenSpan::Image {
                src: dest_url.into_string(),
                title: non_empty(title.into_string()),
            }),
            Event::End(TagEnd::Image) => self.close_span(),

            Event::Text(text) => {
                if let Some(code) = self.code.as_mut() {
                    code.literal.push_str(&text);
                } else if let Some(html) = self.html.as_mut() {
                    html.push_str(&text);
                } else {
                    self.spans.push(Span::Text {
                        content: text.into_string(),
                    });
                }
            }
            Event::Code(content) => self.spans.push(Span::InlineCode {
                content: content.into_string(),
            }),
            Event::Html(html) => {
                if let Some(buffer) = self.html.as_mut() {
                    buffer.push_str(&html);
                } else {
                    self.push_block(Block::RawHtml {
                        literal: html.into_string(),
                    });
                }
            }
            Event::InlineHtml(html) => self.spans.push(Span::Text {
                content: html.into_string(),
            }),
            Event::SoftBreak | Event::HardBreak => self.spans.push(Span::Text {
                content: "\n".into(),
            }),
            Event::Rule => self.push_block(Block::ThematicBreak),

            // Footnotes, task markers, math and metadata have no counterpart
            // in the model and contribute no output.
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_paragraph();
        while self.frames.len() > 1 {
            let children = self.frames.pop().unwrap_or_default();
            if let Some(parent) = self.frames.last_mut() {
                parent.extend(children);
            }
        }
        self.frames.pop().unwrap_or_default()
    }

    fn push_block(&mut self, block: Block) {
        if self.frames.is_empty() {
            self.frames.push(Vec::new());
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.push(block);
        }
    }

    fn flush_paragraph(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.spans);
        self.push_block(Block::Paragraph { spans });
    }

    fn open_span(&mut self, open: OpenSpan) {
        let parent = std::mem::take(&mut self.spans);
        self.span_stack.push((open, parent));
    }

    fn close_span(&mut self) {
        let children = std::mem::take(&mut self.spans);
        let Some((open, parent)) = self.span_stack.pop() else {
            self.spans = children;
            return;
        };
        self.spans = parent;
        let span = match open {
            OpenSpan::Strong => Span::Strong { children },
            OpenSpan::Emphasis => Span::Emphasis { children },
            OpenSpan::Strikethrough => Span::Strikethrough { children },
            OpenSpan::Link {
                target,
                title,
                form: Some(form),
            } => Span::Link {
                target,
                title,
                form,
                children,
            },
            OpenSpan::Link {
                target, form: None, ..
            } => Span::AutoLink { target, children },
            OpenSpan::Image { src, title } => Span::Image {
                src,
                title,
                children,
            },
        };
        self.spans.push(span);
    }
}

fn dest_form(link_type: LinkType, id: &str) -> DestForm {
    match link_type {
        LinkType::Inline => DestForm::Direct,
        LinkType::Reference | LinkType::ReferenceUnknown => DestForm::Reference(id.to_string()),
        LinkType::Collapsed | LinkType::CollapsedUnknown => DestForm::Collapsed,
        LinkType::Shortcut | LinkType::ShortcutUnknown => DestForm::Bare,
        _ => DestForm::Direct,
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
