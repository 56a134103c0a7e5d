//! Document → Block Kit walk: per-block dispatch, image hoisting and the two
//! inline algorithms (flat mrkdwn string, styled leaf records).

use slackdown_document::{model, writer, Block as Node, Document, List, ListItem, Span};

use crate::blocks::{Block, Leaf, LeafStyle, ListStyle, MrkdwnText, PlainText, RichTextElement};

/// Render a document into an ordered sequence of Block Kit blocks.
///
/// Pure function of the input tree; node shapes with no mapping contribute no
/// output rather than failing.
pub fn render(document: &Document) -> Vec<Block> {
    let mut out = Vec::new();
    for block in &document.blocks {
        render_block(block, &mut out);
    }
    out
}

fn render_block(block: &Node, out: &mut Vec<Block>) {
    match block {
        Node::Heading { level, spans } => heading_blocks(*level, spans, out),
        Node::Quote { children } => quote_blocks(children, out),
        Node::Paragraph { spans } => paragraph_blocks(spans, out),
        Node::CodeBlock { literal, .. } => out.push(fenced_section(literal)),
        Node::List(list) => list_blocks(list, 0, out),
        Node::Table(table) => table_block(table, out),
        Node::ThematicBreak => out.push(Block::Divider),
        Node::RawHtml { literal } => out.push(fenced_section(literal)),
    }
}

fn heading_blocks(level: u8, spans: &[Span], out: &mut Vec<Block>) {
    let text = model::plain_text(spans);
    if level == 1 {
        out.push(Block::Header {
            text: PlainText::new(text),
        });
    } else {
        out.push(Block::RichText {
            elements: vec![RichTextElement::RichTextSection {
                elements: vec![Leaf::Text {
                    text,
                    style: LeafStyle::bold(),
                }],
            }],
        });
    }
    hoist_images(spans, out);
}

fn paragraph_blocks(spans: &[Span], out: &mut Vec<Block>) {
    let text = spans_to_mrkdwn(spans);
    // A paragraph holding only hoisted content would leave an empty section,
    // which the target format rejects.
    if !text.is_empty() {
        out.push(Block::section(text));
    }
    hoist_images(spans, out);
}

fn quote_blocks(children: &[Node], out: &mut Vec<Block>) {
    let mut lines = Vec::new();
    let mut images = Vec::new();
    quote_lines(children, &mut lines, &mut images);
    if !lines.is_empty() {
        let text: Vec<String> = lines.into_iter().map(|line| format!("> {line}")).collect();
        out.push(Block::section(text.join("\n")));
    }
    out.extend(images);
}

fn quote_lines(children: &[Node], lines: &mut Vec<String>, images: &mut Vec<Block>) {
    for child in children {
        match child {
            Node::Paragraph { spans } | Node::Heading { spans, .. } => {
                lines.extend(spans_to_mrkdwn(spans).split('\n').map(str::to_string));
                hoist_images(spans, images);
            }
            Node::Quote { children } => {
                let mut inner = Vec::new();
                quote_lines(children, &mut inner, images);
                lines.extend(inner.into_iter().map(|line| format!("> {line}")));
            }
            // No mrkdwn-in-quote rendering for the remaining shapes.
            _ => {}
        }
    }
}

fn fenced_section(literal: &str) -> Block {
    Block::section(format!("```{literal}```"))
}

fn table_block(table: &model::Table, out: &mut Vec<Block>) {
    // Block Kit has no native table; re-encode it as a Markdown literal.
    let lines = writer::table_to_lines(table);
    if !lines.is_empty() {
        out.push(Block::section(format!("```{}\n```", lines.join("\n"))));
    }
}

fn list_blocks(list: &List, indent: u32, out: &mut Vec<Block>) {
    let style = if list.ordered() {
        ListStyle::Ordered
    } else {
        ListStyle::Bullet
    };
    for item in &list.items {
        item_blocks(item, style, indent, out);
    }
}

fn item_blocks(item: &ListItem, style: ListStyle, indent: u32, out: &mut Vec<Block>) {
    // First child is the item's paragraph, optional second a nested list.
    let spans: &[Span] = match item.children.first() {
        Some(Node::Paragraph { spans }) => spans,
        _ => &[],
    };
    out.push(Block::RichText {
        elements: vec![RichTextElement::RichTextList {
            style,
            indent,
            elements: vec![RichTextElement::RichTextSection {
                elements: spans_to_leaves(spans),
            }],
        }],
    });
    // Images hoisted from the item's paragraph come before the nested
    // sub-list's own blocks.
    hoist_images(spans, out);
    if let Some(Node::List(nested)) = item.children.get(1) {
        list_blocks(nested, indent + 1, out);
    }
}

/// Flat-string inline mode, used for section and quote text. Images never
/// contribute inline content.
fn spans_to_mrkdwn(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Text { content } => out.push_str(content),
            Span::InlineCode { content } => {
                out.push('`');
                out.push_str(content);
                out.push('`');
            }
            Span::Strong { children } => wrap_delimited(&mut out, '*', children),
            Span::Emphasis { children } => wrap_delimited(&mut out, '_', children),
            Span::Strikethrough { children } => wrap_delimited(&mut out, '~', children),
            Span::Link {
                target, children, ..
            }
            | Span::AutoLink { target, children } => {
                out.push('<');
                out.push_str(target);
                out.push('|');
                out.push_str(&spans_to_mrkdwn(children));
                out.push('>');
            }
            Span::Image { .. } => {}
        }
    }
    out
}

fn wrap_delimited(out: &mut String, delimiter: char, children: &[Span]) {
    out.push(delimiter);
    out.push_str(&spans_to_mrkdwn(children));
    out.push(delimiter);
}

/// Leaf-record inline mode, used inside rich_text blocks. Children render
/// first; the current span's effect is then merged onto every returned leaf,
/// so nested style flags accumulate and outer link targets win.
fn spans_to_leaves(spans: &[Span]) -> Vec<Leaf> {
    let mut out = Vec::new();
    for span in spans {
        match span {
            Span::Text { content } => out.push(Leaf::text(content.clone())),
            Span::InlineCode { content } => {
                out.push(Leaf::text(content.clone()).styled(|style| style.code = true))
            }
            Span::Strong { children } => {
                extend_styled(&mut out, children, |style| style.bold = true)
            }
            Span::Emphasis { children } => {
                extend_styled(&mut out, children, |style| style.italic = true)
            }
            Span::Strikethrough { children } => {
                extend_styled(&mut out, children, |style| style.strike = true)
            }
            Span::Link {
                target, children, ..
            }
            | Span::AutoLink { target, children } => {
                out.extend(
                    spans_to_leaves(children)
                        .into_iter()
                        .map(|leaf| leaf.linked(target)),
                );
            }
            Span::Image { .. } => {}
        }
    }
    out
}

fn extend_styled(out: &mut Vec<Leaf>, children: &[Span], apply: impl Fn(&mut LeafStyle) + Copy) {
    out.extend(
        spans_to_leaves(children)
            .into_iter()
            .map(|leaf| leaf.styled(apply)),
    );
}

/// Emit an image block for every image discoverable in `spans`, in document
/// order, recursing through every span subtree.
fn hoist_images(spans: &[Span], out: &mut Vec<Block>) {
    for span in spans {
        match span {
            Span::Image {
                src,
                title,
                children,
            } => {
                let alt = image_alt(title.as_deref(), children);
                out.push(Block::Image {
                    title: PlainText::new(alt.clone()),
                    image_url: if src.is_empty() {
                        None
                    } else {
                        Some(src.clone())
                    },
                    alt_text: alt,
                });
                hoist_images(children, out);
            }
            Span::Strong { children }
            | Span::Emphasis { children }
            | Span::Strikethrough { children }
            | Span::Link { children, .. }
            | Span::AutoLink { children, .. } => hoist_images(children, out),
            Span::Text { .. } | Span::InlineCode { .. } => {}
        }
    }
}

/// Display text fallback: explicit title, then the image's own plain-text
/// content, then a single space. The result is never empty.
fn image_alt(title: Option<&str>, children: &[Span]) -> String {
    if let Some(title) = title {
        if !title.is_empty() {
            return title.to_string();
        }
    }
    let text = model::plain_text(children);
    if text.is_empty() { " ".to_string() } else { text }
}
