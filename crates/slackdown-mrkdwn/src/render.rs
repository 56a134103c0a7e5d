//! Document → mrkdwn text. One dispatch arm per block/span variant; layout
//! (wrapping, prefixing, tables, fences) comes from the document writer.

use slackdown_document::writer::{self, Fragment};
use slackdown_document::{Block, DestForm, Document, List, ListItem, Span};

use crate::escape::{encode_urls, escape_text};

/// Render a document to a single mrkdwn blob with no line wrapping.
pub fn render(document: &Document) -> String {
    render_with_width(document, None)
}

/// Render a document to mrkdwn, wrapping prose at `max_width` columns when
/// one is given. Headings are never wrapped.
pub fn render_with_width(document: &Document, max_width: Option<usize>) -> String {
    let mut lines = Vec::new();
    for (index, block) in document.blocks.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        lines.extend(block_lines(block, max_width));
    }
    lines.join("\n")
}

fn block_lines(block: &Block, max_width: Option<usize>) -> Vec<String> {
    match block {
        Block::Heading { level, spans } => vec![heading_line(*level, spans)],
        Block::Paragraph { spans } => {
            writer::fragments_to_lines(&span_fragments(spans), max_width)
        }
        Block::Quote { children } => {
            let inner_width = max_width.map(|width| width.saturating_sub(2));
            let mut inner = Vec::new();
            for (index, child) in children.iter().enumerate() {
                if index > 0 {
                    inner.push(String::new());
                }
                inner.extend(block_lines(child, inner_width));
            }
            writer::prefix_lines(inner, "> ", "> ")
        }
        Block::CodeBlock {
            literal, language, ..
        } => writer::fence_lines(literal, language.as_deref()),
        Block::List(list) => list_lines(list, max_width),
        Block::Table(table) => writer::table_to_lines(table),
        Block::ThematicBreak => vec!["---".to_string()],
        Block::RawHtml { literal } => literal.lines().map(str::to_string).collect(),
    }
}

/// Headings always fit on one line: `level` asterisks on both ends.
fn heading_line(level: u8, spans: &[Span]) -> String {
    let delimiter = "*".repeat(level as usize);
    let text: String = span_fragments(spans)
        .into_iter()
        .map(|fragment| fragment.text)
        .collect();
    format!("{delimiter}{text}{delimiter}")
}

fn list_lines(list: &List, max_width: Option<usize>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut ordinal = list.start;
    for item in &list.items {
        let leader = match ordinal.as_mut() {
            Some(n) => {
                let leader = format!("{n}.");
                *n += 1;
                leader
            }
            // The platform renders `-`/`*` literally, so bullet leaders
            // become a bullet glyph.
            None => "•".to_string(),
        };
        lines.extend(item_lines(item, &leader, max_width));
    }
    lines
}

/// The leader is right-padded to the item's prepend width so wrapped
/// continuation lines (and nested blocks) stay aligned.
fn item_lines(item: &ListItem, leader: &str, max_width: Option<usize>) -> Vec<String> {
    let prepend = leader.chars().count() + 1;
    let child_width = max_width.map(|width| width.saturating_sub(prepend));
    let mut inner = Vec::new();
    for child in &item.children {
        inner.extend(block_lines(child, child_width));
    }
    if inner.is_empty() {
        inner.push(String::new());
    }
    writer::prefix_lines(inner, &format!("{leader} "), &" ".repeat(prepend))
}

fn span_fragments(spans: &[Span]) -> Vec<Fragment> {
    let mut out = Vec::new();
    collect_fragments(spans, &mut out);
    out
}

fn collect_fragments(spans: &[Span], out: &mut Vec<Fragment>) {
    for span in spans {
        match span {
            Span::Text { content } => {
                out.push(Fragment::wrapped(encode_urls(&escape_text(content))));
            }
            // Code content stays literal: no escaping, styling or URL wrap.
            Span::InlineCode { content } => out.push(Fragment::raw(format!("`{content}`"))),
            Span::Strong { children } => embed_span(out, "*", children),
            Span::Emphasis { children } => embed_span(out, "_", children),
            Span::Strikethrough { children } => embed_span(out, "~", children),
            Span::Link {
                target,
                title,
                form,
                children,
            } => link_fragments(out, target, title.as_deref(), form, children),
            Span::AutoLink { target, children } => {
                link_fragments(out, target, None, &DestForm::Direct, children)
            }
            // The dialect has no image syntax; images render as plain links.
            Span::Image {
                src,
                title,
                children,
            } => link_fragments(out, src, title.as_deref(), &DestForm::Direct, children),
        }
    }
}

fn embed_span(out: &mut Vec<Fragment>, delimiter: &str, children: &[Span]) {
    out.push(Fragment::raw(delimiter));
    collect_fragments(children, out);
    out.push(Fragment::raw(delimiter));
}

/// Shared link/image formatter. Each destination form keeps the bracket
/// convention the source used; all forms converge on `<destination|text>`.
fn link_fragments(
    out: &mut Vec<Fragment>,
    target: &str,
    title: Option<&str>,
    form: &DestForm,
    children: &[Span],
) {
    if target.is_empty() {
        collect_fragments(children, out);
        return;
    }

    out.push(Fragment::raw("<"));
    match form {
        DestForm::Direct => push_destination(out, target.to_string(), title),
        DestForm::Angle => push_destination(out, format!("<{target}>"), title),
        DestForm::Reference(label) => {
            out.push(Fragment::raw("["));
            out.push(Fragment::wrapped(label));
            out.push(Fragment::raw("]"));
        }
        DestForm::Collapsed => out.push(Fragment::raw("[]")),
        DestForm::Bare => {}
    }
    out.push(Fragment::raw("|"));
    collect_fragments(children, out);
    out.push(Fragment::raw(">"));
}

fn push_destination(out: &mut Vec<Fragment>, destination: String, title: Option<&str>) {
    out.push(Fragment::raw(destination));
    if let Some(title) = title {
        out.push(Fragment::wrapped(" "));
        out.push(Fragment::raw("\""));
        out.push(Fragment::wrapped(title));
        out.push(Fragment::raw("\""));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slackdown_document::parse;

    #[test]
    fn strong_autolink_example() {
        let doc = parse("Visit www.example.com for *docs*");
        assert_eq!(render(&doc), "Visit <www.example.com> for *docs*");
    }

    #[test]
    fn plain_text_round_trip_only_escapes_entities() {
        let doc = parse("tom & jerry are 1 < 2 but 3 > 2");
        assert_eq!(
            render(&doc),
            "tom &amp; jerry are 1 &lt; 2 but 3 &gt; 2"
        );
    }

    #[test]
    fn strong_wraps_in_asterisks() {
        assert_eq!(render(&parse("**bold** and _em_ and ~~gone~~")), "*bold* and _em_ and ~gone~");
    }

    #[test]
    fn heading_delimited_by_level_asterisks() {
        assert_eq!(render(&parse("# Top")), "*Top*");
        assert_eq!(render(&parse("### Deep")), "***Deep***");
    }

    #[test]
    fn inline_link_becomes_platform_syntax() {
        assert_eq!(
            render(&parse("[docs](http://example.com)")),
            "<http://example.com|docs>"
        );
    }

    #[test]
    fn reference_link_keeps_label_form() {
        assert_eq!(
            render(&parse("[docs][ref]\n\n[ref]: http://example.com")),
            "<[ref]|docs>"
        );
    }

    #[test]
    fn collapsed_link_keeps_empty_label() {
        assert_eq!(
            render(&parse("[docs][]\n\n[docs]: http://example.com")),
            "<[]|docs>"
        );
    }

    #[test]
    fn image_renders_without_image_marker() {
        assert_eq!(
            render(&parse("![alt](http://x/p.png)")),
            "<http://x/p.png|alt>"
        );
    }

    #[test]
    fn empty_destination_renders_children_bare() {
        let doc = Document {
            blocks: vec![Block::Paragraph {
                spans: vec![Span::Link {
                    target: String::new(),
                    title: None,
                    form: DestForm::Direct,
                    children: vec![Span::Text {
                        content: "just text".into(),
                    }],
                }],
            }],
        };
        assert_eq!(render(&doc), "just text");
    }

    #[test]
    fn bullet_list_uses_bullet_glyph() {
        assert_eq!(render(&parse("- one\n- two")), "• one\n• two");
    }

    #[test]
    fn ordered_list_counts_from_start() {
        assert_eq!(render(&parse("3. three\n4. four")), "3. three\n4. four");
    }

    #[test]
    fn nested_list_aligns_to_prepend_width() {
        assert_eq!(render(&parse("- a\n  - b")), "• a\n  • b");
    }

    #[test]
    fn wrapped_continuation_lines_align() {
        let doc = parse("- alpha beta gamma delta");
        assert_eq!(
            render_with_width(&doc, Some(14)),
            "• alpha beta\n  gamma delta"
        );
    }

    #[test]
    fn quote_and_code_use_generic_layout() {
        assert_eq!(render(&parse("> quoted")), "> quoted");
        assert_eq!(
            render(&parse("```sh\nls -l\n```")),
            "```sh\nls -l\n```"
        );
    }

    #[test]
    fn code_content_is_never_styled_or_escaped() {
        assert_eq!(
            render(&parse("```\na < b && *c*\n```")),
            "```\na < b && *c*\n```"
        );
        assert_eq!(render(&parse("use `a<b>` here")), "use `a<b>` here");
    }

    #[test]
    fn blocks_are_separated_by_blank_lines() {
        assert_eq!(render(&parse("one\n\ntwo")), "one\n\ntwo");
    }

    #[test]
    fn thematic_break_renders_dashes() {
        assert_eq!(render(&parse("a\n\n---\n\nb")), "a\n\n---\n\nb");
    }
}
