//! Generic line-oriented Markdown layout: fragment wrapping, line prefixing
//! and plain Markdown serialization of inline spans and tables. Renderers
//! dispatch per node themselves and call into this module for layout.

use crate::model::{DestForm, Span, Table};

/// A piece of rendered inline content. `wordwrap` marks whitespace inside the
/// fragment as a legal wrap point; delimiters and URLs stay atomic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub wordwrap: bool,
}

impl Fragment {
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            wordwrap: false,
        }
    }

    pub fn wrapped(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            wordwrap: true,
        }
    }
}

/// Lay fragments out into lines. Without a width, line breaks come only from
/// newlines embedded in the fragments; with one, wordwrap fragments are
/// re-flowed greedily.
pub fn fragments_to_lines(fragments: &[Fragment], max_width: Option<usize>) -> Vec<String> {
    match max_width {
        Some(width) => wrap_fragments(fragments, width),
        None => {
            let mut joined = String::new();
            for fragment in fragments {
                joined.push_str(&fragment.text);
            }
            joined.split('\n').map(str::to_string).collect()
        }
    }
}

fn wrap_fragments(fragments: &[Fragment], width: usize) -> Vec<String> {
    // A word is a maximal run that contains no break point. Adjacent
    // non-wordwrap fragments glue onto it.
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for fragment in fragments {
        if fragment.wordwrap {
            for ch in fragment.text.chars() {
                if ch.is_whitespace() {
                    if !current.is_empty() {
                        words.push(std::mem::take(&mut current));
                    }
                } else {
                    current.push(ch);
                }
            }
        } else {
            current.push_str(&fragment.text);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    for word in words {
        if line.is_empty() {
            line = word;
        } else if line.chars().count() + 1 + word.chars().count() <= width {
            line.push(' ');
            line.push_str(&word);
        } else {
            lines.push(std::mem::take(&mut line));
            line = word;
        }
    }
    lines.push(line);
    lines
}

/// Prefix the first line with `first` and the rest with `rest`. Lines that
/// are empty keep only the trimmed prefix, so quoted blank lines stay clean.
pub fn prefix_lines(lines: Vec<String>, first: &str, rest: &str) -> Vec<String> {
    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let prefix = if index == 0 { first } else { rest };
            if line.is_empty() {
                prefix.trim_end().to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect()
}

/// A fenced code block as lines, preserving the literal content verbatim.
pub fn fence_lines(literal: &str, language: Option<&str>) -> Vec<String> {
    let mut lines = vec![format!("```{}", language.unwrap_or_default())];
    lines.extend(literal.lines().map(str::to_string));
    lines.push("```".to_string());
    lines
}

/// Serialize spans back to plain Markdown inline syntax. Used where the
/// structured target has no richer representation than a literal, such as
/// tables re-encoded into a code fence.
pub fn span_text(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Text { content } => out.push_str(content),
            Span::InlineCode { content } => {
                out.push('`');
                out.push_str(content);
                out.push('`');
            }
            Span::Strong { children } => {
                out.push_str("**");
                out.push_str(&span_text(children));
                out.push_str("**");
            }
            Span::Emphasis { children } => {
                out.push('*');
                out.push_str(&span_text(children));
                out.push('*');
            }
            Span::Strikethrough { children } => {
                out.push_str("~~");
                out.push_str(&span_text(children));
                out.push_str("~~");
            }
            Span::Link {
                target,
                title,
                form,
                children,
            } => {
                out.push('[');
                out.push_str(&span_text(children));
                out.push(']');
                push_destination(&mut out, target, title.as_deref(), form);
            }
            Span::AutoLink { target, .. } => {
                out.push('<');
                out.push_str(target);
                out.push('>');
            }
            Span::Image { src, children, .. } => {
                out.push_str("![");
                out.push_str(&span_text(children));
                out.push_str("](");
                out.push_str(src);
                out.push(')');
            }
        }
    }
    out
}

fn push_destination(out: &mut String, target: &str, title: Option<&str>, form: &DestForm) {
    match form {
        DestForm::Direct => {
            out.push('(');
            out.push_str(target);
            if let Some(title) = title {
                out.push_str(" \"");
                out.push_str(title);
                out.push('"');
            }
            out.push(')');
        }
        DestForm::Angle => {
            out.push_str("(<");
            out.push_str(target);
            out.push('>');
            if let Some(title) = title {
                out.push_str(" \"");
                out.push_str(title);
                out.push('"');
            }
            out.push(')');
        }
        DestForm::Reference(label) => {
            out.push('[');
            out.push_str(label);
            out.push(']');
        }
        DestForm::Collapsed => out.push_str("[]"),
        DestForm::Bare => {}
    }
}

/// Serialize a table to aligned pipe-delimited Markdown lines, with a dash
/// separator after the header row.
pub fn table_to_lines(table: &Table) -> Vec<String> {
    let cell_texts: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.cells.iter().map(|cell| span_text(cell)).collect())
        .collect();
    let columns = cell_texts.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return Vec::new();
    }

    let mut widths = vec![3usize; columns];
    for row in &cell_texts {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }

    let mut lines = Vec::new();
    for (row_index, row) in cell_texts.iter().enumerate() {
        let cells: Vec<String> = (0..columns)
            .map(|index| {
                let text = row.get(index).map(String::as_str).unwrap_or_default();
                pad_cell(text, widths[index])
            })
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
        if row_index == 0 {
            let dashes: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
            lines.push(format!("| {} |", dashes.join(" | ")));
        }
    }
    lines
}

fn pad_cell(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.chars().count());
    format!("{text}{}", " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableRow;

    fn text(content: &str) -> Span {
        Span::Text {
            content: content.into(),
        }
    }

    #[test]
    fn unwrapped_lines_split_on_newlines() {
        let fragments = vec![Fragment::wrapped("one\ntwo")];
        assert_eq!(fragments_to_lines(&fragments, None), vec!["one", "two"]);
    }

    #[test]
    fn wrapping_keeps_delimiters_glued() {
        let fragments = vec![
            Fragment::wrapped("see the "),
            Fragment::raw("*"),
            Fragment::wrapped("docs"),
            Fragment::raw("*"),
        ];
        assert_eq!(
            fragments_to_lines(&fragments, Some(8)),
            vec!["see the", "*docs*"]
        );
    }

    #[test]
    fn raw_fragments_never_break() {
        let fragments = vec![Fragment::raw("<http://example.com/long|link text>")];
        assert_eq!(
            fragments_to_lines(&fragments, Some(5)),
            vec!["<http://example.com/long|link text>"]
        );
    }

    #[test]
    fn prefix_lines_trims_empty() {
        let lines = vec!["a".to_string(), String::new(), "b".to_string()];
        assert_eq!(
            prefix_lines(lines, "> ", "> "),
            vec!["> a", ">", "> b"]
        );
    }

    #[test]
    fn fence_lines_carry_language() {
        assert_eq!(
            fence_lines("x\ny\n", Some("rust")),
            vec!["```rust", "x", "y", "```"]
        );
    }

    #[test]
    fn span_text_reproduces_markdown() {
        let spans = vec![
            text("see "),
            Span::Strong {
                children: vec![text("bold")],
            },
            Span::Link {
                target: "http://a".into(),
                title: None,
                form: DestForm::Direct,
                children: vec![text("link")],
            },
        ];
        assert_eq!(span_text(&spans), "see **bold**[link](http://a)");
    }

    #[test]
    fn table_lines_align_columns() {
        let table = Table {
            rows: vec![
                TableRow {
                    cells: vec![vec![text("name")], vec![text("v")]],
                },
                TableRow {
                    cells: vec![vec![text("x")], vec![text("longer")]],
                },
            ],
        };
        assert_eq!(
            table_to_lines(&table),
            vec![
                "| name | v      |",
                "| ---- | ------ |",
                "| x    | longer |",
            ]
        );
    }
}
