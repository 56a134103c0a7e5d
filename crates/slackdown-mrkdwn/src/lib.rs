//! Renders a parsed Markdown document as Slack mrkdwn text.
//!
//! mrkdwn is close to Markdown but not compatible with it: bold is `*`,
//! italic is `_`, strikethrough is `~`, links are `<url|text>`, and the
//! only HTML entities are `&amp;`, `&lt;` and `&gt;`. Constructs the
//! dialect cannot express (headings, images, tables) degrade to the
//! nearest textual form.

mod escape;
mod render;

pub use escape::{encode_urls, escape_text};
pub use render::{render, render_with_width};
