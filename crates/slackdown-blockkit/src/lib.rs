//! Block Kit renderer: turns a parsed Markdown document into the ordered
//! block sequence Slack's structured message surface consumes.

pub mod blocks;
pub mod render;

pub use blocks::{Block, Leaf, LeafStyle, ListStyle, MrkdwnText, PlainText, RichTextElement};
pub use render::render;
