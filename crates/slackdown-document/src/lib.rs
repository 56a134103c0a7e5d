//! Shared Markdown document tree for the slackdown renderers.
//! This crate owns the parsing collaborator (a pulldown-cmark adapter that
//! builds the tree) and the generic line-layout writer both renderers lean on.

pub mod model;
pub mod parse;
pub mod writer;

pub use model::{Block, DestForm, Document, List, ListItem, Span, Table, TableRow};
pub use parse::parse;
