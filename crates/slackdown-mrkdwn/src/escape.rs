//! Raw text preparation for the mrkdwn dialect: entity escaping and bare-URL
//! detection.

use once_cell::sync::Lazy;
use regex::Regex;

/// Replace the platform's control characters with entity equivalents. This
/// must run before URL wrapping so a literal `&` inside a URL is already
/// escaped when the angle brackets are added.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Bounded-lookahead URL pattern: `http://`, `https://`, `ftp://` or a
/// `www.`-prefixed token, with balanced-parenthesis tolerance and trailing
/// punctuation excluded.
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?xi)
        \b((?:https?://|www\d{0,3}[.]|ftp://)
        (?:[^\s()<>]+|\((?:[^\s()<>]+|(?:\([^\s()<>]+\)))*\))+
        (?:\((?:[^\s()<>]+|(?:\([^\s()<>]+\)))*\)|[^\s`!()\[\]{};:'".,<>?«»“”‘’]))"#,
    )
    .expect("url pattern compiles")
});

/// Wrap every bare URL in angle brackets so the platform auto-links it.
pub fn encode_urls(text: &str) -> String {
    URL_PATTERN.replace_all(text, "<$1>").into_owned()
}
