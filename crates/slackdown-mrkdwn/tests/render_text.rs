use slackdown_document::parse;
use slackdown_mrkdwn::{render, render_with_width};

#[test]
fn release_note_document() {
    let doc = parse(
        "# Release 1.2\n\n\
         See the [changelog](https://example.com/log) & upgrade notes.\n\n\
         ## Fixes\n\n\
         - crash on empty input\n\
         - slow startup at www.example.com\n\n\
         ```sh\ncargo install tool\n```",
    );
    assert_eq!(
        render(&doc),
        "*Release 1.2*\n\
         \n\
         See the <https://example.com/log|changelog> &amp; upgrade notes.\n\
         \n\
         **Fixes**\n\
         \n\
         • crash on empty input\n\
         • slow startup at <www.example.com>\n\
         \n\
         ```sh\ncargo install tool\n```"
    );
}

#[test]
fn quoted_paragraph_wraps_inside_the_prefix() {
    let doc = parse("> alpha beta gamma delta epsilon");
    assert_eq!(
        render_with_width(&doc, Some(14)),
        "> alpha beta\n> gamma delta\n> epsilon"
    );
}

#[test]
fn table_renders_as_padded_grid() {
    let doc = parse("| name | age |\n| --- | --- |\n| bob | 7 |");
    assert_eq!(
        render(&doc),
        "| name | age |\n| ---- | --- |\n| bob  | 7   |"
    );
}

#[test]
fn link_inside_styled_text_keeps_both_markers() {
    let doc = parse("**see [docs](http://example.com)**");
    assert_eq!(render(&doc), "*see <http://example.com|docs>*");
}
