use serde_json::json;
use slackdown_blockkit::Block;

use crate::config::WebhookConfig;
use crate::DeliveryError;

/// Payload for a typed block message.
pub fn blocks_payload(blocks: &[Block]) -> serde_json::Value {
    json!({ "blocks": blocks })
}

/// Payload for plain mrkdwn text, wrapped in a single section block.
pub fn text_payload(text: &str) -> serde_json::Value {
    json!({
        "blocks": [
            {
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": text,
                },
            },
        ],
    })
}

/// Posts rendered blocks to the webhook for `channel` (`None` uses the
/// default channel).
pub fn send_blocks(
    config: &WebhookConfig,
    channel: Option<&str>,
    blocks: &[Block],
) -> Result<(), DeliveryError> {
    post(config.resolve(channel)?, &blocks_payload(blocks))
}

/// Posts mrkdwn text to the webhook for `channel`.
pub fn send_text(
    config: &WebhookConfig,
    channel: Option<&str>,
    text: &str,
) -> Result<(), DeliveryError> {
    post(config.resolve(channel)?, &text_payload(text))
}

fn post(url: &str, payload: &serde_json::Value) -> Result<(), DeliveryError> {
    let body = payload.to_string();
    match ureq::post(url)
        .header("Content-Type", "application/json")
        .send(body.as_str())
    {
        Ok(_) => Ok(()),
        Err(ureq::Error::StatusCode(code)) => Err(DeliveryError::Status(code)),
        Err(err) => Err(DeliveryError::Transport(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slackdown_blockkit::Block;

    #[test]
    fn text_payload_wraps_content_in_a_section() {
        assert_eq!(
            text_payload("hello &amp; goodbye"),
            json!({
                "blocks": [
                    {
                        "type": "section",
                        "text": { "type": "mrkdwn", "text": "hello &amp; goodbye" },
                    },
                ],
            })
        );
    }

    #[test]
    fn blocks_payload_serializes_typed_blocks() {
        let blocks = vec![Block::section("hi"), Block::Divider];
        assert_eq!(
            blocks_payload(&blocks),
            json!({
                "blocks": [
                    { "type": "section", "text": { "type": "mrkdwn", "text": "hi" } },
                    { "type": "divider" },
                ],
            })
        );
    }
}
