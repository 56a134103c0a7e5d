//! Delivers rendered messages to Slack incoming webhooks.
//!
//! Configuration is explicit: callers build a [`WebhookConfig`] (usually
//! via [`WebhookConfig::from_env`]) and pass it to the send functions.

mod config;
mod delivery;

use thiserror::Error;

pub use config::{WebhookConfig, WEBHOOKS_ENV};
pub use delivery::{blocks_payload, send_blocks, send_text, text_payload};

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("no webhooks provided via environment variable {WEBHOOKS_ENV}")]
    MissingConfig,
    #[error("invalid webhook configuration: {0}")]
    InvalidConfig(String),
    #[error("no webhook configured for channel {0}")]
    UnknownChannel(String),
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),
    #[error("webhook returned status {0}")]
    Status(u16),
}
