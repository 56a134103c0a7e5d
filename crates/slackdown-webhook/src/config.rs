use std::env;

use crate::DeliveryError;

/// Environment variable holding the webhook table. Either a bare URL or a
/// JSON object mapping channel names to URLs; the first entry is the
/// default channel.
pub const WEBHOOKS_ENV: &str = "SLACK_WEBHOOKS";

/// Channel-name → webhook-URL table, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    entries: Vec<(String, String)>,
}

impl WebhookConfig {
    /// Reads the table from `SLACK_WEBHOOKS`.
    pub fn from_env() -> Result<Self, DeliveryError> {
        match env::var(WEBHOOKS_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::parse(&raw),
            _ => Err(DeliveryError::MissingConfig),
        }
    }

    /// A value containing `{` is a JSON object of named webhooks; anything
    /// else is a single unnamed URL.
    pub fn parse(raw: &str) -> Result<Self, DeliveryError> {
        let entries = if raw.contains('{') {
            let table: serde_json::Map<String, serde_json::Value> = serde_json::from_str(raw)
                .map_err(|err| DeliveryError::InvalidConfig(err.to_string()))?;
            let mut entries = Vec::with_capacity(table.len());
            for (channel, value) in table {
                let url = value
                    .as_str()
                    .ok_or_else(|| {
                        DeliveryError::InvalidConfig(format!(
                            "webhook for channel {channel} is not a string"
                        ))
                    })?
                    .to_string();
                entries.push((channel, url));
            }
            entries
        } else {
            vec![(String::new(), raw.trim().to_string())]
        };

        if entries.is_empty() {
            return Err(DeliveryError::InvalidConfig(
                "webhook table is empty".to_string(),
            ));
        }
        for (channel, url) in &entries {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(DeliveryError::InvalidConfig(format!(
                    "webhook for channel {channel:?} is not an http(s) url: {url}"
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Resolves a channel to its URL. `None` selects the first entry.
    pub fn resolve(&self, channel: Option<&str>) -> Result<&str, DeliveryError> {
        match channel {
            None => Ok(self.entries[0].1.as_str()),
            Some(name) => self
                .entries
                .iter()
                .find(|(channel, _)| channel == name)
                .map(|(_, url)| url.as_str())
                .ok_or_else(|| DeliveryError::UnknownChannel(name.to_string())),
        }
    }

    /// Channel names in declaration order. A bare-URL config has one
    /// unnamed entry.
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(channel, _)| channel.as_str())
    }
}
