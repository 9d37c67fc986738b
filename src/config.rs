use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Placeholder URL shipped as the default. Deliveries are refused until the
/// user replaces it with a real webhook endpoint.
pub const UNCONFIGURED_WEBHOOK_URL: &str = "https://discord.com/api/webhooks/<your-webhook-id>";

/// Default user ID meaning "mention nobody", even when mentions are enabled.
pub const MENTION_DISABLED_USER_ID: &str = "000000000000000000";

/// Webhook delivery settings. Read once per delivery; the relay core never
/// mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// Discord user ID to @-mention in the primary message.
    #[serde(default = "default_mention_user_id")]
    pub mention_user_id: String,

    #[serde(default = "default_true")]
    pub mention_enabled: bool,

    /// Whether captured request/response pairs are forwarded as embed messages.
    #[serde(default = "default_true")]
    pub include_attachments: bool,
}

fn default_url() -> String {
    UNCONFIGURED_WEBHOOK_URL.to_string()
}

fn default_mention_user_id() -> String {
    MENTION_DISABLED_USER_ID.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            mention_user_id: default_mention_user_id(),
            mention_enabled: true,
            include_attachments: true,
        }
    }
}

impl WebhookConfig {
    /// Load from a TOML file. Missing keys fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ConfigError::Load(e.to_string()))
    }

    /// True once the URL no longer equals the shipped placeholder.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.url != UNCONFIGURED_WEBHOOK_URL
    }

    /// The user ID to mention, or `None` when mentions are disabled or the ID
    /// is still the all-zeroes sentinel.
    #[must_use]
    pub fn mention_target(&self) -> Option<&str> {
        if self.mention_enabled && self.mention_user_id != MENTION_DISABLED_USER_ID {
            Some(&self.mention_user_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_unconfigured() {
        let config = WebhookConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.url, UNCONFIGURED_WEBHOOK_URL);
    }

    #[test]
    fn real_url_counts_as_configured() {
        let config = WebhookConfig {
            url: "https://discord.com/api/webhooks/123/abc".into(),
            ..WebhookConfig::default()
        };
        assert!(config.is_configured());
    }

    #[test]
    fn mention_target_requires_both_flag_and_real_id() {
        let mut config = WebhookConfig {
            mention_user_id: "123456789012345678".into(),
            ..WebhookConfig::default()
        };
        assert_eq!(config.mention_target(), Some("123456789012345678"));

        config.mention_enabled = false;
        assert_eq!(config.mention_target(), None);
    }

    #[test]
    fn sentinel_user_id_disables_mention_even_when_enabled() {
        let config = WebhookConfig::default();
        assert!(config.mention_enabled);
        assert_eq!(config.mention_target(), None);
    }

    #[test]
    fn load_fills_missing_keys_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "url = \"https://discord.com/api/webhooks/1/a\"").unwrap();

        let config = WebhookConfig::load(file.path()).unwrap();
        assert!(config.is_configured());
        assert_eq!(config.mention_user_id, MENTION_DISABLED_USER_ID);
        assert!(config.mention_enabled);
        assert!(config.include_attachments);
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "url = [not toml").unwrap();

        let err = WebhookConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }
}
