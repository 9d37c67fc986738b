use serde_json::json;

/// Discord truncates embed descriptions well above this, but request/response
/// dumps are cut to this many characters before embedding.
pub const EMBED_TEXT_LIMIT: usize = 2000;

/// One webhook payload, built fresh per delivery and discarded after send.
///
/// Discord webhooks accept either plain `content` or an `embeds` array; this
/// relay sends one embed per message, so the single description string is the
/// whole variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    /// The primary notification: `{"content": ...}`.
    Content(String),
    /// One attachment embed: `{"embeds": [{"description": ...}]}`.
    Embed(String),
}

impl OutboundMessage {
    /// The JSON body POSTed to the webhook.
    #[must_use]
    pub fn body(&self) -> serde_json::Value {
        match self {
            Self::Content(text) => json!({ "content": text }),
            Self::Embed(description) => json!({ "embeds": [{ "description": description }] }),
        }
    }

    /// The message text, independent of which wire shape carries it.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Content(text) | Self::Embed(text) => text,
        }
    }
}
