use crate::config::WebhookConfig;
use crate::error::ComposeError;
use crate::finding::Finding;
use crate::markdown::MarkdownConverter;

use super::message::OutboundMessage;

/// Header used when no mention is configured.
const NEUTRAL_HEADER: &str = "New issue!";

/// Build the primary notification for a finding.
///
/// The whole message renders as one block quote: header line, title, URL, and
/// the converted detail re-indented as quote continuations. Every `/` in the
/// base URL is escaped so Discord does not unfurl a link preview.
///
/// Pure transformation; the only failure mode is the injected converter.
pub fn compose(
    finding: &Finding,
    config: &WebhookConfig,
    converter: &dyn MarkdownConverter,
) -> Result<OutboundMessage, ComposeError> {
    let detail = converter
        .convert(&finding.detail)
        .map_err(|e| ComposeError::Conversion(e.to_string()))?;
    let detail = detail.trim_end().replace('\n', "\n> ");

    let url = finding.base_url.replace('/', "\\/");

    let header = match config.mention_target() {
        Some(user_id) => format!("<@{user_id}>, new issue!"),
        None => NEUTRAL_HEADER.to_string(),
    };

    let content = format!(
        "> {header}\n> **Title**: {name}\n> **URL**: {url}\n> **Details**: {detail}",
        name = finding.name,
    );

    Ok(OutboundMessage::Content(content))
}
