use crate::finding::RequestResponsePair;

use super::message::{EMBED_TEXT_LIMIT, OutboundMessage};

/// Build one embed message per captured request/response pair.
///
/// Returns nothing when attachments are disabled or no pairs were captured.
/// Pair order is preserved and numbering is 1-based, stable even when some
/// pairs have no response.
#[must_use]
pub fn build_attachments(
    pairs: &[RequestResponsePair],
    include_attachments: bool,
) -> Vec<OutboundMessage> {
    if !include_attachments {
        return Vec::new();
    }

    pairs
        .iter()
        .enumerate()
        .map(|(index, pair)| {
            let number = index + 1;
            let request = truncate_chars(&pair.request, EMBED_TEXT_LIMIT);
            let response = truncate_chars(pair.response_text(), EMBED_TEXT_LIMIT);
            OutboundMessage::Embed(format!(
                "Request #{number}:\r\n```http\r\n{request}\r\n```\r\n\
                 Response #{number}:\r\n```http\r\n{response}\r\n```"
            ))
        })
        .collect()
}

/// First `max` characters of `text`, borrowed when it already fits.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
