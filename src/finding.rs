use serde::{Deserialize, Serialize};

/// A structured scanner result describing a detected issue, its location, and
/// optionally the network exchanges that triggered it.
///
/// `request_responses` distinguishes "the scanner never attached exchange
/// data" (`None`) from "exchange data was attached but is empty" (`Some` with
/// an empty vec). The dispatcher refuses the former and delivers the latter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub name: String,
    pub base_url: String,
    /// Rich-text detail fragment from the scanner. HTML, may contain tables.
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_responses: Option<Vec<RequestResponsePair>>,
}

/// One captured request and its optional response. Immutable once captured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestResponsePair {
    pub request: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl RequestResponsePair {
    #[must_use]
    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }

    /// Response body, or the empty string when no response was captured.
    #[must_use]
    pub fn response_text(&self) -> &str {
        self.response.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_text_empty_when_absent() {
        let pair = RequestResponsePair {
            request: "GET / HTTP/1.1".into(),
            response: None,
        };
        assert!(!pair.has_response());
        assert_eq!(pair.response_text(), "");
    }

    #[test]
    fn deserializes_finding_without_request_responses() {
        let finding: Finding = serde_json::from_str(
            r#"{"name": "XSS", "base_url": "https://example.com/", "detail": "<p>x</p>"}"#,
        )
        .unwrap();
        assert!(finding.request_responses.is_none());
    }

    #[test]
    fn deserializes_empty_but_present_pairs() {
        let finding: Finding = serde_json::from_str(
            r#"{"name": "XSS", "base_url": "u", "detail": "d", "request_responses": []}"#,
        )
        .unwrap();
        let pairs = finding.request_responses.unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn deserializes_pair_with_response() {
        let pair: RequestResponsePair = serde_json::from_str(
            r#"{"request": "GET / HTTP/1.1", "response": "HTTP/1.1 200 OK"}"#,
        )
        .unwrap();
        assert!(pair.has_response());
        assert_eq!(pair.response_text(), "HTTP/1.1 200 OK");
    }
}
