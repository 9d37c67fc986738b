use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `finding-relay`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
///
/// Only abort-level failures surface here: an unset webhook, a finding with no
/// captured exchange data, a failed markdown conversion. Individual send
/// failures are not errors — they are recorded per message in a
/// [`DeliveryReport`](crate::relay::DeliveryReport).
#[derive(Debug, Error)]
pub enum RelayError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Message composition ─────────────────────────────────────────────
    #[error("compose: {0}")]
    Compose(#[from] ComposeError),

    // ── Dispatch gating ─────────────────────────────────────────────────
    #[error("dispatch: {0}")]
    Dispatch(#[from] DispatchError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("webhook URL is not configured (still the placeholder value)")]
    WebhookUnset,

    #[error("failed to load config: {0}")]
    Load(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Composition errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("markdown conversion failed: {0}")]
    Conversion(String),
}

// ─── Dispatch errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("finding has no captured request/response data")]
    MissingRequestData,
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = RelayError::Config(ConfigError::WebhookUnset);
        assert!(err.to_string().contains("not configured"));
    }

    #[test]
    fn compose_error_carries_converter_message() {
        let err = RelayError::Compose(ComposeError::Conversion("bad fragment".into()));
        assert!(err.to_string().contains("bad fragment"));
    }

    #[test]
    fn missing_request_data_displays_correctly() {
        let err = RelayError::Dispatch(DispatchError::MissingRequestData);
        assert!(err.to_string().contains("request/response"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let relay_err: RelayError = anyhow_err.into();
        assert!(relay_err.to_string().contains("something went wrong"));
    }
}
