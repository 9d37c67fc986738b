use std::fmt;
use std::sync::Arc;

use crate::config::WebhookConfig;
use crate::error::{ConfigError, DispatchError, Result};
use crate::finding::Finding;
use crate::markdown::MarkdownConverter;
use crate::webhook::{WebhookRequest, WebhookSender};

use super::attachments::build_attachments;
use super::composer::compose;
use super::message::OutboundMessage;

/// Which payload of a delivery a [`SendRecord`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Primary,
    /// 1-based, matching the `Request #i` numbering inside the embed.
    Attachment { number: usize },
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary message"),
            Self::Attachment { number } => write!(f, "attachment #{number}"),
        }
    }
}

/// Outcome of one webhook POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Delivered,
    /// The destination answered with a non-2xx status.
    Rejected { status: u16, body: String },
    /// The request never produced an HTTP response.
    TransportFailed { message: String },
}

#[derive(Debug, Clone)]
pub struct SendRecord {
    pub kind: MessageKind,
    pub outcome: SendOutcome,
}

impl SendRecord {
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        matches!(self.outcome, SendOutcome::Delivered)
    }
}

/// Per-payload outcomes of one delivery, for logging and observability.
/// Individual send failures never abort a delivery, so they live here rather
/// than in the error hierarchy.
#[derive(Debug, Clone, Default)]
pub struct DeliveryReport {
    records: Vec<SendRecord>,
}

impl DeliveryReport {
    #[must_use]
    pub fn records(&self) -> &[SendRecord] {
        &self.records
    }

    #[must_use]
    pub fn all_delivered(&self) -> bool {
        self.records.iter().all(SendRecord::is_delivered)
    }

    pub fn failures(&self) -> impl Iterator<Item = &SendRecord> {
        self.records.iter().filter(|record| !record.is_delivered())
    }
}

/// Orchestrates composer and attachment builder, then sends each payload
/// independently through the injected transport.
///
/// Capabilities arrive via constructor injection; the dispatcher holds no
/// mutable state, so one instance serves concurrent deliveries.
pub struct NotificationDispatcher {
    sender: Arc<dyn WebhookSender>,
    converter: Arc<dyn MarkdownConverter>,
}

impl NotificationDispatcher {
    #[must_use]
    pub fn new(sender: Arc<dyn WebhookSender>, converter: Arc<dyn MarkdownConverter>) -> Self {
        Self { sender, converter }
    }

    /// Deliver one finding: one primary send plus zero or more attachment
    /// sends, sequential and independent.
    ///
    /// Aborts without sending anything when the webhook URL is still the
    /// placeholder or the finding carries no request/response data at all
    /// (an empty-but-present list is fine and yields zero attachments).
    /// A failed send is recorded in the report and never aborts the rest.
    pub async fn deliver(
        &self,
        finding: &Finding,
        config: &WebhookConfig,
    ) -> Result<DeliveryReport> {
        if !config.is_configured() {
            return Err(ConfigError::WebhookUnset.into());
        }

        let Some(pairs) = finding.request_responses.as_deref() else {
            tracing::error!(finding = %finding.name, "finding has no request/response data, skipping");
            return Err(DispatchError::MissingRequestData.into());
        };

        let primary = compose(finding, config, self.converter.as_ref())?;
        let attachments = build_attachments(pairs, config.include_attachments);

        let mut records = Vec::with_capacity(1 + attachments.len());
        records.push(self.send_one(&config.url, MessageKind::Primary, &primary).await);

        for (index, attachment) in attachments.iter().enumerate() {
            let kind = MessageKind::Attachment { number: index + 1 };
            records.push(self.send_one(&config.url, kind, attachment).await);
        }

        Ok(DeliveryReport { records })
    }

    async fn send_one(&self, url: &str, kind: MessageKind, message: &OutboundMessage) -> SendRecord {
        let request = WebhookRequest {
            url: url.to_string(),
            body: message.body(),
        };

        let outcome = match self.sender.send(&request).await {
            Ok(response) if response.is_success() => SendOutcome::Delivered,
            Ok(response) => {
                tracing::error!(
                    %kind,
                    status = response.status,
                    body = %response.body,
                    "webhook rejected message"
                );
                SendOutcome::Rejected {
                    status: response.status,
                    body: response.body,
                }
            }
            Err(error) => {
                tracing::error!(%kind, error = %error, "webhook send failed");
                SendOutcome::TransportFailed {
                    message: error.to_string(),
                }
            }
        };

        SendRecord { kind, outcome }
    }
}
