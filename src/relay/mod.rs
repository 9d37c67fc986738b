//! The finding→webhook-message pipeline: compose the primary notification,
//! build attachment embeds, deliver each payload independently.

pub mod attachments;
pub mod composer;
pub mod dispatcher;
pub mod message;

pub use attachments::build_attachments;
pub use composer::compose;
pub use dispatcher::{DeliveryReport, MessageKind, NotificationDispatcher, SendOutcome, SendRecord};
pub use message::{EMBED_TEXT_LIMIT, OutboundMessage};
