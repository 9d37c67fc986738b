#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

//! Turns security-scanner findings into Discord webhook messages.
//!
//! One finding yields one primary notification plus zero or more embed
//! messages carrying truncated request/response dumps; each send is attempted
//! independently and its outcome recorded in a
//! [`DeliveryReport`](relay::DeliveryReport).

pub mod config;
pub mod error;
pub mod finding;
pub mod markdown;
pub mod relay;
pub mod webhook;

pub use config::WebhookConfig;
pub use error::{RelayError, Result};
pub use finding::{Finding, RequestResponsePair};
pub use relay::{DeliveryReport, NotificationDispatcher};
