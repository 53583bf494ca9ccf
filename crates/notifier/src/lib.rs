//! Notification delivery.
//!
//! Delivery is best-effort: [`send_message`] logs failures and never returns
//! them, so a broken messaging channel cannot stall the polling loop.

pub mod telegram;

use homework_common::error::DeliveryError;

pub use telegram::TelegramBot;

/// A destination that accepts plain-text messages.
pub trait MessageSink {
    /// Deliver `text` to the configured chat.
    fn deliver(&self, text: &str) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

impl<S: MessageSink + Sync> MessageSink for &S {
    fn deliver(&self, text: &str) -> impl Future<Output = Result<(), DeliveryError>> + Send {
        (**self).deliver(text)
    }
}

/// Send `text` through `sink`, logging the outcome.
pub async fn send_message<S: MessageSink>(sink: &S, text: &str) {
    match sink.deliver(text).await {
        Ok(()) => tracing::debug!(chars = text.chars().count(), "Message delivered"),
        Err(e) => tracing::error!(error = %e, "Failed to deliver message"),
    }
}
