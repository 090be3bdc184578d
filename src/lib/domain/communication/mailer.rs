//! Mail transport module

mod errors;
mod message;

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

pub use errors::TransportError;
pub use message::{Attachment, DeliveryReceipt, Envelope, Recipients, Sender};

/// A transport capable of delivering an assembled [`Envelope`]
#[async_trait]
pub trait MailTransport: Send + Sync + 'static {
    /// Deliver a message
    ///
    /// # Arguments
    /// * `envelope` - The [`Envelope`] to deliver.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing the [`DeliveryReceipt`] reported by the server,
    /// or an [`Err`] containing a [`TransportError`] if the message could not be delivered.
    async fn send_message(&self, envelope: &Envelope) -> Result<DeliveryReceipt, TransportError>;
}

#[cfg(test)]
mock! {
    pub MailTransport {}

    #[async_trait]
    impl MailTransport for MailTransport {
        async fn send_message(&self, envelope: &Envelope) -> Result<DeliveryReceipt, TransportError>;
    }
}
