//! Message errors

use thiserror::Error;
use tracing::debug;

use crate::domain::communication::mailer::TransportError;

/// The first check an envelope failed during validation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidMessageReason {
    /// No sender was set or supplied by the content source
    #[error("a sender is required")]
    MissingSender,

    /// No primary recipient was set
    #[error("at least one recipient is required")]
    MissingRecipient,

    /// No subject was set or supplied by the content source
    #[error("a subject is required")]
    MissingSubject,

    /// Neither a text nor an HTML body was supplied
    #[error("a text or HTML body is required")]
    MissingContent,
}

/// Errors that can occur when building or sending a message
#[derive(Debug, Error)]
pub enum MessageError {
    /// The assembled message failed validation, nothing was sent
    #[error("invalid message: {reason}")]
    InvalidMessage {
        /// The check that failed
        reason: InvalidMessageReason,
    },

    /// The transport could not deliver the message
    #[error("could not deliver the message")]
    DeliveryFailed {
        /// The transport's error, unmodified
        #[source]
        cause: TransportError,
    },

    /// The transport could not be created from the given configuration
    #[error("could not initialise the mail transport")]
    TransportInitFailed(#[source] TransportError),

    /// The content source could not render the body, nothing was sent
    #[error("could not render the message contents")]
    RenderFailed(#[source] anyhow::Error),
}

impl From<InvalidMessageReason> for MessageError {
    fn from(reason: InvalidMessageReason) -> Self {
        MessageError::InvalidMessage { reason }
    }
}

impl From<TransportError> for MessageError {
    fn from(cause: TransportError) -> Self {
        debug!("TransportError -> MessageError");

        MessageError::DeliveryFailed { cause }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn test_invalid_message_names_the_reason() {
        let err = MessageError::from(InvalidMessageReason::MissingSubject);

        assert_eq!(err.to_string(), "invalid message: a subject is required");
    }

    #[test]
    fn test_transport_error_becomes_delivery_failed() {
        let err = MessageError::from(TransportError::UnknownError(anyhow!("connection refused")));

        match err {
            MessageError::DeliveryFailed { cause } => {
                assert_eq!(cause.to_string(), "connection refused")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
