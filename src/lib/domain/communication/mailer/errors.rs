//! Mail transport errors

use thiserror::Error;

/// Errors raised by a [`MailTransport`](super::MailTransport)
#[derive(Debug, Error)]
pub enum TransportError {
    /// An address could not be parsed
    #[error("invalid email address \"{0}\"")]
    InvalidAddress(String),

    /// An attachment has an unusable content type
    #[error("invalid content type \"{0}\" for attachment")]
    InvalidAttachment(String),

    /// The envelope lacks a field the message needs
    #[error("envelope has no {0}")]
    IncompleteEnvelope(&'static str),

    /// The SMTP exchange failed
    #[error(transparent)]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for TransportError {
    fn from(err: anyhow::Error) -> Self {
        TransportError::UnknownError(err)
    }
}

impl From<lettre::error::Error> for TransportError {
    fn from(err: lettre::error::Error) -> Self {
        TransportError::UnknownError(err.into())
    }
}
