//! Message builder

use std::{fmt, sync::Arc};

use tracing::{debug, info, warn};

use crate::domain::communication::{
    contents::ContentSource,
    mailer::{Attachment, DeliveryReceipt, Envelope, MailTransport, Recipients, Sender},
};

use super::{validate, MessageError};

/// Accumulates the fields of a message through chained setters and sends it through a
/// [`MailTransport`].
///
/// Setters never validate. The assembled [`Envelope`] is validated immediately before every
/// send, and nothing reaches the transport unless it passes. A builder can be reused for
/// another message after [`MessageBuilder::reset`].
pub struct MessageBuilder<T: MailTransport> {
    transport: Arc<T>,
    recipients: Option<Recipients>,
    cc: Option<Recipients>,
    bcc: Option<Recipients>,
    sender: Option<Sender>,
    subject: Option<String>,
    attachments: Vec<Attachment>,
    last_receipt: Option<DeliveryReceipt>,
}

impl<T> MessageBuilder<T>
where
    T: MailTransport,
{
    /// Create an empty builder sending through `transport`
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            recipients: None,
            cc: None,
            bcc: None,
            sender: None,
            subject: None,
            attachments: Vec::new(),
            last_receipt: None,
        }
    }

    /// Set the primary recipients, either a single address or a list
    pub fn set_recipients(&mut self, recipients: impl Into<Recipients>) -> &mut Self {
        self.recipients = Some(recipients.into());
        self
    }

    /// Set the carbon copy recipients
    pub fn set_cc(&mut self, recipients: impl Into<Recipients>) -> &mut Self {
        self.cc = Some(recipients.into());
        self
    }

    /// Set the blind carbon copy recipients
    pub fn set_bcc(&mut self, recipients: impl Into<Recipients>) -> &mut Self {
        self.bcc = Some(recipients.into());
        self
    }

    /// Set the sender, optionally with a display name
    ///
    /// A named sender is shown as `"name" email`.
    pub fn set_sender(&mut self, email: impl Into<String>, name: Option<&str>) -> &mut Self {
        self.sender = Some(match name {
            Some(name) => Sender::named(email, name),
            None => Sender::new(email),
        });
        self
    }

    /// Set the attachments, replacing any set before
    pub fn set_attachments(&mut self, attachments: Vec<Attachment>) -> &mut Self {
        self.attachments = attachments;
        self
    }

    /// Set the subject, overriding the one a [`ContentSource`] would supply
    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.subject = Some(subject.into());
        self
    }

    /// The primary recipients
    pub fn recipients(&self) -> Option<&Recipients> {
        self.recipients.as_ref()
    }

    /// The carbon copy recipients
    pub fn cc(&self) -> Option<&Recipients> {
        self.cc.as_ref()
    }

    /// The blind carbon copy recipients
    pub fn bcc(&self) -> Option<&Recipients> {
        self.bcc.as_ref()
    }

    /// The sender
    pub fn sender(&self) -> Option<&Sender> {
        self.sender.as_ref()
    }

    /// The subject
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// The attachments
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// The receipt of the most recent successful send
    pub fn last_receipt(&self) -> Option<&DeliveryReceipt> {
        self.last_receipt.as_ref()
    }

    /// The transport messages are sent through
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// The envelope as currently configured, without any body
    pub fn envelope(&self) -> Envelope {
        Envelope {
            from: self.sender.clone(),
            to: self.recipients.clone(),
            cc: self.cc.clone().filter(Recipients::has_addresses),
            bcc: self.bcc.clone().filter(Recipients::has_addresses),
            subject: self.subject.clone(),
            text: None,
            html: None,
            attachments: self.attachments.clone(),
        }
    }

    /// Validate an envelope, see [`validate`]
    pub fn validate(&self, envelope: &Envelope) -> Result<(), MessageError> {
        validate(envelope)
    }

    /// Render the body from `source` and send it as HTML.
    ///
    /// A sender or subject set on the builder takes precedence over the source's defaults,
    /// unless it is empty.
    ///
    /// # Returns
    /// - [`Ok`] with the builder once the transport accepted the message.
    /// - [`Err`] containing [`MessageError::RenderFailed`] if the source failed to render,
    ///   [`MessageError::InvalidMessage`] if the envelope is incomplete, or
    ///   [`MessageError::DeliveryFailed`] if the transport failed.
    pub async fn send_from_source<S>(&mut self, source: &S) -> Result<&mut Self, MessageError>
    where
        S: ContentSource + ?Sized,
    {
        let mut envelope = self.envelope();

        envelope.from = envelope
            .from
            .filter(|sender| !sender.email().is_empty())
            .or_else(|| source.default_sender());
        envelope.subject = envelope
            .subject
            .filter(|subject| !subject.is_empty())
            .or_else(|| source.default_subject());
        envelope.html = Some(
            source
                .render_contents()
                .await
                .map_err(MessageError::RenderFailed)?,
        );

        self.dispatch(envelope).await
    }

    /// Send `text` as a plain text body.
    ///
    /// The sender and subject must already be set on the builder.
    ///
    /// # Returns
    /// - [`Ok`] with the builder once the transport accepted the message.
    /// - [`Err`] containing [`MessageError::InvalidMessage`] if the envelope is incomplete,
    ///   or [`MessageError::DeliveryFailed`] if the transport failed.
    pub async fn send_raw(&mut self, text: impl Into<String>) -> Result<&mut Self, MessageError> {
        let mut envelope = self.envelope();
        envelope.text = Some(text.into());

        self.dispatch(envelope).await
    }

    /// Clear every field and the last receipt. The transport is kept.
    pub fn reset(&mut self) -> &mut Self {
        self.recipients = None;
        self.cc = None;
        self.bcc = None;
        self.sender = None;
        self.subject = None;
        self.attachments.clear();
        self.last_receipt = None;
        self
    }

    async fn dispatch(&mut self, envelope: Envelope) -> Result<&mut Self, MessageError> {
        if let Err(err) = validate(&envelope) {
            warn!("Not sending message: {}", err);

            return Err(err);
        }

        debug!(
            to = %envelope.to.as_ref().map(ToString::to_string).unwrap_or_default(),
            "Sending message"
        );

        match self.transport.send_message(&envelope).await {
            Ok(receipt) => {
                info!(code = %receipt.code, "Message delivered");

                self.last_receipt = Some(receipt);

                Ok(self)
            }
            Err(cause) => {
                warn!("Message delivery failed: {}", cause);

                self.last_receipt = None;

                Err(cause.into())
            }
        }
    }
}

impl<T> fmt::Debug for MessageBuilder<T>
where
    T: MailTransport,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBuilder")
            .field("transport", &"MailTransport")
            .field("recipients", &self.recipients)
            .field("cc", &self.cc)
            .field("bcc", &self.bcc)
            .field("sender", &self.sender)
            .field("subject", &self.subject)
            .field("attachments", &self.attachments.len())
            .field("last_receipt", &self.last_receipt)
            .finish()
    }
}
