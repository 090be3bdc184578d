//! SMTP mail transport implementation

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use clap::Parser;
use lettre::{
    message::{header::ContentType, Attachment as AttachmentPart, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
        response::Response,
    },
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

use crate::domain::communication::{
    mailer::{
        Attachment, DeliveryReceipt, Envelope, MailTransport, Recipients, Sender, TransportError,
    },
    messages::{MessageBuilder, MessageError},
};

/// The submission port used when none is configured
pub const DEFAULT_PORT: u16 = 587;

/// SMTP configuration
#[derive(Clone, Debug, Parser)]
pub struct SmtpConfig {
    /// The SMTP host
    #[clap(long = "smtp-host", env = "SMTP_HOST")]
    pub host: String,

    /// The SMTP port
    #[clap(long = "smtp-port", env = "SMTP_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Connect over TLS from the start (usually port 465) instead of upgrading with STARTTLS
    #[clap(long = "smtp-secure", env = "SMTP_SECURE")]
    pub secure: bool,

    /// The SMTP username
    #[clap(long = "smtp-user", env = "SMTP_USER", default_value = "")]
    pub username: String,

    /// The SMTP password
    #[clap(
        long = "smtp-password",
        env = "SMTP_PASSWORD",
        default_value = "",
        hide_env_values = true
    )]
    pub password: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            secure: false,
            username: String::new(),
            password: String::new(),
        }
    }
}

/// SMTP mailer
pub struct SmtpMailer {
    config: SmtpConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Create a new SMTP mailer
    ///
    /// No connection is opened until the first message is sent.
    pub fn new(config: SmtpConfig) -> Result<Self, TransportError> {
        let transport = Self::transport(&config)?;

        Ok(Self { config, transport })
    }

    fn transport(config: &SmtpConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>, TransportError> {
        let relay = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host).tls(
                Tls::Opportunistic(TlsParameters::new(config.host.clone())?),
            )
        };

        let relay = relay.port(config.port);

        let relay = if config.username.is_empty() {
            relay
        } else {
            relay.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
        };

        Ok(relay.build())
    }
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("secure", &self.config.secure)
            .finish()
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send_message(&self, envelope: &Envelope) -> Result<DeliveryReceipt, TransportError> {
        let message = to_message(envelope)?;

        debug!(host = %self.config.host, port = self.config.port, "Sending message over SMTP");

        let response = self.transport.send(message).await?;

        Ok(response.into())
    }
}

impl MessageBuilder<SmtpMailer> {
    /// Create a builder sending through a new [`SmtpMailer`]
    ///
    /// # Returns
    /// The builder, or an [`Err`] containing [`MessageError::TransportInitFailed`] if the
    /// transport could not be created from `config`.
    pub fn connect(config: SmtpConfig) -> Result<Self, MessageError> {
        let mailer = SmtpMailer::new(config).map_err(MessageError::TransportInitFailed)?;

        Ok(Self::new(Arc::new(mailer)))
    }
}

impl From<Response> for DeliveryReceipt {
    fn from(response: Response) -> Self {
        Self {
            code: response.code().to_string(),
            message: response.message().map(ToString::to_string).collect(),
        }
    }
}

fn mailbox(address: &str) -> Result<Mailbox, TransportError> {
    address
        .parse()
        .map_err(|_| TransportError::InvalidAddress(address.to_string()))
}

fn sender_mailbox(sender: &Sender) -> Result<Mailbox, TransportError> {
    let email: Address = sender
        .email()
        .parse()
        .map_err(|_| TransportError::InvalidAddress(sender.email().to_string()))?;

    Ok(Mailbox::new(sender.name().map(str::to_string), email))
}

fn mailboxes(recipients: &Option<Recipients>) -> Result<Vec<Mailbox>, TransportError> {
    recipients
        .iter()
        .flat_map(|recipients| recipients.iter())
        .filter(|address| !address.is_empty())
        .map(mailbox)
        .collect()
}

fn attachment_part(attachment: &Attachment) -> Result<SinglePart, TransportError> {
    let content_type = ContentType::parse(&attachment.content_type)
        .map_err(|_| TransportError::InvalidAttachment(attachment.content_type.clone()))?;

    Ok(AttachmentPart::new(attachment.filename.clone())
        .body(attachment.content.clone(), content_type))
}

/// Convert an [`Envelope`] into a [`Message`] ready for the wire
fn to_message(envelope: &Envelope) -> Result<Message, TransportError> {
    let from = envelope
        .from
        .as_ref()
        .ok_or(TransportError::IncompleteEnvelope("sender"))?;
    let subject = envelope
        .subject
        .as_ref()
        .ok_or(TransportError::IncompleteEnvelope("subject"))?;

    let mut builder = Message::builder()
        .from(sender_mailbox(from)?)
        .subject(subject.clone());

    for to in mailboxes(&envelope.to)? {
        builder = builder.to(to);
    }

    for cc in mailboxes(&envelope.cc)? {
        builder = builder.cc(cc);
    }

    for bcc in mailboxes(&envelope.bcc)? {
        builder = builder.bcc(bcc);
    }

    let body = match (&envelope.html, &envelope.text) {
        (Some(html), _) => SinglePart::html(html.clone()),
        (None, Some(text)) => SinglePart::plain(text.clone()),
        (None, None) => return Err(TransportError::IncompleteEnvelope("body")),
    };

    if envelope.attachments.is_empty() {
        return Ok(builder.singlepart(body)?);
    }

    let mut parts = MultiPart::mixed().singlepart(body);

    for attachment in &envelope.attachments {
        parts = parts.singlepart(attachment_part(attachment)?);
    }

    Ok(builder.multipart(parts)?)
}
