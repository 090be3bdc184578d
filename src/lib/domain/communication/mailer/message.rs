//! Email envelope

use std::fmt;

/// One or more email addresses, kept in the order they were given
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recipients(Vec<String>);

impl Recipients {
    /// Create a recipient list from any sequence of addresses
    pub fn new<I, A>(addresses: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self(addresses.into_iter().map(Into::into).collect())
    }

    /// Iterate over the addresses as given
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of addresses in the list, blank ones included
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list holds no addresses at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether at least one address in the list is non-empty
    pub fn has_addresses(&self) -> bool {
        self.0.iter().any(|address| !address.is_empty())
    }
}

impl From<&str> for Recipients {
    fn from(address: &str) -> Self {
        Self(vec![address.to_string()])
    }
}

impl From<String> for Recipients {
    fn from(address: String) -> Self {
        Self(vec![address])
    }
}

impl From<Vec<String>> for Recipients {
    fn from(addresses: Vec<String>) -> Self {
        Self(addresses)
    }
}

impl From<Vec<&str>> for Recipients {
    fn from(addresses: Vec<&str>) -> Self {
        Self::new(addresses)
    }
}

impl<const N: usize> From<[&str; N]> for Recipients {
    fn from(addresses: [&str; N]) -> Self {
        Self::new(addresses)
    }
}

impl fmt::Display for Recipients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// The sender of a message: an address with an optional display name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sender {
    email: String,
    name: Option<String>,
}

impl Sender {
    /// A sender without a display name
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    /// A sender shown to recipients as `name`
    pub fn named(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }

    /// The sender's address
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The sender's display name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl From<&str> for Sender {
    fn from(email: &str) -> Self {
        Self::new(email)
    }
}

impl From<String> for Sender {
    fn from(email: String) -> Self {
        Self::new(email)
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "\"{}\" {}", name, self.email),
            None => write!(f, "{}", self.email),
        }
    }
}

/// A file attached to a message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    /// The file name shown to recipients
    pub filename: String,

    /// The MIME type of the content, e.g. `application/pdf`
    pub content_type: String,

    /// The raw file content
    pub content: Vec<u8>,
}

impl Attachment {
    /// Create a new attachment
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            content: content.into(),
        }
    }
}

/// A fully assembled message, ready to be handed to a transport
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Envelope {
    /// The sender
    pub from: Option<Sender>,

    /// The primary recipients
    pub to: Option<Recipients>,

    /// Carbon copy recipients, [`None`] when not provided
    pub cc: Option<Recipients>,

    /// Blind carbon copy recipients, [`None`] when not provided
    pub bcc: Option<Recipients>,

    /// The subject line
    pub subject: Option<String>,

    /// The plain text body
    pub text: Option<String>,

    /// The HTML body
    pub html: Option<String>,

    /// Files attached to the message
    pub attachments: Vec<Attachment>,
}

/// The server's answer to a successful delivery
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// The reply code, e.g. `250`
    pub code: String,

    /// The reply text, one entry per line
    pub message: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_without_name_displays_address() {
        let sender = Sender::new("a@example.com");

        assert_eq!(sender.to_string(), "a@example.com");
    }

    #[test]
    fn test_sender_with_name_displays_quoted_name() {
        let sender = Sender::named("a@example.com", "Jane Doe");

        assert_eq!(sender.to_string(), "\"Jane Doe\" a@example.com");
        assert_eq!(sender.name(), Some("Jane Doe"));
        assert_eq!(sender.email(), "a@example.com");
    }

    #[test]
    fn test_single_address_becomes_one_recipient() {
        let recipients = Recipients::from("b@example.com");

        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients.iter().collect::<Vec<_>>(), vec!["b@example.com"]);
    }

    #[test]
    fn test_recipient_order_is_preserved() {
        let recipients = Recipients::from(["c@example.com", "a@example.com", "b@example.com"]);

        assert_eq!(
            recipients.to_string(),
            "c@example.com, a@example.com, b@example.com"
        );
    }

    #[test]
    fn test_blank_recipients_have_no_addresses() {
        assert!(!Recipients::from("").has_addresses());
        assert!(!Recipients::from(Vec::<String>::new()).has_addresses());
        assert!(Recipients::from(vec!["", "b@example.com"]).has_addresses());
    }
}
