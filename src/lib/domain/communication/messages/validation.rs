//! Envelope validation

use crate::domain::communication::mailer::Envelope;

use super::{InvalidMessageReason::*, MessageError};

/// Check that an envelope can be sent.
///
/// The checks run in a fixed order and the first failure is reported: sender, primary
/// recipient, subject, then body. Absent cc and bcc lists are never an error.
///
/// # Returns
/// [`Ok`] if the envelope is complete, or an [`Err`] containing
/// [`MessageError::InvalidMessage`] naming the first missing field.
pub fn validate(envelope: &Envelope) -> Result<(), MessageError> {
    if !envelope
        .from
        .as_ref()
        .is_some_and(|sender| !sender.email().is_empty())
    {
        return Err(MissingSender.into());
    }

    if !envelope.to.as_ref().is_some_and(|to| to.has_addresses()) {
        return Err(MissingRecipient.into());
    }

    if !is_filled(&envelope.subject) {
        return Err(MissingSubject.into());
    }

    if !is_filled(&envelope.text) && !is_filled(&envelope.html) {
        return Err(MissingContent.into());
    }

    Ok(())
}

fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use crate::domain::communication::{
        mailer::{Recipients, Sender},
        messages::InvalidMessageReason,
    };

    use super::*;

    fn complete() -> Envelope {
        Envelope {
            from: Some(Sender::new("a@example.com")),
            to: Some(Recipients::from("b@example.com")),
            subject: Some("Hi".to_string()),
            text: Some("hello".to_string()),
            ..Default::default()
        }
    }

    fn reason(envelope: &Envelope) -> Option<InvalidMessageReason> {
        match validate(envelope) {
            Err(MessageError::InvalidMessage { reason }) => Some(reason),
            _ => None,
        }
    }

    #[test]
    fn test_complete_envelope_is_valid_and_unchanged() {
        let envelope = complete();
        let before = envelope.clone();

        assert!(validate(&envelope).is_ok());
        assert_eq!(envelope, before);
    }

    #[test]
    fn test_html_body_alone_is_enough() {
        let envelope = Envelope {
            text: None,
            html: Some("<p>hello</p>".to_string()),
            ..complete()
        };

        assert!(validate(&envelope).is_ok());
    }

    #[test]
    fn test_missing_sender() {
        let envelope = Envelope {
            from: None,
            ..complete()
        };

        assert_eq!(reason(&envelope), Some(MissingSender));
    }

    #[test]
    fn test_empty_sender_address_is_missing() {
        let envelope = Envelope {
            from: Some(Sender::named("", "Nobody")),
            ..complete()
        };

        assert_eq!(reason(&envelope), Some(MissingSender));
    }

    #[test]
    fn test_sender_is_checked_before_everything_else() {
        assert_eq!(reason(&Envelope::default()), Some(MissingSender));
    }

    #[test]
    fn test_missing_recipient() {
        let envelope = Envelope {
            to: None,
            ..complete()
        };

        assert_eq!(reason(&envelope), Some(MissingRecipient));
    }

    #[test]
    fn test_empty_recipient_list_is_missing() {
        let envelope = Envelope {
            to: Some(Recipients::from(Vec::<String>::new())),
            subject: None,
            ..complete()
        };

        assert_eq!(reason(&envelope), Some(MissingRecipient));
    }

    #[test]
    fn test_empty_subject() {
        let envelope = Envelope {
            subject: Some(String::new()),
            text: None,
            ..complete()
        };

        assert_eq!(reason(&envelope), Some(MissingSubject));
    }

    #[test]
    fn test_missing_content() {
        let envelope = Envelope {
            text: Some(String::new()),
            html: None,
            ..complete()
        };

        assert_eq!(reason(&envelope), Some(MissingContent));
    }

    #[test]
    fn test_absent_cc_and_bcc_are_not_errors() {
        let envelope = Envelope {
            cc: None,
            bcc: None,
            ..complete()
        };

        assert!(validate(&envelope).is_ok());
    }
}
