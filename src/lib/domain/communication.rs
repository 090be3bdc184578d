//! Composing and sending email messages

pub mod contents;
pub mod mailer;
pub mod messages;

#[cfg(test)]
pub mod tests {
    pub use super::contents::tests::MockContentSource;
    pub use super::mailer::tests::MockMailTransport;
}
