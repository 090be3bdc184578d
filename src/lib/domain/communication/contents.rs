//! Content source module

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::mailer::Sender;

/// Supplies the HTML body of a message, along with a default sender and subject
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// The sender to use when none was set on the builder
    fn default_sender(&self) -> Option<Sender>;

    /// The subject to use when none was set on the builder
    fn default_subject(&self) -> Option<String>;

    /// Render the HTML body
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing the rendered HTML,
    /// or an [`Err`] if the contents could not be produced.
    async fn render_contents(&self) -> Result<String>;
}

#[cfg(test)]
mock! {
    pub ContentSource {}

    #[async_trait]
    impl ContentSource for ContentSource {
        fn default_sender(&self) -> Option<Sender>;
        fn default_subject(&self) -> Option<String>;
        async fn render_contents(&self) -> Result<String>;
    }
}

#[cfg(test)]
pub mod tests {
    pub use super::MockContentSource;
}
