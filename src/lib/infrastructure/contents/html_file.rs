//! HTML file content source

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::domain::communication::{contents::ContentSource, mailer::Sender};

/// Reads the body of a message from an HTML file when the message is sent
#[derive(Clone, Debug)]
pub struct HtmlFile {
    path: PathBuf,
    sender: Option<Sender>,
    subject: Option<String>,
}

impl HtmlFile {
    /// Create a content source for the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sender: None,
            subject: None,
        }
    }

    /// Use `sender` when the builder has none
    pub fn with_sender(mut self, sender: impl Into<Sender>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Use `subject` when the builder has none
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

#[async_trait]
impl ContentSource for HtmlFile {
    fn default_sender(&self) -> Option<Sender> {
        self.sender.clone()
    }

    fn default_subject(&self) -> Option<String> {
        self.subject.clone()
    }

    async fn render_contents(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("could not read {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_render_reads_file() -> TestResult {
        let path = env::temp_dir().join(format!("fluent-mailer-{}.html", std::process::id()));
        tokio::fs::write(&path, "<h1>Welcome</h1>").await?;

        let source = HtmlFile::new(&path);
        let html = source.render_contents().await;

        tokio::fs::remove_file(&path).await?;

        assert_eq!(html?, "<h1>Welcome</h1>");

        Ok(())
    }

    #[tokio::test]
    async fn test_render_missing_file_fails() {
        let source = HtmlFile::new("/nonexistent/fluent-mailer/welcome.html");

        let err = source.render_contents().await.unwrap_err();

        assert!(err.to_string().contains("welcome.html"));
    }

    #[test]
    fn test_defaults() {
        let source = HtmlFile::new("welcome.html")
            .with_sender(Sender::named("noreply@example.com", "Example"))
            .with_subject("Welcome");

        assert_eq!(source.default_subject(), Some("Welcome".to_string()));
        assert_eq!(
            source.default_sender().map(|sender| sender.to_string()),
            Some("\"Example\" noreply@example.com".to_string())
        );
    }

    #[test]
    fn test_no_defaults() {
        let source = HtmlFile::new("welcome.html");

        assert_eq!(source.default_sender(), None);
        assert_eq!(source.default_subject(), None);
    }
}
