#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Command-line tool for sending a single email over SMTP

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use fluent_mailer::{
    domain::communication::messages::MessageBuilder,
    infrastructure::{
        contents::HtmlFile,
        email::smtp::{SmtpConfig, SmtpMailer},
    },
};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The SMTP connection details
    #[clap(flatten)]
    pub smtp: SmtpConfig,

    /// Recipient address, may be repeated
    #[clap(long, required = true)]
    pub to: Vec<String>,

    /// Carbon copy address, may be repeated
    #[clap(long)]
    pub cc: Vec<String>,

    /// Blind carbon copy address, may be repeated
    #[clap(long)]
    pub bcc: Vec<String>,

    /// The sender address
    #[clap(long, env = "MAIL_FROM")]
    pub from: Option<String>,

    /// The sender's display name
    #[clap(long, env = "MAIL_FROM_NAME")]
    pub from_name: Option<String>,

    /// The subject line
    #[clap(long)]
    pub subject: Option<String>,

    /// Send this text as a plain text body
    #[clap(long, conflicts_with = "html_file")]
    pub text: Option<String>,

    /// Send the contents of this file as an HTML body
    #[clap(long)]
    pub html_file: Option<PathBuf>,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut builder = MessageBuilder::<SmtpMailer>::connect(args.smtp)?;

    builder.set_recipients(args.to);

    if !args.cc.is_empty() {
        builder.set_cc(args.cc);
    }

    if !args.bcc.is_empty() {
        builder.set_bcc(args.bcc);
    }

    if let Some(from) = args.from {
        builder.set_sender(from, args.from_name.as_deref());
    }

    if let Some(subject) = args.subject {
        builder.set_subject(subject);
    }

    match (args.text, args.html_file) {
        (Some(text), _) => {
            builder.send_raw(text).await?;
        }
        (None, Some(path)) => {
            builder.send_from_source(&HtmlFile::new(path)).await?;
        }
        (None, None) => bail!("either --text or --html-file is required"),
    }

    if let Some(receipt) = builder.last_receipt() {
        println!("Delivered: {} {}", receipt.code, receipt.message.join(" "));
    }

    Ok(())
}
