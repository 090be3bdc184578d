//! Content sources

mod html_file;

pub use html_file::HtmlFile;
