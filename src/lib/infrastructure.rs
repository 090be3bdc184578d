//! Implementations of the domain's collaborators

pub mod contents;
pub mod email;
