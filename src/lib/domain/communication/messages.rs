//! Message builder module

mod builder;
mod errors;
mod validation;

pub use builder::MessageBuilder;
pub use errors::{InvalidMessageReason, MessageError};
pub use validation::validate;
