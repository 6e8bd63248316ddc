//! Outbound e-mail notifications

pub mod email;

pub use email::{EmailSender, EmailTemplate, LoggingEmailSender};

#[cfg(test)]
pub(crate) use email::test_support;
