//! Application layer: use-cases orchestrating domain logic and collaborators.

pub mod identity;
pub mod notifications;

pub use identity::{OnboardProfile, UserService};
pub use notifications::{EmailSender, EmailTemplate, LoggingEmailSender};
