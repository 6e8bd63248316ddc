use async_trait::async_trait;
use tracing::info;

use crate::domain::DomainResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTemplate {
    OnboardEmail,
    VerifyEmail,
}

impl EmailTemplate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnboardEmail => "onboard-email",
            Self::VerifyEmail => "verify-email",
        }
    }
}

/// Port for dispatching templated e-mails.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, template: EmailTemplate, user_id: &str) -> DomainResult<()>;
}

/// Sender that records the dispatch in the log instead of delivering mail.
#[derive(Debug, Default, Clone)]
pub struct LoggingEmailSender;

#[async_trait]
impl EmailSender for LoggingEmailSender {
    async fn send(&self, to: &str, template: EmailTemplate, user_id: &str) -> DomainResult<()> {
        info!(user_id, to, template = template.as_str(), "Email dispatched");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone)]
    pub struct SentEmail {
        pub to: String,
        pub template: EmailTemplate,
        pub user_id: String,
    }

    #[derive(Default)]
    pub struct RecordingEmailSender {
        sent: Mutex<Vec<SentEmail>>,
    }

    impl RecordingEmailSender {
        pub fn sent(&self) -> Vec<SentEmail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EmailSender for RecordingEmailSender {
        async fn send(
            &self,
            to: &str,
            template: EmailTemplate,
            user_id: &str,
        ) -> DomainResult<()> {
            self.sent.lock().unwrap().push(SentEmail {
                to: to.to_string(),
                template,
                user_id: user_id.to_string(),
            });
            Ok(())
        }
    }
}
