use crate::error::CoachError;
use crate::notify::composer::Notification;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivers one email. Credentials and sessions are the transport's concern.
#[allow(async_fn_in_trait)]
pub trait MailTransport {
    fn name(&self) -> &str;

    async fn deliver(&self, email: &OutgoingEmail) -> anyhow::Result<()>;
}

pub struct NotificationDispatcher<'a, T: MailTransport> {
    transport: &'a T,
}

impl<'a, T: MailTransport> NotificationDispatcher<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        NotificationDispatcher { transport }
    }

    /// Send once. A missing recipient is a configuration error raised before
    /// the transport is touched; a transport failure is reported as `false`.
    pub async fn send(&self, notification: &Notification, recipient: Option<&str>) -> Result<bool, CoachError> {
        let to = recipient
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| CoachError::config("Missing recipient address (set TO_EMAIL or email.recipient)"))?;

        let email = OutgoingEmail {
            to: to.to_string(),
            subject: notification.subject.clone(),
            body: notification.body.clone(),
        };

        match self.transport.deliver(&email).await {
            Ok(()) => {
                tracing::info!(transport = self.transport.name(), to = %email.to, "Email sent");
                Ok(true)
            }
            Err(e) => {
                tracing::error!(
                    transport = self.transport.name(),
                    to = %email.to,
                    error = %format!("{:#}", e),
                    "Email send failed"
                );
                Ok(false)
            }
        }
    }
}
