use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::{
    conf::Settings,
    prelude::{Error, Result},
};

/// Outbound mail. One call sends one plain-text message and reports the
/// relay outcome; nothing is queued or retried.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

pub struct SmtpNotifier {
    host: String,
    port: u16,
    from: String,
    credentials: Credentials,
}

impl SmtpNotifier {
    pub fn new(s: &Settings) -> Self {
        SmtpNotifier {
            host: s.smtp_host.clone(),
            port: s.smtp_port,
            from: s.sender().to_string(),
            credentials: Credentials::new(s.smtp_username.clone(), s.smtp_password.clone()),
        }
    }

    fn mailer(&self) -> Result<SmtpTransport> {
        let mailer = SmtpTransport::starttls_relay(&self.host)
            .map_err(|e| Error::Mail(e.to_string()))?
            .port(self.port)
            .credentials(self.credentials.clone())
            .build();
        Ok(mailer)
    }
}

pub fn build_message(from: &str, to: &str, subject: &str, body: &str) -> Result<Message> {
    let from: Mailbox = from
        .parse()
        .map_err(|e| Error::Mail(format!("invalid sender {from:?}: {e}")))?;
    let to: Mailbox = to
        .parse()
        .map_err(|e| Error::Mail(format!("invalid recipient {to:?}: {e}")))?;
    Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())
        .map_err(|e| Error::Mail(e.to_string()))
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let message = build_message(&self.from, to, subject, body)?;
        let mailer = self.mailer()?;
        tracing::debug!("sending email to {}", to);
        tokio::task::spawn_blocking(move || mailer.send(&message))
            .await
            .map_err(|e| Error::Mail(format!("send task failed: {e}")))?
            .map_err(|e| Error::Mail(e.to_string()))?;
        tracing::info!("email sent to {}", to);
        Ok(())
    }
}
