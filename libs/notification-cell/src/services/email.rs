// libs/notification-cell/src/services/email.rs
use std::str::FromStr;

use anyhow::{anyhow, Result};
use lettre::{
    message::{header::ContentType, Mailbox, Message},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use tracing::debug;

use shared_config::AppConfig;

/// Plain-text transactional email. Disabled unless SMTP is configured;
/// callers treat delivery as best-effort.
#[derive(Clone)]
pub struct EmailService {
    enabled: bool,
    host: Option<String>,
    port: u16,
    username: Option<String>,
    password: Option<String>,
    from: String,
}

impl EmailService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            enabled: config.is_email_configured(),
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            username: config.smtp_username.clone(),
            password: config.smtp_password.clone(),
            from: config.smtp_from.clone(),
        }
    }

    pub async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        if !self.enabled {
            debug!("Email sending is disabled. Would have sent email to: {}", to);
            return Ok(());
        }

        if !to.contains('@') {
            return Err(anyhow!("Invalid recipient email address: {}", to));
        }

        let host = self
            .host
            .as_deref()
            .ok_or_else(|| anyhow!("SMTP host not configured"))?;

        let from_mailbox = Mailbox::from_str(&self.from)
            .map_err(|e| anyhow!("Invalid from address: {}", e))?;
        let to_mailbox =
            Mailbox::from_str(to).map_err(|e| anyhow!("Invalid to address: {}", e))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| anyhow!("Failed to build email: {}", e))?;

        let mut mailer_builder = SmtpTransport::starttls_relay(host)
            .map_err(|e| anyhow!("Failed to create SMTP transport: {}", e))?
            .port(self.port);

        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            mailer_builder =
                mailer_builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        let mailer = mailer_builder.build();

        mailer
            .send(&email)
            .map_err(|e| anyhow!("Failed to send email: {}", e))?;

        debug!("Email sent successfully to: {}", to);
        Ok(())
    }
}
