use crate::config::email::{app_url_from_env, EmailConfig};
use anyhow::Result;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;

#[derive(Clone)]
pub struct EmailService {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from_address: Option<String>,
    app_url: String,
    send_timeout: Duration,
}

impl EmailService {
    /// Build from environment variables. If SMTP is not configured, email
    /// sending is silently skipped (graceful degradation).
    pub fn from_env() -> Self {
        match EmailConfig::from_env() {
            Some(cfg) => {
                let creds = Credentials::new(cfg.smtp_username.clone(), cfg.smtp_password.clone());
                let transport = if cfg.smtp_tls {
                    AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.smtp_host)
                } else {
                    Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(
                        &cfg.smtp_host,
                    ))
                }
                .map(|builder| builder.port(cfg.smtp_port).credentials(creds).build());

                match transport {
                    Ok(t) => Self {
                        transport: Some(t),
                        from_address: Some(cfg.from_address),
                        app_url: cfg.app_url,
                        send_timeout: Duration::from_secs(cfg.send_timeout_secs),
                    },
                    Err(e) => {
                        tracing::warn!("Failed to build SMTP transport: {e}");
                        Self {
                            transport: None,
                            from_address: None,
                            app_url: cfg.app_url,
                            send_timeout: Duration::from_secs(cfg.send_timeout_secs),
                        }
                    }
                }
            }
            None => Self {
                transport: None,
                from_address: None,
                app_url: app_url_from_env(),
                send_timeout: Duration::from_secs(10),
            },
        }
    }

    /// Returns true if SMTP is configured and available.
    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    /// Send a password-reset email carrying the signed token link.
    /// Silently succeeds if SMTP is not configured.
    pub async fn send_reset_email(&self, to: &str, token: &str) -> Result<()> {
        let link = format!("{}/reset_password/{}", self.app_url, token);
        let body = format!(
            "To reset your password, visit the following link:\n\n{}\n\nIf you did not make this request then simply ignore this email and no changes will be made.",
            link
        );

        self.send_email(to, "Password Reset Request", &body).await
    }

    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let transport = match &self.transport {
            Some(t) => t,
            None => {
                tracing::debug!("SMTP not configured, skipping email to {to}");
                return Ok(());
            }
        };
        let from_address = match &self.from_address {
            Some(f) => f,
            None => return Ok(()),
        };

        let email = Message::builder()
            .from(parse_mailbox(from_address)?)
            .to(parse_mailbox(to)?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        // A slow mail server must not hang the request.
        match tokio::time::timeout(self.send_timeout, transport.send(email)).await {
            Ok(result) => {
                result?;
                tracing::info!("Email sent to {to}: {subject}");
                Ok(())
            }
            Err(_) => Err(anyhow::anyhow!(
                "Email send to {to} timed out after {:?}",
                self.send_timeout
            )),
        }
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox> {
    address
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid mail address '{}': {}", address, e))
}
