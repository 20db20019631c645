//! Outbound mail.
//!
//! Senders hand messages to a bounded queue and move on; a single worker
//! task owns the SMTP transport and drains the queue. Delivery failures are
//! logged and never reach the request that triggered the send.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::config::Env;

const QUEUE_CAPACITY: usize = 64;
const FROM_ADDRESS: &str = "Rental System <no-reply@yourdomain.com>";

#[derive(Debug, Clone)]
pub struct Mail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("message build failed: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("smtp failure: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, mail: &Mail) -> Result<(), MailError>;
}

pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailTransport {
    pub fn from_env(env: &Env) -> Result<Self, MailError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&env.mail_host)
                .port(env.mail_port);
        if let (Some(username), Some(password)) = (&env.mail_username, &env.mail_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }
        Ok(Self {
            transport: builder.build(),
            from: FROM_ADDRESS.parse()?,
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn deliver(&self, mail: &Mail) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(mail.to.parse()?)
            .subject(mail.subject.clone())
            .body(mail.text.clone())?;
        self.transport.send(message).await?;
        Ok(())
    }
}

/// Handle to the mail queue. Cheap to clone; all clones feed one worker.
#[derive(Clone)]
pub struct Mailer {
    tx: mpsc::Sender<Mail>,
}

impl Mailer {
    pub fn start(transport: Arc<dyn MailTransport>) -> Self {
        let (tx, mut rx) = mpsc::channel::<Mail>(QUEUE_CAPACITY);
        tokio::spawn(async move {
            while let Some(mail) = rx.recv().await {
                if let Err(e) = transport.deliver(&mail).await {
                    tracing::warn!("failed to send mail to {}: {e}", mail.to);
                }
            }
        });
        Self { tx }
    }

    /// Non-blocking, at-most-once. A full queue drops the message.
    pub fn enqueue(&self, mail: Mail) {
        if let Err(e) = self.tx.try_send(mail) {
            tracing::warn!("mail queue rejected message: {e}");
        }
    }
}
