//! Outbound email via the Resend HTTP API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

use crate::kernel::BaseMailer;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Mailer backed by the Resend transactional email API
pub struct ResendMailer {
    client: Client,
    api_key: String,
    from: String,
}

impl ResendMailer {
    pub fn new(api_key: String, from: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            from,
        }
    }
}

#[async_trait]
impl BaseMailer for ResendMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        let request = SendEmailRequest {
            from: &self.from,
            to: [to],
            subject,
            html,
        };

        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to reach the Resend API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Resend API error ({}): {}", status, body);
            anyhow::bail!("Resend API error {}", status);
        }

        info!("Email sent to: {}", to);
        Ok(())
    }
}

/// Fallback mailer for environments without a Resend key. Logs the message
/// instead of delivering it.
pub struct LogMailer;

#[async_trait]
impl BaseMailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        info!(
            to = %to,
            subject = %subject,
            body_bytes = html.len(),
            "Email delivery disabled, logging instead"
        );
        Ok(())
    }
}
