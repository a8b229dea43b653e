use anyhow::{Context, Result};
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use reqwest::Client;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::CoachError;
use crate::models::build_http_client;
use crate::notify::dispatcher::{MailTransport, OutgoingEmail};

const GMAIL_SEND_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

#[derive(Serialize)]
struct SendRequest {
    raw: String,
}

fn header_value(value: &str) -> String {
    value.chars().filter(|c| *c != '\r' && *c != '\n').collect()
}

/// Plain-text MIME message with base64 encoded subject and body
pub fn build_mime_message(email: &OutgoingEmail) -> String {
    format!(
        "To: {}\r\n\
         Subject: =?UTF-8?B?{}?=\r\n\
         MIME-Version: 1.0\r\n\
         Content-Type: text/plain; charset=\"UTF-8\"\r\n\
         Content-Transfer-Encoding: base64\r\n\
         \r\n\
         {}\r\n",
        header_value(&email.to),
        STANDARD.encode(header_value(&email.subject)),
        STANDARD.encode(&email.body),
    )
}

/// Gmail REST transport. The access token is opaque here; obtaining and
/// refreshing it happens outside this tool.
pub struct GmailTransport {
    access_token: String,
    client: Client,
}

impl GmailTransport {
    pub fn new(access_token: &str, timeout_secs: Option<u64>) -> Result<Self, CoachError> {
        Ok(GmailTransport {
            access_token: access_token.to_string(),
            client: build_http_client(timeout_secs)?,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, CoachError> {
        let token = config.require_access_token()?;
        Self::new(&token, config.email.request_timeout_secs)
    }
}

impl MailTransport for GmailTransport {
    fn name(&self) -> &str {
        "gmail"
    }

    async fn deliver(&self, email: &OutgoingEmail) -> Result<()> {
        let raw = URL_SAFE.encode(build_mime_message(email));
        let response = self
            .client
            .post(GMAIL_SEND_URL)
            .bearer_auth(&self.access_token)
            .json(&SendRequest { raw })
            .send()
            .await
            .context("Failed to connect to Gmail API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Gmail API returned {}: {}",
                status,
                body.chars().take(300).collect::<String>()
            );
        }
        Ok(())
    }
}
