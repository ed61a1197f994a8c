use std::convert::Infallible;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

use reqwest::{Client, StatusCode};

use serde::Serialize;

use secrecy::Secret;

use thiserror::Error;

use url::Url;

use crate::domain::SenderIdentity;

// The provider issues API keys with a fixed prefix; anything else is a config mistake
const API_KEY_PREFIX: &str = "re_";

#[derive(Debug)]
pub struct EmailClient {
    client: Client,
    sender: String,

    api_send_url: Url,
    api_auth_token: EmailAuthorizationToken,
}

impl EmailClient {
    pub fn new(
        sender: String,
        api_timeout: Duration,
        api_base_url: Url,
        api_auth_token: EmailAuthorizationToken,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(api_timeout)
            .build()
            .context("Failed to build http client")?;

        let api_send_url = api_base_url
            .join("emails")
            .context("Failed to create send email endpoint URL")?;

        Ok(Self {
            client,
            sender,
            api_send_url,
            api_auth_token,
        })
    }

    /// Deliver one rendered email. Credential and sender format problems fail
    /// locally, before any provider call.
    #[tracing::instrument(name = "Send an email via provider API", skip(self, email))]
    pub async fn send(&self, recipient: &str, email: &Email) -> Result<(), SendError> {
        use secrecy::ExposeSecret;

        let api_key = self.api_auth_token.expose_secret();
        if !api_key.starts_with(API_KEY_PREFIX) {
            return Err(SendError::Misconfigured(format!(
                "Invalid API key format. Key should start with \"{}\"",
                API_KEY_PREFIX
            )));
        }

        let sender: SenderIdentity = self.sender.parse().map_err(SendError::Misconfigured)?;

        let body = SendEmailRequest {
            from: sender.as_ref(),
            to: recipient,
            subject: &email.subject,
            text: &email.text_body,
            html: &email.html_body,
        };

        let res = self
            .client
            .post(self.api_send_url.clone())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(SendError::Provider { status, body });
        }

        Ok(())
    }
}

/// A fully rendered email, ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("Sender misconfiguration: {0}")]
    Misconfigured(String),

    #[error("Provider error: {status} {body}")]
    Provider { status: StatusCode, body: String },

    #[error("Failed to reach email provider: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug)]
pub struct EmailAuthorizationToken(Secret<String>);

impl FromStr for EmailAuthorizationToken {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Infallible> {
        let value = value.to_string();
        let value = Secret::new(value);

        Ok(Self(value))
    }
}

impl From<Secret<String>> for EmailAuthorizationToken {
    fn from(value: Secret<String>) -> Self {
        Self(value)
    }
}

impl secrecy::ExposeSecret<String> for EmailAuthorizationToken {
    fn expose_secret(&self) -> &String {
        self.0.expose_secret()
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}
