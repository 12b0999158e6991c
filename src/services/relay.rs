// src/services/relay.rs
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use super::upstream::{UpstreamReply, UpstreamRequest, error_message};
use crate::config::RelayConfig;
use crate::error::AppError;

/// Outcome of one relayed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReply {
    pub text: String,
    /// True when the upstream body was unrecognized and the canned reply was used.
    pub degraded: bool,
}

/// Forwards single messages to the configured upstream.
#[derive(Debug, Clone, Default)]
pub struct RelayClient {
    http: reqwest::Client,
}

impl RelayClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    pub async fn relay(&self, config: &RelayConfig, message: &str) -> Result<RelayReply, AppError> {
        let api_key = config.api_key()?;
        let mode = &config.mode;
        let url = mode.url();

        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&UpstreamRequest::build(mode, message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                url = %url,
                response = %body,
                "upstream API error"
            );
            return Err(AppError::UpstreamFailure(error_message(status.as_u16(), &body)));
        }

        let data: Value = response.json().await?;
        tracing::debug!(response = %data, "upstream API response");

        let reply = UpstreamReply::decode(mode, &data);
        let degraded = !reply.is_recognized();
        if degraded {
            tracing::warn!(response = %data, "unexpected upstream response format");
        }

        Ok(RelayReply {
            text: reply.into_text(),
            degraded,
        })
    }
}
