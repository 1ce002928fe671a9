//! Outbound webhook notifier.
//!
//! The trait keeps delivery injectable for tests; the production
//! implementation posts to a Discord-style webhook with a blocking
//! client. One attempt per call, no retries: rate limiting and budget
//! enforcement live in the evaluator, not here.

use crate::config::WEBHOOK_PLACEHOLDER;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use std::time::Duration;

/// What actually happened to a message handed to the notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// Webhook URL still holds the placeholder; nothing was sent.
    SkippedUnconfigured,
}

pub trait Notifier {
    /// Deliver a text message. At most one attempt; a failure is
    /// reported to the caller, which traces it and moves on.
    fn send(&self, message: &str) -> AppResult<Delivery>;
}

pub struct WebhookNotifier {
    url: String,
    client: reqwest::blocking::Client,
}

impl WebhookNotifier {
    pub fn new(url: &str) -> AppResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Delivery(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

impl Notifier for WebhookNotifier {
    fn send(&self, message: &str) -> AppResult<Delivery> {
        // Guard against a fresh install: the default config ships with
        // a placeholder URL and must never hit the network.
        if self.url.trim().is_empty() || self.url.contains(WEBHOOK_PLACEHOLDER) {
            warning(
                "Webhook URL is still at its default value. \
                 Set webhook_url in the config file to enable notifications.",
            );
            return Ok(Delivery::SkippedUnconfigured);
        }

        let payload = serde_json::json!({ "content": message });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .map_err(|e| AppError::Delivery(format!("POST request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Delivery(format!(
                "HTTP {} from webhook",
                response.status()
            )));
        }

        Ok(Delivery::Delivered)
    }
}
