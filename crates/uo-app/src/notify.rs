//! Outbound webhook notification.
//!
//! One JSON POST per logged result. Fire-and-forget: a failed delivery is
//! the caller's problem only if they asked for it; the service layer just
//! logs a warning and moves on.

use serde::Serialize;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Payload POSTed for one result value.
#[derive(Debug, Clone, Serialize)]
pub struct ResultNotification<'a> {
    pub tool: &'a str,
    pub parameter: &'a str,
    pub value: f64,
    pub unit: &'a str,
}

pub struct WebhookNotifier {
    url: String,
    client: reqwest::blocking::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> AppResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| AppError::External {
                what: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// POST one notification. No retries.
    pub fn notify(&self, payload: &ResultNotification<'_>) -> AppResult<()> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .map_err(|e| AppError::External {
                what: format!("webhook POST failed: {e}"),
            })?;
        if !response.status().is_success() {
            return Err(AppError::External {
                what: format!("webhook returned {}", response.status()),
            });
        }
        Ok(())
    }
}
