use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use super::provider::WinPredictor;
use crate::domain::{PredictionQuery, PredictionResult};
use crate::error::PredictionError;

/// Client for the external win-rate model served at `<base>/predict`.
#[derive(Clone)]
pub struct PredictorClient {
    http: Client,
    predict_url: String,
}

impl PredictorClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(PredictorClient {
            http,
            predict_url: format!("{}/predict", base_url.trim_end_matches('/')),
        })
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }
}

#[async_trait]
impl WinPredictor for PredictorClient {
    fn name(&self) -> &str {
        "PredictorClient"
    }

    async fn predict(&self, query: &PredictionQuery) -> Result<PredictionResult, PredictionError> {
        debug!("POST {} body={:?}", self.predict_url, query);

        let resp = self
            .http
            .post(&self.predict_url)
            .json(query)
            .send()
            .await
            .map_err(|e| {
                let kind = if e.is_timeout() { "timed out" } else { "request failed" };
                PredictionError::Transport(format!("{}: {}", kind, e))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!("Predictor returned {}: {}", status, body);
            return Err(PredictionError::Transport(format!("predictor returned {}", status)));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| PredictionError::Transport(format!("failed to read response body: {}", e)))?;
        let raw: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|e| PredictionError::InvalidResponse(format!("body is not JSON: {}", e)))?;

        let result = parse_win_rate(&raw)?;
        info!(
            "Prediction {} {:.4} / {} {:.4}",
            query.batting_team,
            result.probability_batting_win,
            query.bowling_team,
            result.probability_bowling_win()
        );
        Ok(result)
    }
}

// ── Parsing helpers ────────────────────────────────────────────────────────────

/// Extracts `Win_rate` (batting side, 0.0–1.0). No clamping: anything outside
/// the unit interval means the predictor contract changed.
fn parse_win_rate(raw: &serde_json::Value) -> Result<PredictionResult, PredictionError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| PredictionError::InvalidResponse(format!("expected a JSON object, got {}", raw)))?;
    let value = obj
        .get("Win_rate")
        .ok_or_else(|| PredictionError::InvalidResponse("missing Win_rate".to_string()))?;
    let p = value
        .as_f64()
        .ok_or_else(|| PredictionError::InvalidResponse(format!("Win_rate is not a number: {}", value)))?;
    if !(0.0..=1.0).contains(&p) {
        return Err(PredictionError::InvalidResponse(format!(
            "Win_rate {} outside [0, 1]",
            p
        )));
    }
    Ok(PredictionResult {
        probability_batting_win: p,
    })
}
