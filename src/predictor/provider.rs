use async_trait::async_trait;

use crate::domain::{PredictionQuery, PredictionResult};
use crate::error::PredictionError;

/// Trait that every win-probability backend must implement.
#[async_trait]
pub trait WinPredictor: Send + Sync {
    /// Ask for the batting side's win probability. Exactly one request per call.
    async fn predict(&self, query: &PredictionQuery) -> Result<PredictionResult, PredictionError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
