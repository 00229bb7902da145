use std::sync::Arc;

use tracing::{info, warn};

use super::precheck::precheck;
use super::render::{render, RenderedResult};
use super::result_slot::ResultSlot;
use super::validate::validate;
use crate::config::VenuePolicy;
use crate::domain::models::INNINGS_BALLS;
use crate::domain::{MatchInput, OutcomeDecision, PredictionResult, RawSubmission, WinReason};
use crate::error::SubmissionError;
use crate::predictor::WinPredictor;

/// Successful end of the pipeline for one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Match already over; the predictor was not asked.
    Decided {
        winner: String,
        loser: String,
        reason: WinReason,
    },
    Predicted {
        input: MatchInput,
        result: PredictionResult,
    },
}

/// Result of [`Orchestrator::submit_and_render`].
#[derive(Debug, Clone)]
pub struct Submission {
    pub rendered: RenderedResult,
    /// False when a newer submission had already been rendered.
    pub applied: bool,
}

/// Runs validate → pre-check → (optional) prediction for each submission and
/// keeps the last rendered result.
pub struct Orchestrator {
    predictor: Arc<dyn WinPredictor>,
    venue_policy: VenuePolicy,
    slot: ResultSlot,
}

impl Orchestrator {
    pub fn new(predictor: Arc<dyn WinPredictor>, venue_policy: VenuePolicy) -> Self {
        Orchestrator {
            predictor,
            venue_policy,
            slot: ResultSlot::new(),
        }
    }

    pub fn slot(&self) -> &ResultSlot {
        &self.slot
    }

    /// The decision pipeline. Makes at most one predictor call, and none when
    /// the input is invalid or the match is already decided.
    pub async fn submit(&self, raw: &RawSubmission) -> Result<Outcome, SubmissionError> {
        let input = validate(raw, self.venue_policy)?;

        match precheck(&input) {
            OutcomeDecision::DeterminedWin { winner, loser, reason } => {
                info!("Match already decided: {} beat {} ({:?})", winner, loser, reason);
                Ok(Outcome::Decided { winner, loser, reason })
            }
            OutcomeDecision::Undetermined(query) => {
                info!(
                    "Requesting prediction from {}: {} need {} off {} balls, {} wickets down",
                    self.predictor.name(),
                    query.batting_team,
                    query.target.saturating_sub(query.score),
                    INNINGS_BALLS.saturating_sub(input.overs.balls_bowled()),
                    query.wickets
                );
                let result = self.predictor.predict(&query).await?;
                Ok(Outcome::Predicted { input, result })
            }
        }
    }

    /// Runs [`submit`](Self::submit), renders whatever came out and commits it
    /// to the result slot, unless a newer submission got there first.
    pub async fn submit_and_render(&self, raw: &RawSubmission) -> Submission {
        let ticket = self.slot.issue();
        let outcome = self.submit(raw).await;
        self.finish(ticket, outcome).await
    }

    /// A submission whose body never made it to validation still produces a
    /// rendered error and replaces whatever was shown before.
    pub async fn reject_and_render(&self, err: SubmissionError) -> Submission {
        let ticket = self.slot.issue();
        self.finish(ticket, Err(err)).await
    }

    async fn finish(&self, ticket: u64, outcome: Result<Outcome, SubmissionError>) -> Submission {
        if let Err(e) = &outcome {
            warn!("Submission #{} failed: {}", ticket, e);
        }
        let rendered = render(ticket, &outcome);
        let applied = self.slot.commit(rendered.clone()).await;
        Submission { rendered, applied }
    }
}
