use chrono::{DateTime, Utc};
use serde::Serialize;

use super::orchestrator::Outcome;
use crate::domain::{MatchSituation, WinReason};
use crate::error::{Field, SubmissionError};

/// What the display shows for one submission. Always replaces the previous one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedResult {
    /// Issue order of the submission that produced this result
    pub ticket: u64,
    pub rendered_at: DateTime<Utc>,
    #[serde(flatten)]
    pub view: View,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    Decided {
        winner: String,
        loser: String,
        reason: WinReason,
        message: String,
    },
    Split {
        batting_team: String,
        /// Percentage with two decimals, e.g. "62.00"
        batting_pct: String,
        bowling_team: String,
        bowling_pct: String,
        situation: MatchSituation,
    },
    Error {
        error: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<Field>,
        message: String,
        retryable: bool,
    },
}

pub fn render(ticket: u64, outcome: &Result<Outcome, SubmissionError>) -> RenderedResult {
    let view = match outcome {
        Ok(Outcome::Decided { winner, loser, reason }) => View::Decided {
            winner: winner.clone(),
            loser: loser.clone(),
            reason: *reason,
            message: banner(winner, loser, *reason),
        },
        Ok(Outcome::Predicted { input, result }) => {
            let (batting, bowling) = split_hundredths(result.probability_batting_win);
            View::Split {
                batting_team: input.batting_team.clone(),
                batting_pct: format_pct(batting),
                bowling_team: input.bowling_team.clone(),
                bowling_pct: format_pct(bowling),
                situation: MatchSituation::from_input(input),
            }
        }
        Err(e) => View::Error {
            error: e.kind(),
            field: e.field(),
            message: e.user_message(),
            retryable: e.is_retryable(),
        },
    };
    RenderedResult {
        ticket,
        rendered_at: Utc::now(),
        view,
    }
}

fn banner(winner: &str, loser: &str, reason: WinReason) -> String {
    match reason {
        WinReason::ReachedTarget => format!("{} has already won the match!", winner),
        WinReason::AllOut => format!("{} has already won the match! {} is all out.", winner, loser),
    }
}

/// Splits a batting win probability into hundredths of a percent for both
/// sides. The bowling share is taken from the rounded batting share so the two
/// always add up to exactly 100.00.
fn split_hundredths(p: f64) -> (u32, u32) {
    let batting = (p * 10_000.0).round().clamp(0.0, 10_000.0) as u32;
    (batting, 10_000 - batting)
}

fn format_pct(hundredths: u32) -> String {
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}
