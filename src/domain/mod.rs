pub mod models;
pub mod teams;

pub use models::{
    MatchInput, MatchSituation, OutcomeDecision, Overs, PredictionQuery, PredictionResult,
    RawSubmission, WinReason,
};
