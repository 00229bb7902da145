use crate::domain::models::MAX_WICKETS;
use crate::domain::{MatchInput, OutcomeDecision, WinReason};

/// Decides whether the match is already over before asking the predictor.
///
/// Reaching the target ends the innings on the spot, so it is checked before
/// the all-out rule: a chase completed with the last wicket down is still won
/// by the batting side.
pub fn precheck(input: &MatchInput) -> OutcomeDecision {
    if input.score >= input.target {
        return OutcomeDecision::DeterminedWin {
            winner: input.batting_team.clone(),
            loser: input.bowling_team.clone(),
            reason: WinReason::ReachedTarget,
        };
    }
    if input.wickets == MAX_WICKETS {
        return OutcomeDecision::DeterminedWin {
            winner: input.bowling_team.clone(),
            loser: input.batting_team.clone(),
            reason: WinReason::AllOut,
        };
    }
    OutcomeDecision::Undetermined(input.to_query())
}
