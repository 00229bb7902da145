use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Balls in a full T20 innings (20 overs of 6 legal deliveries).
pub const INNINGS_BALLS: u32 = 120;
pub const MAX_OVERS: u32 = 20;
pub const BALLS_PER_OVER: u32 = 6;
pub const MAX_WICKETS: u8 = 10;

/// A submission exactly as the form sent it. Fields may arrive as JSON
/// strings or numbers; both are kept as text for validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSubmission {
    #[serde(deserialize_with = "string_or_number")]
    pub batting_team: String,
    #[serde(deserialize_with = "string_or_number")]
    pub bowling_team: String,
    /// Venue of the match
    #[serde(deserialize_with = "string_or_number")]
    pub city: String,
    #[serde(deserialize_with = "string_or_number")]
    pub target: String,
    #[serde(deserialize_with = "string_or_number")]
    pub score: String,
    #[serde(rename = "overCompleted", deserialize_with = "string_or_number")]
    pub over_completed: String,
    #[serde(deserialize_with = "string_or_number")]
    pub wickets: String,
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

/// Overs in cricket notation: `12.4` is 12 completed overs plus 4 balls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overs {
    pub completed: u32,
    /// Tenths digit, counted as balls into the current over (0–9)
    pub balls: u32,
}

impl Overs {
    pub fn balls_bowled(&self) -> u32 {
        self.completed * BALLS_PER_OVER + self.balls
    }

    /// The notation as a decimal, e.g. 15 overs 3 balls → `15.3`.
    pub fn as_decimal(&self) -> f64 {
        // Integer division by ten keeps 15.3 bit-identical to the literal.
        (self.completed * 10 + self.balls) as f64 / 10.0
    }
}

/// A validated, normalized match state.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchInput {
    pub batting_team: String,
    pub bowling_team: String,
    pub venue: String,
    /// Runs the batting side needs to win (≥ 1)
    pub target: u32,
    pub score: u32,
    pub overs: Overs,
    /// Wickets fallen (0–10)
    pub wickets: u8,
}

impl MatchInput {
    pub fn to_query(&self) -> PredictionQuery {
        PredictionQuery {
            batting_team: self.batting_team.clone(),
            bowling_team: self.bowling_team.clone(),
            city: self.venue.clone(),
            target: self.target,
            score: self.score,
            over_completed: self.overs.as_decimal(),
            wickets: self.wickets,
        }
    }
}

/// Request body for the external predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionQuery {
    pub batting_team: String,
    pub bowling_team: String,
    pub city: String,
    pub target: u32,
    pub score: u32,
    #[serde(rename = "overCompleted")]
    pub over_completed: f64,
    pub wickets: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    /// Batting side reached the target
    ReachedTarget,
    /// Batting side lost all ten wickets short of the target
    AllOut,
}

/// What the pre-check concluded about a match state.
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeDecision {
    DeterminedWin {
        winner: String,
        loser: String,
        reason: WinReason,
    },
    Undetermined(PredictionQuery),
}

/// Win probability as reported by the predictor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    /// Batting side win probability (0.0–1.0)
    pub probability_batting_win: f64,
}

impl PredictionResult {
    pub fn probability_bowling_win(&self) -> f64 {
        1.0 - self.probability_batting_win
    }
}

/// Chase figures derived from the match state, shown next to a prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSituation {
    pub runs_left: u32,
    pub balls_left: u32,
    pub wickets_left: u8,
    /// Current run rate (runs per over)
    pub crr: f64,
    /// Required run rate (runs per over)
    pub rrr: f64,
}

impl MatchSituation {
    pub fn from_input(input: &MatchInput) -> Self {
        let bowled = input.overs.balls_bowled();
        let balls_left = INNINGS_BALLS.saturating_sub(bowled);
        let runs_left = input.target.saturating_sub(input.score);
        let crr = if bowled > 0 {
            input.score as f64 / (bowled as f64 / BALLS_PER_OVER as f64)
        } else {
            0.0
        };
        let rrr = if balls_left > 0 {
            runs_left as f64 / (balls_left as f64 / BALLS_PER_OVER as f64)
        } else {
            0.0
        };
        MatchSituation {
            runs_left,
            balls_left,
            wickets_left: MAX_WICKETS - input.wickets.min(MAX_WICKETS),
            crr,
            rrr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn chase(score: u32, completed: u32, balls: u32, wickets: u8) -> MatchInput {
        MatchInput {
            batting_team: "Mumbai Indians".into(),
            bowling_team: "Chennai Super Kings".into(),
            venue: "Mumbai".into(),
            target: 180,
            score,
            overs: Overs { completed, balls },
            wickets,
        }
    }

    #[test]
    fn overs_notation_counts_balls() {
        let o = Overs { completed: 12, balls: 4 };
        assert_eq!(o.balls_bowled(), 76);
        assert_eq!(Overs { completed: 15, balls: 3 }.as_decimal(), 15.3);
        assert_eq!(Overs { completed: 20, balls: 0 }.as_decimal(), 20.0);
    }

    #[test]
    fn query_serializes_with_predictor_field_names() {
        let q = chase(120, 15, 3, 4).to_query();
        let v = serde_json::to_value(&q).unwrap();
        assert_eq!(v["batting_team"], "Mumbai Indians");
        assert_eq!(v["bowling_team"], "Chennai Super Kings");
        assert_eq!(v["city"], "Mumbai");
        assert_eq!(v["target"], 180);
        assert_eq!(v["score"], 120);
        assert_eq!(v["overCompleted"], 15.3);
        assert_eq!(v["wickets"], 4);
    }

    #[test]
    fn raw_submission_tolerates_missing_fields() {
        let raw: RawSubmission =
            serde_json::from_str(r#"{"batting_team":"Mumbai Indians","overCompleted":"3.2"}"#)
                .unwrap();
        assert_eq!(raw.over_completed, "3.2");
        assert!(raw.target.is_empty());
    }

    #[test]
    fn raw_submission_accepts_numeric_fields() {
        let raw: RawSubmission = serde_json::from_str(
            r#"{"city":"Mumbai","target":180,"score":120,"overCompleted":15.3,"wickets":4,"bowling_team":null}"#,
        )
        .unwrap();
        assert_eq!(raw.target, "180");
        assert_eq!(raw.score, "120");
        assert_eq!(raw.over_completed, "15.3");
        assert_eq!(raw.wickets, "4");
        assert!(raw.bowling_team.is_empty());
    }

    #[test]
    fn raw_submission_rejects_structured_fields() {
        assert!(serde_json::from_str::<RawSubmission>(r#"{"target":[180]}"#).is_err());
        assert!(serde_json::from_str::<RawSubmission>(r#"{"wickets":true}"#).is_err());
    }

    #[test]
    fn situation_mid_chase() {
        // 120 off 15.3 overs chasing 180: 60 needed from 27 balls
        let s = MatchSituation::from_input(&chase(120, 15, 3, 4));
        assert_eq!(s.runs_left, 60);
        assert_eq!(s.balls_left, 27);
        assert_eq!(s.wickets_left, 6);
        assert_relative_eq!(s.crr, 120.0 / (93.0 / 6.0), epsilon = 1e-9);
        assert_relative_eq!(s.rrr, 60.0 / 4.5, epsilon = 1e-9);
    }

    #[test]
    fn situation_rates_are_zero_at_the_edges() {
        let start = MatchSituation::from_input(&chase(0, 0, 0, 0));
        assert_relative_eq!(start.crr, 0.0);
        assert_eq!(start.balls_left, 120);

        let end = MatchSituation::from_input(&chase(170, 20, 0, 7));
        assert_eq!(end.balls_left, 0);
        assert_relative_eq!(end.rrr, 0.0);
    }

    #[test]
    fn bowling_probability_is_complement() {
        let r = PredictionResult { probability_batting_win: 0.62 };
        assert_relative_eq!(r.probability_bowling_win(), 0.38, epsilon = 1e-12);
    }
}
