//! Turns a raw form submission into a validated [`MatchInput`].
//!
//! Team equality is checked first, before anything else is parsed, so a
//! submission naming the same side twice is always reported as such.

use std::str::FromStr;

use tracing::warn;

use crate::config::VenuePolicy;
use crate::domain::models::{MAX_OVERS, MAX_WICKETS};
use crate::domain::teams::{canonical_team, canonical_venue};
use crate::domain::{MatchInput, Overs, RawSubmission};
use crate::error::{Field, ValidationError};

pub fn validate(raw: &RawSubmission, policy: VenuePolicy) -> Result<MatchInput, ValidationError> {
    let batting = raw.batting_team.trim();
    let bowling = raw.bowling_team.trim();
    if batting.eq_ignore_ascii_case(bowling) {
        return Err(ValidationError::SameTeam);
    }

    let batting_team = team(batting, Field::BattingTeam)?;
    let bowling_team = team(bowling, Field::BowlingTeam)?;
    let venue = venue(&raw.city, policy)?;

    let target: u32 = integer(&raw.target, Field::Target)?;
    if target < 1 {
        return Err(ValidationError::invalid(Field::Target, "must be at least 1"));
    }
    let score: u32 = integer(&raw.score, Field::Score)?;
    let overs = overs(&raw.over_completed)?;
    let wickets: u8 = integer(&raw.wickets, Field::Wickets)?;
    if wickets > MAX_WICKETS {
        return Err(ValidationError::invalid(
            Field::Wickets,
            format!("must be between 0 and {}", MAX_WICKETS),
        ));
    }

    Ok(MatchInput {
        batting_team: batting_team.to_string(),
        bowling_team: bowling_team.to_string(),
        venue,
        target,
        score,
        overs,
        wickets,
    })
}

fn team(name: &str, field: Field) -> Result<&'static str, ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::invalid(field, "is required"));
    }
    canonical_team(name).ok_or_else(|| ValidationError::invalid(field, format!("unknown team '{}'", name)))
}

fn venue(raw: &str, policy: VenuePolicy) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::invalid(Field::City, "is required"));
    }
    match (canonical_venue(name), policy) {
        (Some(known), _) => Ok(known.to_string()),
        (None, VenuePolicy::Advisory) => {
            warn!("Unknown venue '{}' accepted (advisory venue policy)", name);
            Ok(name.to_string())
        }
        (None, VenuePolicy::Strict) => Err(ValidationError::invalid(
            Field::City,
            format!("unknown venue '{}'", name),
        )),
    }
}

/// Plain digits only: no sign, no decimal point, no exponent.
fn integer<T: FromStr>(raw: &str, field: Field) -> Result<T, ValidationError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ValidationError::invalid(field, "is required"));
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::invalid(
            field,
            format!("'{}' is not a valid whole number", s),
        ));
    }
    s.parse()
        .map_err(|_| ValidationError::invalid(field, format!("'{}' is out of range", s)))
}

/// Parses overs as a decimal with at most one fractional digit: `15`, `15.`,
/// `15.3` or `.5`. The tenths digit is read as balls into the current over,
/// the same way the predictor reads it.
fn overs(raw: &str) -> Result<Overs, ValidationError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ValidationError::invalid(Field::OverCompleted, "is required"));
    }
    let bad = || ValidationError::invalid(Field::OverCompleted, format!("'{}' is not a decimal number of overs", s));

    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
    if (whole.is_empty() && frac.is_empty()) || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    let completed: u32 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| bad())?
    };
    let balls: u32 = match frac.as_bytes() {
        [] => 0,
        [d] if d.is_ascii_digit() => u32::from(d - b'0'),
        _ => return Err(bad()),
    };

    if completed > MAX_OVERS || (completed == MAX_OVERS && balls > 0) {
        return Err(ValidationError::invalid(
            Field::OverCompleted,
            format!("must be between 0 and {}", MAX_OVERS),
        ));
    }
    Ok(Overs { completed, balls })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::teams::TEAMS;

    fn raw() -> RawSubmission {
        RawSubmission {
            batting_team: "Mumbai Indians".into(),
            bowling_team: "Chennai Super Kings".into(),
            city: "Mumbai".into(),
            target: "180".into(),
            score: "120".into(),
            over_completed: "15.3".into(),
            wickets: "4".into(),
        }
    }

    fn field_of(err: ValidationError) -> Field {
        match err {
            ValidationError::InvalidField { field, .. } => field,
            other => panic!("expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn accepts_a_well_formed_chase() {
        let input = validate(&raw(), VenuePolicy::Strict).unwrap();
        assert_eq!(input.batting_team, "Mumbai Indians");
        assert_eq!(input.venue, "Mumbai");
        assert_eq!(input.target, 180);
        assert_eq!(input.score, 120);
        assert_eq!(input.overs, Overs { completed: 15, balls: 3 });
        assert_eq!(input.wickets, 4);
    }

    #[test]
    fn normalizes_names_to_canonical_spelling() {
        let mut r = raw();
        r.batting_team = " mumbai INDIANS ".into();
        r.city = "cape town".into();
        let input = validate(&r, VenuePolicy::Strict).unwrap();
        assert_eq!(input.batting_team, "Mumbai Indians");
        assert_eq!(input.venue, "Cape Town");
    }

    #[test]
    fn same_team_rejected_for_every_team() {
        for t in TEAMS {
            let mut r = raw();
            r.batting_team = t.to_string();
            r.bowling_team = t.to_uppercase();
            assert_eq!(validate(&r, VenuePolicy::Strict), Err(ValidationError::SameTeam));
        }
    }

    #[test]
    fn same_team_wins_over_other_field_errors() {
        let mut r = raw();
        r.bowling_team = r.batting_team.clone();
        r.target = "abc".into();
        r.wickets = "11".into();
        r.city = String::new();
        assert_eq!(validate(&r, VenuePolicy::Strict), Err(ValidationError::SameTeam));
    }

    #[test]
    fn unknown_or_missing_team_is_invalid_field() {
        let mut r = raw();
        r.bowling_team = "Gujarat Titans".into();
        assert_eq!(field_of(validate(&r, VenuePolicy::Strict).unwrap_err()), Field::BowlingTeam);

        let mut r = raw();
        r.batting_team = String::new();
        assert_eq!(field_of(validate(&r, VenuePolicy::Strict).unwrap_err()), Field::BattingTeam);
    }

    #[test]
    fn venue_policy_is_applied_consistently() {
        let mut r = raw();
        r.city = "Lord's".into();
        assert_eq!(field_of(validate(&r, VenuePolicy::Strict).unwrap_err()), Field::City);
        assert_eq!(validate(&r, VenuePolicy::Advisory).unwrap().venue, "Lord's");

        r.city = "   ".into();
        assert_eq!(field_of(validate(&r, VenuePolicy::Advisory).unwrap_err()), Field::City);
    }

    #[test]
    fn target_must_be_positive_integer() {
        for bad in ["0", "-5", "", "12.5", "1e3", "180runs"] {
            let mut r = raw();
            r.target = bad.into();
            assert_eq!(
                field_of(validate(&r, VenuePolicy::Strict).unwrap_err()),
                Field::Target,
                "target {:?}",
                bad
            );
        }
    }

    #[test]
    fn score_zero_is_fine_negative_is_not() {
        let mut r = raw();
        r.score = "0".into();
        assert_eq!(validate(&r, VenuePolicy::Strict).unwrap().score, 0);
        r.score = "-1".into();
        assert_eq!(field_of(validate(&r, VenuePolicy::Strict).unwrap_err()), Field::Score);
    }

    #[test]
    fn wickets_bounded_at_ten() {
        let mut r = raw();
        r.wickets = "10".into();
        assert_eq!(validate(&r, VenuePolicy::Strict).unwrap().wickets, 10);
        for bad in ["11", "-1", "", "two"] {
            r.wickets = bad.into();
            assert_eq!(field_of(validate(&r, VenuePolicy::Strict).unwrap_err()), Field::Wickets);
        }
    }

    #[test]
    fn overs_accept_any_single_tenths_digit_up_to_twenty() {
        let ok = [
            ("0", Overs { completed: 0, balls: 0 }),
            ("0.1", Overs { completed: 0, balls: 1 }),
            (".5", Overs { completed: 0, balls: 5 }),
            ("12.", Overs { completed: 12, balls: 0 }),
            ("15.7", Overs { completed: 15, balls: 7 }),
            ("19.5", Overs { completed: 19, balls: 5 }),
            ("19.9", Overs { completed: 19, balls: 9 }),
            ("20", Overs { completed: 20, balls: 0 }),
            ("20.0", Overs { completed: 20, balls: 0 }),
        ];
        for (s, expected) in ok {
            assert_eq!(overs(s).unwrap(), expected, "overs {:?}", s);
        }
        for bad in ["", ".", "-1", "20.1", "21", "15.33", "15.x", "abc", "+3", "1e1"] {
            assert_eq!(field_of(overs(bad).unwrap_err()), Field::OverCompleted, "overs {:?}", bad);
        }
    }

    #[test]
    fn tenths_digit_counts_as_balls() {
        assert_eq!(overs("15.7").unwrap().balls_bowled(), 97);
        assert_eq!(overs(".5").unwrap().balls_bowled(), 5);
        assert_eq!(overs("15.7").unwrap().as_decimal(), 15.7);
    }

    fn with_numeric(field: Field, value: &str) -> RawSubmission {
        let mut r = raw();
        match field {
            Field::Target => r.target = value.into(),
            Field::Score => r.score = value.into(),
            Field::OverCompleted => r.over_completed = value.into(),
            Field::Wickets => r.wickets = value.into(),
            other => panic!("{} is not numeric", other),
        }
        r
    }

    #[test]
    fn signs_are_rejected_on_every_numeric_field() {
        for field in [Field::Target, Field::Score, Field::OverCompleted, Field::Wickets] {
            for signed in ["+5", "-5"] {
                let r = with_numeric(field, signed);
                assert_eq!(
                    field_of(validate(&r, VenuePolicy::Strict).unwrap_err()),
                    field,
                    "{} = {:?}",
                    field,
                    signed
                );
            }
        }
    }
}
