use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{SetKind, SetResult};
use crate::errors::EloCampError;

// Tokens like "6-3", "7-6", or "10-8[tiebreak]".
static SET_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)-(\d+)(?:\[(set|tiebreak)\])?$").expect("set token regex is valid")
});

/// Parse one set token into a structured result. Kind defaults to `set`.
/// Deliberately permissive: no tennis legality check, so "99-99" parses.
pub fn parse_set_token(token: &str) -> Result<SetResult, EloCampError> {
    let invalid = || EloCampError::InvalidSetToken {
        token: token.to_string(),
    };

    let caps = SET_TOKEN_RE.captures(token.trim()).ok_or_else(invalid)?;
    let a: u32 = caps[1].parse().map_err(|_| invalid())?;
    let b: u32 = caps[2].parse().map_err(|_| invalid())?;
    let kind = match caps.get(3).map(|m| m.as_str()) {
        Some("tiebreak") => SetKind::Tiebreak,
        _ => SetKind::Set,
    };
    Ok(SetResult::new(a, b, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_set() {
        assert_eq!(
            parse_set_token("6-3").unwrap(),
            SetResult::new(6, 3, SetKind::Set)
        );
    }

    #[test]
    fn parses_explicit_kind_suffixes() {
        assert_eq!(
            parse_set_token("7-6[set]").unwrap(),
            SetResult::new(7, 6, SetKind::Set)
        );
        assert_eq!(
            parse_set_token("10-8[tiebreak]").unwrap(),
            SetResult::new(10, 8, SetKind::Tiebreak)
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(
            parse_set_token("  6-0 ").unwrap(),
            SetResult::new(6, 0, SetKind::Set)
        );
    }

    #[test]
    fn no_range_validation() {
        assert_eq!(
            parse_set_token("99-99").unwrap(),
            SetResult::new(99, 99, SetKind::Set)
        );
    }

    #[test]
    fn rejects_malformed_tokens() {
        for tok in ["", "6", "6-", "-3", "6:3", "6-3[breaker]", "a-b", "6-3 7-5"] {
            let err = parse_set_token(tok).unwrap_err();
            assert_eq!(
                err,
                EloCampError::InvalidSetToken {
                    token: tok.to_string()
                }
            );
        }
    }

    #[test]
    fn parse_round_trips_through_display() {
        for tok in ["6-3", "7-6", "10-8[tiebreak]", "0-0"] {
            let parsed = parse_set_token(tok).unwrap();
            assert_eq!(parse_set_token(&parsed.to_string()).unwrap(), parsed);
        }
    }
}
