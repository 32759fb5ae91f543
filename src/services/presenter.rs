//! Small text-shaping helpers shared by the console reports and the
//! insights file. The engine itself never formats text.

use crate::domain::{MatchRecord, Participants, SetResult, Side};

/// Compact score line like "6-3, 7-6[tiebreak]".
pub(crate) fn score_line(sets: &[SetResult]) -> String {
    sets.iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// "Ada & Bea" for a team, plain name for a single player.
pub(crate) fn names_label(names: &[String]) -> String {
    names.join(" & ")
}

/// Opponent description for one player's recent-results list.
pub(crate) fn opponent_label(entry: &MatchRecord, name: &str) -> String {
    match (&entry.participants, entry.participants.side_of(name)) {
        (Participants::Singles { players }, Some(Side::A)) => players[1].clone(),
        (Participants::Singles { players }, Some(Side::B)) => players[0].clone(),
        (Participants::Doubles { teams }, Some(side)) => {
            let (own, opp) = match side {
                Side::A => (&teams[0], &teams[1]),
                Side::B => (&teams[1], &teams[0]),
            };
            format!("{} vs {}", names_label(opp), names_label(own))
        }
        (_, None) => entry
            .participants
            .all_names()
            .cloned()
            .collect::<Vec<_>>()
            .join(" / "),
    }
}
