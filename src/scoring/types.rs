use serde::{Deserialize, Serialize};

/// Outcome of a head-to-head comparison between the home and visiting side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Home,
    Visiting,
    Draw,
}

impl Winner {
    /// Strict numeric comparison; equal values are a draw.
    pub fn compare<T: PartialOrd>(home: T, visiting: T) -> Self {
        if home > visiting {
            Winner::Home
        } else if visiting > home {
            Winner::Visiting
        } else {
            Winner::Draw
        }
    }
}

/// A participant after parsing and aggregation.
///
/// `total` is always the sum of `scores`; it is never taken from input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    /// Operator-typed text the scores were parsed from, kept for display
    pub raw_scores: String,
    pub scores: Vec<f64>,
    pub total: f64,
    /// "Outside competition": excluded from team totals and pairings
    pub is_ak: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedParticipant {
    #[serde(flatten)]
    pub participant: Participant,
    pub rank: usize,
    pub best_score: f64,
    pub second_best_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingResult {
    pub home_participant: Participant,
    pub visiting_participant: Participant,
    pub winner: Winner,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamResults {
    pub home_team_name: String,
    pub visiting_team_name: String,
    /// Scored home roster in slot order, AK members included
    pub home_participants: Vec<Participant>,
    /// Scored visiting roster in slot order, AK members included
    pub visiting_participants: Vec<Participant>,
    pub home_team_total: f64,
    pub visiting_team_total: f64,
    pub total_score_winner: Winner,
    pub pairing_results: Vec<PairingResult>,
    pub home_pairing_score: u32,
    pub visiting_pairing_score: u32,
    pub pairing_winner: Winner,
}

impl TeamResults {
    /// Both rosters, home first, in slot order.
    pub fn all_participants(&self) -> impl Iterator<Item = &Participant> {
        self.home_participants
            .iter()
            .chain(self.visiting_participants.iter())
    }
}

/// One roster slot of a team in combined mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedParticipant {
    /// Roster reference; empty when the slot was left unassigned
    pub participant_id: String,
    pub first_name: String,
    pub last_name: String,
    pub raw_scores: String,
    pub scores: Vec<f64>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedTeam {
    pub id: String,
    pub name: String,
    pub participants: Vec<CombinedParticipant>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCombinedIndividual {
    pub participant_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Unified pool: individual entries first, then team slots
    pub all_scores: Vec<f64>,
    pub rank: usize,
    pub best_score: f64,
    pub second_best_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedResults {
    /// Sorted by descending total; position is the team rank
    pub teams: Vec<CombinedTeam>,
    pub individuals: Vec<RankedCombinedIndividual>,
}

/// Results of one computation pass, tagged by competition mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ModeResults {
    Team(TeamResults),
    Individual { ranking: Vec<RankedParticipant> },
    Combined(CombinedResults),
}

impl ModeResults {
    pub fn mode_name(&self) -> &'static str {
        match self {
            ModeResults::Team(_) => "team",
            ModeResults::Individual { .. } => "individual",
            ModeResults::Combined(_) => "combined",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_compare() {
        assert_eq!(Winner::compare(30.0, 28.0), Winner::Home);
        assert_eq!(Winner::compare(25.0, 25.0), Winner::Draw);
        assert_eq!(Winner::compare(1u32, 2u32), Winner::Visiting);
    }

    #[test]
    fn test_mode_results_tagged_json() {
        let results = ModeResults::Individual { ranking: vec![] };
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["mode"], "individual");
        assert!(json["ranking"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_winner_serializes_lowercase() {
        let json = serde_json::to_string(&Winner::Visiting).unwrap();
        assert_eq!(json, "\"visiting\"");
    }
}
