use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

/// Current state of a competition as entered by the operator.
///
/// This is the only input the scoring engine reads. It is plain data; the
/// engine never mutates it.
///
/// Example YAML:
/// ```yaml
/// version: 1
/// event_name: Club Championship 2024
/// competition:
///   mode: individual
///   participants:
///     - { id: 1, first_name: Anna, last_name: Berg, raw_scores: "98, 97; 99" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    pub version: u32,
    pub event_name: String,
    pub competition: Competition,
}

impl Snapshot {
    pub fn new(event_name: String, competition: Competition) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            event_name,
            competition,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionMode {
    Team,
    Individual,
    Combined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Competition {
    Team(TeamSetup),
    Individual(IndividualSetup),
    Combined(CombinedSetup),
}

impl Competition {
    pub fn mode(&self) -> CompetitionMode {
        match self {
            Competition::Team(_) => CompetitionMode::Team,
            Competition::Individual(_) => CompetitionMode::Individual,
            Competition::Combined(_) => CompetitionMode::Combined,
        }
    }
}

/// A participant slot with its free-text results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    pub id: u32,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Missing text is the same as empty text
    #[serde(default)]
    pub raw_scores: String,
    /// Outside competition (AK); only meaningful in team mode
    #[serde(default)]
    pub is_ak: bool,
}

impl Entry {
    pub fn blank(id: u32) -> Self {
        Self {
            id,
            first_name: String::new(),
            last_name: String::new(),
            raw_scores: String::new(),
            is_ak: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeamSetup {
    pub home_team_name: String,
    pub visiting_team_name: String,
    #[serde(default)]
    pub home: Vec<Entry>,
    #[serde(default)]
    pub visiting: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndividualSetup {
    #[serde(default)]
    pub participants: Vec<Entry>,
}

/// Roster participant in combined mode; scores live in slots and entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosterParticipant {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// A team slot or an ad-hoc individual start, referencing the roster by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotEntry {
    /// Empty when no participant has been assigned
    #[serde(default)]
    pub participant_id: String,
    #[serde(default)]
    pub raw_scores: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CombinedTeamSetup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slots: Vec<SlotEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CombinedSetup {
    #[serde(default)]
    pub participants: Vec<RosterParticipant>,
    #[serde(default)]
    pub teams: Vec<CombinedTeamSetup>,
    /// Standalone starts not tied to a team slot
    #[serde(default)]
    pub individual: Vec<SlotEntry>,
}
