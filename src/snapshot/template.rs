use super::types::{
    CombinedSetup, CombinedTeamSetup, Competition, CompetitionMode, Entry, IndividualSetup,
    RosterParticipant, SlotEntry, Snapshot, TeamSetup,
};

pub const DEFAULT_PARTICIPANTS_PER_TEAM: u32 = 5;
pub const MAX_PARTICIPANTS_PER_TEAM: u32 = 20;

/// Number of empty rows a fresh individual or combined snapshot starts with.
const STARTER_ROWS: u32 = 3;

#[derive(Debug, Clone)]
pub struct TemplateOptions {
    pub event_name: String,
    pub home_team_name: String,
    pub visiting_team_name: String,
    pub participants_per_team: u32,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            event_name: "New Event".to_string(),
            home_team_name: "Home".to_string(),
            visiting_team_name: "Visiting".to_string(),
            participants_per_team: DEFAULT_PARTICIPANTS_PER_TEAM,
        }
    }
}

fn blank_entries(count: u32) -> Vec<Entry> {
    (1..=count).map(Entry::blank).collect()
}

/// Build an empty snapshot for `mode`, ready for the operator to fill in.
pub fn new_snapshot(mode: CompetitionMode, options: &TemplateOptions) -> Snapshot {
    let competition = match mode {
        CompetitionMode::Team => Competition::Team(TeamSetup {
            home_team_name: options.home_team_name.clone(),
            visiting_team_name: options.visiting_team_name.clone(),
            home: blank_entries(options.participants_per_team),
            visiting: blank_entries(options.participants_per_team),
        }),
        CompetitionMode::Individual => Competition::Individual(IndividualSetup {
            participants: blank_entries(STARTER_ROWS),
        }),
        CompetitionMode::Combined => Competition::Combined(CombinedSetup {
            participants: (1..=STARTER_ROWS)
                .map(|i| RosterParticipant {
                    id: format!("p{}", i),
                    first_name: String::new(),
                    last_name: String::new(),
                })
                .collect(),
            teams: vec![CombinedTeamSetup {
                id: "t1".to_string(),
                name: "Team 1".to_string(),
                slots: (0..STARTER_ROWS).map(|_| SlotEntry::default()).collect(),
            }],
            individual: Vec::new(),
        }),
    };

    Snapshot::new(options.event_name.clone(), competition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_template_slots() {
        let options = TemplateOptions {
            participants_per_team: 4,
            ..TemplateOptions::default()
        };
        let snapshot = new_snapshot(CompetitionMode::Team, &options);
        match snapshot.competition {
            Competition::Team(setup) => {
                assert_eq!(setup.home.len(), 4);
                assert_eq!(setup.visiting.len(), 4);
                let ids: Vec<_> = setup.home.iter().map(|e| e.id).collect();
                assert_eq!(ids, vec![1, 2, 3, 4]);
                assert_eq!(setup.home_team_name, "Home");
            }
            other => panic!("unexpected competition: {:?}", other),
        }
    }

    #[test]
    fn test_individual_template() {
        let snapshot = new_snapshot(CompetitionMode::Individual, &TemplateOptions::default());
        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.event_name, "New Event");
        match snapshot.competition {
            Competition::Individual(setup) => assert_eq!(setup.participants.len(), 3),
            other => panic!("unexpected competition: {:?}", other),
        }
    }

    #[test]
    fn test_combined_template() {
        let snapshot = new_snapshot(CompetitionMode::Combined, &TemplateOptions::default());
        match snapshot.competition {
            Competition::Combined(setup) => {
                assert_eq!(setup.participants.len(), 3);
                assert_eq!(setup.participants[0].id, "p1");
                assert_eq!(setup.teams.len(), 1);
                assert_eq!(setup.teams[0].name, "Team 1");
                assert_eq!(setup.teams[0].slots.len(), 3);
                assert!(setup.individual.is_empty());
            }
            other => panic!("unexpected competition: {:?}", other),
        }
    }
}
