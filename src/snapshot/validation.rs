use std::collections::HashSet;

use super::template::MAX_PARTICIPANTS_PER_TEAM;
use super::types::{Competition, Entry, Snapshot, SNAPSHOT_VERSION};
use crate::scoring::rejected_tokens;

/// Validate competition setup metadata.
/// Returns all validation errors at once (not just the first).
///
/// Score text is never checked here; unparseable tokens are dropped by the
/// parser. See `score_warnings` for reporting them.
pub fn validate_snapshot(snapshot: &Snapshot) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if snapshot.version != SNAPSHOT_VERSION {
        errors.push(format!(
            "version: unsupported value {} (expected {})",
            snapshot.version, SNAPSHOT_VERSION
        ));
    }

    if snapshot.event_name.trim().is_empty() {
        errors.push("event_name: is required".to_string());
    }

    match &snapshot.competition {
        Competition::Team(setup) => {
            if setup.home_team_name.trim().is_empty() {
                errors.push("home_team_name: is required".to_string());
            }
            if setup.visiting_team_name.trim().is_empty() {
                errors.push("visiting_team_name: is required".to_string());
            }
            check_roster_size("home", &setup.home, &mut errors);
            check_roster_size("visiting", &setup.visiting, &mut errors);
            check_unique_ids("home", setup.home.iter().map(|e| e.id), &mut errors);
            check_unique_ids("visiting", setup.visiting.iter().map(|e| e.id), &mut errors);
        }
        Competition::Individual(setup) => {
            check_unique_ids("participants", setup.participants.iter().map(|e| e.id), &mut errors);
        }
        Competition::Combined(setup) => {
            for (i, p) in setup.participants.iter().enumerate() {
                if p.id.trim().is_empty() {
                    errors.push(format!("participants[{}].id: is required", i));
                }
                if p.first_name.trim().is_empty() {
                    errors.push(format!("participants[{}].first_name: is required", i));
                }
                if p.last_name.trim().is_empty() {
                    errors.push(format!("participants[{}].last_name: is required", i));
                }
            }
            check_unique_ids(
                "participants",
                setup.participants.iter().map(|p| p.id.as_str()),
                &mut errors,
            );

            for (i, team) in setup.teams.iter().enumerate() {
                if team.name.trim().is_empty() {
                    errors.push(format!("teams[{}].name: is required", i));
                }
            }
            check_unique_ids("teams", setup.teams.iter().map(|t| t.id.as_str()), &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_roster_size(field: &str, roster: &[Entry], errors: &mut Vec<String>) {
    let len = roster.len() as u32;
    if len == 0 || len > MAX_PARTICIPANTS_PER_TEAM {
        errors.push(format!(
            "{}: must have 1 to {} participants (found {})",
            field, MAX_PARTICIPANTS_PER_TEAM, len
        ));
    }
}

fn check_unique_ids<I, T>(field: &str, ids: I, errors: &mut Vec<String>)
where
    I: Iterator<Item = T>,
    T: std::fmt::Display + Eq + std::hash::Hash + Clone,
{
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for id in ids {
        if !seen.insert(id.clone()) && reported.insert(id.clone()) {
            errors.push(format!("{}: duplicate id '{}'", field, id));
        }
    }
}

/// Score tokens the parser will ignore, one message per affected field.
///
/// These are warnings only: the tolerant parsing policy keeps them out of
/// every total without failing the computation.
pub fn score_warnings(snapshot: &Snapshot) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut check = |field: String, raw: &str| {
        let dropped = rejected_tokens(raw);
        if !dropped.is_empty() {
            warnings.push(format!("{}: ignoring non-numeric {:?}", field, dropped));
        }
    };

    match &snapshot.competition {
        Competition::Team(setup) => {
            for (i, e) in setup.home.iter().enumerate() {
                check(format!("home[{}].raw_scores", i), &e.raw_scores);
            }
            for (i, e) in setup.visiting.iter().enumerate() {
                check(format!("visiting[{}].raw_scores", i), &e.raw_scores);
            }
        }
        Competition::Individual(setup) => {
            for (i, e) in setup.participants.iter().enumerate() {
                check(format!("participants[{}].raw_scores", i), &e.raw_scores);
            }
        }
        Competition::Combined(setup) => {
            for (t, team) in setup.teams.iter().enumerate() {
                for (i, slot) in team.slots.iter().enumerate() {
                    check(format!("teams[{}].slots[{}].raw_scores", t, i), &slot.raw_scores);
                }
            }
            for (i, entry) in setup.individual.iter().enumerate() {
                check(format!("individual[{}].raw_scores", i), &entry.raw_scores);
            }
        }
    }

    if let Competition::Combined(setup) = &snapshot.competition {
        let known: HashSet<&str> = setup.participants.iter().map(|p| p.id.as_str()).collect();
        let slot_refs = setup
            .teams
            .iter()
            .enumerate()
            .flat_map(|(t, team)| {
                team.slots
                    .iter()
                    .enumerate()
                    .map(move |(i, s)| (format!("teams[{}].slots[{}]", t, i), s))
            });
        let entry_refs = setup
            .individual
            .iter()
            .enumerate()
            .map(|(i, s)| (format!("individual[{}]", i), s));

        for (field, slot) in slot_refs.chain(entry_refs) {
            if !slot.participant_id.is_empty() && !known.contains(slot.participant_id.as_str()) {
                warnings.push(format!(
                    "{}.participant_id: '{}' is not in the roster; names will be blank",
                    field, slot.participant_id
                ));
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::template::{new_snapshot, TemplateOptions};
    use crate::snapshot::{CombinedSetup, CombinedTeamSetup, CompetitionMode, IndividualSetup, RosterParticipant, SlotEntry};

    fn combined(setup: CombinedSetup) -> Snapshot {
        Snapshot::new("Cup".to_string(), Competition::Combined(setup))
    }

    #[test]
    fn test_team_template_is_valid() {
        let snapshot = new_snapshot(CompetitionMode::Team, &TemplateOptions::default());
        assert!(validate_snapshot(&snapshot).is_ok());
    }

    #[test]
    fn test_missing_names_collected() {
        let options = TemplateOptions {
            event_name: " ".to_string(),
            home_team_name: String::new(),
            ..TemplateOptions::default()
        };
        let snapshot = new_snapshot(CompetitionMode::Team, &options);
        let errors = validate_snapshot(&snapshot).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("event_name"));
        assert!(errors[1].contains("home_team_name"));
    }

    #[test]
    fn test_roster_size_limits() {
        let options = TemplateOptions {
            participants_per_team: 21,
            ..TemplateOptions::default()
        };
        let snapshot = new_snapshot(CompetitionMode::Team, &options);
        let errors = validate_snapshot(&snapshot).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("home:"));

        let options = TemplateOptions {
            participants_per_team: 0,
            ..TemplateOptions::default()
        };
        let snapshot = new_snapshot(CompetitionMode::Team, &options);
        assert!(validate_snapshot(&snapshot).is_err());
    }

    #[test]
    fn test_combined_requires_roster_names() {
        let snapshot = new_snapshot(CompetitionMode::Combined, &TemplateOptions::default());
        let errors = validate_snapshot(&snapshot).unwrap_err();
        // three participants, first and last name each
        assert_eq!(errors.len(), 6);
        assert!(errors[0].contains("participants[0].first_name"));
    }

    #[test]
    fn test_duplicate_ids_reported_once() {
        let mut snapshot = new_snapshot(CompetitionMode::Individual, &TemplateOptions::default());
        snapshot.competition = Competition::Individual(IndividualSetup {
            participants: vec![
                crate::snapshot::Entry::blank(1),
                crate::snapshot::Entry::blank(1),
                crate::snapshot::Entry::blank(1),
            ],
        });
        let errors = validate_snapshot(&snapshot).unwrap_err();
        assert_eq!(errors, vec!["participants: duplicate id '1'".to_string()]);
    }

    #[test]
    fn test_score_text_is_not_validated() {
        let mut snapshot = new_snapshot(CompetitionMode::Individual, &TemplateOptions::default());
        if let Competition::Individual(setup) = &mut snapshot.competition {
            setup.participants[0].raw_scores = "ten, 9".to_string();
        }
        assert!(validate_snapshot(&snapshot).is_ok());
        let warnings = score_warnings(&snapshot);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("participants[0].raw_scores"));
        assert!(warnings[0].contains("ten"));
    }

    #[test]
    fn test_unknown_references_warned() {
        let snapshot = combined(CombinedSetup {
            participants: vec![RosterParticipant {
                id: "a".to_string(),
                first_name: "Anna".to_string(),
                last_name: "Berg".to_string(),
            }],
            teams: vec![CombinedTeamSetup {
                id: "t".to_string(),
                name: "T".to_string(),
                slots: vec![
                    SlotEntry { participant_id: "a".to_string(), raw_scores: "1".to_string() },
                    SlotEntry { participant_id: "zz".to_string(), raw_scores: "1".to_string() },
                    SlotEntry::default(),
                ],
            }],
            individual: vec![SlotEntry { participant_id: "yy".to_string(), raw_scores: "2".to_string() }],
        });

        assert!(validate_snapshot(&snapshot).is_ok());
        let warnings = score_warnings(&snapshot);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].starts_with("teams[0].slots[1].participant_id"));
        assert!(warnings[1].starts_with("individual[0].participant_id"));
    }
}
