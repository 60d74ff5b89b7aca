use std::collections::HashMap;

use tracing::{debug, warn};

use super::aggregate::{team_total, total};
use super::parser::parse_scores;
use super::ranking::rank_by;
use super::types::{CombinedParticipant, CombinedResults, CombinedTeam, RankedCombinedIndividual};
use crate::snapshot::{CombinedSetup, CombinedTeamSetup, RosterParticipant, SlotEntry};

/// Per-identity score pools, in first-seen order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScorePools {
    order: Vec<String>,
    index: HashMap<String, usize>,
    pools: Vec<Vec<f64>>,
}

impl ScorePools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append scores to an identity's pool. Empty ids are ignored.
    pub fn extend(&mut self, participant_id: &str, scores: &[f64]) {
        if participant_id.is_empty() {
            return;
        }
        let slot = match self.index.get(participant_id) {
            Some(&i) => i,
            None => {
                self.order.push(participant_id.to_string());
                self.pools.push(Vec::new());
                self.index
                    .insert(participant_id.to_string(), self.pools.len() - 1);
                self.pools.len() - 1
            }
        };
        self.pools[slot].extend_from_slice(scores);
    }

    /// Every identity seen, including those with an empty pool.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn get(&self, participant_id: &str) -> Option<&[f64]> {
        self.index
            .get(participant_id)
            .map(|&i| self.pools[i].as_slice())
    }

    /// Identities with at least one score, in first-seen order.
    pub fn into_non_empty(self) -> Vec<(String, Vec<f64>)> {
        self.order
            .into_iter()
            .zip(self.pools)
            .filter(|(_, scores)| !scores.is_empty())
            .collect()
    }
}

/// Build the unified score pool of every participant identity.
///
/// Ad-hoc individual entries are collected first, then team slots in the
/// order the teams are given.
pub fn resolve_pools(individual: &[SlotEntry], teams: &[CombinedTeam]) -> ScorePools {
    let mut pools = ScorePools::new();
    for entry in individual {
        pools.extend(&entry.participant_id, &parse_scores(&entry.raw_scores));
    }
    for team in teams {
        for member in &team.participants {
            pools.extend(&member.participant_id, &member.scores);
        }
    }
    pools
}

fn score_team(
    team: &CombinedTeamSetup,
    roster: &HashMap<&str, &RosterParticipant>,
) -> CombinedTeam {
    let participants: Vec<CombinedParticipant> = team
        .slots
        .iter()
        .map(|slot| {
            let scores = parse_scores(&slot.raw_scores);
            let (first_name, last_name) = display_names(roster, &slot.participant_id);
            CombinedParticipant {
                participant_id: slot.participant_id.clone(),
                first_name,
                last_name,
                raw_scores: slot.raw_scores.clone(),
                total: total(&scores),
                scores,
            }
        })
        .collect();

    // Team totals are self-contained: only this team's slots count
    let team_sum = team_total(&participants, |p| p.total, |_| false);

    CombinedTeam {
        id: team.id.clone(),
        name: team.name.clone(),
        participants,
        total: team_sum,
    }
}

/// Names for a roster reference; blank when the id is unassigned or unknown.
fn display_names(roster: &HashMap<&str, &RosterParticipant>, participant_id: &str) -> (String, String) {
    roster
        .get(participant_id)
        .map(|p| (p.first_name.clone(), p.last_name.clone()))
        .unwrap_or_default()
}

/// Pooled identities missing from the roster, each listed once.
pub fn unknown_references<'a>(
    pools: &'a ScorePools,
    roster: &HashMap<&str, &RosterParticipant>,
) -> Vec<&'a str> {
    pools.ids().filter(|id| !roster.contains_key(*id)).collect()
}

/// Score teams, pool every identity's results across contexts, and rank.
pub fn compute_combined(setup: &CombinedSetup) -> CombinedResults {
    let roster: HashMap<&str, &RosterParticipant> = setup
        .participants
        .iter()
        .map(|p| (p.id.as_str(), p))
        .collect();

    let mut teams: Vec<CombinedTeam> = setup
        .teams
        .iter()
        .map(|team| score_team(team, &roster))
        .collect();

    // Stable: equal totals keep setup order. total_cmp keeps the order total
    // when overflowing slots sum to NaN.
    teams.sort_by(|a, b| b.total.total_cmp(&a.total));

    let pools = resolve_pools(&setup.individual, &teams);
    for participant_id in unknown_references(&pools, &roster) {
        warn!(participant_id, "participant reference not found in roster");
    }
    let pools = pools.into_non_empty();
    debug!(
        teams = teams.len(),
        identities = pools.len(),
        "resolved combined score pools"
    );

    let individuals = rank_by(pools, |(_, scores)| scores.as_slice())
        .into_iter()
        .map(|ranked| {
            let (participant_id, all_scores) = ranked.item;
            let (first_name, last_name) = display_names(&roster, &participant_id);
            RankedCombinedIndividual {
                participant_id,
                first_name,
                last_name,
                all_scores,
                rank: ranked.rank,
                best_score: ranked.best_score,
                second_best_score: ranked.second_best_score,
            }
        })
        .collect();

    CombinedResults { teams, individuals }
}
