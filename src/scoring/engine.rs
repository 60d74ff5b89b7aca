use tracing::debug;

use super::aggregate::{team_total, total};
use super::combined::compute_combined;
use super::pairing::pair;
use super::parser::{parse_scores, rejected_tokens};
use super::ranking::rank_by;
use super::types::{ModeResults, Participant, RankedParticipant, TeamResults, Winner};
use crate::snapshot::{Competition, Entry, IndividualSetup, TeamSetup};

/// Parse and total one entry.
pub fn score_entry(entry: &Entry, team: Option<&str>) -> Participant {
    let dropped = rejected_tokens(&entry.raw_scores);
    if !dropped.is_empty() {
        debug!(id = entry.id, ?dropped, "ignored non-numeric score tokens");
    }
    let scores = parse_scores(&entry.raw_scores);
    Participant {
        id: entry.id,
        first_name: entry.first_name.clone(),
        last_name: entry.last_name.clone(),
        raw_scores: entry.raw_scores.clone(),
        total: total(&scores),
        scores,
        is_ak: entry.is_ak,
        team: team.map(str::to_string),
    }
}

/// Team duel: totals over competing members plus positional pairings.
pub fn compute_team(setup: &TeamSetup) -> TeamResults {
    let home: Vec<Participant> = setup
        .home
        .iter()
        .map(|e| score_entry(e, Some(&setup.home_team_name)))
        .collect();
    let visiting: Vec<Participant> = setup
        .visiting
        .iter()
        .map(|e| score_entry(e, Some(&setup.visiting_team_name)))
        .collect();

    let home_team_total = team_total(&home, |p| p.total, |p| p.is_ak);
    let visiting_team_total = team_total(&visiting, |p| p.total, |p| p.is_ak);
    let pairing = pair(&home, &visiting);

    debug!(
        home_team_total,
        visiting_team_total,
        pairs = pairing.pairs.len(),
        "computed team results"
    );

    TeamResults {
        home_team_name: setup.home_team_name.clone(),
        visiting_team_name: setup.visiting_team_name.clone(),
        home_participants: home,
        visiting_participants: visiting,
        home_team_total,
        visiting_team_total,
        total_score_winner: Winner::compare(home_team_total, visiting_team_total),
        pairing_results: pairing.pairs,
        home_pairing_score: pairing.home_score,
        visiting_pairing_score: pairing.visiting_score,
        pairing_winner: pairing.winner,
    }
}

/// Club championship: rank every participant by best, then second best score.
pub fn compute_individual(setup: &IndividualSetup) -> Vec<RankedParticipant> {
    let participants: Vec<Participant> = setup
        .participants
        .iter()
        .map(|e| score_entry(e, None))
        .collect();

    let ranking: Vec<RankedParticipant> = rank_by(participants, |p| p.scores.as_slice())
        .into_iter()
        .map(|ranked| RankedParticipant {
            participant: ranked.item,
            rank: ranked.rank,
            best_score: ranked.best_score,
            second_best_score: ranked.second_best_score,
        })
        .collect();

    debug!(participants = ranking.len(), "ranked individual participants");
    ranking
}

/// Run the pipeline matching the competition mode.
///
/// Stateless: the same snapshot always yields the same results.
pub fn compute_results(competition: &Competition) -> ModeResults {
    match competition {
        Competition::Team(setup) => ModeResults::Team(compute_team(setup)),
        Competition::Individual(setup) => ModeResults::Individual {
            ranking: compute_individual(setup),
        },
        Competition::Combined(setup) => ModeResults::Combined(compute_combined(setup)),
    }
}
