use super::types::{PairingResult, Participant, Winner};

#[derive(Debug, Clone, PartialEq)]
pub struct PairingOutcome {
    pub pairs: Vec<PairingResult>,
    pub home_score: u32,
    pub visiting_score: u32,
    pub winner: Winner,
}

/// Pair the i-th competing home member with the i-th competing visiting member.
///
/// AK members are skipped before pairing, so positions refer to the filtered
/// rosters. Members past the shorter roster stay unpaired. A drawn pair adds
/// to neither score.
pub fn pair(home: &[Participant], visiting: &[Participant]) -> PairingOutcome {
    let competing_home = home.iter().filter(|p| !p.is_ak);
    let competing_visiting = visiting.iter().filter(|p| !p.is_ak);

    let mut pairs = Vec::new();
    let mut home_score = 0;
    let mut visiting_score = 0;

    for (h, v) in competing_home.zip(competing_visiting) {
        let winner = Winner::compare(h.total, v.total);
        match winner {
            Winner::Home => home_score += 1,
            Winner::Visiting => visiting_score += 1,
            Winner::Draw => {}
        }
        pairs.push(PairingResult {
            home_participant: h.clone(),
            visiting_participant: v.clone(),
            winner,
        });
    }

    PairingOutcome {
        pairs,
        home_score,
        visiting_score,
        winner: Winner::compare(home_score, visiting_score),
    }
}
