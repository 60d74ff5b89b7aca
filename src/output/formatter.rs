use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::config::{ColorMode, Labels, ScoringMethod};
use crate::scoring::{CombinedResults, ModeResults, Participant, RankedParticipant, TeamResults, Winner};

/// Settings the terminal tables need besides the results themselves.
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub method: ScoringMethod,
    pub labels: Labels,
    pub use_colors: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            method: ScoringMethod::Total,
            labels: Labels::default(),
            use_colors: false,
        }
    }
}

/// Resolve the configured colour mode against stdout being a TTY
pub fn should_use_colors(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Render a score value exactly as stored: `45`, `9.5`, never `45.0`.
///
/// Every table and export goes through this so the text always matches the
/// value in the results structure.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0"
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Scores joined with "; " in stored order
pub fn format_scores(scores: &[f64]) -> String {
    scores
        .iter()
        .map(|s| format_number(*s))
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn full_name(first: &str, last: &str) -> String {
    format!("{} {}", first, last).trim().to_string()
}

/// Name of the winning side, or the configured draw label
pub fn winner_name<'a>(winner: Winner, home: &'a str, visiting: &'a str, labels: &'a Labels) -> &'a str {
    match winner {
        Winner::Home => home,
        Winner::Visiting => visiting,
        Winner::Draw => &labels.draw,
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Width for a name column given the space used by the other columns.
fn name_width(names: &[String], fixed_width: usize) -> usize {
    let widest = names
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => widest.min(width - fixed_width),
        Some(_) => widest.min(20),
        None => widest,
    }
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.bold().underline().to_string()
    } else {
        text.to_string()
    }
}

/// Format the results of one computation pass for the terminal
pub fn format_results(event_name: &str, results: &ModeResults, options: &DisplayOptions) -> String {
    let title = heading(event_name, options.use_colors);
    let body = match results {
        ModeResults::Team(team) => format_team_results(team, options),
        ModeResults::Individual { ranking } => format_ranking(ranking, options),
        ModeResults::Combined(combined) => format_combined_results(combined, options),
    };
    format!("{}\n\n{}", title, body)
}

/// Headline winner for the chosen scoring method, followed by both results
pub fn format_team_summary(results: &TeamResults, options: &DisplayOptions) -> String {
    let home = &results.home_team_name;
    let visiting = &results.visiting_team_name;
    let labels = &options.labels;

    let (method_label, winner, detail) = match options.method {
        ScoringMethod::Total => (
            "total score",
            results.total_score_winner,
            format!(
                "{} {} : {} {}",
                home,
                format_number(results.home_team_total),
                format_number(results.visiting_team_total),
                visiting
            ),
        ),
        ScoringMethod::Pairs => (
            "pairings",
            results.pairing_winner,
            format!(
                "{} {} : {} {}",
                home, results.home_pairing_score, results.visiting_pairing_score, visiting
            ),
        ),
    };

    let name = winner_name(winner, home, visiting, labels);
    let headline = if options.use_colors {
        format!("Winner by {}: {}", method_label, name.green().bold())
    } else {
        format!("Winner by {}: {}", method_label, name)
    };

    format!(
        "{} vs. {}\n{}\n  {}\n\nTotal score: {} ({} : {})\nPairings:    {} ({} : {})",
        home,
        visiting,
        headline,
        detail,
        winner_name(results.total_score_winner, home, visiting, labels),
        format_number(results.home_team_total),
        format_number(results.visiting_team_total),
        winner_name(results.pairing_winner, home, visiting, labels),
        results.home_pairing_score,
        results.visiting_pairing_score,
    )
}

/// Both rosters by descending total; AK members are shown but marked
pub fn format_team_participants(results: &TeamResults, options: &DisplayOptions) -> String {
    let mut participants: Vec<&Participant> = results.all_participants().collect();
    if participants.is_empty() {
        return "No participants.".to_string();
    }
    participants.sort_by(|a, b| b.total.total_cmp(&a.total));

    let names: Vec<String> = participants
        .iter()
        .map(|p| full_name(&p.first_name, &p.last_name))
        .collect();
    let teams: Vec<&str> = participants
        .iter()
        .map(|p| p.team.as_deref().unwrap_or(""))
        .collect();
    let team_width = teams.iter().map(|t| t.chars().count()).max().unwrap_or(4).max(4);
    let ak_width = options
        .labels
        .excluded
        .chars()
        .count()
        .max(options.labels.competing.chars().count())
        .max(2);
    let width = name_width(&names, team_width + ak_width + 20);

    let mut lines = vec![format!(
        "{}  {}  {}  {:>8}",
        pad("Participant", width),
        pad("Team", team_width),
        pad("AK", ak_width),
        "Total"
    )];

    for ((p, name), team) in participants.iter().zip(&names).zip(&teams) {
        let ak = if p.is_ak {
            &options.labels.excluded
        } else {
            &options.labels.competing
        };
        let line = format!(
            "{}  {}  {}  {:>8}",
            pad(&truncate_name(name, width), width),
            pad(team, team_width),
            pad(ak, ak_width),
            format_number(p.total)
        );
        if options.use_colors && p.is_ak {
            lines.push(line.dimmed().italic().to_string());
        } else {
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// Pairings in slot order: home name, result, visiting name
pub fn format_pairings(results: &TeamResults, options: &DisplayOptions) -> String {
    if results.pairing_results.is_empty() {
        return "No pairings.".to_string();
    }

    let home_names: Vec<String> = results
        .pairing_results
        .iter()
        .map(|p| full_name(&p.home_participant.first_name, &p.home_participant.last_name))
        .collect();
    let width = name_width(&home_names, 40).max(results.home_team_name.chars().count());

    let mut lines = vec![format!(
        "{}  {:^17}  {}",
        pad(&results.home_team_name, width),
        "Result",
        results.visiting_team_name
    )];

    for (pairing, home_name) in results.pairing_results.iter().zip(&home_names) {
        let home_total = format!("{:>7}", format_number(pairing.home_participant.total));
        let visiting_total = format!("{:<7}", format_number(pairing.visiting_participant.total));
        let score = if options.use_colors {
            match pairing.winner {
                Winner::Home => format!("{} : {}", home_total.green().bold(), visiting_total),
                Winner::Visiting => format!("{} : {}", home_total, visiting_total.green().bold()),
                Winner::Draw => format!("{} : {}", home_total, visiting_total),
            }
        } else {
            format!("{} : {}", home_total, visiting_total)
        };
        lines.push(format!(
            "{}  {}  {}",
            pad(&truncate_name(home_name, width), width),
            score,
            full_name(
                &pairing.visiting_participant.first_name,
                &pairing.visiting_participant.last_name
            )
        ));
    }

    lines.join("\n")
}

fn format_team_results(results: &TeamResults, options: &DisplayOptions) -> String {
    format!(
        "{}\n\n{}\n{}\n\n{}\n{}",
        format_team_summary(results, options),
        heading("Participants", options.use_colors),
        format_team_participants(results, options),
        heading("Pairings", options.use_colors),
        format_pairings(results, options),
    )
}

fn format_rank_rows<'a, I>(rows: I, options: &DisplayOptions) -> String
where
    I: Iterator<Item = (usize, String, f64, f64, &'a [f64])>,
{
    let rows: Vec<_> = rows.collect();
    if rows.is_empty() {
        return "No ranked participants.".to_string();
    }
    let names: Vec<String> = rows.iter().map(|r| r.1.clone()).collect();
    let width = name_width(&names, 40);

    let mut lines = vec![format!(
        "{:>4}  {}  {:>8}  {:>8}  {}",
        "Rank",
        pad("Name", width),
        "Best",
        "Second",
        "Scores"
    )];
    for (rank, name, best, second, scores) in rows {
        let rank_str = format!("{:>3}.", rank);
        let name_str = pad(&truncate_name(&name, width), width);
        let best_str = format!("{:>8}", format_number(best));
        let rest = format!("{:>8}  {}", format_number(second), format_scores(scores));
        if options.use_colors {
            lines.push(format!(
                "{}  {}  {}  {}",
                rank_str.dimmed(),
                name_str,
                best_str.bold(),
                rest
            ));
        } else {
            lines.push(format!("{}  {}  {}  {}", rank_str, name_str, best_str, rest));
        }
    }
    lines.join("\n")
}

/// Ranking table with rank, name, best and second best score
pub fn format_ranking(ranking: &[RankedParticipant], options: &DisplayOptions) -> String {
    format_rank_rows(
        ranking.iter().map(|r| {
            (
                r.rank,
                full_name(&r.participant.first_name, &r.participant.last_name),
                r.best_score,
                r.second_best_score,
                r.participant.scores.as_slice(),
            )
        }),
        options,
    )
}

/// Team standings with member rows, then the pooled individual ranking
pub fn format_combined_results(results: &CombinedResults, options: &DisplayOptions) -> String {
    let mut lines = vec![heading("Team standings", options.use_colors)];

    if results.teams.is_empty() {
        lines.push("No teams.".to_string());
    }
    for (index, team) in results.teams.iter().enumerate() {
        let team_line = format!("{:>3}.  {}  {}", index + 1, team.name, format_number(team.total));
        if options.use_colors {
            lines.push(team_line.bold().to_string());
        } else {
            lines.push(team_line);
        }
        for member in &team.participants {
            let name = full_name(&member.first_name, &member.last_name);
            lines.push(format!(
                "        {}  {}",
                if name.is_empty() { "-".to_string() } else { name },
                format_number(member.total)
            ));
        }
    }

    lines.push(String::new());
    lines.push(heading("Individual ranking (best result from all starts)", options.use_colors));
    lines.push(format_rank_rows(
        results.individuals.iter().map(|r| {
            (
                r.rank,
                full_name(&r.first_name, &r.last_name),
                r.best_score,
                r.second_best_score,
                r.all_scores.as_slice(),
            )
        }),
        options,
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::compute_results;
    use crate::snapshot::{Competition, Entry, IndividualSetup, TeamSetup};

    fn entry(id: u32, first: &str, raw: &str, is_ak: bool) -> Entry {
        Entry {
            id,
            first_name: first.to_string(),
            last_name: "Test".to_string(),
            raw_scores: raw.to_string(),
            is_ak,
        }
    }

    fn team_results() -> TeamResults {
        let competition = Competition::Team(TeamSetup {
            home_team_name: "Eagles".to_string(),
            visiting_team_name: "Hawks".to_string(),
            home: vec![entry(1, "Anna", "30", false), entry(2, "Ben", "25", false), entry(3, "Cleo", "99", true)],
            visiting: vec![entry(1, "Dora", "28", false), entry(2, "Emil", "25", false)],
        });
        match compute_results(&competition) {
            ModeResults::Team(t) => t,
            other => panic!("unexpected results: {:?}", other),
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(45.0), "45");
        assert_eq!(format_number(9.5), "9.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-3.25), "-3.25");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_format_scores() {
        assert_eq!(format_scores(&[10.0, 9.5, 8.0]), "10; 9.5; 8");
        assert_eq!(format_scores(&[]), "");
    }

    #[test]
    fn test_full_name_trims_blanks() {
        assert_eq!(full_name("Anna", "Berg"), "Anna Berg");
        assert_eq!(full_name("", ""), "");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Short", 20), "Short");
        assert_eq!(truncate_name("A very long participant name", 10), "A very ...");
        assert_eq!(truncate_name("Hello", 3), "Hel");
    }

    #[test]
    fn test_team_summary_total_method() {
        let results = team_results();
        let summary = format_team_summary(&results, &DisplayOptions::default());
        assert!(summary.contains("Eagles vs. Hawks"));
        assert!(summary.contains("Winner by total score: Eagles"));
        assert!(summary.contains("Total score: Eagles (55 : 53)"));
        assert!(summary.contains("Pairings:    Eagles (1 : 0)"));
    }

    #[test]
    fn test_team_summary_pairs_method_and_draw_label() {
        let mut results = team_results();
        results.pairing_winner = Winner::Draw;
        let options = DisplayOptions {
            method: ScoringMethod::Pairs,
            labels: Labels {
                draw: "Unentschieden".to_string(),
                ..Labels::default()
            },
            use_colors: false,
        };
        let summary = format_team_summary(&results, &options);
        assert!(summary.contains("Winner by pairings: Unentschieden"));
    }

    #[test]
    fn test_team_participants_sorted_with_ak_marked() {
        let results = team_results();
        let table = format_team_participants(&results, &DisplayOptions::default());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("Cleo Test"));
        assert!(lines[1].contains("Yes"));
        assert!(lines[1].trim_end().ends_with("99"));
        assert!(lines[2].starts_with("Anna Test"));
    }

    #[test]
    fn test_pairings_table() {
        let results = team_results();
        let table = format_pairings(&results, &DisplayOptions::default());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("30 : 28"));
        assert!(lines[1].contains("Dora Test"));
        assert!(lines[2].contains("25 : 25"));
    }

    #[test]
    fn test_ranking_table() {
        let competition = Competition::Individual(IndividualSetup {
            participants: vec![entry(1, "Anna", "9 9", false), entry(2, "Ben", "10, 9.5", false)],
        });
        let results = compute_results(&competition);
        let text = format_results("Club", &results, &DisplayOptions::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Club");
        assert!(lines[3].trim_start().starts_with("1."));
        assert!(lines[3].contains("Ben Test"));
        assert!(lines[3].contains("10; 9.5"));
        assert!(lines[4].contains("Anna Test"));
    }

    #[test]
    fn test_empty_ranking() {
        assert_eq!(
            format_ranking(&[], &DisplayOptions::default()),
            "No ranked participants."
        );
    }
}
