use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use super::formatter::{format_number, format_scores, winner_name};
use crate::config::Labels;
use crate::scoring::{CombinedResults, ModeResults, RankedParticipant, TeamResults, Winner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// `<event name with whitespace runs replaced by _>_results.<ext>`
pub fn default_export_filename(event_name: &str, format: ExportFormat) -> String {
    let stem = event_name.split_whitespace().collect::<Vec<_>>().join("_");
    let stem = if stem.is_empty() { "event".to_string() } else { stem };
    format!("{}_results.{}", stem, format.extension())
}

type Row = Vec<String>;

fn row<I, S>(cells: I) -> Row
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    cells.into_iter().map(Into::into).collect()
}

fn result_row(label: &str, winner: Winner, results: &TeamResults, labels: &Labels, score: String) -> Row {
    row([
        label.to_string(),
        winner_name(
            winner,
            &results.home_team_name,
            &results.visiting_team_name,
            labels,
        )
        .to_string(),
        score,
    ])
}

fn team_rows(results: &TeamResults, labels: &Labels) -> Vec<Row> {
    let mut rows = vec![
        row(["Competition", "Team"]),
        row(["Home team", results.home_team_name.as_str()]),
        row(["Visiting team", results.visiting_team_name.as_str()]),
        Row::new(),
        row(["Scoring", "Winner", "Result"]),
        result_row(
            "Total",
            results.total_score_winner,
            results,
            labels,
            format!(
                "{} : {}",
                format_number(results.home_team_total),
                format_number(results.visiting_team_total)
            ),
        ),
        result_row(
            "Pairings",
            results.pairing_winner,
            results,
            labels,
            format!(
                "{} : {}",
                results.home_pairing_score, results.visiting_pairing_score
            ),
        ),
        Row::new(),
        row(["Team", "First name", "Last name", "AK", "Scores", "Total"]),
    ];

    for p in results.all_participants() {
        rows.push(row([
            p.team.clone().unwrap_or_default(),
            p.first_name.clone(),
            p.last_name.clone(),
            if p.is_ak {
                labels.excluded.clone()
            } else {
                labels.competing.clone()
            },
            format_scores(&p.scores),
            format_number(p.total),
        ]));
    }
    rows
}

fn individual_rows(ranking: &[RankedParticipant]) -> Vec<Row> {
    let mut rows = vec![
        row(["Competition", "Club championship"]),
        Row::new(),
        row(["Rank", "First name", "Last name", "Best", "Second best", "All scores"]),
    ];
    for r in ranking {
        rows.push(row([
            r.rank.to_string(),
            r.participant.first_name.clone(),
            r.participant.last_name.clone(),
            format_number(r.best_score),
            format_number(r.second_best_score),
            format_scores(&r.participant.scores),
        ]));
    }
    rows
}

fn combined_rows(results: &CombinedResults) -> Vec<Row> {
    let mut rows = vec![
        row(["Competition", "Combined"]),
        Row::new(),
        row(["--- TEAM RANKING ---"]),
        row(["Rank", "Team", "Total"]),
    ];
    for (index, team) in results.teams.iter().enumerate() {
        rows.push(row([
            (index + 1).to_string(),
            team.name.clone(),
            format_number(team.total),
        ]));
        rows.push(row(["", "First name", "Last name", "Result"]));
        for member in &team.participants {
            rows.push(row([
                String::new(),
                member.first_name.clone(),
                member.last_name.clone(),
                format_number(member.total),
            ]));
        }
        rows.push(Row::new());
    }

    rows.push(Row::new());
    rows.push(row(["--- INDIVIDUAL RANKING ---"]));
    rows.push(row(["Rank", "First name", "Last name", "Best", "Second best"]));
    for r in &results.individuals {
        rows.push(row([
            r.rank.to_string(),
            r.first_name.clone(),
            r.last_name.clone(),
            format_number(r.best_score),
            format_number(r.second_best_score),
        ]));
    }
    rows
}

/// Render results as CSV text.
///
/// Rows have varying widths, so the writer runs in flexible mode.
pub fn to_csv(event_name: &str, results: &ModeResults, labels: &Labels, delimiter: u8) -> Result<String> {
    let mut rows = vec![row(["Event", event_name]), Row::new()];
    rows.extend(match results {
        ModeResults::Team(team) => team_rows(team, labels),
        ModeResults::Individual { ranking } => individual_rows(ranking),
        ModeResults::Combined(combined) => combined_rows(combined),
    });

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(Vec::new());
    for record in &rows {
        writer
            .write_record(record)
            .context("Failed to write CSV record")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

#[derive(Serialize)]
struct JsonExport<'a> {
    event_name: &'a str,
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    results: &'a ModeResults,
}

/// Render results as pretty JSON with the event name and a timestamp.
pub fn to_json(event_name: &str, results: &ModeResults, generated_at: DateTime<Utc>) -> Result<String> {
    let export = JsonExport {
        event_name,
        generated_at,
        results,
    };
    serde_json::to_string_pretty(&export).context("Failed to serialize results to JSON")
}

pub fn render_export(
    format: ExportFormat,
    event_name: &str,
    results: &ModeResults,
    labels: &Labels,
    delimiter: u8,
) -> Result<String> {
    match format {
        ExportFormat::Csv => to_csv(event_name, results, labels, delimiter),
        ExportFormat::Json => to_json(event_name, results, Utc::now()),
    }
}

/// Write export text atomically, so a failed write never leaves a partial file.
pub fn write_export(path: &Path, contents: &str) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open export file at {}", path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save export to {}", path.display()))?;
    Ok(())
}
