use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use score_vault::config::{Config, ScoringMethod};
use score_vault::output::{DisplayOptions, ExportFormat};
use score_vault::snapshot::{
    CompetitionMode, Snapshot, TemplateOptions, DEFAULT_PARTICIPANTS_PER_TEAM,
    MAX_PARTICIPANTS_PER_TEAM,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_SNAPSHOT: i32 = 2;
const EXIT_EXPORT: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute results and print them as tables
    Show {
        /// Snapshot file (.yaml, .yml or .json)
        snapshot: PathBuf,

        /// Scoring method for the headline team winner (overrides config)
        #[arg(long, value_enum)]
        method: Option<ScoringMethod>,
    },
    /// Compute results and write them to a file
    Export {
        snapshot: PathBuf,

        #[arg(long, value_enum)]
        format: ExportFormat,

        /// Output path (defaults to <event>_results.<ext> in export.dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write an empty snapshot for a competition mode
    New {
        #[arg(value_enum)]
        mode: CompetitionMode,

        path: PathBuf,

        #[arg(long, default_value = "New Event")]
        event: String,

        #[arg(long, default_value = "Home")]
        home: String,

        #[arg(long, default_value = "Visiting")]
        visiting: String,

        /// Slots per team in team mode
        #[arg(long, default_value_t = DEFAULT_PARTICIPANTS_PER_TEAM,
              value_parser = clap::value_parser!(u32).range(1..=MAX_PARTICIPANTS_PER_TEAM as i64))]
        participants: u32,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate a snapshot and report score text that would be ignored
    Check { snapshot: PathBuf },
    /// Write the default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "score-vault")]
#[command(about = "Scoring and ranking for shooting competitions", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/score-vault/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    score_vault::logging::init(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);

    let code = match cli.command {
        Commands::Show { snapshot, method } => run_show(config_path, &snapshot, method),
        Commands::Export {
            snapshot,
            format,
            output,
        } => run_export(config_path, &snapshot, format, output),
        Commands::New {
            mode,
            path,
            event,
            home,
            visiting,
            participants,
            force,
        } => {
            let options = TemplateOptions {
                event_name: event,
                home_team_name: home,
                visiting_team_name: visiting,
                participants_per_team: participants,
            };
            run_new(mode, &path, &options, force)
        }
        Commands::Check { snapshot } => run_check(&snapshot),
        Commands::Init { force } => run_init(config_path, force),
    };

    std::process::exit(code);
}

/// Load and validate config, printing every problem on failure.
fn load_config(path: Option<PathBuf>) -> Result<Config, i32> {
    let config = match score_vault::config::load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return Err(EXIT_CONFIG);
        }
    };

    if let Err(errors) = score_vault::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(EXIT_CONFIG);
    }

    Ok(config)
}

/// Load a snapshot and reject setups the engine should not score.
fn load_snapshot(path: &Path) -> Result<Snapshot, i32> {
    let snapshot = match score_vault::snapshot::load_snapshot(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Snapshot error: {:#}", e);
            return Err(EXIT_SNAPSHOT);
        }
    };

    if let Err(errors) = score_vault::snapshot::validate_snapshot(&snapshot) {
        eprintln!("Snapshot setup errors in {}:", path.display());
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(EXIT_CONFIG);
    }

    Ok(snapshot)
}

fn run_show(config_path: Option<PathBuf>, snapshot_path: &Path, method: Option<ScoringMethod>) -> i32 {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let snapshot = match load_snapshot(snapshot_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let results = score_vault::scoring::compute_results(&snapshot.competition);
    let options = DisplayOptions {
        method: method.unwrap_or_else(|| config.scoring_method()),
        labels: config.labels(),
        use_colors: score_vault::output::should_use_colors(config.color_mode()),
    };

    println!(
        "{}",
        score_vault::output::format_results(&snapshot.event_name, &results, &options)
    );
    EXIT_SUCCESS
}

fn run_export(
    config_path: Option<PathBuf>,
    snapshot_path: &Path,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> i32 {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let snapshot = match load_snapshot(snapshot_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let results = score_vault::scoring::compute_results(&snapshot.competition);
    let contents = match score_vault::output::render_export(
        format,
        &snapshot.event_name,
        &results,
        &config.labels(),
        config.csv_delimiter(),
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Export error: {:#}", e);
            return EXIT_EXPORT;
        }
    };

    let path = output.unwrap_or_else(|| {
        let name = score_vault::output::default_export_filename(&snapshot.event_name, format);
        match config.export_dir() {
            Some(dir) => PathBuf::from(dir).join(name),
            None => PathBuf::from(name),
        }
    });

    if let Err(e) = score_vault::output::write_export(&path, &contents) {
        eprintln!("Export error: {:#}", e);
        return EXIT_EXPORT;
    }

    println!("Exported {} results to {}", results.mode_name(), path.display());
    EXIT_SUCCESS
}

fn run_new(mode: CompetitionMode, path: &Path, options: &TemplateOptions, force: bool) -> i32 {
    if path.exists() && !force {
        eprintln!(
            "Snapshot already exists at {}. Use --force to overwrite",
            path.display()
        );
        return EXIT_SNAPSHOT;
    }

    let snapshot = score_vault::snapshot::new_snapshot(mode, options);
    if let Err(e) = score_vault::snapshot::save_snapshot(path, &snapshot) {
        eprintln!("Snapshot error: {:#}", e);
        return EXIT_SNAPSHOT;
    }

    println!("Created {} snapshot at {}", mode_label(mode), path.display());
    EXIT_SUCCESS
}

fn run_check(snapshot_path: &Path) -> i32 {
    let snapshot = match load_snapshot(snapshot_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let warnings = score_vault::snapshot::score_warnings(&snapshot);
    if warnings.is_empty() {
        println!("{}: OK", snapshot_path.display());
    } else {
        println!(
            "{}: OK with {} warning(s)",
            snapshot_path.display(),
            warnings.len()
        );
        for warning in warnings {
            println!("  - {}", warning);
        }
    }
    EXIT_SUCCESS
}

fn run_init(config_path: Option<PathBuf>, force: bool) -> i32 {
    let path = match config_path {
        Some(p) => p,
        None => match score_vault::config::get_config_path() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                return EXIT_CONFIG;
            }
        },
    };

    if let Err(e) = score_vault::config::write_starter_config(&path, force) {
        eprintln!("Config error: {:#}", e);
        return EXIT_CONFIG;
    }

    println!("Config written to {}", path.display());
    EXIT_SUCCESS
}

fn mode_label(mode: CompetitionMode) -> &'static str {
    match mode {
        CompetitionMode::Team => "team",
        CompetitionMode::Individual => "individual",
        CompetitionMode::Combined => "combined",
    }
}
