use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use race_champ::age_grade::{AgeGrader, FactorTable, RoadStandards};
use race_champ::model::Sex;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 1;
const EXIT_OUTPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Table,
    Tsv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SexArg {
    Male,
    Female,
}

impl From<SexArg> for Sex {
    fn from(sex: SexArg) -> Self {
        match sex {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score the championship and write the HTML site (default if no subcommand)
    Build,
    /// Print the overall leaderboard
    Standings {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Only show one sex
        #[arg(short, long, value_enum)]
        sex: Option<SexArg>,
    },
    /// Open the generated index page in the browser
    Open,
}

#[derive(Parser, Debug)]
#[command(name = "race-champ")]
#[command(about = "Age-graded road race club championship", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ./championship.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Reference date for race status and age categories (DD/MM/YYYY, defaults to today)
    #[arg(long, global = true, value_parser = parse_as_of)]
    as_of: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn parse_as_of(value: &str) -> Result<NaiveDate, String> {
    race_champ::parse::parse_date(value).map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Build);
    let start_time = Instant::now();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    // Load config
    let config = match race_champ::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Commands::Open = command {
        let index = config.output_dir.join(race_champ::render::INDEX_PAGE);
        if let Err(e) = race_champ::browser::open_page(&index) {
            eprintln!("Failed to open browser: {:#}", e);
            std::process::exit(EXIT_OUTPUT);
        }
        println!("Opening {} in browser", index.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Validate scoring config at startup
    let effective_scoring = config.scoring.clone().unwrap_or_default();
    if let Err(errors) = race_champ::scoring::validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let as_of = cli
        .as_of
        .or(config.as_of)
        .unwrap_or_else(|| Local::now().date_naive());
    debug!(
        "Reading races from {} and athletes from {}, as of {}",
        config.races.display(),
        config.athletes.display(),
        race_champ::parse::format_date(as_of)
    );

    let grader: Box<dyn AgeGrader> = match &config.age_factors {
        Some(path) => match FactorTable::load(path) {
            Ok(table) => Box::new(table),
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        },
        None => {
            warn!("No age_factors table configured, age grades use the built-in approximate standards");
            Box::new(RoadStandards::new())
        }
    };
    let champs = match race_champ::loader::load_championship(
        &config.athletes,
        &config.races,
        effective_scoring,
        grader.as_ref(),
        as_of,
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Data error: {}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    // Route based on subcommand
    match command {
        Commands::Build => {
            match race_champ::render::write_site(&champs, &config) {
                Ok(pages) => {
                    println!(
                        "Wrote {} pages to {}",
                        pages.len(),
                        config.output_dir.display()
                    );
                }
                Err(e) => {
                    eprintln!("Output error: {:#}", e);
                    std::process::exit(EXIT_OUTPUT);
                }
            }
        }
        Commands::Standings { format, sex } => {
            let rows = race_champ::standings::overall_standings(&champs, sex.map(Sex::from));
            let output = match format {
                Format::Table => race_champ::output::format_standings_table(
                    &rows,
                    race_champ::output::should_use_colors(),
                ),
                Format::Tsv => race_champ::output::format_tsv(&rows),
                Format::Json => match race_champ::output::format_json(&rows) {
                    Ok(json) => json,
                    Err(e) => {
                        eprintln!("Output error: {}", e);
                        std::process::exit(EXIT_OUTPUT);
                    }
                },
            };
            println!("{}", output);
        }
        // Opened before loading
        Commands::Open => {}
    }

    info!("Done in {:?}", start_time.elapsed());
    std::process::exit(EXIT_SUCCESS);
}
