mod commands;

// The binary has its own translation backend; the active locale is shared
rust_i18n::i18n!("locales", fallback = "en");

use anyhow::{Context, Result};
use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dancecenter::config::Config;
use dancecenter::error::{Error, ErrorExt};
use dancecenter::i18n;
use dancecenter::models::{
    parse_time, DayOfWeek, Difficulty, EntityId, Group, Hall, HallPayload, Student, StudentPayload,
    Trainer, TrainerPayload,
};
use dancecenter::pages::Session;

use commands::ItemChanges;

#[derive(Parser)]
#[command(
    name = "dancecenter",
    version,
    about = "Administrative client for a dance-studio scheduling service",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML); environment variables are used otherwise
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8080/api
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Language of messages (en, ru)
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how many records each collection holds
    Summary,

    /// Print the weekly occupancy grid of a hall
    Grid {
        /// Hall id or name (defaults to the first hall)
        #[arg(long)]
        hall: Option<String>,
    },

    /// Manage halls
    Hall {
        #[command(subcommand)]
        action: HallAction,
    },

    /// Manage trainers
    Trainer {
        #[command(subcommand)]
        action: TrainerAction,
    },

    /// Manage students
    Student {
        #[command(subcommand)]
        action: StudentAction,
    },

    /// Manage groups and their members
    Group {
        #[command(subcommand)]
        action: GroupAction,
    },

    /// Manage the weekly schedule
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },
}

#[derive(Subcommand)]
enum HallAction {
    /// List halls
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Create a hall
    Create {
        #[arg(long)]
        name: String,
        /// Area in square meters
        #[arg(long)]
        area: i32,
    },
    /// Update a hall
    Update {
        id: EntityId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        area: Option<i32>,
    },
    /// Delete a hall
    Delete {
        id: EntityId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TrainerAction {
    /// List trainers
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Create a trainer
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        /// Dance style
        #[arg(long)]
        style: String,
    },
    /// Update a trainer
    Update {
        id: EntityId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        style: Option<String>,
    },
    /// Delete a trainer
    Delete {
        id: EntityId,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum StudentAction {
    /// List students
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Create a student
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
    },
    /// Update a student
    Update {
        id: EntityId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Delete a student
    Delete {
        id: EntityId,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum GroupAction {
    /// List groups
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a group with its students and classes
    Show { id: EntityId },
    /// Create a group
    Create {
        /// Beg, Mid or Pro
        #[arg(long, value_parser = parse_difficulty)]
        difficulty: Difficulty,
        /// Trainer id or search term
        #[arg(long)]
        trainer: String,
        /// Student id or search term (repeatable)
        #[arg(long = "student")]
        students: Vec<String>,
    },
    /// Change a group's difficulty or trainer
    Update {
        id: EntityId,
        #[arg(long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,
        #[arg(long)]
        trainer: Option<String>,
    },
    /// Delete a group
    Delete {
        id: EntityId,
        #[arg(short, long)]
        yes: bool,
    },
    /// Add a student to a group
    AddStudent {
        id: EntityId,
        /// Student id or search term
        student: String,
    },
    /// Remove a student from a group
    RemoveStudent {
        id: EntityId,
        student_id: EntityId,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ScheduleAction {
    /// Add a class to the schedule
    Add {
        /// Hall id or name
        #[arg(long)]
        hall: String,
        /// Group id or search term
        #[arg(long)]
        group: String,
        #[arg(long, value_parser = parse_day)]
        day: DayOfWeek,
        /// HH:MM
        #[arg(long, value_parser = parse_clock)]
        start: NaiveTime,
        /// HH:MM (defaults to one hour after start)
        #[arg(long, value_parser = parse_clock)]
        end: Option<NaiveTime>,
    },
    /// Change a scheduled class
    Update {
        id: EntityId,
        #[arg(long)]
        hall: Option<String>,
        #[arg(long)]
        group: Option<String>,
        #[arg(long, value_parser = parse_day)]
        day: Option<DayOfWeek>,
        #[arg(long, value_parser = parse_clock)]
        start: Option<NaiveTime>,
        #[arg(long, value_parser = parse_clock)]
        end: Option<NaiveTime>,
    },
    /// Remove a class from the schedule
    Delete {
        id: EntityId,
        #[arg(short, long)]
        yes: bool,
    },
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::parse(s).ok_or_else(|| format!("unknown difficulty '{s}' (expected Beg, Mid or Pro)"))
}

fn parse_day(s: &str) -> Result<DayOfWeek, String> {
    DayOfWeek::parse(s).ok_or_else(|| format!("unknown day '{s}'"))
}

fn parse_clock(s: &str) -> Result<NaiveTime, String> {
    parse_time(s).ok_or_else(|| format!("invalid time '{s}' (expected HH:MM)"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    i18n::init_from_env();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => anyhow::bail!(Error::config(format!("{err:#}")).report()),
    };

    // Initialize tracing/logging
    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;
    i18n::set_locale(&config.i18n.locale);

    tracing::info!(base_url = %config.api.base_url, "dancecenter starting");

    let mut session = match Session::from_config(&config) {
        Ok(session) => session,
        Err(err) => {
            let err = Error::from(err);
            tracing::error!(category = ?err.category(), error = %err, "Failed to create API client");
            anyhow::bail!(err.report());
        }
    };
    session.refresh().await;

    let ok = run(cli.command, &mut session).await;
    commands::flush_notes(&mut session);

    if !ok? {
        std::process::exit(1);
    }
    Ok(())
}

/// Configuration from file or environment with command-line overrides applied
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(lang) = &cli.lang {
        config.i18n.locale = lang.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

async fn run(command: Commands, session: &mut Session) -> Result<bool> {
    match command {
        Commands::Summary => Ok(commands::summary(session)),

        Commands::Grid { hall } => Ok(commands::grid(session, hall.as_deref())),

        Commands::Hall { action } => match action {
            HallAction::List { search } => Ok(commands::list::<Hall>(session, search, commands::hall_row)),
            HallAction::Create { name, area } => {
                commands::create::<Hall>(session, HallPayload { name, area }).await
            }
            HallAction::Update { id, name, area } => {
                let current = session.snapshot().find::<Hall>(id);
                let payload = HallPayload {
                    name: name.or_else(|| current.map(|h| h.name.clone())).unwrap_or_default(),
                    area: area.or_else(|| current.and_then(|h| h.area)).unwrap_or_default(),
                };
                commands::update::<Hall>(session, id, payload).await
            }
            HallAction::Delete { id, yes } => commands::delete::<Hall>(session, id, yes).await,
        },

        Commands::Trainer { action } => match action {
            TrainerAction::List { search } => {
                Ok(commands::list::<Trainer>(session, search, commands::trainer_row))
            }
            TrainerAction::Create { name, phone, style } => {
                let payload = TrainerPayload {
                    name,
                    phone_number: phone,
                    dance_style: style,
                };
                commands::create::<Trainer>(session, payload).await
            }
            TrainerAction::Update {
                id,
                name,
                phone,
                style,
            } => {
                let current = session.snapshot().find::<Trainer>(id);
                let payload = TrainerPayload {
                    name: name.or_else(|| current.map(|t| t.name.clone())).unwrap_or_default(),
                    phone_number: phone
                        .or_else(|| current.map(|t| t.phone_number.clone()))
                        .unwrap_or_default(),
                    dance_style: style
                        .or_else(|| current.map(|t| t.dance_style.clone()))
                        .unwrap_or_default(),
                };
                commands::update::<Trainer>(session, id, payload).await
            }
            TrainerAction::Delete { id, yes } => commands::delete::<Trainer>(session, id, yes).await,
        },

        Commands::Student { action } => match action {
            StudentAction::List { search } => {
                Ok(commands::list::<Student>(session, search, commands::student_row))
            }
            StudentAction::Create { name, phone } => {
                let payload = StudentPayload {
                    name,
                    phone_number: phone,
                };
                commands::create::<Student>(session, payload).await
            }
            StudentAction::Update { id, name, phone } => {
                let current = session.snapshot().find::<Student>(id);
                let payload = StudentPayload {
                    name: name.or_else(|| current.map(|s| s.name.clone())).unwrap_or_default(),
                    phone_number: phone
                        .or_else(|| current.map(|s| s.phone_number.clone()))
                        .unwrap_or_default(),
                };
                commands::update::<Student>(session, id, payload).await
            }
            StudentAction::Delete { id, yes } => commands::delete::<Student>(session, id, yes).await,
        },

        Commands::Group { action } => match action {
            GroupAction::List { search } => Ok(commands::list::<Group>(session, search, commands::group_row)),
            GroupAction::Show { id } => commands::show_group(session, id).await,
            GroupAction::Create {
                difficulty,
                trainer,
                students,
            } => commands::create_group(session, difficulty, &trainer, &students).await,
            GroupAction::Update {
                id,
                difficulty,
                trainer,
            } => commands::update_group(session, id, difficulty, trainer.as_deref()).await,
            GroupAction::Delete { id, yes } => commands::delete_group(session, id, yes).await,
            GroupAction::AddStudent { id, student } => {
                commands::add_student(session, id, &student).await
            }
            GroupAction::RemoveStudent {
                id,
                student_id,
                yes,
            } => commands::remove_student(session, id, student_id, yes).await,
        },

        Commands::Schedule { action } => match action {
            ScheduleAction::Add {
                hall,
                group,
                day,
                start,
                end,
            } => {
                let changes = ItemChanges {
                    hall: Some(hall),
                    group: Some(group),
                    day: Some(day),
                    start: Some(start),
                    end,
                };
                commands::add_item(session, changes).await
            }
            ScheduleAction::Update {
                id,
                hall,
                group,
                day,
                start,
                end,
            } => {
                let changes = ItemChanges {
                    hall,
                    group,
                    day,
                    start,
                    end,
                };
                commands::update_item(session, id, changes).await
            }
            ScheduleAction::Delete { id, yes } => commands::delete_item(session, id, yes).await,
        },
    }
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("dancecenter=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("dancecenter={level},warn")))
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
