//! Pollinator Backend CLI
//!
//! Operator entry point for the pollinator backend:
//! - apply database migrations
//! - walk an identification quiz from the terminal
//! - print the leaderboard
//! - record a sighting

use clap::{Parser, Subcommand};
use pollinator_backend::config::{AppConfig, LogFormat};
use pollinator_backend::database::{create_pool, run_migrations};
use pollinator_backend::error::{AppError, AppResult};
use pollinator_backend::models::{NewSighting, TargetType};
use pollinator_backend::repositories::QuizSource;
use pollinator_backend::services::{LeaderboardState, QuizController, QuizState};
use pollinator_backend::AppState;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "pollinator-backend", version, about = "Pollinator identification backend")]
struct Cli {
    /// Directory holding the SQL migrations
    #[arg(long, global = true, default_value = "./migrations")]
    migrations: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending database migrations
    Migrate,
    /// Walk an identification quiz interactively
    Quiz {
        /// Quiz type, e.g. "plant" or "insect"
        quiz_type: String,
        /// Locale for question texts (defaults to DEFAULT_LOCALE)
        #[arg(long)]
        locale: Option<String>,
    },
    /// Print the ranked leaderboard
    Leaderboard {
        /// Highlight this user
        #[arg(long)]
        user: Option<Uuid>,
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Record a sighting for a user
    RecordSighting {
        #[arg(long)]
        user: Uuid,
        #[arg(long)]
        target: Uuid,
        #[arg(long, value_parser = TargetType::from_str)]
        target_type: TargetType,
        #[arg(long, allow_hyphen_values = true)]
        latitude: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        longitude: Option<f64>,
        #[arg(long)]
        image: Option<String>,
    },
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        AppError::Config(e)
    })?;

    init_tracing(&config);
    info!(environment = %config.environment, "Pollinator backend starting");

    let pool = create_pool(&config.database).await.map_err(|e| {
        error!("Failed to create database pool: {}", e);
        AppError::Database(e)
    })?;

    let app_state = AppState::new(pool);

    match cli.command {
        Command::Migrate => {
            run_migrations(app_state.database.pool(), Some(&cli.migrations)).await?;
            info!("Database migrations completed successfully");
        }
        Command::Quiz { quiz_type, locale } => {
            let locale = locale.unwrap_or_else(|| config.default_locale.clone());
            let mut controller = app_state.quiz_controller();
            run_quiz(&mut controller, &quiz_type, &locale).await?;
        }
        Command::Leaderboard { user, json } => {
            match app_state.leaderboard_service().load(user).await {
                LeaderboardState::Loaded(entries) if json => {
                    println!("{}", serde_json::to_string_pretty(&entries)?);
                }
                LeaderboardState::Loaded(entries) => {
                    for entry in entries {
                        let marker = if entry.is_current_user { "*" } else { " " };
                        println!(
                            "{}{:>4}  {:<24} {:>6}  ({} species, {} sightings)",
                            marker,
                            entry.position,
                            entry.username,
                            entry.score,
                            entry.distinct_targets,
                            entry.sighting_count
                        );
                    }
                }
                LeaderboardState::Failed(message) => {
                    return Err(AppError::Message(message));
                }
                LeaderboardState::Idle => {}
            }
        }
        Command::RecordSighting {
            user,
            target,
            target_type,
            latitude,
            longitude,
            image,
        } => {
            let sighting = NewSighting {
                user_id: user,
                target_id: target,
                target_type,
                latitude,
                longitude,
                image_path: image,
            };
            let row = app_state.sighting_service().record_sighting(sighting).await?;
            println!("{}", serde_json::to_string_pretty(&row)?);
        }
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("pollinator_backend={},sqlx=warn", config.log_level).into()
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn run_quiz<S: QuizSource + ?Sized>(
    controller: &mut QuizController<S>,
    quiz_type: &str,
    locale: &str,
) -> AppResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    controller.start(quiz_type).await;

    loop {
        match controller.state() {
            QuizState::Start => return Ok(()),
            QuizState::Question(step) => {
                println!();
                println!("{}", step.question.text(locale));
                for (i, answer) in step.answers.iter().enumerate() {
                    println!("  {}) {}", i + 1, answer.text(locale));
                }
                let ids: Vec<Uuid> = step.answers.iter().map(|a| a.id).collect();
                if ids.is_empty() {
                    println!("This question has no answers");
                    return Ok(());
                }
                let can_go_back = step.depth() > 0;

                match read_choice(&mut lines, ids.len(), can_go_back).await? {
                    Choice::Pick(i) => {
                        controller.select_answer(ids[i]).await;
                    }
                    Choice::Back => {
                        controller.go_back();
                    }
                    Choice::Quit => return Ok(()),
                }
            }
            QuizState::TargetSelection(step) => {
                println!();
                println!("Several species match, pick one:");
                for (i, target) in step.candidates.iter().enumerate() {
                    println!(
                        "  {}) {} ({})",
                        i + 1,
                        target.common_name(),
                        target.scientific_name()
                    );
                }
                let ids: Vec<Uuid> = step.candidates.iter().map(|t| t.id()).collect();

                match read_choice(&mut lines, ids.len(), true).await? {
                    Choice::Pick(i) => {
                        controller.select_target(ids[i]);
                    }
                    Choice::Back => {
                        controller.go_back();
                    }
                    Choice::Quit => return Ok(()),
                }
            }
            QuizState::Result(outcome) => {
                println!();
                match (&outcome.selected_target, outcome.message()) {
                    (Some(target), _) => println!(
                        "Identified: {} ({})",
                        target.common_name(),
                        target.scientific_name()
                    ),
                    (None, Some(message)) => println!("{}", message),
                    (None, None) => println!("No result"),
                }
                return Ok(());
            }
        }
    }
}

enum Choice {
    Pick(usize),
    Back,
    Quit,
}

async fn read_choice(
    lines: &mut Lines<BufReader<Stdin>>,
    options: usize,
    can_go_back: bool,
) -> AppResult<Choice> {
    loop {
        if can_go_back {
            println!("[1-{}], b = back, q = quit", options);
        } else {
            println!("[1-{}], q = quit", options);
        }

        let Some(line) = lines.next_line().await? else {
            return Ok(Choice::Quit);
        };
        match line.trim() {
            "q" => return Ok(Choice::Quit),
            "b" if can_go_back => return Ok(Choice::Back),
            input => match input.parse::<usize>() {
                Ok(n) if (1..=options).contains(&n) => return Ok(Choice::Pick(n - 1)),
                _ => println!("Invalid choice: {}", input),
            },
        }
    }
}
