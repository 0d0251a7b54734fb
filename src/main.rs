//! Terminal driver for the career assessment.
//!
//! # Usage
//!
//! ```bash
//! career-compass --user alice
//! CAREER_COMPASS__STORAGE__BACKEND=file career-compass --user alice
//! ```
//!
//! Type `restart` at any prompt to start over, `q` to quit.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use career_compass::adapters::storage::{FileProgressStore, InMemoryProgressStore};
use career_compass::application::FlowSession;
use career_compass::config::{AppConfig, LoggingConfig, StorageBackend};
use career_compass::domain::content::ContentCatalog;
use career_compass::domain::flow::{FlowContent, FlowView, Phase};
use career_compass::domain::foundation::{DomainError, UserId};
use career_compass::ports::ProgressStore;

#[derive(Parser, Debug)]
#[command(name = "career-compass")]
#[command(about = "Interactive career self-assessment in the terminal")]
struct Args {
    /// Identifier progress is stored under; omit to play without saving
    #[arg(long)]
    user: Option<String>,

    /// Narrative to play after choosing a career (overrides configuration)
    #[arg(long)]
    narrative: Option<String>,

    /// Print each view, and each rejected input as `{code, message, details}`, as a JSON line
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    init_tracing(&config.logging);

    let catalog = ContentCatalog::builtin().context("Failed to load built-in content")?;
    let narrative = args
        .narrative
        .as_deref()
        .or(config.content.narrative.as_deref());
    let content = Arc::new(FlowContent::from_catalog(catalog, narrative)?);

    let store: Arc<dyn ProgressStore> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryProgressStore::new()),
        StorageBackend::File => Arc::new(FileProgressStore::new(&config.storage.data_dir)),
    };
    let user_id = args.user.map(UserId::new).transpose()?;

    let mut session = FlowSession::new(content, user_id, store)
        .with_persistence(config.features.persist_progress);
    info!(session_id = %session.id(), "Session started");

    if config.features.enable_resume {
        session.resume().await;
    }

    run(&mut session, args.json).await?;
    session.flush().await;
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(session: &mut FlowSession, json: bool) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let view = session.view();
        if json {
            println!("{}", serde_json::to_string(&view)?);
        } else {
            render(&view);
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        let result = if input.eq_ignore_ascii_case("restart") {
            session.restart()
        } else {
            match view.phase {
                Phase::Intro => session.start(),
                Phase::Name => session.submit_identity(input, 0),
                Phase::Age => match input.parse::<u32>() {
                    Ok(age) => session.submit_identity(&view.identity.name, age),
                    Err(_) => {
                        println!("Please enter your age as a number.");
                        continue;
                    }
                },
                Phase::PsychologistIntro => session.continue_flow(),
                Phase::Quiz => match option_index(input) {
                    Some(index) => session.select_answer(index),
                    None => continue,
                },
                Phase::Analysis if input.is_empty() => session.continue_flow(),
                Phase::Analysis | Phase::CareerSelection => {
                    match option_index(input).and_then(|i| view.suggestions.get(i)) {
                        Some(suggestion) => session.select_career(&suggestion.title),
                        None => continue,
                    }
                }
                Phase::Story => match option_index(input) {
                    Some(index) => session.select_story_choice(index),
                    None => continue,
                },
                Phase::Results => session.restart(),
            }
        };

        if let Err(e) = result {
            if json {
                println!("{}", serde_json::to_string(&DomainError::from(e))?);
            } else {
                println!("{}", e);
            }
        }
    }

    Ok(())
}

/// Maps a 1-based menu number to an index.
fn option_index(input: &str) -> Option<usize> {
    input.parse::<usize>().ok()?.checked_sub(1)
}

fn render(view: &FlowView) {
    println!();
    match view.phase {
        Phase::Intro => println!("Welcome to Career Compass. Press Enter to begin."),
        Phase::Name => println!("What is your name?"),
        Phase::Age => println!("How old are you?"),
        Phase::PsychologistIntro => {
            println!(
                "Nice to meet you, {}. I'm the career psychologist. A few questions will show \
                 where your strengths lie. Press Enter when you're ready.",
                view.identity.name
            );
        }
        Phase::Quiz => {
            if let Some(question) = &view.question {
                println!("Question {}/{}: {}", question.number, question.total, question.prompt);
                for (i, answer) in question.answers.iter().enumerate() {
                    println!("  {}. {}", i + 1, answer);
                }
            }
        }
        Phase::Analysis | Phase::CareerSelection => {
            if let Some(analysis) = &view.analysis {
                println!("{}", analysis.greeting);
                for assessment in &analysis.traits {
                    println!(
                        "  {}: {} ({})",
                        assessment.name,
                        assessment.score,
                        assessment.level.describe()
                    );
                }
            }
            if view.suggestions.is_empty() {
                println!("No career stands out yet. Type restart to try again.");
                return;
            }
            println!("Careers that fit you:");
            for (i, suggestion) in view.suggestions.iter().enumerate() {
                println!("  {}. {} - {}", i + 1, suggestion.title, suggestion.match_percentage);
                if view.phase == Phase::CareerSelection {
                    println!("     {}", suggestion.description);
                    println!("     Skills: {}", suggestion.required_skills.join(", "));
                }
            }
            if view.phase == Phase::Analysis {
                println!("Pick a number, or press Enter for details.");
            } else {
                println!("Pick a number to try a day in that career.");
            }
        }
        Phase::Story => {
            if let Some(story) = &view.story {
                println!("[{}/{}] {}", story.number, story.total, story.title);
                println!("{}", story.description);
                for (i, choice) in story.choices.iter().enumerate() {
                    println!("  {}. {}", i + 1, choice.text);
                }
            }
        }
        Phase::Results => {
            if let Some(result) = &view.result {
                println!("{}", result.headline);
                println!("{}", result.description);
            }
            println!("Press Enter to start over, or q to quit.");
        }
    }
}
