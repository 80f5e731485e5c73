//! # Salesdesk CLI (`desk`)
//!
//! ## Usage
//!
//! ```bash
//! desk --config ./config/desk.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `desk serve` | Start the HTTP API |
//! | `desk ask "<question>"` | Answer a question from the command line |
//! | `desk reps` | List the roster, optionally filtered |
//! | `desk overview` | Per-rep performance table |
//!
//! ## Examples
//!
//! ```bash
//! # Deterministic analytics — works fully offline
//! desk ask "Compare Alice and Bob"
//! desk ask "What is Alice's win rate?"
//!
//! # Retrieval-augmented answering (embedding + generation providers configured)
//! desk ask "Which reps work with healthcare clients?"
//!
//! # Roster queries
//! desk reps --region Europe
//! desk reps --skill Negotiation
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use salesdesk::config::load_config;
use salesdesk::loader::load_roster;
use salesdesk::server::run_server;
use salesdesk::service::DeskService;

/// Salesdesk — question answering over sales team data.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/desk.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "desk",
    about = "Salesdesk — question answering over sales team data",
    version,
    long_about = "Salesdesk answers natural-language questions about a roster of sales \
    representatives, their deals, and their clients. Numeric questions are computed \
    deterministically; open questions are answered with hybrid retrieval plus a \
    language-model call, with every answer traced back to its source records."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/desk.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API.
    ///
    /// Loads the roster, builds the document corpus and vector index, then
    /// binds to the address configured in `[server].bind`.
    Serve,

    /// Answer a single question and print the answer with its sources.
    Ask {
        /// The question to answer.
        question: String,

        /// Rep id hint: checked first in the exact-match scan.
        #[arg(long)]
        rep: Option<u32>,
    },

    /// List sales reps, optionally filtered by region and skill.
    Reps {
        /// Keep reps whose region contains this value (case-insensitive).
        #[arg(long)]
        region: Option<String>,

        /// Keep reps listing this skill (case-insensitive).
        #[arg(long)]
        skill: Option<String>,
    },

    /// Print the per-rep performance overview.
    Overview,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let roster = Arc::new(load_roster(&config.data.path)?);

    match cli.command {
        Commands::Serve => {
            let service = Arc::new(DeskService::build(config.clone(), roster).await?);
            run_server(&config, service).await?;
        }
        Commands::Ask { question, rep } => {
            let service = DeskService::build(config, roster).await?;
            let answer = service.answer(&question, rep).await?;
            println!("{}", answer.answer);
            if !answer.sources.is_empty() {
                println!();
                println!("Sources: {}", answer.sources.join(", "));
            }
        }
        Commands::Reps { region, skill } => {
            let reps: Vec<_> = roster
                .all()
                .iter()
                .filter(|rep| match &region {
                    Some(r) => rep.region.to_lowercase().contains(&r.to_lowercase()),
                    None => true,
                })
                .filter(|rep| match &skill {
                    Some(s) => rep.skills.iter().any(|k| k.eq_ignore_ascii_case(s)),
                    None => true,
                })
                .collect();

            if reps.is_empty() {
                println!("No matching sales reps.");
            }
            for rep in reps {
                println!(
                    "{:>3}  {} — {} ({})",
                    rep.id, rep.name, rep.role, rep.region
                );
            }
        }
        Commands::Overview => {
            for row in roster.overview() {
                println!(
                    "{} ({}): {} won / {} lost / {} in progress, won value {}, clients {}",
                    row.rep_name,
                    row.region,
                    row.won_deals,
                    row.lost_deals,
                    row.in_progress_deals,
                    row.total_value_won,
                    row.client_count
                );
            }
        }
    }

    Ok(())
}
