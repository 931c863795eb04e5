use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use akari::config::Config;
use akari::db::Database;
use akari::output::terminal;
use akari::pipeline;
use akari::scoring::profile::{score_profile_quick, AccountMetrics};
use akari::sentiment::lexicon::LexiconSentiment;
use akari::sources::client::TwitterClient;
use akari::sources::profiles::fetch_account;

/// Akari: credibility scoring and audience-overlap analysis for
/// crypto Twitter accounts and projects.
#[derive(Parser)]
#[command(name = "akari", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Score a single account (fetches profile, tweets and followers)
    Score {
        /// The handle to score (without the @)
        handle: String,

        /// Quick mode: profile metadata only, no timeline fetch
        #[arg(long)]
        quick: bool,
    },

    /// Show scored profiles ranked by Akari score
    Rank {
        /// Only include profiles at or above this score
        #[arg(long, default_value = "0")]
        min_score: u32,
    },

    /// Run a full project refresh (official score, circle, heat, topics)
    Project {
        /// The project's official handle
        handle: String,
    },

    /// Compare two projects' circle audiences
    Compare {
        /// First project handle
        project_a: String,

        /// Second project handle
        project_b: String,
    },

    /// Show the tier bands
    Tiers,

    /// Show database statistics
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("akari=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing Akari database...");
            let db = Database::open(&config.db_path)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nNext step: set RAPIDAPI_KEY in your .env file,");
            println!("then run: akari score <handle>");
        }

        Commands::Score { handle, quick } => {
            config.require_rapidapi()?;
            let db = Database::open(&config.db_path)?;
            let client = TwitterClient::new(&config.rapidapi_host, &config.rapidapi_key)?;

            let mut result = if quick {
                let account = fetch_account(&client, &handle).await?.ok_or_else(|| {
                    anyhow::anyhow!("No profile found for @{handle}")
                })?;
                let metrics = AccountMetrics::from_record(&account, &[]);
                score_profile_quick(&account.handle, &metrics)
            } else {
                let sentiment = LexiconSentiment;
                pipeline::profile::score_account(&client, &sentiment, &handle).await?
            };
            result.scored_at = chrono::Utc::now().to_rfc3339();
            db.upsert_profile_score(&result).await?;

            terminal::display_profile_score(&result);
            if quick {
                println!(
                    "{}",
                    "Quick score: run without --quick for the full analysis.".dimmed()
                );
            }
        }

        Commands::Rank { min_score } => {
            let db = Database::open(&config.db_path)?;
            let profiles = db.get_ranked_profiles(min_score).await?;
            terminal::display_profile_ranking(&profiles);
        }

        Commands::Project { handle } => {
            config.require_rapidapi()?;
            let db = Database::open(&config.db_path)?;
            let client = TwitterClient::new(&config.rapidapi_host, &config.rapidapi_key)?;
            let sentiment = LexiconSentiment;

            let report =
                pipeline::project::refresh_project(&client, &sentiment, &db, &handle).await?;
            terminal::display_project_report(&report);
        }

        Commands::Compare {
            project_a,
            project_b,
        } => {
            let db = Database::open(&config.db_path)?;
            let a_id = project_a.to_lowercase();
            let b_id = project_b.to_lowercase();

            let circle_a = db.get_project_circle(&a_id).await?;
            let circle_b = db.get_project_circle(&b_id).await?;
            if circle_a.is_empty() || circle_b.is_empty() {
                anyhow::bail!(
                    "Both projects need a scored circle first. Run `akari project <handle>`."
                );
            }

            let influence = db.get_influence_map().await?;
            let result = akari::circle::overlap::common_circle(&circle_a, &circle_b, &influence);
            terminal::display_common_circle(&a_id, &b_id, &result);
        }

        Commands::Tiers => {
            terminal::display_tier_table();
        }

        Commands::Status => {
            let db = Database::open(&config.db_path)?;
            let (profiles, projects, circle, memberships) = db.get_counts().await?;
            println!("\n{}", "=== Akari Status ===".bold());
            println!("  Database: {}", config.db_path);
            println!("  Scored profiles:     {profiles}");
            println!("  Scored projects:     {projects}");
            println!("  Inner circle seats:  {circle}");
            println!("  Circle memberships:  {memberships}");
            println!();
        }
    }

    Ok(())
}
