use anyhow::Result;
use colored::Colorize;
use tracing::info;

use tally::config::Config;
use tally::pipeline::policy::StopPolicy;
use tally::pipeline::{aggregate, collect};
use tally::socialdata::client::SocialDataClient;
use tally::store;

// The run is strictly sequential, so a single-threaded runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tally=info")),
        )
        .init();

    let config = Config::load()?;
    config.require_credentials()?;

    let client = SocialDataClient::new(&config.api_url, &config.api_key)?;
    let policy = StopPolicy::from_config(&config)?;

    info!(
        community = %config.community_id,
        policy = policy.label(),
        "Starting collection run"
    );

    let collected = collect::run(&client, &config, &policy).await?;
    let aggregates = aggregate::run(&collected.posts);

    store::save_json(&config.leaderboard_path(), &aggregates.leaderboard)?;
    store::save_json(&config.daily_counts_path(), &aggregates.daily)?;

    // Persist the known-ID set last, after every artifact above made it to
    // disk, so an aborted run re-collects instead of silently skipping.
    if let Some(ids) = &collected.known_ids {
        store::save_known_ids(&config.known_ids_path(), ids)?;
        info!(known = ids.len(), "Known-ID set updated");
    }

    println!("\n{}", "Run complete.".bold());
    println!("  Posts collected:     {}", collected.posts.len());
    println!("  Leaderboard authors: {}", aggregates.leaderboard.len());
    println!("  Days with activity:  {}", aggregates.daily.len());
    println!(
        "{}",
        format!("  Artifacts written to {}", config.data_dir.display()).dimmed()
    );

    Ok(())
}
