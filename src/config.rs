use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Which stopping policy governs a collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectPolicy {
    /// Walk the whole listing, bounded only by the per-run cap.
    Unlimited,
    /// Stop at the first page with nothing new this run.
    RunDedup,
    /// Also skip posts collected by previous runs (default).
    KnownIds,
    /// Only collect posts created inside the trailing window.
    Window,
}

impl CollectPolicy {
    /// Parse a `TALLY_POLICY` value.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "unlimited" => Ok(CollectPolicy::Unlimited),
            "run-dedup" => Ok(CollectPolicy::RunDedup),
            "known-ids" => Ok(CollectPolicy::KnownIds),
            "window" => Ok(CollectPolicy::Window),
            other => anyhow::bail!(
                "Unknown TALLY_POLICY '{other}'. \
                 Expected one of: unlimited, run-dedup, known-ids, window."
            ),
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file is
/// loaded automatically at startup via dotenvy. The value is immutable for
/// the whole run; every component borrows it.
pub struct Config {
    pub api_key: String,
    /// SocialData API base URL (defaults to https://api.socialdata.tools).
    pub api_url: String,
    /// The community whose listing is walked.
    pub community_id: String,
    pub policy: CollectPolicy,
    /// Trailing window in days for the window policy.
    pub window_days: i64,
    /// Page size requested per fetch.
    pub page_limit: u32,
    /// Hard cap on posts collected per run, checked at page granularity.
    pub max_new_posts: usize,
    /// Pause between page fetches, in seconds.
    pub fetch_delay_secs: u64,
    /// Directory the artifacts are written to.
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only the credentials have no default; everything else falls back
    /// to the values the production deployment runs with. A numeric
    /// variable that doesn't parse, or an unknown policy name, fails the
    /// load rather than silently changing dedup semantics.
    pub fn load() -> Result<Self> {
        let policy = match env::var("TALLY_POLICY") {
            Ok(value) => CollectPolicy::parse(&value)?,
            Err(_) => CollectPolicy::KnownIds,
        };

        Ok(Self {
            api_key: env::var("SOCIALDATA_API_KEY").unwrap_or_default(),
            api_url: env::var("SOCIALDATA_API_URL")
                .unwrap_or_else(|_| crate::socialdata::client::DEFAULT_API_URL.to_string()),
            community_id: env::var("COMMUNITY_ID").unwrap_or_default(),
            policy,
            window_days: parse_env("TALLY_WINDOW_DAYS", 60)?,
            page_limit: parse_env("TALLY_PAGE_LIMIT", 50)?,
            max_new_posts: parse_env("TALLY_MAX_NEW_POSTS", 2500)?,
            fetch_delay_secs: parse_env("TALLY_FETCH_DELAY_SECS", 3)?,
            data_dir: env::var("TALLY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        })
    }

    /// Check that the API key and community are configured.
    /// Call this before any network operation.
    pub fn require_credentials(&self) -> Result<()> {
        if self.api_key.is_empty() {
            anyhow::bail!(
                "SOCIALDATA_API_KEY not set. Add it to your .env file or the\n\
                 scheduler's environment."
            );
        }
        if self.community_id.is_empty() {
            anyhow::bail!("COMMUNITY_ID not set. Add it to your .env file.");
        }
        Ok(())
    }

    /// Collected posts snapshot (`all_tweets.json`).
    pub fn posts_path(&self) -> PathBuf {
        self.data_dir.join("all_tweets.json")
    }

    /// Author leaderboard (`leaderboard.json`).
    pub fn leaderboard_path(&self) -> PathBuf {
        self.data_dir.join("leaderboard.json")
    }

    /// Daily post counts (`daily_posts.json`).
    pub fn daily_counts_path(&self) -> PathBuf {
        self.data_dir.join("daily_posts.json")
    }

    /// Persisted known-ID set (`known_tweet_ids.txt`).
    pub fn known_ids_path(&self) -> PathBuf {
        self.data_dir.join("known_tweet_ids.txt")
    }
}

/// Read an env var and parse it, falling back to `default` when unset.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => parse_value(key, &value),
        Err(_) => Ok(default),
    }
}

/// Parse one variable's value, naming the variable on failure.
fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("{key} must be a number, got '{value}'"))
}
