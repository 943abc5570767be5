// Stopping policies for the collection loop.
//
// The listing endpoint has no "since" parameter, so every run walks the
// same pages from the top. What varies is which records count as new, and
// that single predicate also decides when the walk stops: the loop ends at
// the first page where nothing qualifies.

use std::collections::{BTreeSet, HashSet};

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::config::{CollectPolicy, Config};
use crate::socialdata::posts::Post;
use crate::store;

/// Decides which posts qualify as new during one collection run.
///
/// Built once per run from the configured `CollectPolicy`. The known-ids
/// variant loads the persisted identifier set here; the window variant
/// fixes its cutoff here, so a long run cannot shift its own window.
#[derive(Debug)]
pub enum StopPolicy {
    /// Everything qualifies: the run walks the whole listing (or hits
    /// the per-run cap).
    Unlimited,
    /// Only identifiers not yet seen this run qualify.
    RunDedup,
    /// Like run-dedup, but identifiers collected by previous runs don't
    /// qualify either.
    KnownIds { known: BTreeSet<String> },
    /// Only posts created at or after the cutoff qualify. Relies on the
    /// listing being ordered newest-first: once a page falls entirely
    /// before the cutoff, nothing after it can qualify.
    Window { cutoff: DateTime<Utc> },
}

impl StopPolicy {
    /// Build the runtime policy for this run.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(match config.policy {
            CollectPolicy::Unlimited => StopPolicy::Unlimited,
            CollectPolicy::RunDedup => StopPolicy::RunDedup,
            CollectPolicy::KnownIds => {
                let known = store::load_known_ids(&config.known_ids_path())?;
                info!(known = known.len(), "Loaded known post IDs");
                StopPolicy::KnownIds { known }
            }
            CollectPolicy::Window => StopPolicy::Window {
                cutoff: Utc::now() - Duration::days(config.window_days),
            },
        })
    }

    /// Whether `post` counts as new under this policy.
    ///
    /// `seen_this_run` holds the identifiers already collected during the
    /// current run; a post without a parseable timestamp can never qualify
    /// under the window policy.
    pub fn is_qualifying(&self, post: &Post, seen_this_run: &HashSet<String>) -> bool {
        match self {
            StopPolicy::Unlimited => true,
            StopPolicy::RunDedup => !seen_this_run.contains(&post.id_str),
            StopPolicy::KnownIds { known } => {
                !seen_this_run.contains(&post.id_str) && !known.contains(&post.id_str)
            }
            StopPolicy::Window { cutoff } => {
                !seen_this_run.contains(&post.id_str)
                    && post.timestamp().is_some_and(|t| t >= *cutoff)
            }
        }
    }

    /// The identifier set to persist after a fully successful run: the
    /// historical set plus everything collected now. None for policies
    /// that keep no durable state.
    pub fn updated_known_ids(&self, collected: &[Post]) -> Option<BTreeSet<String>> {
        match self {
            StopPolicy::KnownIds { known } => {
                let mut all = known.clone();
                all.extend(collected.iter().map(|p| p.id_str.clone()));
                Some(all)
            }
            _ => None,
        }
    }

    /// Short name for log fields.
    pub fn label(&self) -> &'static str {
        match self {
            StopPolicy::Unlimited => "unlimited",
            StopPolicy::RunDedup => "run-dedup",
            StopPolicy::KnownIds { .. } => "known-ids",
            StopPolicy::Window { .. } => "window",
        }
    }
}
