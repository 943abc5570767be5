// Collection loop: walks the community listing page by page.
//
// Every run starts at the newest post and pages backwards through the
// listing. The policy decides which records count as new and therefore
// when the walk stops; a hard per-run cap bounds the loop regardless of
// policy. A failed page fetch aborts the whole run and nothing is written.

use std::collections::{BTreeSet, HashSet};

use anyhow::{Context, Result};
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::pipeline::policy::StopPolicy;
use crate::socialdata::client::SocialDataClient;
use crate::socialdata::posts::Post;
use crate::store;

/// Result of one collection run.
#[derive(Debug)]
pub struct Collected {
    /// Newly collected posts in listing order (newest first), each
    /// identifier appearing at most once.
    pub posts: Vec<Post>,
    /// The identifier set to persist once the whole run has succeeded
    /// (known-ids policy only).
    pub known_ids: Option<BTreeSet<String>>,
}

/// Walk the community listing and collect every post that qualifies
/// under `policy`.
///
/// On success the posts snapshot is overwritten with the collected
/// sequence. The returned known-ID set is NOT persisted here: the caller
/// writes it only after aggregation has also succeeded, so an aborted run
/// re-collects instead of silently skipping.
pub async fn run(
    client: &SocialDataClient,
    config: &Config,
    policy: &StopPolicy,
) -> Result<Collected> {
    let mut collected: Vec<Post> = Vec::new();
    let mut seen_this_run: HashSet<String> = HashSet::new();
    let mut cursor: Option<String> = None;
    let mut first_page = true;

    loop {
        // Pace requests between pages. The API has rate limits and this
        // job is in no hurry.
        if !first_page && config.fetch_delay_secs > 0 {
            sleep(Duration::from_secs(config.fetch_delay_secs)).await;
        }
        first_page = false;

        let page = client
            .community_tweets(&config.community_id, config.page_limit, cursor.as_deref())
            .await?;

        if page.tweets.is_empty() {
            info!("Listing returned an empty page, stopping");
            break;
        }

        let page_size = page.tweets.len();
        let fresh: Vec<Post> = page
            .tweets
            .into_iter()
            .filter(|post| policy.is_qualifying(post, &seen_this_run))
            .collect();

        if fresh.is_empty() {
            info!(
                policy = policy.label(),
                page_size, "No qualifying posts on this page, stopping"
            );
            break;
        }

        let mut page_new = 0;
        for post in fresh {
            if seen_this_run.insert(post.id_str.clone()) {
                collected.push(post);
                page_new += 1;
            }
        }
        debug!(page_size, page_new, total = collected.len(), "Collected page");

        if collected.len() >= config.max_new_posts {
            warn!(
                total = collected.len(),
                cap = config.max_new_posts,
                "Reached the per-run post cap, stopping"
            );
            break;
        }

        // The API signals the last page with a missing or empty cursor.
        match page.next_cursor.as_deref() {
            Some(c) if !c.is_empty() => cursor = Some(c.to_string()),
            _ => {
                info!("Reached the end of the listing");
                break;
            }
        }
    }

    store::save_json(&config.posts_path(), &collected)
        .context("Failed to persist the posts snapshot")?;

    let known_ids = policy.updated_known_ids(&collected);

    info!(
        new_posts = collected.len(),
        policy = policy.label(),
        "Collection finished"
    );

    Ok(Collected {
        posts: collected,
        known_ids,
    })
}
