// Aggregation: folds collected posts into the two derived views.
//
// Both views are rebuilt from scratch every run: the leaderboard credits
// engagement to author handles, the daily histogram counts posts per UTC
// calendar date. One pass over the input produces both, and the same input
// always serializes to the same bytes.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::socialdata::posts::Post;

/// Engagement totals for one author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorStats {
    pub posts: i64,
    pub likes: i64,
    pub retweets: i64,
    pub comments: i64,
    pub quotes: i64,
    pub views: i64,
}

/// One leaderboard row. Serializes as a `[handle, stats]` pair, the shape
/// the dashboard consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry(pub String, pub AuthorStats);

/// Post count for one UTC calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub posts: i64,
}

/// The two derived views produced by one aggregation pass.
#[derive(Debug)]
pub struct Aggregates {
    /// Authors in first-encountered order (listing order, newest first).
    pub leaderboard: Vec<LeaderboardEntry>,
    /// Days in ascending date order.
    pub daily: Vec<DailyCount>,
}

/// Fold the collected posts into the leaderboard and the daily histogram.
///
/// A post without an author handle is excluded from the leaderboard; a post
/// without a parseable timestamp is excluded from the histogram. The two
/// exclusions are independent, logged, and never fatal. Null engagement
/// counters count as zero.
pub fn run(posts: &[Post]) -> Aggregates {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut leaderboard: Vec<LeaderboardEntry> = Vec::new();
    let mut daily: BTreeMap<NaiveDate, i64> = BTreeMap::new();

    for post in posts {
        match post.author_handle() {
            Some(handle) => {
                let idx = *index.entry(handle.to_string()).or_insert_with(|| {
                    leaderboard.push(LeaderboardEntry(handle.to_string(), AuthorStats::default()));
                    leaderboard.len() - 1
                });
                let stats = &mut leaderboard[idx].1;
                stats.posts += 1;
                stats.likes += post.favorite_count.unwrap_or(0);
                stats.retweets += post.retweet_count.unwrap_or(0);
                stats.comments += post.reply_count.unwrap_or(0);
                stats.quotes += post.quote_count.unwrap_or(0);
                stats.views += post.views_count.unwrap_or(0);
            }
            None => {
                warn!(id = %post.id_str, "Post has no author handle, not counted in leaderboard");
            }
        }

        match post.timestamp() {
            Some(instant) => *daily.entry(instant.date_naive()).or_insert(0) += 1,
            None => {
                warn!(
                    id = %post.id_str,
                    raw = ?post.raw_timestamp(),
                    "Post has no parseable timestamp, not counted in daily totals"
                );
            }
        }
    }

    Aggregates {
        leaderboard,
        daily: daily
            .into_iter()
            .map(|(date, posts)| DailyCount { date, posts })
            .collect(),
    }
}
