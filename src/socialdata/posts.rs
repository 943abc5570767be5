// Post records as returned by the community tweets listing.
//
// Only the fields the job reads get typed struct members; everything else
// the API sends is kept in a flattened map so the persisted snapshot stays
// lossless for the dashboard (post text, entities, media, and whatever the
// API adds next all survive the round trip untouched).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single post from the community listing.
///
/// `id_str` is the only field whose presence is assumed, since it drives
/// all deduplication. The engagement counters are nullable on the wire and
/// coalesce to zero during aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id_str: String,
    /// The posting account. Null or absent for deleted/suspended authors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Author>,
    /// Creation timestamp under the current API field name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweet_created_at: Option<String>,
    /// Creation timestamp under the older field name, kept as a fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retweet_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views_count: Option<i64>,
    /// Everything else the API returned, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The account that wrote a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// The handle leaderboard credit goes to. None when the author object
    /// is missing or carries no usable handle; such posts are collected
    /// but never credited.
    pub fn author_handle(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.screen_name.as_deref())
            .filter(|handle| !handle.is_empty())
    }

    /// The raw creation timestamp, resolved through the field names the API
    /// has used over time (`tweet_created_at` first, `created_at` second).
    pub fn raw_timestamp(&self) -> Option<&str> {
        self.tweet_created_at
            .as_deref()
            .or(self.created_at.as_deref())
    }

    /// The creation instant in UTC. None when no timestamp field is present
    /// or the value doesn't parse as RFC 3339.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.raw_timestamp()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|instant| instant.with_timezone(&Utc))
    }
}
