// SocialData API client: bearer-authenticated HTTP over reqwest.
//
// The job uses exactly one endpoint: the community tweets listing. It is
// cursor-paginated and ordered newest-first; the server applies no novelty
// filter, so walking from the top on every run is the only access pattern.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use super::posts::Post;

/// Default base URL for the SocialData API.
pub const DEFAULT_API_URL: &str = "https://api.socialdata.tools";

/// One page of the community tweets listing.
///
/// A missing or null `tweets` key reads as an empty page; a missing (or
/// empty) `next_cursor` means the listing ended.
#[derive(Debug, Deserialize)]
pub struct TweetsPage {
    #[serde(default, deserialize_with = "deserialize_tweets")]
    pub tweets: Vec<Post>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// The endpoint marks an exhausted listing with a missing `tweets` key or
/// an explicit null; both read as an empty page.
fn deserialize_tweets<'de, D>(deserializer: D) -> std::result::Result<Vec<Post>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let tweets = Option::<Vec<Post>>::deserialize(deserializer)?;
    Ok(tweets.unwrap_or_default())
}

/// Thin typed wrapper over the SocialData API.
///
/// Every request carries the API key as a bearer token. Non-2xx responses
/// are returned as errors with the status and body attached; the caller
/// decides whether that aborts the run (it does).
pub struct SocialDataClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SocialDataClient {
    /// Create a client pointing at the given base URL.
    ///
    /// Defaults to `https://api.socialdata.tools`; pass a different URL
    /// for testing.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("tally/0.1 (community-leaderboard)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetch one page of a community's tweets, most recent first.
    ///
    /// Pass the cursor from the previous page to continue the listing;
    /// `None` starts from the top.
    pub async fn community_tweets(
        &self,
        community_id: &str,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<TweetsPage> {
        let url = format!(
            "{}/twitter/community/{}/tweets",
            self.base_url, community_id
        );

        let limit_str = limit.to_string();
        let mut params: Vec<(&str, &str)> = vec![("type", "Latest"), ("limit", &limit_str)];
        if let Some(c) = cursor {
            params.push(("cursor", c));
        }

        debug!(community = community_id, cursor = ?cursor, "Fetching community tweets page");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&params)
            .send()
            .await
            .with_context(|| format!("Tweets request failed for community {community_id}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Community tweets request returned {status}: {body}");
        }

        response
            .json::<TweetsPage>()
            .await
            .context("Failed to deserialize community tweets page")
    }
}
