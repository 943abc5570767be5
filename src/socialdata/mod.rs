// SocialData API surface: the HTTP client and the records it returns.
//
// SocialData (api.socialdata.tools) proxies X/Twitter data behind a paid
// API key. The community tweets listing is the only endpoint this job
// touches.

pub mod client;
pub mod posts;
