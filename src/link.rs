/// Build the canonical permalink for a tweet id.
///
/// The `/i/status/` form resolves without knowing the author's handle.
pub fn tweet_permalink(tweet_id: &str) -> String {
    format!("https://twitter.com/i/status/{tweet_id}")
}
