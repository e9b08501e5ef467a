//! Twitter API v2 wire types.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Response envelope
// ─────────────────────────────────────────────────────────────────────────────

/// Standard API v2 response wrapper.
///
/// Lookups for unknown ids come back as HTTP 200 with `data` absent and an
/// `errors` array present, so both halves are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub data: Option<T>,

    #[serde(default)]
    pub errors: Option<Vec<ApiErrorDetail>>,
}

/// A single error object inside an API v2 response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub detail: Option<String>,

    #[serde(default)]
    pub resource_id: Option<String>,
}

impl ApiErrorDetail {
    /// Best human-readable message from the error object.
    pub fn message(&self) -> String {
        self.detail
            .clone()
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

/// Top-level error body for non-2xx responses (RFC 7807 style).
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProblemBody {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub detail: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tweet payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Body for POST /2/tweets.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTweetRequest {
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<ReplyTarget>,
}

/// Reply linkage inside a tweet-creation request.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyTarget {
    pub in_reply_to_tweet_id: String,
}

impl CreateTweetRequest {
    pub fn new(text: &str, reply_to: Option<&str>) -> Self {
        Self {
            text: text.to_string(),
            reply: reply_to.map(|id| ReplyTarget {
                in_reply_to_tweet_id: id.to_string(),
            }),
        }
    }
}

/// `data` payload returned by POST /2/tweets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedTweetData {
    pub id: String,
    pub text: String,
}

/// `data` payload returned by GET /2/tweets/{id}.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TweetData {
    pub id: String,
    pub text: String,

    #[serde(default)]
    pub author_id: Option<String>,

    /// ISO 8601 timestamp, passed through as-is.
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub public_metrics: Option<PublicMetrics>,
}

/// Public engagement counts. Any count the platform omits defaults to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PublicMetrics {
    #[serde(default)]
    pub like_count: u64,

    #[serde(default)]
    pub retweet_count: u64,

    #[serde(default)]
    pub reply_count: u64,

    #[serde(default)]
    pub impression_count: u64,

    #[serde(default)]
    pub quote_count: u64,

    #[serde(default)]
    pub bookmark_count: u64,
}

/// `data` payload returned by DELETE /2/tweets/{id}.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteTweetData {
    pub deleted: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// User payloads
// ─────────────────────────────────────────────────────────────────────────────

/// `data` payload returned by GET /2/users/me.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub username: String,

    #[serde(default)]
    pub public_metrics: Option<UserPublicMetrics>,
}

/// Profile-level counts for the authenticated account.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UserPublicMetrics {
    #[serde(default)]
    pub followers_count: u64,

    #[serde(default)]
    pub following_count: u64,

    #[serde(default)]
    pub tweet_count: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain types returned by the client
// ─────────────────────────────────────────────────────────────────────────────

/// A tweet successfully created by the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedTweet {
    pub id: String,
    pub text: String,
}

/// A fetched tweet with its metrics snapshot.
#[derive(Debug, Clone)]
pub struct TweetDetails {
    pub id: String,
    pub text: String,
    pub created_at: Option<String>,
    pub metrics: PublicMetrics,
}

/// The authenticated account's profile.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub name: String,
    pub followers_count: u64,
    pub following_count: u64,
    pub tweet_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_without_reply_omits_reply_field() {
        let request = CreateTweetRequest::new("hello", None);
        let json = serde_json::to_string(&request).unwrap();

        assert_eq!(json, r#"{"text":"hello"}"#);
    }

    #[test]
    fn create_request_with_reply_links_parent() {
        let request = CreateTweetRequest::new("hello", Some("123"));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["text"], "hello");
        assert_eq!(json["reply"]["in_reply_to_tweet_id"], "123");
    }

    #[test]
    fn missing_metrics_default_to_zero() {
        let json = r#"{"like_count": 7}"#;
        let metrics: PublicMetrics = serde_json::from_str(json).unwrap();

        assert_eq!(metrics.like_count, 7);
        assert_eq!(metrics.retweet_count, 0);
        assert_eq!(metrics.reply_count, 0);
        assert_eq!(metrics.impression_count, 0);
        assert_eq!(metrics.quote_count, 0);
        assert_eq!(metrics.bookmark_count, 0);
    }

    #[test]
    fn lookup_response_with_errors_and_no_data() {
        let json = r#"{
            "errors": [{
                "title": "Not Found Error",
                "detail": "Could not find tweet with id: [42].",
                "resource_id": "42"
            }]
        }"#;

        let response: ApiResponse<TweetData> = serde_json::from_str(json).unwrap();
        assert!(response.data.is_none());

        let errors = response.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "Could not find tweet with id: [42].");
    }

    #[test]
    fn error_detail_falls_back_to_title() {
        let error = ApiErrorDetail {
            title: Some("Not Found Error".to_string()),
            detail: None,
            resource_id: None,
        };
        assert_eq!(error.message(), "Not Found Error");
    }

    #[test]
    fn tweet_data_parses_full_lookup() {
        let json = r#"{
            "id": "123",
            "text": "hello world",
            "author_id": "99",
            "created_at": "2024-01-01T00:00:00.000Z",
            "public_metrics": {
                "like_count": 1,
                "retweet_count": 2,
                "reply_count": 3,
                "impression_count": 4,
                "quote_count": 5,
                "bookmark_count": 6
            }
        }"#;

        let tweet: TweetData = serde_json::from_str(json).unwrap();
        assert_eq!(tweet.id, "123");
        let metrics = tweet.public_metrics.unwrap();
        assert_eq!(metrics.impression_count, 4);
        assert_eq!(metrics.bookmark_count, 6);
    }

    #[test]
    fn user_data_parses_without_metrics() {
        let json = r#"{"id": "1", "name": "Test User", "username": "testuser"}"#;
        let user: UserData = serde_json::from_str(json).unwrap();

        assert_eq!(user.username, "testuser");
        assert!(user.public_metrics.is_none());
    }
}
