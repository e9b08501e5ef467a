//! MCP tool request and response types with JSON schemas

use crate::twitter::types::{PublicMetrics, TweetDetails, UserProfile};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Tool 1: x_get_me
// ============================================================================

/// Response for x_get_me tool
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ProfileResponse {
    #[schemars(description = "Account id")]
    pub id: String,

    #[schemars(description = "Account handle, without the leading @")]
    pub username: String,

    #[schemars(description = "Display name")]
    pub name: String,

    #[schemars(description = "Follower count")]
    pub followers_count: u64,

    #[schemars(description = "Following count")]
    pub following_count: u64,

    #[schemars(description = "Total tweet count")]
    pub tweet_count: u64,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            name: profile.name,
            followers_count: profile.followers_count,
            following_count: profile.following_count,
            tweet_count: profile.tweet_count,
        }
    }
}

// ============================================================================
// Tool 2: x_post_tweet
// ============================================================================

/// Request for x_post_tweet tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PostTweetRequest {
    #[schemars(description = "Tweet content (max 280 characters)")]
    pub text: String,
}

/// Response for x_post_tweet tool
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct PostTweetResponse {
    #[schemars(description = "Id of the created tweet")]
    pub id: String,

    #[schemars(description = "Permalink to the created tweet")]
    pub url: String,
}

// ============================================================================
// Tool 3: x_post_thread
// ============================================================================

/// Request for x_post_thread tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PostThreadRequest {
    #[schemars(
        description = "Thread content; tweets separated by a blank line, three hyphens, and a blank line (\\n\\n---\\n\\n)"
    )]
    pub text: String,
}

/// Response for x_post_thread tool.
///
/// On a mid-chain failure this still reports the ids posted before the
/// failing segment; nothing is rolled back.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct PostThreadResponse {
    #[schemars(description = "Ids of successfully posted tweets, thread root first")]
    pub tweet_ids: Vec<String>,

    #[schemars(description = "Permalink to the thread root, when at least one tweet was posted")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[schemars(description = "1-based position of the segment that failed to post, if any")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_segment: Option<u32>,

    #[schemars(description = "Error for the failed segment, if any")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Tool 4: x_get_tweet
// ============================================================================

/// Request for x_get_tweet tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTweetRequest {
    #[schemars(description = "Id of the tweet to fetch")]
    pub tweet_id: String,
}

/// Response for x_get_tweet tool
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct TweetResponse {
    #[schemars(description = "Tweet id")]
    pub id: String,

    #[schemars(description = "Tweet text")]
    pub text: String,

    #[schemars(description = "Creation timestamp (ISO 8601), when available")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[schemars(description = "Public engagement metrics")]
    pub metrics: TweetMetrics,
}

/// Engagement counts; absent platform counts are reported as zero.
#[derive(Debug, Clone, Copy, Serialize, JsonSchema)]
pub struct TweetMetrics {
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
    pub impressions: u64,
    pub quotes: u64,
    pub bookmarks: u64,
}

impl From<PublicMetrics> for TweetMetrics {
    fn from(metrics: PublicMetrics) -> Self {
        Self {
            likes: metrics.like_count,
            retweets: metrics.retweet_count,
            replies: metrics.reply_count,
            impressions: metrics.impression_count,
            quotes: metrics.quote_count,
            bookmarks: metrics.bookmark_count,
        }
    }
}

impl From<TweetDetails> for TweetResponse {
    fn from(tweet: TweetDetails) -> Self {
        Self {
            id: tweet.id,
            text: tweet.text,
            created_at: tweet.created_at,
            metrics: tweet.metrics.into(),
        }
    }
}

// ============================================================================
// Tool 5: x_delete_tweet
// ============================================================================

/// Request for x_delete_tweet tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteTweetRequest {
    #[schemars(description = "Id of the tweet to delete")]
    pub tweet_id: String,
}

/// Response for x_delete_tweet tool
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct DeleteTweetResponse {
    #[schemars(description = "Id of the deleted tweet")]
    pub tweet_id: String,

    #[schemars(description = "Always true on success")]
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_response_serializes() {
        let response = ProfileResponse {
            id: "1".to_string(),
            username: "testuser".to_string(),
            name: "Test User".to_string(),
            followers_count: 10,
            following_count: 20,
            tweet_count: 30,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("testuser"));
        assert!(json.contains("followers_count"));
    }

    #[test]
    fn post_tweet_request_deserializes() {
        let json = r#"{"text": "hello"}"#;
        let request: PostTweetRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.text, "hello");
    }

    #[test]
    fn thread_response_omits_absent_failure_fields() {
        let response = PostThreadResponse {
            tweet_ids: vec!["1".to_string(), "2".to_string()],
            url: Some("https://twitter.com/i/status/1".to_string()),
            failed_segment: None,
            error: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("failed_segment"));
        assert!(!json.contains("error"));
    }

    #[test]
    fn thread_response_reports_partial_failure() {
        let response = PostThreadResponse {
            tweet_ids: vec!["1".to_string()],
            url: Some("https://twitter.com/i/status/1".to_string()),
            failed_segment: Some(2),
            error: Some("X API error (status 403): duplicate".to_string()),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["failed_segment"], 2);
        assert_eq!(json["tweet_ids"][0], "1");
    }

    #[test]
    fn tweet_metrics_map_from_public_metrics() {
        let metrics = PublicMetrics {
            like_count: 1,
            retweet_count: 2,
            reply_count: 3,
            impression_count: 4,
            quote_count: 5,
            bookmark_count: 6,
        };

        let mapped = TweetMetrics::from(metrics);
        assert_eq!(mapped.likes, 1);
        assert_eq!(mapped.retweets, 2);
        assert_eq!(mapped.replies, 3);
        assert_eq!(mapped.impressions, 4);
        assert_eq!(mapped.quotes, 5);
        assert_eq!(mapped.bookmarks, 6);
    }

    #[test]
    fn get_tweet_request_deserializes() {
        let json = r#"{"tweet_id": "123"}"#;
        let request: GetTweetRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.tweet_id, "123");
    }
}
