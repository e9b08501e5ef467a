use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::TwitterConfig;
use crate::error::Error;
use crate::twitter::auth::OAuthSigner;
use crate::twitter::types::{
    ApiErrorDetail, ApiResponse, CreateTweetRequest, CreatedTweetData, DeleteTweetData,
    PostedTweet, ProblemBody, TweetData, TweetDetails, UserData, UserProfile,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Operations the MCP dispatcher needs from the X API.
///
/// One method per remote endpoint; no retry, no caching. Mocked in
/// dispatcher tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TwitterClientTrait: Send + Sync {
    /// Create a standalone tweet.
    async fn post_tweet(&self, text: &str) -> Result<PostedTweet, Error>;

    /// Create a tweet replying to an existing tweet id.
    async fn post_reply(&self, text: &str, parent_id: &str) -> Result<PostedTweet, Error>;

    /// Fetch a tweet with its public engagement metrics.
    async fn get_tweet(&self, tweet_id: &str) -> Result<TweetDetails, Error>;

    /// Delete a tweet owned by the authenticated account.
    async fn delete_tweet(&self, tweet_id: &str) -> Result<(), Error>;

    /// Look up the authenticated account.
    async fn get_me(&self) -> Result<UserProfile, Error>;
}

/// X API v2 client. Every request is signed with OAuth 1.0a.
pub struct TwitterClient {
    client: Client,
    base_url: String,
    signer: OAuthSigner,
}

impl TwitterClient {
    pub fn new(config: &TwitterConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(format!("x-mcp/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            signer: OAuthSigner::new(config),
        })
    }

    async fn request<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        method: &str,
        endpoint: &str,
        body: Option<&B>,
        params: &[(String, String)],
    ) -> Result<T, Error> {
        let url = format!("{}{}", self.base_url, endpoint);

        debug!(method, endpoint, "X API request");

        // Query params go into the signature base string and onto the URL
        let full_url = if params.is_empty() {
            url.clone()
        } else {
            let query = params
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&");
            format!("{url}?{query}")
        };

        let auth_header = self.signer.sign(method, &url, params)?;

        let mut request = match method {
            "POST" => self.client.post(&url),
            "DELETE" => self.client.delete(&full_url),
            _ => self.client.get(&full_url),
        };

        request = request.header("Authorization", auth_header);

        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T, Error> {
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if status.is_success() {
            return serde_json::from_slice(&bytes).map_err(|e| Error::Api {
                status: status.as_u16(),
                message: format!("invalid response body: {e}"),
            });
        }

        let problem: ProblemBody = serde_json::from_slice(&bytes).unwrap_or_default();
        let message = problem
            .detail
            .or(problem.title)
            .unwrap_or_else(|| String::from_utf8_lossy(&bytes).into_owned());

        match status {
            StatusCode::UNAUTHORIZED => Err(Error::Auth(message)),
            StatusCode::NOT_FOUND => Err(Error::NotFound(message)),
            _ => Err(Error::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

/// Message from the first error object in a 200-with-errors lookup body.
fn first_error_message(errors: Option<Vec<ApiErrorDetail>>, fallback: &str) -> String {
    errors
        .as_deref()
        .and_then(|e| e.first())
        .map(ApiErrorDetail::message)
        .unwrap_or_else(|| fallback.to_string())
}

impl TwitterClient {
    async fn create_tweet(&self, text: &str, reply_to: Option<&str>) -> Result<PostedTweet, Error> {
        let request = CreateTweetRequest::new(text, reply_to);
        let response: ApiResponse<CreatedTweetData> =
            self.request("POST", "/2/tweets", Some(&request), &[]).await?;

        let data = response.data.ok_or_else(|| Error::Api {
            status: 201,
            message: first_error_message(response.errors, "tweet creation returned no data"),
        })?;

        debug!(tweet_id = %data.id, "tweet created");
        Ok(PostedTweet {
            id: data.id,
            text: data.text,
        })
    }
}

#[async_trait]
impl TwitterClientTrait for TwitterClient {
    async fn post_tweet(&self, text: &str) -> Result<PostedTweet, Error> {
        self.create_tweet(text, None).await
    }

    async fn post_reply(&self, text: &str, parent_id: &str) -> Result<PostedTweet, Error> {
        self.create_tweet(text, Some(parent_id)).await
    }

    async fn get_tweet(&self, tweet_id: &str) -> Result<TweetDetails, Error> {
        let params = vec![(
            "tweet.fields".to_string(),
            "public_metrics,created_at,author_id".to_string(),
        )];
        let response: ApiResponse<TweetData> = self
            .request(
                "GET",
                &format!("/2/tweets/{tweet_id}"),
                None::<&()>,
                &params,
            )
            .await?;

        // Unknown ids come back as 200 with an errors array and no data
        let data = response.data.ok_or_else(|| {
            Error::NotFound(first_error_message(
                response.errors,
                &format!("tweet {tweet_id} does not exist"),
            ))
        })?;

        Ok(TweetDetails {
            id: data.id,
            text: data.text,
            created_at: data.created_at,
            metrics: data.public_metrics.unwrap_or_default(),
        })
    }

    async fn delete_tweet(&self, tweet_id: &str) -> Result<(), Error> {
        let response: ApiResponse<DeleteTweetData> = self
            .request(
                "DELETE",
                &format!("/2/tweets/{tweet_id}"),
                None::<&()>,
                &[],
            )
            .await?;

        match response.data {
            Some(data) if data.deleted => {
                debug!(tweet_id, "tweet deleted");
                Ok(())
            }
            _ => Err(Error::NotFound(first_error_message(
                response.errors,
                &format!("tweet {tweet_id} was not deleted"),
            ))),
        }
    }

    async fn get_me(&self) -> Result<UserProfile, Error> {
        let params = vec![(
            "user.fields".to_string(),
            "id,name,username,public_metrics".to_string(),
        )];
        let response: ApiResponse<UserData> = self
            .request("GET", "/2/users/me", None::<&()>, &params)
            .await?;

        let data = response.data.ok_or_else(|| {
            Error::Auth(first_error_message(
                response.errors,
                "user lookup returned no data",
            ))
        })?;

        let metrics = data.public_metrics.unwrap_or_default();
        Ok(UserProfile {
            id: data.id,
            username: data.username,
            name: data.name,
            followers_count: metrics.followers_count,
            following_count: metrics.following_count,
            tweet_count: metrics.tweet_count,
        })
    }
}
