use crate::link::tweet_permalink;
use crate::mcp::tools::{
    DeleteTweetRequest, DeleteTweetResponse, GetTweetRequest, PostThreadRequest,
    PostThreadResponse, PostTweetRequest, PostTweetResponse, ProfileResponse, TweetResponse,
};
use crate::thread::{split_thread, validate_tweet_text};
use crate::twitter::client::TwitterClientTrait;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{Implementation, InitializeResult, ProtocolVersion, ServerCapabilities};
use rmcp::{Json, ServerHandler, ServiceExt, tool, tool_handler, tool_router};
use std::sync::Arc;
use tracing::{info, warn};

pub struct McpServer<T: TwitterClientTrait + 'static> {
    twitter_client: Arc<T>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl<T: TwitterClientTrait + 'static> McpServer<T> {
    pub fn new(twitter_client: Arc<T>) -> Self {
        Self {
            twitter_client,
            tool_router: Self::tool_router(),
        }
    }

    pub async fn run_stdio(self) -> anyhow::Result<()> {
        use tokio::io::{stdin, stdout};

        // Create stdio transport
        let transport = (stdin(), stdout());

        // Start MCP server with stdio transport
        let server = self.serve(transport).await?;

        // Wait for shutdown signal (blocks until server terminates)
        server.waiting().await?;

        Ok(())
    }

    // ========================================================================
    // MCP Tools
    // ========================================================================

    /// Tool 1: x_get_me - verify credentials and identify the account
    #[tool(description = "Get the authenticated X account to verify the connection")]
    pub async fn x_get_me(&self) -> Result<Json<ProfileResponse>, String> {
        let profile = self
            .twitter_client
            .get_me()
            .await
            .map_err(|e| e.to_string())?;

        info!(username = %profile.username, "authenticated");
        Ok(Json(profile.into()))
    }

    /// Tool 2: x_post_tweet - post a single tweet
    #[tool(description = "Post a single tweet (max 280 characters)")]
    pub async fn x_post_tweet(
        &self,
        Parameters(request): Parameters<PostTweetRequest>,
    ) -> Result<Json<PostTweetResponse>, String> {
        // Validation happens before any network call
        validate_tweet_text(&request.text).map_err(|e| e.to_string())?;

        let posted = self
            .twitter_client
            .post_tweet(&request.text)
            .await
            .map_err(|e| e.to_string())?;

        info!(tweet_id = %posted.id, "tweet posted");
        Ok(Json(PostTweetResponse {
            url: tweet_permalink(&posted.id),
            id: posted.id,
        }))
    }

    /// Tool 3: x_post_thread - post a reply chain
    #[tool(
        description = "Post a thread. Tweets are separated by a blank line, three hyphens, and a blank line (\\n\\n---\\n\\n); each is posted as a reply to the previous one"
    )]
    pub async fn x_post_thread(
        &self,
        Parameters(request): Parameters<PostThreadRequest>,
    ) -> Result<Json<PostThreadResponse>, String> {
        // All segments are validated before the first post; no partial
        // thread is started when a later segment is already known invalid.
        let segments = split_thread(&request.text).map_err(|e| e.to_string())?;

        let mut tweet_ids: Vec<String> = Vec::with_capacity(segments.len());
        let mut reply_to: Option<String> = None;

        // Sequential by construction: each post needs the previous id
        for (index, segment) in segments.iter().enumerate() {
            let result = match reply_to.as_deref() {
                None => self.twitter_client.post_tweet(segment).await,
                Some(parent_id) => self.twitter_client.post_reply(segment, parent_id).await,
            };

            match result {
                Ok(posted) => {
                    reply_to = Some(posted.id.clone());
                    tweet_ids.push(posted.id);
                }
                Err(e) => {
                    // Stop here; the already-posted prefix stays in place
                    warn!(
                        segment = index + 1,
                        posted = tweet_ids.len(),
                        error = %e,
                        "thread posting stopped"
                    );
                    return Ok(Json(PostThreadResponse {
                        url: tweet_ids.first().map(|id| tweet_permalink(id)),
                        tweet_ids,
                        failed_segment: Some((index + 1) as u32),
                        error: Some(e.to_string()),
                    }));
                }
            }
        }

        info!(tweets = tweet_ids.len(), "thread posted");
        Ok(Json(PostThreadResponse {
            url: tweet_ids.first().map(|id| tweet_permalink(id)),
            tweet_ids,
            failed_segment: None,
            error: None,
        }))
    }

    /// Tool 4: x_get_tweet - fetch a tweet with engagement metrics
    #[tool(description = "Get a tweet's text and public engagement metrics by id")]
    pub async fn x_get_tweet(
        &self,
        Parameters(request): Parameters<GetTweetRequest>,
    ) -> Result<Json<TweetResponse>, String> {
        let tweet = self
            .twitter_client
            .get_tweet(&request.tweet_id)
            .await
            .map_err(|e| e.to_string())?;

        Ok(Json(tweet.into()))
    }

    /// Tool 5: x_delete_tweet - delete an owned tweet
    #[tool(description = "Delete a tweet owned by the authenticated account")]
    pub async fn x_delete_tweet(
        &self,
        Parameters(request): Parameters<DeleteTweetRequest>,
    ) -> Result<Json<DeleteTweetResponse>, String> {
        self.twitter_client
            .delete_tweet(&request.tweet_id)
            .await
            .map_err(|e| e.to_string())?;

        info!(tweet_id = %request.tweet_id, "tweet deleted");
        Ok(Json(DeleteTweetResponse {
            tweet_id: request.tweet_id,
            deleted: true,
        }))
    }
}

#[tool_handler]
impl<T: TwitterClientTrait + 'static> ServerHandler for McpServer<T> {
    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "x-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "X (Twitter) MCP connector - post tweets and threads, fetch tweet metrics, \
                 delete tweets. Thread segments are separated by '\\n\\n---\\n\\n'."
                    .to_string(),
            ),
        }
    }
}
