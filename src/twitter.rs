pub mod auth;
pub mod client;
pub mod types;

pub use client::{TwitterClient, TwitterClientTrait};
pub use types::{PostedTweet, PublicMetrics, TweetDetails, UserProfile};
