use crate::error::Error;
use secrecy::SecretString;

/// Environment variables holding the OAuth 1.0a credentials.
const ENV_API_KEY: &str = "TWITTER_API_KEY";
const ENV_API_KEY_SECRET: &str = "TWITTER_API_KEY_SECRET";
const ENV_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
const ENV_ACCESS_TOKEN_SECRET: &str = "TWITTER_ACCESS_TOKEN_SECRET";

/// Optional overrides.
const ENV_API_URL: &str = "TWITTER_API_URL";
const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

const DEFAULT_API_URL: &str = "https://api.twitter.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub twitter: TwitterConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct TwitterConfig {
    pub api_key: SecretString,
    pub api_key_secret: SecretString,
    pub access_token: SecretString,
    pub access_token_secret: SecretString,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// All four credential variables are required; the process must not
    /// start without them. Credentials are read once and never mutated.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let require = |name: &str| -> Result<SecretString, Error> {
            match get(name) {
                Some(value) if !value.trim().is_empty() => Ok(SecretString::from(value)),
                _ => Err(Error::Config(format!("{name} is not set"))),
            }
        };

        Ok(Self {
            twitter: TwitterConfig {
                api_key: require(ENV_API_KEY)?,
                api_key_secret: require(ENV_API_KEY_SECRET)?,
                access_token: require(ENV_ACCESS_TOKEN)?,
                access_token_secret: require(ENV_ACCESS_TOKEN_SECRET)?,
                api_url: get(ENV_API_URL)
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
            },
            logging: LoggingConfig {
                level: get(ENV_LOG_LEVEL).unwrap_or_else(|| "info".to_string()),
                format: get(ENV_LOG_FORMAT).unwrap_or_else(|| "compact".to_string()),
            },
        })
    }
}
