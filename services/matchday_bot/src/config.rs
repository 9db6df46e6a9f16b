use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::clients::twitter::TwitterCredentials;

pub const DEFAULT_FOOTBALL_API_BASE_URL: &str = "https://api.football-data.org/v4";
pub const DEFAULT_TWITTER_API_BASE_URL: &str = "https://api.twitter.com";

/// Chelsea FC in the football-data.org id space.
const DEFAULT_TEAM_ID: i64 = 61;

#[derive(Debug, Clone)]
pub struct Config {
    pub football_api_base_url: String,
    pub football_api_key: String,
    pub team_id: i64,

    pub twitter_api_base_url: String,
    pub twitter_credentials: TwitterCredentials,

    pub state_file: PathBuf,
    /// Optional hashtag suffix for the full-time post, e.g. "#CFC #Chelsea".
    pub post_hashtags: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let football_api_base_url = env::var("FOOTBALL_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_FOOTBALL_API_BASE_URL.to_string());
        let football_api_key =
            env::var("FOOTBALL_API_KEY").context("FOOTBALL_API_KEY must be set")?;

        let team_id = parse_i64_env("TEAM_ID", DEFAULT_TEAM_ID)?;

        let twitter_api_base_url = env::var("TWITTER_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_TWITTER_API_BASE_URL.to_string());
        let twitter_credentials = TwitterCredentials {
            consumer_key: env::var("TWITTER_API_KEY").context("TWITTER_API_KEY must be set")?,
            consumer_secret: env::var("TWITTER_API_SECRET")
                .context("TWITTER_API_SECRET must be set")?,
            access_token: env::var("TWITTER_ACCESS_TOKEN")
                .context("TWITTER_ACCESS_TOKEN must be set")?,
            access_secret: env::var("TWITTER_ACCESS_SECRET")
                .context("TWITTER_ACCESS_SECRET must be set")?,
        };

        let state_file =
            PathBuf::from(env::var("STATE_FILE").unwrap_or_else(|_| "state.json".to_string()));

        let post_hashtags = env::var("POST_HASHTAGS")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            football_api_base_url,
            football_api_key,
            team_id,
            twitter_api_base_url,
            twitter_credentials,
            state_file,
            post_hashtags,
        })
    }
}

fn parse_i64_env(key: &str, default: i64) -> Result<i64> {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    raw.parse::<i64>()
        .with_context(|| format!("Invalid {key}: {raw} (expected integer)"))
}
