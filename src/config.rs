//! Process configuration read from the environment (and `.env` when present).
//!
//! Required: `TELOXIDE_TOKEN`, `TAGS` (comma separated), `COLLAGE_URL`.
//! Webhook mode is enabled when both `NGROK_URL` and `NGROK_ADDR` are set,
//! otherwise the bot falls back to long polling.

use std::{net::SocketAddr, str::FromStr, time::Duration};

use dotenvy::dotenv;
use tracing::Level;
use url::Url;

use crate::{
    error::QuizError,
    quiz::{AnswerSlot, TagVocabulary},
    state::SessionScope,
};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_COLLAGE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Webhook {
    pub addr: SocketAddr,
    pub url: Url,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub tags: TagVocabulary,
    pub collage_url: Url,
    pub collage_timeout: Duration,
    pub seed: u64,
    pub answer_slot: AnswerSlot,
    pub session_scope: SessionScope,
    pub log_level: Level,
    pub webhook: Option<Webhook>,
}

impl Config {
    pub fn from_env() -> Result<Self, QuizError> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, QuizError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| QuizError::config(key, "should be set"))
        };

        let token = required("TELOXIDE_TOKEN")?;
        let tags = TagVocabulary::parse(&required("TAGS")?)?;
        let collage_url = parse("COLLAGE_URL", &required("COLLAGE_URL")?)?;

        let collage_timeout = optional::<u64, _>(&lookup, "COLLAGE_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_COLLAGE_TIMEOUT);
        let seed = optional::<u64, _>(&lookup, "QUIZ_SEED")?.unwrap_or(DEFAULT_SEED);
        let answer_slot = optional::<AnswerSlot, _>(&lookup, "ANSWER_SLOT")?.unwrap_or_default();
        let session_scope = optional::<SessionScope, _>(&lookup, "SESSION_SCOPE")?.unwrap_or_default();
        let log_level = optional::<Level, _>(&lookup, "LOG_LEVEL")?.unwrap_or(Level::ERROR);

        let webhook = match (
            optional::<Url, _>(&lookup, "NGROK_URL")?,
            optional::<SocketAddr, _>(&lookup, "NGROK_ADDR")?,
        ) {
            (Some(url), Some(addr)) => Some(Webhook { addr, url }),
            (None, None) => None,
            _ => {
                return Err(QuizError::config(
                    "NGROK_URL",
                    "NGROK_URL and NGROK_ADDR must be set together",
                ))
            }
        };

        Ok(Self {
            token,
            tags,
            collage_url,
            collage_timeout,
            seed,
            answer_slot,
            session_scope,
            log_level,
            webhook,
        })
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, QuizError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| QuizError::config(key, e))
}

fn optional<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, QuizError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => parse(key, &raw).map(Some),
        _ => Ok(None),
    }
}
