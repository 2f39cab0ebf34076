use crate::aggregate::DEFAULT_BATCH_CONCURRENCY;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Settings read from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub movie_api_url: String,
    pub movie_api_host: String,
    pub streaming_api_url: String,
    pub streaming_api_host: String,
    pub rapid_api_key: String,
    /// Upper bound on movies assembled at once for a batch request.
    pub batch_concurrency: usize,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = optional(
            &lookup,
            "UPSTREAM_TIMEOUT_SECS",
            DEFAULT_UPSTREAM_TIMEOUT_SECS,
        )?;
        Ok(Self {
            port: optional(&lookup, "PORT", DEFAULT_PORT)?,
            movie_api_url: required(&lookup, "MOVIE_API_URL")?,
            movie_api_host: required(&lookup, "MOVIE_API_HOST")?,
            streaming_api_url: required(&lookup, "STREAMING_API_URL")?,
            streaming_api_host: required(&lookup, "STREAMING_API_HOST")?,
            rapid_api_key: required(&lookup, "RAPID_API_KEY")?,
            batch_concurrency: optional(
                &lookup,
                "BATCH_CONCURRENCY",
                DEFAULT_BATCH_CONCURRENCY,
            )?
            .max(1),
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| anyhow!("Missing required environment variable: {}", key))
}

fn optional<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| anyhow!("{}", e))
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}
