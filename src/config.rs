use std::net::SocketAddr;
use std::time::Duration;

use tracing::warn;

use crate::battle::ScoreWeights;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_GITHUB_TIMEOUT_SECS: u64 = 10;

/// Configuration for talking to the GitHub REST API
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_GITHUB_TIMEOUT_SECS),
        }
    }
}

impl GithubConfig {
    pub fn from_env() -> Self {
        let api_url = std::env::var("GITHUB_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string());

        let token = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let timeout_secs = env_or("GITHUB_TIMEOUT_SECS", DEFAULT_GITHUB_TIMEOUT_SECS);

        Self {
            api_url,
            token,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub github: GithubConfig,
    pub score_weights: ScoreWeights,
}

impl AppConfig {
    /// Reads configuration from the environment, falling back to defaults
    /// for anything missing or unparsable.
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR")
            .ok()
            .and_then(|addr| match addr.parse() {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    warn!(bind_addr = %addr, "Ignoring unparsable BIND_ADDR");
                    None
                }
            })
            .unwrap_or_else(default_bind_addr);

        let defaults = ScoreWeights::default();
        let score_weights = ScoreWeights {
            followers: env_or("SCORE_WEIGHT_FOLLOWERS", defaults.followers),
            following: env_or("SCORE_WEIGHT_FOLLOWING", defaults.following),
            public_repos: env_or("SCORE_WEIGHT_PUBLIC_REPOS", defaults.public_repos),
            stargazers: env_or("SCORE_WEIGHT_STARGAZERS", defaults.stargazers),
        };

        Self {
            bind_addr,
            github: GithubConfig::from_env(),
            score_weights,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
}

fn env_or(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "Ignoring unparsable numeric setting");
            default
        }),
        Err(_) => default,
    }
}
