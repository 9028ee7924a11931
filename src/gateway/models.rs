use serde::{Deserialize, Serialize};

/// Activity counters used for scoring. Anything GitHub leaves out counts as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCounters {
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
    /// Total stars across the player's public repositories
    #[serde(default)]
    pub stargazers: u64,
}

/// Public profile of a player, immutable once fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub location: Option<String>,
    pub company: Option<String>,
    pub counters: ActivityCounters,
}

impl ProfileRecord {
    /// Bare profile with no display details and zeroed counters
    pub fn new(login: impl Into<String>) -> Self {
        let login = login.into();
        Self {
            avatar_url: format!("https://github.com/{}.png", login),
            html_url: format!("https://github.com/{}", login),
            login,
            name: None,
            location: None,
            company: None,
            counters: ActivityCounters::default(),
        }
    }

    pub fn with_counters(mut self, counters: ActivityCounters) -> Self {
        self.counters = counters;
        self
    }

    pub fn with_followers(mut self, followers: u64) -> Self {
        self.counters.followers = followers;
        self
    }
}

/// One repository as returned by the popular-repositories search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRecord {
    pub name: String,
    pub owner_login: String,
    pub owner_avatar_url: String,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
}

impl RepoRecord {
    pub fn new(owner: &str, name: &str, stargazers_count: u64) -> Self {
        Self {
            name: name.to_string(),
            owner_login: owner.to_string(),
            owner_avatar_url: format!("https://github.com/{}.png", owner),
            html_url: format!("https://github.com/{}/{}", owner, name),
            stargazers_count,
            forks_count: 0,
            open_issues_count: 0,
        }
    }
}
