use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{ActivityCounters, GatewayError, ProfileRecord, RemoteGateway, RepoRecord};
use crate::config::GithubConfig;
use crate::popular::CategoryKey;

const USER_AGENT: &str = "github-battle";
const REPOS_PER_PAGE: &str = "100";

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: String,
    name: Option<String>,
    avatar_url: String,
    html_url: String,
    location: Option<String>,
    company: Option<String>,
    #[serde(default)]
    followers: u64,
    #[serde(default)]
    following: u64,
    #[serde(default)]
    public_repos: u64,
}

#[derive(Debug, Deserialize)]
struct GithubOwner {
    login: String,
    avatar_url: String,
}

#[derive(Debug, Deserialize)]
struct GithubRepo {
    name: String,
    owner: GithubOwner,
    html_url: String,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    #[serde(default)]
    open_issues_count: u64,
}

impl From<GithubRepo> for RepoRecord {
    fn from(repo: GithubRepo) -> Self {
        Self {
            name: repo.name,
            owner_login: repo.owner.login,
            owner_avatar_url: repo.owner.avatar_url,
            html_url: repo.html_url,
            stargazers_count: repo.stargazers_count,
            forks_count: repo.forks_count,
            open_issues_count: repo.open_issues_count,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<GithubRepo>,
}

/// Gateway backed by the GitHub REST API
pub struct GithubGateway {
    client: Client,
    config: GithubConfig,
}

impl GithubGateway {
    pub fn new(config: GithubConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("failed to build http client: {}", e)))?;

        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        subject: &str,
    ) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.config.api_url, path);
        debug!(url = %url, "Issuing GitHub request");

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .query(query);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let response = check_status(response, subject).await?;
        response
            .json()
            .await
            .map_err(|e| GatewayError::Transport(format!("failed to parse response: {}", e)))
    }
}

async fn check_status(response: Response, subject: &str) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
            Err(GatewayError::NotFound(subject.to_string()))
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, subject = %subject, "GitHub request failed");
            Err(GatewayError::Transport(format!(
                "GitHub responded with {}: {}",
                status, body
            )))
        }
    }
}

/// Search qualifier for a category; `All` drops the language filter
fn search_query(key: &CategoryKey) -> String {
    if key.is_all() {
        "stars:>1".to_string()
    } else {
        format!("stars:>1 language:{}", key.as_str())
    }
}

#[async_trait]
impl RemoteGateway for GithubGateway {
    #[instrument(skip(self))]
    async fn fetch_profile(&self, player_id: &str) -> Result<ProfileRecord, GatewayError> {
        let user_path = format!("/users/{}", player_id);
        let repos_path = format!("/users/{}/repos", player_id);

        let (user, repos) = futures::try_join!(
            self.get_json::<GithubUser>(&user_path, &[], player_id),
            self.get_json::<Vec<GithubRepo>>(
                &repos_path,
                &[("per_page", REPOS_PER_PAGE)],
                player_id
            ),
        )?;

        let stargazers = repos
            .iter()
            .fold(0u64, |total, repo| total.saturating_add(repo.stargazers_count));

        debug!(
            login = %user.login,
            followers = user.followers,
            stargazers,
            "Fetched GitHub profile"
        );

        Ok(ProfileRecord {
            login: user.login,
            name: user.name,
            avatar_url: user.avatar_url,
            html_url: user.html_url,
            location: user.location,
            company: user.company,
            counters: ActivityCounters {
                followers: user.followers,
                following: user.following,
                public_repos: user.public_repos,
                stargazers,
            },
        })
    }

    #[instrument(skip(self, key), fields(category = %key))]
    async fn fetch_category_items(
        &self,
        key: &CategoryKey,
    ) -> Result<Vec<RepoRecord>, GatewayError> {
        let query = search_query(key);
        let response: SearchResponse = self
            .get_json(
                "/search/repositories",
                &[
                    ("q", query.as_str()),
                    ("sort", "stars"),
                    ("order", "desc"),
                    ("type", "Repositories"),
                ],
                key.as_str(),
            )
            .await?;

        debug!(item_count = response.items.len(), "Fetched popular repositories");
        Ok(response.items.into_iter().map(RepoRecord::from).collect())
    }
}
