use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use github_battle::{routes, AppState, InMemoryGateway, ProfileRecord, RepoRecord, Scorer};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub gateway: Arc<InMemoryGateway>,
    pub app_state: AppState,
}

#[allow(dead_code)]
impl TestSetup {
    /// Fresh router over the shared state, so repeated requests hit one cache
    pub fn router(&self) -> Router {
        routes::app(self.app_state.clone())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }
}

pub struct TestSetupBuilder {
    gateway: InMemoryGateway,
}

#[allow(dead_code)]
impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            gateway: InMemoryGateway::new(),
        }
    }

    pub fn with_player(mut self, login: &str, followers: u64) -> Self {
        self.gateway = self
            .gateway
            .with_profile(ProfileRecord::new(login).with_followers(followers));
        self
    }

    pub fn with_alice_and_bob(self) -> Self {
        self.with_player("alice", 100).with_player("bob", 50)
    }

    pub fn with_category(mut self, key: &str, stars: &[u64]) -> Self {
        let items = stars
            .iter()
            .enumerate()
            .map(|(i, s)| RepoRecord::new("owner", &format!("{}-{}", key.to_lowercase(), i), *s))
            .collect();
        self.gateway = self.gateway.with_category(key, items);
        self
    }

    pub fn build(self) -> TestSetup {
        let gateway = Arc::new(self.gateway);
        let app_state = AppState::from_gateway(gateway.clone(), Scorer::default());
        TestSetup { gateway, app_state }
    }
}
