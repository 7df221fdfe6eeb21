#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use matrimony_api::config::AppConfig;
use matrimony_api::database::models::{NewUser, Role, User};
use matrimony_api::database::{MemoryStore, UserStore};
use matrimony_api::services::OfflineProcessor;
use matrimony_api::{app, AppState};

/// One server per test, each with its own empty store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

impl TestServer {
    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register a member and return a session token for them
    pub async fn member(&self, email: &str) -> Result<String> {
        let user = User::from(NewUser { email: email.to_string(), name: email.to_string(), photo_url: None });
        self.store.insert_user_if_absent(user).await?;
        Ok(self.state.keys.issue(email)?)
    }

    pub async fn admin(&self, email: &str) -> Result<String> {
        let token = self.member(email).await?;
        self.store.set_role(email, Role::Admin).await?;
        Ok(token)
    }

    /// POST a biodata as the token holder and return its id
    pub async fn create_biodata(&self, token: &str, biodata_type: &str, age: i64) -> Result<i64> {
        let body: Value = self
            .client
            .post(self.url("/biodatas"))
            .bearer_auth(token)
            .json(&biodata_body(biodata_type, age))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        body["data"]["biodata_id"].as_i64().context("biodata_id missing from response")
    }
}

pub fn biodata_body(biodata_type: &str, age: i64) -> Value {
    json!({
        "biodata_type": biodata_type,
        "name": "Member",
        "profile_image": "https://img.example.com/p.png",
        "date_of_birth": "1995-01-01",
        "height": "5'7\"",
        "weight": "65kg",
        "age": age,
        "occupation": "Teacher",
        "race": "Asian",
        "fathers_name": "Father",
        "mothers_name": "Mother",
        "permanent_division": "Dhaka",
        "present_division": "Chattogram",
        "expected_partner_age": age - 1,
        "expected_partner_height": "5'4\"",
        "expected_partner_weight": "55kg",
        "mobile_number": "+8801700000001"
    })
}

pub async fn spawn_server() -> Result<TestServer> {
    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(&AppConfig::for_tests(), store.clone(), Arc::new(OfflineProcessor));

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    let router = app(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let server = TestServer { port, base_url, client: reqwest::Client::new(), store, state };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}
