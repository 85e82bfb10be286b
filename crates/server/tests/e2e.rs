use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use service::errors::ServiceError;
use service::review::{InMemoryReviewRepository, Review, ReviewInput, ReviewRepository, ReviewService};
use uuid::Uuid;
use tokio::net::TcpListener;

use server::startup::build_app;
use server::state::AppState;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    start_server_with(Arc::new(InMemoryReviewRepository::seeded())).await
}

async fn start_server_with(repo: Arc<dyn ReviewRepository>) -> anyhow::Result<TestApp> {
    let state = AppState::new(ReviewService::new(repo));
    let app = build_app(state, &AppConfig::default())?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

/// In-memory store that takes a while to accept each write.
struct SlowStore {
    inner: Arc<InMemoryReviewRepository>,
    delay: Duration,
}

#[async_trait]
impl ReviewRepository for SlowStore {
    async fn list(&self) -> Result<Vec<Review>, ServiceError> {
        self.inner.list().await
    }
    async fn insert(&self, input: ReviewInput) -> Result<Review, ServiceError> {
        tokio::time::sleep(self.delay).await;
        self.inner.insert(input).await
    }
    async fn replace(&self, id: Uuid, input: ReviewInput) -> Result<Option<Review>, ServiceError> {
        tokio::time::sleep(self.delay).await;
        self.inner.replace(id, input).await
    }
    async fn remove(&self, id: Uuid) -> Result<Option<Review>, ServiceError> {
        tokio::time::sleep(self.delay).await;
        self.inner.remove(id).await
    }
}

#[tokio::test]
async fn e2e_seeded_catalogue_is_listed() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/reviews", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Vec<serde_json::Value>>().await?;
    assert_eq!(body.len(), 10);
    assert_eq!(body[0]["title"], "Dreams");
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_creates_get_distinct_ids() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let mut handles = Vec::new();
    for i in 0..16 {
        let c = c.clone();
        let url = format!("{}/reviews", app.base_url);
        handles.push(tokio::spawn(async move {
            c.post(url)
                .json(&json!({"title": format!("t{i}"), "artist": "B", "reviewer": "C", "rating": 4, "review": "r"}))
                .send()
                .await
        }));
    }
    let mut ids = Vec::new();
    for h in handles {
        let res = h.await??;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
        let body = res.json::<serde_json::Value>().await?;
        ids.push(body["id"].as_str().unwrap_or_default().to_string());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 16);

    let all = c.get(format!("{}/reviews", app.base_url)).send().await?.json::<Vec<serde_json::Value>>().await?;
    assert_eq!(all.len(), 26);
    Ok(())
}

#[tokio::test]
async fn e2e_client_disconnect_does_not_abort_create() -> anyhow::Result<()> {
    let store = Arc::new(InMemoryReviewRepository::new());
    let repo: Arc<dyn ReviewRepository> =
        Arc::new(SlowStore { inner: Arc::clone(&store), delay: Duration::from_millis(300) });
    let app = start_server_with(repo).await?;

    let impatient = reqwest::Client::builder().timeout(Duration::from_millis(50)).build()?;
    let res = impatient
        .post(format!("{}/reviews", app.base_url))
        .json(&json!({"title": "Hope", "artist": "B", "reviewer": "C", "rating": 4, "review": "r"}))
        .send()
        .await;
    assert!(res.is_err(), "client should give up before the store answers");

    tokio::time::sleep(Duration::from_millis(800)).await;
    let stored = store.list().await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Hope");
    Ok(())
}
