#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
};
use folio::AppState;
use folio_contact::{
    ClientInfo, ContactService, ContactSubmission, DeliveryError, DeliveryOptions, Error,
    ListQuery, Notifier, Page, SqliteStore, Stats, Store, SubmissionInput,
};
use folio_site::SiteCatalog;
use http_body_util::BodyExt;
use serde_json::Value;
use temp_dir::TempDir;
use tower::ServiceExt;

/// Notifier double: counts attempts, optionally failing every send.
#[derive(Default)]
pub struct FakeNotifier {
    pub fail: bool,
    pub sent: AtomicUsize,
}

impl FakeNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }

    fn attempt(&self) -> Result<(), DeliveryError> {
        if self.fail {
            return Err(DeliveryError::Transport("connection refused".to_owned()));
        }

        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn send_owner_notification(
        &self,
        _submission: &ContactSubmission,
    ) -> Result<(), DeliveryError> {
        self.attempt()
    }

    async fn send_auto_reply(&self, _submission: &ContactSubmission) -> Result<(), DeliveryError> {
        self.attempt()
    }

    async fn test_configuration(&self) -> bool {
        !self.fail
    }
}

/// Store double whose every operation fails with a storage error.
pub struct FailingStore;

impl FailingStore {
    fn error() -> Error {
        Error::Store(anyhow::anyhow!("disk I/O error: /var/lib/folio/db.sqlite3"))
    }
}

#[async_trait]
impl Store for FailingStore {
    async fn create(
        &self,
        _input: &SubmissionInput,
        _client: &ClientInfo,
    ) -> folio_contact::Result<ContactSubmission> {
        Err(Self::error())
    }

    async fn get(&self, _id: &str) -> folio_contact::Result<ContactSubmission> {
        Err(Self::error())
    }

    async fn list(&self, _query: &ListQuery) -> folio_contact::Result<Page<ContactSubmission>> {
        Err(Self::error())
    }

    async fn update_status(
        &self,
        _id: &str,
        _status: &str,
    ) -> folio_contact::Result<ContactSubmission> {
        Err(Self::error())
    }

    async fn mark_email_sent(&self, _id: &str) -> folio_contact::Result<()> {
        Err(Self::error())
    }

    async fn mark_auto_reply_sent(&self, _id: &str) -> folio_contact::Result<()> {
        Err(Self::error())
    }

    async fn delete(&self, _id: &str) -> folio_contact::Result<()> {
        Err(Self::error())
    }

    async fn stats(&self) -> folio_contact::Result<Stats> {
        Err(Self::error())
    }
}

pub struct TestApp {
    pub router: Router,
    pub notifier: Arc<FakeNotifier>,
    // keeps the database directory alive
    _dir: TempDir,
}

pub async fn setup_test_app(notifier: FakeNotifier) -> anyhow::Result<TestApp> {
    setup_test_app_with(notifier, |write_pool, read_pool| {
        Arc::new(SqliteStore::new(write_pool, read_pool))
    })
    .await
}

/// Same as [`setup_test_app`] but lets the caller choose the contact store.
pub async fn setup_test_app_with(
    notifier: FakeNotifier,
    store: impl FnOnce(sqlx::SqlitePool, sqlx::SqlitePool) -> Arc<dyn Store>,
) -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}", dir.child("db.sqlite3").display());

    let write_pool = folio::db::create_write_pool(&url).await?;
    folio::db::migrate(&write_pool).await?;
    let read_pool = folio::db::create_read_pool(&url, 2).await?;

    let notifier = Arc::new(notifier);
    let contact = ContactService::new(
        store(write_pool, read_pool.clone()),
        notifier.clone(),
        DeliveryOptions::default(),
    );

    let state = AppState {
        contact,
        site: Arc::new(SiteCatalog::embedded()?),
        pool: read_pool,
    };

    Ok(TestApp {
        router: folio::router(state),
        notifier,
        _dir: dir,
    })
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("user-agent", "folio-tests")
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1");

        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, value))
    }

    pub async fn get(&self, uri: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, None).await
    }

    pub async fn submit(&self, name: &str) -> anyhow::Result<String> {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/contact",
                Some(serde_json::json!({
                    "name": name,
                    "email": format!("{name}@folio.localhost"),
                    "subject": "Hello from the tests",
                    "message": "Just saying hi, nothing more.",
                })),
            )
            .await?;

        anyhow::ensure!(status == StatusCode::CREATED, "submit failed: {body}");

        body["data"]["id"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| anyhow::anyhow!("missing id in {body}"))
    }
}
