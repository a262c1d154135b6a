use std::{
    path::PathBuf,
    str::FromStr,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use folio_contact::{
    ClientInfo, ContactForm, ContactSubmission, DeliveryError, Error, ListQuery, Notifier, Page,
    SqliteStore, Stats, Store, SubmissionInput,
};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_store(path: PathBuf) -> anyhow::Result<SqliteStore> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    folio_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(SqliteStore::new(pool.clone(), pool))
}

#[allow(dead_code)]
pub fn client() -> ClientInfo {
    ClientInfo::new(Some("127.0.0.1".to_owned()), Some("folio-tests".to_owned()))
}

#[allow(dead_code)]
pub fn form(name: impl Into<String>) -> ContactForm {
    let name = name.into();

    ContactForm {
        email: format!("{name}@folio.localhost"),
        name,
        subject: "Hello from the tests".to_owned(),
        message: "Just saying hi, nothing more.".to_owned(),
        phone: None,
        company: None,
    }
}

#[allow(dead_code)]
pub async fn create_all(
    store: &impl Store,
    names: impl IntoIterator<Item = impl Into<String>>,
) -> anyhow::Result<Vec<ContactSubmission>> {
    let mut contacts = vec![];
    for name in names.into_iter() {
        let input = folio_contact::validate(form(name)).expect("valid form");
        contacts.push(store.create(&input, &client()).await?);
    }

    Ok(contacts)
}

/// Notifier double that counts attempts and fails on demand.
#[derive(Default)]
pub struct FakeNotifier {
    pub fail_owner: bool,
    pub fail_auto_reply: bool,
    pub owner_calls: AtomicUsize,
    pub auto_reply_calls: AtomicUsize,
}

#[allow(dead_code)]
impl FakeNotifier {
    pub fn failing() -> Self {
        Self {
            fail_owner: true,
            fail_auto_reply: true,
            ..Default::default()
        }
    }

    pub fn owner_calls(&self) -> usize {
        self.owner_calls.load(Ordering::SeqCst)
    }

    pub fn auto_reply_calls(&self) -> usize {
        self.auto_reply_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn send_owner_notification(
        &self,
        _submission: &ContactSubmission,
    ) -> Result<(), DeliveryError> {
        self.owner_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_owner {
            return Err(DeliveryError::Transport("connection refused".to_owned()));
        }

        Ok(())
    }

    async fn send_auto_reply(&self, _submission: &ContactSubmission) -> Result<(), DeliveryError> {
        self.auto_reply_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_auto_reply {
            return Err(DeliveryError::Transport("connection refused".to_owned()));
        }

        Ok(())
    }

    async fn test_configuration(&self) -> bool {
        !(self.fail_owner || self.fail_auto_reply)
    }
}

/// Store double whose every operation fails with a storage error.
#[allow(dead_code)]
pub struct FailingStore;

#[allow(dead_code)]
fn store_error() -> Error {
    Error::Store(anyhow::anyhow!("database is locked"))
}

#[async_trait]
impl Store for FailingStore {
    async fn create(
        &self,
        _input: &SubmissionInput,
        _client: &ClientInfo,
    ) -> folio_contact::Result<ContactSubmission> {
        Err(store_error())
    }

    async fn get(&self, _id: &str) -> folio_contact::Result<ContactSubmission> {
        Err(store_error())
    }

    async fn list(&self, _query: &ListQuery) -> folio_contact::Result<Page<ContactSubmission>> {
        Err(store_error())
    }

    async fn update_status(
        &self,
        _id: &str,
        _status: &str,
    ) -> folio_contact::Result<ContactSubmission> {
        Err(store_error())
    }

    async fn mark_email_sent(&self, _id: &str) -> folio_contact::Result<()> {
        Err(store_error())
    }

    async fn mark_auto_reply_sent(&self, _id: &str) -> folio_contact::Result<()> {
        Err(store_error())
    }

    async fn delete(&self, _id: &str) -> folio_contact::Result<()> {
        Err(store_error())
    }

    async fn stats(&self) -> folio_contact::Result<Stats> {
        Err(store_error())
    }
}
