use std::str::FromStr;

use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use temp_dir::TempDir;

async fn connect(dir: &TempDir) -> anyhow::Result<SqlitePool> {
    let path = dir.child("db.sqlite3");
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true);

    Ok(SqlitePool::connect_with(opts).await?)
}

#[tokio::test]
async fn test_migrations_create_contact_table() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = connect(&dir).await?;
    let mut conn = pool.acquire().await?;
    folio_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    let columns: Vec<(String,)> =
        sqlx::query_as("SELECT name FROM pragma_table_info('contact_submission')")
            .fetch_all(&mut *conn)
            .await?;
    let columns = columns.into_iter().map(|(c,)| c).collect::<Vec<_>>();

    for expected in [
        "id",
        "ip_address",
        "user_agent",
        "email_sent_at",
        "auto_reply_sent_at",
        "created_at",
        "updated_at",
    ] {
        assert!(columns.iter().any(|c| c == expected), "missing {expected}");
    }

    let indexes: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'contact_submission'",
    )
    .fetch_all(&mut *conn)
    .await?;

    assert!(
        indexes
            .iter()
            .any(|(n,)| n == "idx_contact_submission_status_created_at")
    );

    Ok(())
}

#[tokio::test]
async fn test_migrations_are_reentrant() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = connect(&dir).await?;
    let mut conn = pool.acquire().await?;

    folio_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;
    folio_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contact_submission")
        .fetch_one(&mut *conn)
        .await?;
    assert_eq!(count, 0);

    Ok(())
}
