use async_trait::async_trait;
use folio_db::table::ContactSubmission as Table;
use sea_query::{Expr, ExprTrait, Func, Order, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow, types::Text};
use time::OffsetDateTime;

use crate::{
    ClientInfo, ContactSubmission, Error, ListQuery, Page, Pagination, Priority, Result, SortBy,
    SortOrder, Stats, Status, SubmissionInput, Tag,
};

/// Durable storage of contact submissions.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create(
        &self,
        input: &SubmissionInput,
        client: &ClientInfo,
    ) -> Result<ContactSubmission>;

    async fn get(&self, id: &str) -> Result<ContactSubmission>;

    async fn list(&self, query: &ListQuery) -> Result<Page<ContactSubmission>>;

    async fn update_status(&self, id: &str, status: &str) -> Result<ContactSubmission>;

    async fn mark_email_sent(&self, id: &str) -> Result<()>;

    async fn mark_auto_reply_sent(&self, id: &str) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;

    async fn stats(&self) -> Result<Stats>;
}

const COLUMNS: [Table; 18] = [
    Table::Id,
    Table::Name,
    Table::Email,
    Table::Subject,
    Table::Message,
    Table::Phone,
    Table::Company,
    Table::IpAddress,
    Table::UserAgent,
    Table::Status,
    Table::Priority,
    Table::Tags,
    Table::EmailSent,
    Table::EmailSentAt,
    Table::AutoReplySent,
    Table::AutoReplySentAt,
    Table::CreatedAt,
    Table::UpdatedAt,
];

#[derive(Debug, FromRow)]
struct ContactRow {
    id: String,
    name: String,
    email: String,
    subject: String,
    message: String,
    phone: Option<String>,
    company: Option<String>,
    ip_address: String,
    user_agent: String,
    status: Text<Status>,
    priority: Text<Priority>,
    tags: sqlx::types::Json<Vec<Tag>>,
    email_sent: bool,
    email_sent_at: Option<i64>,
    auto_reply_sent: bool,
    auto_reply_sent_at: Option<i64>,
    created_at: i64,
    updated_at: i64,
}

fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

fn from_millis(value: i64) -> Result<OffsetDateTime> {
    Ok(OffsetDateTime::from_unix_timestamp_nanos(
        i128::from(value) * 1_000_000,
    )?)
}

impl TryFrom<ContactRow> for ContactSubmission {
    type Error = Error;

    fn try_from(row: ContactRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            name: row.name,
            email: row.email,
            subject: row.subject,
            message: row.message,
            phone: row.phone,
            company: row.company,
            ip_address: row.ip_address,
            user_agent: row.user_agent,
            status: row.status.0,
            priority: row.priority.0,
            tags: row.tags.0,
            email_sent: row.email_sent,
            email_sent_at: row.email_sent_at.map(from_millis).transpose()?,
            auto_reply_sent: row.auto_reply_sent,
            auto_reply_sent_at: row.auto_reply_sent_at.map(from_millis).transpose()?,
            created_at: from_millis(row.created_at)?,
            updated_at: from_millis(row.updated_at)?,
        })
    }
}

/// SQLite-backed [`Store`]; writes go through the single-connection write
/// pool, reads through the read pool.
#[derive(Clone)]
pub struct SqliteStore {
    write_db: SqlitePool,
    read_db: SqlitePool,
}

impl SqliteStore {
    pub fn new(write_db: SqlitePool, read_db: SqlitePool) -> Self {
        Self { write_db, read_db }
    }

    async fn find(&self, pool: &SqlitePool, id: &str) -> Result<Option<ContactSubmission>> {
        let statement = Query::select()
            .columns(COLUMNS)
            .from(Table::Table)
            .and_where(Expr::col(Table::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, ContactRow, _>(&sql, values)
            .fetch_optional(pool)
            .await?;

        row.map(ContactSubmission::try_from).transpose()
    }

    /// Sets a delivery flag and its timestamp. Setting it again only
    /// refreshes the timestamp.
    async fn mark_sent(&self, id: &str, flag: Table, at: Table) -> Result<()> {
        let now = now_millis();
        let statement = Query::update()
            .table(Table::Table)
            .values([
                (flag, true.into()),
                (at, now.into()),
                (Table::UpdatedAt, now.into()),
            ])
            .and_where(Expr::col(Table::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

fn apply_filter(statement: &mut SelectStatement, query: &ListQuery) {
    if let Some(status) = query.status {
        statement.and_where(Expr::col(Table::Status).eq(status.to_string()));
    }

    if let Some(priority) = query.priority {
        statement.and_where(Expr::col(Table::Priority).eq(priority.to_string()));
    }
}

fn sort_column(sort_by: SortBy) -> Table {
    match sort_by {
        SortBy::CreatedAt => Table::CreatedAt,
        SortBy::UpdatedAt => Table::UpdatedAt,
        SortBy::Name => Table::Name,
        SortBy::Email => Table::Email,
        SortBy::Subject => Table::Subject,
        SortBy::Status => Table::Status,
        SortBy::Priority => Table::Priority,
    }
}

#[async_trait]
impl Store for SqliteStore {
    #[tracing::instrument(skip_all, fields(email = %input.email))]
    async fn create(
        &self,
        input: &SubmissionInput,
        client: &ClientInfo,
    ) -> Result<ContactSubmission> {
        let id = ulid::Ulid::new().to_string();
        let now = now_millis();
        let priority = crate::priority::classify(&input.subject, &input.message);
        let status = Status::Pending;
        let tags: Vec<Tag> = vec![];

        let statement = Query::insert()
            .into_table(Table::Table)
            .columns(COLUMNS)
            .values_panic([
                id.to_owned().into(),
                input.name.to_owned().into(),
                input.email.to_owned().into(),
                input.subject.to_owned().into(),
                input.message.to_owned().into(),
                input.phone.to_owned().into(),
                input.company.to_owned().into(),
                client.ip_address.to_owned().into(),
                client.user_agent.to_owned().into(),
                status.to_string().into(),
                priority.to_string().into(),
                serde_json::to_string(&tags)?.into(),
                false.into(),
                Option::<i64>::None.into(),
                false.into(),
                Option::<i64>::None.into(),
                now.into(),
                now.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        tracing::info!(%id, %priority, "Contact submission stored");

        Ok(ContactSubmission {
            id,
            name: input.name.to_owned(),
            email: input.email.to_owned(),
            subject: input.subject.to_owned(),
            message: input.message.to_owned(),
            phone: input.phone.to_owned(),
            company: input.company.to_owned(),
            ip_address: client.ip_address.to_owned(),
            user_agent: client.user_agent.to_owned(),
            status,
            priority,
            tags,
            email_sent: false,
            email_sent_at: None,
            auto_reply_sent: false,
            auto_reply_sent_at: None,
            created_at: from_millis(now)?,
            updated_at: from_millis(now)?,
        })
    }

    async fn get(&self, id: &str) -> Result<ContactSubmission> {
        self.find(&self.read_db, id).await?.ok_or(Error::NotFound)
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<ContactSubmission>> {
        let order = match query.sort_order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let mut statement = Query::select()
            .columns(COLUMNS)
            .from(Table::Table)
            .to_owned();
        apply_filter(&mut statement, query);
        statement
            .order_by(sort_column(query.sort_by), order.clone())
            .order_by(Table::Id, order)
            .limit(u64::from(query.limit))
            .offset(query.offset());

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, ContactRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let mut count = Query::select()
            .expr(Func::count(Expr::col(Table::Id)))
            .from(Table::Table)
            .to_owned();
        apply_filter(&mut count, query);

        let (sql, values) = count.build_sqlx(SqliteQueryBuilder);
        let (total,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        let contacts = rows
            .into_iter()
            .map(ContactSubmission::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Page {
            contacts,
            pagination: Pagination::new(
                query.page,
                query.limit,
                u64::try_from(total).unwrap_or_default(),
            ),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn update_status(&self, id: &str, status: &str) -> Result<ContactSubmission> {
        let Ok(status) = status.parse::<Status>() else {
            crate::invalid!("Invalid status value");
        };

        let statement = Query::update()
            .table(Table::Table)
            .values([
                (Table::Status, status.to_string().into()),
                (Table::UpdatedAt, now_millis().into()),
            ])
            .and_where(Expr::col(Table::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }

        tracing::info!(%id, %status, "Contact status updated");

        self.find(&self.write_db, id).await?.ok_or(Error::NotFound)
    }

    async fn mark_email_sent(&self, id: &str) -> Result<()> {
        self.mark_sent(id, Table::EmailSent, Table::EmailSentAt)
            .await
    }

    async fn mark_auto_reply_sent(&self, id: &str) -> Result<()> {
        self.mark_sent(id, Table::AutoReplySent, Table::AutoReplySentAt)
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        let statement = Query::delete()
            .from_table(Table::Table)
            .and_where(Expr::col(Table::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }

        tracing::info!(%id, "Contact deleted");

        Ok(())
    }

    async fn stats(&self) -> Result<Stats> {
        Ok(sqlx::query_as::<_, Stats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COALESCE(SUM(CASE WHEN status = 'pending' THEN 1 ELSE 0 END), 0) AS pending,
                COALESCE(SUM(CASE WHEN status = 'read' THEN 1 ELSE 0 END), 0) AS read,
                COALESCE(SUM(CASE WHEN status = 'replied' THEN 1 ELSE 0 END), 0) AS replied,
                COALESCE(SUM(CASE WHEN priority = 'urgent' THEN 1 ELSE 0 END), 0) AS urgent
            FROM contact_submission
            "#,
        )
        .fetch_one(&self.read_db)
        .await?)
    }
}
