use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::ContactSubmission;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(ContactSubmission::Table)
        .col(
            ColumnDef::new(ContactSubmission::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(ContactSubmission::Name)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(ContactSubmission::Email)
                .string()
                .not_null()
                .string_len(320),
        )
        .col(
            ColumnDef::new(ContactSubmission::Subject)
                .string()
                .not_null()
                .string_len(200),
        )
        .col(
            ColumnDef::new(ContactSubmission::Message)
                .string()
                .not_null()
                .string_len(2000),
        )
        .col(ColumnDef::new(ContactSubmission::Phone).string().string_len(20))
        .col(
            ColumnDef::new(ContactSubmission::Company)
                .string()
                .string_len(100),
        )
        .col(
            ColumnDef::new(ContactSubmission::IpAddress)
                .string()
                .not_null(),
        )
        .col(
            ColumnDef::new(ContactSubmission::UserAgent)
                .string()
                .not_null(),
        )
        .col(
            ColumnDef::new(ContactSubmission::Status)
                .string()
                .not_null()
                .string_len(10)
                .default("pending"),
        )
        .col(
            ColumnDef::new(ContactSubmission::Priority)
                .string()
                .not_null()
                .string_len(10)
                .default("medium"),
        )
        .col(
            ColumnDef::new(ContactSubmission::Tags)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(
            ColumnDef::new(ContactSubmission::EmailSent)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(ContactSubmission::EmailSentAt).big_integer())
        .col(
            ColumnDef::new(ContactSubmission::AutoReplySent)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(ContactSubmission::AutoReplySentAt).big_integer())
        .col(
            ColumnDef::new(ContactSubmission::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(ContactSubmission::UpdatedAt)
                .big_integer()
                .not_null(),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(ContactSubmission::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

pub struct CreateIdx1;

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_contact_submission_email_created_at")
        .table(ContactSubmission::Table)
        .col(ContactSubmission::Email)
        .col(ContactSubmission::CreatedAt)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_contact_submission_email_created_at")
        .table(ContactSubmission::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateIdx1 {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_idx_1().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_idx_1().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

pub struct CreateIdx2;

fn create_idx_2() -> IndexCreateStatement {
    Index::create()
        .name("idx_contact_submission_status_created_at")
        .table(ContactSubmission::Table)
        .col(ContactSubmission::Status)
        .col(ContactSubmission::CreatedAt)
        .to_owned()
}

fn drop_idx_2() -> IndexDropStatement {
    Index::drop()
        .name("idx_contact_submission_status_created_at")
        .table(ContactSubmission::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateIdx2 {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_idx_2().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_idx_2().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

pub struct CreateIdx3;

fn create_idx_3() -> IndexCreateStatement {
    Index::create()
        .name("idx_contact_submission_priority")
        .table(ContactSubmission::Table)
        .col(ContactSubmission::Priority)
        .to_owned()
}

fn drop_idx_3() -> IndexDropStatement {
    Index::drop()
        .name("idx_contact_submission_priority")
        .table(ContactSubmission::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateIdx3 {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_idx_3().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_idx_3().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
