use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::domain::{NewSubscriber, Subscriber, SubscriberId};
use crate::store::{PageQuery, StoreError, SubscriberStore};

/// Columns selected for every subscriber read
const SELECT_SUBSCRIBERS: &str = "SELECT id, email, source, created_at, updated_at FROM subscribers";

/// Subscriber store on top of a SQLite pool
#[derive(Clone)]
pub struct SqliteSubscriberStore {
    db_pool: SqlitePool,
}

impl SqliteSubscriberStore {
    pub const fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    /// Open a private in-memory database
    ///
    /// The pool holds a single connection that is never recycled, since every SQLite
    /// in-memory connection would otherwise see its own empty database.
    pub async fn in_memory_pool() -> sqlx::Result<SqlitePool> {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
            .await
    }
}

#[async_trait]
impl SubscriberStore for SqliteSubscriberStore {
    #[tracing::instrument(name = "Ensure subscribers schema", skip(self))]
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        // AUTOINCREMENT keeps ids of deleted subscribers from being handed out again
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS subscribers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email VARCHAR(255) NOT NULL,
                source VARCHAR(255) NOT NULL,
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
                updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            )
            ",
        )
        .execute(&self.db_pool)
        .await?;

        sqlx::query(
            r"
            CREATE TRIGGER IF NOT EXISTS subscribers_touch_updated_at
            AFTER UPDATE ON subscribers
            FOR EACH ROW
            WHEN NEW.updated_at = OLD.updated_at
            BEGIN
                UPDATE subscribers
                SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                WHERE id = NEW.id;
            END
            ",
        )
        .execute(&self.db_pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "Saving new subscriber details in the database",
        skip(self, subscriber)
    )]
    async fn insert(
        &self,
        subscriber: &NewSubscriber,
        created_at: DateTime<Utc>,
    ) -> Result<SubscriberId, StoreError> {
        let result = sqlx::query(
            r"
            INSERT INTO subscribers (email, source, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(subscriber.email.as_ref())
        .bind(subscriber.source.as_ref())
        .bind(created_at)
        .bind(created_at)
        .execute(&self.db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {e:?}");
            e
        })?;

        Ok(SubscriberId::new(result.last_insert_rowid()))
    }

    #[tracing::instrument(name = "Fetch a page of subscribers", skip(self))]
    async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Subscriber>, StoreError> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_SUBSCRIBERS);

        // Only allow-listed identifiers are pushed as SQL, everything else is bound
        if let Some(sort) = query.sort {
            builder
                .push(" ORDER BY ")
                .push(sort.column.as_sql())
                .push(" ")
                .push(sort.direction.as_sql())
                .push(", id ASC");
        }
        builder
            .push(" LIMIT ")
            .push_bind(i64::from(query.limit))
            .push(" OFFSET ")
            .push_bind(i64::try_from(query.offset).unwrap_or(i64::MAX));

        let rows = builder.build().fetch_all(&self.db_pool).await?;
        Ok(rows
            .iter()
            .map(subscriber_from_row)
            .collect::<sqlx::Result<_>>()?)
    }

    #[tracing::instrument(name = "Fetch all subscribers", skip(self))]
    async fn fetch_all(&self) -> Result<Vec<Subscriber>, StoreError> {
        let rows = sqlx::query(SELECT_SUBSCRIBERS)
            .fetch_all(&self.db_pool)
            .await?;
        Ok(rows
            .iter()
            .map(subscriber_from_row)
            .collect::<sqlx::Result<_>>()?)
    }

    #[tracing::instrument(name = "Delete a subscriber", skip(self))]
    async fn delete(&self, id: SubscriberId) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r"
            DELETE FROM subscribers
            WHERE id = ?
            ",
        )
        .bind(*id)
        .execute(&self.db_pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(name = "Count subscribers", skip(self))]
    async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscribers")
            .fetch_one(&self.db_pool)
            .await?;
        Ok(count.unsigned_abs())
    }
}

/// Map a `subscribers` row
fn subscriber_from_row(row: &SqliteRow) -> sqlx::Result<Subscriber> {
    Ok(Subscriber {
        id: SubscriberId::new(row.try_get("id")?),
        email: row.try_get("email")?,
        source: row.try_get("source")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
