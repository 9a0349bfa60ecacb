use async_trait::async_trait;
use fiftyfifty_core::repository::{ReadRepository, Repository, Result};
use fiftyfifty_core::{SetId, SetSnapshot, StorageError, VideoId, VideoRef, VideoSet};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::debug;

/// Table name used when none is configured.
pub const DEFAULT_TABLE: &str = "video_sets";

const SCHEMA: &str = include_str!("../ddl/mysql/video_sets.sql");

/// MySQL implementation of the repository contract.
///
/// The primary key on `video_set_id` is the conditional insert: a second
/// insert for the same id fails with a unique violation, which surfaces as
/// [`StorageError::Conflict`] and leaves the first row untouched.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
    table: String,
    get_sql: String,
    insert_sql: String,
}

impl MySqlRepository {
    /// Creates a repository over [`DEFAULT_TABLE`] from an existing pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self::build(pool, DEFAULT_TABLE.to_string())
    }

    /// Creates a repository over a custom table, e.g. a per-environment one.
    ///
    /// The table name must be a plain identifier (`[A-Za-z0-9_]+`).
    pub fn with_table(pool: MySqlPool, table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        validate_table_name(&table)?;
        Ok(Self::build(pool, table))
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str, table: impl Into<String>) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Self::with_table(pool, table)
    }

    fn build(pool: MySqlPool, table: String) -> Self {
        let get_sql = format!(
            "SELECT title, vid_a, time_a, vid_b, time_b FROM {table} WHERE video_set_id = ? LIMIT 1"
        );
        let insert_sql = format!(
            "INSERT INTO {table} \
             (video_set_id, title, vid_a, time_a, vid_b, time_b, ip_address, date_added) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        );
        Self {
            pool,
            table,
            get_sql,
            insert_sql,
        }
    }

    /// Creates the table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        let ddl = SCHEMA.replacen(DEFAULT_TABLE, &self.table, 1);
        sqlx::query(&ddl)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

fn validate_table_name(table: &str) -> Result<()> {
    let valid = !table.is_empty()
        && table.len() <= 64
        && table.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::Query(format!("invalid table name '{table}'")))
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

fn video_ref(row: &MySqlRow, video_column: &str, time_column: &str) -> Result<VideoRef> {
    let raw_id: String = row.try_get(video_column).map_err(map_sqlx_error)?;
    let video_id = VideoId::parse(&raw_id).map_err(|e| {
        StorageError::InvalidData(format!("invalid {video_column} '{raw_id}': {e}"))
    })?;
    let start_time: Option<u32> = row.try_get(time_column).map_err(map_sqlx_error)?;
    Ok(VideoRef::new(video_id, start_time))
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn get(&self, id: &SetId) -> Result<Option<SetSnapshot>> {
        let row = sqlx::query(&self.get_sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let title: String = row.try_get("title").map_err(map_sqlx_error)?;
        let a = video_ref(&row, "vid_a", "time_a")?;
        let b = video_ref(&row, "vid_b", "time_b")?;

        Ok(Some(SetSnapshot { title, a, b }))
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert(&self, set: &VideoSet) -> Result<()> {
        let result = sqlx::query(&self.insert_sql)
            .bind(set.id.as_str())
            .bind(&set.title)
            .bind(set.a.video_id.as_str())
            .bind(set.a.start_time)
            .bind(set.b.video_id.as_str())
            .bind(set.b.start_time)
            .bind(&set.creator_address)
            .bind(set.created_at.as_millisecond())
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                debug!(set_id = %set.id, table = %self.table, "stored video set in mysql");
                Ok(())
            }
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(set.id.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
