use crate::mysql::{MySqlServer, MysqlConfig};
use crate::Result;
use fiftyfifty_storage::MySqlRepository;
use sqlx::MySqlPool;

/// A [`MySqlRepository`] over a fresh container with its table created.
pub struct VideoSetStore {
    _server: MySqlServer,
    repository: MySqlRepository,
}

impl VideoSetStore {
    pub async fn start(table: &str) -> Result<Self> {
        Self::start_with(MysqlConfig::builder().build(), table).await
    }

    pub async fn start_with(config: MysqlConfig, table: &str) -> Result<Self> {
        let server = MySqlServer::start(config).await?;
        let pool = server.connect().await?;

        let repository = MySqlRepository::with_table(pool, table)?;
        repository.ensure_schema().await?;

        Ok(Self {
            _server: server,
            repository,
        })
    }

    pub fn repository(&self) -> &MySqlRepository {
        &self.repository
    }

    /// Raw access for assertions on columns the repository never reads back.
    pub fn pool(&self) -> &MySqlPool {
        self.repository.pool()
    }
}
