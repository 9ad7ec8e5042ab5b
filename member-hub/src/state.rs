//! Application state for member-hub

use sqlx::PgPool;

use crate::config::Config;
use crate::db::directory::PgMemberDirectory;
use crate::db::member::PgImportStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// JWT secret for application bearer tokens
    pub jwt_secret: String,
    /// Upper bound on data rows per import request
    pub import_max_rows: usize,
}

impl AppState {
    /// Connect to PostgreSQL and apply pending migrations
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;
        tracing::info!("Connected to PostgreSQL");
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            import_max_rows: config.import_max_rows,
        })
    }

    /// Import store backed by the connection pool
    pub fn import_store(&self) -> PgImportStore {
        PgImportStore::new(self.pool.clone())
    }

    pub fn member_directory(&self) -> PgMemberDirectory {
        PgMemberDirectory::new(self.pool.clone())
    }
}
