//! # Database Pool
//!
//! One [`Database`] per process, shared by the HTTP handlers and the
//! quotation engine.
//!
//! ```text
//! DATABASE_PATH ──► DbConfig ──► Database::new ──► SqlitePool (WAL, FK on)
//!                                      │
//!                                      └── embedded migrations
//!
//! Database ─┬─ clients()     ClientRepository
//!           ├─ services()    ServiceRepository
//!           └─ quotations()  QuotationRepository
//! ```
//!
//! An in-memory database lives inside a single connection, so
//! [`DbConfig::in_memory`] pins the pool to one connection.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::client::ClientRepository;
use crate::repository::quotation::QuotationRepository;
use crate::repository::service::ServiceRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ```rust
/// use cotiza_db::DbConfig;
///
/// let config = DbConfig::new("./data/cotiza.db").max_connections(8);
/// assert_eq!(config.max_connections, 8);
/// assert!(config.run_migrations);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_path: PathBuf,

    /// Pool size (`DB_MAX_CONNECTIONS`, default 5).
    pub max_connections: u32,

    pub min_connections: u32,

    /// How long a request waits for a free connection.
    pub acquire_timeout: Duration,

    pub idle_timeout: Duration,

    /// Apply pending migrations while connecting.
    pub run_migrations: bool,
}

impl DbConfig {
    /// File-backed database at `path`, created on first connect.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// A fresh, isolated database for tests. Every call is a new one.
    pub fn in_memory() -> Self {
        DbConfig {
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            ..DbConfig::new(":memory:")
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cheap to clone (the pool is reference counted). The API keeps one in its
/// state and hands out repositories per request:
///
/// ```rust,ignore
/// let clients = state.db.clients().list().await?;
/// let quotation = state.db.quotations().get_by_id(&id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and, unless disabled, brings the schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            max_connections = config.max_connections,
            "Opening database"
        );

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options(&config)?)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies all pending migrations. Safe to run multiple times.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the client repository.
    pub fn clients(&self) -> ClientRepository {
        ClientRepository::new(self.pool.clone())
    }

    /// Returns the service catalog repository.
    pub fn services(&self) -> ServiceRepository {
        ServiceRepository::new(self.pool.clone())
    }

    /// Returns the quotation repository.
    pub fn quotations(&self) -> QuotationRepository {
        QuotationRepository::new(self.pool.clone())
    }

    /// Closes the database connection pool.
    ///
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

/// WAL journal, NORMAL sync, foreign keys on (quotation items cascade).
fn connect_options(config: &DbConfig) -> DbResult<SqliteConnectOptions> {
    let url = format!("sqlite://{}?mode=rwc", config.database_path.display());

    let options = SqliteConnectOptions::from_str(&url)
        .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .create_if_missing(true);

    debug!(url = %url, "Connection options configured");
    Ok(options)
}

// =============================================================================
// Unit Tests
// =============================================================================
