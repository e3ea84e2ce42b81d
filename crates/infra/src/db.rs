//! Store handle and schema initialization.
//!
//! `Database` owns the SQLite connection pool together with a single-threaded
//! tokio runtime that drives `sqlx` futures to completion. Callers get a plain
//! blocking API; every operation borrows a pooled connection for one statement
//! and hands it back.
//!
//! The handle must not be used from inside another async runtime: its
//! blocking calls would nest runtimes and panic.

use std::future::Future;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::runtime::Runtime;
use tracing::{info, instrument};

use crate::config::StoreConfig;
use crate::error::RecordResult;

const CREATE_PRODUCTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT    NOT NULL,
        description TEXT    NOT NULL,
        price       TEXT    NOT NULL,
        available   BOOLEAN NOT NULL DEFAULT 1,
        category    TEXT    NOT NULL DEFAULT 'UNKNOWN'
                    CHECK (category IN ('UNKNOWN', 'CLOTHS', 'FOOD', 'HOUSEWARES', 'AUTOMOTIVE', 'TOOLS'))
    )
"#;

/// Connect to the store described by `config` and make sure the `products`
/// table exists.
///
/// Safe to run against a database that already holds the table: existing rows
/// are left alone.
pub fn init_db(config: &StoreConfig) -> RecordResult<Database> {
    let db = Database::connect(config)?;
    db.ensure_schema()?;
    Ok(db)
}

/// Owned handle to the product store.
///
/// Create one at startup, pass it by reference to every record operation, and
/// close it (or drop it) at shutdown.
#[derive(Debug)]
pub struct Database {
    pool: SqlitePool,
    runtime: Runtime,
}

impl Database {
    /// Open the connection pool without touching the schema.
    #[instrument(skip(config), fields(database_url = %config.database_url), err)]
    pub fn connect(config: &StoreConfig) -> RecordResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(sqlx::Error::Io)?;

        let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

        let pool_options = if config.is_in_memory() {
            // One connection that never expires, or the data goes with it.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = runtime.block_on(
            pool_options
                .acquire_timeout(config.acquire_timeout)
                .connect_with(options),
        )?;

        info!(
            in_memory = config.is_in_memory(),
            max_connections = pool.options().get_max_connections(),
            "connected to product store"
        );

        Ok(Self { pool, runtime })
    }

    /// Create the `products` table if it is absent. Idempotent.
    #[instrument(skip(self), err)]
    pub fn ensure_schema(&self) -> RecordResult<()> {
        self.block_on(sqlx::query(CREATE_PRODUCTS_TABLE).execute(&self.pool))?;
        Ok(())
    }

    /// Round-trip a trivial statement to check connectivity.
    pub fn ping(&self) -> RecordResult<()> {
        self.block_on(sqlx::query("SELECT 1").execute(&self.pool))?;
        Ok(())
    }

    /// Delete every product row. Returns the number of rows removed.
    #[instrument(skip(self), err)]
    pub fn truncate(&self) -> RecordResult<u64> {
        let result = self.block_on(sqlx::query("DELETE FROM products").execute(&self.pool))?;
        info!(rows = result.rows_affected(), "cleared products table");
        Ok(result.rows_affected())
    }

    /// Close every pooled connection and release the runtime.
    pub fn close(self) {
        self.runtime.block_on(self.pool.close());
        info!("product store closed");
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
