use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;

/// DbConnection owns the SQLite pool holding the expense records
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Connect to `url`, creating the database file and schema if missing
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid database url `{}`", url))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open database `{}`", url))?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Private in-memory database; one pinned connection keeps it alive
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the record tables.
    ///
    /// Dates are stored as `YYYY-MM-DDTHH:MM:SS.SSS` text so that string
    /// comparison is chronological and `strftime` can read them.
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS daily_expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                date TEXT NOT NULL,
                food REAL NOT NULL DEFAULT 0,
                travel REAL NOT NULL DEFAULT 0,
                entertainment REAL NOT NULL DEFAULT 0,
                shopping REAL NOT NULL DEFAULT 0,
                others REAL NOT NULL DEFAULT 0,
                total REAL NOT NULL DEFAULT 0
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_daily_expenses_user_date
            ON daily_expenses(user_id, date);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS monthly_bills (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                month TEXT NOT NULL,
                year INTEGER NOT NULL,
                electricity REAL NOT NULL DEFAULT 0,
                water REAL NOT NULL DEFAULT 0,
                rent REAL NOT NULL DEFAULT 0,
                others REAL NOT NULL DEFAULT 0,
                total REAL NOT NULL DEFAULT 0
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_monthly_bills_user_period
            ON monthly_bills(user_id, year, month);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS occasional_expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                date TEXT NOT NULL,
                insurance REAL NOT NULL DEFAULT 0,
                school_fee REAL NOT NULL DEFAULT 0,
                repair REAL NOT NULL DEFAULT 0,
                total REAL NOT NULL DEFAULT 0
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_occasional_expenses_user_date
            ON occasional_expenses(user_id, date);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn test_schema_is_created() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        let rows = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(db.pool())
            .await
            .unwrap();
        let tables: Vec<String> = rows.iter().map(|row| row.get("name")).collect();

        assert!(tables.contains(&"daily_expenses".to_string()));
        assert!(tables.contains(&"monthly_bills".to_string()));
        assert!(tables.contains(&"occasional_expenses".to_string()));
    }

    #[tokio::test]
    async fn test_setup_schema_is_idempotent() {
        let db = DbConnection::init_test().await.unwrap();
        DbConnection::setup_schema(db.pool()).await.unwrap();
    }
}
