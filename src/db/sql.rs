use crate::db::models::Visitor;
use crate::db::schema::{POSTGRES_INIT, SQLITE_INIT};
use crate::db::store::VisitorStore;
use crate::error::VisitorError;
use async_trait::async_trait;
use sqlx::any::AnyPoolOptions;
use sqlx::{Any, Pool};
use std::time::Duration;

pub type AnyPool = Pool<Any>;

/// Database flavours reachable through `DATABASE_URL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    pub fn from_url(url: &str) -> Result<Self, VisitorError> {
        let scheme = url.split_once(':').map(|(s, _)| s).unwrap_or_default();
        match scheme {
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            "sqlite" => Ok(Backend::Sqlite),
            "" => Err(VisitorError::Config("DATABASE_URL is not set".to_string())),
            other => Err(VisitorError::Config(format!(
                "unsupported DATABASE_URL scheme `{other}`"
            ))),
        }
    }

    fn init_ddl(self) -> &'static str {
        match self {
            Backend::Postgres => POSTGRES_INIT,
            Backend::Sqlite => SQLITE_INIT,
        }
    }

    fn insert_sql(self) -> &'static str {
        match self {
            Backend::Postgres => "INSERT INTO visitor (name) VALUES ($1)",
            Backend::Sqlite => "INSERT INTO visitor (name) VALUES (?)",
        }
    }
}

#[derive(Clone)]
pub struct VisitorStorage {
    pool: AnyPool,
    backend: Backend,
}

impl VisitorStorage {
    /// Build a lazily connecting pool; no connection is attempted here.
    pub fn connect_lazy(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, VisitorError> {
        let backend = Backend::from_url(database_url)?;
        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)
            .map_err(|e| VisitorError::Config(e.to_string()))?;
        Ok(Self { pool, backend })
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }
}

#[async_trait]
impl VisitorStore for VisitorStorage {
    async fn init_schema(&self) -> Result<(), VisitorError> {
        for stmt in self.backend.init_ddl().split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s)
                .execute(&self.pool)
                .await
                .map_err(VisitorError::from_init)?;
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, VisitorError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM visitor")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    async fn insert(&self, name: &str) -> Result<(), VisitorError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(self.backend.insert_sql())
            .bind(name.to_string())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Visitor>, VisitorError> {
        let rows = sqlx::query_as::<_, Visitor>(
            "SELECT id, name, CAST(created_at AS TEXT) AS created_at FROM visitor ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), VisitorError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
