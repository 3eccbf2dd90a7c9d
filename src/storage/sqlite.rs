use std::str::FromStr;

use futures::future::BoxFuture;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;

use super::Storage;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

#[derive(Debug, Clone)]
pub struct Sqlite {
    pool: SqlitePool,
}

impl Sqlite {
    pub async fn new(url: &str) -> anyhow::Result<Sqlite> {
        let opts = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(opts).await?;

        MIGRATOR.run(&pool).await?;

        Ok(Self { pool })
    }
}

impl Storage for Sqlite {
    fn get(&self, key: &str) -> BoxFuture<anyhow::Result<Option<String>>> {
        let query = sqlx::query("SELECT value FROM kv WHERE key = ?1").bind(key.to_string());

        let pool = self.pool.clone();

        Box::pin(async move {
            let row = query.fetch_optional(&pool).await?;

            Ok(match row {
                Some(row) => Some(row.try_get("value")?),
                None => None,
            })
        })
    }

    fn put(&self, key: &str, value: String) -> BoxFuture<anyhow::Result<()>> {
        let query = sqlx::query(
            r#"INSERT INTO kv (key, value) VALUES (?1, ?2)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value"#,
        )
        .bind(key.to_string())
        .bind(value);

        let pool = self.pool.clone();

        Box::pin(async move {
            query.execute(&pool).await?;

            Ok(())
        })
    }
}
