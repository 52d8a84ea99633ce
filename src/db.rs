use anyhow::Context;
use async_trait::async_trait;
use sqlx::{mysql::MySqlPoolOptions, MySql, MySqlPool, QueryBuilder};

use crate::{
    error::RankingError,
    model::{LeaderboardEntry, ScoreEntry},
    store::{ScoreFilter, Scoreboard},
};

pub struct Db {
    pub pool: MySqlPool,
}

impl Db {
    pub async fn new(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("failed to connect to DATABASE_URL")?;

        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(pool: &MySqlPool) -> anyhow::Result<()> {
        sqlx::migrate!("db/migrations")
            .run(pool)
            .await
            .context("failed to run migrations")
    }
}

/// Appends the WHERE clause for `filter`.
fn push_filter(builder: &mut QueryBuilder<'_, MySql>, filter: &ScoreFilter) {
    builder.push(" WHERE Xp > ");
    builder.push_bind(filter.min_xp_exclusive);

    if filter.require_display_name {
        // `<> ''` would also drop whitespace-only names under PAD SPACE
        // collations.
        builder.push(" AND Username IS NOT NULL AND CHAR_LENGTH(Username) > 0");
    }

    if let Some(since) = filter.active_since {
        builder.push(" AND LastTapTime >= ");
        builder.push_bind(since);
    }
}

#[async_trait]
impl Scoreboard for Db {
    async fn top(
        &self,
        filter: &ScoreFilter,
        limit: u32,
    ) -> Result<Vec<LeaderboardEntry>, RankingError> {
        let mut builder = QueryBuilder::<MySql>::new(
            "SELECT COALESCE(Username, '') AS Username, Xp, ComputePower, Compute, LastTapTime FROM User",
        );
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY Xp DESC, TelegramID ASC LIMIT ");
        builder.push_bind(limit);

        let entries = builder
            .build_query_as::<LeaderboardEntry>()
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    async fn count(&self, filter: &ScoreFilter) -> Result<u64, RankingError> {
        let mut builder = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM User");
        push_filter(&mut builder, filter);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn find_by_identity(
        &self,
        telegram_id: &str,
    ) -> Result<Option<ScoreEntry>, RankingError> {
        const QUERY: &str = "
            SELECT TelegramID, Username, Xp, ComputePower, Compute, LastTapTime
            FROM User WHERE TelegramID = ?
        ";

        let entry = sqlx::query_as::<_, ScoreEntry>(QUERY)
            .bind(telegram_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entry)
    }
}
