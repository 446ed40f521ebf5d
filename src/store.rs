//! Leaderboard persistence: a keyed upsert-and-accumulate store over
//! Postgres. Schema is ensured at connect time; entries are never deleted.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::domain::LeaderboardEntry;

/// Leaderboard reads are capped at this many rows.
pub const TOP_N: i64 = 50;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS leaderboard (
    user_id  TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    total_xp BIGINT NOT NULL DEFAULT 0
)
"#;

#[derive(Clone)]
pub struct LeaderboardStore {
  pool: PgPool,
}

impl LeaderboardStore {
  /// Open the pool and ensure the leaderboard table exists.
  pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
    let pool = PgPoolOptions::new()
      .max_connections(5)
      .connect(database_url)
      .await?;
    sqlx::query(SCHEMA).execute(&pool).await?;
    Ok(Self { pool })
  }

  /// Upsert-accumulate: first gain for a user_id creates the row; every
  /// later gain adds to total_xp. A single statement, so concurrent gains
  /// for the same user serialize on the row and none are lost.
  pub async fn add_xp(&self, user_id: &str, username: &str, xp_gained: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
      r#"
      INSERT INTO leaderboard (user_id, username, total_xp)
      VALUES ($1, $2, $3)
      ON CONFLICT (user_id)
      DO UPDATE SET total_xp = leaderboard.total_xp + EXCLUDED.total_xp
      "#,
    )
    .bind(user_id)
    .bind(username)
    .bind(xp_gained)
    .execute(&self.pool)
    .await?;
    Ok(())
  }

  /// Top entries by total_xp descending; username is the stable tie-break.
  pub async fn top(&self) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
    sqlx::query_as::<_, LeaderboardEntry>(
      "SELECT user_id, username, total_xp FROM leaderboard \
       ORDER BY total_xp DESC, username ASC LIMIT $1",
    )
    .bind(TOP_N)
    .fetch_all(&self.pool)
    .await
  }
}
