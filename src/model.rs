use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A participant row, owned and written by the gameplay side.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ScoreEntry {
    #[sqlx(rename = "TelegramID")]
    pub telegram_id: String,

    #[sqlx(rename = "Username")]
    pub username: Option<String>,

    #[sqlx(rename = "Xp")]
    pub xp: i64,

    #[sqlx(rename = "ComputePower")]
    pub compute_power: i64,

    #[sqlx(rename = "Compute")]
    pub compute: i64,

    #[sqlx(rename = "LastTapTime")]
    pub last_tap_time: Option<DateTime<Utc>>,
}

impl ScoreEntry {
    pub fn has_display_name(&self) -> bool {
        self.username.as_deref().is_some_and(|name| !name.is_empty())
    }
}

impl From<&ScoreEntry> for LeaderboardEntry {
    fn from(entry: &ScoreEntry) -> Self {
        Self {
            username: entry.username.clone().unwrap_or_default(),
            xp: entry.xp,
            compute_power: entry.compute_power,
            compute: entry.compute,
            last_tap_time: entry.last_tap_time,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[sqlx(rename = "Username")]
    pub username: String,

    #[sqlx(rename = "Xp")]
    pub xp: i64,

    #[sqlx(rename = "ComputePower")]
    pub compute_power: i64,

    #[sqlx(rename = "Compute")]
    pub compute: i64,

    #[sqlx(rename = "LastTapTime")]
    pub last_tap_time: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub position: u64,
    pub total_users: u64,
}
