use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::RankingError,
    model::{LeaderboardEntry, ScoreEntry},
    store::{ScoreFilter, Scoreboard},
};

/// Scoreboard over a fixed set of entries held in process memory, for tests.
#[derive(Default, Debug)]
pub struct MemoryScoreboard {
    entries: RwLock<Vec<ScoreEntry>>,
}

impl MemoryScoreboard {
    pub fn new(entries: Vec<ScoreEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl Scoreboard for MemoryScoreboard {
    async fn top(
        &self,
        filter: &ScoreFilter,
        limit: u32,
    ) -> Result<Vec<LeaderboardEntry>, RankingError> {
        let entries = self.entries.read().await;
        let mut matching: Vec<&ScoreEntry> = entries.iter().filter(|x| filter.matches(x)).collect();

        matching.sort_by(|a, b| b.xp.cmp(&a.xp).then_with(|| a.telegram_id.cmp(&b.telegram_id)));

        Ok(matching
            .into_iter()
            .take(limit as usize)
            .map(LeaderboardEntry::from)
            .collect())
    }

    async fn count(&self, filter: &ScoreFilter) -> Result<u64, RankingError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().filter(|x| filter.matches(x)).count() as u64)
    }

    async fn find_by_identity(
        &self,
        telegram_id: &str,
    ) -> Result<Option<ScoreEntry>, RankingError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().find(|x| x.telegram_id == telegram_id).cloned())
    }
}
