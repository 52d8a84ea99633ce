use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    error::RankingError,
    model::{LeaderboardEntry, ScoreEntry},
};

/// Predicate over score entries. All conditions are ANDed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreFilter {
    pub require_display_name: bool,
    /// Entries must have `xp` strictly greater than this.
    pub min_xp_exclusive: i64,
    /// Entries must have `last_tap_time >= active_since`.
    pub active_since: Option<DateTime<Utc>>,
}

impl ScoreFilter {
    pub fn matches(&self, entry: &ScoreEntry) -> bool {
        if self.require_display_name && !entry.has_display_name() {
            return false;
        }

        if entry.xp <= self.min_xp_exclusive {
            return false;
        }

        match self.active_since {
            Some(since) => entry.last_tap_time.is_some_and(|time| time >= since),
            None => true,
        }
    }
}

/// Read access to the scores written by the gameplay side.
#[async_trait]
pub trait Scoreboard: Send + Sync {
    /// Entries matching `filter`, `xp` descending then `telegram_id`
    /// ascending, at most `limit` of them.
    async fn top(
        &self,
        filter: &ScoreFilter,
        limit: u32,
    ) -> Result<Vec<LeaderboardEntry>, RankingError>;

    async fn count(&self, filter: &ScoreFilter) -> Result<u64, RankingError>;

    async fn find_by_identity(&self, telegram_id: &str)
        -> Result<Option<ScoreEntry>, RankingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(username: Option<&str>, xp: i64, last_tap_time: Option<&str>) -> ScoreEntry {
        ScoreEntry {
            telegram_id: String::from("42"),
            username: username.map(String::from),
            xp,
            compute_power: 1,
            compute: 0,
            last_tap_time: last_tap_time
                .map(|time| DateTime::parse_from_rfc3339(time).unwrap().with_timezone(&Utc)),
        }
    }

    #[test]
    fn display_name_required_only_when_asked() {
        let nameless = entry(Some(""), 10, None);
        let strict = ScoreFilter {
            require_display_name: true,
            min_xp_exclusive: 0,
            active_since: None,
        };
        let loose = ScoreFilter {
            require_display_name: false,
            ..strict
        };

        assert!(!strict.matches(&nameless));
        assert!(!strict.matches(&entry(None, 10, None)));
        assert!(loose.matches(&nameless));
    }

    #[test]
    fn xp_bound_is_exclusive() {
        let filter = ScoreFilter {
            require_display_name: false,
            min_xp_exclusive: 90,
            active_since: None,
        };

        assert!(!filter.matches(&entry(Some("b"), 90, None)));
        assert!(filter.matches(&entry(Some("a"), 91, None)));
    }

    #[test]
    fn activity_bound_is_inclusive() {
        let since = DateTime::parse_from_rfc3339("2024-05-15T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let filter = ScoreFilter {
            require_display_name: false,
            min_xp_exclusive: 0,
            active_since: Some(since),
        };

        assert!(filter.matches(&entry(Some("a"), 5, Some("2024-05-15T00:00:00Z"))));
        assert!(!filter.matches(&entry(Some("a"), 5, Some("2024-05-14T23:59:59.999Z"))));
        assert!(!filter.matches(&entry(Some("a"), 5, None)));
    }
}
