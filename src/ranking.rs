use std::sync::Arc;

use chrono::{DateTime, TimeZone};

use crate::{
    error::RankingError,
    model::{LeaderboardEntry, Position},
    store::{ScoreFilter, Scoreboard},
    window::{window_start, WindowKind},
};

pub const LEADERBOARD_LIMIT: u32 = 100;

/// Stateless translation of leaderboard requests into scoreboard queries.
#[derive(Clone)]
pub struct RankingService {
    scoreboard: Arc<dyn Scoreboard>,
}

impl RankingService {
    pub fn new(scoreboard: Arc<dyn Scoreboard>) -> Self {
        Self { scoreboard }
    }

    /// Top entries active in `kind`'s window, highest xp first.
    pub async fn leaderboard<Tz: TimeZone>(
        &self,
        kind: WindowKind,
        now: &DateTime<Tz>,
    ) -> Result<Vec<LeaderboardEntry>, RankingError> {
        let filter = ScoreFilter {
            require_display_name: true,
            min_xp_exclusive: 0,
            active_since: window_start(kind, now),
        };
        log::debug!("leaderboard {}: {:?}", kind, filter);

        self.scoreboard
            .top(&filter, LEADERBOARD_LIMIT)
            .await
            .map_err(|error| {
                log::warn!("leaderboard {} failed: {}", kind, error);
                error
            })
    }

    /// 1-based rank of `telegram_id` within `kind`'s window, alongside the
    /// number of users with any xp at all.
    ///
    /// The requester row and the two counts are separate reads, so a score
    /// update landing between them can yield a stale position.
    pub async fn position<Tz: TimeZone>(
        &self,
        kind: WindowKind,
        telegram_id: &str,
        now: &DateTime<Tz>,
    ) -> Result<Position, RankingError> {
        let requester = self
            .scoreboard
            .find_by_identity(telegram_id)
            .await?
            .ok_or(RankingError::NotFound)?;

        // Everyone ahead in the window counts, named or not.
        let ahead = ScoreFilter {
            require_display_name: false,
            min_xp_exclusive: requester.xp,
            active_since: window_start(kind, now),
        };
        // Population is global regardless of window.
        let population = ScoreFilter {
            require_display_name: false,
            min_xp_exclusive: 0,
            active_since: None,
        };

        let position = self.scoreboard.count(&ahead).await? + 1;
        let total_users = self.scoreboard.count(&population).await?;
        log::debug!(
            "position {} for {}: {} of {}",
            kind,
            telegram_id,
            position,
            total_users
        );

        Ok(Position {
            position,
            total_users,
        })
    }
}
