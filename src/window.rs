use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};

use crate::error::RankingError;

/// Activity-recency window a leaderboard is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKind {
    Daily,
    Weekly,
    AllTime,
}

impl WindowKind {
    pub const ALL: [WindowKind; 3] = [WindowKind::Daily, WindowKind::Weekly, WindowKind::AllTime];

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowKind::Daily => "daily",
            WindowKind::Weekly => "weekly",
            WindowKind::AllTime => "all-time",
        }
    }
}

impl Display for WindowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowKind {
    type Err = RankingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "daily" => Ok(WindowKind::Daily),
            "weekly" => Ok(WindowKind::Weekly),
            "all-time" => Ok(WindowKind::AllTime),
            _ => Err(RankingError::InvalidWindow(raw.to_string())),
        }
    }
}

/// Inclusive lower bound on `last_tap_time` for `kind`, evaluated in `now`'s
/// time zone. `None` means the window is unbounded.
pub fn window_start<Tz: TimeZone>(kind: WindowKind, now: &DateTime<Tz>) -> Option<DateTime<Utc>> {
    let today = now.date_naive();
    let first_day = match kind {
        WindowKind::AllTime => return None,
        WindowKind::Daily => today,
        // Weeks start on Sunday.
        WindowKind::Weekly => {
            today - Duration::days(i64::from(now.weekday().num_days_from_sunday()))
        }
    };

    Some(local_midnight(now, first_day.and_time(NaiveTime::MIN)))
}

fn local_midnight<Tz: TimeZone>(now: &DateTime<Tz>, midnight: NaiveDateTime) -> DateTime<Utc> {
    let tz = now.timezone();

    // A DST transition can skip 00:00 entirely; take the first wall-clock
    // minute that exists after it. A repeated 00:00 resolves to the earlier one.
    let resolved = (0..=180)
        .map(|minutes| midnight + Duration::minutes(minutes))
        .find_map(|local| tz.from_local_datetime(&local).earliest());

    match resolved {
        Some(instant) => instant.with_timezone(&Utc),
        // Zone cannot place the wall-clock time at all: read it in `now`'s offset.
        None => {
            let offset = now.offset().fix().local_minus_utc();
            Utc.from_utc_datetime(&(midnight - Duration::seconds(i64::from(offset))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult, NaiveDate};
    use chrono_tz::America::Havana;

    fn at(offset_hours: i32, rfc3339: &str) -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&offset)
    }

    fn utc(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn parses_known_kinds_only() {
        for kind in WindowKind::ALL {
            assert_eq!(kind.as_str().parse::<WindowKind>(), Ok(kind));
        }

        assert_eq!(
            "monthly".parse::<WindowKind>(),
            Err(RankingError::InvalidWindow("monthly".into()))
        );
        assert_eq!(
            "".parse::<WindowKind>(),
            Err(RankingError::InvalidWindow(String::new()))
        );
        assert!("All-Time".parse::<WindowKind>().is_err());
    }

    #[test]
    fn all_time_is_unbounded() {
        let now = at(2, "2024-05-15T13:45:00+02:00");
        assert_eq!(window_start(WindowKind::AllTime, &now), None);
    }

    #[test]
    fn daily_starts_at_local_midnight() {
        // Wednesday afternoon in UTC+2.
        let now = at(2, "2024-05-15T13:45:10.500+02:00");
        assert_eq!(
            window_start(WindowKind::Daily, &now),
            Some(utc("2024-05-14T22:00:00Z"))
        );
    }

    #[test]
    fn daily_at_midnight_is_now() {
        let now = at(0, "2024-05-15T00:00:00Z");
        assert_eq!(window_start(WindowKind::Daily, &now), Some(now.with_timezone(&Utc)));
    }

    #[test]
    fn daily_uses_local_calendar_date() {
        // 23:30 UTC on the 15th is already the 16th in UTC+3.
        let now = at(3, "2024-05-15T23:30:00Z");
        assert_eq!(
            window_start(WindowKind::Daily, &now),
            Some(utc("2024-05-15T21:00:00Z"))
        );
    }

    #[test]
    fn weekly_starts_on_preceding_sunday() {
        let now = at(2, "2024-05-15T13:45:00+02:00");
        assert_eq!(
            window_start(WindowKind::Weekly, &now),
            Some(utc("2024-05-11T22:00:00Z"))
        );
    }

    #[test]
    fn weekly_on_sunday_starts_that_day() {
        let now = at(0, "2024-05-12T09:00:00Z");
        assert_eq!(
            window_start(WindowKind::Weekly, &now),
            Some(utc("2024-05-12T00:00:00Z"))
        );
    }

    #[test]
    fn weekly_on_saturday_reaches_back_six_days() {
        let now = at(0, "2024-05-18T23:59:59Z");
        assert_eq!(
            window_start(WindowKind::Weekly, &now),
            Some(utc("2024-05-12T00:00:00Z"))
        );
    }

    #[test]
    fn weekly_crosses_month_boundary() {
        // Tuesday 2024-10-01; the week began Sunday 2024-09-29.
        let now = at(-5, "2024-10-01T08:00:00-05:00");
        assert_eq!(
            window_start(WindowKind::Weekly, &now),
            Some(utc("2024-09-29T05:00:00Z"))
        );
    }

    #[test]
    fn skipped_midnight_resolves_to_first_valid_instant() {
        // Havana springs forward at 00:00 on 2024-03-10, straight to 01:00 CDT.
        let now = Havana.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        assert_eq!(
            window_start(WindowKind::Daily, &now),
            Some(utc("2024-03-10T05:00:00Z"))
        );

        // Wednesday of the same week reaches back to the same boundary.
        let now = Havana.with_ymd_and_hms(2024, 3, 13, 9, 0, 0).unwrap();
        assert_eq!(
            window_start(WindowKind::Weekly, &now),
            Some(utc("2024-03-10T05:00:00Z"))
        );
    }

    #[test]
    fn repeated_midnight_resolves_to_earlier_instant() {
        // Havana falls back at 01:00 CDT on 2024-11-03, so 00:00 occurs twice:
        // 04:00Z (CDT) and 05:00Z (CST).
        let now = Havana.with_ymd_and_hms(2024, 11, 3, 9, 0, 0).unwrap();
        assert_eq!(
            window_start(WindowKind::Daily, &now),
            Some(utc("2024-11-03T04:00:00Z"))
        );
    }

    /// A zone with a fixed +01:00 offset that cannot resolve any local time.
    #[derive(Debug, Clone, Copy)]
    struct Unplaceable;

    impl TimeZone for Unplaceable {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            Unplaceable
        }

        fn offset_from_local_date(&self, _: &NaiveDate) -> LocalResult<FixedOffset> {
            LocalResult::None
        }

        fn offset_from_local_datetime(&self, _: &NaiveDateTime) -> LocalResult<FixedOffset> {
            LocalResult::None
        }

        fn offset_from_utc_date(&self, _: &NaiveDate) -> FixedOffset {
            FixedOffset::east_opt(3600).unwrap()
        }

        fn offset_from_utc_datetime(&self, _: &NaiveDateTime) -> FixedOffset {
            FixedOffset::east_opt(3600).unwrap()
        }
    }

    #[test]
    fn unresolvable_midnight_uses_current_offset() {
        let now = Unplaceable.from_utc_datetime(&utc("2024-05-15T10:00:00Z").naive_utc());
        assert_eq!(
            window_start(WindowKind::Daily, &now),
            Some(utc("2024-05-14T23:00:00Z"))
        );
    }

    #[test]
    fn weekly_never_later_than_daily() {
        let now = at(1, "2024-05-17T06:00:00+01:00");
        let daily = window_start(WindowKind::Daily, &now).unwrap();
        let weekly = window_start(WindowKind::Weekly, &now).unwrap();
        assert!(weekly <= daily);
    }
}
