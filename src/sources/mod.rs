pub mod mlb;
pub mod nba;
pub mod provider;

pub use mlb::MlbSource;
pub use nba::NbaSource;
pub use provider::{HeadToHeadSource, ScheduleSource, TrendSource};

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::{GameSummary, HeadToHead, ScheduleMode, TeamTrend};

/// Most recent completed games kept in a trend.
pub const TREND_GAMES: usize = 5;
/// Head-to-head meetings shown on a game page.
pub const H2H_GAMES: usize = 5;

/// Calendar dates covered by a schedule request, in scan order:
/// future walks `[today, today+days)` forward, past walks from yesterday
/// back to `today-days`.
pub(crate) fn window_dates(today: NaiveDate, days: u32, mode: ScheduleMode) -> Vec<NaiveDate> {
    match mode {
        ScheduleMode::Future => (0..days)
            .map(|i| today + Duration::days(i64::from(i)))
            .collect(),
        ScheduleMode::Past => (0..days)
            .map(|i| today - Duration::days(i64::from(i) + 1))
            .collect(),
    }
}

/// Ascending for future windows, most-recent-first for past windows;
/// (home, away) tie-break keeps the ordering stable either way.
pub(crate) fn sort_rows(rows: &mut [GameSummary], mode: ScheduleMode) {
    match mode {
        ScheduleMode::Future => rows.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.home.cmp(&b.home))
                .then_with(|| a.away.cmp(&b.away))
        }),
        ScheduleMode::Past => rows.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.home.cmp(&b.home))
                .then_with(|| a.away.cmp(&b.away))
        }),
    }
}

/// Human-readable window string, earliest date first regardless of scan
/// direction.
pub(crate) fn window_label(dates: &[NaiveDate]) -> String {
    match (dates.iter().min(), dates.iter().max()) {
        (Some(start), Some(end)) => format!("{start} to {end}"),
        _ => String::new(),
    }
}

/// Parse an upstream ISO timestamp ("2025-01-05T23:00:00.000Z") into a
/// `(date, clock label)` pair. Returns `("", "TBD")` when absent and keeps
/// the raw date prefix when the timestamp does not parse.
pub(crate) fn parse_game_datetime(raw: Option<&str>) -> (String, String) {
    let Some(s) = raw else {
        return (String::new(), "TBD".to_string());
    };
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => {
            let utc = dt.with_timezone(&Utc);
            (
                utc.date_naive().to_string(),
                format!("{} ET", utc.format("%-I:%M %p")),
            )
        }
        Err(_) => (s.chars().take(10).collect(), "TBD".to_string()),
    }
}

/// Short MM-DD label for chart axes.
pub(crate) fn short_date_label(date: &str) -> String {
    if date.len() >= 10 {
        date[5..10].to_string()
    } else {
        date.to_string()
    }
}

/// Trend and head-to-head fan-out shared by both game pages. The three
/// lookups are independent, so they run concurrently.
pub(crate) async fn game_outlook<S>(
    source: &S,
    home_id: Option<i64>,
    away_id: Option<i64>,
    home_label: &str,
    away_label: &str,
) -> (TeamTrend, TeamTrend, HeadToHead)
where
    S: TrendSource + HeadToHeadSource,
{
    let home_trend = async {
        match home_id {
            Some(id) => source.team_trend(id, TREND_GAMES).await,
            None => TeamTrend::default(),
        }
    };
    let away_trend = async {
        match away_id {
            Some(id) => source.team_trend(id, TREND_GAMES).await,
            None => TeamTrend::default(),
        }
    };
    let h2h = async {
        match (home_id, away_id) {
            (Some(h), Some(a)) => {
                source
                    .head_to_head(h, a, home_label, away_label, H2H_GAMES)
                    .await
            }
            _ => HeadToHead::empty(home_label, away_label),
        }
    };
    tokio::join!(home_trend, away_trend, h2h)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn future_window_starts_today_and_excludes_the_far_edge() {
        let dates = window_dates(d("2025-12-05"), 3, ScheduleMode::Future);
        assert_eq!(
            dates,
            vec![d("2025-12-05"), d("2025-12-06"), d("2025-12-07")]
        );
    }

    #[test]
    fn past_window_scans_from_yesterday_backward() {
        let dates = window_dates(d("2025-12-05"), 3, ScheduleMode::Past);
        assert_eq!(
            dates,
            vec![d("2025-12-04"), d("2025-12-03"), d("2025-12-02")]
        );
    }

    #[test]
    fn window_label_reads_earliest_to_latest() {
        let dates = window_dates(d("2025-12-05"), 7, ScheduleMode::Past);
        assert_eq!(window_label(&dates), "2025-11-28 to 2025-12-04");
        assert_eq!(window_label(&[]), "");
    }

    #[test]
    fn datetime_parse_formats_the_clock() {
        let (date, time) = parse_game_datetime(Some("2025-01-05T23:30:00.000Z"));
        assert_eq!(date, "2025-01-05");
        assert_eq!(time, "11:30 PM ET");
    }

    #[test]
    fn datetime_parse_strips_leading_zero_hours() {
        let (_, time) = parse_game_datetime(Some("2025-01-06T07:05:00Z"));
        assert_eq!(time, "7:05 AM ET");
    }

    #[test]
    fn datetime_parse_degrades_to_tbd() {
        assert_eq!(parse_game_datetime(None), ("".to_string(), "TBD".to_string()));
        let (date, time) = parse_game_datetime(Some("2025-01-05 not a timestamp"));
        assert_eq!(date, "2025-01-05");
        assert_eq!(time, "TBD");
    }

    #[test]
    fn short_label_is_month_and_day() {
        assert_eq!(short_date_label("2025-11-28"), "11-28");
        assert_eq!(short_date_label("11-28"), "11-28");
    }
}
