use serde::Serialize;

/// A club in a sport's team directory (dropdowns, label lookups).
#[derive(Debug, Clone, Serialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub abbr: String,
}

/// Direction of a schedule request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleMode {
    Future,
    Past,
}

impl ScheduleMode {
    /// Anything other than "past" reads as a future request.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("past") {
            ScheduleMode::Past
        } else {
            ScheduleMode::Future
        }
    }
}

/// One row of a schedule table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    /// ISO date (YYYY-MM-DD).
    pub date: String,
    /// Clock label, "TBD" when the upstream has none.
    pub time: String,
    pub away: String,
    pub home: String,
    pub venue: String,
    pub status: String,
    /// Present only once the game is underway or done.
    pub away_score: Option<i32>,
    pub home_score: Option<i32>,
    /// Upstream game identifier (gamePk for MLB).
    pub game_id: i64,
}

/// Payload of the schedule endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    /// Label of the selected team, or "ALL" / "ALL TEAMS".
    pub team: String,
    /// Human-readable date window, "<earliest> to <latest>".
    pub window: String,
    pub rows: Vec<GameSummary>,
}

/// Recent form for one team: parallel arrays, oldest game first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamTrend {
    /// Short per-game date labels (MM-DD) for chart axes.
    pub labels: Vec<String>,
    pub pts_for: Vec<i32>,
    pub pts_against: Vec<i32>,
    pub margin: Vec<i32>,
    pub avg_for: f64,
    pub avg_against: f64,
}

impl TeamTrend {
    /// Build from `(label, scored, allowed)` tuples already in ascending
    /// chronological order. Fewer games than requested is fine; the arrays
    /// just come out shorter.
    pub fn from_games(games: Vec<(String, i32, i32)>) -> Self {
        if games.is_empty() {
            return TeamTrend::default();
        }
        let mut trend = TeamTrend::default();
        for (label, pf, pa) in games {
            trend.labels.push(label);
            trend.pts_for.push(pf);
            trend.pts_against.push(pa);
            trend.margin.push(pf - pa);
        }
        let n = trend.pts_for.len() as f64;
        trend.avg_for = trend.pts_for.iter().map(|&p| f64::from(p)).sum::<f64>() / n;
        trend.avg_against = trend.pts_against.iter().map(|&p| f64::from(p)).sum::<f64>() / n;
        trend
    }

    pub fn is_empty(&self) -> bool {
        self.pts_for.is_empty()
    }

    /// Average scoring differential over the window, `None` when no games
    /// qualified (an all-zero trend reads as no data, not a 0.0 rating).
    pub fn net_rating(&self) -> Option<f64> {
        if self.is_empty() || (self.avg_for == 0.0 && self.avg_against == 0.0) {
            return None;
        }
        Some(self.avg_for - self.avg_against)
    }
}

/// One prior meeting between a game page's two teams. Scores are always
/// oriented so `team_a` is the page's home side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meeting {
    pub date: String,
    /// MM-DD label for chart axes.
    pub date_label: String,
    pub team_a_pts: i32,
    pub team_b_pts: i32,
}

/// Head-to-head record between the page's home (A) and away (B) teams.
#[derive(Debug, Clone, Serialize)]
pub struct HeadToHead {
    pub team_a: String,
    pub team_b: String,
    pub team_a_wins: u32,
    pub team_b_wins: u32,
    pub games: Vec<Meeting>,
}

impl HeadToHead {
    pub fn empty(team_a: &str, team_b: &str) -> Self {
        HeadToHead {
            team_a: team_a.to_string(),
            team_b: team_b.to_string(),
            team_a_wins: 0,
            team_b_wins: 0,
            games: Vec::new(),
        }
    }

    /// Sort the collected meetings ascending, keep the most recent `limit`,
    /// and tally strict wins over the kept games. Ties count toward neither
    /// side, so the tallies never exceed the meeting count.
    pub fn from_meetings(
        team_a: &str,
        team_b: &str,
        mut games: Vec<Meeting>,
        limit: usize,
    ) -> Self {
        games.sort_by(|x, y| x.date.cmp(&y.date));
        if games.len() > limit {
            games = games.split_off(games.len() - limit);
        }
        let mut result = HeadToHead::empty(team_a, team_b);
        for g in &games {
            if g.team_a_pts > g.team_b_pts {
                result.team_a_wins += 1;
            } else if g.team_b_pts > g.team_a_pts {
                result.team_b_wins += 1;
            }
        }
        result.games = games;
        result
    }
}

/// Heuristic win-probability split for a game page. The halves are whole
/// numbers and always sum to exactly 100.
#[derive(Debug, Clone, Serialize)]
pub struct WinProbability {
    pub home_pct: f64,
    pub away_pct: f64,
    /// One-line description of which branch produced the estimate.
    pub note: String,
    /// Label of the favored side, or "Too close to call".
    pub pick: String,
}

/// Box-score line for one NBA starter.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerLine {
    pub name: String,
    pub team: String,
    pub pos: String,
    pub pts: i32,
    pub reb: i32,
    pub ast: i32,
}

/// Assembled view model for the MLB game page.
#[derive(Debug, Clone, Serialize)]
pub struct MlbGamePage {
    pub title: String,
    pub subtitle: String,
    pub status: String,
    pub when: String,
    pub venue: String,
    pub away_name: String,
    pub home_name: String,
    pub away_runs: i32,
    pub home_runs: i32,
    pub away_hits: i32,
    pub home_hits: i32,
    pub away_errors: i32,
    pub home_errors: i32,
    /// Inning numbers for the linescore header.
    pub innings: Vec<String>,
    /// Per-inning runs; `None` for innings not yet batted in.
    pub away_innings: Vec<Option<i32>>,
    pub home_innings: Vec<Option<i32>>,
    pub trend_home: TeamTrend,
    pub trend_away: TeamTrend,
    pub h2h: HeadToHead,
    pub wp: WinProbability,
}

/// Assembled view model for the NBA game page.
#[derive(Debug, Clone, Serialize)]
pub struct NbaGamePage {
    pub title: String,
    pub subtitle: String,
    pub status: String,
    pub when: String,
    pub venue: String,
    pub away_name: String,
    pub home_name: String,
    pub away_abbr: String,
    pub home_abbr: String,
    pub away_score: i32,
    pub home_score: i32,
    pub starters_home: Vec<PlayerLine>,
    pub starters_away: Vec<PlayerLine>,
    pub trend_home: TeamTrend,
    pub trend_away: TeamTrend,
    pub h2h: HeadToHead,
    pub wp: WinProbability,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn meeting(date: &str, a: i32, b: i32) -> Meeting {
        Meeting {
            date: date.to_string(),
            date_label: date[5..].to_string(),
            team_a_pts: a,
            team_b_pts: b,
        }
    }

    #[test]
    fn trend_arrays_stay_parallel() {
        let trend = TeamTrend::from_games(vec![
            ("06-01".into(), 4, 2),
            ("06-02".into(), 3, 5),
            ("06-04".into(), 7, 1),
        ]);
        assert_eq!(trend.labels.len(), 3);
        assert_eq!(trend.pts_for.len(), 3);
        assert_eq!(trend.pts_against.len(), 3);
        assert_eq!(trend.margin, vec![2, -2, 6]);
        assert_relative_eq!(trend.avg_for, 14.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(trend.avg_against, 8.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn trend_with_two_games_returns_two_entries() {
        // Fewer qualifying games than the limit must not pad with zeros.
        let trend = TeamTrend::from_games(vec![("06-01".into(), 101, 99), ("06-03".into(), 95, 110)]);
        assert_eq!(trend.pts_for.len(), 2);
        assert_eq!(trend.labels, vec!["06-01", "06-03"]);
    }

    #[test]
    fn empty_trend_has_no_net_rating() {
        let trend = TeamTrend::default();
        assert!(trend.is_empty());
        assert!(trend.net_rating().is_none());
        assert_eq!(trend.avg_for, 0.0);
    }

    #[test]
    fn net_rating_is_for_minus_against() {
        let trend = TeamTrend::from_games(vec![("01-01".into(), 110, 100)]);
        assert_relative_eq!(trend.net_rating().unwrap(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn h2h_sorts_trims_and_tallies() {
        let games = vec![
            meeting("2025-03-01", 5, 3),
            meeting("2024-09-10", 2, 4),
            meeting("2025-01-15", 6, 6),
            meeting("2024-05-02", 1, 0),
            meeting("2025-02-20", 3, 2),
            meeting("2024-07-07", 8, 1),
        ];
        let h2h = HeadToHead::from_meetings("NYY", "BOS", games, 5);
        assert_eq!(h2h.games.len(), 5);
        // Oldest meeting (2024-05-02) dropped by the trim.
        assert_eq!(h2h.games[0].date, "2024-07-07");
        assert_eq!(h2h.games.last().unwrap().date, "2025-03-01");
        // 8-1, 3-2, 5-3 for A; 2-4 for B; 6-6 counts toward neither.
        assert_eq!(h2h.team_a_wins, 3);
        assert_eq!(h2h.team_b_wins, 1);
        assert!(h2h.team_a_wins + h2h.team_b_wins <= h2h.games.len() as u32);
    }

    #[test]
    fn h2h_keeps_short_histories_as_is() {
        let games = vec![meeting("2025-04-01", 4, 2)];
        let h2h = HeadToHead::from_meetings("LAD", "SF", games, 5);
        assert_eq!(h2h.games.len(), 1);
        assert_eq!(h2h.team_a_wins, 1);
        assert_eq!(h2h.team_b_wins, 0);
    }

    #[test]
    fn schedule_mode_parse_defaults_to_future() {
        assert_eq!(ScheduleMode::parse("past"), ScheduleMode::Past);
        assert_eq!(ScheduleMode::parse("PAST"), ScheduleMode::Past);
        assert_eq!(ScheduleMode::parse("future"), ScheduleMode::Future);
        assert_eq!(ScheduleMode::parse("bogus"), ScheduleMode::Future);
    }
}
