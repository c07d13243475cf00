//! MLB adapter backed by the MLB Stats API (statsapi.mlb.com).
//!
//! Schedule slates are requested one calendar date at a time and filtered
//! locally, so the same cached slate serves every team selection. Trends
//! scan backward day by day; head-to-head uses one ranged query.

use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate};
use serde_json::Value;

use super::provider::{HeadToHeadSource, ScheduleSource, TrendSource};
use super::{
    game_outlook, parse_game_datetime, short_date_label, sort_rows, window_dates, window_label,
};
use crate::models::{
    GameSummary, HeadToHead, Meeting, MlbGamePage, Schedule, ScheduleMode, Team, TeamTrend,
};
use crate::predict;
use crate::upstream::UpstreamClient;

/// Widest schedule window a single request may cover.
const SCHEDULE_MAX_DAYS: u32 = 60;
/// Days scanned backward when building a trend. A season plus the
/// off-season, so early-season requests still find last year's games.
const TREND_HORIZON_DAYS: i64 = 365;
/// Head-to-head lookback: two seasons.
const H2H_LOOKBACK_DAYS: i64 = 730;

/// Statuses a "future" schedule request keeps.
const FUTURE_STATUSES: &[&str] = &[
    "Scheduled",
    "Pre-Game",
    "Warmup",
    "Delayed Start",
    "Postponed",
    "If Necessary",
    "Preview",
];

/// Status prefixes that mark a game as complete ("Completed Early" carries
/// a reason suffix, e.g. "Completed Early: Rain").
const FINAL_STATUSES: &[&str] = &["Final", "Game Over", "Completed Early"];

/// The 30 MLB clubs (id, name, abbreviation), sorted by name. The Stats
/// API's team ids are stable, so a static table avoids an upstream
/// round-trip on every dropdown render.
const MLB_TEAMS: &[(i64, &str, &str)] = &[
    (109, "Arizona Diamondbacks", "ARI"),
    (144, "Atlanta Braves", "ATL"),
    (110, "Baltimore Orioles", "BAL"),
    (111, "Boston Red Sox", "BOS"),
    (112, "Chicago Cubs", "CHC"),
    (145, "Chicago White Sox", "CWS"),
    (113, "Cincinnati Reds", "CIN"),
    (114, "Cleveland Guardians", "CLE"),
    (115, "Colorado Rockies", "COL"),
    (116, "Detroit Tigers", "DET"),
    (117, "Houston Astros", "HOU"),
    (118, "Kansas City Royals", "KC"),
    (108, "Los Angeles Angels", "LAA"),
    (119, "Los Angeles Dodgers", "LAD"),
    (146, "Miami Marlins", "MIA"),
    (158, "Milwaukee Brewers", "MIL"),
    (142, "Minnesota Twins", "MIN"),
    (121, "New York Mets", "NYM"),
    (147, "New York Yankees", "NYY"),
    (133, "Oakland Athletics", "OAK"),
    (143, "Philadelphia Phillies", "PHI"),
    (134, "Pittsburgh Pirates", "PIT"),
    (135, "San Diego Padres", "SD"),
    (137, "San Francisco Giants", "SF"),
    (136, "Seattle Mariners", "SEA"),
    (138, "St. Louis Cardinals", "STL"),
    (139, "Tampa Bay Rays", "TB"),
    (140, "Texas Rangers", "TEX"),
    (141, "Toronto Blue Jays", "TOR"),
    (120, "Washington Nationals", "WSH"),
];

pub struct MlbSource {
    client: UpstreamClient,
}

impl MlbSource {
    pub fn new(client: UpstreamClient) -> Self {
        MlbSource { client }
    }

    pub fn teams(&self) -> Vec<Team> {
        MLB_TEAMS
            .iter()
            .map(|&(id, name, abbr)| Team {
                id,
                name: name.to_string(),
                abbr: abbr.to_string(),
            })
            .collect()
    }

    /// Assembled MLB game page, or `None` when the game id cannot be
    /// resolved at all.
    pub async fn game_page(&self, game_pk: i64) -> Option<MlbGamePage> {
        let meta = self
            .client
            .get(
                "/schedule",
                &[("sportId", "1".to_string()), ("gamePk", game_pk.to_string())],
            )
            .await;
        let games = slate_games(&meta);
        let game = games.first()?;

        let status = game_status(game).to_string();
        let (date, time) = parse_game_datetime(game["gameDate"].as_str());
        let when = if time == "TBD" {
            date.clone()
        } else {
            format!("{date} • {time}")
        };

        let home_id = game["teams"]["home"]["team"]["id"].as_i64();
        let away_id = game["teams"]["away"]["team"]["id"].as_i64();
        let home_name = team_name(game, "home");
        let away_name = team_name(game, "away");
        let venue = game["venue"]["name"].as_str().unwrap_or("").to_string();

        let line_path = format!("/game/{game_pk}/linescore");
        let box_path = format!("/game/{game_pk}/boxscore");
        let (linescore, boxscore) =
            tokio::join!(self.client.get(&line_path, &[]), self.client.get(&box_path, &[]));

        let (innings, away_innings, home_innings) = inning_lines(&linescore);
        let (away_runs, away_hits, away_errors) = team_totals(&boxscore, &linescore, "away");
        let (home_runs, home_hits, home_errors) = team_totals(&boxscore, &linescore, "home");

        let home_abbr = team_abbr_from_name(&home_name);
        let away_abbr = team_abbr_from_name(&away_name);
        let (trend_home, trend_away, h2h) =
            game_outlook(self, home_id, away_id, &home_abbr, &away_abbr).await;

        let wp = predict::estimate(
            &status,
            home_runs,
            away_runs,
            &trend_home,
            &trend_away,
            &home_name,
            &away_name,
        );

        Some(MlbGamePage {
            title: format!("{away_name} @ {home_name}"),
            subtitle: format!("Game ID: {game_pk}"),
            status,
            when,
            venue,
            away_name,
            home_name,
            away_runs,
            home_runs,
            away_hits,
            home_hits,
            away_errors,
            home_errors,
            innings,
            away_innings,
            home_innings,
            trend_home,
            trend_away,
            h2h,
            wp,
        })
    }

    /// Window math split out so tests can pin the date.
    pub(crate) async fn schedule_from(
        &self,
        today: NaiveDate,
        team_id: Option<i64>,
        days: u32,
        mode: ScheduleMode,
    ) -> Schedule {
        let days = days.clamp(1, SCHEDULE_MAX_DAYS);
        let dates = window_dates(today, days, mode);

        let mut rows = Vec::new();
        for date in &dates {
            let payload = self
                .client
                .get(
                    "/schedule",
                    &[("sportId", "1".to_string()), ("date", date.to_string())],
                )
                .await;
            for game in slate_games(&payload) {
                let Some((home_id, away_id, row)) = schedule_row(game, mode) else {
                    continue;
                };
                if let Some(wanted) = team_id {
                    if wanted != home_id && wanted != away_id {
                        continue;
                    }
                }
                rows.push(row);
            }
        }
        sort_rows(&mut rows, mode);

        Schedule {
            team: team_label(team_id),
            window: window_label(&dates),
            rows,
        }
    }

    pub(crate) async fn trend_from(
        &self,
        today: NaiveDate,
        team_id: i64,
        limit: usize,
    ) -> TeamTrend {
        // Newest first while scanning; reversed below.
        let mut games: Vec<(String, i32, i32)> = Vec::new();
        for back in 1..=TREND_HORIZON_DAYS {
            if games.len() >= limit {
                break;
            }
            let date = today - Duration::days(back);
            let payload = self
                .client
                .get(
                    "/schedule",
                    &[
                        ("sportId", "1".to_string()),
                        ("teamId", team_id.to_string()),
                        ("date", date.to_string()),
                    ],
                )
                .await;
            if let Some((pf, pa)) = final_game_for(&payload, team_id) {
                games.push((short_date_label(&date.to_string()), pf, pa));
            }
        }
        games.reverse();
        TeamTrend::from_games(games)
    }

    pub(crate) async fn h2h_from(
        &self,
        today: NaiveDate,
        team_a: i64,
        team_b: i64,
        label_a: &str,
        label_b: &str,
        limit: usize,
    ) -> HeadToHead {
        let start = today - Duration::days(H2H_LOOKBACK_DAYS);
        let payload = self
            .client
            .get(
                "/schedule",
                &[
                    ("sportId", "1".to_string()),
                    ("teamId", team_a.to_string()),
                    ("startDate", start.to_string()),
                    ("endDate", today.to_string()),
                ],
            )
            .await;
        let meetings = h2h_meetings(&payload, team_a, team_b);
        HeadToHead::from_meetings(label_a, label_b, meetings, limit)
    }
}

#[async_trait]
impl ScheduleSource for MlbSource {
    async fn schedule(&self, team_id: Option<i64>, days: u32, mode: ScheduleMode) -> Schedule {
        self.schedule_from(Local::now().date_naive(), team_id, days, mode)
            .await
    }

    fn name(&self) -> &str {
        "mlb-stats"
    }
}

#[async_trait]
impl TrendSource for MlbSource {
    async fn team_trend(&self, team_id: i64, limit: usize) -> TeamTrend {
        self.trend_from(Local::now().date_naive(), team_id, limit).await
    }
}

#[async_trait]
impl HeadToHeadSource for MlbSource {
    async fn head_to_head(
        &self,
        team_a: i64,
        team_b: i64,
        label_a: &str,
        label_b: &str,
        limit: usize,
    ) -> HeadToHead {
        self.h2h_from(Local::now().date_naive(), team_a, team_b, label_a, label_b, limit)
            .await
    }
}

// ── Payload helpers ──────────────────────────────────────────────────────────

/// Flatten a schedule payload's `dates[].games[]` nesting.
fn slate_games(payload: &Value) -> Vec<&Value> {
    payload["dates"]
        .as_array()
        .map(|dates| {
            dates
                .iter()
                .filter_map(|d| d["games"].as_array())
                .flatten()
                .collect()
        })
        .unwrap_or_default()
}

fn game_status(game: &Value) -> &str {
    game["status"]["detailedState"].as_str().unwrap_or("")
}

fn team_name(game: &Value, side: &str) -> String {
    game["teams"][side]["team"]["name"]
        .as_str()
        .unwrap_or(if side == "home" { "Home" } else { "Away" })
        .to_string()
}

fn is_final(status: &str) -> bool {
    FINAL_STATUSES.iter().any(|s| status.starts_with(s))
}

fn is_upcoming(status: &str) -> bool {
    FUTURE_STATUSES.contains(&status)
}

fn status_matches(mode: ScheduleMode, status: &str) -> bool {
    match mode {
        ScheduleMode::Future => is_upcoming(status),
        ScheduleMode::Past => is_final(status),
    }
}

/// One schedule game → `(home_id, away_id, row)`, or `None` when the
/// status does not match the requested direction or the record is
/// unusable. Scores only appear on rows that are underway or done.
fn schedule_row(game: &Value, mode: ScheduleMode) -> Option<(i64, i64, GameSummary)> {
    let status = game_status(game);
    if !status_matches(mode, status) {
        return None;
    }
    let game_id = game["gamePk"].as_i64()?;
    let home_id = game["teams"]["home"]["team"]["id"].as_i64()?;
    let away_id = game["teams"]["away"]["team"]["id"].as_i64()?;

    let (date, time) = parse_game_datetime(game["gameDate"].as_str());
    let (away_score, home_score) = if is_upcoming(status) {
        (None, None)
    } else {
        (
            game["teams"]["away"]["score"].as_i64().map(|n| n as i32),
            game["teams"]["home"]["score"].as_i64().map(|n| n as i32),
        )
    };

    let row = GameSummary {
        date,
        time,
        away: team_name(game, "away"),
        home: team_name(game, "home"),
        venue: game["venue"]["name"].as_str().unwrap_or("").to_string(),
        status: status.to_string(),
        away_score,
        home_score,
        game_id,
    };
    Some((home_id, away_id, row))
}

/// First completed game in the slate involving `team_id`, as
/// `(scored, allowed)` from that team's perspective. At most one game per
/// calendar day feeds a trend, so the first hit wins.
fn final_game_for(payload: &Value, team_id: i64) -> Option<(i32, i32)> {
    for game in slate_games(payload) {
        if !is_final(game_status(game)) {
            continue;
        }
        let home_id = game["teams"]["home"]["team"]["id"].as_i64();
        let away_id = game["teams"]["away"]["team"]["id"].as_i64();
        let home_score = game["teams"]["home"]["score"].as_i64().unwrap_or(0) as i32;
        let away_score = game["teams"]["away"]["score"].as_i64().unwrap_or(0) as i32;
        if home_id == Some(team_id) {
            return Some((home_score, away_score));
        }
        if away_id == Some(team_id) {
            return Some((away_score, home_score));
        }
    }
    None
}

/// Completed games whose participant set is exactly `{team_a, team_b}`,
/// scores normalized so team A is always the first side.
fn h2h_meetings(payload: &Value, team_a: i64, team_b: i64) -> Vec<Meeting> {
    let mut meetings = Vec::new();
    for game in slate_games(payload) {
        if !is_final(game_status(game)) {
            continue;
        }
        let Some(home_id) = game["teams"]["home"]["team"]["id"].as_i64() else {
            continue;
        };
        let Some(away_id) = game["teams"]["away"]["team"]["id"].as_i64() else {
            continue;
        };
        let pair_matches = (home_id == team_a && away_id == team_b)
            || (home_id == team_b && away_id == team_a);
        if !pair_matches {
            continue;
        }

        let date: String = game["gameDate"].as_str().unwrap_or("").chars().take(10).collect();
        let home_score = game["teams"]["home"]["score"].as_i64().unwrap_or(0) as i32;
        let away_score = game["teams"]["away"]["score"].as_i64().unwrap_or(0) as i32;
        let (team_a_pts, team_b_pts) = if home_id == team_a {
            (home_score, away_score)
        } else {
            (away_score, home_score)
        };

        meetings.push(Meeting {
            date_label: short_date_label(&date),
            date,
            team_a_pts,
            team_b_pts,
        });
    }
    meetings
}

/// Inning headers plus per-inning runs; `None` marks an inning that has
/// not been batted in yet.
fn inning_lines(linescore: &Value) -> (Vec<String>, Vec<Option<i32>>, Vec<Option<i32>>) {
    let mut numbers = Vec::new();
    let mut away = Vec::new();
    let mut home = Vec::new();
    if let Some(innings) = linescore["innings"].as_array() {
        for inning in innings {
            numbers.push(
                inning["num"]
                    .as_i64()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "?".to_string()),
            );
            away.push(inning["away"]["runs"].as_i64().map(|n| n as i32));
            home.push(inning["home"]["runs"].as_i64().map(|n| n as i32));
        }
    }
    (numbers, away, home)
}

/// R/H/E for one side: boxscore team stats first (runs and hits live
/// under batting, errors under fielding), linescore totals as fallback.
fn team_totals(boxscore: &Value, linescore: &Value, side: &str) -> (i32, i32, i32) {
    let stats = &boxscore["teams"][side]["teamStats"];
    let totals = &linescore["teams"][side];
    let pick = |primary: &Value, fallback: &Value| -> i32 {
        primary
            .as_i64()
            .or_else(|| fallback.as_i64())
            .unwrap_or(0) as i32
    };
    (
        pick(&stats["batting"]["runs"], &totals["runs"]),
        pick(&stats["batting"]["hits"], &totals["hits"]),
        pick(&stats["fielding"]["errors"], &totals["errors"]),
    )
}

fn team_label(team_id: Option<i64>) -> String {
    match team_id {
        None => "ALL".to_string(),
        Some(id) => MLB_TEAMS
            .iter()
            .find(|&&(tid, _, _)| tid == id)
            .map(|&(_, _, abbr)| abbr.to_string())
            .unwrap_or_else(|| id.to_string()),
    }
}

/// Abbreviation lookup by club name; unknown names fall back to their
/// first three letters.
fn team_abbr_from_name(name: &str) -> String {
    MLB_TEAMS
        .iter()
        .find(|&&(_, n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, _, abbr)| abbr.to_string())
        .unwrap_or_else(|| name.chars().take(3).collect::<String>().to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scheduled_game() -> Value {
        json!({
            "gamePk": 745001,
            "gameDate": "2025-08-09T23:05:00Z",
            "status": { "detailedState": "Scheduled" },
            "venue": { "name": "Yankee Stadium" },
            "teams": {
                "away": { "team": { "id": 111, "name": "Boston Red Sox" } },
                "home": { "team": { "id": 147, "name": "New York Yankees" } }
            }
        })
    }

    fn final_game(home_runs: i64, away_runs: i64) -> Value {
        json!({
            "gamePk": 745002,
            "gameDate": "2025-08-05T23:05:00Z",
            "status": { "detailedState": "Final" },
            "venue": { "name": "Fenway Park" },
            "teams": {
                "away": { "team": { "id": 147, "name": "New York Yankees" }, "score": away_runs },
                "home": { "team": { "id": 111, "name": "Boston Red Sox" }, "score": home_runs }
            }
        })
    }

    fn slate(games: Vec<Value>) -> Value {
        json!({ "dates": [{ "date": "2025-08-05", "games": games }] })
    }

    #[test]
    fn final_status_matching_accepts_suffixed_variants() {
        assert!(is_final("Final"));
        assert!(is_final("Game Over"));
        assert!(is_final("Completed Early: Rain"));
        assert!(!is_final("Scheduled"));
        assert!(!is_final("In Progress"));
    }

    #[test]
    fn future_row_carries_no_scores() {
        let (home_id, away_id, row) =
            schedule_row(&scheduled_game(), ScheduleMode::Future).unwrap();
        assert_eq!(home_id, 147);
        assert_eq!(away_id, 111);
        assert_eq!(row.status, "Scheduled");
        assert_eq!(row.date, "2025-08-09");
        assert_eq!(row.time, "11:05 PM ET");
        assert!(row.away_score.is_none());
        assert!(row.home_score.is_none());
    }

    #[test]
    fn past_row_carries_scores() {
        let (_, _, row) = schedule_row(&final_game(3, 7), ScheduleMode::Past).unwrap();
        assert_eq!(row.home_score, Some(3));
        assert_eq!(row.away_score, Some(7));
        assert_eq!(row.venue, "Fenway Park");
    }

    #[test]
    fn mode_filter_rejects_the_other_direction() {
        // A past request must never include a not-yet-started game.
        assert!(schedule_row(&scheduled_game(), ScheduleMode::Past).is_none());
        assert!(schedule_row(&final_game(1, 2), ScheduleMode::Future).is_none());
        let live = json!({
            "gamePk": 1, "gameDate": "2025-08-05T23:05:00Z",
            "status": { "detailedState": "In Progress" },
            "teams": {
                "away": { "team": { "id": 1, "name": "A" }, "score": 2 },
                "home": { "team": { "id": 2, "name": "B" }, "score": 1 }
            }
        });
        assert!(schedule_row(&live, ScheduleMode::Future).is_none());
        assert!(schedule_row(&live, ScheduleMode::Past).is_none());
    }

    #[test]
    fn sort_orders_follow_the_mode() {
        let mk = |date: &str, home: &str| GameSummary {
            date: date.to_string(),
            time: "TBD".to_string(),
            away: "X".to_string(),
            home: home.to_string(),
            venue: String::new(),
            status: "Final".to_string(),
            away_score: None,
            home_score: None,
            game_id: 0,
        };
        let mut rows = vec![mk("2025-08-03", "B"), mk("2025-08-05", "A"), mk("2025-08-03", "A")];

        sort_rows(&mut rows, ScheduleMode::Future);
        let future: Vec<_> = rows.iter().map(|r| (r.date.as_str(), r.home.as_str())).collect();
        assert_eq!(
            future,
            vec![("2025-08-03", "A"), ("2025-08-03", "B"), ("2025-08-05", "A")]
        );

        sort_rows(&mut rows, ScheduleMode::Past);
        let past: Vec<_> = rows.iter().map(|r| (r.date.as_str(), r.home.as_str())).collect();
        assert_eq!(
            past,
            vec![("2025-08-05", "A"), ("2025-08-03", "A"), ("2025-08-03", "B")]
        );
    }

    #[test]
    fn final_game_orients_scores_to_the_team() {
        let payload = slate(vec![final_game(3, 7)]);
        // 147 played away and scored 7.
        assert_eq!(final_game_for(&payload, 147), Some((7, 3)));
        // 111 played home and scored 3.
        assert_eq!(final_game_for(&payload, 111), Some((3, 7)));
        assert_eq!(final_game_for(&payload, 999), None);
    }

    #[test]
    fn trend_scan_skips_unfinished_games() {
        let payload = slate(vec![scheduled_game()]);
        assert_eq!(final_game_for(&payload, 147), None);
    }

    #[test]
    fn h2h_keeps_only_the_exact_pair() {
        let other = json!({
            "gamePk": 9, "gameDate": "2025-08-04T23:05:00Z",
            "status": { "detailedState": "Final" },
            "teams": {
                "away": { "team": { "id": 147, "name": "New York Yankees" }, "score": 4 },
                "home": { "team": { "id": 141, "name": "Toronto Blue Jays" }, "score": 2 }
            }
        });
        let payload = slate(vec![final_game(3, 7), other]);
        let meetings = h2h_meetings(&payload, 147, 111);
        assert_eq!(meetings.len(), 1);
        // 147 (team A) was away in the record and scored 7.
        assert_eq!(meetings[0].team_a_pts, 7);
        assert_eq!(meetings[0].team_b_pts, 3);
        assert_eq!(meetings[0].date, "2025-08-05");
        assert_eq!(meetings[0].date_label, "08-05");
    }

    #[test]
    fn inning_lines_mark_unplayed_innings() {
        let linescore = json!({
            "innings": [
                { "num": 1, "away": { "runs": 2 }, "home": { "runs": 0 } },
                { "num": 2, "away": { "runs": 1 }, "home": {} }
            ]
        });
        let (numbers, away, home) = inning_lines(&linescore);
        assert_eq!(numbers, vec!["1", "2"]);
        assert_eq!(away, vec![Some(2), Some(1)]);
        assert_eq!(home, vec![Some(0), None]);
    }

    #[test]
    fn team_totals_prefer_boxscore_then_linescore() {
        let boxscore = json!({
            "teams": { "home": { "teamStats": {
                "batting": { "runs": 5, "hits": 9 },
                "fielding": { "errors": 1 }
            } } }
        });
        let linescore = json!({
            "teams": { "home": { "runs": 4, "hits": 8, "errors": 0 } }
        });
        assert_eq!(team_totals(&boxscore, &linescore, "home"), (5, 9, 1));
        // Missing boxscore stats fall back to the linescore totals.
        assert_eq!(
            team_totals(&Value::Null, &linescore, "home"),
            (4, 8, 0)
        );
        // Nothing anywhere defaults to zeros.
        assert_eq!(team_totals(&Value::Null, &Value::Null, "home"), (0, 0, 0));
    }

    #[test]
    fn team_labels_and_abbreviations() {
        assert_eq!(team_label(None), "ALL");
        assert_eq!(team_label(Some(147)), "NYY");
        assert_eq!(team_label(Some(9999)), "9999");
        assert_eq!(team_abbr_from_name("New York Yankees"), "NYY");
        assert_eq!(team_abbr_from_name("boston red sox"), "BOS");
        assert_eq!(team_abbr_from_name("Springfield Isotopes"), "SPR");
    }
}
