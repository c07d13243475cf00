//! NBA adapter backed by the BallDontLie API.
//!
//! The team directory is paginated and loaded once at startup through the
//! shared client (no import-time side effects); everything else is fetched
//! per request. BallDontLie encodes "not started yet" by putting the tip
//! time in the `status` field, which this module normalizes away.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate};
use serde_json::Value;
use tracing::warn;

use super::provider::{HeadToHeadSource, ScheduleSource, TrendSource};
use super::{
    game_outlook, parse_game_datetime, short_date_label, sort_rows, window_dates, window_label,
};
use crate::models::{
    GameSummary, HeadToHead, Meeting, NbaGamePage, PlayerLine, Schedule, ScheduleMode, Team,
    TeamTrend,
};
use crate::predict;
use crate::upstream::UpstreamClient;

/// Schedule requests are clamped so one render cannot fan out into an
/// unbounded number of per-date upstream calls.
const SCHEDULE_MAX_DAYS: u32 = 7;
/// Trend lookback: roughly the last month and a half of the season.
const TREND_WINDOW_DAYS: i64 = 40;
/// Head-to-head lookback: three seasons, since two given teams only meet
/// a handful of times a year.
const H2H_LOOKBACK_DAYS: i64 = 365 * 3;

pub struct NbaSource {
    client: UpstreamClient,
    teams: Vec<Team>,
}

impl NbaSource {
    /// Build the source and load the team directory. A failed load leaves
    /// the directory empty; the dashboard still serves, with labels
    /// degrading to raw ids.
    pub async fn connect(client: UpstreamClient) -> Self {
        let teams = load_teams(&client).await;
        if teams.is_empty() {
            warn!("NBA team directory is empty; labels degrade to raw ids");
        }
        NbaSource { client, teams }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    fn team_label(&self, team_id: Option<i64>) -> String {
        match team_id {
            None => "ALL TEAMS".to_string(),
            Some(id) => self
                .teams
                .iter()
                .find(|t| t.id == id)
                .map(|t| format!("{} ({})", t.name, t.abbr))
                .unwrap_or_else(|| format!("Team {id}")),
        }
    }

    /// Assembled NBA game page, or `None` when the game id cannot be
    /// resolved at all.
    pub async fn game_page(&self, game_id: i64) -> Option<NbaGamePage> {
        let payload = self.client.get(&format!("/games/{game_id}"), &[]).await;
        // Some response shapes wrap the record in "data", some don't.
        let game = if payload["data"].is_object() {
            &payload["data"]
        } else {
            &payload
        };
        game["id"].as_i64()?;

        let (date, time, status) = game_clock(game);
        let when = if time == "TBD" || time.is_empty() {
            date
        } else {
            format!("{date} • {time}")
        };

        let home = &game["home_team"];
        let away = &game["visitor_team"];
        let home_id = home["id"].as_i64();
        let away_id = away["id"].as_i64();
        let home_name = home["full_name"].as_str().unwrap_or("Home").to_string();
        let away_name = away["full_name"].as_str().unwrap_or("Away").to_string();
        let home_abbr = home["abbreviation"].as_str().unwrap_or("").to_uppercase();
        let away_abbr = away["abbreviation"].as_str().unwrap_or("").to_uppercase();
        let home_score = game["home_team_score"].as_i64().unwrap_or(0) as i32;
        let away_score = game["visitor_team_score"].as_i64().unwrap_or(0) as i32;

        let (trend_home, trend_away, h2h) =
            game_outlook(self, home_id, away_id, &home_abbr, &away_abbr).await;
        let starters = self.starters(game_id).await;

        let wp = predict::estimate(
            &status,
            home_score,
            away_score,
            &trend_home,
            &trend_away,
            &home_name,
            &away_name,
        );

        let (starters_home, starters_away): (Vec<PlayerLine>, Vec<PlayerLine>) = starters
            .into_iter()
            .filter(|p| p.team == home_abbr || p.team == away_abbr)
            .partition(|p| p.team == home_abbr);

        Some(NbaGamePage {
            title: format!("{away_name} @ {home_name}"),
            subtitle: if when.is_empty() {
                status.clone()
            } else {
                format!("{status} • {when}")
            },
            status,
            when,
            venue: venue_of(game),
            away_name,
            home_name,
            away_abbr,
            home_abbr,
            away_score,
            home_score,
            starters_home,
            starters_away,
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
            let mut params = vec![
                ("per_page", "100".to_string()),
                ("dates[]", date.to_string()),
            ];
            if let Some(id) = team_id {
                params.push(("team_ids[]", id.to_string()));
            }
            let payload = self.client.get("/games", &params).await;
            for game in payload["data"].as_array().into_iter().flatten() {
                if let Some(row) = schedule_row(game, mode) {
                    rows.push(row);
                }
            }
        }
        sort_rows(&mut rows, mode);

        Schedule {
            team: self.team_label(team_id),
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
        let start = today - Duration::days(TREND_WINDOW_DAYS);
        let end = today - Duration::days(1);
        let payload = self
            .client
            .get(
                "/games",
                &[
                    ("team_ids[]", team_id.to_string()),
                    ("start_date", start.to_string()),
                    ("end_date", end.to_string()),
                    ("per_page", "100".to_string()),
                ],
            )
            .await;
        let games = trend_games(payload["data"].as_array().map(Vec::as_slice).unwrap_or(&[]), team_id, limit);
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
                "/games",
                &[
                    ("team_ids[]", team_a.to_string()),
                    ("team_ids[]", team_b.to_string()),
                    ("start_date", start.to_string()),
                    ("end_date", today.to_string()),
                    ("per_page", "100".to_string()),
                ],
            )
            .await;
        let meetings = h2h_meetings(
            payload["data"].as_array().map(Vec::as_slice).unwrap_or(&[]),
            team_a,
            team_b,
        );
        HeadToHead::from_meetings(label_a, label_b, meetings, limit)
    }

    /// Starting fives for one game with their box-score lines, both teams
    /// flattened, sorted by (team, points descending).
    pub(crate) async fn starters(&self, game_id: i64) -> Vec<PlayerLine> {
        let payload = self
            .client
            .get(
                "/stats",
                &[
                    ("game_ids[]", game_id.to_string()),
                    ("per_page", "100".to_string()),
                ],
            )
            .await;
        starters_from_stats(payload["data"].as_array().map(Vec::as_slice).unwrap_or(&[]))
    }
}

#[async_trait]
impl ScheduleSource for NbaSource {
    async fn schedule(&self, team_id: Option<i64>, days: u32, mode: ScheduleMode) -> Schedule {
        self.schedule_from(Local::now().date_naive(), team_id, days, mode)
            .await
    }

    fn name(&self) -> &str {
        "balldontlie"
    }
}

#[async_trait]
impl TrendSource for NbaSource {
    async fn team_trend(&self, team_id: i64, limit: usize) -> TeamTrend {
        self.trend_from(Local::now().date_naive(), team_id, limit).await
    }
}

#[async_trait]
impl HeadToHeadSource for NbaSource {
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

/// Cursor-paginate `/teams` into a name-sorted directory.
async fn load_teams(client: &UpstreamClient) -> Vec<Team> {
    let mut teams = Vec::new();
    let mut cursor: Option<i64> = None;
    loop {
        let mut params = vec![("per_page", "100".to_string())];
        if let Some(c) = cursor {
            params.push(("cursor", c.to_string()));
        }
        let payload = client.get("/teams", &params).await;
        let batch = match payload["data"].as_array() {
            Some(batch) if !batch.is_empty() => batch,
            _ => break,
        };
        for t in batch {
            let Some(id) = t["id"].as_i64() else { continue };
            teams.push(Team {
                id,
                name: t["full_name"].as_str().unwrap_or("").trim().to_string(),
                abbr: t["abbreviation"].as_str().unwrap_or("").to_uppercase(),
            });
        }
        cursor = payload["meta"]["next_cursor"].as_i64().filter(|&c| c != 0);
        if cursor.is_none() {
            break;
        }
    }
    teams.sort_by(|a, b| a.name.cmp(&b.name));
    teams
}

/// Resolve `(date, time, status)` from a game record. A raw status that is
/// itself an ISO start timestamp means the game has not tipped off yet and
/// reads as "Scheduled".
fn game_clock(game: &Value) -> (String, String, String) {
    let raw_status = game["status"].as_str().unwrap_or("");
    let mut date: String = game["date"].as_str().unwrap_or("").chars().take(10).collect();
    let mut time = "TBD".to_string();

    if raw_status.contains('T') && raw_status.contains('Z') {
        let (d, t) = parse_game_datetime(Some(raw_status));
        if !d.is_empty() {
            date = d;
        }
        time = t;
        return (date, time, "Scheduled".to_string());
    }

    if let Some(dt) = game["datetime"].as_str() {
        let (_, t) = parse_game_datetime(Some(dt));
        if t != "TBD" {
            time = t;
        }
    }
    (date, time, raw_status.to_string())
}

fn status_matches(mode: ScheduleMode, status: &str) -> bool {
    match mode {
        ScheduleMode::Future => status == "Scheduled",
        ScheduleMode::Past => status == "Final",
    }
}

fn venue_of(game: &Value) -> String {
    if let Some(s) = game["arena"].as_str() {
        return s.to_string();
    }
    if let Some(s) = game["arena"]["name"].as_str() {
        return s.to_string();
    }
    game["arena_name"].as_str().unwrap_or("").to_string()
}

fn schedule_row(game: &Value, mode: ScheduleMode) -> Option<GameSummary> {
    let game_id = game["id"].as_i64()?;
    let (date, time, status) = game_clock(game);
    if !status_matches(mode, &status) {
        return None;
    }

    let (away_score, home_score) = if status == "Scheduled" {
        (None, None)
    } else {
        (
            game["visitor_team_score"].as_i64().map(|n| n as i32),
            game["home_team_score"].as_i64().map(|n| n as i32),
        )
    };

    Some(GameSummary {
        date,
        time,
        away: game["visitor_team"]["abbreviation"]
            .as_str()
            .unwrap_or("")
            .to_uppercase(),
        home: game["home_team"]["abbreviation"]
            .as_str()
            .unwrap_or("")
            .to_uppercase(),
        venue: venue_of(game),
        status,
        away_score,
        home_score,
        game_id,
    })
}

/// Completed games from the team's perspective, ascending, last `limit`.
fn trend_games(games: &[Value], team_id: i64, limit: usize) -> Vec<(String, i32, i32)> {
    let mut rows: Vec<(String, String, i32, i32)> = Vec::new();
    for game in games {
        if game["status"].as_str() != Some("Final") {
            continue;
        }
        let date: String = game["date"].as_str().unwrap_or("").chars().take(10).collect();
        let home_id = game["home_team"]["id"].as_i64();
        let away_id = game["visitor_team"]["id"].as_i64();
        let home_score = game["home_team_score"].as_i64().unwrap_or(0) as i32;
        let away_score = game["visitor_team_score"].as_i64().unwrap_or(0) as i32;

        let (pf, pa) = if home_id == Some(team_id) {
            (home_score, away_score)
        } else if away_id == Some(team_id) {
            (away_score, home_score)
        } else {
            continue;
        };
        rows.push((date.clone(), short_date_label(&date), pf, pa));
    }

    rows.sort_by(|a, b| a.0.cmp(&b.0));
    if rows.len() > limit {
        rows = rows.split_off(rows.len() - limit);
    }
    rows.into_iter().map(|(_, label, pf, pa)| (label, pf, pa)).collect()
}

/// Completed games whose participant set is exactly `{team_a, team_b}`,
/// scores normalized so team A is always the first side.
fn h2h_meetings(games: &[Value], team_a: i64, team_b: i64) -> Vec<Meeting> {
    let mut meetings = Vec::new();
    for game in games {
        if game["status"].as_str() != Some("Final") {
            continue;
        }
        let Some(home_id) = game["home_team"]["id"].as_i64() else {
            continue;
        };
        let Some(away_id) = game["visitor_team"]["id"].as_i64() else {
            continue;
        };
        let pair_matches = (home_id == team_a && away_id == team_b)
            || (home_id == team_b && away_id == team_a);
        if !pair_matches {
            continue;
        }

        let date: String = game["date"].as_str().unwrap_or("").chars().take(10).collect();
        let home_score = game["home_team_score"].as_i64().unwrap_or(0) as i32;
        let away_score = game["visitor_team_score"].as_i64().unwrap_or(0) as i32;
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

/// Convert a BallDontLie minutes string ("32:15", occasionally "1:02:15")
/// into total seconds. Anything else reads as zero playing time.
fn minutes_to_seconds(min: &str) -> i64 {
    if min.is_empty() || min == "00:00" {
        return 0;
    }
    let parts: Vec<i64> = min.split(':').map(|p| p.parse().unwrap_or(0)).collect();
    match parts.as_slice() {
        [m, s] => m * 60 + s,
        [h, m, s] => (h * 60 + m) * 60 + s,
        _ => 0,
    }
}

/// Pick each team's starting five from the game's stat lines. Trust the
/// `starter` flag when any line carries it; otherwise approximate with the
/// top five by minutes played.
fn starters_from_stats(stats: &[Value]) -> Vec<PlayerLine> {
    let mut by_team: HashMap<String, Vec<(PlayerLine, String, bool)>> = HashMap::new();

    for s in stats {
        let player = &s["player"];
        let first = player["first_name"].as_str().unwrap_or("").trim();
        let last = player["last_name"].as_str().unwrap_or("").trim();
        let name = {
            let full = format!("{first} {last}");
            let full = full.trim().to_string();
            if full.is_empty() {
                "Unknown".to_string()
            } else {
                full
            }
        };
        let team = s["team"]["abbreviation"].as_str().unwrap_or("").to_uppercase();
        let pos = {
            let p = player["position"].as_str().unwrap_or("").trim();
            if p.is_empty() {
                "—".to_string()
            } else {
                p.to_string()
            }
        };

        let line = PlayerLine {
            name,
            team: team.clone(),
            pos,
            pts: s["pts"].as_i64().unwrap_or(0) as i32,
            reb: s["reb"].as_i64().unwrap_or(0) as i32,
            ast: s["ast"].as_i64().unwrap_or(0) as i32,
        };
        let minutes = s["min"].as_str().unwrap_or("00:00").to_string();
        let is_starter = s["starter"].as_bool().unwrap_or(false);

        by_team.entry(team).or_default().push((line, minutes, is_starter));
    }

    let mut starters = Vec::new();
    for (_, mut players) in by_team {
        if players.iter().any(|(_, _, flagged)| *flagged) {
            players.retain(|(_, _, flagged)| *flagged);
        } else {
            players.sort_by_key(|(_, minutes, _)| std::cmp::Reverse(minutes_to_seconds(minutes)));
        }
        players.truncate(5);
        starters.extend(players.into_iter().map(|(line, _, _)| line));
    }

    starters.sort_by(|a, b| a.team.cmp(&b.team).then_with(|| b.pts.cmp(&a.pts)));
    starters
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn final_game(home_id: i64, away_id: i64, home_score: i64, away_score: i64, date: &str) -> Value {
        json!({
            "id": 18447091,
            "date": date,
            "datetime": format!("{date}T00:30:00.000Z"),
            "status": "Final",
            "home_team": { "id": home_id, "abbreviation": "atl", "full_name": "Atlanta Hawks" },
            "visitor_team": { "id": away_id, "abbreviation": "bos", "full_name": "Boston Celtics" },
            "home_team_score": home_score,
            "visitor_team_score": away_score
        })
    }

    fn scheduled_game() -> Value {
        json!({
            "id": 18447092,
            "date": "2025-12-05",
            "status": "2025-12-06T00:30:00Z",
            "home_team": { "id": 1, "abbreviation": "ATL", "full_name": "Atlanta Hawks" },
            "visitor_team": { "id": 2, "abbreviation": "BOS", "full_name": "Boston Celtics" },
            "home_team_score": 0,
            "visitor_team_score": 0
        })
    }

    #[test]
    fn timestamp_status_reads_as_scheduled() {
        let (date, time, status) = game_clock(&scheduled_game());
        assert_eq!(status, "Scheduled");
        assert_eq!(date, "2025-12-06");
        assert_eq!(time, "12:30 AM ET");
    }

    #[test]
    fn final_status_keeps_clock_from_datetime() {
        let (date, time, status) = game_clock(&final_game(1, 2, 120, 110, "2025-12-05"));
        assert_eq!(status, "Final");
        assert_eq!(date, "2025-12-05");
        assert_eq!(time, "12:30 AM ET");
    }

    #[test]
    fn scheduled_row_has_no_scores() {
        let row = schedule_row(&scheduled_game(), ScheduleMode::Future).unwrap();
        assert_eq!(row.status, "Scheduled");
        assert!(row.home_score.is_none());
        assert!(row.away_score.is_none());
        assert_eq!(row.home, "ATL");
        assert_eq!(row.away, "BOS");
    }

    #[test]
    fn final_row_only_matches_past_mode() {
        let game = final_game(1, 2, 120, 110, "2025-12-04");
        assert!(schedule_row(&game, ScheduleMode::Future).is_none());
        let row = schedule_row(&game, ScheduleMode::Past).unwrap();
        assert_eq!(row.home_score, Some(120));
        assert_eq!(row.away_score, Some(110));
    }

    #[test]
    fn live_game_matches_neither_mode() {
        let mut game = final_game(1, 2, 55, 60, "2025-12-05");
        game["status"] = json!("3rd Qtr");
        assert!(schedule_row(&game, ScheduleMode::Future).is_none());
        assert!(schedule_row(&game, ScheduleMode::Past).is_none());
    }

    #[test]
    fn trend_orients_scores_and_trims_to_limit() {
        let games = vec![
            final_game(7, 1, 100, 90, "2025-01-04"),
            final_game(1, 7, 95, 105, "2025-01-02"), // team 7 away, scored 105
            final_game(7, 2, 88, 92, "2025-01-06"),
            final_game(3, 4, 120, 118, "2025-01-05"), // team 7 not involved
            final_game(7, 5, 101, 99, "2025-01-01"),
        ];
        let rows = trend_games(&games, 7, 3);
        // Ascending, last 3: 01-02, 01-04, 01-06.
        assert_eq!(
            rows,
            vec![
                ("01-02".to_string(), 105, 95),
                ("01-04".to_string(), 100, 90),
                ("01-06".to_string(), 88, 92),
            ]
        );
    }

    #[test]
    fn trend_skips_unfinished_games() {
        let mut live = final_game(7, 1, 50, 48, "2025-01-04");
        live["status"] = json!("2nd Qtr");
        assert!(trend_games(&[live], 7, 5).is_empty());
    }

    #[test]
    fn h2h_filters_to_the_exact_pair_and_orients() {
        let games = vec![
            final_game(1, 2, 120, 115, "2025-11-28"),
            final_game(2, 1, 108, 101, "2025-02-10"), // team 1 away, scored 101
            final_game(1, 3, 99, 98, "2025-03-01"),   // wrong opponent
        ];
        let meetings = h2h_meetings(&games, 1, 2);
        assert_eq!(meetings.len(), 2);
        let feb = meetings.iter().find(|m| m.date == "2025-02-10").unwrap();
        assert_eq!(feb.team_a_pts, 101);
        assert_eq!(feb.team_b_pts, 108);
    }

    #[test]
    fn minutes_parse_handles_both_layouts() {
        assert_eq!(minutes_to_seconds("32:15"), 1935);
        assert_eq!(minutes_to_seconds("1:02:15"), 3735);
        assert_eq!(minutes_to_seconds("00:00"), 0);
        assert_eq!(minutes_to_seconds(""), 0);
        assert_eq!(minutes_to_seconds("n/a"), 0);
    }

    fn stat_line(name: &str, team: &str, pts: i64, min: &str, starter: Option<bool>) -> Value {
        let mut v = json!({
            "player": { "first_name": name, "last_name": "Test", "position": "G" },
            "team": { "abbreviation": team },
            "pts": pts, "reb": 5, "ast": 3,
            "min": min
        });
        if let Some(flag) = starter {
            v["starter"] = json!(flag);
        }
        v
    }

    #[test]
    fn starter_flags_win_over_minutes() {
        let stats = vec![
            stat_line("A", "ATL", 30, "10:00", Some(false)),
            stat_line("B", "ATL", 5, "38:00", Some(true)),
        ];
        let starters = starters_from_stats(&stats);
        assert_eq!(starters.len(), 1);
        assert_eq!(starters[0].name, "B Test");
    }

    #[test]
    fn minutes_fallback_picks_top_five() {
        let stats: Vec<Value> = (0..8)
            .map(|i| stat_line(&format!("P{i}"), "BOS", i, &format!("{:02}:00", 10 + i), None))
            .collect();
        let starters = starters_from_stats(&stats);
        assert_eq!(starters.len(), 5);
        // Highest-minute players survive: P3..P7.
        assert!(starters.iter().all(|p| p.pts >= 3));
    }

    #[test]
    fn starters_sort_by_team_then_points() {
        let stats = vec![
            stat_line("Low", "BOS", 8, "30:00", Some(true)),
            stat_line("High", "BOS", 25, "30:00", Some(true)),
            stat_line("Away", "ATL", 12, "30:00", Some(true)),
        ];
        let starters = starters_from_stats(&stats);
        let order: Vec<_> = starters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(order, vec!["Away Test", "High Test", "Low Test"]);
    }

    #[test]
    fn missing_position_renders_a_dash() {
        let mut line = stat_line("A", "ATL", 10, "20:00", Some(true));
        line["player"]["position"] = json!("");
        let starters = starters_from_stats(&[line]);
        assert_eq!(starters[0].pos, "—");
    }
}
