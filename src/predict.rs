//! Heuristic win-probability estimates for the game pages.
//!
//! Two regimes: an in-play shift of 3 points of probability per point of
//! scoring margin, and a pre-game logistic blend of each team's recent
//! net rating with a small home-court edge. Both are rules of thumb the
//! dashboard labels as such, not fitted models, and the constants are
//! deliberately left as stated.

use crate::models::{TeamTrend, WinProbability};

/// Probability shift per point of in-play scoring margin.
const LIVE_POINT_WEIGHT: f64 = 3.0;
/// Flat pre-game bonus for the home side, in net-rating points.
const HOME_EDGE: f64 = 2.0;
/// Logistic divisor: a 6-point net-rating gap ≈ 75/25.
const LOGISTIC_SCALE: f64 = 6.0;
/// Clamp band keeping the estimate away from certainty claims.
const MIN_PCT: f64 = 5.0;
const MAX_PCT: f64 = 95.0;
/// Gap (in percentage points) under which no side is picked.
const TOO_CLOSE_MARGIN: f64 = 3.0;
/// Split returned when neither team has usable trend data.
const FALLBACK_HOME_PCT: f64 = 55.0;

/// Status fragments that mark a game as currently in play.
const LIVE_MARKERS: &[&str] = &[
    "progress", "quarter", "1st", "2nd", "3rd", "4th", "ot", "half", "live",
];

/// Estimate the win-probability split for a game.
///
/// Stateless: the same inputs always produce the same split. `home_label`
/// and `away_label` feed the pick string.
pub fn estimate(
    status: &str,
    home_score: i32,
    away_score: i32,
    trend_home: &TeamTrend,
    trend_away: &TeamTrend,
    home_label: &str,
    away_label: &str,
) -> WinProbability {
    let status_lower = status.to_lowercase();

    if LIVE_MARKERS.iter().any(|m| status_lower.contains(m)) {
        let base = 50.0 + LIVE_POINT_WEIGHT * f64::from(home_score - away_score);
        return split(
            base.clamp(MIN_PCT, MAX_PCT),
            "Heuristic based on current score (not final result).",
            home_label,
            away_label,
        );
    }

    match (trend_home.net_rating(), trend_away.net_rating()) {
        (Some(home_net), Some(away_net)) => {
            let diff = home_net - away_net + HOME_EDGE;
            let home_pct = (100.0 * sigmoid(diff / LOGISTIC_SCALE)).clamp(MIN_PCT, MAX_PCT);
            split(
                home_pct,
                "Pre-game estimate from each team's recent scoring form plus a home-court edge.",
                home_label,
                away_label,
            )
        }
        _ => split(
            FALLBACK_HOME_PCT,
            "Home-edge default; recent game data unavailable.",
            home_label,
            away_label,
        ),
    }
}

/// Round the home half to a whole number and derive away as the
/// complement, so the two always sum to exactly 100.
fn split(home_pct_raw: f64, note: &str, home_label: &str, away_label: &str) -> WinProbability {
    let home_pct = home_pct_raw.round();
    let away_pct = 100.0 - home_pct;
    let pick = if (home_pct - away_pct).abs() < TOO_CLOSE_MARGIN {
        "Too close to call".to_string()
    } else if home_pct > away_pct {
        home_label.to_string()
    } else {
        away_label.to_string()
    };
    WinProbability {
        home_pct,
        away_pct,
        note: note.to_string(),
        pick,
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamTrend;
    use approx::assert_relative_eq;

    fn trend(avg_for: i32, avg_against: i32) -> TeamTrend {
        // Five identical games pin the averages exactly.
        TeamTrend::from_games(
            (0..5)
                .map(|i| (format!("01-0{}", i + 1), avg_for, avg_against))
                .collect(),
        )
    }

    #[test]
    fn live_home_lead_of_ten_splits_80_20() {
        let wp = estimate("In Progress", 60, 50, &TeamTrend::default(), &TeamTrend::default(), "Home", "Away");
        assert_relative_eq!(wp.home_pct, 80.0, epsilon = 1e-9);
        assert_relative_eq!(wp.away_pct, 20.0, epsilon = 1e-9);
        assert_eq!(wp.pick, "Home");
    }

    #[test]
    fn live_blowout_hits_the_clamp() {
        let wp = estimate("4th Qtr", 120, 80, &TeamTrend::default(), &TeamTrend::default(), "Home", "Away");
        assert_relative_eq!(wp.home_pct, 95.0, epsilon = 1e-9);
        assert_relative_eq!(wp.away_pct, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn live_away_lead_mirrors() {
        let wp = estimate("3rd Qtr", 50, 55, &TeamTrend::default(), &TeamTrend::default(), "Home", "Away");
        assert_relative_eq!(wp.home_pct, 35.0, epsilon = 1e-9);
        assert_eq!(wp.pick, "Away");
    }

    #[test]
    fn strong_form_gap_clamps_at_95() {
        // (110, 100) vs (100, 108): diff = 10 - (-8) + 2 = 20, and the
        // logistic at 20/6 lands near 96.5% before the clamp.
        let wp = estimate("Scheduled", 0, 0, &trend(110, 100), &trend(100, 108), "Hawks", "Celtics");
        assert_relative_eq!(wp.home_pct, 95.0, epsilon = 1e-9);
        assert_relative_eq!(wp.away_pct, 5.0, epsilon = 1e-9);
        assert_eq!(wp.pick, "Hawks");
    }

    #[test]
    fn even_teams_lean_home_by_the_edge() {
        // Equal net ratings: diff = +2, sigmoid(1/3) ≈ 0.5826.
        let wp = estimate("Scheduled", 0, 0, &trend(100, 95), &trend(100, 95), "Home", "Away");
        assert_relative_eq!(wp.home_pct, 58.0, epsilon = 1e-9);
        assert_relative_eq!(wp.away_pct, 42.0, epsilon = 1e-9);
    }

    #[test]
    fn missing_trends_fall_back_to_55_45() {
        let wp = estimate("Final", 0, 0, &TeamTrend::default(), &TeamTrend::default(), "Home", "Away");
        assert_relative_eq!(wp.home_pct, 55.0, epsilon = 1e-9);
        assert_relative_eq!(wp.away_pct, 45.0, epsilon = 1e-9);
        assert!(wp.note.contains("unavailable"));
    }

    #[test]
    fn one_sided_trend_data_also_falls_back() {
        let wp = estimate("Scheduled", 0, 0, &trend(100, 95), &TeamTrend::default(), "Home", "Away");
        assert_relative_eq!(wp.home_pct, 55.0, epsilon = 1e-9);
    }

    #[test]
    fn narrow_gap_is_too_close_to_call() {
        // Slight away lean: diff = -2, home ≈ 41.7% → 42/58 is picked;
        // build a truly narrow one instead: home_net - away_net = -2
        // cancels the home edge exactly → 50/50.
        let wp = estimate("Scheduled", 0, 0, &trend(100, 98), &trend(104, 100), "Home", "Away");
        assert_relative_eq!(wp.home_pct, 50.0, epsilon = 1e-9);
        assert_eq!(wp.pick, "Too close to call");
    }

    #[test]
    fn live_tied_game_is_too_close_to_call() {
        let wp = estimate("Halftime", 44, 44, &TeamTrend::default(), &TeamTrend::default(), "Home", "Away");
        assert_relative_eq!(wp.home_pct, 50.0, epsilon = 1e-9);
        assert_eq!(wp.pick, "Too close to call");
    }

    #[test]
    fn halves_always_sum_to_100_within_band() {
        let trends = [trend(110, 100), trend(95, 110), TeamTrend::default()];
        let statuses = ["Scheduled", "Final", "In Progress", "2nd Qtr"];
        for status in statuses {
            for home_score in [0, 3, 17, 40] {
                for away_score in [0, 5, 21] {
                    for th in &trends {
                        for ta in &trends {
                            let wp = estimate(status, home_score, away_score, th, ta, "H", "A");
                            assert_relative_eq!(wp.home_pct + wp.away_pct, 100.0, epsilon = 1e-9);
                            assert_relative_eq!(wp.home_pct, wp.home_pct.round(), epsilon = 1e-9);
                            assert!(
                                (MIN_PCT..=MAX_PCT).contains(&wp.home_pct),
                                "home_pct out of band: {} ({status}, {home_score}-{away_score})",
                                wp.home_pct
                            );
                            assert!((MIN_PCT..=MAX_PCT).contains(&wp.away_pct));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn sigmoid_is_centered_and_bounded() {
        assert_relative_eq!(sigmoid(0.0), 0.5, epsilon = 1e-9);
        assert!(sigmoid(6.0) > 0.99);
        assert!(sigmoid(-6.0) < 0.01);
    }
}
