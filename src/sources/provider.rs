use async_trait::async_trait;

use crate::models::{HeadToHead, Schedule, ScheduleMode, TeamTrend};

/// Schedule listing for one sport.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Assemble the schedule for a date window. Upstream failures surface
    /// as empty rows, never as errors.
    async fn schedule(&self, team_id: Option<i64>, days: u32, mode: ScheduleMode) -> Schedule;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Recent-form lookups for one sport.
#[async_trait]
pub trait TrendSource: Send + Sync {
    /// Up to `limit` most recent completed games for the team, oldest
    /// first. No qualifying games yields an empty trend.
    async fn team_trend(&self, team_id: i64, limit: usize) -> TeamTrend;
}

/// Head-to-head history between two teams.
#[async_trait]
pub trait HeadToHeadSource: Send + Sync {
    /// Completed meetings between exactly these two teams, oriented so
    /// `team_a` is always the same side, trimmed to the last `limit`.
    async fn head_to_head(
        &self,
        team_a: i64,
        team_b: i64,
        label_a: &str,
        label_b: &str,
        limit: usize,
    ) -> HeadToHead;
}
