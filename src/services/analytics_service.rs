use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::Serialize;

use crate::errors::AppResult;
use crate::models::domain::EnrichedAttempt;
use crate::repositories::AttemptRepository;

pub const EXCELLENCE_SCORE: i16 = 90;

/// Dashboard statistics derived from a set of attempts. Never stored;
/// recomputed from scratch on every request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalyticsSnapshot {
    pub total_users: usize,
    pub total_attempts: usize,
    pub pass_rate: f64,
    pub avg_score: f64,
    pub course_breakdown: Vec<CourseBreakdown>,
    pub distribution: ScoreDistribution,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CourseBreakdown {
    pub course_id: String,
    pub course_name: String,
    pub active: bool,
    pub attempt_count: usize,
    pub pass_rate: f64,
}

/// Overlapping lenses on the same attempt set. Each share is an independent
/// percentage of `total_attempts`; retaking and excellence are not a
/// partition of passed/failed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreDistribution {
    pub passed_pct: f64,
    pub failed_pct: f64,
    pub retaking_pct: f64,
    pub excellence_pct: f64,
}

pub struct AnalyticsService {
    attempt_repository: Arc<dyn AttemptRepository>,
}

impl AnalyticsService {
    pub fn new(attempt_repository: Arc<dyn AttemptRepository>) -> Self {
        Self { attempt_repository }
    }

    pub async fn dashboard(&self, active_courses_only: bool) -> AppResult<AnalyticsSnapshot> {
        let attempts = self.attempt_repository.list_all_enriched().await?;
        log::debug!(
            "aggregating {} attempts (active_courses_only={})",
            attempts.len(),
            active_courses_only
        );
        Ok(Self::aggregate(&attempts, active_courses_only))
    }

    /// Fold an enriched attempt set into dashboard statistics. Pure and
    /// total: empty and degenerate inputs produce zero rates, never errors.
    ///
    /// `active_courses_only` drops attempts from inactive courses before
    /// anything is counted, so it changes every rate's denominator.
    pub fn aggregate(attempts: &[EnrichedAttempt], active_courses_only: bool) -> AnalyticsSnapshot {
        let filtered: Vec<&EnrichedAttempt> = attempts
            .iter()
            .filter(|a| !active_courses_only || a.course_active)
            .collect();

        let total_attempts = filtered.len();
        let total_users = filtered
            .iter()
            .map(|a| a.user_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        let passed_count = filtered.iter().filter(|a| a.passed).count();
        let retaking_count = filtered.iter().filter(|a| a.attempt_number > 1).count();
        let excellence_count = filtered
            .iter()
            .filter(|a| a.score >= EXCELLENCE_SCORE)
            .count();
        let score_sum: i64 = filtered.iter().map(|a| a.score as i64).sum();

        let pass_rate = percentage(passed_count, total_attempts);
        let avg_score = if total_attempts == 0 {
            0.0
        } else {
            score_sum as f64 / total_attempts as f64
        };

        let distribution = ScoreDistribution {
            passed_pct: pass_rate,
            failed_pct: percentage(total_attempts - passed_count, total_attempts),
            retaking_pct: percentage(retaking_count, total_attempts),
            excellence_pct: percentage(excellence_count, total_attempts),
        };

        // BTreeMap keeps the breakdown ordered by course id
        let mut groups: BTreeMap<&str, Vec<&EnrichedAttempt>> = BTreeMap::new();
        for attempt in filtered.iter().copied() {
            groups.entry(attempt.course_id.as_str()).or_default().push(attempt);
        }

        let course_breakdown = groups
            .into_iter()
            .map(|(course_id, members)| {
                let passed = members.iter().filter(|a| a.passed).count();
                // all members share the course, so any of them carries the
                // current name and active flag
                let first = members[0];
                CourseBreakdown {
                    course_id: course_id.to_string(),
                    course_name: first.course_name.clone(),
                    active: first.course_active,
                    attempt_count: members.len(),
                    pass_rate: percentage(passed, members.len()),
                }
            })
            .collect();

        AnalyticsSnapshot {
            total_users,
            total_attempts,
            pass_rate,
            avg_score,
            course_breakdown,
            distribution,
        }
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}
