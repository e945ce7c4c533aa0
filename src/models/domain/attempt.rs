use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One scored submission of answers to a quiz. Immutable once created;
/// `score` and `passed` are frozen at submission time, so later edits to the
/// quiz never rewrite history.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Attempt {
    pub id: String,
    pub quiz_id: String,
    /// Owning course of the quiz at submission time, kept on the record so
    /// the analytics grouping does not depend on the live quiz.
    pub course_id: String,
    pub user_id: String,
    /// 1-based, contiguous per (quiz, user) pair.
    pub attempt_number: i16,
    /// Percentage 0..=100, rounded half-up.
    pub score: i16,
    pub passed: bool,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Attempt {
    pub fn new(
        quiz_id: &str,
        course_id: &str,
        user_id: &str,
        attempt_number: i16,
        score: i16,
        passed: bool,
    ) -> Self {
        Attempt {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            course_id: course_id.to_string(),
            user_id: user_id.to_string(),
            attempt_number,
            score,
            passed,
            submitted_at: Utc::now(),
            created_at: Some(Utc::now()),
        }
    }
}

/// An attempt joined with denormalized course and user metadata, as produced
/// by the storage-side lookup. This is the input shape for the admin
/// analytics aggregation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnrichedAttempt {
    pub id: String,
    pub quiz_id: String,
    pub course_id: String,
    pub user_id: String,
    pub attempt_number: i16,
    pub score: i16,
    pub passed: bool,
    pub submitted_at: DateTime<Utc>,
    pub course_name: String,
    pub course_active: bool,
    pub user_name: String,
    pub user_email: String,
}
