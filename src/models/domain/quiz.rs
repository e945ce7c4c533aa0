use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_MAX_ATTEMPTS: i16 = 3;
pub const DEFAULT_PASSING_THRESHOLD: i16 = 70;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub course_id: String,
    pub title: String,
    /// Stored order is the presentation order and the answer-index order.
    pub questions: Vec<Question>,
    pub max_attempts: i16,
    pub passing_threshold: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub text: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
}

impl Quiz {
    pub fn new(course_id: &str, title: &str, questions: Vec<Question>) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            title: title.to_string(),
            questions,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            passing_threshold: DEFAULT_PASSING_THRESHOLD,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    /// Structural well-formedness check. A quiz that fails here may still be
    /// persisted as a draft; it cannot be opened for a learner session.
    pub fn validate(&self) -> AppResult<()> {
        if self.questions.is_empty() {
            return Err(AppError::MalformedQuiz(format!(
                "quiz '{}' has no questions",
                self.id
            )));
        }

        for (index, question) in self.questions.iter().enumerate() {
            if question.text.trim().is_empty() {
                return Err(AppError::MalformedQuiz(format!(
                    "question {} has empty text",
                    index
                )));
            }
            if question.choices.len() < 2 {
                return Err(AppError::MalformedQuiz(format!(
                    "question {} has fewer than 2 choices",
                    index
                )));
            }
            if question.correct_index >= question.choices.len() {
                return Err(AppError::MalformedQuiz(format!(
                    "question {} has correct_index {} out of range for {} choices",
                    index,
                    question.correct_index,
                    question.choices.len()
                )));
            }
        }

        Ok(())
    }
}
