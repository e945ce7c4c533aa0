use serde::Deserialize;
use validator::Validate;

use crate::models::domain::{Question, Quiz};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAttemptRequest {
    #[validate(length(min = 1))]
    pub user_id: String,

    /// One selected choice index per question, in quiz order.
    pub answers: Vec<usize>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveQuizRequest {
    #[validate(length(min = 1))]
    pub course_id: String,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// May be structurally incomplete: drafts are saved without validation.
    pub questions: Vec<QuestionInput>,

    #[validate(range(min = 1))]
    pub max_attempts: i16,

    #[validate(range(min = 0, max = 100))]
    pub passing_threshold: i16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionInput {
    pub text: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
}

impl SaveQuizRequest {
    pub fn into_quiz(self, id: &str) -> Quiz {
        let questions = self
            .questions
            .into_iter()
            .map(|q| Question {
                text: q.text,
                choices: q.choices,
                correct_index: q.correct_index,
            })
            .collect();

        let mut quiz = Quiz::new(&self.course_id, &self.title, questions);
        quiz.id = id.to_string();
        quiz.max_attempts = self.max_attempts;
        quiz.passing_threshold = self.passing_threshold;
        quiz
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListAttemptsQuery {
    pub user_id: String,
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(default)]
    pub active_courses_only: bool,
}
