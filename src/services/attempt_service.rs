use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Attempt, EnrichedAttempt},
    repositories::{AttemptRepository, QuizRepository},
    services::attempt_gate::AttemptGate,
    services::scoring_service::ScoringService,
};

/// The attempt-storage operations the rest of the system consumes. The
/// session talks to this seam, never to repositories, so a client-side
/// session and the server-side flow share one contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptStore: Send + Sync {
    async fn submit_attempt(
        &self,
        quiz_id: &str,
        user_id: &str,
        answers: &[usize],
    ) -> AppResult<Attempt>;
    async fn list_attempts(
        &self,
        quiz_id: &str,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Attempt>, i64)>;
    async fn list_all_attempts(&self) -> AppResult<Vec<EnrichedAttempt>>;
}

pub struct AttemptService {
    quiz_repository: Arc<dyn QuizRepository>,
    attempt_repository: Arc<dyn AttemptRepository>,
}

impl AttemptService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        attempt_repository: Arc<dyn AttemptRepository>,
    ) -> Self {
        Self {
            quiz_repository,
            attempt_repository,
        }
    }

    /// Authoritative submission flow. Clients run the same gate as an
    /// optimistic pre-check, but only this path decides whether an attempt is
    /// recorded; under a two-tab race the later submission fails here even
    /// though its client-side gate passed.
    pub async fn submit_attempt(
        &self,
        quiz_id: &str,
        user_id: &str,
        answers: &[usize],
    ) -> AppResult<Attempt> {
        let quiz = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        quiz.validate()?;

        if answers.len() != quiz.questions.len() {
            return Err(AppError::Validation(format!(
                "expected {} answers, got {}",
                quiz.questions.len(),
                answers.len()
            )));
        }

        let prior = self
            .attempt_repository
            .find_by_user_and_quiz(user_id, quiz_id)
            .await?;

        if prior.iter().any(|a| a.passed) {
            return Err(AppError::AttemptsExhausted(format!(
                "user '{}' has already passed quiz '{}'",
                user_id, quiz_id
            )));
        }
        if AttemptGate::remaining_attempts(&quiz, &prior) == 0 {
            return Err(AppError::AttemptsExhausted(format!(
                "no attempts remaining for quiz '{}' (limit {})",
                quiz_id, quiz.max_attempts
            )));
        }

        let answered: Vec<Option<usize>> = answers.iter().copied().map(Some).collect();
        let outcome = ScoringService::score(&quiz, &answered)?;

        let attempt_number = prior.len() as i16 + 1;
        let attempt = Attempt::new(
            quiz_id,
            &quiz.course_id,
            user_id,
            attempt_number,
            outcome.score,
            outcome.passed,
        );

        log::info!(
            "recording attempt {} for user '{}' on quiz '{}': score {} ({})",
            attempt_number,
            user_id,
            quiz_id,
            outcome.score,
            if outcome.passed { "passed" } else { "failed" }
        );

        self.attempt_repository.create(attempt).await
    }

    pub async fn list_attempts(
        &self,
        quiz_id: &str,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Attempt>, i64)> {
        self.attempt_repository
            .get_user_attempts(user_id, quiz_id, offset, limit)
            .await
    }

    /// Remaining attempts for a learner, for the pre-submission UI.
    pub async fn remaining_attempts(&self, quiz_id: &str, user_id: &str) -> AppResult<i16> {
        let quiz = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        let prior = self
            .attempt_repository
            .find_by_user_and_quiz(user_id, quiz_id)
            .await?;

        Ok(AttemptGate::remaining_attempts(&quiz, &prior))
    }
}

#[async_trait]
impl AttemptStore for AttemptService {
    async fn submit_attempt(
        &self,
        quiz_id: &str,
        user_id: &str,
        answers: &[usize],
    ) -> AppResult<Attempt> {
        AttemptService::submit_attempt(self, quiz_id, user_id, answers).await
    }

    async fn list_attempts(
        &self,
        quiz_id: &str,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Attempt>, i64)> {
        AttemptService::list_attempts(self, quiz_id, user_id, offset, limit).await
    }

    async fn list_all_attempts(&self) -> AppResult<Vec<EnrichedAttempt>> {
        self.attempt_repository.list_all_enriched().await
    }
}
