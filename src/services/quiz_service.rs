use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Quiz,
    models::dto::request::SaveQuizRequest,
    repositories::QuizRepository,
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        let quiz = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        Ok(quiz)
    }

    /// Fetch a quiz and require it to be structurally valid. Drafts that fail
    /// validation can be stored and edited but not taken by a learner.
    pub async fn open_for_session(&self, id: &str) -> AppResult<Quiz> {
        let quiz = self.get_quiz(id).await?;
        quiz.validate()?;
        Ok(quiz)
    }

    /// Persist a quiz, replacing the stored question list wholesale. No
    /// structural validation: admins may save incomplete drafts.
    pub async fn save_quiz(&self, id: &str, request: SaveQuizRequest) -> AppResult<Quiz> {
        request.validate()?;
        let quiz = request.into_quiz(id);
        self.repository.upsert(quiz).await
    }

    pub async fn list_by_course(
        &self,
        course_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        self.repository.list_by_course(course_id, offset, limit).await
    }
}
