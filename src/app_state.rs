use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        AttemptRepository, MongoAttemptRepository, MongoQuizRepository, QuizRepository,
    },
    services::{AnalyticsService, AttemptService, QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub attempt_service: Arc<AttemptService>,
    pub analytics_service: Arc<AnalyticsService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let attempt_repository = Arc::new(MongoAttemptRepository::new(&db));
        attempt_repository.ensure_indexes().await?;

        Ok(Self::from_repositories(
            quiz_repository,
            attempt_repository,
            config,
        ))
    }

    /// Wire services over arbitrary repository implementations. Used by the
    /// integration tests with in-memory repositories.
    pub fn from_repositories(
        quiz_repository: Arc<dyn QuizRepository>,
        attempt_repository: Arc<dyn AttemptRepository>,
        config: Config,
    ) -> Self {
        let quiz_service = Arc::new(QuizService::new(quiz_repository.clone()));
        let attempt_service = Arc::new(AttemptService::new(
            quiz_repository,
            attempt_repository.clone(),
        ));
        let analytics_service = Arc::new(AnalyticsService::new(attempt_repository));

        Self {
            quiz_service,
            attempt_service,
            analytics_service,
            config: Arc::new(config),
        }
    }
}
