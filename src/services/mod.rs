pub mod analytics_service;
pub mod attempt_gate;
pub mod attempt_service;
pub mod quiz_service;
pub mod scoring_service;

pub use analytics_service::{AnalyticsService, AnalyticsSnapshot};
pub use attempt_gate::AttemptGate;
pub use attempt_service::{AttemptService, AttemptStore};
pub use quiz_service::QuizService;
pub use scoring_service::{ScoreOutcome, ScoringService};
