pub mod analytics_handler;
pub mod attempt_handler;
pub mod quiz_handler;

pub use analytics_handler::get_analytics;
pub use attempt_handler::{list_attempts, submit_attempt};
pub use quiz_handler::{get_quiz, health_check, list_course_quizzes, save_quiz};
