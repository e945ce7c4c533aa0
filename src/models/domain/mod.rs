pub mod attempt;
pub mod course;
pub mod quiz;
pub mod user;
pub use attempt::{Attempt, EnrichedAttempt};
pub use course::Course;
pub use quiz::{Question, Quiz};
pub use user::User;
