use crate::models::domain::{Attempt, Question, Quiz};
