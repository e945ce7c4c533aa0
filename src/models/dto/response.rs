use serde::Serialize;

use crate::models::domain::Attempt;

#[derive(Debug, Serialize)]
pub struct AttemptPage {
    pub attempts: Vec<Attempt>,
    pub total: i64,
    /// Attempts the learner may still start, after the ones listed here.
    pub remaining_attempts: i16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempt_page_serializes_remaining_attempts() {
        let page = AttemptPage {
            attempts: vec![Attempt::new("quiz-1", "course-1", "user-1", 1, 50, false)],
            total: 1,
            remaining_attempts: 2,
        };

        let json = serde_json::to_value(&page).expect("page should serialize");
        assert_eq!(json["total"], 1);
        assert_eq!(json["remaining_attempts"], 2);
    }
}
