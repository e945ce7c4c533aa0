use crate::models::domain::{Attempt, Quiz};

/// Attempt-limit policy for one (quiz, user) pair.
///
/// This gate runs twice: once client-side as an optimistic pre-check before a
/// session starts, and once inside the submission flow where the store is
/// authoritative. Both sides share these rules so they can only disagree
/// under a race, which the submission flow resolves.
pub struct AttemptGate;

impl AttemptGate {
    /// `max_attempts` minus the attempts already recorded, clamped at zero.
    pub fn remaining_attempts(quiz: &Quiz, prior_attempts: &[Attempt]) -> i16 {
        let used = prior_attempts.len() as i16;
        (quiz.max_attempts - used).max(0)
    }

    /// Whether a new attempt may begin. A pass is sticky: once any prior
    /// attempt passed, the quiz is locked even with attempts remaining.
    pub fn can_start(quiz: &Quiz, prior_attempts: &[Attempt]) -> bool {
        if prior_attempts.iter().any(|a| a.passed) {
            return false;
        }
        Self::remaining_attempts(quiz, prior_attempts) > 0
    }

    /// The prior attempt with the highest attempt number, if any.
    pub fn latest_attempt<'a>(prior_attempts: &'a [Attempt]) -> Option<&'a Attempt> {
        prior_attempts.iter().max_by_key(|a| a.attempt_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz_with_max_attempts(max_attempts: i16) -> Quiz {
        let mut quiz = Quiz::new("course-1", "Gated quiz", vec![]);
        quiz.max_attempts = max_attempts;
        quiz
    }

    fn attempt(number: i16, score: i16, passed: bool) -> Attempt {
        Attempt::new("quiz-1", "course-1", "user-1", number, score, passed)
    }

    #[test]
    fn remaining_attempts_counts_down_from_max() {
        let quiz = quiz_with_max_attempts(3);

        assert_eq!(AttemptGate::remaining_attempts(&quiz, &[]), 3);
        assert_eq!(
            AttemptGate::remaining_attempts(&quiz, &[attempt(1, 40, false)]),
            2
        );
        assert_eq!(
            AttemptGate::remaining_attempts(
                &quiz,
                &[attempt(1, 40, false), attempt(2, 60, false)]
            ),
            1
        );
    }

    #[test]
    fn remaining_attempts_clamps_at_zero() {
        let quiz = quiz_with_max_attempts(1);
        let prior = vec![attempt(1, 40, false), attempt(2, 50, false)];

        assert_eq!(AttemptGate::remaining_attempts(&quiz, &prior), 0);
    }

    #[test]
    fn remaining_attempts_never_increases_as_attempts_accumulate() {
        let quiz = quiz_with_max_attempts(3);
        let mut prior = Vec::new();
        let mut previous = AttemptGate::remaining_attempts(&quiz, &prior);

        for number in 1..=5 {
            prior.push(attempt(number, 50, false));
            let current = AttemptGate::remaining_attempts(&quiz, &prior);
            assert!(current <= previous);
            assert!(current >= 0);
            previous = current;
        }
    }

    #[test]
    fn can_start_with_attempts_remaining_and_no_pass() {
        let quiz = quiz_with_max_attempts(3);
        let prior = vec![attempt(1, 40, false)];

        assert!(AttemptGate::can_start(&quiz, &prior));
    }

    #[test]
    fn single_failed_attempt_exhausts_max_attempts_of_one() {
        let quiz = quiz_with_max_attempts(1);
        let prior = vec![attempt(1, 40, false)];

        assert!(!AttemptGate::can_start(&quiz, &prior));
        assert_eq!(AttemptGate::remaining_attempts(&quiz, &prior), 0);
    }

    #[test]
    fn pass_locks_the_quiz_even_with_attempts_remaining() {
        let quiz = quiz_with_max_attempts(3);
        let prior = vec![attempt(1, 40, false), attempt(2, 85, true)];

        assert_eq!(AttemptGate::remaining_attempts(&quiz, &prior), 1);
        assert!(!AttemptGate::can_start(&quiz, &prior));
    }

    #[test]
    fn latest_attempt_is_highest_numbered() {
        let prior = vec![attempt(2, 60, false), attempt(1, 40, false)];

        let latest = AttemptGate::latest_attempt(&prior).expect("prior is non-empty");
        assert_eq!(latest.attempt_number, 2);
    }

    #[test]
    fn latest_attempt_of_empty_history_is_none() {
        assert!(AttemptGate::latest_attempt(&[]).is_none());
    }
}
