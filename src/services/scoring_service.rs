use crate::errors::{AppError, AppResult};
use crate::models::domain::Quiz;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreOutcome {
    /// Percentage 0..=100, rounded half-up.
    pub score: i16,
    pub passed: bool,
    pub per_question_correct: Vec<bool>,
}

pub struct ScoringService;

impl ScoringService {
    /// Score an answer vector against a quiz. Pure and deterministic: the
    /// same quiz and answers always produce the same outcome, and nothing is
    /// persisted here.
    ///
    /// `answers` carries one entry per question in quiz order; `None` marks a
    /// question the learner has not answered yet.
    pub fn score(quiz: &Quiz, answers: &[Option<usize>]) -> AppResult<ScoreOutcome> {
        let total = quiz.questions.len();
        if total == 0 {
            return Err(AppError::MalformedQuiz(format!(
                "quiz '{}' has no questions to score",
                quiz.id
            )));
        }
        if answers.len() != total {
            return Err(AppError::Validation(format!(
                "expected {} answers, got {}",
                total,
                answers.len()
            )));
        }

        if let Some(question_index) = answers.iter().position(|a| a.is_none()) {
            return Err(AppError::IncompleteAttempt { question_index });
        }

        let per_question_correct: Vec<bool> = quiz
            .questions
            .iter()
            .zip(answers)
            .map(|(question, answer)| *answer == Some(question.correct_index))
            .collect();

        let correct = per_question_correct.iter().filter(|c| **c).count();

        // round half up: round(100 * correct / total)
        let score = ((200 * correct + total) / (2 * total)) as i16;
        let passed = score >= quiz.passing_threshold;

        Ok(ScoreOutcome {
            score,
            passed,
            per_question_correct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Question;

    fn quiz_with_questions(count: usize, passing_threshold: i16) -> Quiz {
        let questions = (0..count)
            .map(|i| Question {
                text: format!("Question {}", i),
                choices: vec![
                    "a".to_string(),
                    "b".to_string(),
                    "c".to_string(),
                    "d".to_string(),
                ],
                correct_index: i % 4,
            })
            .collect();

        let mut quiz = Quiz::new("course-1", "Scoring quiz", questions);
        quiz.passing_threshold = passing_threshold;
        quiz
    }

    fn all_correct_answers(quiz: &Quiz) -> Vec<Option<usize>> {
        quiz.questions
            .iter()
            .map(|q| Some(q.correct_index))
            .collect()
    }

    #[test]
    fn all_correct_answers_score_one_hundred() {
        let quiz = quiz_with_questions(4, 70);
        let outcome =
            ScoringService::score(&quiz, &all_correct_answers(&quiz)).expect("should score");

        assert_eq!(outcome.score, 100);
        assert!(outcome.passed);
        assert_eq!(outcome.per_question_correct, vec![true; 4]);
    }

    #[test]
    fn half_correct_scores_fifty_and_fails_at_seventy() {
        let quiz = quiz_with_questions(4, 70);
        let mut answers = all_correct_answers(&quiz);
        // break the last two answers
        answers[2] = Some((quiz.questions[2].correct_index + 1) % 4);
        answers[3] = Some((quiz.questions[3].correct_index + 1) % 4);

        let outcome = ScoringService::score(&quiz, &answers).expect("should score");

        assert_eq!(outcome.score, 50);
        assert!(!outcome.passed);
        assert_eq!(outcome.per_question_correct, vec![true, true, false, false]);
    }

    #[test]
    fn score_rounds_half_up() {
        // 1 of 8 correct is 12.5, which rounds up to 13
        let quiz = quiz_with_questions(8, 70);
        let mut answers: Vec<Option<usize>> = quiz
            .questions
            .iter()
            .map(|q| Some((q.correct_index + 1) % 4))
            .collect();
        answers[0] = Some(quiz.questions[0].correct_index);

        let outcome = ScoringService::score(&quiz, &answers).expect("should score");

        assert_eq!(outcome.score, 13);
    }

    #[test]
    fn two_thirds_rounds_to_sixty_seven() {
        let quiz = quiz_with_questions(3, 70);
        let mut answers = all_correct_answers(&quiz);
        answers[0] = Some((quiz.questions[0].correct_index + 1) % 4);

        let outcome = ScoringService::score(&quiz, &answers).expect("should score");

        assert_eq!(outcome.score, 67);
        assert!(!outcome.passed);
    }

    #[test]
    fn passed_tracks_threshold_boundary() {
        let quiz = quiz_with_questions(4, 75);
        let mut answers = all_correct_answers(&quiz);
        answers[3] = Some((quiz.questions[3].correct_index + 1) % 4);

        // 3 of 4 correct is exactly 75
        let outcome = ScoringService::score(&quiz, &answers).expect("should score");

        assert_eq!(outcome.score, 75);
        assert!(outcome.passed);
    }

    #[test]
    fn unanswered_question_fails_with_first_missing_index() {
        let quiz = quiz_with_questions(4, 70);
        let mut answers = all_correct_answers(&quiz);
        answers[1] = None;
        answers[3] = None;

        let err = ScoringService::score(&quiz, &answers).expect_err("incomplete answers");

        assert!(matches!(
            err,
            AppError::IncompleteAttempt { question_index: 1 }
        ));
    }

    #[test]
    fn wrong_length_answer_vector_is_a_validation_error() {
        let quiz = quiz_with_questions(4, 70);
        let answers = vec![Some(0), Some(1)];

        let err = ScoringService::score(&quiz, &answers).expect_err("wrong length");

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn empty_quiz_cannot_be_scored() {
        let quiz = Quiz::new("course-1", "Empty", vec![]);

        let err = ScoringService::score(&quiz, &[]).expect_err("no questions");

        assert!(matches!(err, AppError::MalformedQuiz(_)));
    }

    #[test]
    fn scoring_is_idempotent() {
        let quiz = quiz_with_questions(5, 60);
        let mut answers = all_correct_answers(&quiz);
        answers[4] = Some((quiz.questions[4].correct_index + 1) % 4);

        let first = ScoringService::score(&quiz, &answers).expect("should score");
        let second = ScoringService::score(&quiz, &answers).expect("should score");

        assert_eq!(first, second);
    }

    #[test]
    fn score_stays_in_bounds_for_any_answer_vector() {
        let quiz = quiz_with_questions(7, 70);
        for shift in 0..4 {
            let answers: Vec<Option<usize>> = quiz
                .questions
                .iter()
                .map(|q| Some((q.correct_index + shift) % 4))
                .collect();

            let outcome = ScoringService::score(&quiz, &answers).expect("should score");

            assert!((0..=100).contains(&outcome.score));
            assert_eq!(outcome.passed, outcome.score >= quiz.passing_threshold);
        }
    }
}
