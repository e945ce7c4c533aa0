//! One learner's progress through a quiz, modelled as an explicit state
//! machine. The sync transitions are pure functions on [`SessionState`] so
//! navigation and answer capture are testable without a rendering harness or
//! a runtime; only submission touches the attempt store.

use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Attempt, Question, Quiz};
use crate::services::attempt_gate::AttemptGate;
use crate::services::attempt_service::AttemptStore;
use crate::services::scoring_service::{ScoreOutcome, ScoringService};

#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    Idle,
    Active {
        question_index: usize,
        answers: Vec<Option<usize>>,
    },
    Submitting {
        answers: Vec<usize>,
    },
    Result {
        attempt: Attempt,
    },
    SubmissionFailed {
        answers: Vec<usize>,
        error: AppError,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    SelectAnswer { choice_index: usize },
    Next,
    Retry,
    Reset,
}

impl SessionState {
    /// Apply a synchronous event. Events that are invalid in the current
    /// state are disabled actions in the UI, so they leave the state
    /// unchanged rather than failing.
    pub fn apply(self, quiz: &Quiz, event: SessionEvent) -> SessionState {
        match (self, event) {
            (
                SessionState::Active {
                    question_index,
                    mut answers,
                },
                SessionEvent::SelectAnswer { choice_index },
            ) => {
                let in_range = quiz
                    .questions
                    .get(question_index)
                    .is_some_and(|q| choice_index < q.choices.len());
                if in_range {
                    answers[question_index] = Some(choice_index);
                }
                SessionState::Active {
                    question_index,
                    answers,
                }
            }

            (
                SessionState::Active {
                    question_index,
                    answers,
                },
                SessionEvent::Next,
            ) => {
                let answered = answers.get(question_index).copied().flatten().is_some();
                let has_next = question_index + 1 < answers.len();
                let question_index = if answered && has_next {
                    question_index + 1
                } else {
                    question_index
                };
                SessionState::Active {
                    question_index,
                    answers,
                }
            }

            (SessionState::SubmissionFailed { answers, error }, SessionEvent::Retry) => {
                if error.is_retryable() {
                    // back to the last question with every answer intact;
                    // the learner re-submits the identical vector
                    let question_index = answers.len().saturating_sub(1);
                    let answers = answers.into_iter().map(Some).collect();
                    SessionState::Active {
                        question_index,
                        answers,
                    }
                } else {
                    // a terminal failure (e.g. attempts exhausted) keeps the
                    // session out of Active, so submit can never run again
                    SessionState::SubmissionFailed { answers, error }
                }
            }

            (_, SessionEvent::Reset) => SessionState::Idle,

            (state, _) => state,
        }
    }
}

pub struct QuizSession {
    quiz: Quiz,
    user_id: String,
    store: Arc<dyn AttemptStore>,
    state: SessionState,
}

impl QuizSession {
    pub fn new(quiz: Quiz, user_id: &str, store: Arc<dyn AttemptStore>) -> Self {
        Self {
            quiz,
            user_id: user_id.to_string(),
            store,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// The question under the cursor, when the session is active.
    pub fn current_question(&self) -> Option<(usize, &Question)> {
        match &self.state {
            SessionState::Active { question_index, .. } => self
                .quiz
                .questions
                .get(*question_index)
                .map(|q| (*question_index, q)),
            _ => None,
        }
    }

    /// Begin the attempt. The quiz must be structurally valid, and the
    /// attempt gate must report the learner eligible; the gate check here is
    /// an optimistic pre-check, re-run authoritatively by the store on
    /// submission.
    pub async fn start(&mut self) -> AppResult<()> {
        if self.state != SessionState::Idle {
            return Ok(());
        }

        self.quiz.validate()?;

        let limit = i64::from(self.quiz.max_attempts.max(1));
        let (prior, _) = self
            .store
            .list_attempts(&self.quiz.id, &self.user_id, 0, limit)
            .await?;

        if !AttemptGate::can_start(&self.quiz, &prior) {
            return Err(AppError::AttemptsExhausted(format!(
                "user '{}' may not start quiz '{}'",
                self.user_id, self.quiz.id
            )));
        }

        self.state = SessionState::Active {
            question_index: 0,
            answers: vec![None; self.quiz.questions.len()],
        };
        Ok(())
    }

    /// Record an answer for the current question without advancing.
    /// Re-selection overwrites freely; there is no penalty before submission.
    pub fn select_answer(&mut self, choice_index: usize) {
        self.apply(SessionEvent::SelectAnswer { choice_index });
    }

    /// Advance the cursor. A no-op before the current question is answered
    /// or when already on the last question.
    pub fn next(&mut self) {
        self.apply(SessionEvent::Next);
    }

    /// Submit the completed answer vector. Incompleteness is caught locally
    /// before any network call; store failures land in `SubmissionFailed`
    /// with the answers preserved. Once sent there is no cancellation.
    pub async fn submit(&mut self) -> AppResult<()> {
        let answers = match &self.state {
            SessionState::Active { answers, .. } => {
                if let Some(question_index) = answers.iter().position(|a| a.is_none()) {
                    return Err(AppError::IncompleteAttempt { question_index });
                }
                answers.iter().map(|a| a.unwrap_or_default()).collect::<Vec<usize>>()
            }
            // re-entrant or out-of-state submits are disabled actions
            _ => return Ok(()),
        };

        self.state = SessionState::Submitting {
            answers: answers.clone(),
        };

        match self
            .store
            .submit_attempt(&self.quiz.id, &self.user_id, &answers)
            .await
        {
            Ok(attempt) => {
                self.state = SessionState::Result { attempt };
                Ok(())
            }
            Err(error) => {
                self.state = SessionState::SubmissionFailed {
                    answers,
                    error: error.clone(),
                };
                Err(error)
            }
        }
    }

    /// After a transient failure, return to `Active` with every answer
    /// preserved so the identical vector can be re-sent. A no-op for
    /// non-retryable failures: those end the session.
    pub fn retry(&mut self) {
        self.apply(SessionEvent::Retry);
    }

    /// Dismiss the session. Nothing is persisted; in-memory answers are
    /// discarded.
    pub fn reset(&mut self) {
        self.apply(SessionEvent::Reset);
    }

    /// Local per-question correctness for the completed answer vector, so
    /// result views can highlight individual questions without another
    /// round trip. Scoring here mirrors the store exactly.
    pub fn feedback(&self) -> AppResult<ScoreOutcome> {
        match &self.state {
            SessionState::Active { answers, .. } => ScoringService::score(&self.quiz, answers),
            SessionState::Submitting { answers }
            | SessionState::SubmissionFailed { answers, .. } => {
                let answers: Vec<Option<usize>> = answers.iter().copied().map(Some).collect();
                ScoringService::score(&self.quiz, &answers)
            }
            _ => Err(AppError::Validation(
                "no answers to score in this session state".to_string(),
            )),
        }
    }

    fn apply(&mut self, event: SessionEvent) {
        let state = std::mem::replace(&mut self.state, SessionState::Idle);
        self.state = state.apply(&self.quiz, event);
    }
}
