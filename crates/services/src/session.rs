use serde::{Deserialize, Serialize};

use exam_core::model::{
    AnswerValue, Exam, ExamId, ExpressionState, ExpressionUpdate, InputShape, Operator, Question,
    QuestionId,
};
use exam_core::time::{Clock, format_elapsed};

use crate::answer_store::AnswerStore;
use crate::debounce::RecomputeDebouncer;
use crate::error::SessionError;
use crate::expression::{compose, evaluate};

//
// ─── PHASE & VIEWS ─────────────────────────────────────────────────────────────
//

/// Lifecycle of an exam session. `InProgress` is re-entrant under question
/// navigation; `Submitted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    NotStarted,
    InProgress,
    Submitted,
}

/// Aggregated progress view for the question bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
}

/// What gets handed to the grading API when the session ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub exam_id: ExamId,
    /// One entry per question, in question order: the MCQ choice, the
    /// evaluated numeric string, or empty for unanswered.
    pub answers: Vec<String>,
    /// Elapsed time as `HH:MM:SS`.
    pub timer: String,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory controller for one sitting of a diagnostic exam.
///
/// Owns question navigation, the elapsed-second counter, the per-question
/// expression states and the recorded answers. Evaluation failures never
/// escape: they resolve to an empty answer so the session stays
/// submittable throughout.
#[derive(Debug, Clone)]
pub struct ExamSession {
    exam: Exam,
    clock: Clock,
    phase: SessionPhase,
    current_index: usize,
    elapsed_seconds: u64,
    store: AnswerStore,
    debouncer: RecomputeDebouncer,
}

impl ExamSession {
    #[must_use]
    pub fn new(exam: Exam, clock: Clock) -> Self {
        Self {
            exam,
            clock,
            phase: SessionPhase::NotStarted,
            current_index: 0,
            elapsed_seconds: 0,
            store: AnswerStore::new(),
            debouncer: RecomputeDebouncer::new(),
        }
    }

    #[must_use]
    pub fn exam(&self) -> &Exam {
        &self.exam
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Begin the sitting. Re-entrant while in progress.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitted` once the session ended.
    pub fn start(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::NotStarted => {
                self.phase = SessionPhase::InProgress;
                Ok(())
            }
            SessionPhase::InProgress => Ok(()),
            SessionPhase::Submitted => Err(SessionError::AlreadySubmitted),
        }
    }

    /// One second of exam time. Only counts while the session is active.
    pub fn tick(&mut self) {
        if self.phase == SessionPhase::InProgress {
            self.elapsed_seconds += 1;
        }
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Elapsed time as the `HH:MM:SS` string the header timer shows.
    #[must_use]
    pub fn formatted_elapsed(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }

    // ─── Navigation ────────────────────────────────────────────────────────

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The question currently on screen.
    ///
    /// # Panics
    ///
    /// Never panics: the exam is non-empty by construction and the index
    /// is clamped to the question range.
    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.exam.questions()[self.current_index]
    }

    pub fn next_question(&mut self) {
        if self.current_index + 1 < self.exam.total_questions() {
            self.current_index += 1;
        }
    }

    pub fn previous_question(&mut self) {
        self.current_index = self.current_index.saturating_sub(1);
    }

    /// Jump straight to a question by index.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::IndexOutOfRange` for an invalid index.
    pub fn goto_question(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.exam.total_questions() {
            return Err(SessionError::IndexOutOfRange(index));
        }
        self.current_index = index;
        Ok(())
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.exam.total_questions()
    }

    // ─── Answering ─────────────────────────────────────────────────────────

    /// Snapshot of a question's expression state (default when untouched).
    #[must_use]
    pub fn expression_state(&self, question_id: QuestionId) -> ExpressionState {
        self.store.state(question_id)
    }

    /// The answer currently recorded for a question.
    #[must_use]
    pub fn answer(&self, question_id: QuestionId) -> AnswerValue {
        self.store.answer(question_id)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.exam.total_questions(),
            answered: self.store.answered_count(),
        }
    }

    /// Record an MCQ choice directly, bypassing the expression pipeline.
    ///
    /// # Errors
    ///
    /// Fails when the session is not in progress or the question id is
    /// not part of this exam.
    pub fn select_mcq_answer(
        &mut self,
        question_id: QuestionId,
        choice: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.ensure_mutable(question_id)?;
        self.store
            .set_answer(question_id, AnswerValue::Choice(choice.into()));
        Ok(())
    }

    /// Select an operator for a question, resetting its input slots.
    /// Constants take effect immediately; everything else waits for input.
    ///
    /// # Errors
    ///
    /// Fails when the session is not in progress or the question id is
    /// not part of this exam.
    pub fn select_operator(
        &mut self,
        question_id: QuestionId,
        operator: &'static Operator,
    ) -> Result<(), SessionError> {
        self.ensure_mutable(question_id)?;
        self.store
            .update(question_id, ExpressionUpdate::select_operator(operator));
        self.debouncer.cancel(question_id);

        if operator.input_shape() == InputShape::Constant {
            self.recompute_answer(question_id)?;
        }
        Ok(())
    }

    /// Merge typed input into a question's slots and arm the debounced
    /// recompute for that question.
    ///
    /// # Errors
    ///
    /// Fails when the session is not in progress or the question id is
    /// not part of this exam.
    pub fn update_inputs(
        &mut self,
        question_id: QuestionId,
        update: ExpressionUpdate,
    ) -> Result<(), SessionError> {
        self.ensure_mutable(question_id)?;
        self.store.update(question_id, update);
        self.debouncer.schedule(question_id, self.clock.now());
        Ok(())
    }

    /// Run recomputes whose debounce deadline has passed. Returns the
    /// affected question ids.
    ///
    /// # Errors
    ///
    /// Fails when the session is not in progress.
    pub fn poll_recompute(&mut self) -> Result<Vec<QuestionId>, SessionError> {
        if self.phase != SessionPhase::InProgress {
            return Err(self.phase_error());
        }
        let due = self.debouncer.fire_due(self.clock.now());
        for question_id in &due {
            self.recompute_answer(*question_id)?;
        }
        Ok(due)
    }

    /// Compose and evaluate a question's expression, recording the result.
    ///
    /// Incomplete input leaves everything untouched; a composed expression
    /// that fails to evaluate records an empty answer. Idempotent for
    /// unchanged inputs.
    ///
    /// # Errors
    ///
    /// Fails when the session is not in progress or the question id is
    /// not part of this exam.
    pub fn recompute_answer(&mut self, question_id: QuestionId) -> Result<(), SessionError> {
        self.ensure_mutable(question_id)?;
        let state = self.store.state(question_id);

        let Some(operator) = state.selected_operator else {
            return Ok(());
        };

        let Ok(expression) = compose(operator, &state.inputs) else {
            // Missing or invalid slots: wait for more input.
            return Ok(());
        };

        let answer = match evaluate(&expression) {
            Ok(value) => AnswerValue::Numeric(value),
            Err(_) => AnswerValue::Empty,
        };

        self.store.update(
            question_id,
            ExpressionUpdate {
                canonical_expression: Some(expression),
                has_direct_answer: Some(false),
                ..ExpressionUpdate::default()
            },
        );
        self.store.set_answer(question_id, answer);
        Ok(())
    }

    /// Promote the direct-number input to the question's answer.
    /// No-op when the direct input is empty.
    ///
    /// # Errors
    ///
    /// Fails when the session is not in progress or the question id is
    /// not part of this exam.
    pub fn set_direct_answer(&mut self, question_id: QuestionId) -> Result<(), SessionError> {
        self.ensure_mutable(question_id)?;
        let state = self.store.state(question_id);
        if state.direct_value.is_empty() {
            return Ok(());
        }

        let answer = match evaluate(&state.direct_value) {
            Ok(value) => AnswerValue::Numeric(value),
            Err(_) => AnswerValue::Empty,
        };

        self.store.update(
            question_id,
            ExpressionUpdate {
                canonical_expression: Some(state.direct_value.clone()),
                has_direct_answer: Some(true),
                direct_value: Some(String::new()),
                ..ExpressionUpdate::default()
            },
        );
        self.store.set_answer(question_id, answer);
        Ok(())
    }

    /// Reset a question's expression state and answer.
    ///
    /// # Errors
    ///
    /// Fails when the session is not in progress or the question id is
    /// not part of this exam.
    pub fn clear_question(&mut self, question_id: QuestionId) -> Result<(), SessionError> {
        self.ensure_mutable(question_id)?;
        self.store.clear(question_id);
        self.debouncer.cancel(question_id);
        Ok(())
    }

    // ─── Submission ────────────────────────────────────────────────────────

    /// Assemble the grading payload and end the session.
    ///
    /// Terminal: the timer stops mattering and no further answer mutation
    /// is permitted. The network handoff belongs to the API client, not
    /// to the session.
    ///
    /// # Errors
    ///
    /// Fails when the session was never started or already submitted.
    pub fn submit(&mut self) -> Result<SubmissionPayload, SessionError> {
        if self.phase != SessionPhase::InProgress {
            return Err(self.phase_error());
        }

        let answers = self
            .exam
            .questions()
            .iter()
            .map(|question| self.store.answer(question.id()).as_submission().to_string())
            .collect();

        self.phase = SessionPhase::Submitted;

        Ok(SubmissionPayload {
            exam_id: self.exam.id(),
            answers,
            timer: self.formatted_elapsed(),
        })
    }

    // ─── Internals ─────────────────────────────────────────────────────────

    fn ensure_mutable(&self, question_id: QuestionId) -> Result<(), SessionError> {
        if self.phase != SessionPhase::InProgress {
            return Err(self.phase_error());
        }
        if !self.exam.contains(question_id) {
            return Err(SessionError::UnknownQuestion(question_id));
        }
        Ok(())
    }

    fn phase_error(&self) -> SessionError {
        match self.phase {
            SessionPhase::NotStarted => SessionError::NotStarted,
            _ => SessionError::AlreadySubmitted,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
