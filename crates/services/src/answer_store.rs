use std::collections::HashMap;

use exam_core::model::{AnswerEntry, AnswerValue, ExpressionState, ExpressionUpdate, QuestionId};

/// In-memory store of per-question expression state and recorded answers.
///
/// Keyed strictly by question id: operations on one question never touch
/// another's state. States are created lazily on first access and live
/// until the exam session that owns this store is dropped.
#[derive(Debug, Clone, Default)]
pub struct AnswerStore {
    states: HashMap<QuestionId, ExpressionState>,
    answers: HashMap<QuestionId, AnswerEntry>,
}

impl AnswerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a question's expression state; default when untouched.
    #[must_use]
    pub fn state(&self, question_id: QuestionId) -> ExpressionState {
        self.states.get(&question_id).cloned().unwrap_or_default()
    }

    /// Mutable access to a question's state, created on first use.
    pub fn state_mut(&mut self, question_id: QuestionId) -> &mut ExpressionState {
        self.states.entry(question_id).or_default()
    }

    /// Merge a partial update into a question's state.
    pub fn update(&mut self, question_id: QuestionId, update: ExpressionUpdate) {
        self.state_mut(question_id).apply(update);
    }

    /// Reset a question's expression state and its recorded answer.
    pub fn clear(&mut self, question_id: QuestionId) {
        self.states.insert(question_id, ExpressionState::default());
        self.answers
            .insert(question_id, AnswerEntry::empty(question_id));
    }

    /// Record a question's answer, overwriting any previous value.
    pub fn set_answer(&mut self, question_id: QuestionId, value: AnswerValue) {
        self.answers
            .insert(question_id, AnswerEntry::new(question_id, value));
    }

    /// The answer currently recorded for a question; `Empty` if none.
    #[must_use]
    pub fn answer(&self, question_id: QuestionId) -> AnswerValue {
        self.answers
            .get(&question_id)
            .map(|entry| entry.value.clone())
            .unwrap_or_default()
    }

    /// Number of questions carrying a non-empty answer.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers
            .values()
            .filter(|entry| !entry.value.is_empty())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::Operator;

    fn q(id: u64) -> QuestionId {
        QuestionId::new(id)
    }

    #[test]
    fn untouched_question_has_default_state() {
        let store = AnswerStore::new();
        assert_eq!(store.state(q(1)), ExpressionState::default());
        assert_eq!(store.answer(q(1)), AnswerValue::Empty);
    }

    #[test]
    fn updates_are_isolated_per_question() {
        let mut store = AnswerStore::new();
        store.update(q(1), ExpressionUpdate::value("16"));
        store.update(q(2), ExpressionUpdate::value("25"));

        assert_eq!(store.state(q(1)).inputs.value, "16");
        assert_eq!(store.state(q(2)).inputs.value, "25");
        assert_eq!(store.state(q(3)), ExpressionState::default());
    }

    #[test]
    fn clear_resets_state_and_answer() {
        let sqrt = Operator::by_symbol("√").unwrap();
        let mut store = AnswerStore::new();
        store.update(q(1), ExpressionUpdate::select_operator(sqrt));
        store.update(q(1), ExpressionUpdate::value("16"));
        store.set_answer(q(1), AnswerValue::Numeric("4".into()));

        store.clear(q(1));

        assert_eq!(store.state(q(1)), ExpressionState::default());
        assert_eq!(store.answer(q(1)), AnswerValue::Empty);
    }

    #[test]
    fn clearing_one_question_keeps_others() {
        let mut store = AnswerStore::new();
        store.set_answer(q(1), AnswerValue::Numeric("4".into()));
        store.set_answer(q(2), AnswerValue::Choice("B".into()));

        store.clear(q(1));

        assert_eq!(store.answer(q(2)), AnswerValue::Choice("B".into()));
        assert_eq!(store.answered_count(), 1);
    }

    #[test]
    fn answered_count_ignores_empty_entries() {
        let mut store = AnswerStore::new();
        store.set_answer(q(1), AnswerValue::Numeric("4".into()));
        store.set_answer(q(2), AnswerValue::Empty);
        assert_eq!(store.answered_count(), 1);
    }
}
