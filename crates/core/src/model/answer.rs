use serde::{Deserialize, Serialize};

use crate::model::QuestionId;

/// The value recorded for a question.
///
/// MCQ answers carry the chosen option number; grid-in answers carry the
/// evaluated numeric string. `Empty` means "no answer yet", which is a
/// perfectly submittable state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerValue {
    #[default]
    Empty,
    Choice(String),
    Numeric(String),
}

impl AnswerValue {
    /// The string form the grading API expects for this answer.
    #[must_use]
    pub fn as_submission(&self) -> &str {
        match self {
            AnswerValue::Empty => "",
            AnswerValue::Choice(choice) => choice,
            AnswerValue::Numeric(value) => value,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, AnswerValue::Empty)
    }
}

/// One question's recorded answer, overwritten on every recompute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub question_id: QuestionId,
    pub value: AnswerValue,
}

impl AnswerEntry {
    #[must_use]
    pub fn new(question_id: QuestionId, value: AnswerValue) -> Self {
        Self { question_id, value }
    }

    /// An entry marking the question as unanswered.
    #[must_use]
    pub fn empty(question_id: QuestionId) -> Self {
        Self::new(question_id, AnswerValue::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_strings() {
        assert_eq!(AnswerValue::Empty.as_submission(), "");
        assert_eq!(AnswerValue::Choice("B".into()).as_submission(), "B");
        assert_eq!(AnswerValue::Numeric("4".into()).as_submission(), "4");
    }

    #[test]
    fn empty_entry_is_empty() {
        let entry = AnswerEntry::empty(QuestionId::new(1));
        assert!(entry.value.is_empty());
    }
}
