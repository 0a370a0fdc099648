use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::{ExamId, QuestionId};

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    /// Pick one of the provided options.
    Mcq,
    /// Construct a numeric answer through the expression widget.
    GridIn,
}

/// One multiple-choice option as the API delivers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqOption {
    pub id: u64,
    pub mcq_num: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct QuestionPivot {
    #[serde(default)]
    pub diagnostic_exam_id: Option<ExamId>,
}

/// An exam question as fetched from the remote API.
///
/// `ans_type` arrives as a free string; anything other than `"MCQ"` is
/// treated as grid-in, mirroring how the exam screen branches on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    #[serde(default)]
    question: String,
    #[serde(default)]
    q_image: Option<Url>,
    ans_type: String,
    #[serde(default)]
    mcq: Vec<McqOption>,
    #[serde(default)]
    pivot: Option<QuestionPivot>,
}

impl Question {
    /// Build a multiple-choice question.
    #[must_use]
    pub fn mcq(id: QuestionId, prompt: impl Into<String>, options: Vec<McqOption>) -> Self {
        Self {
            id,
            question: prompt.into(),
            q_image: None,
            ans_type: "MCQ".to_string(),
            mcq: options,
            pivot: None,
        }
    }

    /// Build a grid-in question answered through the expression widget.
    #[must_use]
    pub fn grid_in(id: QuestionId, prompt: impl Into<String>) -> Self {
        Self {
            id,
            question: prompt.into(),
            q_image: None,
            ans_type: "GridIn".to_string(),
            mcq: Vec::new(),
            pivot: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// HTML prompt body; may be empty when the question is image-only.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn image(&self) -> Option<&Url> {
        self.q_image.as_ref()
    }

    #[must_use]
    pub fn answer_kind(&self) -> AnswerKind {
        if self.ans_type == "MCQ" {
            AnswerKind::Mcq
        } else {
            AnswerKind::GridIn
        }
    }

    #[must_use]
    pub fn options(&self) -> &[McqOption] {
        &self.mcq
    }

    /// The exam this question is pinned to, when the API provides it.
    #[must_use]
    pub fn exam_id(&self) -> Option<ExamId> {
        self.pivot.as_ref().and_then(|p| p.diagnostic_exam_id)
    }

    #[cfg(test)]
    pub(crate) fn with_exam_id(mut self, exam_id: ExamId) -> Self {
        self.pivot = Some(QuestionPivot {
            diagnostic_exam_id: Some(exam_id),
        });
        self
    }
}
