use thiserror::Error;

use crate::model::{CourseId, ExamId, Question, QuestionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExamError {
    #[error("exam has no questions")]
    NoQuestions,
    #[error("duplicate question id: {0}")]
    DuplicateQuestion(QuestionId),
}

/// A diagnostic exam: an ordered, non-empty list of questions.
///
/// The exam id comes from the first question's pivot when the API provides
/// one, otherwise it falls back to the course id the exam was fetched for.
#[derive(Debug, Clone, PartialEq)]
pub struct Exam {
    id: ExamId,
    course_id: CourseId,
    questions: Vec<Question>,
}

impl Exam {
    /// Assemble an exam from the questions the API returned.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::NoQuestions` for an empty question list and
    /// `ExamError::DuplicateQuestion` when two questions share an id.
    pub fn from_questions(
        questions: Vec<Question>,
        course_id: CourseId,
    ) -> Result<Self, ExamError> {
        let Some(first) = questions.first() else {
            return Err(ExamError::NoQuestions);
        };

        for (i, question) in questions.iter().enumerate() {
            if questions[..i].iter().any(|q| q.id() == question.id()) {
                return Err(ExamError::DuplicateQuestion(question.id()));
            }
        }

        let id = first
            .exam_id()
            .unwrap_or_else(|| ExamId::new(course_id.value()));

        Ok(Self {
            id,
            course_id,
            questions,
        })
    }

    #[must_use]
    pub fn id(&self) -> ExamId {
        self.id
    }

    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Returns true when the exam contains a question with this id.
    #[must_use]
    pub fn contains(&self, question_id: QuestionId) -> bool {
        self.questions.iter().any(|q| q.id() == question_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(id: u64) -> Question {
        Question::grid_in(QuestionId::new(id), format!("Q{id}"))
    }

    #[test]
    fn empty_exam_is_rejected() {
        let err = Exam::from_questions(Vec::new(), CourseId::new(1)).unwrap_err();
        assert_eq!(err, ExamError::NoQuestions);
    }

    #[test]
    fn duplicate_question_is_rejected() {
        let err = Exam::from_questions(vec![grid(1), grid(1)], CourseId::new(1)).unwrap_err();
        assert_eq!(err, ExamError::DuplicateQuestion(QuestionId::new(1)));
    }

    #[test]
    fn exam_id_prefers_pivot() {
        let pinned = grid(1).with_exam_id(ExamId::new(42));
        let exam = Exam::from_questions(vec![pinned, grid(2)], CourseId::new(9)).unwrap();
        assert_eq!(exam.id(), ExamId::new(42));
    }

    #[test]
    fn exam_id_falls_back_to_course() {
        let exam = Exam::from_questions(vec![grid(1)], CourseId::new(9)).unwrap();
        assert_eq!(exam.id(), ExamId::new(9));
        assert_eq!(exam.course_id(), CourseId::new(9));
    }

    #[test]
    fn lookup_by_index_and_id() {
        let exam = Exam::from_questions(vec![grid(1), grid(2)], CourseId::new(1)).unwrap();
        assert_eq!(exam.total_questions(), 2);
        assert_eq!(exam.question(1).unwrap().id(), QuestionId::new(2));
        assert!(exam.contains(QuestionId::new(1)));
        assert!(!exam.contains(QuestionId::new(3)));
    }
}
