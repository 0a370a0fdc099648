use serde::{Deserialize, Serialize};

use crate::model::ExamId;

/// Maximum score assumed when the grading response omits one.
pub const DEFAULT_MAX_SCORE: f64 = 800.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct GradedExamRef {
    #[serde(default)]
    pub id: Option<ExamId>,
    /// The exam's maximum attainable score.
    #[serde(default)]
    pub score: Option<f64>,
}

/// The grading API's verdict for a submitted exam.
///
/// Carries the raw response fields plus the derived views the results
/// screen shows (percentage, accuracy, pass status).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamOutcome {
    #[serde(default)]
    score: f64,
    #[serde(default)]
    pass_score: f64,
    #[serde(default)]
    right_question: u32,
    #[serde(default)]
    total_question: u32,
    /// Explicit pass flag; when present it overrides the score comparison.
    #[serde(default)]
    grade: Option<bool>,
    #[serde(default)]
    exam: Option<GradedExamRef>,
}

impl ExamOutcome {
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn pass_score(&self) -> f64 {
        self.pass_score
    }

    #[must_use]
    pub fn exam_id(&self) -> Option<ExamId> {
        self.exam.as_ref().and_then(|e| e.id)
    }

    #[must_use]
    pub fn max_score(&self) -> f64 {
        self.exam
            .as_ref()
            .and_then(|e| e.score)
            .unwrap_or(DEFAULT_MAX_SCORE)
    }

    /// Score as a percentage of the maximum.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.max_score() == 0.0 {
            return 0.0;
        }
        (self.score / self.max_score()) * 100.0
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.right_question
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total_question
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.total_question.saturating_sub(self.right_question)
    }

    /// Fraction of questions answered correctly, as a percentage.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total_question == 0 {
            return 0.0;
        }
        (f64::from(self.right_question) / f64::from(self.total_question)) * 100.0
    }

    /// Whether the exam was passed: the explicit grade flag when the API
    /// sets one, otherwise score against pass score.
    #[must_use]
    pub fn passed(&self) -> bool {
        match self.grade {
            Some(grade) => grade,
            None => self.score >= self.pass_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(json: &str) -> ExamOutcome {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn derived_views_from_response() {
        let o = outcome(
            r#"{
                "score": 600.0,
                "pass_score": 400.0,
                "right_question": 15,
                "total_question": 20,
                "exam": {"id": 3, "score": 800.0}
            }"#,
        );
        assert_eq!(o.exam_id(), Some(ExamId::new(3)));
        assert!((o.percentage() - 75.0).abs() < 1e-9);
        assert!((o.accuracy() - 75.0).abs() < 1e-9);
        assert_eq!(o.wrong(), 5);
        assert!(o.passed());
    }

    #[test]
    fn max_score_defaults_when_missing() {
        let o = outcome(r#"{"score": 400.0, "pass_score": 500.0}"#);
        assert!((o.max_score() - DEFAULT_MAX_SCORE).abs() < f64::EPSILON);
        assert!(!o.passed());
    }

    #[test]
    fn explicit_grade_flag_wins() {
        let o = outcome(r#"{"score": 100.0, "pass_score": 500.0, "grade": true}"#);
        assert!(o.passed());
    }

    #[test]
    fn accuracy_of_empty_exam_is_zero() {
        let o = ExamOutcome::default();
        assert_eq!(o.accuracy(), 0.0);
        assert_eq!(o.wrong(), 0);
    }
}
