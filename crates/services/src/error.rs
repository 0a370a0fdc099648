//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::model::{ChapterId, ExamError, QuestionId};

/// Errors emitted by the expression builder.
///
/// All of these are recoverable: the caller suppresses the recompute and
/// waits for more input instead of surfacing an error to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuilderError {
    #[error("required input slot is missing")]
    Incomplete,
    #[error("input slot is not a finite number")]
    InvalidNumber,
    #[error("denominator or modulus must not be zero")]
    ZeroDenominator,
}

/// Errors emitted by the expression evaluator.
///
/// None of these escape the session boundary; they all degrade to an
/// empty answer there.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("malformed expression: {0}")]
    ParseError(String),
    #[error("expression did not evaluate to a number")]
    NotANumber,
    #[error("division by zero")]
    DivisionByZero,
}

/// Errors emitted by the exam session controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session has not been started")]
    NotStarted,
    #[error("session was already submitted")]
    AlreadySubmitted,
    #[error("question {0} is not part of this exam")]
    UnknownQuestion(QuestionId),
    #[error("question index {0} is out of range")]
    IndexOutOfRange(usize),
}

/// Errors emitted by the chapter checkout cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CheckoutError {
    #[error("no chapters selected")]
    EmptyCart,
    #[error("no payment method selected")]
    NoPaymentMethod,
    #[error("chapter {0} is not among the recommendations")]
    UnknownChapter(ChapterId),
    #[error("chapter {0} has no price for duration {1}")]
    UnknownDuration(ChapterId, u32),
}

/// Errors emitted by the exam API client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("api request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Exam(#[from] ExamError),
}
