#![forbid(unsafe_code)]

pub mod answer_store;
pub mod api;
pub mod checkout;
pub mod debounce;
pub mod error;
pub mod expression;
pub mod session;

pub use exam_core::Clock;

pub use error::{ApiError, BuilderError, CheckoutError, EvalError, SessionError};

pub use answer_store::AnswerStore;
pub use api::{ApiConfig, ExamApi, GradeReport, HttpExamApi, PurchaseReceipt};
pub use checkout::{ChapterCart, OrderLine, PurchaseOrder};
pub use debounce::RecomputeDebouncer;
pub use expression::{compose, evaluate};
pub use session::{ExamSession, SessionPhase, SessionProgress, SubmissionPayload};
