mod answer;
mod course;
mod exam;
mod expression;
pub mod ids;
mod operator;
mod question;
mod results;

pub use ids::{ChapterId, CourseId, ExamId, QuestionId};

pub use answer::{AnswerEntry, AnswerValue};
pub use course::{Chapter, Course, CurrencyRate, PaymentMethod, PriceTier};
pub use exam::{Exam, ExamError};
pub use expression::{ExpressionInputs, ExpressionState, ExpressionUpdate};
pub use operator::{InputShape, Operator};
pub use question::{AnswerKind, McqOption, Question};
pub use results::{DEFAULT_MAX_SCORE, ExamOutcome};
