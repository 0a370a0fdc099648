use thiserror::Error;

use crate::model::ExamError;
use crate::model::ids::ParseIdError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Exam(#[from] ExamError),
    #[error(transparent)]
    ParseId(#[from] ParseIdError),
}
