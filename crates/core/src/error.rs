use thiserror::Error;

use crate::model::{CategoryParseError, ParseIdError, ScoreError, SessionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Category(#[from] CategoryParseError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
}
