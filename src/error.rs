use thiserror::Error;

use crate::analyzer::GroupError;
use crate::eval::{EvalError, ExecutionError};
use crate::tokenizer::token::LexError;
use crate::vocabulary::TableError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),
    #[error("Group error: {0}")]
    Group(#[from] GroupError),
    #[error("Eval error: {0}")]
    Eval(#[from] EvalError),
    #[error("Table error: {0}")]
    Table(#[from] TableError),
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),
    #[error("Config error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type InternalResult<T> = Result<T, Error>;

impl Error {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Error::Internal(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }
}
