use std::fmt;

use thiserror::Error;

/// Which of the two independent operations a guard refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Generation,
    Deployment,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Generation => f.write_str("generation"),
            Axis::Deployment => f.write_str("deployment"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnderdogError {
    #[error("{0}")] Generation(String),
    #[error("{0}")] Deployment(String),
    #[error("configuration error: {0}")] Config(String),
    #[error("a {0} is already in progress")] Busy(Axis),
    #[error("there is no generated code yet")] NoCode,
    #[error("io error: {0}")] Io(String),
}

impl From<std::io::Error> for UnderdogError {
    fn from(e: std::io::Error) -> Self {
        UnderdogError::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UnderdogError>;
