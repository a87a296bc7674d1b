use std::fmt;
use thiserror::Error;

/// Which carrier set of a relation an element was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Domain,
    Codomain,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Domain => write!(f, "domain"),
            Side::Codomain => write!(f, "codomain"),
        }
    }
}

/// Failure categories, for callers that branch on the kind of error rather than its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Domain,
    NotAFunction,
    TypeMismatch,
    Undefined,
}

/// Errors raised by constructors and operations of the algebra.
///
/// Offending elements are carried in their `Debug` rendering so the error type stays
/// independent of the element types involved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("Invalid element {element}: {reason}")]
    Validation { element: String, reason: String },

    #[error("Element {element} is not a member of the {side}")]
    Domain { side: Side, element: String },

    #[error("Not a function: {element} maps to both {first} and {second}")]
    NotAFunction {
        element: String,
        first: String,
        second: String,
    },

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Function is undefined at {element}")]
    Undefined { element: String },
}

impl MathError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MathError::Validation { .. } => ErrorKind::Validation,
            MathError::Domain { .. } => ErrorKind::Domain,
            MathError::NotAFunction { .. } => ErrorKind::NotAFunction,
            MathError::TypeMismatch(_) => ErrorKind::TypeMismatch,
            MathError::Undefined { .. } => ErrorKind::Undefined,
        }
    }

    pub(crate) fn validation(element: &impl fmt::Debug, reason: impl Into<String>) -> Self {
        MathError::Validation {
            element: format!("{element:?}"),
            reason: reason.into(),
        }
    }

    pub(crate) fn domain(side: Side, element: &impl fmt::Debug) -> Self {
        MathError::Domain {
            side,
            element: format!("{element:?}"),
        }
    }

    pub(crate) fn undefined(element: &impl fmt::Debug) -> Self {
        MathError::Undefined {
            element: format!("{element:?}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, MathError>;
