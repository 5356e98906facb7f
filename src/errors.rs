use thiserror::Error;

use crate::types::Float;

/// Errors raised by parameter validation, body queries and the linearized
/// model entry points.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BicycleError {
    #[error("{0} is missing from the provided parameter map")]
    MissingParameter(String),

    #[error("{value} is not a valid value for parameter {name}")]
    InvalidValue { name: String, value: Float },

    #[error("{0} is not a body of this parameter set")]
    UnknownBody(char),

    #[error("at least one body label must be given")]
    EmptyBodySet,

    #[error("{0} is not a parameter of this model")]
    UnknownParameter(String),

    #[error("only one parameter can be swept at a time, got {0:?}")]
    SweepConflict(Vec<String>),

    #[error("numeric failure: {0}")]
    Numeric(String),
}
