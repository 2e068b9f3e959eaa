/*
 * Error Module
 *
 * Usage errors raised by the control surface. None of these are fatal: the
 * simulation logs them and carries on without applying the request.
 */

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("simulation is already initialised")]
    AlreadyInitialised,
    #[error("cannot {operation}: simulation has not been initialised")]
    NotInitialised { operation: &'static str },
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
