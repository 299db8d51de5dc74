//! Crate error type.

use thiserror::Error;

/// Errors surfaced by dialog construction and session operations.
#[derive(Debug, Error)]
pub enum CasementError {
    /// The node a component or observer was pointed at does not exist.
    #[error("target node not found")]
    TargetNotFound,

    /// The host could not produce an instance for the component's root.
    #[error("component host unavailable for {component}")]
    HostUnavailable { component: &'static str },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CasementError>;
