//! Error types for the vector module

use thiserror::Error;

use super::capability::Capability;

/// Failures raised by vector arithmetic
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorError {
    /// The element type pairing does not declare the requested capability
    #[error("Operation {operation} is not supported between {lhs} and {rhs}")]
    OperationNotSupported {
        /// The capability that was requested
        operation: Capability,
        /// Type name of the left-hand element
        lhs: &'static str,
        /// Type name of the right-hand element
        rhs: &'static str,
    },

    /// A scalar divisor or a divisor component was zero
    #[error("Division by zero")]
    DivisionByZero,
}

/// Result type for vector operations
pub type Result<T> = std::result::Result<T, VectorError>;
