use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Physically meaningless run input (non-positive water mass, full bottle, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transcendental operation outside its mathematical domain.
    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),
}
