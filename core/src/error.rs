use crate::types::SimTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid duration for {input}: dt={dt} (must be finite and >= 0)")]
    InvalidDuration { input: &'static str, dt: SimTime },

    #[error("Invalid {input}: {reason}")]
    InvalidInput { input: &'static str, reason: String },

    #[error("Invalid state: {reason}")]
    InvalidState { reason: String },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Determinism violation: replay diverged after input {input_index}")]
    DeterminismViolation { input_index: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    /// True for the invalid-parameter class: the input was refused and the
    /// state left untouched. Callers replaying untrusted streams skip these.
    pub fn is_rejected_input(&self) -> bool {
        matches!(self, SimError::InvalidDuration { .. } | SimError::InvalidInput { .. })
    }
}
