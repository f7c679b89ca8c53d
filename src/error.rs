use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FaultKind {
    Precondition,
    Postcondition,
    Invariant,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("Precondition violated: {message} (got {value})")]
    Precondition { message: String, value: String },

    #[error("Postcondition violated: {message} (got {value})")]
    Postcondition { message: String, value: String },

    #[error("Invariant violated: {message} (got {value})")]
    Invariant { message: String, value: String },
}

impl ContractError {
    pub fn kind(&self) -> FaultKind {
        match self {
            ContractError::Precondition { .. } => FaultKind::Precondition,
            ContractError::Postcondition { .. } => FaultKind::Postcondition,
            ContractError::Invariant { .. } => FaultKind::Invariant,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ContractError::Precondition { message, .. }
            | ContractError::Postcondition { message, .. }
            | ContractError::Invariant { message, .. } => message,
        }
    }

    /// The offending value, as it was rendered when the fault was raised.
    pub fn value(&self) -> &str {
        match self {
            ContractError::Precondition { value, .. }
            | ContractError::Postcondition { value, .. }
            | ContractError::Invariant { value, .. } => value,
        }
    }

    pub fn is_precondition(&self) -> bool {
        self.kind() == FaultKind::Precondition
    }

    pub fn is_postcondition(&self) -> bool {
        self.kind() == FaultKind::Postcondition
    }

    pub fn is_invariant(&self) -> bool {
        self.kind() == FaultKind::Invariant
    }
}
