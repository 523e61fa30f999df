//! Session errors.

use thiserror::Error;

use super::ModeKind;

/// Contract violations by the caller. None of these leave state inconsistent:
/// the rejected operation has no effect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Cannot {action} while in {mode:?} mode")]
    InvalidTransition {
        action: &'static str,
        mode: ModeKind,
    },

    #[error("Onboarding is at step {step}; completion requires step {terminal}")]
    WizardIncomplete { step: usize, terminal: usize },

    #[error("Onboarding already completed")]
    AlreadyCompleted,

    #[error("Record type '{record_type}' has no pages")]
    NotPaginated { record_type: String },

    #[error("No record is open")]
    NoOpenRecord,

    #[error("Record not found: {0}")]
    RecordNotFound(String),
}

pub type SessionResult<T> = Result<T, SessionError>;
