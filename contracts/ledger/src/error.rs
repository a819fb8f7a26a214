use cosmwasm_std::StdError;
use entropy_intents_types::IntentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Intent(#[from] IntentError),

    #[error("Input amount must be non-zero")]
    ZeroAmount {},

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Invalid intent: {id}")]
    InvalidIntent { id: u64 },

    #[error("Invalid or already executed intent: {id}")]
    InvalidOrAlreadyExecuted { id: u64 },

    #[error("Executor not set")]
    ExecutorNotSet {},

    #[error("Step {step} does not fit the first-attempt latch")]
    StepOutOfRange { step: u64 },
}
