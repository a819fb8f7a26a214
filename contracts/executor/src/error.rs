use cosmwasm_std::{StdError, Uint128, Uint256};
use entropy_intents_gate::GateError;
use entropy_intents_ledger::LedgerError;
use entropy_intents_runtime::BankError;
use entropy_intents_types::IntentError;
use entropy_intents_venue::VenueError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Ledger(#[from] LedgerError),

    #[error("{0}")]
    Intent(#[from] IntentError),

    #[error("{0}")]
    Bank(#[from] BankError),

    #[error("{0}")]
    Venue(#[from] VenueError<GateError>),

    #[error("Intent already executed: {id}")]
    IntentAlreadyExecuted { id: u64 },

    #[error("Intent not executable: {id}")]
    IntentNotExecutable { id: u64 },

    #[error("Transfer failed: {reason}")]
    TransferFailed { reason: String },

    #[error("Settlement of intent {id} produced no output")]
    ZeroOutput { id: u64 },

    #[error("Insufficient output for intent {id}: minimum {minimum}, actual {actual}")]
    InsufficientOutput {
        id: u64,
        minimum: Uint256,
        actual: Uint128,
    },

    #[error("Batch is empty")]
    EmptyBatch {},

    #[error("Batch length mismatch: {intents} intents, {routes} routes, {limits} output limits")]
    BatchLengthMismatch {
        intents: usize,
        routes: usize,
        limits: usize,
    },

    #[error("Batch too large: {size} exceeds {max}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("Batch item {index} failed: {source}")]
    BatchIntentFailed {
        index: usize,
        #[source]
        source: Box<ExecutorError>,
    },
}
