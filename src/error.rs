use cosmwasm_std::StdError;
use entropy_intents_config::ConfigError;
use entropy_intents_executor::ExecutorError;
use entropy_intents_gate::GateError;
use entropy_intents_ledger::LedgerError;
use entropy_intents_runtime::{BankError, TelemetryError};
use entropy_intents_types::IntentError;
use entropy_intents_venue::VenueError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("Intent error: {0}")]
    Intent(#[from] IntentError),

    #[error("Bank error: {0}")]
    Bank(#[from] BankError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Gate error: {0}")]
    Gate(#[from] GateError),

    #[error("Venue error: {0}")]
    Venue(#[from] VenueError<GateError>),

    #[error("Executor error: {0}")]
    Executor(#[from] ExecutorError),
}
