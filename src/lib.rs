//! Deferred, route-randomized trade intents.
//!
//! A user records an [`Intent`](entropy_intents_types::Intent) in the ledger;
//! anyone may later ask the executor to settle it. The enforcement gate sits
//! on the venue's extension points and re-checks the execution window, the
//! minimum delay and the beacon-selected route on every governed trade.
//!
//! [`Protocol`] wires every component onto one step-ordered ledger from an
//! [`AppConfig`](entropy_intents_config::AppConfig).

mod error;
mod protocol;

pub use error::ProtocolError;
pub use protocol::Protocol;

pub use entropy_intents_config as config;
pub use entropy_intents_executor as executor;
pub use entropy_intents_gate as gate;
pub use entropy_intents_ledger as ledger;
pub use entropy_intents_runtime as runtime;
pub use entropy_intents_types as types;
pub use entropy_intents_venue as venue;

/// Install the JSON tracing subscriber at the configured log level
pub fn init_tracing(config: &config::AppConfig) -> Result<(), ProtocolError> {
    Ok(runtime::init_tracing(&config.network.log_level)?)
}
