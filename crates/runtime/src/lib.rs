//! Host for the shared, step-ordered ledger.
//!
//! Every operation runs as one unit of work against a write-buffering view of
//! the committed state. A unit either commits all of its writes and events or
//! none of them.

pub mod bank;
mod beacon;
mod chain;
mod storage;
pub mod telemetry;

pub use bank::BankError;
pub use beacon::BeaconLog;
pub use chain::{Chain, StepContext, StepEvent, StepView};
pub use storage::StorageTransaction;
pub use telemetry::{init_tracing, TelemetryError};
