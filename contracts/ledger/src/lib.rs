pub mod contract;
pub mod error;
pub mod handlers;
pub mod msg;
pub mod queries;
pub mod state;

pub use crate::contract::IntentLedger;
pub use crate::error::LedgerError;
