pub mod contract;
pub mod error;
pub mod handlers;
pub mod hooks;
pub mod msg;
pub mod queries;
pub mod state;

pub use crate::contract::EnforcementGate;
pub use crate::error::GateError;
