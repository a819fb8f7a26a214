pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::contract::{IntentExecutor, MAX_BATCH_SIZE};
pub use crate::error::ExecutorError;
pub use crate::msg::{BatchReceipt, ExecutionReceipt};
