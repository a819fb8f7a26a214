use cosmwasm_std::{StdError, Uint128};
use entropy_intents_runtime::BankError;
use thiserror::Error;

/// Venue failure, generic over the error type of the installed hooks
#[derive(Error, Debug)]
pub enum VenueError<E> {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Bank(#[from] BankError),

    #[error("{0}")]
    Hook(#[source] E),

    #[error("Pool not found: {route}")]
    PoolNotFound { route: String },

    #[error("Pool already initialized: {route}")]
    PoolAlreadyInitialized { route: String },

    #[error("Route key names hooks {expected}, venue is governed by {actual}")]
    HookMismatch { expected: String, actual: String },

    #[error("Invalid route key: {reason}")]
    InvalidRouteKey { reason: String },

    #[error("Invalid position bounds: lower {lower} must be below upper {upper}")]
    InvalidPositionBounds { lower: i32, upper: i32 },

    #[error("Amount must be non-zero")]
    ZeroAmount {},

    #[error("Insufficient liquidity on route {route}")]
    InsufficientLiquidity { route: String },

    #[error("Slippage exceeded: limit {limit}, actual {actual}")]
    SlippageExceeded { limit: Uint128, actual: Uint128 },

    #[error("Position not found or too small: holds {available}, needs {required}")]
    PositionNotFound {
        required: Uint128,
        available: Uint128,
    },
}
