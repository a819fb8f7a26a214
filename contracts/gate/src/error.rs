use cosmwasm_std::StdError;
use entropy_intents_types::IntentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Intent(#[from] IntentError),

    #[error("Router not allowed: {router}")]
    RouterNotAllowed { router: String },

    #[error("Removal blocked: route {route} traded in step {step}")]
    RemovalBlockedSameStep { route: String, step: u64 },

    #[error("Liquidity activation pending: activated at {activated_at}, step {current_step}, requires {required} steps")]
    LiquidityActivationPending {
        activated_at: u64,
        current_step: u64,
        required: u64,
    },

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Router already allowed: {router}")]
    RouterAlreadyAllowed { router: String },

    #[error("Router not found: {router}")]
    RouterNotFound { router: String },
}
