use thiserror::Error;

use crate::RouteId;

/// Rejections produced by the intent rule set.
///
/// Shape errors (`InvalidWindow`, `InvalidDelay`, `InvalidRouteCount`) are fixed
/// properties of the intent. Timing errors are re-evaluated on every attempt and
/// may clear at a later step. Routing errors are fatal to the attempt only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    #[error("invalid execution window: start={start_step}, end={end_step}")]
    InvalidWindow { start_step: u64, end_step: u64 },

    #[error("invalid min delay: {min_delay_steps} steps")]
    InvalidDelay { min_delay_steps: u32 },

    #[error("invalid route count: {count}")]
    InvalidRouteCount { count: u8 },

    #[error("execution window not started: step={current_step}, start={start_step}")]
    ExecutionWindowNotStarted { current_step: u64, start_step: u64 },

    #[error("execution window expired: step={current_step}, end={end_step}")]
    ExecutionWindowExpired { current_step: u64, end_step: u64 },

    #[error(
        "min delay not met: step={current_step}, first attempt={created_at_step}, delay={min_delay_steps}"
    )]
    MinDelayNotMet {
        current_step: u64,
        created_at_step: u32,
        min_delay_steps: u32,
    },

    #[error("route not allowed: {route}")]
    RouteNotAllowed { route: RouteId },

    #[error("no finalized beacon precedes step {current_step}")]
    BeaconUnavailable { current_step: u64 },

    #[error("malformed intent payload: {reason}")]
    MalformedPayload { reason: String },
}
