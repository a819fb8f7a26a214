//! Boundary to the liquidity engine.
//!
//! The engine prices and settles trades; this crate only pins down what the
//! intent core needs from it: stable route identities, synchronous extension
//! points around trades and liquidity changes, and an allow-listable router.
//! The constant-product [`Venue`] here is a reference engine for tests and
//! local deployments.

pub mod error;
pub mod hooks;
pub mod route;
pub mod router;
pub mod state;
pub mod venue;

pub use error::VenueError;
pub use hooks::VenueHooks;
pub use route::{
    LiquidityDelta, ModifyLiquidityParams, PositionKey, RouteKey, SwapAmount, SwapDelta,
    SwapParams,
};
pub use router::SwapRouter;
pub use state::{PoolState, Position};
pub use venue::Venue;
