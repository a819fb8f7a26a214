use cosmwasm_std::Addr;
use entropy_intents_runtime::StepContext;

use crate::{ModifyLiquidityParams, RouteKey, SwapDelta, SwapParams};

/// Extension points the venue calls synchronously during its own operations.
///
/// `sender` is the identity that invoked the venue (normally a router). An
/// `Err` from any hook aborts the enclosing venue operation; because the venue
/// runs inside one unit of work, nothing it did before the hook survives.
pub trait VenueHooks {
    type Error: std::error::Error + 'static;

    /// Address route keys must name to be governed by these hooks
    fn address(&self) -> &Addr;

    fn before_swap(
        &self,
        _ctx: &mut StepContext<'_>,
        _sender: &Addr,
        _key: &RouteKey,
        _params: &SwapParams,
        _hook_data: &[u8],
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn after_swap(
        &self,
        _ctx: &mut StepContext<'_>,
        _sender: &Addr,
        _key: &RouteKey,
        _params: &SwapParams,
        _delta: &SwapDelta,
        _hook_data: &[u8],
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn before_add_liquidity(
        &self,
        _ctx: &mut StepContext<'_>,
        _sender: &Addr,
        _key: &RouteKey,
        _params: &ModifyLiquidityParams,
        _hook_data: &[u8],
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn before_remove_liquidity(
        &self,
        _ctx: &mut StepContext<'_>,
        _sender: &Addr,
        _key: &RouteKey,
        _params: &ModifyLiquidityParams,
        _hook_data: &[u8],
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}
