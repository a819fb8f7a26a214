use cosmwasm_std::Addr;
use entropy_intents_runtime::StepContext;

use crate::{
    LiquidityDelta, ModifyLiquidityParams, RouteKey, SwapDelta, SwapParams, Venue, VenueError,
    VenueHooks,
};

/// Allow-listable entry point to the venue.
///
/// The venue sees the router as `sender`; the router's caller pays for and
/// receives the swap, and owns the liquidity it adds.
pub struct SwapRouter<H> {
    address: Addr,
    venue: Venue<H>,
}

impl<H: VenueHooks> SwapRouter<H> {
    pub fn new(address: Addr, venue: Venue<H>) -> Self {
        Self { address, venue }
    }

    pub fn address(&self) -> &Addr {
        &self.address
    }

    pub fn venue(&self) -> &Venue<H> {
        &self.venue
    }

    pub fn swap(
        &self,
        ctx: &mut StepContext<'_>,
        caller: &Addr,
        key: &RouteKey,
        params: SwapParams,
        hook_data: &[u8],
    ) -> Result<SwapDelta, VenueError<H::Error>> {
        self.venue
            .swap(ctx, &self.address, caller, key, params, hook_data)
    }

    /// `params.owner` is replaced by `caller`
    pub fn modify_liquidity(
        &self,
        ctx: &mut StepContext<'_>,
        caller: &Addr,
        key: &RouteKey,
        params: ModifyLiquidityParams,
        hook_data: &[u8],
    ) -> Result<LiquidityDelta, VenueError<H::Error>> {
        let params = ModifyLiquidityParams {
            owner: caller.clone(),
            ..params
        };
        self.venue
            .modify_liquidity(ctx, &self.address, key, params, hook_data)
    }
}
