use cosmwasm_std::{Addr, Event, StdError, StdResult, Storage, Uint128, Uint256};
use entropy_intents_runtime::{bank, StepContext};
use entropy_intents_types::RouteId;
use tracing::{debug, info};

use crate::state::{PoolState, Position, POOLS, POSITIONS};
use crate::{
    LiquidityDelta, ModifyLiquidityParams, PositionKey, RouteKey, SwapAmount, SwapDelta,
    SwapParams, VenueError, VenueHooks,
};

const BPS_DENOMINATOR: u32 = 10_000;

/// Constant-product reference venue governed by a single hooks implementation
pub struct Venue<H> {
    address: Addr,
    hooks: H,
}

impl<H: VenueHooks> Venue<H> {
    pub fn new(address: Addr, hooks: H) -> Self {
        Self { address, hooks }
    }

    /// Account holding the pooled reserves
    pub fn address(&self) -> &Addr {
        &self.address
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn initialize(
        &self,
        ctx: &mut StepContext<'_>,
        key: &RouteKey,
    ) -> Result<RouteId, VenueError<H::Error>> {
        if key.asset0 >= key.asset1 {
            return Err(VenueError::InvalidRouteKey {
                reason: "assets must be distinct and in canonical order".to_string(),
            });
        }
        if key.fee_bps >= BPS_DENOMINATOR {
            return Err(VenueError::InvalidRouteKey {
                reason: format!("fee {} bps is not below {}", key.fee_bps, BPS_DENOMINATOR),
            });
        }
        if key.tick_spacing <= 0 {
            return Err(VenueError::InvalidRouteKey {
                reason: "tick spacing must be positive".to_string(),
            });
        }
        if &key.hooks != self.hooks.address() {
            return Err(VenueError::HookMismatch {
                expected: key.hooks.to_string(),
                actual: self.hooks.address().to_string(),
            });
        }

        let route = key.id();
        if POOLS.has(ctx.storage(), route.as_bytes()) {
            return Err(VenueError::PoolAlreadyInitialized {
                route: route.to_string(),
            });
        }

        let pool = PoolState {
            key: key.clone(),
            reserve0: Uint128::zero(),
            reserve1: Uint128::zero(),
            total_shares: Uint128::zero(),
            initialized_step: ctx.step(),
        };
        POOLS.save(ctx.storage_mut(), route.as_bytes(), &pool)?;

        ctx.emit(
            Event::new("route_initialized")
                .add_attribute("route", route.to_string())
                .add_attribute("asset0", &key.asset0)
                .add_attribute("asset1", &key.asset1)
                .add_attribute("fee_bps", key.fee_bps.to_string()),
        );
        info!(route = %route, asset0 = %key.asset0, asset1 = %key.asset1, "route initialized");

        Ok(route)
    }

    pub fn pool(
        &self,
        storage: &dyn Storage,
        route: &RouteId,
    ) -> Result<PoolState, VenueError<H::Error>> {
        POOLS
            .may_load(storage, route.as_bytes())?
            .ok_or_else(|| VenueError::PoolNotFound {
                route: route.to_string(),
            })
    }

    pub fn position(&self, storage: &dyn Storage, key: &PositionKey) -> StdResult<Option<Position>> {
        POSITIONS.may_load(storage, &key.digest())
    }

    /// Price a swap against current reserves without executing it
    pub fn quote(
        &self,
        storage: &dyn Storage,
        key: &RouteKey,
        params: &SwapParams,
    ) -> Result<SwapDelta, VenueError<H::Error>> {
        let route = key.id();
        let pool = self.pool(storage, &route)?;
        price(&pool, &route, params)
    }

    /// Execute a swap for `counterparty`, who pays the input and receives the output.
    ///
    /// `before_swap` runs before any balance moves and `after_swap` after
    /// settlement; either may abort the swap.
    pub fn swap(
        &self,
        ctx: &mut StepContext<'_>,
        sender: &Addr,
        counterparty: &Addr,
        key: &RouteKey,
        params: SwapParams,
        hook_data: &[u8],
    ) -> Result<SwapDelta, VenueError<H::Error>> {
        let route = key.id();
        let mut pool = self.pool(ctx.storage(), &route)?;
        if params.amount.amount().is_zero() {
            return Err(VenueError::ZeroAmount {});
        }

        self.hooks
            .before_swap(ctx, sender, key, &params, hook_data)
            .map_err(VenueError::Hook)?;

        let delta = price(&pool, &route, &params)?;
        let input_asset = key.input_asset(params.zero_for_one);
        let output_asset = key.output_asset(params.zero_for_one);

        bank::transfer(
            ctx.storage_mut(),
            input_asset,
            counterparty,
            &self.address,
            delta.amount_in,
        )?;
        if !delta.amount_out.is_zero() {
            bank::transfer(
                ctx.storage_mut(),
                output_asset,
                &self.address,
                counterparty,
                delta.amount_out,
            )?;
        }

        if params.zero_for_one {
            pool.reserve0 = pool.reserve0.checked_add(delta.amount_in).map_err(StdError::from)?;
            pool.reserve1 = pool.reserve1.checked_sub(delta.amount_out).map_err(StdError::from)?;
        } else {
            pool.reserve1 = pool.reserve1.checked_add(delta.amount_in).map_err(StdError::from)?;
            pool.reserve0 = pool.reserve0.checked_sub(delta.amount_out).map_err(StdError::from)?;
        }
        POOLS.save(ctx.storage_mut(), route.as_bytes(), &pool)?;

        self.hooks
            .after_swap(ctx, sender, key, &params, &delta, hook_data)
            .map_err(VenueError::Hook)?;

        debug!(
            route = %route,
            counterparty = %counterparty,
            amount_in = %delta.amount_in,
            amount_out = %delta.amount_out,
            "swap settled"
        );
        Ok(delta)
    }

    /// Grow or shrink the position identified by `params`.
    ///
    /// Growing pulls both assets from the owner in proportion to the
    /// reserves; the first deposit into an empty pool is taken one to one.
    pub fn modify_liquidity(
        &self,
        ctx: &mut StepContext<'_>,
        sender: &Addr,
        key: &RouteKey,
        params: ModifyLiquidityParams,
        hook_data: &[u8],
    ) -> Result<LiquidityDelta, VenueError<H::Error>> {
        let route = key.id();
        let mut pool = self.pool(ctx.storage(), &route)?;
        if params.lower >= params.upper {
            return Err(VenueError::InvalidPositionBounds {
                lower: params.lower,
                upper: params.upper,
            });
        }
        if params.liquidity_delta == 0 {
            return Err(VenueError::ZeroAmount {});
        }

        let digest = params.position_key(route).digest();
        let mut position = POSITIONS
            .may_load(ctx.storage(), &digest)?
            .unwrap_or_else(|| Position {
                owner: params.owner.clone(),
                lower: params.lower,
                upper: params.upper,
                salt: params.salt,
                shares: Uint128::zero(),
            });
        let shares = Uint128::new(params.liquidity_delta.unsigned_abs());

        let (amount0, amount1) = if params.liquidity_delta > 0 {
            self.hooks
                .before_add_liquidity(ctx, sender, key, &params, hook_data)
                .map_err(VenueError::Hook)?;

            let (amount0, amount1) = if pool.total_shares.is_zero() {
                (shares, shares)
            } else {
                (
                    mul_div(shares, pool.reserve0, pool.total_shares, true)?,
                    mul_div(shares, pool.reserve1, pool.total_shares, true)?,
                )
            };
            for (asset, amount) in [(&key.asset0, amount0), (&key.asset1, amount1)] {
                if !amount.is_zero() {
                    bank::transfer(ctx.storage_mut(), asset, &params.owner, &self.address, amount)?;
                }
            }

            pool.reserve0 = pool.reserve0.checked_add(amount0).map_err(StdError::from)?;
            pool.reserve1 = pool.reserve1.checked_add(amount1).map_err(StdError::from)?;
            pool.total_shares = pool.total_shares.checked_add(shares).map_err(StdError::from)?;
            position.shares = position.shares.checked_add(shares).map_err(StdError::from)?;
            (amount0, amount1)
        } else {
            self.hooks
                .before_remove_liquidity(ctx, sender, key, &params, hook_data)
                .map_err(VenueError::Hook)?;

            if position.shares < shares {
                return Err(VenueError::PositionNotFound {
                    required: shares,
                    available: position.shares,
                });
            }

            let amount0 = mul_div(shares, pool.reserve0, pool.total_shares, false)?;
            let amount1 = mul_div(shares, pool.reserve1, pool.total_shares, false)?;
            for (asset, amount) in [(&key.asset0, amount0), (&key.asset1, amount1)] {
                if !amount.is_zero() {
                    bank::transfer(ctx.storage_mut(), asset, &self.address, &params.owner, amount)?;
                }
            }

            pool.reserve0 -= amount0;
            pool.reserve1 -= amount1;
            pool.total_shares -= shares;
            position.shares -= shares;
            (amount0, amount1)
        };

        if position.shares.is_zero() {
            POSITIONS.remove(ctx.storage_mut(), &digest);
        } else {
            POSITIONS.save(ctx.storage_mut(), &digest, &position)?;
        }
        POOLS.save(ctx.storage_mut(), route.as_bytes(), &pool)?;

        debug!(
            route = %route,
            owner = %params.owner,
            liquidity_delta = params.liquidity_delta,
            %amount0,
            %amount1,
            "liquidity modified"
        );
        Ok(LiquidityDelta {
            amount0,
            amount1,
            liquidity_after: position.shares,
        })
    }
}

fn price<E>(
    pool: &PoolState,
    route: &RouteId,
    params: &SwapParams,
) -> Result<SwapDelta, VenueError<E>> {
    let (reserve_in, reserve_out) = pool.reserves(params.zero_for_one);
    let insufficient = || VenueError::InsufficientLiquidity {
        route: route.to_string(),
    };
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(insufficient());
    }

    let fee_complement = Uint128::from(BPS_DENOMINATOR - pool.key.fee_bps);
    let denominator = Uint128::from(BPS_DENOMINATOR);

    match params.amount {
        SwapAmount::ExactInput(amount_in) => {
            let net_in = mul_div(amount_in, fee_complement, denominator, false)?;
            let amount_out = mul_div(
                reserve_out,
                net_in,
                reserve_in.checked_add(net_in).map_err(StdError::from)?,
                false,
            )?;
            if !params.limit.is_zero() && amount_out < params.limit {
                return Err(VenueError::SlippageExceeded {
                    limit: params.limit,
                    actual: amount_out,
                });
            }
            Ok(SwapDelta {
                amount_in,
                amount_out,
            })
        }
        SwapAmount::ExactOutput(amount_out) => {
            if amount_out >= reserve_out {
                return Err(insufficient());
            }
            let net_in = mul_div(reserve_in, amount_out, reserve_out - amount_out, true)?;
            let amount_in = mul_div(net_in, denominator, fee_complement, true)?;
            if !params.limit.is_zero() && amount_in > params.limit {
                return Err(VenueError::SlippageExceeded {
                    limit: params.limit,
                    actual: amount_in,
                });
            }
            Ok(SwapDelta {
                amount_in,
                amount_out,
            })
        }
    }
}

/// `a * b / denominator` over a 256-bit intermediate
fn mul_div(a: Uint128, b: Uint128, denominator: Uint128, round_up: bool) -> StdResult<Uint128> {
    if denominator.is_zero() {
        return Err(StdError::generic_err("division by zero"));
    }
    let numerator = Uint256::from(a) * Uint256::from(b);
    let denominator = Uint256::from(denominator);
    let mut quotient = numerator / denominator;
    if round_up && !(numerator % denominator).is_zero() {
        quotient += Uint256::one();
    }
    Ok(Uint128::try_from(quotient)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_rounds_on_request() {
        let (a, b, d) = (Uint128::new(10), Uint128::new(10), Uint128::new(3));
        assert_eq!(mul_div(a, b, d, false).unwrap(), Uint128::new(33));
        assert_eq!(mul_div(a, b, d, true).unwrap(), Uint128::new(34));
        assert_eq!(mul_div(a, b, Uint128::new(4), true).unwrap(), Uint128::new(25));
    }

    #[test]
    fn mul_div_survives_wide_intermediate() {
        let max = Uint128::MAX;
        assert_eq!(mul_div(max, max, max, false).unwrap(), max);
    }

    #[test]
    fn mul_div_rejects_zero_denominator() {
        assert!(mul_div(Uint128::one(), Uint128::one(), Uint128::zero(), false).is_err());
    }
}
