use cosmwasm_std::{Addr, Event};
use entropy_intents_runtime::StepContext;
use entropy_intents_types::{
    decode_payload, is_execution_allowed, require_route_matches_selection, validate,
};
use entropy_intents_venue::{
    ModifyLiquidityParams, RouteKey, SwapDelta, SwapParams, VenueHooks,
};
use tracing::{debug, warn};

use crate::error::GateError;
use crate::state::{CONFIG, LAST_TRADE_STEP, POSITION_ACTIVATION, ROUTERS};
use crate::EnforcementGate;

impl VenueHooks for EnforcementGate {
    type Error = GateError;

    fn address(&self) -> &Addr {
        EnforcementGate::address(self)
    }

    /// Empty hook data is an ungoverned trade; anything else must decode to
    /// an intent that is valid, routed through its selected route and inside
    /// its execution constraints at the current step.
    fn before_swap(
        &self,
        ctx: &mut StepContext<'_>,
        sender: &Addr,
        key: &RouteKey,
        _params: &SwapParams,
        hook_data: &[u8],
    ) -> Result<(), GateError> {
        ensure_router(ctx, sender)?;

        let Some(intent) = decode_payload(hook_data)? else {
            debug!(router = %sender, "ungoverned trade");
            return Ok(());
        };

        let route = key.id();
        let step = ctx.step();
        let checked = validate(&intent)
            .and_then(|_| require_route_matches_selection(&intent, &route, step, ctx.beacons()))
            .and_then(|_| is_execution_allowed(&intent, step));
        if let Err(err) = checked {
            warn!(route = %route, step, error = %err, "governed trade rejected");
            return Err(err.into());
        }

        debug!(route = %route, step, "governed trade admitted");
        Ok(())
    }

    fn after_swap(
        &self,
        ctx: &mut StepContext<'_>,
        sender: &Addr,
        key: &RouteKey,
        _params: &SwapParams,
        delta: &SwapDelta,
        hook_data: &[u8],
    ) -> Result<(), GateError> {
        ensure_router(ctx, sender)?;

        let route = key.id();
        let step = ctx.step();
        let governed = !hook_data.is_empty();
        if governed {
            LAST_TRADE_STEP.save(ctx.storage_mut(), route.as_bytes(), &step)?;
            debug!(route = %route, step, "last trade step recorded");
        }

        let origin = ctx.origin().clone();
        ctx.emit(
            Event::new("trade_executed")
                .add_attribute("route", route.to_string())
                .add_attribute("router", sender.as_str())
                .add_attribute("origin", origin.as_str())
                .add_attribute("step", step.to_string())
                .add_attribute("governed", governed.to_string())
                .add_attribute("amount_in", delta.amount_in)
                .add_attribute("amount_out", delta.amount_out),
        );
        Ok(())
    }

    /// Latches the activation step the first time a position grows
    fn before_add_liquidity(
        &self,
        ctx: &mut StepContext<'_>,
        sender: &Addr,
        key: &RouteKey,
        params: &ModifyLiquidityParams,
        _hook_data: &[u8],
    ) -> Result<(), GateError> {
        ensure_router(ctx, sender)?;

        let route = key.id();
        let digest = params.position_key(route).digest();
        let step = ctx.step();
        if !POSITION_ACTIVATION.has(ctx.storage(), &digest) {
            POSITION_ACTIVATION.save(ctx.storage_mut(), &digest, &step)?;
            debug!(route = %route, owner = %params.owner, step, "position activation latched");
        }

        ctx.emit(
            Event::new("liquidity_added")
                .add_attribute("route", route.to_string())
                .add_attribute("owner", params.owner.as_str())
                .add_attribute("lower", params.lower.to_string())
                .add_attribute("upper", params.upper.to_string())
                .add_attribute("salt", hex::encode(params.salt)),
        );
        Ok(())
    }

    /// Blocks withdrawal in the step of a governed trade on the route, then
    /// enforces the activation delay for positions the gate has seen grow
    fn before_remove_liquidity(
        &self,
        ctx: &mut StepContext<'_>,
        sender: &Addr,
        key: &RouteKey,
        params: &ModifyLiquidityParams,
        _hook_data: &[u8],
    ) -> Result<(), GateError> {
        ensure_router(ctx, sender)?;

        let route = key.id();
        let step = ctx.step();
        if LAST_TRADE_STEP.may_load(ctx.storage(), route.as_bytes())? == Some(step) {
            warn!(route = %route, step, owner = %params.owner, "removal blocked after same-step trade");
            return Err(GateError::RemovalBlockedSameStep {
                route: route.to_string(),
                step,
            });
        }

        let digest = params.position_key(route).digest();
        let Some(activated_at) = POSITION_ACTIVATION.may_load(ctx.storage(), &digest)? else {
            return Ok(());
        };

        let required = CONFIG.load(ctx.storage())?.liquidity_activation_steps;
        if step.saturating_sub(activated_at) < required {
            warn!(route = %route, owner = %params.owner, activated_at, step, required, "removal before activation");
            return Err(GateError::LiquidityActivationPending {
                activated_at,
                current_step: step,
                required,
            });
        }
        Ok(())
    }
}

fn ensure_router(ctx: &StepContext<'_>, sender: &Addr) -> Result<(), GateError> {
    if !ROUTERS.has(ctx.storage(), sender) {
        warn!(router = %sender, "caller is not an allow-listed router");
        return Err(GateError::RouterNotAllowed {
            router: sender.to_string(),
        });
    }
    Ok(())
}
