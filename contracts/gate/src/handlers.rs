use cosmwasm_std::{Addr, Event};
use entropy_intents_runtime::StepContext;
use tracing::info;

use crate::error::GateError;
use crate::state::{Config, CONFIG, ROUTERS};

pub fn execute_instantiate(
    ctx: &mut StepContext<'_>,
    admin: Addr,
    liquidity_activation_steps: u64,
    routers: Vec<Addr>,
) -> Result<(), GateError> {
    let config = Config {
        admin,
        liquidity_activation_steps: liquidity_activation_steps.max(1),
    };
    CONFIG.save(ctx.storage_mut(), &config)?;

    let step = ctx.step();
    for router in &routers {
        ROUTERS.save(ctx.storage_mut(), router, &step)?;
    }

    info!(
        admin = %config.admin,
        liquidity_activation_steps = config.liquidity_activation_steps,
        routers = routers.len(),
        "gate instantiated"
    );
    Ok(())
}

pub fn execute_add_router(
    ctx: &mut StepContext<'_>,
    sender: &Addr,
    router: Addr,
) -> Result<(), GateError> {
    ensure_admin(ctx, sender)?;
    if ROUTERS.has(ctx.storage(), &router) {
        return Err(GateError::RouterAlreadyAllowed {
            router: router.to_string(),
        });
    }

    let step = ctx.step();
    ROUTERS.save(ctx.storage_mut(), &router, &step)?;

    ctx.emit(Event::new("router_added").add_attribute("router", router.as_str()));
    info!(router = %router, "router allow-listed");
    Ok(())
}

pub fn execute_remove_router(
    ctx: &mut StepContext<'_>,
    sender: &Addr,
    router: Addr,
) -> Result<(), GateError> {
    ensure_admin(ctx, sender)?;
    if !ROUTERS.has(ctx.storage(), &router) {
        return Err(GateError::RouterNotFound {
            router: router.to_string(),
        });
    }

    ROUTERS.remove(ctx.storage_mut(), &router);

    ctx.emit(Event::new("router_removed").add_attribute("router", router.as_str()));
    info!(router = %router, "router removed");
    Ok(())
}

/// Zero is coerced to one step
pub fn execute_set_liquidity_activation_steps(
    ctx: &mut StepContext<'_>,
    sender: &Addr,
    steps: u64,
) -> Result<u64, GateError> {
    let mut config = ensure_admin(ctx, sender)?;
    config.liquidity_activation_steps = steps.max(1);
    CONFIG.save(ctx.storage_mut(), &config)?;

    ctx.emit(
        Event::new("activation_steps_updated")
            .add_attribute("steps", config.liquidity_activation_steps.to_string()),
    );
    info!(
        requested = steps,
        liquidity_activation_steps = config.liquidity_activation_steps,
        "liquidity activation delay updated"
    );
    Ok(config.liquidity_activation_steps)
}

pub fn execute_transfer_admin(
    ctx: &mut StepContext<'_>,
    sender: &Addr,
    new_admin: Addr,
) -> Result<(), GateError> {
    let mut config = ensure_admin(ctx, sender)?;
    let previous = std::mem::replace(&mut config.admin, new_admin);
    CONFIG.save(ctx.storage_mut(), &config)?;

    ctx.emit(
        Event::new("admin_transferred")
            .add_attribute("previous", previous.as_str())
            .add_attribute("admin", config.admin.as_str()),
    );
    info!(previous = %previous, admin = %config.admin, "gate admin transferred");
    Ok(())
}

fn ensure_admin(ctx: &StepContext<'_>, sender: &Addr) -> Result<Config, GateError> {
    let config = CONFIG.load(ctx.storage())?;
    if &config.admin != sender {
        return Err(GateError::Unauthorized {});
    }
    Ok(config)
}
