use cosmwasm_std::{Addr, Order, StdResult, Storage};
use entropy_intents_types::RouteId;
use entropy_intents_venue::PositionKey;

use crate::msg::{ConfigResponse, RouterResponse, RoutersResponse};
use crate::state::{CONFIG, LAST_TRADE_STEP, POSITION_ACTIVATION, ROUTERS};

pub fn query_config(storage: &dyn Storage) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(storage)?;
    Ok(ConfigResponse {
        admin: config.admin.to_string(),
        liquidity_activation_steps: config.liquidity_activation_steps,
    })
}

pub fn query_is_router_allowed(storage: &dyn Storage, router: &Addr) -> bool {
    ROUTERS.has(storage, router)
}

pub fn query_routers(storage: &dyn Storage) -> StdResult<RoutersResponse> {
    let routers = ROUTERS
        .range(storage, None, None, Order::Ascending)
        .map(|item| {
            let (router, added_at_step) = item?;
            Ok(RouterResponse {
                router: router.to_string(),
                added_at_step,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;
    Ok(RoutersResponse { routers })
}

pub fn query_position_activation(storage: &dyn Storage, key: &PositionKey) -> StdResult<Option<u64>> {
    POSITION_ACTIVATION.may_load(storage, &key.digest())
}

pub fn query_last_trade_step(storage: &dyn Storage, route: &RouteId) -> StdResult<Option<u64>> {
    LAST_TRADE_STEP.may_load(storage, route.as_bytes())
}
