use cosmwasm_std::{to_json_binary, Addr, Binary, StdResult, Storage};
use entropy_intents_runtime::StepContext;
use entropy_intents_types::RouteId;
use entropy_intents_venue::PositionKey;

use crate::error::GateError;
use crate::handlers::{
    execute_add_router, execute_instantiate, execute_remove_router,
    execute_set_liquidity_activation_steps, execute_transfer_admin,
};
use crate::msg::{ConfigResponse, ExecuteMsg, QueryMsg, RoutersResponse};
use crate::queries::{
    query_config, query_is_router_allowed, query_last_trade_step, query_position_activation,
    query_routers,
};

/// Extension-point implementation installed on the venue.
///
/// Holds no notion of intent ids: governed trades carry the encoded intent
/// as hook data and the gate re-derives every check from it.
#[derive(Clone, Debug)]
pub struct EnforcementGate {
    address: Addr,
}

impl EnforcementGate {
    pub fn new(address: Addr) -> Self {
        Self { address }
    }

    pub fn address(&self) -> &Addr {
        &self.address
    }

    pub fn instantiate(
        &self,
        ctx: &mut StepContext<'_>,
        admin: Addr,
        liquidity_activation_steps: u64,
        routers: Vec<Addr>,
    ) -> Result<(), GateError> {
        execute_instantiate(ctx, admin, liquidity_activation_steps, routers)
    }

    /// Dispatch a serialized admin operation
    pub fn execute(
        &self,
        ctx: &mut StepContext<'_>,
        sender: &Addr,
        msg: ExecuteMsg,
    ) -> Result<Binary, GateError> {
        match msg {
            ExecuteMsg::AddRouter { router } => {
                execute_add_router(ctx, sender, Addr::unchecked(router))?;
                Ok(Binary::default())
            }
            ExecuteMsg::RemoveRouter { router } => {
                execute_remove_router(ctx, sender, Addr::unchecked(router))?;
                Ok(Binary::default())
            }
            ExecuteMsg::SetLiquidityActivationSteps { steps } => {
                let stored = execute_set_liquidity_activation_steps(ctx, sender, steps)?;
                Ok(to_json_binary(&stored)?)
            }
            ExecuteMsg::TransferAdmin { new_admin } => {
                execute_transfer_admin(ctx, sender, Addr::unchecked(new_admin))?;
                Ok(Binary::default())
            }
        }
    }

    pub fn query(&self, storage: &dyn Storage, msg: QueryMsg) -> StdResult<Binary> {
        match msg {
            QueryMsg::Config {} => to_json_binary(&query_config(storage)?),
            QueryMsg::IsRouterAllowed { router } => {
                to_json_binary(&query_is_router_allowed(storage, &Addr::unchecked(router)))
            }
            QueryMsg::Routers {} => to_json_binary(&query_routers(storage)?),
        }
    }

    pub fn add_router(
        &self,
        ctx: &mut StepContext<'_>,
        sender: &Addr,
        router: Addr,
    ) -> Result<(), GateError> {
        execute_add_router(ctx, sender, router)
    }

    pub fn remove_router(
        &self,
        ctx: &mut StepContext<'_>,
        sender: &Addr,
        router: Addr,
    ) -> Result<(), GateError> {
        execute_remove_router(ctx, sender, router)
    }

    /// Returns the stored value after coercion
    pub fn set_liquidity_activation_steps(
        &self,
        ctx: &mut StepContext<'_>,
        sender: &Addr,
        steps: u64,
    ) -> Result<u64, GateError> {
        execute_set_liquidity_activation_steps(ctx, sender, steps)
    }

    pub fn transfer_admin(
        &self,
        ctx: &mut StepContext<'_>,
        sender: &Addr,
        new_admin: Addr,
    ) -> Result<(), GateError> {
        execute_transfer_admin(ctx, sender, new_admin)
    }

    pub fn config(&self, storage: &dyn Storage) -> StdResult<ConfigResponse> {
        query_config(storage)
    }

    pub fn is_router_allowed(&self, storage: &dyn Storage, router: &Addr) -> bool {
        query_is_router_allowed(storage, router)
    }

    pub fn routers(&self, storage: &dyn Storage) -> StdResult<RoutersResponse> {
        query_routers(storage)
    }

    pub fn position_activation(
        &self,
        storage: &dyn Storage,
        key: &PositionKey,
    ) -> StdResult<Option<u64>> {
        query_position_activation(storage, key)
    }

    pub fn last_trade_step(&self, storage: &dyn Storage, route: &RouteId) -> StdResult<Option<u64>> {
        query_last_trade_step(storage, route)
    }
}
