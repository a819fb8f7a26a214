use cosmwasm_std::{Addr, Uint128};
use entropy_intents_config::{validate_config, AppConfig};
use entropy_intents_executor::{BatchReceipt, ExecutionReceipt, IntentExecutor};
use entropy_intents_gate::msg::{ConfigResponse as GateConfig, RoutersResponse};
use entropy_intents_gate::EnforcementGate;
use entropy_intents_ledger::msg::IntentsResponse;
use entropy_intents_ledger::IntentLedger;
use entropy_intents_runtime::{bank, Chain, StepEvent};
use entropy_intents_types::{Intent, RouteId, StoredIntent};
use entropy_intents_venue::{
    LiquidityDelta, ModifyLiquidityParams, PoolState, RouteKey, SwapDelta, SwapParams,
    SwapRouter, Venue,
};
use tracing::info;

use crate::error::ProtocolError;

/// Every component deployed on one ledger.
///
/// Each mutating method is a single unit of work: it either commits all of
/// its effects at the current step or leaves no trace.
pub struct Protocol {
    chain: Chain,
    ledger: IntentLedger,
    gate: EnforcementGate,
    executor: IntentExecutor,
    admin: Addr,
}

impl Protocol {
    /// Validate `config`, open the ledger at its genesis step and deploy the
    /// ledger, gate, venue, router and executor under the configured addresses
    pub fn bootstrap(config: &AppConfig) -> Result<Self, ProtocolError> {
        validate_config(config)?;
        let seed = config.network.beacon_seed_bytes()?;
        let mut chain = Chain::new(
            config.network.chain_id.clone(),
            config.network.genesis_step,
            seed,
        );

        let contracts = &config.contracts;
        let gate = EnforcementGate::new(Addr::unchecked(&contracts.gate));
        let ledger = IntentLedger::new(Addr::unchecked(&contracts.ledger));
        let router = SwapRouter::new(
            Addr::unchecked(&contracts.router),
            Venue::new(Addr::unchecked(&contracts.venue), gate.clone()),
        );
        let executor = IntentExecutor::new(
            Addr::unchecked(&contracts.executor),
            ledger.clone(),
            router,
            config.executor.max_batch_size,
        );
        let admin = Addr::unchecked(&config.gate.admin);
        let routers: Vec<Addr> = config.gate.routers.iter().map(Addr::unchecked).collect();

        chain.transact(&admin, |ctx| -> Result<(), ProtocolError> {
            ledger.instantiate(ctx)?;
            ledger.set_executor(ctx, &admin, executor.address().clone())?;
            gate.instantiate(
                ctx,
                admin.clone(),
                config.gate.liquidity_activation_steps,
                routers,
            )?;
            Ok(())
        })?;

        info!(
            chain_id = %config.network.chain_id,
            environment = ?config.network.environment,
            step = chain.step(),
            "protocol deployed"
        );

        Ok(Self {
            chain,
            ledger,
            gate,
            executor,
            admin,
        })
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn chain_mut(&mut self) -> &mut Chain {
        &mut self.chain
    }

    pub fn ledger(&self) -> &IntentLedger {
        &self.ledger
    }

    pub fn gate(&self) -> &EnforcementGate {
        &self.gate
    }

    pub fn executor(&self) -> &IntentExecutor {
        &self.executor
    }

    pub fn router(&self) -> &SwapRouter<EnforcementGate> {
        self.executor.router()
    }

    pub fn venue(&self) -> &Venue<EnforcementGate> {
        self.executor.router().venue()
    }

    pub fn admin(&self) -> &Addr {
        &self.admin
    }

    pub fn step(&self) -> u64 {
        self.chain.step()
    }

    /// Close the current step; returns the new one
    pub fn advance(&mut self) -> u64 {
        self.chain.advance()
    }

    pub fn advance_to(&mut self, step: u64) {
        self.chain.advance_to(step)
    }

    pub fn events(&self) -> &[StepEvent] {
        self.chain.events()
    }

    // Funds

    pub fn mint(&mut self, asset: &str, to: &Addr, amount: Uint128) -> Result<(), ProtocolError> {
        self.chain.transact(to, |ctx| -> Result<(), ProtocolError> {
            bank::mint(ctx.storage_mut(), asset, to, amount)?;
            Ok(())
        })
    }

    pub fn approve(
        &mut self,
        owner: &Addr,
        asset: &str,
        spender: &Addr,
        amount: Uint128,
    ) -> Result<(), ProtocolError> {
        self.chain.transact(owner, |ctx| -> Result<(), ProtocolError> {
            bank::approve(ctx.storage_mut(), asset, owner, spender, amount)?;
            Ok(())
        })
    }

    /// Let the executor pull up to `amount` of `asset` from `owner`
    pub fn approve_executor(
        &mut self,
        owner: &Addr,
        asset: &str,
        amount: Uint128,
    ) -> Result<(), ProtocolError> {
        let executor = self.executor.address().clone();
        self.approve(owner, asset, &executor, amount)
    }

    pub fn balance(&self, asset: &str, holder: &Addr) -> Result<Uint128, ProtocolError> {
        Ok(bank::balance(self.chain.view().storage, asset, holder)?)
    }

    // Venue

    /// Initialize a pool governed by the gate
    pub fn create_route(
        &mut self,
        caller: &Addr,
        asset_a: &str,
        asset_b: &str,
        fee_bps: u32,
        tick_spacing: i32,
    ) -> Result<RouteKey, ProtocolError> {
        let key = RouteKey::new(
            asset_a,
            asset_b,
            fee_bps,
            tick_spacing,
            self.gate.address().clone(),
        );
        let venue = self.executor.router().venue();
        self.chain.transact(caller, |ctx| -> Result<(), ProtocolError> {
            venue.initialize(ctx, &key)?;
            Ok(())
        })?;
        Ok(key)
    }

    /// Add or remove liquidity through the router; `lp` owns the position
    pub fn modify_liquidity(
        &mut self,
        lp: &Addr,
        key: &RouteKey,
        params: ModifyLiquidityParams,
    ) -> Result<LiquidityDelta, ProtocolError> {
        let router = self.executor.router();
        self.chain.transact(lp, |ctx| -> Result<LiquidityDelta, ProtocolError> {
            Ok(router.modify_liquidity(ctx, lp, key, params, &[])?)
        })
    }

    /// Trade through the router; empty `hook_data` is an ungoverned trade
    pub fn swap(
        &mut self,
        trader: &Addr,
        key: &RouteKey,
        params: SwapParams,
        hook_data: &[u8],
    ) -> Result<SwapDelta, ProtocolError> {
        let router = self.executor.router();
        self.chain.transact(trader, |ctx| -> Result<SwapDelta, ProtocolError> {
            Ok(router.swap(ctx, trader, key, params, hook_data)?)
        })
    }

    pub fn pool(&self, route: &RouteId) -> Result<PoolState, ProtocolError> {
        Ok(self.venue().pool(self.chain.view().storage, route)?)
    }

    // Intents

    /// Record `intent` with `user` as beneficiary and payer
    pub fn submit_intent(
        &mut self,
        user: &Addr,
        intent: Intent,
        amount_in: Uint128,
    ) -> Result<u64, ProtocolError> {
        let ledger = &self.ledger;
        self.chain.transact(user, |ctx| -> Result<u64, ProtocolError> {
            Ok(ledger.submit(ctx, user, intent, amount_in)?)
        })
    }

    pub fn execute_intent(
        &mut self,
        keeper: &Addr,
        id: u64,
        route: RouteId,
        output_limit: Uint128,
    ) -> Result<ExecutionReceipt, ProtocolError> {
        let executor = &self.executor;
        self.chain
            .transact(keeper, |ctx| -> Result<ExecutionReceipt, ProtocolError> {
                Ok(executor.execute_intent(ctx, id, route, output_limit)?)
            })
    }

    pub fn execute_batch(
        &mut self,
        keeper: &Addr,
        ids: &[u64],
        routes: &[RouteId],
        output_limits: &[Uint128],
    ) -> Result<BatchReceipt, ProtocolError> {
        let executor = &self.executor;
        self.chain
            .transact(keeper, |ctx| -> Result<BatchReceipt, ProtocolError> {
                Ok(executor.execute_batch(ctx, ids, routes, output_limits)?)
            })
    }

    /// Route an execution of intent `id` must use in the current step
    pub fn selected_route(&self, id: u64) -> Result<RouteId, ProtocolError> {
        Ok(self
            .executor
            .selected_route_for_intent(&self.chain.view(), id, self.chain.step())?)
    }

    pub fn intent(&self, id: u64) -> Result<StoredIntent, ProtocolError> {
        Ok(self.ledger.intent(self.chain.view().storage, id)?)
    }

    pub fn intents(
        &self,
        start_after: Option<u64>,
        limit: Option<u32>,
    ) -> Result<IntentsResponse, ProtocolError> {
        Ok(self.ledger.intents(&self.chain.view(), start_after, limit)?)
    }

    pub fn is_executable(&self, id: u64) -> bool {
        self.ledger.is_executable(&self.chain.view(), id)
    }

    // Gate administration

    pub fn add_router(&mut self, sender: &Addr, router: Addr) -> Result<(), ProtocolError> {
        let gate = &self.gate;
        self.chain.transact(sender, |ctx| -> Result<(), ProtocolError> {
            Ok(gate.add_router(ctx, sender, router)?)
        })
    }

    pub fn remove_router(&mut self, sender: &Addr, router: Addr) -> Result<(), ProtocolError> {
        let gate = &self.gate;
        self.chain.transact(sender, |ctx| -> Result<(), ProtocolError> {
            Ok(gate.remove_router(ctx, sender, router)?)
        })
    }

    pub fn set_liquidity_activation_steps(
        &mut self,
        sender: &Addr,
        steps: u64,
    ) -> Result<u64, ProtocolError> {
        let gate = &self.gate;
        self.chain.transact(sender, |ctx| -> Result<u64, ProtocolError> {
            Ok(gate.set_liquidity_activation_steps(ctx, sender, steps)?)
        })
    }

    pub fn transfer_admin(&mut self, sender: &Addr, new_admin: Addr) -> Result<(), ProtocolError> {
        let gate = &self.gate;
        self.chain.transact(sender, |ctx| -> Result<(), ProtocolError> {
            Ok(gate.transfer_admin(ctx, sender, new_admin)?)
        })
    }

    pub fn gate_config(&self) -> Result<GateConfig, ProtocolError> {
        Ok(self.gate.config(self.chain.view().storage)?)
    }

    pub fn routers(&self) -> Result<RoutersResponse, ProtocolError> {
        Ok(self.gate.routers(self.chain.view().storage)?)
    }
}
