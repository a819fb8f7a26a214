use cosmwasm_std::{to_json_binary, Addr, Binary, Event, StdResult, Storage, Uint128, Uint256};
use entropy_intents_gate::EnforcementGate;
use entropy_intents_ledger::IntentLedger;
use entropy_intents_runtime::{bank, StepContext, StepView};
use entropy_intents_types::{select_route, RouteId};
use entropy_intents_venue::{SwapParams, SwapRouter};
use tracing::{info, warn};

use crate::error::ExecutorError;
use crate::msg::{BatchReceipt, ExecuteMsg, ExecutionReceipt, QueryMsg};
use crate::state::BATCH_COUNTER;

/// Hard cap on intents per batch
pub const MAX_BATCH_SIZE: usize = 8;

/// Execution stage tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStage {
    Checking,
    PullingFunds,
    Trading,
    Marking,
    Settling,
}

/// Carries out stored intents on behalf of anyone who calls it.
///
/// The executor holds no funds between units of work: input is pulled from
/// the payer, traded through the allow-listed router, and the whole output is
/// forwarded to the beneficiary within the same unit.
pub struct IntentExecutor {
    address: Addr,
    ledger: IntentLedger,
    router: SwapRouter<EnforcementGate>,
    max_batch_size: usize,
}

impl IntentExecutor {
    /// `max_batch_size` is clamped to `1..=MAX_BATCH_SIZE`
    pub fn new(
        address: Addr,
        ledger: IntentLedger,
        router: SwapRouter<EnforcementGate>,
        max_batch_size: usize,
    ) -> Self {
        Self {
            address,
            ledger,
            router,
            max_batch_size: max_batch_size.clamp(1, MAX_BATCH_SIZE),
        }
    }

    pub fn address(&self) -> &Addr {
        &self.address
    }

    pub fn ledger(&self) -> &IntentLedger {
        &self.ledger
    }

    pub fn router(&self) -> &SwapRouter<EnforcementGate> {
        &self.router
    }

    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    /// Dispatch a serialized operation; the reply is the JSON receipt
    pub fn execute(
        &self,
        ctx: &mut StepContext<'_>,
        msg: ExecuteMsg,
    ) -> Result<Binary, ExecutorError> {
        match msg {
            ExecuteMsg::ExecuteIntent {
                id,
                route,
                output_limit,
            } => Ok(to_json_binary(&self.execute_intent(ctx, id, route, output_limit)?)?),
            ExecuteMsg::ExecuteBatch {
                ids,
                routes,
                output_limits,
            } => Ok(to_json_binary(&self.execute_batch(
                ctx,
                &ids,
                &routes,
                &output_limits,
            )?)?),
        }
    }

    pub fn query(&self, view: &StepView<'_>, msg: QueryMsg) -> Result<Binary, ExecutorError> {
        match msg {
            QueryMsg::SelectedRoute { id } => Ok(to_json_binary(
                &self.selected_route_for_intent(view, id, view.step)?,
            )?),
            QueryMsg::BatchCount {} => Ok(to_json_binary(&self.batch_count(view.storage)?)?),
        }
    }

    /// Settle intent `id` through `route`.
    ///
    /// Sells `amount_in` of the route's first asset for the second. The trade
    /// carries the stored intent as hook data, so the gate re-checks window,
    /// delay and route selection; `output_limit` is passed to the venue as the
    /// minimum output.
    pub fn execute_intent(
        &self,
        ctx: &mut StepContext<'_>,
        id: u64,
        route: RouteId,
        output_limit: Uint128,
    ) -> Result<ExecutionReceipt, ExecutorError> {
        let step = ctx.step();
        info!(
            intent_id = id,
            route = %route,
            step,
            stage = ?ExecutionStage::Checking,
            "Starting intent execution"
        );

        let stored = self.ledger.intent(ctx.storage(), id)?;
        if stored.executed {
            warn!(intent_id = id, "intent already executed");
            return Err(ExecutorError::IntentAlreadyExecuted { id });
        }
        if !self.ledger.is_executable(&ctx.view(), id) {
            warn!(intent_id = id, step, "intent not executable at this step");
            return Err(ExecutorError::IntentNotExecutable { id });
        }

        // encoded before the latch: the first attempt carries created_at_step = 0
        let payload = stored.intent.encode();
        self.ledger.latch_first_attempt(ctx, &self.address, id)?;

        let key = self.router.venue().pool(ctx.storage(), &route)?.key;
        let (input_asset, output_asset) = (key.asset0.clone(), key.asset1.clone());

        info!(
            intent_id = id,
            stage = ?ExecutionStage::PullingFunds,
            payer = %stored.payer,
            amount_in = %stored.amount_in,
            "Pulling input"
        );
        bank::transfer_from(
            ctx.storage_mut(),
            &input_asset,
            &self.address,
            &stored.payer,
            &self.address,
            stored.amount_in,
        )
        .map_err(|e| ExecutorError::TransferFailed {
            reason: e.to_string(),
        })?;

        info!(intent_id = id, stage = ?ExecutionStage::Trading, "Submitting governed trade");
        self.router.swap(
            ctx,
            &self.address,
            &key,
            SwapParams::exact_input(true, stored.amount_in, output_limit),
            &payload,
        )?;

        info!(intent_id = id, stage = ?ExecutionStage::Marking, "Marking intent executed");
        self.ledger.mark_executed(ctx, &self.address, id)?;

        let amount_out = bank::balance(ctx.storage(), &output_asset, &self.address)?;
        if amount_out.is_zero() {
            warn!(intent_id = id, "settlement produced no output");
            return Err(ExecutorError::ZeroOutput { id });
        }
        if Uint256::from(amount_out) < stored.intent.min_output {
            warn!(
                intent_id = id,
                %amount_out,
                minimum = %stored.intent.min_output,
                "settlement below minimum output"
            );
            return Err(ExecutorError::InsufficientOutput {
                id,
                minimum: stored.intent.min_output,
                actual: amount_out,
            });
        }

        info!(
            intent_id = id,
            stage = ?ExecutionStage::Settling,
            beneficiary = %stored.beneficiary,
            %amount_out,
            "Paying beneficiary"
        );
        bank::transfer(
            ctx.storage_mut(),
            &output_asset,
            &self.address,
            &stored.beneficiary,
            amount_out,
        )
        .map_err(|e| ExecutorError::TransferFailed {
            reason: e.to_string(),
        })?;

        Ok(ExecutionReceipt {
            intent_id: id,
            route,
            amount_in: stored.amount_in,
            amount_out,
            beneficiary: stored.beneficiary,
        })
    }

    /// Execute every item in order as one unit.
    ///
    /// The first failing item aborts the batch; the error names its index and
    /// nothing done by earlier items survives.
    pub fn execute_batch(
        &self,
        ctx: &mut StepContext<'_>,
        ids: &[u64],
        routes: &[RouteId],
        output_limits: &[Uint128],
    ) -> Result<BatchReceipt, ExecutorError> {
        if ids.is_empty() {
            return Err(ExecutorError::EmptyBatch {});
        }
        if ids.len() != routes.len() || ids.len() != output_limits.len() {
            return Err(ExecutorError::BatchLengthMismatch {
                intents: ids.len(),
                routes: routes.len(),
                limits: output_limits.len(),
            });
        }
        if ids.len() > self.max_batch_size {
            return Err(ExecutorError::BatchTooLarge {
                size: ids.len(),
                max: self.max_batch_size,
            });
        }

        let mut receipts = Vec::with_capacity(ids.len());
        let items = ids.iter().zip(routes).zip(output_limits).enumerate();
        for (index, ((id, route), limit)) in items {
            let receipt = self
                .execute_intent(ctx, *id, *route, *limit)
                .map_err(|source| {
                    warn!(
                        index,
                        intent_id = *id,
                        error = %source,
                        "batch item failed, aborting batch"
                    );
                    ExecutorError::BatchIntentFailed {
                        index,
                        source: Box::new(source),
                    }
                })?;
            receipts.push(receipt);
        }

        let batch_id = BATCH_COUNTER.may_load(ctx.storage())?.unwrap_or_default();
        BATCH_COUNTER.save(ctx.storage_mut(), &(batch_id + 1))?;

        let members = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        ctx.emit(
            Event::new("batch_executed")
                .add_attribute("batch_id", batch_id.to_string())
                .add_attribute("intent_ids", members),
        );
        info!(batch_id, size = ids.len(), "batch executed");

        Ok(BatchReceipt { batch_id, receipts })
    }

    /// Route `execute_intent` must be given for intent `id` at `current_step`
    pub fn selected_route_for_intent(
        &self,
        view: &StepView<'_>,
        id: u64,
        current_step: u64,
    ) -> Result<RouteId, ExecutorError> {
        let stored = self.ledger.intent(view.storage, id)?;
        Ok(select_route(&stored.intent, current_step, view.beacons)?)
    }

    pub fn batch_count(&self, storage: &dyn Storage) -> StdResult<u64> {
        Ok(BATCH_COUNTER.may_load(storage)?.unwrap_or_default())
    }
}
