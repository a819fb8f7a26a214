use cosmwasm_std::{to_json_binary, Addr, Binary, StdResult, Storage, Uint128};
use entropy_intents_runtime::{StepContext, StepView};
use entropy_intents_types::{Intent, StoredIntent};

use crate::error::LedgerError;
use crate::handlers::{
    execute_instantiate, execute_latch_first_attempt, execute_mark_executed,
    execute_set_executor, execute_submit,
};
use crate::msg::{ConfigResponse, ExecuteMsg, IntentResponse, IntentsResponse, QueryMsg};
use crate::queries::{
    query_config, query_intent, query_intent_count, query_intents, query_is_executable,
};

/// Registry of submitted intents.
///
/// Entries are never removed or cancelled; the executed flag is the only
/// field that changes after submission and it only goes from false to true.
#[derive(Clone, Debug)]
pub struct IntentLedger {
    address: Addr,
}

impl IntentLedger {
    pub fn new(address: Addr) -> Self {
        Self { address }
    }

    pub fn address(&self) -> &Addr {
        &self.address
    }

    /// Dispatch a serialized operation; the reply carries its result
    pub fn execute(
        &self,
        ctx: &mut StepContext<'_>,
        sender: &Addr,
        msg: ExecuteMsg,
    ) -> Result<Binary, LedgerError> {
        match msg {
            ExecuteMsg::SetExecutor { executor } => {
                execute_set_executor(ctx, sender, Addr::unchecked(executor))?;
                Ok(Binary::default())
            }
            ExecuteMsg::Submit { intent, amount_in } => {
                let id = execute_submit(ctx, sender, intent, amount_in)?;
                Ok(to_json_binary(&id)?)
            }
            ExecuteMsg::MarkExecuted { id } => {
                execute_mark_executed(ctx, sender, id)?;
                Ok(Binary::default())
            }
        }
    }

    pub fn query(&self, view: &StepView<'_>, msg: QueryMsg) -> Result<Binary, LedgerError> {
        let reply = match msg {
            QueryMsg::Config {} => to_json_binary(&query_config(view.storage)?)?,
            QueryMsg::Intent { id } => to_json_binary(&IntentResponse {
                id,
                stored: query_intent(view.storage, id)?,
                executable: query_is_executable(view, id),
            })?,
            QueryMsg::IntentCount {} => to_json_binary(&query_intent_count(view.storage)?)?,
            QueryMsg::IsExecutable { id } => to_json_binary(&query_is_executable(view, id))?,
            QueryMsg::Intents { start_after, limit } => {
                to_json_binary(&query_intents(view, start_after, limit)?)?
            }
        };
        Ok(reply)
    }

    pub fn instantiate(&self, ctx: &mut StepContext<'_>) -> Result<(), LedgerError> {
        execute_instantiate(ctx)
    }

    pub fn set_executor(
        &self,
        ctx: &mut StepContext<'_>,
        sender: &Addr,
        executor: Addr,
    ) -> Result<(), LedgerError> {
        execute_set_executor(ctx, sender, executor)
    }

    /// Record an intent with `sender` as both beneficiary and payer
    pub fn submit(
        &self,
        ctx: &mut StepContext<'_>,
        sender: &Addr,
        intent: Intent,
        amount_in: Uint128,
    ) -> Result<u64, LedgerError> {
        execute_submit(ctx, sender, intent, amount_in)
    }

    pub fn mark_executed(
        &self,
        ctx: &mut StepContext<'_>,
        sender: &Addr,
        id: u64,
    ) -> Result<(), LedgerError> {
        execute_mark_executed(ctx, sender, id)
    }

    pub fn latch_first_attempt(
        &self,
        ctx: &mut StepContext<'_>,
        sender: &Addr,
        id: u64,
    ) -> Result<u32, LedgerError> {
        execute_latch_first_attempt(ctx, sender, id)
    }

    pub fn config(&self, storage: &dyn Storage) -> StdResult<ConfigResponse> {
        query_config(storage)
    }

    pub fn intent(&self, storage: &dyn Storage, id: u64) -> Result<StoredIntent, LedgerError> {
        query_intent(storage, id)
    }

    pub fn intent_count(&self, storage: &dyn Storage) -> StdResult<u64> {
        query_intent_count(storage)
    }

    pub fn is_executable(&self, view: &StepView<'_>, id: u64) -> bool {
        query_is_executable(view, id)
    }

    pub fn intents(
        &self,
        view: &StepView<'_>,
        start_after: Option<u64>,
        limit: Option<u32>,
    ) -> StdResult<IntentsResponse> {
        query_intents(view, start_after, limit)
    }
}
