use cosmwasm_std::{Order, StdResult, Storage};
use cw_storage_plus::Bound;
use entropy_intents_runtime::StepView;
use entropy_intents_types::StoredIntent;

use crate::error::LedgerError;
use crate::msg::{ConfigResponse, IntentResponse, IntentsResponse};
use crate::state::{CONFIG, INTENTS, NEXT_INTENT_ID};

const DEFAULT_LIMIT: u32 = 30;
const MAX_LIMIT: u32 = 100;

pub fn query_config(storage: &dyn Storage) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(storage)?;
    Ok(ConfigResponse {
        executor: config.executor.map(|addr| addr.to_string()),
        intent_count: query_intent_count(storage)?,
    })
}

pub fn query_intent(storage: &dyn Storage, id: u64) -> Result<StoredIntent, LedgerError> {
    INTENTS
        .may_load(storage, id)?
        .ok_or(LedgerError::InvalidIntent { id })
}

pub fn query_intent_count(storage: &dyn Storage) -> StdResult<u64> {
    Ok(NEXT_INTENT_ID.may_load(storage)?.unwrap_or_default())
}

/// Advisory check: known, not executed, and inside its window at `view.step`
pub fn query_is_executable(view: &StepView<'_>, id: u64) -> bool {
    match INTENTS.may_load(view.storage, id) {
        Ok(Some(stored)) => is_executable_at(&stored, view.step),
        _ => false,
    }
}

pub fn query_intents(
    view: &StepView<'_>,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<IntentsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let intents = INTENTS
        .range(view.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (id, stored) = item?;
            Ok(IntentResponse {
                id,
                executable: is_executable_at(&stored, view.step),
                stored,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(IntentsResponse { intents })
}

fn is_executable_at(stored: &StoredIntent, step: u64) -> bool {
    !stored.executed && (stored.intent.start_step..=stored.intent.end_step).contains(&step)
}
