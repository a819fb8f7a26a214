use cosmwasm_std::{Addr, Event, Uint128};
use entropy_intents_runtime::StepContext;
use entropy_intents_types::{validate, Intent, StoredIntent};
use tracing::{debug, info};

use crate::error::LedgerError;
use crate::state::{Config, CONFIG, INTENTS, NEXT_INTENT_ID};

pub fn execute_instantiate(ctx: &mut StepContext<'_>) -> Result<(), LedgerError> {
    CONFIG.save(ctx.storage_mut(), &Config { executor: None })?;
    NEXT_INTENT_ID.save(ctx.storage_mut(), &0)?;
    Ok(())
}

/// Claim the executor slot while unset, or hand it over as the current holder
pub fn execute_set_executor(
    ctx: &mut StepContext<'_>,
    sender: &Addr,
    executor: Addr,
) -> Result<(), LedgerError> {
    let mut config = CONFIG.load(ctx.storage())?;
    if let Some(current) = &config.executor {
        if current != sender {
            return Err(LedgerError::Unauthorized {});
        }
    }

    config.executor = Some(executor.clone());
    CONFIG.save(ctx.storage_mut(), &config)?;

    ctx.emit(
        Event::new("executor_set")
            .add_attribute("executor", executor.as_str())
            .add_attribute("sender", sender.as_str()),
    );
    info!(executor = %executor, "ledger executor set");
    Ok(())
}

pub fn execute_submit(
    ctx: &mut StepContext<'_>,
    sender: &Addr,
    mut intent: Intent,
    amount_in: Uint128,
) -> Result<u64, LedgerError> {
    validate(&intent)?;
    // every execution step must fit the first-attempt latch
    if u32::try_from(intent.end_step).is_err() {
        return Err(LedgerError::StepOutOfRange {
            step: intent.end_step,
        });
    }
    if amount_in.is_zero() {
        return Err(LedgerError::ZeroAmount {});
    }

    // latched on the first execution attempt, never at submission
    intent.created_at_step = 0;

    let id = NEXT_INTENT_ID.load(ctx.storage())?;
    let stored = StoredIntent {
        intent,
        beneficiary: sender.clone(),
        payer: sender.clone(),
        amount_in,
        executed: false,
    };
    INTENTS.save(ctx.storage_mut(), id, &stored)?;
    NEXT_INTENT_ID.save(ctx.storage_mut(), &(id + 1))?;

    ctx.emit(
        Event::new("intent_submitted")
            .add_attribute("intent_id", id.to_string())
            .add_attribute("beneficiary", sender.as_str())
            .add_attribute("start_step", stored.intent.start_step.to_string())
            .add_attribute("end_step", stored.intent.end_step.to_string()),
    );
    info!(
        intent_id = id,
        beneficiary = %sender,
        start_step = stored.intent.start_step,
        end_step = stored.intent.end_step,
        "intent submitted"
    );
    Ok(id)
}

pub fn execute_mark_executed(
    ctx: &mut StepContext<'_>,
    sender: &Addr,
    id: u64,
) -> Result<(), LedgerError> {
    ensure_executor(ctx, sender)?;

    let mut stored = INTENTS
        .may_load(ctx.storage(), id)?
        .filter(|stored| !stored.executed)
        .ok_or(LedgerError::InvalidOrAlreadyExecuted { id })?;
    stored.executed = true;
    INTENTS.save(ctx.storage_mut(), id, &stored)?;

    ctx.emit(Event::new("intent_executed").add_attribute("intent_id", id.to_string()));
    info!(intent_id = id, step = ctx.step(), "intent marked executed");
    Ok(())
}

/// Set `created_at_step` to the current step if it is still unset.
///
/// Returns the latched value, which is unchanged when an earlier attempt
/// already set it.
pub fn execute_latch_first_attempt(
    ctx: &mut StepContext<'_>,
    sender: &Addr,
    id: u64,
) -> Result<u32, LedgerError> {
    ensure_executor(ctx, sender)?;

    let mut stored = INTENTS
        .may_load(ctx.storage(), id)?
        .ok_or(LedgerError::InvalidIntent { id })?;
    if stored.intent.created_at_step != 0 {
        return Ok(stored.intent.created_at_step);
    }

    let step = ctx.step();
    let latched = u32::try_from(step).map_err(|_| LedgerError::StepOutOfRange { step })?;
    stored.intent.created_at_step = latched;
    INTENTS.save(ctx.storage_mut(), id, &stored)?;

    debug!(intent_id = id, step, "first attempt latched");
    Ok(latched)
}

fn ensure_executor(ctx: &StepContext<'_>, sender: &Addr) -> Result<(), LedgerError> {
    match CONFIG.load(ctx.storage())?.executor {
        None => Err(LedgerError::ExecutorNotSet {}),
        Some(executor) if &executor == sender => Ok(()),
        Some(_) => Err(LedgerError::Unauthorized {}),
    }
}
