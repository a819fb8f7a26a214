//! Fungible asset balances and spending allowances.
//!
//! Balances live in the same transactional storage as every other component,
//! so fund movements roll back together with the unit of work.

use cosmwasm_std::{Addr, OverflowError, StdError, Storage, Uint128};
use cw_storage_plus::Map;
use thiserror::Error;

/// (asset, holder) -> balance
pub const BALANCES: Map<(&str, &Addr), Uint128> = Map::new("bank_balances");

/// (asset, owner, spender) -> remaining allowance
pub const ALLOWANCES: Map<(&str, &Addr, &Addr), Uint128> = Map::new("bank_allowances");

#[derive(Error, Debug)]
pub enum BankError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Transfer amount must be non-zero")]
    ZeroAmount {},

    #[error("Insufficient funds: {holder} holds {available}{asset}, needs {required}{asset}")]
    InsufficientFunds {
        asset: String,
        holder: String,
        required: Uint128,
        available: Uint128,
    },

    #[error("Insufficient allowance: {spender} may spend {available}{asset} of {owner}, needs {required}{asset}")]
    InsufficientAllowance {
        asset: String,
        owner: String,
        spender: String,
        required: Uint128,
        available: Uint128,
    },
}

pub fn balance(storage: &dyn Storage, asset: &str, holder: &Addr) -> Result<Uint128, BankError> {
    Ok(BALANCES
        .may_load(storage, (asset, holder))?
        .unwrap_or_default())
}

pub fn allowance(
    storage: &dyn Storage,
    asset: &str,
    owner: &Addr,
    spender: &Addr,
) -> Result<Uint128, BankError> {
    Ok(ALLOWANCES
        .may_load(storage, (asset, owner, spender))?
        .unwrap_or_default())
}

/// Create new units out of thin air (genesis funding and tests)
pub fn mint(
    storage: &mut dyn Storage,
    asset: &str,
    to: &Addr,
    amount: Uint128,
) -> Result<(), BankError> {
    if amount.is_zero() {
        return Err(BankError::ZeroAmount {});
    }
    let current = balance(storage, asset, to)?;
    BALANCES.save(storage, (asset, to), &current.checked_add(amount)?)?;
    Ok(())
}

pub fn transfer(
    storage: &mut dyn Storage,
    asset: &str,
    from: &Addr,
    to: &Addr,
    amount: Uint128,
) -> Result<(), BankError> {
    if amount.is_zero() {
        return Err(BankError::ZeroAmount {});
    }

    let available = balance(storage, asset, from)?;
    if available < amount {
        return Err(BankError::InsufficientFunds {
            asset: asset.to_string(),
            holder: from.to_string(),
            required: amount,
            available,
        });
    }

    BALANCES.save(storage, (asset, from), &(available - amount))?;
    let credited = balance(storage, asset, to)?.checked_add(amount)?;
    BALANCES.save(storage, (asset, to), &credited)?;
    Ok(())
}

/// Set (not add to) the amount `spender` may move out of `owner`'s balance
pub fn approve(
    storage: &mut dyn Storage,
    asset: &str,
    owner: &Addr,
    spender: &Addr,
    amount: Uint128,
) -> Result<(), BankError> {
    if amount.is_zero() {
        ALLOWANCES.remove(storage, (asset, owner, spender));
    } else {
        ALLOWANCES.save(storage, (asset, owner, spender), &amount)?;
    }
    Ok(())
}

/// Move `amount` from `owner` to `to` on the strength of a prior approval
pub fn transfer_from(
    storage: &mut dyn Storage,
    asset: &str,
    spender: &Addr,
    owner: &Addr,
    to: &Addr,
    amount: Uint128,
) -> Result<(), BankError> {
    let available = allowance(storage, asset, owner, spender)?;
    if available < amount {
        return Err(BankError::InsufficientAllowance {
            asset: asset.to_string(),
            owner: owner.to_string(),
            spender: spender.to_string(),
            required: amount,
            available,
        });
    }

    transfer(storage, asset, owner, to, amount)?;
    approve(storage, asset, owner, spender, available - amount)
}
