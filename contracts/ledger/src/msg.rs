use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;
use entropy_intents_types::{Intent, StoredIntent};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Claim the executor slot, or hand it over from the current holder
    SetExecutor { executor: String },

    /// Record an intent with the sender as beneficiary and payer
    Submit { intent: Intent, amount_in: Uint128 },

    /// Flag an intent as executed (executor only)
    MarkExecuted { id: u64 },
}

#[cw_serde]
pub enum QueryMsg {
    Config {},
    Intent { id: u64 },
    IntentCount {},
    IsExecutable { id: u64 },
    Intents {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct ConfigResponse {
    pub executor: Option<String>,
    pub intent_count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IntentResponse {
    pub id: u64,
    pub stored: StoredIntent,
    /// Advisory executability at the queried step
    pub executable: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IntentsResponse {
    pub intents: Vec<IntentResponse>,
}
