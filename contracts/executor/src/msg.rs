use cosmwasm_std::{Addr, Uint128};
use entropy_intents_types::RouteId;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Settle one stored intent through `route`
    ExecuteIntent {
        id: u64,
        route: RouteId,
        output_limit: Uint128,
    },

    /// Settle every listed intent or none of them
    ExecuteBatch {
        ids: Vec<u64>,
        routes: Vec<RouteId>,
        output_limits: Vec<Uint128>,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Route an execution of `id` must use at the queried step
    SelectedRoute { id: u64 },
    BatchCount {},
}

/// Outcome of one settled intent
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExecutionReceipt {
    pub intent_id: u64,
    pub route: RouteId,
    pub amount_in: Uint128,
    /// Paid to the beneficiary in full
    pub amount_out: Uint128,
    pub beneficiary: Addr,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BatchReceipt {
    pub batch_id: u64,
    /// In submission order
    pub receipts: Vec<ExecutionReceipt>,
}
