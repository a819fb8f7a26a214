use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};
use entropy_intents_types::StoredIntent;

#[cw_serde]
pub struct Config {
    /// Sole identity allowed to mark intents executed
    pub executor: Option<Addr>,
}

pub const CONFIG: Item<Config> = Item::new("ledger_config");
pub const NEXT_INTENT_ID: Item<u64> = Item::new("ledger_next_intent_id");
pub const INTENTS: Map<u64, StoredIntent> = Map::new("ledger_intents");
