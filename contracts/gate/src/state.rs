use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    /// Steps a new position must age before it may shrink, at least 1
    pub liquidity_activation_steps: u64,
}

pub const CONFIG: Item<Config> = Item::new("gate_config");

/// router -> step it was allow-listed
pub const ROUTERS: Map<&Addr, u64> = Map::new("gate_routers");

/// position digest -> step the position was first seen growing
pub const POSITION_ACTIVATION: Map<&[u8], u64> = Map::new("gate_position_activation");

/// route id -> step of the latest governed trade
pub const LAST_TRADE_STEP: Map<&[u8], u64> = Map::new("gate_last_trade_step");
