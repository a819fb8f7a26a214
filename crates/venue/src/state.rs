use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::Map;

use crate::RouteKey;

/// Reserves and share supply of one route
#[cw_serde]
pub struct PoolState {
    pub key: RouteKey,
    pub reserve0: Uint128,
    pub reserve1: Uint128,
    pub total_shares: Uint128,
    pub initialized_step: u64,
}

impl PoolState {
    pub fn reserves(&self, zero_for_one: bool) -> (Uint128, Uint128) {
        if zero_for_one {
            (self.reserve0, self.reserve1)
        } else {
            (self.reserve1, self.reserve0)
        }
    }
}

#[cw_serde]
pub struct Position {
    pub owner: Addr,
    pub lower: i32,
    pub upper: i32,
    pub salt: [u8; 32],
    pub shares: Uint128,
}

/// route id -> pool
pub const POOLS: Map<&[u8], PoolState> = Map::new("venue_pools");

/// position digest -> position
pub const POSITIONS: Map<&[u8], Position> = Map::new("venue_positions");
