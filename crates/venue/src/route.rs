use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use entropy_intents_types::RouteId;
use sha2::{Digest, Sha256};

/// Defining parameters of a route
#[cw_serde]
pub struct RouteKey {
    /// Lexicographically smaller asset
    pub asset0: String,
    pub asset1: String,
    /// Swap fee in basis points
    pub fee_bps: u32,
    pub tick_spacing: i32,
    /// Extension-point implementation governing this route
    pub hooks: Addr,
}

impl RouteKey {
    /// Build a key with the assets in canonical order
    pub fn new(
        asset_a: impl Into<String>,
        asset_b: impl Into<String>,
        fee_bps: u32,
        tick_spacing: i32,
        hooks: Addr,
    ) -> Self {
        let (a, b) = (asset_a.into(), asset_b.into());
        let (asset0, asset1) = if a <= b { (a, b) } else { (b, a) };
        Self {
            asset0,
            asset1,
            fee_bps,
            tick_spacing,
            hooks,
        }
    }

    /// Stable identity derived from every defining parameter
    pub fn id(&self) -> RouteId {
        let mut hasher = Sha256::new();
        for field in [
            self.asset0.as_bytes(),
            self.asset1.as_bytes(),
            self.hooks.as_bytes(),
        ] {
            hasher.update((field.len() as u32).to_be_bytes());
            hasher.update(field);
        }
        hasher.update(self.fee_bps.to_be_bytes());
        hasher.update(self.tick_spacing.to_be_bytes());
        RouteId(hasher.finalize().into())
    }

    pub fn input_asset(&self, zero_for_one: bool) -> &str {
        if zero_for_one {
            &self.asset0
        } else {
            &self.asset1
        }
    }

    pub fn output_asset(&self, zero_for_one: bool) -> &str {
        if zero_for_one {
            &self.asset1
        } else {
            &self.asset0
        }
    }
}

/// Signed trade magnitude
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapAmount {
    /// Spend exactly this much input
    ExactInput(Uint128),
    /// Receive exactly this much output
    ExactOutput(Uint128),
}

impl SwapAmount {
    pub fn amount(&self) -> Uint128 {
        match self {
            SwapAmount::ExactInput(amount) | SwapAmount::ExactOutput(amount) => *amount,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapParams {
    pub zero_for_one: bool,
    pub amount: SwapAmount,
    /// Minimum output for exact input, maximum input for exact output; zero disables
    pub limit: Uint128,
}

impl SwapParams {
    pub fn exact_input(zero_for_one: bool, amount: Uint128, min_output: Uint128) -> Self {
        Self {
            zero_for_one,
            amount: SwapAmount::ExactInput(amount),
            limit: min_output,
        }
    }

    pub fn exact_output(zero_for_one: bool, amount: Uint128, max_input: Uint128) -> Self {
        Self {
            zero_for_one,
            amount: SwapAmount::ExactOutput(amount),
            limit: max_input,
        }
    }
}

/// Settled amounts of one swap, from the trader's side
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwapDelta {
    pub amount_in: Uint128,
    pub amount_out: Uint128,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModifyLiquidityParams {
    pub owner: Addr,
    pub lower: i32,
    pub upper: i32,
    /// Positive grows the position, negative shrinks it
    pub liquidity_delta: i128,
    pub salt: [u8; 32],
}

impl ModifyLiquidityParams {
    pub fn position_key(&self, route: RouteId) -> PositionKey {
        PositionKey {
            route,
            owner: self.owner.clone(),
            lower: self.lower,
            upper: self.upper,
            salt: self.salt,
        }
    }
}

/// Amounts moved by a liquidity change
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LiquidityDelta {
    pub amount0: Uint128,
    pub amount1: Uint128,
    pub liquidity_after: Uint128,
}

/// Identity of a liquidity position
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pub route: RouteId,
    pub owner: Addr,
    pub lower: i32,
    pub upper: i32,
    pub salt: [u8; 32],
}

impl PositionKey {
    /// Fixed-width storage key
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.route.as_bytes());
        hasher.update((self.owner.as_str().len() as u32).to_be_bytes());
        hasher.update(self.owner.as_bytes());
        hasher.update(self.lower.to_be_bytes());
        hasher.update(self.upper.to_be_bytes());
        hasher.update(self.salt);
        hasher.finalize().into()
    }
}
