use std::fmt;

use cosmwasm_std::{Addr, Uint128, Uint256};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{validate, IntentError};

/// Maximum number of routes an intent may name
pub const MAX_ROUTES: usize = 4;

/// Bounds on `end_step - start_step`
pub const MIN_WINDOW: u64 = 2;
pub const MAX_WINDOW: u64 = 256;

/// Bounds on `min_delay_steps`
pub const MIN_DELAY: u32 = 0;
pub const MAX_DELAY: u32 = 100;

/// Finalized unpredictability value for one closed step
pub type Beacon = [u8; 32];

/// Stable identity of a liquidity route
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RouteId(pub [u8; 32]);

impl RouteId {
    pub const ZERO: RouteId = RouteId([0u8; 32]);

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; 32]> for RouteId {
    fn from(bytes: [u8; 32]) -> Self {
        RouteId(bytes)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

/// A deferred, constrained trade request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    // ═══════════════════════════════════════════════════════════════════════════
    // TIMING
    // ═══════════════════════════════════════════════════════════════════════════

    /// First step (inclusive) at which execution is legal
    pub start_step: u64,

    /// Last step (inclusive) at which execution is legal
    pub end_step: u64,

    /// Steps that must pass between the first attempt and a later execution
    pub min_delay_steps: u32,

    /// Step of the first admissible attempt, 0 while unset
    pub created_at_step: u32,

    // ═══════════════════════════════════════════════════════════════════════════
    // ROUTING
    // ═══════════════════════════════════════════════════════════════════════════

    /// Candidate routes; slots past `allowed_route_count` are ignored
    pub allowed_routes: [RouteId; MAX_ROUTES],

    pub allowed_route_count: u8,

    // ═══════════════════════════════════════════════════════════════════════════
    // SETTLEMENT
    // ═══════════════════════════════════════════════════════════════════════════

    /// Minimum acceptable settlement output
    pub min_output: Uint256,

    /// Disambiguates otherwise identical intents
    pub salt: [u8; 32],
}

impl Intent {
    /// Create a new intent builder
    pub fn builder() -> IntentBuilder {
        IntentBuilder::default()
    }

    /// The live portion of `allowed_routes`
    pub fn routes(&self) -> &[RouteId] {
        let count = usize::from(self.allowed_route_count).min(MAX_ROUTES);
        &self.allowed_routes[..count]
    }

    pub fn window(&self) -> u64 {
        self.end_step.saturating_sub(self.start_step)
    }

    /// Hash used as routing entropy.
    ///
    /// The lazily latched `created_at_step` is zeroed first so latching can
    /// never move an intent onto a different route.
    pub fn selection_hash(&self) -> [u8; 32] {
        let mut canonical = self.clone();
        canonical.created_at_step = 0;
        Sha256::digest(canonical.encode()).into()
    }
}

/// Builder for constructing intents
#[derive(Default)]
pub struct IntentBuilder {
    start_step: u64,
    end_step: u64,
    min_delay_steps: u32,
    routes: Vec<RouteId>,
    min_output: Uint256,
    salt: [u8; 32],
}

impl IntentBuilder {
    pub fn window(mut self, start_step: u64, end_step: u64) -> Self {
        self.start_step = start_step;
        self.end_step = end_step;
        self
    }

    pub fn min_delay_steps(mut self, steps: u32) -> Self {
        self.min_delay_steps = steps;
        self
    }

    pub fn route(mut self, route: RouteId) -> Self {
        self.routes.push(route);
        self
    }

    pub fn routes(mut self, routes: impl IntoIterator<Item = RouteId>) -> Self {
        self.routes.extend(routes);
        self
    }

    pub fn min_output(mut self, min_output: impl Into<Uint256>) -> Self {
        self.min_output = min_output.into();
        self
    }

    pub fn salt(mut self, salt: [u8; 32]) -> Self {
        self.salt = salt;
        self
    }

    /// Build and validate the intent
    pub fn build(self) -> Result<Intent, IntentError> {
        if self.routes.is_empty() || self.routes.len() > MAX_ROUTES {
            return Err(IntentError::InvalidRouteCount {
                count: u8::try_from(self.routes.len()).unwrap_or(u8::MAX),
            });
        }

        let mut allowed_routes = [RouteId::ZERO; MAX_ROUTES];
        allowed_routes[..self.routes.len()].copy_from_slice(&self.routes);

        let intent = Intent {
            start_step: self.start_step,
            end_step: self.end_step,
            min_delay_steps: self.min_delay_steps,
            created_at_step: 0,
            allowed_routes,
            allowed_route_count: self.routes.len() as u8,
            min_output: self.min_output,
            salt: self.salt,
        };
        validate(&intent)?;
        Ok(intent)
    }
}

/// Ledger entry for one submitted intent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredIntent {
    pub intent: Intent,
    /// Receives settlement output
    pub beneficiary: Addr,
    /// Source of input funds; must have authorized the executor
    pub payer: Addr,
    pub amount_in: Uint128,
    pub executed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(byte: u8) -> RouteId {
        RouteId([byte; 32])
    }

    #[test]
    fn builder_fills_unused_slots_with_zero() {
        let intent = Intent::builder()
            .window(10, 20)
            .routes([route(1), route(2)])
            .build()
            .unwrap();

        assert_eq!(intent.allowed_route_count, 2);
        assert_eq!(intent.routes(), &[route(1), route(2)]);
        assert_eq!(intent.allowed_routes[2], RouteId::ZERO);
        assert_eq!(intent.created_at_step, 0);
    }

    #[test]
    fn builder_rejects_too_many_routes() {
        let err = Intent::builder()
            .window(10, 20)
            .routes((1..=5).map(route))
            .build()
            .unwrap_err();
        assert_eq!(err, IntentError::InvalidRouteCount { count: 5 });
    }

    #[test]
    fn routes_ignores_slots_past_count() {
        let mut intent = Intent::builder()
            .window(10, 20)
            .route(route(7))
            .build()
            .unwrap();
        intent.allowed_routes[3] = route(9);

        assert_eq!(intent.routes(), &[route(7)]);
    }

    #[test]
    fn selection_hash_ignores_latched_step() {
        let mut intent = Intent::builder()
            .window(10, 20)
            .routes([route(1), route(2)])
            .build()
            .unwrap();
        let before = intent.selection_hash();
        intent.created_at_step = 15;

        assert_eq!(before, intent.selection_hash());
    }

    #[test]
    fn selection_hash_depends_on_salt() {
        let a = Intent::builder()
            .window(10, 20)
            .route(route(1))
            .salt([1u8; 32])
            .build()
            .unwrap();
        let b = Intent::builder()
            .window(10, 20)
            .route(route(1))
            .salt([2u8; 32])
            .build()
            .unwrap();

        assert_ne!(a.selection_hash(), b.selection_hash());
    }

    #[test]
    fn route_id_displays_as_hex() {
        assert_eq!(
            route(0xab).to_string(),
            format!("0x{}", "ab".repeat(32))
        );
    }
}
