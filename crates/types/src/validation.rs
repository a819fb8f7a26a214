//! Stateless rule set shared by the ledger, the gate and the executor.
//!
//! Every function here is a pure function of the intent, the current step and,
//! for route selection, the beacon of the most recently finalized step.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use crate::{
    Beacon, Intent, IntentError, RouteId, MAX_DELAY, MAX_ROUTES, MAX_WINDOW, MIN_DELAY,
    MIN_WINDOW,
};

/// Source of finalized per-step beacons
pub trait BeaconSource {
    /// Beacon of `step`, or `None` if that step has not been finalized
    fn beacon_at(&self, step: u64) -> Option<Beacon>;
}

impl BeaconSource for BTreeMap<u64, Beacon> {
    fn beacon_at(&self, step: u64) -> Option<Beacon> {
        self.get(&step).copied()
    }
}

/// Check the intent's shape invariants
pub fn validate(intent: &Intent) -> Result<(), IntentError> {
    let window = intent
        .end_step
        .checked_sub(intent.start_step)
        .filter(|w| (MIN_WINDOW..=MAX_WINDOW).contains(w));
    if window.is_none() {
        return Err(IntentError::InvalidWindow {
            start_step: intent.start_step,
            end_step: intent.end_step,
        });
    }

    if !(MIN_DELAY..=MAX_DELAY).contains(&intent.min_delay_steps) {
        return Err(IntentError::InvalidDelay {
            min_delay_steps: intent.min_delay_steps,
        });
    }

    let count = usize::from(intent.allowed_route_count);
    if count == 0 || count > MAX_ROUTES {
        return Err(IntentError::InvalidRouteCount {
            count: intent.allowed_route_count,
        });
    }

    Ok(())
}

/// Check the execution window and, once a first attempt is latched, the min delay.
///
/// With `created_at_step == 0` the attempt counts as the first one and the
/// delay is not checked.
pub fn is_execution_allowed(intent: &Intent, current_step: u64) -> Result<(), IntentError> {
    if current_step < intent.start_step {
        return Err(IntentError::ExecutionWindowNotStarted {
            current_step,
            start_step: intent.start_step,
        });
    }
    if current_step > intent.end_step {
        return Err(IntentError::ExecutionWindowExpired {
            current_step,
            end_step: intent.end_step,
        });
    }

    if intent.created_at_step != 0 {
        let elapsed = current_step.saturating_sub(u64::from(intent.created_at_step));
        if elapsed < u64::from(intent.min_delay_steps) {
            return Err(IntentError::MinDelayNotMet {
                current_step,
                created_at_step: intent.created_at_step,
                min_delay_steps: intent.min_delay_steps,
            });
        }
    }

    Ok(())
}

pub fn is_route_allowed(intent: &Intent, route: &RouteId) -> bool {
    intent.routes().iter().any(|allowed| allowed == route)
}

/// Index into the live routes selected by `beacon` for `intent_hash`
pub fn route_index(beacon: &Beacon, intent_hash: &[u8; 32], route_count: u8) -> usize {
    let mut hasher = Sha256::new();
    hasher.update(beacon);
    hasher.update(intent_hash);
    let digest: [u8; 32] = hasher.finalize().into();

    // big-endian digest reduced modulo the route count
    let modulus = u64::from(route_count.max(1));
    let index = digest
        .iter()
        .fold(0u64, |acc, byte| (acc * 256 + u64::from(*byte)) % modulus);
    index as usize
}

/// Route the intent must settle through at `current_step`.
///
/// Single-route intents need no entropy. Otherwise the choice mixes the
/// intent hash with the beacon of step `current_step - 1`, which does not
/// exist until that step has closed.
pub fn select_route(
    intent: &Intent,
    current_step: u64,
    beacons: &dyn BeaconSource,
) -> Result<RouteId, IntentError> {
    let routes = intent.routes();
    match routes.len() {
        0 => Err(IntentError::InvalidRouteCount {
            count: intent.allowed_route_count,
        }),
        1 => Ok(routes[0]),
        count => {
            let beacon = current_step
                .checked_sub(1)
                .and_then(|previous| beacons.beacon_at(previous))
                .ok_or(IntentError::BeaconUnavailable { current_step })?;
            let index = route_index(&beacon, &intent.selection_hash(), count as u8);
            Ok(routes[index])
        }
    }
}

/// Fail with `RouteNotAllowed` unless `route` is the selected route
pub fn require_route_matches_selection(
    intent: &Intent,
    route: &RouteId,
    current_step: u64,
    beacons: &dyn BeaconSource,
) -> Result<(), IntentError> {
    if !is_route_allowed(intent, route) {
        return Err(IntentError::RouteNotAllowed { route: *route });
    }
    if select_route(intent, current_step, beacons)? != *route {
        return Err(IntentError::RouteNotAllowed { route: *route });
    }
    Ok(())
}
