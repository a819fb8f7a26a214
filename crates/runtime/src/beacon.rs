use std::collections::BTreeMap;

use entropy_intents_types::{Beacon, BeaconSource};
use sha2::{Digest, Sha256};

/// Beacons of closed steps.
///
/// A step's beacon is derived when the step closes, chained from the most
/// recent earlier beacon (or the genesis seed) and folded with the digest of
/// everything committed during that step. The seed and chain id alone do not
/// determine the beacon of any step in which a unit of work committed.
#[derive(Clone, Debug)]
pub struct BeaconLog {
    chain_id: String,
    seed: Beacon,
    beacons: BTreeMap<u64, Beacon>,
}

impl BeaconLog {
    pub fn new(chain_id: impl Into<String>, seed: Beacon) -> Self {
        Self {
            chain_id: chain_id.into(),
            seed,
            beacons: BTreeMap::new(),
        }
    }

    /// Derive and record the beacon of a closing step from the digest of its
    /// committed activity.
    ///
    /// An injected beacon for the same step is kept as is.
    pub fn finalize(&mut self, step: u64, activity: &[u8; 32]) -> Beacon {
        if let Some(existing) = self.beacons.get(&step) {
            return *existing;
        }

        let parent = self
            .beacons
            .range(..step)
            .next_back()
            .map(|(_, beacon)| *beacon)
            .unwrap_or(self.seed);

        let mut hasher = Sha256::new();
        hasher.update(parent);
        hasher.update(step.to_be_bytes());
        hasher.update(self.chain_id.as_bytes());
        hasher.update(activity);
        let beacon: Beacon = hasher.finalize().into();

        self.beacons.insert(step, beacon);
        beacon
    }

    pub fn set(&mut self, step: u64, beacon: Beacon) {
        self.beacons.insert(step, beacon);
    }

    pub fn latest(&self) -> Option<(u64, Beacon)> {
        self.beacons
            .iter()
            .next_back()
            .map(|(step, beacon)| (*step, *beacon))
    }
}

impl BeaconSource for BeaconLog {
    fn beacon_at(&self, step: u64) -> Option<Beacon> {
        self.beacons.get(&step).copied()
    }
}
