use std::fmt::Display;

use cosmwasm_std::{Addr, Event, MemoryStorage, Storage};
use entropy_intents_types::{Beacon, BeaconSource};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::{BeaconLog, StorageTransaction};

/// Committed event tagged with the step that committed it
#[derive(Clone, Debug, PartialEq)]
pub struct StepEvent {
    pub step: u64,
    pub event: Event,
}

/// Read-only view of committed state at the current step
pub struct StepView<'a> {
    pub storage: &'a dyn Storage,
    pub step: u64,
    pub beacons: &'a dyn BeaconSource,
}

/// Execution context of one unit of work
pub struct StepContext<'a> {
    storage: StorageTransaction<'a>,
    step: u64,
    origin: Addr,
    beacons: &'a BeaconLog,
    events: Vec<Event>,
}

impl<'a> StepContext<'a> {
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Identity that initiated the unit of work
    pub fn origin(&self) -> &Addr {
        &self.origin
    }

    pub fn storage(&self) -> &dyn Storage {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut dyn Storage {
        &mut self.storage
    }

    pub fn beacons(&self) -> &dyn BeaconSource {
        self.beacons
    }

    pub fn view(&self) -> StepView<'_> {
        StepView {
            storage: &self.storage,
            step: self.step,
            beacons: self.beacons,
        }
    }

    /// Stage an event; it is only published if the unit commits
    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn staged_events(&self) -> &[Event] {
        &self.events
    }
}

/// The shared, append-only, step-ordered ledger
pub struct Chain {
    chain_id: String,
    step: u64,
    storage: MemoryStorage,
    beacons: BeaconLog,
    /// Running digest of the units committed in the open step
    activity: [u8; 32],
    events: Vec<StepEvent>,
}

impl Chain {
    pub fn new(chain_id: impl Into<String>, genesis_step: u64, beacon_seed: Beacon) -> Self {
        let chain_id = chain_id.into();
        Self {
            beacons: BeaconLog::new(chain_id.clone(), beacon_seed),
            chain_id,
            step: genesis_step,
            storage: MemoryStorage::new(),
            activity: [0u8; 32],
            events: Vec::new(),
        }
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn beacon(&self, step: u64) -> Option<Beacon> {
        self.beacons.beacon_at(step)
    }

    /// Pin the beacon of a step that has not closed yet
    pub fn set_beacon(&mut self, step: u64, beacon: Beacon) {
        self.beacons.set(step, beacon);
    }

    /// Close the current step and open the next one
    pub fn advance(&mut self) -> u64 {
        let beacon = self.beacons.finalize(self.step, &self.activity);
        self.activity = [0u8; 32];
        debug!(step = self.step, beacon = %hex_prefix(&beacon), "step finalized");
        self.step += 1;
        self.step
    }

    pub fn advance_to(&mut self, step: u64) {
        while self.step < step {
            self.advance();
        }
    }

    pub fn view(&self) -> StepView<'_> {
        StepView {
            storage: &self.storage,
            step: self.step,
            beacons: &self.beacons,
        }
    }

    pub fn events(&self) -> &[StepEvent] {
        &self.events
    }

    /// Committed events of one type, in commit order
    pub fn events_of_type<'s>(&'s self, ty: &'s str) -> impl Iterator<Item = &'s StepEvent> + 's {
        self.events.iter().filter(move |e| e.event.ty == ty)
    }

    /// Run `f` as one unit of work.
    ///
    /// On `Ok` every buffered write and staged event is committed; on `Err`
    /// the unit leaves no trace.
    pub fn transact<T, E, F>(&mut self, origin: &Addr, f: F) -> Result<T, E>
    where
        E: Display,
        F: FnOnce(&mut StepContext<'_>) -> Result<T, E>,
    {
        let step = self.step;
        let mut ctx = StepContext {
            storage: StorageTransaction::new(&mut self.storage),
            step,
            origin: origin.clone(),
            beacons: &self.beacons,
            events: Vec::new(),
        };

        match f(&mut ctx) {
            Ok(value) => {
                let StepContext {
                    storage, events, ..
                } = ctx;
                let writes = storage.pending_writes();
                self.activity = fold_activity(&self.activity, origin, &storage.digest());
                storage.commit();
                info!(step, origin = %origin, writes, events = events.len(), "unit of work committed");
                self.events
                    .extend(events.into_iter().map(|event| StepEvent { step, event }));
                Ok(value)
            }
            Err(err) => {
                debug!(step, origin = %origin, error = %err, "unit of work aborted");
                Err(err)
            }
        }
    }
}

fn fold_activity(activity: &[u8; 32], origin: &Addr, writes: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(activity);
    hasher.update((origin.as_str().len() as u64).to_be_bytes());
    hasher.update(origin.as_str().as_bytes());
    hasher.update(writes);
    hasher.finalize().into()
}

fn hex_prefix(beacon: &Beacon) -> String {
    beacon[..4].iter().map(|b| format!("{b:02x}")).collect()
}
