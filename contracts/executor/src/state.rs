use cw_storage_plus::Item;

/// Number of committed batches; also the id of the next one
pub const BATCH_COUNTER: Item<u64> = Item::new("executor_batch_counter");
