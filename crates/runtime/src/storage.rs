use std::collections::BTreeMap;
use std::ops::Bound;

use cosmwasm_std::{Order, Record, Storage};
use sha2::{Digest, Sha256};

/// Write buffer over a base store.
///
/// Reads see buffered writes first. Nothing reaches the base store until
/// [`StorageTransaction::commit`]; dropping the transaction discards it.
pub struct StorageTransaction<'a> {
    base: &'a mut dyn Storage,
    /// `None` marks a buffered removal
    pending: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a> StorageTransaction<'a> {
    pub fn new(base: &'a mut dyn Storage) -> Self {
        Self {
            base,
            pending: BTreeMap::new(),
        }
    }

    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    /// Digest of the buffered writes in key order
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for (key, value) in &self.pending {
            hasher.update((key.len() as u64).to_be_bytes());
            hasher.update(key);
            match value {
                Some(value) => {
                    hasher.update([1u8]);
                    hasher.update((value.len() as u64).to_be_bytes());
                    hasher.update(value);
                }
                None => hasher.update([0u8]),
            }
        }
        hasher.finalize().into()
    }

    pub fn commit(self) {
        for (key, value) in self.pending {
            match value {
                Some(value) => self.base.set(&key, &value),
                None => self.base.remove(&key),
            }
        }
    }
}

impl Storage for StorageTransaction<'_> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.pending.get(key) {
            Some(buffered) => buffered.clone(),
            None => self.base.get(key),
        }
    }

    fn range<'b>(
        &'b self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'b> {
        if let (Some(start), Some(end)) = (start, end) {
            if start >= end {
                return Box::new(std::iter::empty());
            }
        }

        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.base.range(start, end, Order::Ascending).collect();

        let lower = start.map_or(Bound::Unbounded, Bound::Included);
        let upper = end.map_or(Bound::Unbounded, Bound::Excluded);
        for (key, value) in self.pending.range::<[u8], _>((lower, upper)) {
            match value {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }

        let records: Vec<Record> = merged.into_iter().collect();
        match order {
            Order::Ascending => Box::new(records.into_iter()),
            Order::Descending => Box::new(records.into_iter().rev()),
        }
    }

    fn set(&mut self, key: &[u8], value: &[u8]) {
        self.pending.insert(key.to_vec(), Some(value.to_vec()));
    }

    fn remove(&mut self, key: &[u8]) {
        self.pending.insert(key.to_vec(), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::MemoryStorage;

    fn seeded() -> MemoryStorage {
        let mut store = MemoryStorage::new();
        store.set(b"a", b"1");
        store.set(b"b", b"2");
        store.set(b"c", b"3");
        store
    }

    #[test]
    fn reads_see_buffered_writes() {
        let mut base = seeded();
        let mut tx = StorageTransaction::new(&mut base);
        tx.set(b"a", b"10");
        tx.remove(b"b");

        assert_eq!(tx.get(b"a"), Some(b"10".to_vec()));
        assert_eq!(tx.get(b"b"), None);
        assert_eq!(tx.get(b"c"), Some(b"3".to_vec()));
    }

    #[test]
    fn drop_discards_writes() {
        let mut base = seeded();
        {
            let mut tx = StorageTransaction::new(&mut base);
            tx.set(b"a", b"10");
            tx.set(b"z", b"26");
        }
        assert_eq!(base.get(b"a"), Some(b"1".to_vec()));
        assert_eq!(base.get(b"z"), None);
    }

    #[test]
    fn commit_applies_writes_and_removals() {
        let mut base = seeded();
        let mut tx = StorageTransaction::new(&mut base);
        tx.set(b"z", b"26");
        tx.remove(b"a");
        assert_eq!(tx.pending_writes(), 2);
        tx.commit();

        assert_eq!(base.get(b"z"), Some(b"26".to_vec()));
        assert_eq!(base.get(b"a"), None);
    }

    #[test]
    fn digest_tracks_buffered_content() {
        let mut base = seeded();
        let mut tx = StorageTransaction::new(&mut base);
        let empty = tx.digest();

        tx.set(b"a", b"10");
        let written = tx.digest();
        assert_ne!(written, empty);

        tx.set(b"a", b"11");
        assert_ne!(tx.digest(), written);

        tx.remove(b"a");
        assert_ne!(tx.digest(), empty);
    }

    #[test]
    fn range_merges_in_order() {
        let mut base = seeded();
        let mut tx = StorageTransaction::new(&mut base);
        tx.set(b"bb", b"22");
        tx.remove(b"c");

        let keys: Vec<Vec<u8>> = tx
            .range(None, None, Order::Ascending)
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec![b"a".to_vec(), b"b".to_vec(), b"bb".to_vec()]);

        let keys: Vec<Vec<u8>> = tx
            .range(Some(b"b".as_slice()), Some(b"c".as_slice()), Order::Descending)
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec![b"bb".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn inverted_range_is_empty() {
        let mut base = seeded();
        let tx = StorageTransaction::new(&mut base);
        assert_eq!(tx.range(Some(b"c".as_slice()), Some(b"a".as_slice()), Order::Ascending).count(), 0);
    }
}
