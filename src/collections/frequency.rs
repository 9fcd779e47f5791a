use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// Item counts with an inverted count -> items index.
///
/// Within a count bucket, items that reached the count by being incremented
/// sit at the tail (most recent last) and items that reached it by being
/// decremented sit at the head (most recent first). Zero counts and empty
/// buckets are never stored.
#[derive(Debug, Clone)]
pub struct FrequencyIndex<T> {
    pub(crate) counts_by_item: HashMap<T, u64>,
    pub(crate) items_by_count: HashMap<u64, VecDeque<T>>,
}

impl<T> Default for FrequencyIndex<T> {
    fn default() -> Self {
        Self {
            counts_by_item: HashMap::new(),
            items_by_count: HashMap::new(),
        }
    }
}

impl<T> FrequencyIndex<T>
where
    T: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(expected_items: usize) -> Self {
        Self {
            counts_by_item: HashMap::with_capacity(expected_items),
            items_by_count: HashMap::with_capacity(expected_items),
        }
    }

    /// Increments `adding` and, if given, decrements `removing`.
    pub fn update(&mut self, adding: T, removing: Option<T>) {
        self.increment(adding);
        if let Some(removing) = removing {
            self.decrement(&removing);
        }
    }

    /// Saturates at `u64::MAX`.
    pub fn increment(&mut self, item: T) {
        let old_count = self.count(&item);
        if old_count == u64::MAX {
            return;
        }
        let new_count = old_count + 1;

        self.counts_by_item.insert(item.clone(), new_count);
        if old_count > 0 {
            self.detach(&item, old_count);
        }
        self.items_by_count
            .entry(new_count)
            .or_default()
            .push_back(item);
    }

    /// No-op for items that are not present.
    pub fn decrement(&mut self, item: &T) {
        let Some(&old_count) = self.counts_by_item.get(item) else {
            return;
        };
        let new_count = old_count - 1;

        self.detach(item, old_count);
        if new_count == 0 {
            self.counts_by_item.remove(item);
        } else {
            self.counts_by_item.insert(item.clone(), new_count);
            self.items_by_count
                .entry(new_count)
                .or_default()
                .push_front(item.clone());
        }
    }

    pub fn count(&self, item: &T) -> u64 {
        self.counts_by_item.get(item).copied().unwrap_or(0)
    }

    /// Items sharing `count`, in bucket order.
    pub fn items_with_count(&self, count: u64) -> Option<&VecDeque<T>> {
        self.items_by_count.get(&count)
    }

    /// Count groups from the highest count down, each in bucket order.
    pub fn descending(&self) -> Vec<(u64, Vec<T>)> {
        let mut groups: Vec<(u64, Vec<T>)> = self
            .items_by_count
            .iter()
            .map(|(count, items)| (*count, items.iter().cloned().collect()))
            .collect();
        groups.sort_by(|a, b| b.0.cmp(&a.0));
        groups
    }

    /// Number of distinct items with a positive count.
    pub fn len(&self) -> usize {
        self.counts_by_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts_by_item.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts_by_item.clear();
        self.items_by_count.clear();
    }

    fn detach(&mut self, item: &T, count: u64) {
        if let Some(bucket) = self.items_by_count.get_mut(&count) {
            bucket.retain(|e| e != item);
            if bucket.is_empty() {
                self.items_by_count.remove(&count);
            }
        }
    }
}
