use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use crate::utils::error::{Error, Result};

/// Outcome of appending one element to a `BoundedOrderedSet`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect<T> {
    /// The element was new and the set had room for it.
    Appended(T),
    /// The element was new and pushed out the least recently touched member.
    AppendedEvicting { appended: T, evicted: T },
    /// The element was already present; it only moved to the most recent end.
    NoOp,
}

/// Fixed-capacity set that remembers the order elements were last touched.
///
/// `order` runs from least to most recently touched and always holds exactly
/// the elements of `members`.
#[derive(Debug, Clone)]
pub struct BoundedOrderedSet<T> {
    capacity: usize,
    members: HashSet<T>,
    order: VecDeque<T>,
}

impl<T> BoundedOrderedSet<T>
where
    T: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity < 1 {
            return Err(Error::InvalidArgument(format!(
                "capacity {capacity} must be at least 1"
            )));
        }

        Ok(Self {
            capacity,
            members: HashSet::with_capacity(capacity + 1),
            order: VecDeque::with_capacity(capacity + 1),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, element: &T) -> bool {
        self.members.contains(element)
    }

    /// Iterates from the least to the most recently touched element.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter()
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.order.clear();
    }

    pub fn append(&mut self, element: T) -> Effect<T> {
        if self.members.contains(&element) {
            if self.order.back() != Some(&element) {
                if let Some(position) = self.order.iter().position(|e| *e == element) {
                    self.order.remove(position);
                }
                self.order.push_back(element);
            }
            return Effect::NoOp;
        }

        self.members.insert(element.clone());
        self.order.push_back(element.clone());

        if self.order.len() <= self.capacity {
            return Effect::Appended(element);
        }

        match self.order.pop_front() {
            Some(evicted) => {
                self.members.remove(&evicted);
                Effect::AppendedEvicting {
                    appended: element,
                    evicted,
                }
            }
            None => Effect::Appended(element),
        }
    }

    /// Appends every element in order and reports the net effect of the batch.
    ///
    /// The resulting set is identical to calling `append` once per element.
    /// The reported effects leave out `NoOp`s, elements that were inserted
    /// and evicted again within the batch, and previous members that were
    /// evicted and then re-inserted. Each surviving new element is reported in
    /// order of first appearance, paired with the oldest still-unreported
    /// eviction of a previous member.
    pub fn append_all<I>(&mut self, elements: I) -> Vec<Effect<T>>
    where
        I: IntoIterator<Item = T>,
    {
        let before: Vec<T> = self.order.iter().cloned().collect();
        let previous: HashSet<&T> = before.iter().collect();

        let mut first_seen: Vec<T> = Vec::new();
        let mut seen: HashSet<T> = HashSet::new();
        for element in elements {
            if seen.insert(element.clone()) {
                first_seen.push(element.clone());
            }
            self.append(element);
        }

        let mut evictions = before
            .iter()
            .filter(|e| !self.members.contains(*e))
            .cloned();

        first_seen
            .into_iter()
            .filter(|e| self.members.contains(e) && !previous.contains(e))
            .map(|appended| match evictions.next() {
                Some(evicted) => Effect::AppendedEvicting { appended, evicted },
                None => Effect::Appended(appended),
            })
            .collect()
    }
}

impl<T: Eq + Hash> PartialEq for BoundedOrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.capacity == other.capacity && self.order == other.order
    }
}

impl<T: Eq + Hash> Eq for BoundedOrderedSet<T> {}
