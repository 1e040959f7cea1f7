//! Shared utilities.

use std::collections::HashSet;
use std::hash::Hash;

pub mod hash;

/// A list that keeps first-seen order and drops repeats.
///
/// Membership is tracked in a `HashSet` beside the `Vec`, so inserts stay
/// constant time for modules with thousands of sources.
#[derive(Debug, Clone)]
pub struct UniqueVec<T> {
  items: Vec<T>,
  seen: HashSet<T>,
}

impl<T> Default for UniqueVec<T> {
  fn default() -> Self {
    Self {
      items: Vec::new(),
      seen: HashSet::new(),
    }
  }
}

impl<T: Eq + Hash + Clone> UniqueVec<T> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append `item` unless an equal element is already present.
  ///
  /// Returns whether the item was added.
  pub fn push(&mut self, item: T) -> bool {
    if self.seen.contains(&item) {
      return false;
    }
    self.seen.insert(item.clone());
    self.items.push(item);
    true
  }

  /// [`UniqueVec::push`] for every element of `items`, in order.
  pub fn extend_from_slice(&mut self, items: &[T]) {
    for item in items {
      if !self.seen.contains(item) {
        self.push(item.clone());
      }
    }
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn into_vec(self) -> Vec<T> {
    self.items
  }
}
