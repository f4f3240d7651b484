use std::ops::{Deref, DerefMut};

/// Fixed-capacity container with an explicit count.
///
/// Pushing past capacity is refused rather than growing, so a full arena
/// silently caps the number of live items.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedArena<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> FixedArena<T> {
    pub fn new(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity), capacity }
    }

    /// Append an item. Returns `false` (and drops the item) when full.
    pub fn push(&mut self, item: T) -> bool {
        if self.items.len() >= self.capacity {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn free(&self) -> usize {
        self.capacity - self.items.len()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Deref for FixedArena<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> DerefMut for FixedArena<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T> FromIterator<T> for FixedArena<T> {
    /// Collects into an arena sized to the iterator's exact length.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        let capacity = items.len();
        Self { items, capacity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_caps_at_capacity() {
        let mut arena = FixedArena::new(2);
        assert!(arena.push(1));
        assert!(arena.push(2));
        assert!(!arena.push(3));
        assert_eq!(arena.len(), 2);
        assert_eq!(&arena[..], &[1, 2]);
        assert!(arena.is_full());
    }

    #[test]
    fn retain_frees_slots() {
        let mut arena = FixedArena::new(3);
        for i in 0..3 {
            arena.push(i);
        }
        arena.retain(|&i| i != 1);
        assert_eq!(arena.free(), 1);
        assert!(arena.push(9));
        assert_eq!(&arena[..], &[0, 2, 9]);
    }
}
