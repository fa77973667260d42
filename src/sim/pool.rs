//! Reusable storage for short-lived entities
//!
//! A `PooledRegistry` splits its instances into an *available* queue and an
//! *in-use* set. Acquiring hands out a handle to a recycled slot (or grows the
//! pool by one); releasing puts the slot back at the end of the queue. Slot
//! contents are never reset by the pool: whoever acquires a slot must fully
//! re-initialise it before use.
//!
//! Handles carry a generation counter, so a handle kept past its release can
//! never alias the slot's next occupant.

use std::collections::VecDeque;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Handle to an in-use pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolHandle {
    index: u32,
    generation: u32,
}

impl PoolHandle {
    /// Slot index (stable for the lifetime of the pool)
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    value: T,
    generation: u32,
    in_use: bool,
}

/// Pool of reusable `T` instances
#[derive(Debug, Clone)]
pub struct PooledRegistry<T> {
    slots: Vec<Slot<T>>,
    /// FIFO of released slot indices
    available: VecDeque<u32>,
    in_use: usize,
}

impl<T> Default for PooledRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PooledRegistry<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            available: VecDeque::new(),
            in_use: 0,
        }
    }

    /// Return an in-use instance to the available partition.
    ///
    /// # Panics
    ///
    /// If `handle` is not currently in use (already released, stale, or from
    /// another pool). This is a caller bug and is never silently ignored.
    pub fn release(&mut self, handle: PoolHandle) {
        let slot = self.slots.get_mut(handle.index());
        let slot = match slot {
            Some(slot) if slot.in_use && slot.generation == handle.generation => slot,
            _ => panic!("PooledRegistry::release: {handle:?} is not in use"),
        };
        slot.in_use = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.available.push_back(handle.index);
        self.in_use -= 1;
    }

    /// Whether `handle` refers to a live instance
    pub fn is_in_use(&self, handle: PoolHandle) -> bool {
        self.slots
            .get(handle.index())
            .is_some_and(|slot| slot.in_use && slot.generation == handle.generation)
    }

    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        if self.is_in_use(handle) {
            Some(&self.slots[handle.index()].value)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        if self.is_in_use(handle) {
            Some(&mut self.slots[handle.index()].value)
        } else {
            None
        }
    }

    /// Instances currently handed out
    pub fn in_use_count(&self) -> usize {
        self.in_use
    }

    /// Instances waiting for reuse
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// Every instance ever constructed by this pool
    pub fn total_count(&self) -> usize {
        self.slots.len()
    }
}

impl<T: Default> PooledRegistry<T> {
    /// Take an instance out of the pool, constructing one if none are free.
    ///
    /// The instance keeps whatever state its previous user left behind.
    pub fn acquire(&mut self) -> PoolHandle {
        let index = match self.available.pop_front() {
            Some(index) => index,
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    value: T::default(),
                    generation: 0,
                    in_use: false,
                });
                log::trace!("Pool grew to {} instances", self.slots.len());
                index
            }
        };

        let slot = &mut self.slots[index as usize];
        debug_assert!(!slot.in_use, "available slot {index} was marked in use");
        slot.in_use = true;
        self.in_use += 1;

        PoolHandle {
            index,
            generation: slot.generation,
        }
    }
}

impl<T> Index<PoolHandle> for PooledRegistry<T> {
    type Output = T;

    fn index(&self, handle: PoolHandle) -> &T {
        match self.get(handle) {
            Some(value) => value,
            None => panic!("PooledRegistry: {handle:?} is not in use"),
        }
    }
}

impl<T> IndexMut<PoolHandle> for PooledRegistry<T> {
    fn index_mut(&mut self, handle: PoolHandle) -> &mut T {
        match self.get_mut(handle) {
            Some(value) => value,
            None => panic!("PooledRegistry: {handle:?} is not in use"),
        }
    }
}
