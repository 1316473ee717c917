//! Slot+generation handle tables.
//!
//! Foreign callers hold `u64` handles, never pointers. A handle encodes a
//! slot index (upper 32 bits) and that slot's generation (lower 32 bits);
//! freeing bumps the generation, so a stale or double-freed handle stops
//! matching and resolves to `None` instead of reaching freed memory.

fn encode(slot: u32, generation: u32) -> u64 {
    (u64::from(slot) << 32) | u64::from(generation)
}

fn decode(handle: u64) -> (u32, u32) {
    ((handle >> 32) as u32, handle as u32)
}

struct Entry<T> {
    generation: u32,
    value: Option<T>,
}

/// Maps `u64` handles to owned values with stale-handle detection.
pub(crate) struct HandleTable<T> {
    entries: Vec<Entry<T>>,
    recycled: Vec<u32>,
}

impl<T> HandleTable<T> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            recycled: Vec::new(),
        }
    }

    /// Store a value, returning its handle.
    pub fn insert(&mut self, value: T) -> u64 {
        match self.recycled.pop() {
            Some(slot) => {
                let entry = &mut self.entries[slot as usize];
                entry.value = Some(value);
                encode(slot, entry.generation)
            }
            None => {
                let slot = self.entries.len() as u32;
                self.entries.push(Entry {
                    generation: 0,
                    value: Some(value),
                });
                encode(slot, 0)
            }
        }
    }

    /// Resolve a handle; `None` when stale or never valid.
    pub fn get(&self, handle: u64) -> Option<&T> {
        let (slot, generation) = decode(handle);
        let entry = self.entries.get(slot as usize)?;
        if entry.generation != generation {
            return None;
        }
        entry.value.as_ref()
    }

    /// Resolve a handle mutably; `None` when stale or never valid.
    pub fn get_mut(&mut self, handle: u64) -> Option<&mut T> {
        let (slot, generation) = decode(handle);
        let entry = self.entries.get_mut(slot as usize)?;
        if entry.generation != generation {
            return None;
        }
        entry.value.as_mut()
    }

    /// Take the value out, invalidating the handle.
    ///
    /// Freeing twice is a safe `None`. A slot whose generation wraps back
    /// to 0 is retired rather than recycled: recycling it would let a
    /// first-epoch stale handle resolve to a fresh value.
    pub fn remove(&mut self, handle: u64) -> Option<T> {
        let (slot, generation) = decode(handle);
        let entry = self.entries.get_mut(slot as usize)?;
        if entry.generation != generation {
            return None;
        }
        let value = entry.value.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        if entry.generation != 0 {
            self.recycled.push(slot);
        }
        Some(value)
    }
}
