//! Generational arena used as the storage representation for nodes and edges.
//! Freed slots are reused; the slot generation is bumped on removal so stale
//! ids stop resolving.

use std::marker::PhantomData;

use crate::core::ArenaKey;

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<I, T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    len: usize,
    _id: PhantomData<I>,
}

impl<I: ArenaKey, T> Arena<I, T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
            _id: PhantomData,
        }
    }

    pub fn insert(&mut self, value: T) -> I {
        self.insert_with(|_| value)
    }

    /// Inserts a value that needs to know its own id.
    pub fn insert_with(&mut self, make: impl FnOnce(I) -> T) -> I {
        self.len += 1;
        if let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot];
            let id = I::from_parts(slot, entry.generation);
            entry.value = Some(make(id));
            return id;
        }
        let id = I::from_parts(self.slots.len(), 0);
        self.slots.push(Slot {
            generation: 0,
            value: Some(make(id)),
        });
        id
    }

    pub fn remove(&mut self, id: I) -> Option<T> {
        let entry = self.slots.get_mut(id.slot())?;
        if entry.generation != id.generation() {
            return None;
        }
        let value = entry.value.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(id.slot());
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: I) -> Option<&T> {
        self.slots
            .get(id.slot())
            .filter(|entry| entry.generation == id.generation())
            .and_then(|entry| entry.value.as_ref())
    }

    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        self.slots
            .get_mut(id.slot())
            .filter(|entry| entry.generation == id.generation())
            .and_then(|entry| entry.value.as_mut())
    }

    pub fn contains(&self, id: I) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(slot, entry)| {
            entry
                .value
                .as_ref()
                .map(|value| (I::from_parts(slot, entry.generation), value))
        })
    }

    pub fn ids(&self) -> impl Iterator<Item = I> + '_ {
        self.iter().map(|(id, _)| id)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.slots.iter_mut().filter_map(|entry| entry.value.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NodeId;

    #[test]
    fn stale_ids_do_not_resolve_after_slot_reuse() {
        let mut arena: Arena<NodeId, &str> = Arena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.remove(a), Some("a"));
        let c = arena.insert("c");

        assert_eq!(c.slot, a.slot);
        assert!(arena.get(a).is_none());
        assert_eq!(arena.get(c), Some(&"c"));
        assert_eq!(arena.get(b), Some(&"b"));
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.remove(a), None);
    }

    #[test]
    fn iteration_skips_free_slots() {
        let mut arena: Arena<NodeId, u32> = Arena::new();
        let ids: Vec<NodeId> = (0..5).map(|i| arena.insert(i)).collect();
        arena.remove(ids[1]);
        arena.remove(ids[3]);
        let values: Vec<u32> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![0, 2, 4]);
    }
}
