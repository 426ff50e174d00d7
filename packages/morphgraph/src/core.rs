//! core small types

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Typed node/edge identifiers.
///
/// An id is a slot in the owning graph's arena plus the generation of that
/// slot; once the node or edge is removed the id stops resolving.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) slot: usize,
    pub(crate) generation: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    pub(crate) slot: usize,
    pub(crate) generation: u32,
}

impl NodeId {
    pub fn index(&self) -> usize {
        self.slot
    }
}

impl EdgeId {
    pub fn index(&self) -> usize {
        self.slot
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.slot)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.slot)
    }
}

/// Key types stored in an [`Arena`](crate::arena::Arena).
pub(crate) trait ArenaKey: Copy {
    fn from_parts(slot: usize, generation: u32) -> Self;
    fn slot(self) -> usize;
    fn generation(self) -> u32;
}

impl ArenaKey for NodeId {
    fn from_parts(slot: usize, generation: u32) -> Self {
        NodeId { slot, generation }
    }
    fn slot(self) -> usize {
        self.slot
    }
    fn generation(self) -> u32 {
        self.generation
    }
}

impl ArenaKey for EdgeId {
    fn from_parts(slot: usize, generation: u32) -> Self {
        EdgeId { slot, generation }
    }
    fn slot(self) -> usize {
        self.slot
    }
    fn generation(self) -> u32 {
        self.generation
    }
}

/// Contract for node payloads: equality plus hashing, so a payload can key
/// the graph's payload-to-node map.
pub trait GraphData: Clone + Eq + Hash + Debug {}

impl<T> GraphData for T where T: Clone + Eq + Hash + Debug {}
