//! Payload interner: maps each node payload to its `NodeId`.

use indexmap::IndexMap;

use crate::core::{GraphData, NodeId};

/// IndexMap-based interner. Keys are unique; iteration follows insertion
/// order, and removal keeps the relative order of the remaining keys.
#[derive(Clone, Debug)]
pub struct NodeInterner<K>
where
    K: GraphData,
{
    index: IndexMap<K, NodeId>,
}

impl<K> NodeInterner<K>
where
    K: GraphData,
{
    pub fn new() -> Self {
        Self {
            index: IndexMap::new(),
        }
    }

    pub fn get_id(&self, key: &K) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns false if the key was already present (the map is unchanged).
    pub fn insert(&mut self, key: K, id: NodeId) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, id);
        true
    }

    pub fn remove(&mut self, key: &K) -> Option<NodeId> {
        self.index.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.values().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, NodeId)> + '_ {
        self.index.iter().map(|(k, id)| (k, *id))
    }
}

impl<K: GraphData> Default for NodeInterner<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Anything that names a node: a payload reference or a `NodeId`.
///
/// Graph operations take `impl AsNode<K>` so callers can pass either form.
pub trait AsNode<K: GraphData> {
    /// Resolves against the payload map. `NodeId`s resolve to themselves;
    /// the graph checks liveness separately.
    fn lookup(&self, index: &NodeInterner<K>) -> Option<NodeId>;

    fn describe(&self) -> String;
}

impl<K: GraphData> AsNode<K> for NodeId {
    fn lookup(&self, _index: &NodeInterner<K>) -> Option<NodeId> {
        Some(*self)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl<K: GraphData> AsNode<K> for &K {
    fn lookup(&self, index: &NodeInterner<K>) -> Option<NodeId> {
        index.get_id(self)
    }

    fn describe(&self) -> String {
        format!("{:?}", self)
    }
}
