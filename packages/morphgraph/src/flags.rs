//! Morphology flags constraining which edge sets a graph may hold.
//!
//! Five independent axes plus `CHECK_ON_INSERT`. Two implications are kept
//! closed at all times:
//!
//! - not `BLOB` (a tree) implies neither `CYCLIC` nor `DIRECTED`
//! - not `CYCLIC` implies neither `MULTI_CONNECTED` nor `SELF_CONNECTED`

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

use crate::error::GraphError;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct GraphFlags(u8);

const NAMED: [(GraphFlags, &str); 6] = [
    (GraphFlags::DIRECTED, "DIRECTED"),
    (GraphFlags::CYCLIC, "CYCLIC"),
    (GraphFlags::BLOB, "BLOB"),
    (GraphFlags::MULTI_CONNECTED, "MULTI_CONNECTED"),
    (GraphFlags::SELF_CONNECTED, "SELF_CONNECTED"),
    (GraphFlags::CHECK_ON_INSERT, "CHECK_ON_INSERT"),
];

impl GraphFlags {
    pub const DIRECTED: Self = Self(1);
    pub const CYCLIC: Self = Self(2);
    pub const BLOB: Self = Self(4);
    pub const MULTI_CONNECTED: Self = Self(8);
    pub const SELF_CONNECTED: Self = Self(16);
    pub const CHECK_ON_INSERT: Self = Self(32);

    pub const FREE: Self = Self(31);
    pub const TREE: Self = Self(0);
    pub const DAG: Self = Self(1 | 2);
    pub const UNDIRECTED: Self = Self(2 | 4 | 8 | 16);

    const ALL: u8 = 63;

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Unknown bits are dropped.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Applies the implication closure by clearing flags whose prerequisite
    /// is missing.
    pub fn normalized(self) -> Self {
        let mut flags = self;
        if !flags.contains(Self::BLOB) {
            flags = flags.difference(Self::CYCLIC.union(Self::DIRECTED));
        }
        if !flags.contains(Self::CYCLIC) {
            flags = flags.difference(Self::MULTI_CONNECTED.union(Self::SELF_CONNECTED));
        }
        flags
    }

    /// Sets `flag` together with every flag it requires.
    pub fn with(self, flag: Self) -> Self {
        let mut flags = self.union(flag);
        if flags.contains(Self::MULTI_CONNECTED) || flags.contains(Self::SELF_CONNECTED) {
            flags = flags.union(Self::CYCLIC);
        }
        if flags.contains(Self::CYCLIC) || flags.contains(Self::DIRECTED) {
            flags = flags.union(Self::BLOB);
        }
        flags
    }

    /// Clears `flag` together with every flag that depends on it.
    pub fn without(self, flag: Self) -> Self {
        self.difference(flag).normalized()
    }
}

impl BitOr for GraphFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for GraphFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl BitAnd for GraphFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for GraphFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "TREE");
        }
        let names: Vec<&str> = NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", names.join("|"))
    }
}

impl fmt::Debug for GraphFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GraphFlags({self})")
    }
}

impl FromStr for GraphFlags {
    type Err = GraphError;

    /// Parses `"DIRECTED|CYCLIC"`-style lists. Preset names are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = GraphFlags::TREE;
        for part in s.split('|').map(str::trim).filter(|p| !p.is_empty()) {
            let upper = part.to_ascii_uppercase();
            let flag = match upper.as_str() {
                "FREE" => GraphFlags::FREE,
                "TREE" => GraphFlags::TREE,
                "DAG" => GraphFlags::DAG,
                "UNDIRECTED" => GraphFlags::UNDIRECTED,
                name => NAMED
                    .iter()
                    .find(|(_, n)| *n == name)
                    .map(|(flag, _)| *flag)
                    .ok_or_else(|| {
                        GraphError::InvalidArgument(format!("unknown graph flag `{part}`"))
                    })?,
            };
            flags |= flag;
        }
        Ok(flags)
    }
}
