//! Phase sets: the material states a lattice site can occupy.
//!
//! A [`PhaseSet`] is the ordered collection of phase labels a reaction
//! library operates over. Every set contains the distinguished
//! [`FREE_SPACE`] phase, which marks unoccupied lattice sites and is
//! neither a solid nor a gas.

use serde::{Deserialize, Serialize};

/// The phase label for an unoccupied lattice site.
pub const FREE_SPACE: &str = "Free Space";

/// One phase in a [`PhaseSet`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseEntry {
    /// Phase label, e.g. `"Na2CO3"`.
    pub name: String,
    /// Whether this phase is gaseous. Gas products evolve out of the
    /// lattice instead of occupying sites.
    #[serde(default)]
    pub is_gas: bool,
}

/// Ordered set of phases usable within a simulation's lattice.
///
/// Iteration order is insertion order, so derived reports (e.g. final
/// phase fractions) are deterministic across runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhaseSet {
    entries: Vec<PhaseEntry>,
}

impl PhaseSet {
    /// Build a phase set from entries, appending [`FREE_SPACE`] if absent.
    pub fn new(entries: Vec<PhaseEntry>) -> Self {
        let mut set = Self { entries };
        set.ensure_free_space();
        set
    }

    /// Append the [`FREE_SPACE`] entry if it is not already a member.
    ///
    /// Called after deserialization so hand-written library files do not
    /// need to list free space explicitly.
    pub fn ensure_free_space(&mut self) {
        if !self.contains(FREE_SPACE) {
            self.entries.push(PhaseEntry {
                name: FREE_SPACE.to_string(),
                is_gas: false,
            });
        }
    }

    /// Whether `name` is a member of this set.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Whether `name` is a gaseous phase. Unknown names are not gases.
    pub fn is_gas(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name && e.is_gas)
    }

    /// Whether `name` is a solid phase: a member that is neither gaseous
    /// nor [`FREE_SPACE`].
    pub fn is_solid(&self, name: &str) -> bool {
        name != FREE_SPACE && self.entries.iter().any(|e| e.name == name && !e.is_gas)
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PhaseEntry> {
        self.entries.iter()
    }

    /// Number of phases, including [`FREE_SPACE`].
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty (never true after [`PhaseSet::new`]).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
