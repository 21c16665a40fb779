//! The reaction library: every reaction rule plus the phase set they
//! operate over.
//!
//! A library is loaded once per process from a JSON document and shared
//! read-only across every run in a batch. Lookup is by the *set* of
//! reactant phases, order-insensitive, via an index built at load time.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::LibraryError;
use crate::phases::PhaseSet;
use crate::reaction::ScoredReaction;

/// A collection of scored reactions and their phase set.
///
/// Reactions are addressed by their index into the library, which is
/// stable for the lifetime of the document and is what result documents
/// record as the "reaction chosen" for a step.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReactionLibrary {
    reactions: Vec<ScoredReaction>,
    phases: PhaseSet,
    #[serde(skip)]
    index: IndexMap<Vec<String>, Vec<usize>>,
}

impl ReactionLibrary {
    /// Build a library, validating that every reaction only mentions
    /// phases present in `phases`.
    pub fn new(reactions: Vec<ScoredReaction>, phases: PhaseSet) -> Result<Self, LibraryError> {
        let mut lib = Self {
            reactions,
            phases,
            index: IndexMap::new(),
        };
        lib.phases.ensure_free_space();
        lib.validate()?;
        lib.rebuild_index();
        Ok(lib)
    }

    /// Load a library from a JSON file.
    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        let file = File::open(path).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| LibraryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(raw.reactions, raw.phases)
    }

    /// The phase set this library operates over.
    pub fn phases(&self) -> &PhaseSet {
        &self.phases
    }

    /// All reactions, in document order.
    pub fn reactions(&self) -> &[ScoredReaction] {
        &self.reactions
    }

    /// The reaction at `id`, as recorded in result documents.
    pub fn reaction(&self, id: usize) -> Option<&ScoredReaction> {
        self.reactions.get(id)
    }

    /// Indices of reactions whose reactant set is exactly the given
    /// phases, regardless of argument order or repetition.
    pub fn reactions_for(&self, reactant_phases: &[&str]) -> &[usize] {
        let key = Self::key_of(reactant_phases.iter().map(|s| s.to_string()));
        self.index.get(&key).map_or(&[], Vec::as_slice)
    }

    fn validate(&self) -> Result<(), LibraryError> {
        if self.reactions.is_empty() {
            return Err(LibraryError::Empty);
        }
        for rxn in &self.reactions {
            for name in rxn.reactants.keys().chain(rxn.products.keys()) {
                if !self.phases.contains(name) {
                    return Err(LibraryError::UnknownPhase {
                        reaction: rxn.to_string(),
                        phase: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (id, rxn) in self.reactions.iter().enumerate() {
            let key = Self::key_of(rxn.reactants.keys().cloned());
            self.index.entry(key).or_default().push(id);
        }
    }

    /// Sorted, deduplicated phase-name key for the reactant-set index.
    fn key_of(names: impl Iterator<Item = String>) -> Vec<String> {
        let mut key: Vec<String> = names.collect();
        key.sort_unstable();
        key.dedup();
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phases::PhaseEntry;
    use indexmap::IndexMap;
    use std::io::Write;

    fn phases() -> PhaseSet {
        PhaseSet::new(vec![
            PhaseEntry {
                name: "A".into(),
                is_gas: false,
            },
            PhaseEntry {
                name: "B".into(),
                is_gas: false,
            },
            PhaseEntry {
                name: "C".into(),
                is_gas: false,
            },
        ])
    }

    fn rxn(reactants: &[(&str, f64)], products: &[(&str, f64)], score: f64) -> ScoredReaction {
        ScoredReaction {
            reactants: reactants
                .iter()
                .map(|(n, c)| (n.to_string(), *c))
                .collect::<IndexMap<_, _>>(),
            products: products
                .iter()
                .map(|(n, c)| (n.to_string(), *c))
                .collect::<IndexMap<_, _>>(),
            competitiveness: score,
        }
    }

    #[test]
    fn lookup_is_order_insensitive() {
        let lib = ReactionLibrary::new(
            vec![rxn(&[("A", 1.0), ("B", 1.0)], &[("C", 2.0)], 3.0)],
            phases(),
        )
        .unwrap();
        assert_eq!(lib.reactions_for(&["A", "B"]), &[0]);
        assert_eq!(lib.reactions_for(&["B", "A"]), &[0]);
        assert_eq!(lib.reactions_for(&["B", "A", "B"]), &[0]);
        assert!(lib.reactions_for(&["A"]).is_empty());
    }

    #[test]
    fn multiple_reactions_share_a_key() {
        let lib = ReactionLibrary::new(
            vec![
                rxn(&[("A", 1.0), ("B", 1.0)], &[("C", 1.0)], 1.0),
                rxn(&[("B", 2.0), ("A", 1.0)], &[("C", 3.0)], 2.0),
            ],
            phases(),
        )
        .unwrap();
        assert_eq!(lib.reactions_for(&["A", "B"]), &[0, 1]);
    }

    #[test]
    fn unknown_phase_is_rejected() {
        let err = ReactionLibrary::new(
            vec![rxn(&[("A", 1.0), ("X", 1.0)], &[("C", 1.0)], 1.0)],
            phases(),
        )
        .unwrap_err();
        match err {
            LibraryError::UnknownPhase { phase, .. } => assert_eq!(phase, "X"),
            other => panic!("expected UnknownPhase, got {other}"),
        }
    }

    #[test]
    fn empty_library_is_rejected() {
        assert!(matches!(
            ReactionLibrary::new(vec![], phases()),
            Err(LibraryError::Empty)
        ));
    }

    #[test]
    fn load_rebuilds_the_index() {
        let lib = ReactionLibrary::new(
            vec![rxn(&[("A", 1.0), ("B", 1.0)], &[("C", 1.0)], 1.0)],
            phases(),
        )
        .unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&lib).unwrap().as_bytes())
            .unwrap();
        let loaded = ReactionLibrary::load(file.path()).unwrap();
        assert_eq!(loaded.reactions_for(&["B", "A"]), &[0]);
        assert!(loaded.phases().contains(crate::FREE_SPACE));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ReactionLibrary::load(Path::new("/nonexistent/lib.json")).unwrap_err();
        assert!(matches!(err, LibraryError::Io { .. }));
    }
}
