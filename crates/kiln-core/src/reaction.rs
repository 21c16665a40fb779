//! Scored reactions: stoichiometry plus a competitiveness score.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::phases::PhaseSet;

/// One reaction rule with a precomputed competitiveness score.
///
/// Reactants and products are stoichiometry maps from phase name to
/// coefficient. The score is produced upstream (by whatever thermodynamic
/// model built the library) and is treated as opaque here: higher scores
/// win weighted draws more often.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredReaction {
    /// Reactant phase name → stoichiometric coefficient.
    pub reactants: IndexMap<String, f64>,
    /// Product phase name → stoichiometric coefficient.
    pub products: IndexMap<String, f64>,
    /// Relative likelihood weight for this reaction.
    pub competitiveness: f64,
}

impl ScoredReaction {
    /// Stoichiometric coefficient of `phase` among the reactants.
    pub fn reactant_stoich(&self, phase: &str) -> Option<f64> {
        self.reactants.get(phase).copied()
    }

    /// Stoichiometric coefficient of `phase` among the products.
    pub fn product_stoich(&self, phase: &str) -> Option<f64> {
        self.products.get(phase).copied()
    }

    /// Reactant names classified as solid by `phases`, in declaration order.
    pub fn solid_reactants<'a>(&'a self, phases: &PhaseSet) -> Vec<&'a str> {
        self.reactants
            .keys()
            .filter(|name| phases.is_solid(name))
            .map(String::as_str)
            .collect()
    }

    /// Fraction of the solid reactant stoichiometry carried by `phase`.
    ///
    /// Returns 0.0 when `phase` is not a solid reactant of this reaction.
    /// Consumption probability of a cell scales with this fraction: a
    /// phase carrying half the solid stoichiometry is consumed half as
    /// readily per encounter.
    pub fn solid_reactant_stoich_fraction(&self, phase: &str, phases: &PhaseSet) -> f64 {
        let total: f64 = self
            .reactants
            .iter()
            .filter(|(name, _)| phases.is_solid(name))
            .map(|(_, coeff)| coeff)
            .sum();
        if total <= 0.0 {
            return 0.0;
        }
        match self.reactants.get(phase) {
            Some(coeff) if phases.is_solid(phase) => coeff / total,
            _ => 0.0,
        }
    }

    /// Convert an amount of `reactant` into the equivalent amount of
    /// `product` by the stoichiometric ratio.
    ///
    /// Returns 0.0 when either phase does not participate.
    pub fn convert_reactant_amt_to_product_amt(
        &self,
        reactant: &str,
        amount: f64,
        product: &str,
    ) -> f64 {
        match (self.reactant_stoich(reactant), self.product_stoich(product)) {
            (Some(r), Some(p)) if r > 0.0 => amount * p / r,
            _ => 0.0,
        }
    }
}

impl fmt::Display for ScoredReaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |map: &IndexMap<String, f64>| {
            map.iter()
                .map(|(name, coeff)| {
                    if (coeff - 1.0).abs() < f64::EPSILON {
                        name.clone()
                    } else {
                        format!("{coeff} {name}")
                    }
                })
                .collect::<Vec<_>>()
                .join(" + ")
        };
        write!(f, "{} -> {}", side(&self.reactants), side(&self.products))
    }
}
