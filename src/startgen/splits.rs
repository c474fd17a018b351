//! Cell splitting schemes.
//!
//! Splitting follows Lyakhov, Oganov & Valle, Comp. Phys. Comm. 181 (2010)
//! 1623: the target cell is divided into identical subcells, one subcell is
//! filled, and the result is replicated. An entry such as `[4, 2]` divides
//! two randomly chosen lattice directions by 4 and 2 and leaves the third
//! whole.

use super::error::ConfigError;
use rand::Rng;
use rand::seq::index;
use serde::Deserialize;

/// Upper bound on the number of subcells one split may produce.
pub const MAX_SUBCELLS: usize = 4096;

/// One split option with its selection probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub factors: Vec<usize>,
    pub probability: f64,
}

/// Ordered split options with probabilities summing to one.
///
/// Selection walks the entries in insertion order, so identical seeds give
/// identical choices.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitScheme {
    splits: Vec<Split>,
}

/// A split entry as written in a declarative config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitConfig {
    pub factors: Vec<usize>,
    pub weight: f64,
}

impl SplitScheme {
    /// Builds a scheme from `(factors, weight)` entries, normalizing the
    /// weights.
    pub fn new<I>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (Vec<usize>, f64)>,
    {
        let entries: Vec<_> = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(ConfigError::invalid_splits("no split entries"));
        }
        for (factors, weight) in &entries {
            if factors.is_empty() || factors.len() > 3 {
                return Err(ConfigError::invalid_splits(format!(
                    "{factors:?} must list between one and three factors"
                )));
            }
            if factors.contains(&0) {
                return Err(ConfigError::invalid_splits(format!(
                    "{factors:?} contains a zero factor"
                )));
            }
            let subcells = factors
                .iter()
                .try_fold(1usize, |product, &f| product.checked_mul(f));
            if !subcells.is_some_and(|n| n <= MAX_SUBCELLS) {
                return Err(ConfigError::invalid_splits(format!(
                    "{factors:?} gives more than {MAX_SUBCELLS} subcells"
                )));
            }
            if !weight.is_finite() || *weight < 0.0 {
                return Err(ConfigError::invalid_splits(format!(
                    "weight {weight} for {factors:?} must be finite and non-negative"
                )));
            }
        }
        let total: f64 = entries.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return Err(ConfigError::invalid_splits("all weights are zero"));
        }
        Ok(Self {
            splits: entries
                .into_iter()
                .map(|(factors, weight)| Split {
                    factors,
                    probability: weight / total,
                })
                .collect(),
        })
    }

    /// No splitting: a single `[1]` entry with probability one.
    pub fn trivial() -> Self {
        Self {
            splits: vec![Split {
                factors: vec![1],
                probability: 1.0,
            }],
        }
    }

    pub(crate) fn from_config(entries: &[SplitConfig]) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Ok(Self::trivial());
        }
        Self::new(entries.iter().map(|s| (s.factors.clone(), s.weight)))
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    /// Draws a split and assigns its factors to randomly chosen lattice
    /// directions. Returns the per-axis repeat vector.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> [usize; 3] {
        let r: f64 = rng.random();
        let mut cumulative = 0.0;
        let mut chosen = &self.splits[self.splits.len() - 1];
        for split in &self.splits {
            cumulative += split.probability;
            if cumulative > r {
                chosen = split;
                break;
            }
        }

        let mut repeat = [1; 3];
        let directions = index::sample(rng, 3, chosen.factors.len());
        for (factor, direction) in chosen.factors.iter().zip(directions.iter()) {
            repeat[direction] = *factor;
        }
        repeat
    }
}

impl Default for SplitScheme {
    fn default() -> Self {
        Self::trivial()
    }
}
