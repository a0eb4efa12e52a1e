//! Candidate tours and their fitness.
//!
//! A [`Tour`] is a permutation of indices into the engine's point table.
//! Fitness is the negated closed-tour length, so shorter tours score
//! higher and selection can uniformly prefer larger fitness. Fitness is
//! fully determined by the tour; the engine recomputes it whenever a
//! tour is produced or mutated.

use crate::geometry::{order_length, Point};

/// A candidate route: a permutation of `0..n` indexing the point table.
pub type Tour = Vec<usize>;

/// A tour paired with its fitness.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredIndividual {
    /// Negated tour length. Always ≤ 0; higher is better.
    pub fitness: f64,
    /// The route itself.
    pub tour: Tour,
}

/// Fitness of a tour: the negated closed-tour length.
pub fn fitness(points: &[Point], order: &[usize]) -> f64 {
    -order_length(points, order)
}

/// Arithmetic mean fitness over a population.
///
/// Reporting statistic only; selection never uses it.
///
/// # Panics
/// Panics if `population` is empty.
pub fn average_fitness(population: &[ScoredIndividual]) -> f64 {
    assert!(!population.is_empty(), "cannot average an empty population");
    population.iter().map(|ind| ind.fitness).sum::<f64>() / population.len() as f64
}

/// Checks that `order` is a permutation of `0..n`.
///
/// Used by the engine to surface operator bugs: an output that is not a
/// valid permutation is a programming error, never a recoverable state.
pub fn is_permutation(order: &[usize], n: usize) -> bool {
    if order.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &v in order {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}
