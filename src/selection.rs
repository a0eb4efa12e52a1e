//! Tournament selection.
//!
//! The engine's sole selection mechanism: draw `k` distinct members
//! uniformly at random and keep the fittest. Selection pressure is tuned
//! through `k` — larger tournaments favor the current best more strongly —
//! without ever sorting the whole population.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::individual::ScoredIndividual;
use rand::seq::index;
use rand::Rng;

/// Selects the index of the fittest among `k` distinct random members.
///
/// The `k` members of one tournament are drawn without replacement, but
/// successive tournaments are independent: the same individual can win
/// (and be selected as a parent) any number of times per generation.
/// With `k == population.len()` the draw degenerates to picking the
/// single best member.
///
/// # Panics
/// Panics if `population` is empty or `k` is not in `1..=population.len()`.
pub fn tournament<R: Rng>(population: &[ScoredIndividual], k: usize, rng: &mut R) -> usize {
    let n = population.len();
    assert!(n > 0, "cannot select from empty population");
    assert!(
        (1..=n).contains(&k),
        "tournament size must be in 1..={n}, got {k}"
    );

    let mut best: Option<usize> = None;
    for idx in index::sample(rng, n, k) {
        match best {
            Some(b) if population[idx].fitness <= population[b].fitness => {}
            _ => best = Some(idx),
        }
    }
    best.expect("tournament draws at least one member")
}
