//! Permutation crossover and mutation operators.
//!
//! All operators work on index permutations (`&[usize]` over `0..n`) and
//! are pure: parents are never modified, children are freshly allocated.
//! Every output is a valid permutation of the same index set — the engine
//! asserts this after each generation, so an operator bug fails loudly.
//!
//! # Crossover Operators
//!
//! - [`order_crossover`] (OX): single cut, preserves relative order
//! - [`pmx_crossover`] (PMX): two cuts, mapping-chain conflict repair
//! - [`cycle_crossover`] (CX): simplified single-cycle variant
//!
//! # Mutation Operators
//!
//! - [`swap_mutation`]: exchange two positions — O(1)
//! - [`inversion_mutation`]: reverse a segment (2-opt) — O(n)
//! - [`scramble_mutation`]: reshuffle a segment — O(n)
//! - [`insertion_mutation`]: remove and reinsert one element — O(n)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"
//! - Oliver, Smith & Holland (1987), "A Study of Permutation Crossover
//!   Operators on the Traveling Salesman Problem"

use crate::individual::Tour;
use rand::seq::{index, SliceRandom};
use rand::Rng;

/// Sentinel for an unfilled child slot. Never a valid index.
const UNSET: usize = usize::MAX;

// ============================================================================
// Operator dispatch
// ============================================================================

/// Crossover variant. Closed set, dispatched by exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Order crossover (OX).
    #[default]
    Order,
    /// Partially-mapped crossover (PMX).
    PartiallyMapped,
    /// Cycle crossover (CX), simplified single-cycle variant.
    Cycle,
}

impl Crossover {
    /// Recombines two parents into two children using this variant.
    pub fn apply<R: Rng>(
        &self,
        parent1: &[usize],
        parent2: &[usize],
        rng: &mut R,
    ) -> (Tour, Tour) {
        match self {
            Crossover::Order => order_crossover(parent1, parent2, rng),
            Crossover::PartiallyMapped => pmx_crossover(parent1, parent2, rng),
            Crossover::Cycle => cycle_crossover(parent1, parent2),
        }
    }
}

/// Mutation variant. Closed set, dispatched by exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutation {
    /// Exchange two random positions.
    #[default]
    Swap,
    /// Reverse a random segment.
    Inversion,
    /// Reshuffle a random segment.
    Scramble,
    /// Move one element to another position.
    Insertion,
}

impl Mutation {
    /// Returns a perturbed copy of `tour` using this variant.
    pub fn apply<R: Rng>(&self, tour: &[usize], rng: &mut R) -> Tour {
        match self {
            Mutation::Swap => swap_mutation(tour, rng),
            Mutation::Inversion => inversion_mutation(tour, rng),
            Mutation::Scramble => scramble_mutation(tour, rng),
            Mutation::Insertion => insertion_mutation(tour, rng),
        }
    }
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Order Crossover (OX) for permutations.
///
/// Chooses one cut point `p` uniformly in `[0, n-1]`. Child 1 takes
/// parent 1's prefix `[0, p)`, then parent 2's remaining values in
/// parent 2's order; child 2 is built with the roles swapped. No repair
/// step is needed: each child is a permutation by construction.
///
/// # Panics
/// Panics if parents have different lengths or fewer than two elements.
pub fn order_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Tour, Tour) {
    let n = check_parents(parent1, parent2);
    let cut = rng.random_range(0..n);
    (
        ox_build_child(parent1, parent2, cut),
        ox_build_child(parent2, parent1, cut),
    )
}

/// Build one OX child: `template`'s prefix up to `cut`, then `donor`'s
/// values not yet placed, in donor order.
fn ox_build_child(template: &[usize], donor: &[usize], cut: usize) -> Tour {
    let n = template.len();
    let mut child = Vec::with_capacity(n);
    let mut taken = vec![false; n];
    for &v in &template[..cut] {
        child.push(v);
        taken[v] = true;
    }
    for &v in donor {
        if !taken[v] {
            child.push(v);
        }
    }
    child
}

/// Partially Mapped Crossover (PMX) for permutations.
///
/// Chooses cut points `p1 < p2` with `p1 ∈ [0, n-1]` and `p2 ∈ [p1+1, n]`,
/// copies the segment `[p1, p2)` verbatim from each parent into the
/// corresponding child, then resolves each conflicting donor-segment value
/// by following the mapping chain — the position its blocker occupies in
/// the copying parent — until a free slot is found. Slots still empty
/// afterwards take the donor's unplaced values in donor order.
///
/// # Panics
/// Panics if parents have different lengths or fewer than two elements.
pub fn pmx_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Tour, Tour) {
    let n = check_parents(parent1, parent2);
    let lo = rng.random_range(0..n);
    let hi = rng.random_range(lo + 1..=n);
    (
        pmx_build_child(parent1, parent2, lo, hi),
        pmx_build_child(parent2, parent1, lo, hi),
    )
}

/// Build one PMX child: copy `template`'s segment, map `donor`'s segment
/// conflicts through the template, fill the rest from the donor in order.
fn pmx_build_child(template: &[usize], donor: &[usize], lo: usize, hi: usize) -> Tour {
    let n = template.len();
    let mut child = vec![UNSET; n];
    let mut placed = vec![false; n];

    for i in lo..hi {
        child[i] = template[i];
        placed[template[i]] = true;
    }

    // Position of each value in the template, for O(1) chain hops.
    let mut pos_in_template = vec![0usize; n];
    for (i, &v) in template.iter().enumerate() {
        pos_in_template[v] = i;
    }

    // Mapping-chain resolution: a donor-segment value displaced by the
    // copied segment lands at the position its blocker holds in the
    // template, chasing occupied slots until one is free. The chain
    // always exits the segment for valid permutations.
    for i in lo..hi {
        let val = donor[i];
        if placed[val] {
            continue;
        }
        let mut j = i;
        while child[j] != UNSET {
            j = pos_in_template[donor[j]];
        }
        child[j] = val;
        placed[val] = true;
    }

    // Remaining slots take the donor's unplaced values, preserving the
    // donor's relative order.
    let mut pending = donor.iter().copied().filter(|&v| !placed[v]);
    for slot in child.iter_mut() {
        if *slot == UNSET {
            *slot = pending
                .next()
                .expect("valid permutation: donor covers every remaining slot");
        }
    }
    child
}

/// Cycle Crossover (CX) for permutations — simplified single-cycle variant.
///
/// Starting at index 0, child 1 takes parent 1's value, then moves to the
/// index where that value sits in parent 2, repeating until the cycle
/// closes. Every index outside that first cycle is filled straight from
/// parent 2. Child 2 is built with the roles swapped.
///
/// Deliberately resolves only the cycle containing index 0 rather than
/// alternating parents across all cycles; the fallback fill changes the
/// search dynamics relative to full multi-cycle CX and is part of this
/// operator's contract.
///
/// # Panics
/// Panics if parents have different lengths or fewer than two elements.
pub fn cycle_crossover(parent1: &[usize], parent2: &[usize]) -> (Tour, Tour) {
    check_parents(parent1, parent2);
    (
        cx_build_child(parent1, parent2),
        cx_build_child(parent2, parent1),
    )
}

/// Build one CX child: resolve the cycle through index 0 from `template`,
/// fill every other slot from `donor`.
fn cx_build_child(template: &[usize], donor: &[usize]) -> Tour {
    let n = template.len();
    let mut child = vec![UNSET; n];

    let mut pos_in_donor = vec![0usize; n];
    for (i, &v) in donor.iter().enumerate() {
        pos_in_donor[v] = i;
    }

    let mut idx = 0;
    loop {
        child[idx] = template[idx];
        idx = pos_in_donor[template[idx]];
        if child[idx] != UNSET {
            break; // cycle closed
        }
    }

    for (slot, &v) in child.iter_mut().zip(donor) {
        if *slot == UNSET {
            *slot = v;
        }
    }
    child
}

/// Validate crossover parents and return their common length.
fn check_parents(parent1: &[usize], parent2: &[usize]) -> usize {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n >= 2, "parents must have at least two elements");
    n
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Swap mutation: exchange two distinct random positions.
///
/// # Panics
/// Panics if the tour has fewer than two elements.
pub fn swap_mutation<R: Rng>(tour: &[usize], rng: &mut R) -> Tour {
    let mut out = tour.to_vec();
    let (i, j) = distinct_pair(tour.len(), rng);
    out.swap(i, j);
    out
}

/// Inversion mutation: reverse the segment `[lo, hi)` between two distinct
/// random positions (a 2-opt move on a closed tour).
///
/// # Panics
/// Panics if the tour has fewer than two elements.
pub fn inversion_mutation<R: Rng>(tour: &[usize], rng: &mut R) -> Tour {
    let mut out = tour.to_vec();
    let (a, b) = distinct_pair(tour.len(), rng);
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    out[lo..hi].reverse();
    out
}

/// Scramble mutation: reshuffle the segment `[lo, hi)` between two distinct
/// random positions.
///
/// # Panics
/// Panics if the tour has fewer than two elements.
pub fn scramble_mutation<R: Rng>(tour: &[usize], rng: &mut R) -> Tour {
    let mut out = tour.to_vec();
    let (a, b) = distinct_pair(tour.len(), rng);
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    out[lo..hi].shuffle(rng);
    out
}

/// Insertion mutation: remove the element at one random position and
/// reinsert it at another, shifting the elements in between.
///
/// # Panics
/// Panics if the tour has fewer than two elements.
pub fn insertion_mutation<R: Rng>(tour: &[usize], rng: &mut R) -> Tour {
    let mut out = tour.to_vec();
    let (src, dst) = distinct_pair(tour.len(), rng);
    let v = out.remove(src);
    out.insert(dst, v);
    out
}

/// Two distinct indices in `0..n`, drawn without replacement.
fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    assert!(n >= 2, "tour must have at least two elements");
    let picked = index::sample(rng, n, 2);
    (picked.index(0), picked.index(1))
}

// ============================================================================
// Tests
// ============================================================================
