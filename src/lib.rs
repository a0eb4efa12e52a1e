//! Genetic algorithm engine for the Traveling Salesman Problem.
//!
//! A population-based stochastic search over closed 2-D tours. Candidate
//! tours are index permutations over a fixed point set; the engine evolves
//! a population of them generation by generation with tournament
//! selection, pluggable permutation crossover, and pluggable mutation.
//!
//! # Key Types
//!
//! - [`Point`]: a city location with an opaque identifier
//! - [`GaConfig`]: engine parameters (rates, operators, tournament size, seed)
//! - [`Engine`]: owns the population; `seed` then repeated `step`
//! - [`GenerationStats`]: best member and mean fitness of one generation
//! - [`Crossover`] / [`Mutation`]: closed operator sets, matched exhaustively
//!
//! # Design
//!
//! - Fitness is the negated closed-tour length, so higher is always better
//!   and selection needs no objective-direction switch.
//! - The engine never terminates a run itself: it exposes the generation
//!   counter, the generation best, and the target-reached signal, and the
//!   caller decides when to stop calling [`Engine::step`].
//! - All randomness flows through an injectable seed
//!   ([`GaConfig::with_seed`]); seeded runs are exactly reproducible.
//!
//! # Example
//!
//! ```
//! use tsp_ga::{Crossover, Engine, GaConfig, Mutation, Point};
//!
//! let points = vec![
//!     Point::new(0, 0.0, 0.0),
//!     Point::new(1, 1.0, 0.0),
//!     Point::new(2, 1.0, 1.0),
//!     Point::new(3, 0.0, 1.0),
//! ];
//!
//! let config = GaConfig::default()
//!     .with_population_size(50)
//!     .with_crossover(Crossover::Order)
//!     .with_mutation(Mutation::Swap)
//!     .with_target_fitness(-4.0)
//!     .with_seed(42);
//!
//! let mut engine = Engine::new(config).unwrap();
//! engine.seed(&points).unwrap();
//!
//! while engine.generation() < 100 && !engine.target_reached() {
//!     let stats = engine.step();
//!     assert!(stats.best.fitness >= stats.average_fitness);
//! }
//! assert!(engine.target_reached());
//! ```
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*
//! - Larrañaga et al. (1999), *Genetic Algorithms for the Travelling
//!   Salesman Problem: A Review of Representations and Operators*

pub mod config;
pub mod engine;
pub mod geometry;
pub mod individual;
pub mod operators;
pub mod random;
pub mod selection;

pub use config::GaConfig;
pub use engine::{Engine, GenerationStats};
pub use geometry::{distance, tour_length, Point};
pub use individual::{average_fitness, fitness, ScoredIndividual, Tour};
pub use operators::{Crossover, Mutation};
pub use selection::tournament;
