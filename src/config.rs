//! Engine configuration.
//!
//! [`GaConfig`] holds every parameter that controls the evolutionary loop.
//! Builders set values verbatim; [`GaConfig::validate`] rejects malformed
//! configurations instead of clamping them, so a bad rate or tournament
//! size fails at engine construction rather than silently changing the
//! search.

use crate::operators::{Crossover, Mutation};

/// Configuration for the genetic algorithm engine.
///
/// # Defaults
///
/// ```
/// use tsp_ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 1000);
/// assert_eq!(config.iterations_limit, 200);
/// assert_eq!(config.tournament_size, 4);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tsp_ga::{Crossover, GaConfig, Mutation};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_crossover(Crossover::PartiallyMapped)
///     .with_mutation(Mutation::Inversion)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population. Must be at least 2.
    pub population_size: usize,

    /// Advisory generation budget for callers driving the step loop.
    ///
    /// The engine never stops on its own; sweep harnesses and UIs read
    /// this to decide how long to keep calling `step`.
    pub iterations_limit: usize,

    /// Fraction of the population replaced by mutated copies each
    /// generation, in `[0, 1]`.
    pub mutation_rate: f64,

    /// Fraction of the population produced by crossover each generation,
    /// in `[0, 1]`. The rest are tournament-selected direct copies.
    pub crossover_rate: f64,

    /// Crossover variant applied to each selected parent pair.
    pub crossover: Crossover,

    /// Mutation variant applied to each mutated member.
    pub mutation: Mutation,

    /// Stop signal threshold: the run counts as converged once the
    /// generation's best fitness reaches this value. `None` means the
    /// signal never fires. Reaching the target only flips
    /// [`Engine::target_reached`](crate::Engine::target_reached); the
    /// caller decides whether to stop stepping.
    pub target_fitness: Option<f64>,

    /// Tournament size for parent/survivor selection.
    ///
    /// Must be in `1..=population_size`. Larger tournaments mean stronger
    /// pressure toward the current best.
    pub tournament_size: usize,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to re-score generations in parallel using rayon.
    ///
    /// Only has an effect with the `parallel` feature enabled. Scoring is
    /// RNG-free, so this never affects reproducibility.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            iterations_limit: 200,
            mutation_rate: 0.1,
            crossover_rate: 0.9,
            crossover: Crossover::Order,
            mutation: Mutation::Swap,
            target_fitness: None,
            tournament_size: 4,
            seed: None,
            parallel: false,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the advisory generation budget.
    pub fn with_iterations_limit(mut self, n: usize) -> Self {
        self.iterations_limit = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the crossover variant.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the mutation variant.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the target fitness threshold.
    pub fn with_target_fitness(mut self, target: f64) -> Self {
        self.target_fitness = Some(target);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel re-scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    /// Out-of-range rates (including NaN) are rejected, never clamped.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(format!(
                "crossover_rate must be in [0, 1], got {}",
                self.crossover_rate
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            ));
        }
        if self.tournament_size < 1 {
            return Err("tournament_size must be at least 1".into());
        }
        if self.tournament_size > self.population_size {
            return Err(format!(
                "tournament_size ({}) must not exceed population_size ({})",
                self.tournament_size, self.population_size
            ));
        }
        Ok(())
    }
}
