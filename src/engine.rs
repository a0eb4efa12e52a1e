//! Generational evolution engine.
//!
//! [`Engine`] owns the population and drives one generation per
//! [`step`](Engine::step) call: tournament selection, crossover,
//! survivor copies, mutation, re-scoring. It never stops on its own —
//! callers watch [`generation`](Engine::generation),
//! [`best_fitness`](Engine::best_fitness), and
//! [`target_reached`](Engine::target_reached) and decide when to stop
//! stepping.

use crate::config::GaConfig;
use crate::geometry::Point;
use crate::individual::{self, ScoredIndividual, Tour};
use crate::random::create_rng;
use crate::selection::tournament;
use rand::seq::{index, SliceRandom};
use rand_chacha::ChaCha8Rng;

/// Per-generation result returned by [`Engine::step`].
#[derive(Debug, Clone)]
pub struct GenerationStats {
    /// Best-scoring member of the new generation.
    pub best: ScoredIndividual,
    /// Mean fitness of the new generation.
    pub average_fitness: f64,
}

/// Genetic algorithm engine over a fixed set of points.
///
/// # Usage
///
/// ```
/// use tsp_ga::{Engine, GaConfig, Point};
///
/// let points = vec![
///     Point::new(0, 0.0, 0.0),
///     Point::new(1, 1.0, 0.0),
///     Point::new(2, 1.0, 1.0),
///     Point::new(3, 0.0, 1.0),
/// ];
/// let config = GaConfig::default().with_population_size(30).with_seed(42);
/// let mut engine = Engine::new(config).unwrap();
/// engine.seed(&points).unwrap();
///
/// let stats = engine.step();
/// assert_eq!(engine.generation(), 1);
/// assert!(stats.best.fitness <= 0.0);
/// ```
pub struct Engine {
    config: GaConfig,
    rng: ChaCha8Rng,
    points: Vec<Point>,
    population: Vec<ScoredIndividual>,
    generation: usize,
    best_fitness: f64,
}

impl Engine {
    /// Creates an engine from a validated configuration.
    ///
    /// Returns `Err` if the configuration is malformed; parameters are
    /// never clamped or defaulted.
    pub fn new(config: GaConfig) -> Result<Self, String> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Ok(Self {
            config,
            rng,
            points: Vec::new(),
            population: Vec::new(),
            generation: 0,
            best_fitness: f64::NEG_INFINITY,
        })
    }

    /// Seeds the population with independent random permutations of
    /// `points`, scoring each member.
    ///
    /// Re-seeding restarts the run: the generation counter resets to 0.
    /// Returns `Err` if fewer than two points are supplied.
    pub fn seed(&mut self, points: &[Point]) -> Result<(), String> {
        if points.len() < 2 {
            return Err(format!(
                "need at least 2 points to search, got {}",
                points.len()
            ));
        }
        self.points = points.to_vec();

        let base: Tour = (0..points.len()).collect();
        let mut tours = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size {
            let mut tour = base.clone();
            tour.shuffle(&mut self.rng);
            tours.push(tour);
        }

        self.population = self.score(tours);
        self.generation = 0;
        self.best_fitness = best_of(&self.population).fitness;
        Ok(())
    }

    /// Runs one generation and replaces the population wholesale.
    ///
    /// Per generation: `floor(crossover_rate * population_size / 2)`
    /// tournament-selected parent pairs each contribute two crossover
    /// children; the remaining slots are tournament-selected direct
    /// copies; `round(mutation_rate * population_size)` distinct slots
    /// are then replaced by mutated tours; finally every member is
    /// re-scored.
    ///
    /// # Panics
    /// Panics if called before [`seed`](Engine::seed), or if an operator
    /// produces a tour that is not a valid permutation (a logic defect,
    /// never a recoverable state).
    pub fn step(&mut self) -> GenerationStats {
        assert!(
            !self.population.is_empty(),
            "engine must be seeded before stepping"
        );

        let size = self.config.population_size;
        let k = self.config.tournament_size;
        let pairs = (self.config.crossover_rate * size as f64 / 2.0).floor() as usize;
        let mut tours: Vec<Tour> = Vec::with_capacity(size);

        for _ in 0..pairs {
            let p1 = tournament(&self.population, k, &mut self.rng);
            let p2 = tournament(&self.population, k, &mut self.rng);
            let (c1, c2) = self.config.crossover.apply(
                &self.population[p1].tour,
                &self.population[p2].tour,
                &mut self.rng,
            );
            tours.push(c1);
            tours.push(c2);
        }

        for _ in 0..size - 2 * pairs {
            let survivor = tournament(&self.population, k, &mut self.rng);
            tours.push(self.population[survivor].tour.clone());
        }

        // Distinct slots, sampled without replacement; a rate of 1.0
        // mutates every member exactly once.
        let mutations = ((self.config.mutation_rate * size as f64).round() as usize).min(size);
        for slot in index::sample(&mut self.rng, size, mutations) {
            tours[slot] = self.config.mutation.apply(&tours[slot], &mut self.rng);
        }

        for tour in &tours {
            assert!(
                individual::is_permutation(tour, self.points.len()),
                "operator produced an invalid tour: {tour:?}"
            );
        }

        self.population = self.score(tours);
        self.generation += 1;
        let best = best_of(&self.population).clone();
        self.best_fitness = best.fitness;

        GenerationStats {
            average_fitness: individual::average_fitness(&self.population),
            best,
        }
    }

    /// Number of completed generations since the last [`seed`](Engine::seed).
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best fitness in the current generation.
    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    /// Whether the current generation's best fitness has reached the
    /// configured target. Always `false` without a target.
    pub fn target_reached(&self) -> bool {
        self.config
            .target_fitness
            .is_some_and(|target| self.best_fitness >= target)
    }

    /// Read-only view of the current population.
    pub fn population(&self) -> &[ScoredIndividual] {
        &self.population
    }

    /// The engine's configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Scores a batch of tours into individuals. Scoring is pure and
    /// RNG-free, so the parallel path cannot affect reproducibility.
    fn score(&self, tours: Vec<Tour>) -> Vec<ScoredIndividual> {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                use rayon::prelude::*;
                return tours
                    .into_par_iter()
                    .map(|tour| ScoredIndividual {
                        fitness: individual::fitness(&self.points, &tour),
                        tour,
                    })
                    .collect();
            }
        }
        tours
            .into_iter()
            .map(|tour| ScoredIndividual {
                fitness: individual::fitness(&self.points, &tour),
                tour,
            })
            .collect()
    }
}

/// The highest-fitness member of a non-empty population.
fn best_of(population: &[ScoredIndividual]) -> &ScoredIndividual {
    population
        .iter()
        .max_by(|a, b| {
            a.fitness
                .partial_cmp(&b.fitness)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("population must not be empty")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::{Crossover, Mutation};

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(0, 0.0, 0.0),
            Point::new(1, 1.0, 0.0),
            Point::new(2, 1.0, 1.0),
            Point::new(3, 0.0, 1.0),
        ]
    }

    fn ring(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::TAU / n as f64;
                Point::new(i as u64, angle.cos(), angle.sin())
            })
            .collect()
    }

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(50)
            .with_tournament_size(4)
            .with_seed(42)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(Engine::new(GaConfig::default().with_population_size(1)).is_err());
        assert!(Engine::new(GaConfig::default().with_crossover_rate(1.5)).is_err());
        assert!(Engine::new(
            GaConfig::default()
                .with_population_size(4)
                .with_tournament_size(5)
        )
        .is_err());
    }

    #[test]
    fn test_seed_rejects_degenerate_input() {
        let mut engine = Engine::new(small_config()).unwrap();
        assert!(engine.seed(&[]).is_err());
        assert!(engine.seed(&[Point::new(0, 1.0, 1.0)]).is_err());
        assert!(engine.seed(&unit_square()).is_ok());
    }

    #[test]
    #[should_panic(expected = "engine must be seeded before stepping")]
    fn test_step_before_seed_panics() {
        let mut engine = Engine::new(small_config()).unwrap();
        engine.step();
    }

    #[test]
    fn test_seed_builds_scored_population() {
        let mut engine = Engine::new(small_config()).unwrap();
        engine.seed(&unit_square()).unwrap();

        assert_eq!(engine.population().len(), 50);
        assert_eq!(engine.generation(), 0);
        for ind in engine.population() {
            assert!(individual::is_permutation(&ind.tour, 4));
            assert!((ind.fitness - individual::fitness(&unit_square(), &ind.tour)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_step_preserves_population_invariants() {
        let points = ring(12);
        for crossover in [Crossover::Order, Crossover::PartiallyMapped, Crossover::Cycle] {
            for mutation in [
                Mutation::Swap,
                Mutation::Inversion,
                Mutation::Scramble,
                Mutation::Insertion,
            ] {
                let config = small_config()
                    .with_crossover(crossover)
                    .with_mutation(mutation);
                let mut engine = Engine::new(config).unwrap();
                engine.seed(&points).unwrap();

                for gen in 1..=10 {
                    engine.step();
                    assert_eq!(engine.generation(), gen);
                    assert_eq!(engine.population().len(), 50);
                    for ind in engine.population() {
                        assert!(
                            individual::is_permutation(&ind.tour, 12),
                            "{crossover:?}/{mutation:?} broke a tour: {:?}",
                            ind.tour
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_step_reports_current_generation_statistics() {
        let mut engine = Engine::new(small_config()).unwrap();
        engine.seed(&ring(8)).unwrap();

        for _ in 0..5 {
            let stats = engine.step();

            let recomputed = engine.population().iter().map(|i| i.fitness).sum::<f64>()
                / engine.population().len() as f64;
            assert!((stats.average_fitness - recomputed).abs() < 1e-12);

            let best = engine
                .population()
                .iter()
                .map(|i| i.fitness)
                .fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(stats.best.fitness, best);
            assert_eq!(engine.best_fitness(), best);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let points = ring(10);
        let mut a = Engine::new(small_config()).unwrap();
        let mut b = Engine::new(small_config()).unwrap();
        a.seed(&points).unwrap();
        b.seed(&points).unwrap();
        assert_eq!(a.population(), b.population());

        for _ in 0..10 {
            let sa = a.step();
            let sb = b.step();
            assert_eq!(a.population(), b.population());
            assert_eq!(sa.best, sb.best);
            assert_eq!(sa.average_fitness, sb.average_fitness);
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let points = ring(10);
        let mut a = Engine::new(small_config().with_seed(1)).unwrap();
        let mut b = Engine::new(small_config().with_seed(2)).unwrap();
        a.seed(&points).unwrap();
        b.seed(&points).unwrap();
        assert_ne!(a.population(), b.population());
    }

    #[test]
    fn test_reseeding_restarts_the_run() {
        let mut engine = Engine::new(small_config()).unwrap();
        engine.seed(&unit_square()).unwrap();
        engine.step();
        engine.step();
        assert_eq!(engine.generation(), 2);

        engine.seed(&unit_square()).unwrap();
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.population().len(), 50);
    }

    #[test]
    fn test_zero_crossover_rate_copies_survivors() {
        let config = small_config().with_crossover_rate(0.0).with_mutation_rate(0.0);
        let mut engine = Engine::new(config).unwrap();
        engine.seed(&ring(6)).unwrap();

        let before: Vec<Tour> = engine.population().iter().map(|i| i.tour.clone()).collect();
        engine.step();
        // Every member of the new generation is a copy of some old member.
        for ind in engine.population() {
            assert!(before.contains(&ind.tour));
        }
    }

    #[test]
    fn test_full_rates_fill_population_exactly() {
        let config = small_config()
            .with_crossover_rate(1.0)
            .with_mutation_rate(1.0);
        let mut engine = Engine::new(config).unwrap();
        engine.seed(&ring(9)).unwrap();
        engine.step();
        assert_eq!(engine.population().len(), 50);
    }

    #[test]
    fn test_odd_population_with_full_crossover() {
        // floor(1.0 * 51 / 2) = 25 pairs, one survivor slot remains.
        let config = small_config().with_population_size(51).with_crossover_rate(1.0);
        let mut engine = Engine::new(config).unwrap();
        engine.seed(&ring(7)).unwrap();
        engine.step();
        assert_eq!(engine.population().len(), 51);
    }

    #[test]
    fn test_target_reached() {
        let reachable = small_config().with_target_fitness(-1e9);
        let mut engine = Engine::new(reachable).unwrap();
        engine.seed(&unit_square()).unwrap();
        assert!(engine.target_reached());

        // The square's shortest closed tour has length 4, so a target
        // above -4 can never fire.
        let unreachable = small_config().with_target_fitness(-1.0);
        let mut engine = Engine::new(unreachable).unwrap();
        engine.seed(&unit_square()).unwrap();
        for _ in 0..20 {
            engine.step();
        }
        assert!(!engine.target_reached());

        let no_target = small_config();
        let mut engine = Engine::new(no_target).unwrap();
        engine.seed(&unit_square()).unwrap();
        assert!(!engine.target_reached());
    }

    #[test]
    fn test_unit_square_convergence() {
        // The perimeter (length 4) is the unique optimum. Converging within
        // 100 generations must hold across several seeds, not one lucky run.
        for seed in [1u64, 7, 42, 1234] {
            let config = GaConfig::default()
                .with_population_size(50)
                .with_crossover(Crossover::Order)
                .with_mutation(Mutation::Swap)
                .with_tournament_size(4)
                .with_seed(seed);
            let mut engine = Engine::new(config).unwrap();
            engine.seed(&unit_square()).unwrap();

            let mut converged = false;
            for _ in 0..100 {
                engine.step();
                if (engine.best_fitness() - (-4.0)).abs() < 1e-6 {
                    converged = true;
                    break;
                }
            }
            assert!(
                converged,
                "seed {seed} did not reach the optimal square tour, best {}",
                engine.best_fitness()
            );
        }
    }

    #[test]
    fn test_ring_improves_over_generations() {
        // On a circle the optimal tour follows the circumference; selection
        // pressure should improve the generation best substantially.
        let config = GaConfig::default()
            .with_population_size(100)
            .with_crossover(Crossover::Order)
            .with_mutation(Mutation::Inversion)
            .with_tournament_size(4)
            .with_seed(7);
        let mut engine = Engine::new(config).unwrap();
        engine.seed(&ring(15)).unwrap();

        let initial = engine.best_fitness();
        let mut best = initial;
        for _ in 0..150 {
            best = best.max(engine.step().best.fitness);
        }
        assert!(
            best > initial,
            "no improvement after 150 generations: {initial} -> {best}"
        );
    }
}
