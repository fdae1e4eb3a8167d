//! Genetic algorithm turning one generation's dead birds into the next
//! generation's genomes.
//!
//! Agents are ranked by score (ties broken by ticks survived), the top genome
//! is carried over unchanged, and the remaining slots are filled with
//! roulette-wheel selected parents, uniform crossover and sparse additive
//! mutation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::GenomeError;
use super::genome::Genome;
use super::params::Params;

/// The record a bird leaves behind when it dies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadAgent {
    /// Weights the bird flew with.
    pub genome: Genome,
    /// Final score.
    pub score: u32,
    /// Ticks survived; breaks score ties.
    pub tick: u32,
    /// Decision cutoff the bird used.
    pub threshold: f32,
}

/// Selection, crossover and mutation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneticAlgorithm {
    /// Genomes produced per generation.
    pub population_size: usize,
    /// Per-weight mutation probability.
    pub mutation_rate: f64,
    /// Half-width of the uniform mutation perturbation.
    pub mutation_range: f32,
    /// Half-width of the uniform range for fresh random weights.
    pub init_weight_range: f32,
}

impl Default for GeneticAlgorithm {
    fn default() -> Self {
        Self::from_params(&Params::default())
    }
}

impl GeneticAlgorithm {
    /// Takes population size and operator settings from `params`.
    pub fn from_params(params: &Params) -> Self {
        Self {
            population_size: params.population_size,
            mutation_rate: params.mutation_rate,
            mutation_range: params.mutation_range,
            init_weight_range: params.init_weight_range,
        }
    }

    /// A population of fresh random genomes.
    pub fn random_population<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Genome> {
        (0..self.population_size)
            .map(|_| Genome::random(rng, self.init_weight_range))
            .collect()
    }

    /// Breeds `population_size` genomes from a generation's dead agents.
    ///
    /// Slot 0 always holds an unmodified copy of the best-ranked genome. A
    /// child whose parents cannot be crossed is replaced by a random genome.
    ///
    /// # Panics
    ///
    /// Panics if `dead` is empty or `population_size` is zero.
    pub fn next_generation<R: Rng + ?Sized>(&self, dead: &[DeadAgent], rng: &mut R) -> Vec<Genome> {
        assert!(!dead.is_empty(), "a generation cannot end without dead agents");
        assert!(self.population_size > 0, "population size must be positive");

        let ranked = rank(dead);
        let scores: Vec<u32> = ranked.iter().map(|agent| agent.score).collect();
        let fitness = fitness(&scores);

        let mut next = Vec::with_capacity(self.population_size);
        next.push(ranked[0].genome.clone());

        while next.len() < self.population_size {
            let parent_a = &ranked[pick_one(&fitness, rng)].genome;
            let parent_b = &ranked[pick_one(&fitness, rng)].genome;

            let child = match crossover(parent_a, parent_b, rng) {
                Ok(child) => self.mutate(&child, rng),
                Err(err) => {
                    warn!(%err, "crossover failed, seeding child randomly");
                    Genome::random(rng, self.init_weight_range)
                }
            };
            next.push(child);
        }

        next
    }

    /// Perturbs each weight with probability `mutation_rate` by a value drawn
    /// from `[-mutation_range, mutation_range)`.
    pub fn mutate<R: Rng + ?Sized>(&self, genome: &Genome, rng: &mut R) -> Genome {
        let rate = self.mutation_rate.clamp(0.0, 1.0);
        let range = self.mutation_range;

        genome.map_weights(|weight| {
            if range > 0.0 && rng.random_bool(rate) {
                weight + rng.random_range(-range..range)
            } else {
                weight
            }
        })
    }
}

/// Orders agents by descending score, then by descending ticks survived.
pub fn rank(dead: &[DeadAgent]) -> Vec<&DeadAgent> {
    let mut ranked: Vec<&DeadAgent> = dead.iter().collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score).then(b.tick.cmp(&a.tick)));
    ranked
}

/// Normalized selection weights.
///
/// Each agent gets `score / total`; if every score is zero, each gets `1 / n`.
pub fn fitness(scores: &[u32]) -> Vec<f64> {
    let total: u64 = scores.iter().map(|&s| u64::from(s)).sum();
    let n = scores.len() as f64;

    scores
        .iter()
        .map(|&score| {
            if total == 0 {
                1.0 / n
            } else {
                f64::from(score) / total as f64
            }
        })
        .collect()
}

/// Roulette-wheel selection with replacement.
///
/// Draws `r` in `[0, 1)` and subtracts fitness values in order until `r`
/// drops to zero or below. If rounding leaves `r` positive after the last
/// candidate, the last candidate is chosen.
pub fn pick_one<R: Rng + ?Sized>(fitness: &[f64], rng: &mut R) -> usize {
    let mut r: f64 = rng.random();
    for (index, weight) in fitness.iter().enumerate() {
        r -= weight;
        if r <= 0.0 {
            return index;
        }
    }
    fitness.len().saturating_sub(1)
}

/// Uniform crossover: each weight comes from either parent with probability 0.5.
pub fn crossover<R: Rng + ?Sized>(
    parent_a: &Genome,
    parent_b: &Genome,
    rng: &mut R,
) -> Result<Genome, GenomeError> {
    let w1 = mix(parent_a.w1(), parent_b.w1(), rng);
    let w2 = mix(parent_a.w2(), parent_b.w2(), rng);
    Genome::new(w1, w2)
}

fn mix<R: Rng + ?Sized>(a: &[f32], b: &[f32], rng: &mut R) -> Vec<f32> {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| if rng.random_bool(0.5) { x } else { y })
        .collect()
}
