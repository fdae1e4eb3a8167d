#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::genetics::{
    DeadAgent, GeneticAlgorithm, crossover, fitness, pick_one, rank,
};
use flappy_evo::simulation::genome::{Genome, W1_LEN, W2_LEN};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn create_test_ga() -> GeneticAlgorithm {
    GeneticAlgorithm {
        population_size: 30,
        mutation_rate: 0.1,
        mutation_range: 0.1,
        init_weight_range: 1.0,
    }
}

fn agent(genome: Genome, score: u32, tick: u32) -> DeadAgent {
    DeadAgent {
        genome,
        score,
        tick,
        threshold: 0.5,
    }
}

fn random_dead(rng: &mut StdRng, scores: &[u32]) -> Vec<DeadAgent> {
    scores
        .iter()
        .map(|&score| agent(Genome::random(rng, 1.0), score, score * 20 + 7))
        .collect()
}

fn same_bits(a: &Genome, b: &Genome) -> bool {
    a.w1().iter().zip(b.w1()).all(|(x, y)| x.to_bits() == y.to_bits())
        && a.w2().iter().zip(b.w2()).all(|(x, y)| x.to_bits() == y.to_bits())
}

#[test]
fn test_next_generation_has_population_size() {
    let mut rng = StdRng::seed_from_u64(10);
    let ga = create_test_ga();

    for scores in [vec![3], vec![5, 1, 0, 9, 2], (0..50).collect::<Vec<u32>>()] {
        let dead = random_dead(&mut rng, &scores);
        let next = ga.next_generation(&dead, &mut rng);
        assert_eq!(next.len(), 30);
        assert!(next.iter().all(|g| g.w1().len() == W1_LEN && g.w2().len() == W2_LEN));
    }
}

#[test]
fn test_elite_is_copied_unchanged_into_slot_zero() {
    let mut rng = StdRng::seed_from_u64(11);
    let ga = GeneticAlgorithm {
        mutation_rate: 1.0,
        ..create_test_ga()
    };
    let dead = random_dead(&mut rng, &[4, 12, 7, 12, 0]);

    // Ties on score fall back to ticks survived.
    let mut best = dead[3].clone();
    best.tick += 1;
    let mut dead = dead;
    dead[3] = best.clone();

    let next = ga.next_generation(&dead, &mut rng);
    assert!(same_bits(&next[0], &best.genome));
}

#[test]
fn test_rank_orders_by_score_then_tick() {
    let dead = vec![
        agent(Genome::zeros(), 2, 40),
        agent(Genome::zeros(), 5, 100),
        agent(Genome::zeros(), 5, 119),
        agent(Genome::zeros(), 0, 3),
    ];
    let ranked: Vec<(u32, u32)> = rank(&dead).iter().map(|a| (a.score, a.tick)).collect();
    assert_eq!(ranked, vec![(5, 119), (5, 100), (2, 40), (0, 3)]);
}

#[test]
fn test_fitness_sums_to_one() {
    for scores in [vec![1, 2, 3, 4], vec![100], vec![0, 0, 7], vec![9, 9, 9, 9, 9, 1]] {
        let f = fitness(&scores);
        assert_eq!(f.len(), scores.len());
        assert!(f.iter().all(|&v| v >= 0.0));
        assert!((f.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_zero_scores_get_uniform_fitness() {
    let f = fitness(&[0, 0, 0, 0, 0]);
    assert!(f.iter().all(|&v| v == 0.2));
}

#[test]
fn test_single_scorer_dominates_selection() {
    let mut rng = StdRng::seed_from_u64(12);
    let dead = random_dead(&mut rng, &[0, 10, 0, 0]);

    let ranked = rank(&dead);
    assert_eq!(ranked[0].score, 10);

    let scores: Vec<u32> = ranked.iter().map(|a| a.score).collect();
    let f = fitness(&scores);
    assert_eq!(f, vec![1.0, 0.0, 0.0, 0.0]);

    let trials = 10_000;
    let hits = (0..trials).filter(|_| pick_one(&f, &mut rng) == 0).count();
    assert_eq!(hits, trials);

    let next = create_test_ga().next_generation(&dead, &mut rng);
    assert!(same_bits(&next[0], &dead[1].genome));
}

#[test]
fn test_pick_one_falls_back_to_last_candidate() {
    let mut rng = StdRng::seed_from_u64(13);
    // Weights that do not sum to one leave r positive after the last candidate.
    let f = [1e-12, 1e-12, 1e-12];
    for _ in 0..100 {
        assert_eq!(pick_one(&f, &mut rng), 2);
    }
}

#[test]
fn test_crossover_takes_each_weight_from_a_parent() {
    let mut rng = StdRng::seed_from_u64(14);
    let a = Genome::new(vec![1.0; W1_LEN], vec![1.0; W2_LEN]).unwrap();
    let b = Genome::new(vec![-1.0; W1_LEN], vec![-1.0; W2_LEN]).unwrap();

    let child = crossover(&a, &b, &mut rng).unwrap();
    let weights: Vec<f32> = child.w1().iter().chain(child.w2()).copied().collect();
    assert!(weights.iter().all(|&w| w == 1.0 || w == -1.0));
    assert!(weights.contains(&1.0));
    assert!(weights.contains(&-1.0));
}

#[test]
fn test_mutation_respects_rate_and_range() {
    let mut rng = StdRng::seed_from_u64(15);
    let genome = Genome::random(&mut rng, 1.0);

    let frozen = GeneticAlgorithm {
        mutation_rate: 0.0,
        ..create_test_ga()
    };
    assert!(same_bits(&frozen.mutate(&genome, &mut rng), &genome));

    let always = GeneticAlgorithm {
        mutation_rate: 1.0,
        ..create_test_ga()
    };
    let mutated = always.mutate(&genome, &mut rng);
    let before = genome.w1().iter().chain(genome.w2());
    let after = mutated.w1().iter().chain(mutated.w2());
    for (old, new) in before.zip(after) {
        assert!((new - old).abs() <= 0.1 + 1e-6);
    }
}

#[test]
fn test_parents_are_not_modified() {
    let mut rng = StdRng::seed_from_u64(16);
    let dead = random_dead(&mut rng, &[3, 1, 2]);
    let snapshot = dead.clone();

    let _ = create_test_ga().next_generation(&dead, &mut rng);
    assert_eq!(dead, snapshot);
}

#[test]
#[should_panic(expected = "without dead agents")]
fn test_empty_dead_list_is_rejected() {
    let mut rng = StdRng::seed_from_u64(17);
    create_test_ga().next_generation(&[], &mut rng);
}
