#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::brain::{Brain, evaluate, sigmoid};
use flappy_evo::simulation::genome::{Genome, W1_LEN, W2_LEN};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_zero_genome_outputs_one_half() {
    let genome = Genome::zeros();

    for (x1, x2) in [(0.0, 0.0), (250.0, -40.0), (-1000.0, 1000.0), (1e6, -1e6)] {
        assert_eq!(evaluate(x1, x2, &genome), 0.5);
    }
}

#[test]
fn test_output_stays_in_unit_interval() {
    let mut rng = StdRng::seed_from_u64(1);

    for _ in 0..200 {
        let genome = Genome::random(&mut rng, 1.0);
        for x1 in [-1000.0, -150.0, 0.0, 75.0, 1200.0] {
            for x2 in [-600.0, -25.0, 0.0, 40.0, 600.0] {
                let out = evaluate(x1, x2, &genome);
                assert!((0.0..=1.0).contains(&out), "output {out} out of range");
            }
        }
    }
}

#[test]
fn test_evaluation_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(2);
    let genome = Genome::random(&mut rng, 1.0);
    let brain = Brain::from_genome(&genome);

    let first = brain.think(123.0, -45.0);
    for _ in 0..10 {
        assert_eq!(brain.think(123.0, -45.0).to_bits(), first.to_bits());
        assert_eq!(evaluate(123.0, -45.0, &genome).to_bits(), first.to_bits());
    }
}

#[test]
fn test_bias_input_is_constant_one() {
    // Hidden unit 0 only sees the bias column.
    let mut w1 = vec![0.0; W1_LEN];
    w1[0] = 1.5;
    let mut w2 = vec![0.0; W2_LEN];
    w2[0] = 1.0;
    let genome = Genome::new(w1, w2).unwrap();

    let expected = sigmoid(sigmoid(1.5));
    assert!((evaluate(0.0, 0.0, &genome) - expected).abs() < 1e-6);
    assert!((evaluate(500.0, -300.0, &genome) - expected).abs() < 1e-6);
}

#[test]
fn test_second_sensor_feeds_third_column() {
    let mut w1 = vec![0.0; W1_LEN];
    w1[5] = -0.5; // row 1, column 2
    let mut w2 = vec![0.0; W2_LEN];
    w2[1] = 3.0;
    let genome = Genome::new(w1, w2).unwrap();

    let expected = sigmoid(3.0 * sigmoid(-0.5 * 4.0));
    assert!((evaluate(99.0, 4.0, &genome) - expected).abs() < 1e-6);
}
