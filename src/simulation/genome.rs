//! Trainable parameters of a bird's decision network.
//!
//! A genome is two flat weight vectors: `w1` (the 6×3 input→hidden matrix in
//! row-major order) and `w2` (the 1×6 hidden→output matrix). Both lengths are
//! fixed by the network topology and checked on construction, so a `Genome`
//! value is always safe to hand to [`super::brain::Brain`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::GenomeError;

/// Network inputs: bias plus the two sensor readings.
pub const INPUT_SIZE: usize = 3;
/// Width of the single hidden layer.
pub const HIDDEN_SIZE: usize = 6;
/// Number of weights in `w1`.
pub const W1_LEN: usize = HIDDEN_SIZE * INPUT_SIZE;
/// Number of weights in `w2`.
pub const W2_LEN: usize = HIDDEN_SIZE;

/// The weight vectors of one agent.
///
/// Serializes as `{ "w1": [..18 floats..], "w2": [..6 floats..] }`. Deserializing
/// rejects vectors of the wrong length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGenome")]
pub struct Genome {
    w1: Vec<f32>,
    w2: Vec<f32>,
}

#[derive(Deserialize)]
struct RawGenome {
    w1: Vec<f32>,
    w2: Vec<f32>,
}

impl TryFrom<RawGenome> for Genome {
    type Error = GenomeError;

    fn try_from(raw: RawGenome) -> Result<Self, Self::Error> {
        Self::new(raw.w1, raw.w2)
    }
}

impl Genome {
    /// Builds a genome from raw weight vectors, checking both lengths.
    pub fn new(w1: Vec<f32>, w2: Vec<f32>) -> Result<Self, GenomeError> {
        check_len("w1", W1_LEN, w1.len())?;
        check_len("w2", W2_LEN, w2.len())?;
        Ok(Self { w1, w2 })
    }

    /// A genome with every weight set to zero.
    pub fn zeros() -> Self {
        Self {
            w1: vec![0.0; W1_LEN],
            w2: vec![0.0; W2_LEN],
        }
    }

    /// A genome with every weight drawn uniformly from `[-range, range)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, range: f32) -> Self {
        let mut sample = || {
            if range > 0.0 {
                rng.random_range(-range..range)
            } else {
                0.0
            }
        };

        Self {
            w1: (0..W1_LEN).map(|_| sample()).collect(),
            w2: (0..W2_LEN).map(|_| sample()).collect(),
        }
    }

    /// Input→hidden weights, row-major 6×3.
    pub fn w1(&self) -> &[f32] {
        &self.w1
    }

    /// Hidden→output weights.
    pub fn w2(&self) -> &[f32] {
        &self.w2
    }

    /// Builds a new genome by applying `f` to every weight, `w1` first.
    pub fn map_weights(&self, mut f: impl FnMut(f32) -> f32) -> Self {
        Self {
            w1: self.w1.iter().map(|&w| f(w)).collect(),
            w2: self.w2.iter().map(|&w| f(w)).collect(),
        }
    }
}

fn check_len(layer: &'static str, expected: usize, actual: usize) -> Result<(), GenomeError> {
    if actual == expected {
        Ok(())
    } else {
        Err(GenomeError::WrongLength {
            layer,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rejects_short_w1() {
        let err = Genome::new(vec![0.0; 17], vec![0.0; W2_LEN]).unwrap_err();
        assert_eq!(
            err,
            GenomeError::WrongLength {
                layer: "w1",
                expected: 18,
                actual: 17
            }
        );
    }

    #[test]
    fn rejects_long_w2() {
        assert!(Genome::new(vec![0.0; W1_LEN], vec![0.0; 7]).is_err());
    }

    #[test]
    fn random_weights_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let genome = Genome::random(&mut rng, 1.0);
        assert_eq!(genome.w1().len(), W1_LEN);
        assert_eq!(genome.w2().len(), W2_LEN);
        assert!(
            genome
                .w1()
                .iter()
                .chain(genome.w2())
                .all(|w| (-1.0..1.0).contains(w))
        );
    }

    #[test]
    fn deserialize_checks_lengths() {
        let ok: Result<Genome, _> = serde_json::from_str(&format!(
            r#"{{"w1":{:?},"w2":{:?}}}"#,
            vec![0.5_f32; W1_LEN],
            vec![0.25_f32; W2_LEN]
        ));
        assert!(ok.is_ok());

        let bad: Result<Genome, _> = serde_json::from_str(r#"{"w1":[1.0,2.0],"w2":[]}"#);
        assert!(bad.is_err());
    }
}
