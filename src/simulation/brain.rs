//! Fixed-topology decision network for AI birds.
//!
//! A 3→6→1 feed-forward network with sigmoid activations. The input vector is
//! `[1, x1, x2]`, where the constant 1 acts as the bias term, so layers carry
//! no separate bias vector. Evaluation is pure: no hidden state, no randomness.

use ndarray::{Array1, Array2, array};

use super::genome::{Genome, HIDDEN_SIZE, INPUT_SIZE};

/// Logistic function `1 / (1 + e^-x)`.
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// A single fully connected layer with sigmoid activation.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Weight matrix (`output_size` × `input_size`).
    pub weights: Array2<f32>,
}

impl Layer {
    /// Performs forward pass with sigmoid activation.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = self.weights.dot(inputs);
        output.mapv_inplace(sigmoid);
        output
    }
}

/// The network of one AI bird, reshaped from its genome.
#[derive(Debug, Clone)]
pub struct Brain {
    /// `w1` as a 6×3 matrix.
    pub hidden: Layer,
    /// `w2` as a 1×6 matrix.
    pub output: Layer,
}

impl Brain {
    /// Reshapes a genome's flat weight vectors into layer matrices.
    pub fn from_genome(genome: &Genome) -> Self {
        let w1 = genome.w1();
        let w2 = genome.w2();

        Self {
            hidden: Layer {
                weights: Array2::from_shape_fn((HIDDEN_SIZE, INPUT_SIZE), |(row, col)| {
                    w1[row * INPUT_SIZE + col]
                }),
            },
            output: Layer {
                weights: Array2::from_shape_fn((1, HIDDEN_SIZE), |(_, col)| w2[col]),
            },
        }
    }

    /// Maps two sensor readings to a decision value in `[0, 1]`.
    #[inline]
    pub fn think(&self, x1: f32, x2: f32) -> f32 {
        let inputs = array![1.0, x1, x2];
        let h1 = self.hidden.forward(&inputs);
        self.output.forward(&h1)[0]
    }
}

/// One-shot evaluation of `genome` on `(x1, x2)`.
///
/// Equivalent to `Brain::from_genome(genome).think(x1, x2)`; birds keep their
/// reshaped [`Brain`] around instead of rebuilding it every tick.
pub fn evaluate(x1: f32, x2: f32, genome: &Genome) -> f32 {
    Brain::from_genome(genome).think(x1, x2)
}
