//! Simulation parameters.
//!
//! Every tuning constant of the engine, the entities and the genetic
//! algorithm lives here so a host can load a whole configuration from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::PersistenceError;

/// Viewport size class; narrow screens get wider gaps and slower pipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewportClass {
    /// Phone-sized viewports, below [`Params::narrow_breakpoint`].
    Narrow,
    /// Everything else.
    Wide,
}

/// Pipe spawning constants for one viewport class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeTuning {
    /// Milliseconds between pipe pair spawns.
    pub spawn_interval_ms: f64,
    /// Horizontal pixels travelled per tick.
    pub speed: f32,
}

impl ViewportClass {
    /// Classifies a viewport by its width.
    pub fn classify(width: f32, breakpoint: f32) -> Self {
        if width < breakpoint {
            ViewportClass::Narrow
        } else {
            ViewportClass::Wide
        }
    }

    /// Spawn cadence and pipe speed for this class.
    pub fn pipe_tuning(self) -> PipeTuning {
        match self {
            ViewportClass::Narrow => PipeTuning {
                spawn_interval_ms: 1600.0,
                speed: 5.0,
            },
            ViewportClass::Wide => PipeTuning {
                spawn_interval_ms: 1000.0,
                speed: 10.0,
            },
        }
    }
}

/// Simulation parameters that control engine and evolution behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Number of birds per training generation.
    pub population_size: usize,
    /// Viewport width in pixels.
    pub width: f32,
    /// Viewport height in pixels.
    pub height: f32,
    /// Widths below this are treated as narrow viewports.
    pub narrow_breakpoint: f32,
    /// Bird collision radius.
    pub bird_radius: f32,
    /// Downward acceleration per tick.
    pub gravity: f32,
    /// Velocity assigned on a flap (negative is upward).
    pub flap_strength: f32,
    /// Bird spawn x as a fraction of the viewport width.
    pub spawn_x_fraction: f32,
    /// Horizontal extent of every pipe.
    pub pipe_width: f32,
    /// Milliseconds between cloud spawns.
    pub cloud_interval_ms: f64,
    /// Base cloud speed; clouds drift at half of it.
    pub cloud_speed: f32,
    /// Decision cutoff applied to AI birds unless overridden.
    pub default_threshold: f32,
    /// Per-weight mutation probability.
    pub mutation_rate: f64,
    /// Mutation perturbations are drawn from `[-mutation_range, mutation_range)`.
    pub mutation_range: f32,
    /// Fresh genomes draw weights from `[-init_weight_range, init_weight_range)`.
    pub init_weight_range: f32,
    /// Seed for the engine and controller RNGs; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Evaluate AI birds with a rayon data-parallel pass.
    pub parallel_think: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            population_size: 30,
            width: 1280.0,
            height: 720.0,
            narrow_breakpoint: 600.0,
            bird_radius: 25.0,
            gravity: 1.0,
            flap_strength: -12.0,
            spawn_x_fraction: 1.0 / 6.0,
            pipe_width: 150.0,
            cloud_interval_ms: 1500.0,
            cloud_speed: 8.0,
            default_threshold: 0.5,
            mutation_rate: 0.1,
            mutation_range: 0.1,
            init_weight_range: 1.0,
            seed: None,
            parallel_think: false,
        }
    }
}

impl Params {
    /// Sets population size and viewport dimensions.
    ///
    /// # Panics
    ///
    /// Panics if `population_size` is zero.
    pub fn configure(&mut self, population_size: usize, width: f32, height: f32) {
        assert!(population_size > 0, "population size must be positive");
        self.population_size = population_size;
        self.width = width;
        self.height = height;
    }

    /// Size class of the current viewport.
    pub fn viewport_class(&self) -> ViewportClass {
        ViewportClass::classify(self.width, self.narrow_breakpoint)
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads parameters from a JSON file; absent fields take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let json = std::fs::read_to_string(path)?;
        let params = serde_json::from_str(&json)?;
        Ok(params)
    }
}
