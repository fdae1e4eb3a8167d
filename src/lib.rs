//! # Flappy Evo - Neuroevolution Flappy Bird Core
//!
//! A tick-driven flappy-bird simulation in which birds are either flown by a
//! human or by a tiny neural network whose weights evolve across generations.
//! The crate is an embedded core: it owns the physics, decisions, collisions
//! and evolution, and leaves rendering and input to a host.
//!
//! ## Features
//!
//! - Fixed 3→6→1 sigmoid decision network (ndarray)
//! - Genetic algorithm with elitism, roulette selection, uniform crossover and mutation
//! - Play mode against a stored opponent, train mode with whole populations
//! - Viewport-dependent pipe tuning for narrow and wide screens
//! - Outbound event queue instead of UI callbacks
//! - Pluggable persistence for the best genome
//!
//! ## Core Modules
//!
//! - [`simulation::engine`] - Tick loop, spawning and collision detection
//! - [`simulation::brain`] - Decision network
//! - [`simulation::genetics`] - Next-generation breeding
//! - [`simulation::evolution`] - Run control and checkpointing
//! - [`simulation::persistence`] - Best-genome storage

/// Core simulation logic and data structures.
pub mod simulation {
    /// Birds flown by a human or a decision network.
    pub mod bird;
    /// Decision network evaluated for AI birds.
    pub mod brain;
    /// Decorative background clouds.
    pub mod cloud;
    /// Tick loop, spawning and collision detection.
    pub mod engine;
    /// Tagged union over every entity kind.
    pub mod entity;
    /// Error types.
    pub mod error;
    /// Outbound event queue.
    pub mod events;
    /// Generation turnover and best-genome checkpointing.
    pub mod evolution;
    /// Selection, crossover and mutation.
    pub mod genetics;
    /// Trainable weight vectors.
    pub mod genome;
    /// Rectangle helpers for collision tests.
    pub mod geometric_utils;
    /// Trait for entities that occupy the viewport and advance every tick.
    ///
    /// The [`locatable::Locatable`] trait is implemented by every entity the
    /// engine manages (Bird, Pipe, Cloud) and by [`entity::Entity`] itself.
    pub mod locatable;
    /// Simulation parameters.
    pub mod params;
    /// Best-genome storage.
    pub mod persistence;
    /// Pipe obstacles.
    pub mod pipe;
    /// Per-frame callback subscriptions.
    pub mod scheduler;
}
