//! Tick-driven simulation and collision engine.
//!
//! The engine owns every entity, advances physics once per display refresh,
//! asks AI birds for their decisions, detects collisions and reports terminal
//! events through its [`EventQueue`]. It handles:
//! - Frame subscription through a [`FrameScheduler`] (start/stop are pause semantics)
//! - Timed spawning of clouds and pipe pairs
//! - Optional data-parallel network evaluation using rayon
//! - Game over in play mode and extinction in train mode

use geo::Rect;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::bird::{Bird, Controller};
use super::cloud::Cloud;
use super::entity::Entity;
use super::events::{DeathCause, EventQueue, SimulationEvent};
use super::genetics::{DeadAgent, GeneticAlgorithm};
use super::genome::Genome;
use super::geometric_utils;
use super::locatable::Locatable;
use super::params::Params;
use super::pipe::{Gap, PairGeometry, Pipe};
use super::scheduler::{FrameHandle, FrameScheduler, ManualScheduler};

/// What the engine is simulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// One human bird, optionally racing an AI opponent.
    Play,
    /// A population of AI birds evolving across generations.
    Train,
}

/// Scheduling state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Seeded or reset, never started.
    Idle,
    /// A frame subscription is pending.
    Running,
    /// Stopped by the host; `start` resumes without reseeding.
    Paused,
    /// The human player died.
    GameOver,
    /// Every training bird died; waiting for `init`.
    Extinct,
}

/// Creates the RNG for a run: seeded when `seed` is set, from the OS otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Collision test for one bird: floor and ceiling first, then pipes.
pub fn detect_collision(bird: &Bird, pipes: &[Rect<f32>], height: f32) -> Option<DeathCause> {
    if geometric_utils::outside_vertical(bird.y, bird.radius, height) {
        return Some(DeathCause::Bounds);
    }

    let bounds = bird.bounds();
    pipes
        .iter()
        .any(|pipe| geometric_utils::overlaps(&bounds, pipe))
        .then_some(DeathCause::Pipe)
}

/// The simulation engine.
#[derive(Debug)]
pub struct Engine<S = ManualScheduler> {
    params: Params,
    mode: GameMode,
    state: RunState,
    scheduler: S,
    pending_frame: Option<FrameHandle>,
    entities: Vec<Entity>,
    dead: Vec<DeadAgent>,
    events: EventQueue,
    rng: StdRng,
    last_pipe_time: f64,
    last_cloud_time: f64,
    flap_requested: bool,
}

impl Engine<ManualScheduler> {
    /// Creates an engine driven by a [`ManualScheduler`].
    pub fn new(params: Params) -> Self {
        Self::with_scheduler(params, ManualScheduler::new())
    }

    /// Fires the pending frame at `timestamp_ms`, if there is one.
    ///
    /// Returns whether a frame ran.
    pub fn advance(&mut self, timestamp_ms: f64) -> bool {
        match self.scheduler.take_pending() {
            Some(handle) => {
                self.frame(handle, timestamp_ms);
                true
            }
            None => false,
        }
    }
}

impl<S: FrameScheduler> Engine<S> {
    /// Creates an idle, empty engine in play mode.
    pub fn with_scheduler(params: Params, scheduler: S) -> Self {
        let rng = seeded_rng(params.seed);
        Self {
            params,
            mode: GameMode::Play,
            state: RunState::Idle,
            scheduler,
            pending_frame: None,
            entities: Vec::new(),
            dead: Vec::new(),
            events: EventQueue::new(),
            rng,
            last_pipe_time: 0.0,
            last_cloud_time: 0.0,
            flap_requested: false,
        }
    }

    /// Sets population size and viewport dimensions.
    pub fn configure(&mut self, population_size: usize, width: f32, height: f32) {
        self.params.configure(population_size, width, height);
        self.sync_floor();
    }

    /// Switches between play and train mode; takes effect on the next `init`.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
    }

    /// Replaces the live entity set wholesale.
    ///
    /// In train mode every genome of `population` becomes an AI bird, and
    /// `None` seeds `population_size` random genomes. In play mode a human
    /// bird is seeded, joined by an AI opponent when `opponent` is given.
    /// `threshold` applies to every AI bird created here. Scheduling is
    /// stopped first if it was running; call [`start`](Self::start) afterwards.
    ///
    /// # Panics
    ///
    /// Panics in train mode if `population` is an empty vector.
    pub fn init(&mut self, population: Option<Vec<Genome>>, opponent: Option<Genome>, threshold: f32) {
        if self.pending_frame.is_some() {
            debug!("reseeding a running engine, stopping scheduling first");
            self.stop();
        }

        self.entities.clear();
        self.dead.clear();
        self.last_pipe_time = 0.0;
        self.last_cloud_time = 0.0;
        self.flap_requested = false;

        match self.mode {
            GameMode::Play => {
                self.entities.push(Bird::human(&self.params).into());
                if let Some(genome) = opponent {
                    self.entities
                        .push(Bird::opponent(&self.params, genome, threshold).into());
                }
            }
            GameMode::Train => {
                let genomes = population.unwrap_or_else(|| {
                    GeneticAlgorithm::from_params(&self.params).random_population(&mut self.rng)
                });
                assert!(!genomes.is_empty(), "a training population needs at least one genome");
                self.entities.extend(
                    genomes
                        .into_iter()
                        .map(|genome| Entity::Bird(Bird::ai(&self.params, genome, threshold))),
                );
            }
        }

        self.state = RunState::Idle;
        debug!(mode = ?self.mode, birds = self.live_count(), "engine seeded");
    }

    /// Subscribes to frames. No effect unless idle or paused.
    pub fn start(&mut self) {
        match self.state {
            RunState::Idle | RunState::Paused => {
                self.pending_frame = Some(self.scheduler.request_frame());
                self.state = RunState::Running;
                debug!("engine started");
            }
            RunState::Running => {}
            RunState::GameOver | RunState::Extinct => {
                debug!(state = ?self.state, "start ignored until the engine is reseeded");
            }
        }
    }

    /// Cancels the pending frame. Safe to call in any state, any number of times.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        if self.state == RunState::Running {
            self.state = RunState::Paused;
            debug!("engine paused");
        }
    }

    /// Stops scheduling and clears every entity, record, timer and event.
    pub fn reset(&mut self) {
        self.stop();
        self.entities.clear();
        self.dead.clear();
        self.events.clear();
        self.last_pipe_time = 0.0;
        self.last_cloud_time = 0.0;
        self.flap_requested = false;
        self.state = RunState::Idle;
    }

    /// Frame callback body. Ignores any handle other than the pending one.
    pub fn frame(&mut self, handle: FrameHandle, timestamp_ms: f64) {
        if self.state != RunState::Running || self.pending_frame != Some(handle) {
            return;
        }
        self.pending_frame = Some(self.scheduler.request_frame());
        self.tick(timestamp_ms);
    }

    /// Records human input; the player's bird flaps on the next tick.
    pub fn flap_signal(&mut self) {
        self.flap_requested = true;
    }

    /// Adopts new viewport dimensions. Entities keep their positions.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.params.width = width;
        self.params.height = height;
        self.sync_floor();
        debug!(width, height, class = ?self.params.viewport_class(), "viewport resized");
    }

    /// Adds an entity to the live set.
    pub fn add_entity(&mut self, entity: impl Into<Entity>) {
        self.entities.push(entity.into());
    }

    /// Removes and returns every queued event.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        self.events.drain().collect()
    }

    /// Current parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Current mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Current scheduling state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The frame scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the frame scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// All entities in draw order as of the last tick.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Live birds.
    pub fn birds(&self) -> impl Iterator<Item = &Bird> {
        self.entities.iter().filter_map(Entity::as_bird)
    }

    /// Mutable access to live birds.
    pub fn birds_mut(&mut self) -> impl Iterator<Item = &mut Bird> {
        self.entities.iter_mut().filter_map(Entity::as_bird_mut)
    }

    /// Live pipes.
    pub fn pipes(&self) -> impl Iterator<Item = &Pipe> {
        self.entities.iter().filter_map(Entity::as_pipe)
    }

    /// Live clouds.
    pub fn clouds(&self) -> impl Iterator<Item = &Cloud> {
        self.entities.iter().filter_map(Entity::as_cloud)
    }

    /// Number of live birds.
    pub fn live_count(&self) -> usize {
        self.birds().count()
    }

    /// Highest score among live birds.
    pub fn max_live_score(&self) -> Option<u32> {
        self.birds().map(Bird::score).max()
    }

    /// Agent records for live AI birds, as if they died now.
    pub fn live_agents(&self) -> Vec<DeadAgent> {
        self.birds().filter_map(agent_record).collect()
    }

    /// AI birds that died so far in the current generation.
    pub fn dead_agents(&self) -> &[DeadAgent] {
        &self.dead
    }

    fn sync_floor(&mut self) {
        let height = self.params.height;
        for bird in self.birds_mut() {
            bird.floor = height;
        }
    }

    fn tick(&mut self, timestamp_ms: f64) {
        self.entities.retain(|entity| !entity.is_marked_for_deletion());

        self.spawn(timestamp_ms);

        self.entities.sort_by_key(|entity| entity.z_index());
        for entity in &mut self.entities {
            entity.update();
        }

        self.think();
        self.collide();
    }

    fn spawn(&mut self, timestamp_ms: f64) {
        if timestamp_ms - self.last_cloud_time > self.params.cloud_interval_ms {
            let cloud = Cloud::new_random(&mut self.rng, self.params.width, self.params.cloud_speed);
            self.entities.push(cloud.into());
            self.last_cloud_time = timestamp_ms;
        }

        let class = self.params.viewport_class();
        let tuning = class.pipe_tuning();
        if timestamp_ms - self.last_pipe_time > tuning.spawn_interval_ms {
            let geometry = PairGeometry::sample(&mut self.rng, class, self.params.height);
            let pair = Pipe::pair(
                self.params.width,
                geometry,
                self.params.height,
                self.params.pipe_width,
                tuning.speed,
            );
            self.entities.extend(pair.map(Entity::Pipe));
            self.last_pipe_time = timestamp_ms;
            debug!(gap = geometry.gap, top = geometry.top_length, "pipe pair spawned");
        }
    }

    fn think(&mut self) {
        let gaps: Vec<Gap> = self.pipes().filter_map(Pipe::gap).collect();

        if self.params.parallel_think {
            self.entities
                .par_iter_mut()
                .filter_map(Entity::as_bird_mut)
                .for_each(|bird| {
                    bird.think(&gaps);
                });
        } else {
            for bird in self.birds_mut() {
                bird.think(&gaps);
            }
        }

        if std::mem::take(&mut self.flap_requested) {
            for bird in self.birds_mut().filter(|bird| bird.is_human()) {
                bird.flap();
            }
        }
    }

    fn collide(&mut self) {
        let height = self.params.height;
        let obstacles: Vec<Rect<f32>> = self.pipes().map(|pipe| pipe.bounds()).collect();

        let mut survivors = Vec::with_capacity(self.entities.len());
        let mut died = Vec::new();
        for entity in std::mem::take(&mut self.entities) {
            match entity {
                Entity::Bird(bird) => match detect_collision(&bird, &obstacles, height) {
                    Some(cause) => died.push((bird, cause)),
                    None => survivors.push(Entity::Bird(bird)),
                },
                other => survivors.push(other),
            }
        }
        self.entities = survivors;

        if died.is_empty() {
            return;
        }

        let mut player_score = None;
        for (bird, cause) in died {
            let score = bird.score();
            if bird.is_human() {
                player_score = Some(score);
            }
            if let Some(agent) = agent_record(&bird) {
                self.dead.push(agent);
            }
            self.events.push(SimulationEvent::BirdDied {
                label: bird.label,
                score,
                cause,
            });
        }

        match self.mode {
            GameMode::Play => {
                if let Some(final_score) = player_score {
                    self.halt(RunState::GameOver);
                    info!(final_score, "game over");
                    self.events.push(SimulationEvent::GameOver { final_score });
                }
            }
            GameMode::Train => {
                if self.live_count() == 0 {
                    self.halt(RunState::Extinct);
                    let dead = std::mem::take(&mut self.dead);
                    info!(dead = dead.len(), "population extinct");
                    self.events.push(SimulationEvent::GenerationEnded { dead });
                }
            }
        }
    }

    fn halt(&mut self, state: RunState) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.state = state;
    }
}

fn agent_record(bird: &Bird) -> Option<DeadAgent> {
    match &bird.controller {
        Controller::Ai {
            genome, threshold, ..
        } => Some(DeadAgent {
            genome: genome.clone(),
            score: bird.score(),
            tick: bird.tick,
            threshold: *threshold,
        }),
        Controller::Human => None,
    }
}
