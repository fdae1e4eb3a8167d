//! Evolution controller.
//!
//! Glue between the engine, the genetic algorithm and the persistence port:
//! it starts runs, reseeds the engine whenever a training generation dies
//! out, tracks the best agent of the run and checkpoints it.

use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use super::engine::{Engine, GameMode, seeded_rng};
use super::events::{EventQueue, SimulationEvent};
use super::genetics::{DeadAgent, GeneticAlgorithm, rank};
use super::genome::Genome;
use super::params::Params;
use super::persistence::{BestRecord, DEFAULT_THRESHOLD, PersistencePort};
use super::scheduler::FrameScheduler;

/// Drives generations and checkpoints the best genome.
#[derive(Debug)]
pub struct EvolutionController<P> {
    genetics: GeneticAlgorithm,
    store: P,
    generation: u32,
    threshold: f32,
    best: Option<DeadAgent>,
    events: EventQueue,
    rng: StdRng,
}

impl<P: PersistencePort> EvolutionController<P> {
    /// Creates a controller using `store` for the best record.
    ///
    /// The RNG is seeded from `params.seed` offset by one so that it does not
    /// replay the engine's stream.
    pub fn new(params: &Params, store: P) -> Self {
        Self {
            genetics: GeneticAlgorithm::from_params(params),
            store,
            generation: 0,
            threshold: params.default_threshold,
            best: None,
            events: EventQueue::new(),
            rng: seeded_rng(params.seed.map(|seed| seed.wrapping_add(1))),
        }
    }

    /// Current generation, starting at 1 once training begins.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Threshold applied to the next generation.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Sets the threshold for every generation seeded from now on.
    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold.clamp(0.0, 1.0);
    }

    /// Best agent of the current run.
    pub fn best(&self) -> Option<&DeadAgent> {
        self.best.as_ref()
    }

    /// The persistence port.
    pub fn store(&self) -> &P {
        &self.store
    }

    /// Starts a training run from a random population.
    pub fn begin_training<S: FrameScheduler>(&mut self, engine: &mut Engine<S>) {
        engine.stop();
        engine.set_mode(GameMode::Train);

        self.genetics = GeneticAlgorithm::from_params(engine.params());
        self.generation = 1;
        self.best = None;
        self.events.clear();

        engine.init(None, None, self.threshold);
        engine.start();
        info!(
            population = self.genetics.population_size,
            threshold = self.threshold,
            "training started"
        );
    }

    /// Starts a play run, optionally against the stored best genome.
    ///
    /// A missing or unreadable record puts a random opponent with the default
    /// threshold in its place.
    pub fn begin_play<S: FrameScheduler>(&mut self, engine: &mut Engine<S>, opponent_enabled: bool) {
        engine.stop();
        engine.set_mode(GameMode::Play);
        self.events.clear();

        let (opponent, threshold) = if opponent_enabled {
            let (genome, threshold) = self.load_opponent();
            (Some(genome), threshold)
        } else {
            (None, self.threshold)
        };

        engine.init(None, opponent, threshold);
        engine.start();
        info!(opponent_enabled, "play started");
    }

    /// Drains engine events, reacts to generation turnover and returns every
    /// event for the host, including the controller's own.
    pub fn pump<S: FrameScheduler>(&mut self, engine: &mut Engine<S>) -> Vec<SimulationEvent> {
        let mut events = engine.drain_events();

        for event in &events {
            if let SimulationEvent::GenerationEnded { dead } = event {
                self.on_generation_end(engine, dead);
            }
        }

        events.extend(self.events.drain());
        events
    }

    /// Stops the run and checkpoints its best agent, live birds included.
    ///
    /// A generation that ended before the stop is scored but not reseeded.
    pub fn stop<S: FrameScheduler>(&mut self, engine: &mut Engine<S>) -> Vec<SimulationEvent> {
        engine.stop();
        let mut events = engine.drain_events();

        if engine.mode() == GameMode::Train {
            for event in &events {
                if let SimulationEvent::GenerationEnded { dead } = event {
                    self.record_best(dead);
                }
            }
            let live = engine.live_agents();
            self.record_best(&live);
            self.checkpoint();
        }

        events.extend(self.events.drain());
        events
    }

    fn on_generation_end<S: FrameScheduler>(&mut self, engine: &mut Engine<S>, dead: &[DeadAgent]) {
        if self.record_best(dead) {
            self.checkpoint();
        }

        let next = self.genetics.next_generation(dead, &mut self.rng);
        self.generation += 1;

        engine.init(Some(next), None, self.threshold);
        engine.start();
        info!(
            generation = self.generation,
            best = self.best.as_ref().map_or(0, |best| best.score),
            "generation seeded"
        );
    }

    /// Updates the run best from `candidates`; returns whether it improved.
    fn record_best(&mut self, candidates: &[DeadAgent]) -> bool {
        let Some(top) = rank(candidates).first().copied() else {
            return false;
        };
        if self.best.as_ref().is_some_and(|best| top.score <= best.score) {
            return false;
        }

        info!(score = top.score, "best score improved");
        self.events
            .push(SimulationEvent::BestScoreImproved { score: top.score });
        self.best = Some(top.clone());
        true
    }

    fn checkpoint(&mut self) {
        if let Some(best) = self.best.clone() {
            self.offer(&best);
        }
    }

    /// Writes `agent` to the store unless the stored score is higher.
    fn offer(&mut self, agent: &DeadAgent) {
        let stored = match self.store.load() {
            Ok(record) => record.map(|record| record.score),
            Err(err) => {
                warn!(%err, "stored best is unreadable, overwriting it");
                None
            }
        };

        if stored.is_some_and(|score| agent.score < score) {
            debug!(score = agent.score, ?stored, "stored best is higher, not saving");
            return;
        }

        let record = BestRecord::new(&agent.genome, agent.score, agent.threshold);
        if let Err(err) = self.store.save(&record) {
            warn!(%err, "failed to save best genome");
        }
    }

    fn load_opponent(&mut self) -> (Genome, f32) {
        match self.store.load() {
            Ok(Some(record)) => match record.genome() {
                Ok(genome) => return (genome, record.threshold),
                Err(err) => warn!(%err, "stored opponent is malformed, using a random one"),
            },
            Ok(None) => debug!("no stored opponent, using a random one"),
            Err(err) => warn!(%err, "stored opponent is unreadable, using a random one"),
        }

        (
            Genome::random(&mut self.rng, self.genetics.init_weight_range),
            DEFAULT_THRESHOLD,
        )
    }
}
