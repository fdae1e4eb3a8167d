//! Birds: the agents of the simulation.
//!
//! A bird falls under constant gravity and flaps to climb. Its controller is
//! either the human player (flaps on input) or a decision network built from
//! a [`Genome`] (flaps when the network output exceeds the bird's threshold).

use geo::Rect;

use super::brain::Brain;
use super::genome::Genome;
use super::geometric_utils;
use super::locatable::{AI_BIRD_Z, Locatable, OPPONENT_Z, PLAYER_Z};
use super::params::Params;
use super::pipe::Gap;

/// Ticks survived per point of score.
pub const TICKS_PER_POINT: u32 = 20;
/// Label of the human-controlled bird.
pub const PLAYER_LABEL: &str = "P1";
/// Label of the play-mode AI opponent.
pub const OPPONENT_LABEL: &str = "AI";

/// Who decides when a bird flaps.
#[derive(Debug, Clone)]
pub enum Controller {
    /// Flaps when the host forwards a flap signal.
    Human,
    /// Flaps when its network output exceeds `threshold`.
    Ai {
        /// Weights this bird was created from; never modified while alive.
        genome: Genome,
        /// `genome` reshaped into layer matrices.
        brain: Brain,
        /// Decision cutoff in `[0, 1]`.
        threshold: f32,
    },
}

/// Latest readings fed to the decision network.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sensors {
    /// Horizontal distance to the far edge of the upcoming pipe pair.
    pub x1: f32,
    /// Vertical offset from the center of that pair's gap.
    pub x2: f32,
}

/// A bird.
#[derive(Debug, Clone)]
pub struct Bird {
    /// Horizontal center; constant for the bird's lifetime.
    pub x: f32,
    /// Vertical center.
    pub y: f32,
    /// Collision radius.
    pub radius: f32,
    /// Vertical velocity (positive is downward).
    pub velocity: f32,
    /// Added to the velocity every tick.
    pub gravity: f32,
    /// Velocity assigned by a flap.
    pub flap_strength: f32,
    /// Viewport height the bird cannot fall through.
    pub floor: f32,
    /// Ticks survived so far.
    pub tick: u32,
    /// Identifies the human player or the opponent; `None` for training birds.
    pub label: Option<String>,
    /// Decision source.
    pub controller: Controller,
    /// Sensor readings from the latest tick.
    pub sensors: Sensors,
    /// Draw/update order.
    pub z_index: i32,
}

impl Bird {
    fn spawn(params: &Params, controller: Controller, label: Option<String>, z_index: i32) -> Self {
        Self {
            x: params.width * params.spawn_x_fraction,
            y: params.height / 2.0,
            radius: params.bird_radius,
            velocity: 0.0,
            gravity: params.gravity,
            flap_strength: params.flap_strength,
            floor: params.height,
            tick: 0,
            label,
            controller,
            sensors: Sensors::default(),
            z_index,
        }
    }

    /// The human player's bird.
    pub fn human(params: &Params) -> Self {
        Self::spawn(
            params,
            Controller::Human,
            Some(PLAYER_LABEL.to_string()),
            PLAYER_Z,
        )
    }

    /// A network-controlled training bird.
    pub fn ai(params: &Params, genome: Genome, threshold: f32) -> Self {
        Self::spawn(params, Self::ai_controller(genome, threshold), None, AI_BIRD_Z)
    }

    /// A network-controlled opponent flying alongside the human player.
    pub fn opponent(params: &Params, genome: Genome, threshold: f32) -> Self {
        Self::spawn(
            params,
            Self::ai_controller(genome, threshold),
            Some(OPPONENT_LABEL.to_string()),
            OPPONENT_Z,
        )
    }

    fn ai_controller(genome: Genome, threshold: f32) -> Controller {
        let brain = Brain::from_genome(&genome);
        Controller::Ai {
            genome,
            brain,
            threshold,
        }
    }

    /// Points earned: one per [`TICKS_PER_POINT`] ticks survived.
    pub fn score(&self) -> u32 {
        self.tick / TICKS_PER_POINT
    }

    /// Whether the bird follows human input.
    pub fn is_human(&self) -> bool {
        matches!(self.controller, Controller::Human)
    }

    /// Genome of an AI bird.
    pub fn genome(&self) -> Option<&Genome> {
        match &self.controller {
            Controller::Ai { genome, .. } => Some(genome),
            Controller::Human => None,
        }
    }

    /// Decision cutoff of an AI bird.
    pub fn threshold(&self) -> Option<f32> {
        match &self.controller {
            Controller::Ai { threshold, .. } => Some(*threshold),
            Controller::Human => None,
        }
    }

    /// Sets the velocity to the flap strength.
    pub fn flap(&mut self) {
        self.velocity = self.flap_strength;
    }

    /// Reads the sensors against the nearest pipe pair whose midpoint lies ahead.
    ///
    /// With no pair ahead the previous readings are kept.
    pub fn sense(&mut self, gaps: &[Gap]) {
        let upcoming = gaps
            .iter()
            .filter(|gap| gap.center_x() > self.x)
            .min_by(|a, b| a.x_start.total_cmp(&b.x_start));

        if let Some(gap) = upcoming {
            self.sensors = Sensors {
                x1: gap.x_end - self.x,
                x2: self.y - gap.center_y,
            };
        }
    }

    /// Network output for the current sensor readings; `None` for human birds.
    pub fn decision(&self) -> Option<f32> {
        match &self.controller {
            Controller::Ai { brain, .. } => Some(brain.think(self.sensors.x1, self.sensors.x2)),
            Controller::Human => None,
        }
    }

    /// Senses and, for AI birds, flaps when the decision exceeds the threshold.
    ///
    /// Returns whether the bird flapped.
    pub fn think(&mut self, gaps: &[Gap]) -> bool {
        self.sense(gaps);
        let flap = match (&self.controller, self.decision()) {
            (Controller::Ai { threshold, .. }, Some(output)) => output > *threshold,
            _ => false,
        };
        if flap {
            self.flap();
        }
        flap
    }
}

impl Locatable for Bird {
    fn bounds(&self) -> Rect<f32> {
        geometric_utils::circle_bounds(self.x, self.y, self.radius)
    }

    fn z_index(&self) -> i32 {
        self.z_index
    }

    fn update(&mut self) {
        if self.y + self.velocity + self.radius >= self.floor {
            self.velocity = 0.0;
            self.y = self.floor - self.radius;
        } else {
            self.y += self.velocity;
        }
        self.velocity += self.gravity;
        self.tick += 1;
    }

    fn is_marked_for_deletion(&self) -> bool {
        false
    }
}
