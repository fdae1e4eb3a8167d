//! Trait for entities that occupy the viewport and advance every tick.
//!
//! This trait provides a common interface for birds, pipes and clouds so the
//! engine and the renderer can treat them uniformly.

use geo::Rect;

/// Draw/update order of clouds (furthest back).
pub const CLOUD_Z: i32 = 0;
/// Draw/update order of pipes.
pub const PIPE_Z: i32 = 1;
/// Draw/update order of a play-mode AI opponent.
pub const OPPONENT_Z: i32 = 4;
/// Draw/update order of training birds.
pub const AI_BIRD_Z: i32 = 5;
/// Draw/update order of the human player (front-most).
pub const PLAYER_Z: i32 = 6;

/// Trait for entities with bounds that can be updated once per tick.
///
/// Any type that implements this trait:
/// - Has an axis-aligned bounding box
/// - Has a z-order (lower values are drawn and updated first)
/// - Can advance its own state by one tick
/// - Can flag itself for lazy removal
pub trait Locatable {
    /// Axis-aligned bounding box in viewport coordinates.
    fn bounds(&self) -> Rect<f32>;

    /// Draw and update order; lower values sit further back.
    fn z_index(&self) -> i32;

    /// Advances the entity by one tick.
    fn update(&mut self);

    /// Whether the engine should drop this entity at the start of the next tick.
    fn is_marked_for_deletion(&self) -> bool;
}
