//! Decorative background clouds.
//!
//! Clouds drift left at half the configured speed and never take part in
//! collision checks.

use geo::Rect;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometric_utils;
use super::locatable::{CLOUD_Z, Locatable};

/// A parallax cloud.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent, 0.6 of the width.
    pub height: f32,
    /// Base speed; the cloud moves `speed / 2` per tick.
    pub speed: f32,
    marked_for_deletion: bool,
}

impl Cloud {
    /// Creates a cloud at `(x, y)` with the given width.
    pub fn new(x: f32, y: f32, width: f32, speed: f32) -> Self {
        Self {
            x,
            y,
            width,
            height: 0.6 * width,
            speed,
            marked_for_deletion: false,
        }
    }

    /// Spawns a cloud at the right edge with a random height band and size.
    pub fn new_random<R: Rng + ?Sized>(rng: &mut R, screen_width: f32, speed: f32) -> Self {
        let y = rng.random::<f32>() * 400.0 + 50.0;
        let width = rng.random::<f32>() * 300.0 + 100.0;
        Self::new(screen_width, y, width, speed)
    }
}

impl Locatable for Cloud {
    fn bounds(&self) -> Rect<f32> {
        geometric_utils::rect(self.x, self.y, self.width, self.height)
    }

    fn z_index(&self) -> i32 {
        CLOUD_Z
    }

    fn update(&mut self) {
        self.x -= self.speed / 2.0;
        if self.x + self.width < 0.0 {
            self.marked_for_deletion = true;
        }
    }

    fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion
    }
}
