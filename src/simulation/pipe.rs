//! Pipe obstacles.
//!
//! Pipes spawn in top/bottom pairs at the right edge of the viewport and
//! scroll left at a constant speed. The pair shares one vertical gap, and
//! `top.length + gap + bottom.length` always equals the viewport height.

use geo::Rect;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometric_utils;
use super::locatable::{Locatable, PIPE_Z};
use super::params::ViewportClass;

/// Which screen edge a pipe hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipeSide {
    /// Attached to the ceiling.
    Top,
    /// Attached to the floor.
    Bottom,
}

/// Vertical layout of one pipe pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairGeometry {
    /// Opening between the two pipes.
    pub gap: f32,
    /// Extent of the top pipe, measured down from the ceiling.
    pub top_length: f32,
    /// Extent of the bottom pipe, measured up from the floor.
    pub bottom_length: f32,
}

impl PairGeometry {
    /// Draws a random pair layout for a viewport of the given class and height.
    ///
    /// Wide viewports get a 180–220 px gap with the top pipe reaching 100 px to
    /// half the height further down. Narrow viewports get a gap of at least
    /// 200 px (a quarter of the height on tall screens) and a top pipe of at
    /// least 50 px. The top length is clamped so the bottom pipe never has a
    /// negative length.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, class: ViewportClass, height: f32) -> Self {
        let (gap, top_length) = match class {
            ViewportClass::Wide => {
                let gap = (rng.random::<f32>() * 40.0 + 180.0).round();
                let top = (rng.random::<f32>() * height / 2.0 + 100.0).round();
                (gap, top)
            }
            ViewportClass::Narrow => {
                let gap = (height * 0.25).max(200.0);
                let top = (rng.random::<f32>() * (height - gap - 100.0))
                    .round()
                    .max(50.0);
                (gap, top)
            }
        };

        Self::fit(gap, top_length, height)
    }

    /// Clamps a gap and top length into a viewport of `height`.
    pub fn fit(gap: f32, top_length: f32, height: f32) -> Self {
        let height = height.max(0.0);
        let gap = gap.clamp(0.0, height);
        let top_length = top_length.min(height - gap).max(0.0);
        Self {
            gap,
            top_length,
            bottom_length: height - gap - top_length,
        }
    }
}

/// The opening of a pipe pair as seen by a bird's sensors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gap {
    /// Left edge of the pair.
    pub x_start: f32,
    /// Right (far) edge of the pair.
    pub x_end: f32,
    /// Vertical center of the opening.
    pub center_y: f32,
}

impl Gap {
    /// Horizontal midpoint of the pair.
    pub fn center_x(&self) -> f32 {
        (self.x_start + self.x_end) / 2.0
    }
}

/// A single pipe of a pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge; decreases by `speed` every tick.
    pub xpos: f32,
    /// Top edge.
    pub ypos: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent from the attached screen edge.
    pub length: f32,
    /// Opening shared with the partner pipe.
    pub gap: f32,
    /// Horizontal pixels travelled per tick.
    pub speed: f32,
    /// Which edge the pipe hangs from.
    pub side: PipeSide,
    marked_for_deletion: bool,
}

impl Pipe {
    /// Creates the top and bottom pipes of one pair at horizontal position `x`.
    pub fn pair(x: f32, geometry: PairGeometry, height: f32, width: f32, speed: f32) -> [Pipe; 2] {
        let top = Pipe {
            xpos: x,
            ypos: 0.0,
            width,
            length: geometry.top_length,
            gap: geometry.gap,
            speed,
            side: PipeSide::Top,
            marked_for_deletion: false,
        };
        let bottom = Pipe {
            xpos: x,
            ypos: height - geometry.bottom_length,
            width,
            length: geometry.bottom_length,
            gap: geometry.gap,
            speed,
            side: PipeSide::Bottom,
            marked_for_deletion: false,
        };
        [top, bottom]
    }

    /// The pair opening, reported by the top pipe only.
    pub fn gap(&self) -> Option<Gap> {
        match self.side {
            PipeSide::Top => Some(Gap {
                x_start: self.xpos,
                x_end: self.xpos + self.width,
                center_y: self.ypos + self.length + self.gap / 2.0,
            }),
            PipeSide::Bottom => None,
        }
    }

    /// Whether the pipe has scrolled entirely past the left edge.
    pub fn is_off_screen(&self) -> bool {
        self.xpos + self.width < 0.0
    }
}

impl Locatable for Pipe {
    fn bounds(&self) -> Rect<f32> {
        geometric_utils::rect(self.xpos, self.ypos, self.width, self.length)
    }

    fn z_index(&self) -> i32 {
        PIPE_Z
    }

    fn update(&mut self) {
        self.xpos -= self.speed;
        if self.is_off_screen() {
            self.marked_for_deletion = true;
        }
    }

    fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion
    }
}
