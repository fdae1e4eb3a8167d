//! Heterogeneous entity storage.
//!
//! The engine keeps birds, pipes and clouds in one z-ordered list. Each
//! variant implements [`Locatable`], and `Entity` forwards to it by tag.

use geo::Rect;

use super::bird::Bird;
use super::cloud::Cloud;
use super::locatable::Locatable;
use super::pipe::Pipe;

/// Any entity managed by the engine.
#[derive(Debug, Clone)]
pub enum Entity {
    /// A human- or network-controlled bird.
    Bird(Bird),
    /// One pipe of a pair.
    Pipe(Pipe),
    /// A decorative cloud.
    Cloud(Cloud),
}

impl Entity {
    /// The bird, if this entity is one.
    pub fn as_bird(&self) -> Option<&Bird> {
        match self {
            Entity::Bird(bird) => Some(bird),
            _ => None,
        }
    }

    /// Mutable access to the bird, if this entity is one.
    pub fn as_bird_mut(&mut self) -> Option<&mut Bird> {
        match self {
            Entity::Bird(bird) => Some(bird),
            _ => None,
        }
    }

    /// The pipe, if this entity is one.
    pub fn as_pipe(&self) -> Option<&Pipe> {
        match self {
            Entity::Pipe(pipe) => Some(pipe),
            _ => None,
        }
    }

    /// The cloud, if this entity is one.
    pub fn as_cloud(&self) -> Option<&Cloud> {
        match self {
            Entity::Cloud(cloud) => Some(cloud),
            _ => None,
        }
    }

    fn as_locatable(&self) -> &dyn Locatable {
        match self {
            Entity::Bird(bird) => bird,
            Entity::Pipe(pipe) => pipe,
            Entity::Cloud(cloud) => cloud,
        }
    }

    fn as_locatable_mut(&mut self) -> &mut dyn Locatable {
        match self {
            Entity::Bird(bird) => bird,
            Entity::Pipe(pipe) => pipe,
            Entity::Cloud(cloud) => cloud,
        }
    }
}

impl Locatable for Entity {
    fn bounds(&self) -> Rect<f32> {
        self.as_locatable().bounds()
    }

    fn z_index(&self) -> i32 {
        self.as_locatable().z_index()
    }

    fn update(&mut self) {
        self.as_locatable_mut().update();
    }

    fn is_marked_for_deletion(&self) -> bool {
        self.as_locatable().is_marked_for_deletion()
    }
}

impl From<Bird> for Entity {
    fn from(bird: Bird) -> Self {
        Entity::Bird(bird)
    }
}

impl From<Pipe> for Entity {
    fn from(pipe: Pipe) -> Self {
        Entity::Pipe(pipe)
    }
}

impl From<Cloud> for Entity {
    fn from(cloud: Cloud) -> Self {
        Entity::Cloud(cloud)
    }
}
