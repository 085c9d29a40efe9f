//! Axis-aligned bounding boxes and the margin overlap test
//!
//! Boxes are derived from the same position/height values that drive
//! rendering, in playfield px with y growing downward. Nothing here touches
//! layout or the DOM.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Character, Obstacle};
use crate::config::Playfield;

/// Axis-aligned box, `min` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(left + width, top + height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// True only when the boxes overlap by more than `margin` on every side.
    ///
    /// Edge contact, or an overlap no deeper than the margin, is not a hit.
    pub fn overlaps_with_margin(&self, other: &Aabb, margin: f32) -> bool {
        self.right() > other.left() + margin
            && self.left() < other.right() - margin
            && self.bottom() > other.top() + margin
            && self.top() < other.bottom() - margin
    }
}

/// Character box: fixed column, top edge at `position`% of the height
pub fn character_box(character: &Character, playfield: &Playfield) -> Aabb {
    let top = character.position * playfield.height / 100.0;
    Aabb::new(
        playfield.character_left,
        top,
        playfield.character_size,
        playfield.character_size,
    )
}

/// Obstacle box: left edge at `position`% of the width, standing on the ground
pub fn obstacle_box(obstacle: &Obstacle, playfield: &Playfield) -> Aabb {
    let left = obstacle.position * playfield.width / 100.0;
    let top = playfield.ground_y() - obstacle.height;
    Aabb::new(left, top, playfield.obstacle_width, obstacle.height)
}

/// Id of the first obstacle (spawn order) the character hits, if any.
///
/// Point-in-time test against current positions; a fast obstacle can pass
/// through the character between two ticks.
pub fn first_collision(
    character: &Aabb,
    obstacles: &[Obstacle],
    playfield: &Playfield,
    margin: f32,
) -> Option<u64> {
    obstacles
        .iter()
        .find(|o| character.overlaps_with_margin(&obstacle_box(o, playfield), margin))
        .map(|o| o.id)
}
