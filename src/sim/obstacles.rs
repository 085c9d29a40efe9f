//! Obstacle spawning, scrolling, and pruning

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Obstacle;
use crate::config::GameConfig;

/// Ordered obstacle sequence (spawn order) with its own seeded RNG
#[derive(Debug, Clone)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    next_id: u64,
    rng: Pcg32,
}

impl ObstacleField {
    pub fn new(seed: u64) -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Drop every obstacle. Ids keep counting up.
    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Spawn at the right edge with a random height in [min, max)
    pub fn spawn(&mut self, config: &GameConfig) -> u64 {
        let height = self
            .rng
            .random_range(config.min_obstacle_height..config.max_obstacle_height);
        self.place(config.spawn_position, height)
    }

    /// Append an obstacle at an explicit position
    pub fn place(&mut self, position: f32, height: f32) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            position,
            height,
        });
        id
    }

    /// Scroll every obstacle left by `distance` (% of width)
    pub fn advance(&mut self, distance: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.position -= distance;
        }
    }

    /// Remove obstacles at or beyond `threshold`, returns how many went
    pub fn prune(&mut self, threshold: f32) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.position > threshold);
        before - self.obstacles.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_at_right_edge_with_height_in_range() {
        let config = GameConfig::default();
        let mut field = ObstacleField::new(7);
        for _ in 0..200 {
            field.spawn(&config);
        }
        for o in field.as_slice() {
            assert_eq!(o.position, 100.0);
            assert!(o.height >= 40.0 && o.height < 120.0, "height {}", o.height);
        }
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let config = GameConfig::default();
        let mut field = ObstacleField::new(1);
        let a = field.spawn(&config);
        let b = field.spawn(&config);
        field.clear();
        let c = field.spawn(&config);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_same_seed_same_heights() {
        let config = GameConfig::default();
        let mut f1 = ObstacleField::new(42);
        let mut f2 = ObstacleField::new(42);
        for _ in 0..10 {
            f1.spawn(&config);
            f2.spawn(&config);
        }
        assert_eq!(f1.as_slice(), f2.as_slice());
    }

    #[test]
    fn test_prune_preserves_order() {
        let mut field = ObstacleField::new(0);
        field.place(-10.0, 50.0);
        let keep_a = field.place(30.0, 50.0);
        field.place(-25.0, 50.0);
        let keep_b = field.place(-9.5, 50.0);

        assert_eq!(field.prune(-10.0), 2);
        let ids: Vec<u64> = field.as_slice().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![keep_a, keep_b]);
    }

    #[test]
    fn test_spawned_obstacle_is_eventually_pruned() {
        let config = GameConfig::default();
        let mut field = ObstacleField::new(3);
        field.spawn(&config);

        let mut ticks = 0;
        while !field.is_empty() {
            field.advance(config.base_speed);
            field.prune(config.prune_position);
            ticks += 1;
            assert!(ticks < 1000, "obstacle never left the playfield");
        }
        // 110% of travel at 4% per tick
        assert_eq!(ticks, 28);
    }
}
