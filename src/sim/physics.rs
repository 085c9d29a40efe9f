//! Vertical motion under gravity

use super::state::Character;
use crate::config::GameConfig;

/// Advance the character by `frames` reference frames.
///
/// Position moves by the velocity from the start of the step, then gravity is
/// applied to the velocity. Position is clamped to [0, max_height].
pub fn integrate(character: &mut Character, frames: f32, config: &GameConfig) {
    let position = character.position + character.velocity * frames;
    character.position = position.clamp(0.0, config.max_height);
    character.velocity += config.gravity * frames * config.gravity_damping;
}

/// Jump impulse: overrides the current velocity
#[inline]
pub fn apply_jump(character: &mut Character, config: &GameConfig) {
    character.velocity = config.jump_impulse;
}

/// True when the character rests on the ground line
#[inline]
pub fn on_ground(character: &Character, config: &GameConfig) -> bool {
    character.position >= config.max_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gravity_pulls_down() {
        let config = GameConfig::default();
        let mut c = Character::new(50.0);

        integrate(&mut c, 1.0, &config);
        // Velocity was zero for the first step
        assert_eq!(c.position, 50.0);
        assert!((c.velocity - 0.2).abs() < 1e-6);

        integrate(&mut c, 1.0, &config);
        assert!((c.position - 50.2).abs() < 1e-5);
    }

    #[test]
    fn test_zero_delta_is_a_no_op() {
        let config = GameConfig::default();
        let mut c = Character {
            position: 30.0,
            velocity: -3.0,
        };
        integrate(&mut c, 0.0, &config);
        assert_eq!(c.position, 30.0);
        assert_eq!(c.velocity, -3.0);
    }

    #[test]
    fn test_clamps_at_ground_and_ceiling() {
        let config = GameConfig::default();

        let mut falling = Character {
            position: 79.0,
            velocity: 10.0,
        };
        integrate(&mut falling, 1.0, &config);
        assert_eq!(falling.position, config.max_height);
        assert!(on_ground(&falling, &config));

        let mut rising = Character {
            position: 2.0,
            velocity: -5.0,
        };
        integrate(&mut rising, 1.0, &config);
        assert_eq!(rising.position, 0.0);
    }

    #[test]
    fn test_larger_delta_scales_motion() {
        let config = GameConfig::default();
        let mut c = Character {
            position: 40.0,
            velocity: -2.0,
        };
        // 32ms = two reference frames
        integrate(&mut c, crate::frames_elapsed(32.0, config.reference_frame_ms), &config);
        assert!((c.position - 36.0).abs() < 1e-5);
        assert!((c.velocity - (-1.6)).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_position_stays_in_bounds(
            position in 0.0f32..=80.0,
            velocity in -50.0f32..50.0,
            delta_ms in 0.0f64..500.0,
        ) {
            let config = GameConfig::default();
            let mut c = Character { position, velocity };
            integrate(&mut c, crate::frames_elapsed(delta_ms, config.reference_frame_ms), &config);
            prop_assert!(c.position >= 0.0);
            prop_assert!(c.position <= config.max_height);
        }

        #[test]
        fn prop_jump_overrides_velocity(velocity in -100.0f32..100.0) {
            let config = GameConfig::default();
            let mut c = Character { position: 80.0, velocity };
            apply_jump(&mut c, &config);
            prop_assert_eq!(c.velocity, config.jump_impulse);
        }
    }
}
