use std::time::Duration;

use crate::config::WheelConfig;
use crate::constants::FULL_TURN;

/// Decelerating curve: fast start, settles into the target.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Wheel rotation, modulo a full turn, that puts the center of `index` under the pointer.
///
/// Segments are laid out clockwise from the top and the wheel turns
/// clockwise, so a segment centered at `c` sits under a pointer at `p`
/// after rotating by `p - c`.
pub fn landing_angle(index: usize, segment_count: usize, pointer_angle: f64) -> f64 {
    let arc = FULL_TURN / segment_count as f64;
    let center = (index as f64 + 0.5) * arc;
    (pointer_angle - center).rem_euclid(FULL_TURN)
}

/// Absolute rotation a spin from `current_angle` must end on.
///
/// Always ahead of `current_angle` by the configured whole turns plus the
/// forward distance to the landing position.
pub fn target_angle(current_angle: f64, index: usize, segment_count: usize, config: &WheelConfig) -> f64 {
    let landing = landing_angle(index, segment_count, config.pointer_angle);
    let forward = (landing - current_angle.rem_euclid(FULL_TURN)).rem_euclid(FULL_TURN);
    current_angle + config.full_rotations as f64 * FULL_TURN + forward
}

/// Progress of one spin from its start angle to its precomputed target.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationState {
    start_angle: f64,
    target_angle: f64,
    elapsed: Duration,
    total: Duration,
}

/// Result of feeding a frame delta to a spin.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    Turning(RotationState),
    /// The spin is over; `angle` is exactly the precomputed target.
    Landed { angle: f64 },
}

impl RotationState {
    pub fn begin(current_angle: f64, index: usize, segment_count: usize, config: &WheelConfig) -> Self {
        Self {
            start_angle: current_angle,
            target_angle: target_angle(current_angle, index, segment_count, config),
            elapsed: Duration::ZERO,
            total: config.spin_duration(),
        }
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn target_angle(&self) -> f64 {
        self.target_angle
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    /// Eased angle at the current elapsed time.
    pub fn angle(&self) -> f64 {
        let progress = if self.total.is_zero() {
            1.0
        } else {
            self.elapsed.as_secs_f64() / self.total.as_secs_f64()
        };
        self.start_angle + (self.target_angle - self.start_angle) * ease_out_cubic(progress)
    }

    /// Consumes the state, so a spin can only land once.
    pub fn advance(mut self, delta: Duration) -> Advance {
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed >= self.total {
            Advance::Landed { angle: self.target_angle }
        } else {
            Advance::Turning(self)
        }
    }
}
