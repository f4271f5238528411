//! Noise amplitude estimation via sign-flip discrimination.
//!
//! True movement produces smoothing residuals with a stable sign; sensor
//! noise oscillates around the smoothed value, flipping the residual sign
//! at random. Residuals whose sign flipped feed the estimate; directional
//! residuals feed zero, letting it decay during sustained movement.

/// Slow EMA rate for a stable noise floor.
const NOISE_SMOOTHING_RATE: f32 = 0.005;

/// Initial noise floor after init or reset.
pub(crate) const INITIAL_NOISE_FLOOR: f32 = 0.01;

fn sign_of(residual: f32) -> f32 {
    if residual > 0.0 {
        1.0
    } else if residual < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Sign flip, or two consecutive exact zeros, classifies a residual as noise.
fn has_sign_flipped(current: f32, previous: f32) -> bool {
    let sign = sign_of(current);
    let last = sign_of(previous);
    sign != last || (sign == 0.0 && last == 0.0)
}

/// Slow-moving estimate of input noise amplitude, in normalized units.
#[derive(Debug, Clone, Copy)]
pub struct NoiseTracker {
    estimate: f32,
    last_residual: f32,
}

impl NoiseTracker {
    pub const fn new() -> Self {
        Self {
            estimate: INITIAL_NOISE_FLOOR,
            last_residual: 0.0,
        }
    }

    /// Feed the latest smoothing residual into the estimate.
    pub fn observe(&mut self, residual: f32) {
        let is_noise = has_sign_flipped(residual, self.last_residual);
        self.last_residual = residual;

        let sample = if is_noise { libm::fabsf(residual) } else { 0.0 };
        self.estimate += NOISE_SMOOTHING_RATE * (sample - self.estimate);
        self.estimate = self.estimate.clamp(0.0, 1.0);
    }

    pub fn estimate(&self) -> f32 {
        self.estimate
    }

    /// Drop back to the initial noise floor (used by reset).
    pub fn reset(&mut self) {
        self.estimate = INITIAL_NOISE_FLOOR;
        self.last_residual = 0.0;
    }
}

impl Default for NoiseTracker {
    fn default() -> Self {
        Self::new()
    }
}
