//! Settle-time tuned exponential moving average.
//!
//! The single user-facing knob is `settle_time_sec`: the time the filter
//! takes to cover ~95% of a step change. It is converted once into a decay
//! rate `k = ln(0.05) / settle_time`, and each update derives its blend
//! coefficient from the elapsed time: `alpha = 1 - exp(k * dt)`.

/// Remaining error fraction that counts as "settled" (reached 95%).
const CONVERGENCE_RESIDUAL: f32 = 0.05;

/// Compute decay rate `k` such that after `settle_time_sec` the error has
/// shrunk to 5% of the initial step.
///
/// Returns `0.0` (no decay, instant response) for zero or negative settle
/// times.
pub fn decay_rate(settle_time_sec: f32) -> f32 {
    if settle_time_sec <= 0.0 {
        return 0.0;
    }
    let residual = CONVERGENCE_RESIDUAL.clamp(1e-4, 0.9999);
    libm::logf(residual) / settle_time_sec
}

/// Convert decay rate and time step into an EMA blend coefficient.
///
/// `alpha = 1 - exp(k * dt)`, clamped for numerical stability. Falls back
/// to `1.0` (instant convergence) when `dt` is zero or the decay rate is
/// zero; both are legitimate degenerate configurations. A negative `dt` is
/// a caller bug and asserts in debug builds.
pub fn alpha_for_dt(decay_rate: f32, dt_sec: f32) -> f32 {
    if dt_sec > 0.0 && decay_rate != 0.0 {
        let ratio = (decay_rate * dt_sec).clamp(-20.0, 0.0);
        return (1.0 - libm::expf(ratio)).clamp(0.0, 1.0);
    }
    debug_assert!(
        dt_sec >= 0.0 || decay_rate == 0.0,
        "negative dt is invalid"
    );
    1.0
}

/// EMA filter state for one axis.
///
/// The first sample seeds the filter directly (no lag, no residual); every
/// later sample blends in with the supplied alpha.
#[derive(Debug, Clone, Copy)]
pub struct Ema {
    value: f32,
    seeded: bool,
}

impl Ema {
    pub const fn new() -> Self {
        Self {
            value: 0.0,
            seeded: false,
        }
    }

    /// Blend `target` into the filter and return the pre-update residual
    /// (`target - value`).
    ///
    /// Returns `None` on the seeding call: there is no previous value to
    /// measure a residual against, so no noise sample is generated.
    pub fn apply(&mut self, target: f32, alpha: f32) -> Option<f32> {
        if !self.seeded {
            self.value = target;
            self.seeded = true;
            return None;
        }

        let residual = target - self.value;
        self.value += alpha.clamp(0.0, 1.0) * residual;
        Some(residual)
    }

    /// Teleport to `value` and mark the filter seeded.
    pub fn seed(&mut self, value: f32) {
        self.value = value;
        self.seeded = true;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded
    }
}

impl Default for Ema {
    fn default() -> Self {
        Self::new()
    }
}
