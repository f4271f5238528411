//! Loop-interval self-calibration for auto-dt mode.
//!
//! Instead of asking the caller for delta time, the axis measures the
//! average loop interval over a fixed number of cycles, then freezes a
//! constant EMA alpha. After that no timer reads or transcendental math
//! happen on the update path.

use crate::config::Clock;
use crate::ema::alpha_for_dt;

/// Cycles measured before the alpha is frozen. Tunable; 256 keeps warmup
/// under half a second at typical loop rates.
pub(crate) const CALIBRATION_CYCLES: u16 = 256;

// Clamp measured dt to reject pathological glitches
const DT_MIN_MS: f32 = 0.1; // 10,000 Hz max
const DT_MAX_MS: f32 = 50.0; // 20 Hz min

/// Nominal interval assumed until calibration completes (60 Hz).
const FALLBACK_DT_SEC: f32 = 0.016;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WarmupPhase {
    Collecting,
    Ready,
}

/// Warmup state machine: collects interval samples, then freezes the alpha.
/// The `Collecting -> Ready` transition is one-way.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Warmup {
    phase: WarmupPhase,
    alpha: f32,
    dt_accum_sec: f32,
    cycles_done: u16,
    last_time_ms: Option<u32>,
}

impl Warmup {
    /// Start collecting, with a 60 Hz fallback alpha until calibrated.
    pub(crate) fn new(decay_rate: f32) -> Self {
        Self {
            phase: WarmupPhase::Collecting,
            alpha: alpha_for_dt(decay_rate, FALLBACK_DT_SEC),
            dt_accum_sec: 0.0,
            cycles_done: 0,
            last_time_ms: None,
        }
    }

    /// Run one calibration cycle if still collecting, and return the alpha
    /// to use for this update.
    pub(crate) fn tick<C: Clock>(&mut self, clock: &mut C, decay_rate: f32) -> f32 {
        if self.phase == WarmupPhase::Ready {
            return self.alpha;
        }

        let now_ms = clock.now_ms();
        let Some(last_ms) = self.last_time_ms else {
            // First call only records the timestamp
            self.last_time_ms = Some(now_ms);
            return self.alpha;
        };

        // Wrapping subtraction tolerates a single timer wraparound
        let dt_ms = (now_ms.wrapping_sub(last_ms) as f32).clamp(DT_MIN_MS, DT_MAX_MS);
        self.last_time_ms = Some(now_ms);

        self.dt_accum_sec += dt_ms / 1000.0;
        self.cycles_done += 1;

        if self.cycles_done >= CALIBRATION_CYCLES {
            let dt_avg = self.dt_accum_sec / f32::from(self.cycles_done);
            self.alpha = alpha_for_dt(decay_rate, dt_avg);
            self.phase = WarmupPhase::Ready;

            #[cfg(feature = "defmt")]
            defmt::debug!(
                "warmup complete: cycles={=u16} dt_avg={=f32}ms alpha={=f32}",
                self.cycles_done,
                dt_avg * 1000.0,
                self.alpha
            );
        }

        self.alpha
    }

    pub(crate) fn alpha(&self) -> f32 {
        self.alpha
    }

    pub(crate) fn is_calibrated(&self) -> bool {
        self.phase == WarmupPhase::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ema::decay_rate;

    fn ticking_clock(step_ms: u32) -> impl FnMut() -> u32 {
        let mut now = 0u32;
        move || {
            now = now.wrapping_add(step_ms);
            now
        }
    }

    #[test]
    fn first_tick_only_records_timestamp() {
        let mut warmup = Warmup::new(decay_rate(0.25));
        let mut clock = ticking_clock(10);
        warmup.tick(&mut clock, decay_rate(0.25));
        assert!(!warmup.is_calibrated());

        // One measurement is still one short of any progress check
        let mut warmup2 = Warmup::new(decay_rate(0.25));
        for _ in 0..u32::from(CALIBRATION_CYCLES) {
            warmup2.tick(&mut clock, decay_rate(0.25));
        }
        assert!(!warmup2.is_calibrated(), "first call must not count as a cycle");
    }

    #[test]
    fn calibrates_after_fixed_cycle_count() {
        let k = decay_rate(0.25);
        let mut warmup = Warmup::new(k);
        let mut clock = ticking_clock(10);

        for _ in 0..=u32::from(CALIBRATION_CYCLES) {
            warmup.tick(&mut clock, k);
        }
        assert!(warmup.is_calibrated());

        // Frozen alpha matches a 10 ms interval
        let expected = alpha_for_dt(k, 0.010);
        assert!((warmup.alpha() - expected).abs() < 1e-4);
    }

    #[test]
    fn frozen_alpha_ignores_later_clock_behavior() {
        let k = decay_rate(0.25);
        let mut warmup = Warmup::new(k);
        let mut clock = ticking_clock(10);
        for _ in 0..=u32::from(CALIBRATION_CYCLES) {
            warmup.tick(&mut clock, k);
        }
        let frozen = warmup.alpha();

        // Wildly different interval afterwards changes nothing
        let mut fast_clock = ticking_clock(1);
        for _ in 0..100 {
            assert_eq!(warmup.tick(&mut fast_clock, k), frozen);
        }
    }

    #[test]
    fn glitched_intervals_are_clamped() {
        let k = decay_rate(0.25);
        let mut warmup = Warmup::new(k);
        // 500 ms steps clamp down to 50 ms
        let mut clock = ticking_clock(500);
        for _ in 0..=u32::from(CALIBRATION_CYCLES) {
            warmup.tick(&mut clock, k);
        }
        let expected = alpha_for_dt(k, 0.050);
        assert!((warmup.alpha() - expected).abs() < 1e-4);
    }

    #[test]
    fn survives_timer_wraparound() {
        let k = decay_rate(0.25);
        let mut warmup = Warmup::new(k);
        let mut now = u32::MAX - 100;
        let mut clock = move || {
            now = now.wrapping_add(10);
            now
        };
        for _ in 0..=u32::from(CALIBRATION_CYCLES) {
            warmup.tick(&mut clock, k);
        }
        assert!(warmup.is_calibrated());
        let expected = alpha_for_dt(k, 0.010);
        assert!((warmup.alpha() - expected).abs() < 1e-4);
    }
}
