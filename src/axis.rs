use num_traits::AsPrimitive;

use crate::config::{Clock, Config, ConfigError, DtMode};
use crate::contract::contract_check;
use crate::ema::{self, Ema};
use crate::noise::NoiseTracker;
use crate::normalize;
use crate::sticky::apply_sticky_margins;
use crate::threshold;
use crate::warmup::Warmup;

/// A single smoothed analog axis.
///
/// Owns its configuration and all runtime state by value; no allocation,
/// no locking. Drive it from one logical thread of control: call the
/// update entry point matching the configured [`DtMode`] once per loop,
/// then query [`has_new_value`](Self::has_new_value) and the output
/// accessors.
///
/// ```
/// use smooth_axis::{Config, SmoothAxis};
///
/// let mut axis = SmoothAxis::new(Config::live_dt(1023_u16, 0.25)).unwrap();
///
/// axis.update_live(512, 0.016);
/// if axis.has_new_value() {
///     let value = axis.quantized();
///     assert!(value <= 1023);
/// }
/// ```
pub struct SmoothAxis<TRaw, C = fn() -> u32> {
    cfg: Config<TRaw, C>,
    ema: Ema,
    noise: NoiseTracker,
    last_reported_norm: f32,
    warmup: Warmup,
}

impl<TRaw, C> SmoothAxis<TRaw, C>
where
    TRaw: Copy + AsPrimitive<f32>,
    f32: AsPrimitive<TRaw>,
    C: Clock,
{
    /// Initialize an axis from a configuration.
    ///
    /// Fails with [`ConfigError::MissingClock`] when the configuration
    /// selects auto-dt mode without supplying a clock source.
    pub fn new(cfg: Config<TRaw, C>) -> Result<Self, ConfigError> {
        if cfg.mode == DtMode::AutoDt && cfg.clock.is_none() {
            return Err(ConfigError::MissingClock);
        }

        let warmup = Warmup::new(cfg.decay_rate());
        Ok(Self {
            cfg,
            ema: Ema::new(),
            noise: NoiseTracker::new(),
            last_reported_norm: 0.0,
            warmup,
        })
    }

    pub fn config(&self) -> &Config<TRaw, C> {
        &self.cfg
    }

    /// Update with a new raw sample (auto-dt mode).
    ///
    /// The first 256 calls measure the loop interval; a 60 Hz fallback
    /// alpha applies until calibration completes. Calling this on a
    /// live-dt axis asserts in debug builds and is a no-op in release
    /// builds.
    pub fn update_auto(&mut self, raw: TRaw) {
        contract_check!(
            self.cfg.mode == DtMode::AutoDt,
            "wrong mode: use update_live() for a live-dt axis"
        );

        let decay_rate = self.cfg.decay_rate();
        let alpha = match self.cfg.clock.as_mut() {
            Some(clock) => self.warmup.tick(clock, decay_rate),
            // new() rejects this configuration; degrade with the fallback
            None => self.warmup.alpha(),
        };
        self.step(raw, alpha);
    }

    /// Update with a new raw sample and elapsed time (live-dt mode).
    ///
    /// The alpha is recomputed from `dt_sec` every call, so irregular loop
    /// timing does not distort the settle behavior. Calling this on an
    /// auto-dt axis asserts in debug builds and is a no-op in release
    /// builds. Zero `dt_sec` converges instantly; negative `dt_sec` is a
    /// caller bug (debug assert) treated the same way.
    pub fn update_live(&mut self, raw: TRaw, dt_sec: f32) {
        contract_check!(
            self.cfg.mode == DtMode::LiveDt,
            "wrong mode: use update_auto() for an auto-dt axis"
        );

        let alpha = ema::alpha_for_dt(self.cfg.decay_rate(), dt_sec);
        self.step(raw, alpha);
    }

    /// Reseed smoothing state at `raw`, e.g. after a layer switch or wake
    /// from sleep. Warmup calibration is kept.
    pub fn reset(&mut self, raw: TRaw) {
        let norm = self.input_norm(raw);
        self.ema.seed(norm);
        self.noise.reset();
        self.last_reported_norm = norm;
    }

    /// Current normalized position in `[0, 1]`, after sticky-zone
    /// processing. Returns `0.0` before the first sample.
    pub fn normalized(&self) -> f32 {
        if !self.ema.is_seeded() {
            return 0.0;
        }
        apply_sticky_margins(self.ema.value(), self.cfg.sticky_zone_norm)
    }

    /// Current position quantized to `[0, max_raw]`, with exact endpoints.
    pub fn quantized(&self) -> TRaw {
        normalize::quantize(self.normalized(), self.cfg.max_raw_f()).as_()
    }

    /// Whether the position has changed meaningfully since the last `true`
    /// return.
    ///
    /// Sub-LSB changes are ignored. Inside a sticky margin any supra-LSB
    /// movement counts, so a value can glide out of the endpoint snap;
    /// elsewhere the movement must exceed the noise-adaptive threshold.
    /// Safe to poll every frame.
    pub fn has_new_value(&mut self) -> bool {
        if !self.ema.is_seeded() {
            return false;
        }

        let current = self.normalized();
        let diff = libm::fabsf(current - self.last_reported_norm);

        // One LSB in normalized space; smaller deltas cannot change the
        // integer output
        if diff <= 1.0 / self.cfg.max_raw_f() {
            return false;
        }

        let margin = self.cfg.sticky_zone_norm;
        let in_sticky_zone = current < margin || current > 1.0 - margin;

        if in_sticky_zone || diff > self.effective_threshold() {
            self.last_reported_norm = current;

            #[cfg(feature = "defmt")]
            defmt::debug!(
                "new value: {=f32} (diff={=f32} sticky={=bool})",
                current,
                diff,
                in_sticky_zone
            );
            return true;
        }
        false
    }

    /// Real-time estimate of input noise amplitude, normalized.
    pub fn noise_estimate(&self) -> f32 {
        self.noise.estimate()
    }

    /// Active change-detection threshold, normalized. Scales between 1x
    /// and 10x of the configured base threshold with the noise level.
    pub fn effective_threshold(&self) -> f32 {
        threshold::effective_threshold(
            self.noise.estimate(),
            self.cfg.movement_thresh_norm,
            self.cfg.threshold_scaler(),
        )
    }

    /// [`effective_threshold`](Self::effective_threshold) in raw counts:
    /// how many counts the input must move to trigger an update.
    pub fn effective_threshold_raw(&self) -> TRaw {
        let max_raw = self.cfg.max_raw_f();
        let counts = libm::roundf(self.effective_threshold() * max_raw);
        counts.clamp(0.0, max_raw).as_()
    }

    /// Whether auto-dt warmup has frozen its calibrated alpha. Always
    /// `false` for live-dt axes.
    pub fn is_calibrated(&self) -> bool {
        self.warmup.is_calibrated()
    }

    fn input_norm(&self, raw: TRaw) -> f32 {
        normalize::input_norm(
            raw.as_(),
            self.cfg.max_raw_f(),
            self.cfg.full_off_norm,
            self.cfg.full_on_norm,
        )
    }

    fn step(&mut self, raw: TRaw, alpha: f32) {
        let norm = self.input_norm(raw);
        match self.ema.apply(norm, alpha) {
            // Seeding call: teleport, no residual to classify
            None => {
                #[cfg(feature = "defmt")]
                defmt::debug!("first sample: norm={=f32}", norm);
            }
            Some(residual) => self.noise.observe(residual),
        }
    }
}
