use num_traits::AsPrimitive;

use crate::ema;
use crate::sticky::MAX_STICKY_MARGIN;
use crate::threshold;

// Default feel parameters, expressed against a 10-bit reference scale
const CANONICAL_MAX: f32 = 1023.0;
const DEFAULT_STICKY_ZONE: f32 = 3.0 / CANONICAL_MAX; // ~0.3% magnetic zone
const DEFAULT_MOVEMENT_THRESH: f32 = 3.0 / CANONICAL_MAX; // ~0.3% base band

#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Auto-dt mode was selected without a clock source.
    MissingClock,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::MissingClock => write!(f, "auto-dt mode requires a clock source"),
        }
    }
}

/// Delta-time sourcing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DtMode {
    /// Measure the average loop interval during warmup, then use it as a
    /// constant. No dt handling in user code; best for fixed update rates.
    AutoDt,

    /// Caller passes dt to every update. No warmup; best for variable
    /// update rates or when jitter-free accuracy matters.
    LiveDt,
}

/// Monotonic millisecond time source for [`DtMode::AutoDt`].
///
/// The returned counter must be non-decreasing modulo u32 wraparound; the
/// warmup calibrator computes deltas with wrapping subtraction and so
/// tolerates a single wraparound transparently.
pub trait Clock {
    fn now_ms(&mut self) -> u32;
}

/// Bare function pointers and closures work as clocks directly.
impl<F: FnMut() -> u32> Clock for F {
    fn now_ms(&mut self) -> u32 {
        self()
    }
}

/// Axis configuration. Immutable after construction; build with
/// [`Config::live_dt`] or [`Config::auto_dt`] and tune feel with the
/// `with_*` methods.
///
/// All normalized parameters are relative to `max_raw`, in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy)]
pub struct Config<TRaw, C = fn() -> u32> {
    /// ADC maximum (e.g. 1023 for 10-bit, 4095 for 12-bit).
    pub max_raw: TRaw,
    /// Dead zone at the low end; readings below are clipped to zero.
    pub full_off_norm: f32,
    /// Dead zone at the high end; readings above are clipped to max.
    pub full_on_norm: f32,
    /// Magnetic margin at both endpoints.
    pub sticky_zone_norm: f32,
    /// Base change-detection threshold; floor of the hysteresis band.
    pub movement_thresh_norm: f32,
    /// PRIMARY TUNING KNOB: time to reach ~95% of target after a step.
    ///
    /// Lower (0.05-0.15 s) is responsive with less noise filtering, medium
    /// (0.2-0.4 s) is a balanced feel, higher (0.5-1.0 s) is heavily
    /// smoothed, cinematic movement.
    pub settle_time_sec: f32,
    /// Delta-time sourcing strategy.
    pub mode: DtMode,
    /// Time source, required for [`DtMode::AutoDt`].
    pub clock: Option<C>,

    // Derived once at construction
    decay_rate: f32,
    threshold_scaler: f32,
}

impl<TRaw> Config<TRaw, fn() -> u32>
where
    TRaw: Copy + AsPrimitive<f32>,
{
    /// Build a live-dt configuration: dt is passed to every update.
    pub fn live_dt(max_raw: TRaw, settle_time_sec: f32) -> Self {
        Self::with_mode(max_raw, settle_time_sec, DtMode::LiveDt, None)
    }
}

impl<TRaw, C> Config<TRaw, C>
where
    TRaw: Copy + AsPrimitive<f32>,
    C: Clock,
{
    /// Build an auto-dt configuration: the loop interval is calibrated
    /// from `clock` during warmup.
    pub fn auto_dt(max_raw: TRaw, settle_time_sec: f32, clock: C) -> Self {
        Self::with_mode(max_raw, settle_time_sec, DtMode::AutoDt, Some(clock))
    }

    fn with_mode(max_raw: TRaw, settle_time_sec: f32, mode: DtMode, clock: Option<C>) -> Self {
        Self {
            max_raw,
            full_off_norm: 0.0,
            full_on_norm: 1.0,
            sticky_zone_norm: DEFAULT_STICKY_ZONE,
            movement_thresh_norm: DEFAULT_MOVEMENT_THRESH,
            settle_time_sec,
            mode,
            clock,
            decay_rate: ema::decay_rate(settle_time_sec),
            threshold_scaler: threshold::settle_time_scaler(settle_time_sec),
        }
    }

    /// Clip unreliable sensor edges: readings below `full_off` or above
    /// `full_on` (normalized) count as exact 0 / max.
    pub fn with_dead_zone(mut self, full_off_norm: f32, full_on_norm: f32) -> Self {
        self.full_off_norm = full_off_norm.clamp(0.0, 1.0);
        self.full_on_norm = full_on_norm.clamp(0.0, 1.0);
        self
    }

    /// Set the magnetic endpoint margin, clamped to `[0, 0.49]`.
    pub fn with_sticky_zone(mut self, sticky_zone_norm: f32) -> Self {
        self.sticky_zone_norm = sticky_zone_norm.clamp(0.0, MAX_STICKY_MARGIN);
        self
    }

    /// Set the base movement threshold (floor of the adaptive band).
    pub fn with_movement_threshold(mut self, movement_thresh_norm: f32) -> Self {
        self.movement_thresh_norm = movement_thresh_norm.clamp(0.0, 1.0);
        self
    }

    pub(crate) fn decay_rate(&self) -> f32 {
        self.decay_rate
    }

    pub(crate) fn threshold_scaler(&self) -> f32 {
        self.threshold_scaler
    }

    /// Resolution ceiling as f32, floored at 1 to avoid division by zero.
    pub(crate) fn max_raw_f(&self) -> f32 {
        let max = self.max_raw.as_();
        if max < 1.0 { 1.0 } else { max }
    }
}
