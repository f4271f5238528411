//! Noise-adaptive change-detection threshold.

/// Headroom above the measured noise floor.
const NOISE_MULTIPLIER: f32 = 3.5;

/// The effective threshold never exceeds this multiple of the base.
const THRESHOLD_CEILING_FACTOR: f32 = 10.0;

/// Reference settle time for threshold attenuation (seconds).
const REFERENCE_SETTLE_TIME: f32 = 0.1;

/// Precompute the settle-time attenuation applied to the dynamic term.
///
/// Longer settle times already suppress noise through the EMA itself, so
/// the noise-driven part of the threshold is scaled down by the inverse of
/// `settle_time / 0.1s` (floored at 1x).
pub(crate) fn settle_time_scaler(settle_time_sec: f32) -> f32 {
    let ratio = settle_time_sec / REFERENCE_SETTLE_TIME;
    if ratio < 1.0 { 1.0 } else { 1.0 / ratio }
}

/// Effective change-detection threshold, in normalized units.
///
/// Scales with the noise estimate and is clamped to
/// `[base_thresh, 10 * base_thresh]`, so the configured base is always a
/// guaranteed floor.
pub(crate) fn effective_threshold(noise_estimate: f32, base_thresh: f32, scaler: f32) -> f32 {
    let dynamic = NOISE_MULTIPLIER * noise_estimate * scaler;
    dynamic.clamp(base_thresh, THRESHOLD_CEILING_FACTOR * base_thresh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_threshold_is_a_floor() {
        let thresh = effective_threshold(0.0, 0.003, 1.0);
        assert_eq!(thresh, 0.003);
    }

    #[test]
    fn ceiling_is_ten_times_base() {
        let thresh = effective_threshold(1.0, 0.003, 1.0);
        assert!((thresh - 0.03).abs() < 1e-7);
    }

    #[test]
    fn threshold_scales_with_noise_between_bounds() {
        let base = 0.003;
        let low = effective_threshold(0.002, base, 1.0);
        let high = effective_threshold(0.006, base, 1.0);
        assert!(low > base && high > low && high < 10.0 * base);
    }

    #[test]
    fn long_settle_times_attenuate_dynamic_term() {
        let fast = settle_time_scaler(0.1);
        let slow = settle_time_scaler(1.0);
        assert_eq!(fast, 1.0);
        assert!((slow - 0.1).abs() < 1e-6);

        let base = 0.003;
        let noise = 0.005;
        assert!(
            effective_threshold(noise, base, slow) < effective_threshold(noise, base, fast)
        );
    }

    #[test]
    fn short_settle_times_do_not_amplify() {
        assert_eq!(settle_time_scaler(0.01), 1.0);
        assert_eq!(settle_time_scaler(0.0), 1.0);
    }
}
