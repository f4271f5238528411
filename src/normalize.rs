//! Raw sample normalization and output quantization.
//!
//! All processing happens in normalized f32 space; these are the two ends
//! of the pipeline that touch integer units.

/// Linear interpolation: map `x` from `[in_min, in_max]` to `[out_min, out_max]`.
fn map_range(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if in_max == in_min {
        return out_min;
    }
    let t = (x - in_min) / (in_max - in_min);
    out_min + t * (out_max - out_min)
}

/// Normalize a raw reading to `[0, 1]` with dead-zone compensation.
///
/// The reading is scaled by `max_raw`, clipped to `[full_off, full_on]` and
/// the clipped range re-stretched to the full `[0, 1]` scale. A degenerate
/// pair (`full_on <= full_off`) disables the dead zones.
pub(crate) fn input_norm(raw: f32, max_raw: f32, full_off: f32, full_on: f32) -> f32 {
    let max_raw = if max_raw < 1.0 { 1.0 } else { max_raw };
    let norm = (raw / max_raw).clamp(0.0, 1.0);

    let (off, on) = if full_on <= full_off {
        (0.0, 1.0)
    } else {
        (full_off, full_on)
    };

    map_range(norm.clamp(off, on), off, on, 0.0, 1.0)
}

/// Quantize a normalized value to an integer count in `[0, max_raw]`.
///
/// The bands within one LSB of either endpoint snap to exactly `0` /
/// `max_raw`, so floating-point rounding can never leave the output one
/// count shy of the rails.
pub(crate) fn quantize(norm: f32, max_raw: f32) -> f32 {
    let max_raw = if max_raw < 1.0 { 1.0 } else { max_raw };

    if norm <= 1.0 / max_raw {
        return 0.0;
    }
    if norm >= (max_raw - 1.0) / max_raw {
        return max_raw;
    }
    libm::roundf(norm * max_raw)
}
