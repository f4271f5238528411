//! Sticky end zones: magnetic margins at 0 and 1.
//!
//! Values inside a margin snap to the exact endpoint, guaranteeing that 0
//! and `max_raw` are reachable despite mechanical slop; the interior is
//! re-stretched so the output still spans the full scale.

/// Margins of 0.5 or more would overlap at the midpoint.
pub const MAX_STICKY_MARGIN: f32 = 0.49;

/// Map a normalized position through symmetric sticky margins.
///
/// `<= margin` returns exactly `0.0`, `>= 1 - margin` returns exactly
/// `1.0`, and the interior `[margin, 1 - margin]` is remapped linearly to
/// `[0, 1]`.
pub fn apply_sticky_margins(position: f32, margin: f32) -> f32 {
    let margin = margin.clamp(0.0, MAX_STICKY_MARGIN);

    if position <= margin {
        return 0.0;
    }
    if position >= 1.0 - margin {
        return 1.0;
    }

    // margin <= 0.49, so the span is never degenerate
    ((position - margin) / (1.0 - 2.0 * margin)).clamp(0.0, 1.0)
}
