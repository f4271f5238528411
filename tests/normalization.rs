use smooth_axis::{Config, SmoothAxis};

#[test]
fn first_sample_seeds_exactly() {
    // No smoothing lag on the seeding sample
    let cfg = Config::live_dt(1023_u16, 0.25).with_sticky_zone(0.0);
    let mut axis = SmoothAxis::new(cfg).unwrap();

    axis.update_live(700, 0.01);
    assert_eq!(axis.quantized(), 700);
}

#[test]
fn outputs_stay_in_range_for_any_input() {
    let cfg = Config::live_dt(1023_u16, 0.1);
    let mut axis = SmoothAxis::new(cfg).unwrap();

    // Deterministic scribble covering both rails
    let mut raw: u32 = 7;
    for step in 0..5000_u32 {
        raw = (raw.wrapping_mul(1103515245).wrapping_add(12345)) % 1024;
        axis.update_live(raw as u16, 0.001);

        let norm = axis.normalized();
        assert!(
            (0.0..=1.0).contains(&norm),
            "normalized {norm} out of range at step {step}"
        );
        assert!(axis.quantized() <= 1023);
    }
}

#[test]
fn endpoints_are_exactly_reachable() {
    let cfg = Config::live_dt(1023_u16, 0.1);
    let mut axis = SmoothAxis::new(cfg).unwrap();

    for _ in 0..2000 {
        axis.update_live(0, 0.001);
    }
    assert_eq!(axis.normalized(), 0.0);
    assert_eq!(axis.quantized(), 0);

    for _ in 0..2000 {
        axis.update_live(1023, 0.001);
    }
    assert_eq!(axis.normalized(), 1.0);
    assert_eq!(axis.quantized(), 1023);
}

#[test]
fn dead_zones_clip_sensor_edges() {
    // Bottom 5% and top 5% are unreliable on this imaginary slider
    let cfg = Config::live_dt(1000_u16, 0.1)
        .with_dead_zone(0.05, 0.95)
        .with_sticky_zone(0.0);
    let mut axis = SmoothAxis::new(cfg).unwrap();

    axis.update_live(30, 0.01);
    assert_eq!(axis.quantized(), 0);

    axis.reset(980);
    assert_eq!(axis.quantized(), 1000);

    // Midpoint of the live range still maps to midscale
    axis.reset(500);
    assert_eq!(axis.quantized(), 500);
}

#[test]
fn inverted_dead_zone_behaves_as_full_range() {
    let cfg = Config::live_dt(1000_u16, 0.1)
        .with_dead_zone(0.9, 0.1)
        .with_sticky_zone(0.0);
    let mut axis = SmoothAxis::new(cfg).unwrap();

    axis.update_live(500, 0.01);
    assert_eq!(axis.quantized(), 500);

    axis.reset(0);
    assert_eq!(axis.quantized(), 0);
    axis.reset(1000);
    assert_eq!(axis.quantized(), 1000);
}

#[test]
fn zero_max_raw_does_not_crash() {
    let cfg = Config::live_dt(0_u16, 0.1);
    let mut axis = SmoothAxis::new(cfg).unwrap();

    axis.update_live(0, 0.01);
    assert!(axis.normalized().is_finite());
}

#[test]
fn works_across_resolutions() {
    for (max_raw, mid) in [(255_u16, 128_u16), (4095, 2048), (65535, 32768)] {
        let cfg = Config::live_dt(max_raw, 0.1).with_sticky_zone(0.0);
        let mut axis = SmoothAxis::new(cfg).unwrap();

        axis.update_live(mid, 0.01);
        let q = axis.quantized();
        assert!(
            q.abs_diff(mid) <= 1,
            "max_raw={max_raw}: expected ~{mid}, got {q}"
        );
    }
}

#[test]
fn unseeded_axis_reports_zero() {
    let cfg = Config::live_dt(1023_u16, 0.25);
    let mut axis = SmoothAxis::new(cfg).unwrap();

    assert_eq!(axis.normalized(), 0.0);
    assert_eq!(axis.quantized(), 0);
    assert!(!axis.has_new_value());
}
