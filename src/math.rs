use std::f64::consts::{FRAC_PI_2, PI, TAU};

use cgmath::Vector2;

pub const OSU_COORDS_WIDTH: f64 = 512.0;
pub const OSU_COORDS_HEIGHT: f64 = 384.0;

/// Center of the playfield, spinners are always placed here
pub const PLAYFIELD_CENTER: Vector2<f64> = Vector2 {
    x: OSU_COORDS_WIDTH / 2.0,
    y: OSU_COORDS_HEIGHT / 2.0,
};

pub fn lerp(a: f64, b: f64, v: f64) -> f64 {
    a + v * (b - a)
}

pub fn lerp_vec(a: Vector2<f64>, b: Vector2<f64>, v: f64) -> Vector2<f64> {
    Vector2::new(lerp(a.x, b.x, v), lerp(a.y, b.y, v))
}

pub fn diff_rate(diff: f64, min: f64, mid: f64, max: f64) -> f64 {
	if diff > 5.0 {
		return mid + (max-mid)*(diff-5.0)/5.0
	}

	if diff < 5.0 {
		return mid - (mid-min)*(5.0-diff)/5.0
	}

	return mid
}

/// Converts a position from `[0, 1]` space into playfield coordinates
pub fn denormalize(pos: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(pos.x * OSU_COORDS_WIDTH, pos.y * OSU_COORDS_HEIGHT)
}

/// Converts a position in playfield coordinates into `[0, 1]` space
pub fn normalize(pos: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(pos.x / OSU_COORDS_WIDTH, pos.y / OSU_COORDS_HEIGHT)
}

/// Angle in radians of the direction from `p1` to `p2`
pub fn calc_direction(p1: Vector2<f64>, p2: Vector2<f64>) -> f64 {
    (p2.y - p1.y).atan2(p2.x - p1.x)
}

pub fn calc_opposite_direction(p1: Vector2<f64>, p2: Vector2<f64>) -> f64 {
    calc_direction(p1, p2) + PI
}

/// Wraps an angle difference into `(-PI, PI]`
pub fn wrap_angle(mut angle: f64) -> f64 {
    while angle > PI {
        angle -= TAU;
    }

    while angle <= -PI {
        angle += TAU;
    }

    angle
}

#[inline]
pub fn calc_progress(current: f64, start: f64, end: f64) -> f64 {
    (current - start) / (end - start)
}

/// `[0..1] -> [1..0]`, shared by every fade out animation
#[inline]
pub fn fade_out_easing(t: f64) -> f64 {
    if t <= 0.0 {
        return 1.0;
    }

    if t > 1.0 {
        return 0.0;
    }

    1.0 - (t * FRAC_PI_2).sin()
}

#[test]
pub fn test_progress() {
    assert_eq!(calc_progress(50.0, 0.0, 100.0), 0.50);
}

#[test]
pub fn test_direction() {
    let p1 = Vector2::new(0.0, 0.0);
    let p2 = Vector2::new(0.0, 6.0);

    assert_eq!(calc_direction(p1, p2), FRAC_PI_2);
    assert_eq!(calc_opposite_direction(p1, p2), FRAC_PI_2 + PI);
}

#[test]
pub fn test_fade_out_easing() {
    assert_eq!(fade_out_easing(0.0), 1.0);
    assert_eq!(fade_out_easing(-3.0), 1.0);
    assert_eq!(fade_out_easing(0.5), 1.0 - (PI / 4.0).sin());
    assert!(fade_out_easing(1.0).abs() < 1e-12);
    assert_eq!(fade_out_easing(2.0), 0.0);
}

#[test]
pub fn test_wrap_angle() {
    assert!((wrap_angle(3.0 * PI / 2.0) + FRAC_PI_2).abs() < 1e-12);
    assert!((wrap_angle(-3.0 * PI / 2.0) - FRAC_PI_2).abs() < 1e-12);
    assert_eq!(wrap_angle(0.25), 0.25);
}

#[test]
pub fn test_diff_rate() {
    assert_eq!(diff_rate(5.0, 3.0, 5.0, 7.5), 5.0);
    assert_eq!(diff_rate(10.0, 3.0, 5.0, 7.5), 7.5);
    assert_eq!(diff_rate(0.0, 3.0, 5.0, 7.5), 3.0);
}

#[test]
pub fn test_normalize_roundtrip_center() {
    let center = normalize(PLAYFIELD_CENTER);
    assert_eq!(center, Vector2::new(0.5, 0.5));
    assert_eq!(denormalize(center), PLAYFIELD_CENTER);
}
