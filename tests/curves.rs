use approx::assert_relative_eq;
use cgmath::Vector2;
use rosu_playback::curve::{generate, CurveConfig, CurveKind};
use test_case::case;

fn v(x: f64, y: f64) -> Vector2<f64> {
    Vector2::new(x, y)
}

fn config(resolution: usize) -> CurveConfig {
    CurveConfig {
        bezier_resolution: resolution,
        catmull_resolution: resolution,
        arc_point_separation: 100.0 / resolution as f64,
    }
}

#[case(2)]
#[case(10)]
#[case(50)]
#[case(500)]
fn test_linear_end_to_end(resolution: usize) {
    let path = generate(CurveKind::Linear, &[v(0.0, 0.0), v(100.0, 0.0)], 100.0, &config(resolution));

    assert_eq!(path.kind(), CurveKind::Linear);
    assert_relative_eq!(path.point_at(0.0).x, 0.0);
    assert_relative_eq!(path.point_at(0.0).y, 0.0);
    assert_relative_eq!(path.point_at(1.0).x, 100.0, epsilon = 1e-9);
    assert_relative_eq!(path.point_at(1.0).y, 0.0, epsilon = 1e-9);
}

#[test]
fn test_natural_length_keeps_control_points() {
    // Non positive length keeps the path as is, normalized input stays normalized
    let path = generate(CurveKind::Linear, &[v(0.0, 0.0), v(1.0, 0.0)], 0.0, &CurveConfig::default());

    assert_eq!(path.point_at(0.0), v(0.0, 0.0));
    assert_eq!(path.point_at(1.0), v(1.0, 0.0));
}

#[case(1e-6; "almost")]
#[case(0.0; "exactly")]
fn test_colinear_perfect_circle_falls_back(deviation: f64) {
    let points = [v(0.0, 0.0), v(50.0, deviation), v(100.0, 0.0)];
    let path = generate(CurveKind::PerfectCircle, &points, 100.0, &CurveConfig::default());

    assert_eq!(path.kind(), CurveKind::Linear);
    assert!(path.len() >= 2);
    assert_relative_eq!(path.length(), 100.0, epsilon = 1e-6);
    assert_relative_eq!(path.end().x, 100.0, epsilon = 1e-3);
}

#[test]
fn test_perfect_circle_with_wrong_arity_uses_bezier() {
    let points = [v(0.0, 0.0), v(50.0, 50.0), v(100.0, 0.0), v(150.0, 50.0)];
    let path = generate(CurveKind::PerfectCircle, &points, 150.0, &CurveConfig::default());

    assert_eq!(path.kind(), CurveKind::Bezier);
    assert_relative_eq!(path.length(), 150.0, epsilon = 1e-6);
}

#[test]
fn test_perfect_circle_stays_on_circle() {
    let points = [v(0.0, 0.0), v(50.0, 50.0), v(100.0, 0.0)];
    let half = 50.0 * std::f64::consts::PI;
    let path = generate(CurveKind::PerfectCircle, &points, half, &CurveConfig::default());

    assert_eq!(path.kind(), CurveKind::PerfectCircle);

    for i in 0..=10 {
        let p = path.point_at(i as f64 / 10.0);
        let distance = ((p.x - 50.0).powi(2) + p.y.powi(2)).sqrt();
        assert_relative_eq!(distance, 50.0, epsilon = 0.5);
    }

    let mid = path.point_at(0.5);
    assert_relative_eq!(mid.x, 50.0, epsilon = 0.5);
    assert_relative_eq!(mid.y, 50.0, epsilon = 0.5);
}

#[test]
fn test_bezier_segments_meet_at_repeated_point() {
    let points = [
        v(0.0, 0.0),
        v(50.0, 50.0),
        v(100.0, 0.0),
        v(100.0, 0.0),
        v(150.0, -50.0),
        v(200.0, 0.0),
    ];

    let path = generate(CurveKind::Bezier, &points, 0.0, &CurveConfig::default());

    assert_eq!(path.kind(), CurveKind::Bezier);
    assert!(path.points().iter().any(|p| *p == v(100.0, 0.0)));
    assert_eq!(path.end(), v(200.0, 0.0));
}

#[test]
fn test_catmull_falls_back_to_linear() {
    let path = generate(CurveKind::CatmullRom, &[v(10.0, 10.0)], 50.0, &CurveConfig::default());

    // A single point can't make a path at all
    assert!(path.len() >= 2);
    assert_eq!(path.point_at(1.0), v(10.0, 10.0));
}
