use std::f64::consts::TAU;

use cgmath::{InnerSpace, Vector2};

use super::CurveError;

/// Anything below is treated as three points on a straight line
const COLINEAR_THRESHOLD: f64 = 1e-5;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CircleArc {
    pub center: Vector2<f64>,
    pub radius: f64,
    pub t_initial: f64,
    /// Signed, `t_final < t_initial` for clockwise arcs
    pub t_final: f64,
}

fn circle_t_at(p: Vector2<f64>, c: Vector2<f64>) -> f64 {
    (p.y - c.y).atan2(p.x - c.x)
}

fn circle_point(center: Vector2<f64>, radius: f64, a: f64) -> Vector2<f64> {
    Vector2::new(a.cos() * radius, a.sin() * radius) + center
}

pub fn is_colinear(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> bool {
    let ab = b - a;
    let cb = b - c;

    if ab.magnitude2() == 0.0 || cb.magnitude2() == 0.0 {
        return true;
    }

    let nora = ab.normalize();
    let norb = cb.normalize();

    (norb.x * nora.y - norb.y * nora.x).abs() < COLINEAR_THRESHOLD
}

/// Circle through 3 points, going from `a` through `b` to `c`
///
/// <http://en.wikipedia.org/wiki/Circumscribed_circle#Cartesian_coordinates>
pub fn circle_through_points(
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
) -> Result<CircleArc, CurveError> {
    if is_colinear(a, b, c) {
        return Err(CurveError::Colinear);
    }

    let d = (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)) * 2.0;
    let a_mag_sq = a.magnitude2();
    let b_mag_sq = b.magnitude2();
    let c_mag_sq = c.magnitude2();

    let center = Vector2::new(
        (a_mag_sq * (b.y - c.y) + b_mag_sq * (c.y - a.y) + c_mag_sq * (a.y - b.y)) / d,
        (a_mag_sq * (c.x - b.x) + b_mag_sq * (a.x - c.x) + c_mag_sq * (b.x - a.x)) / d,
    );
    let radius = (a - center).magnitude();

    if !radius.is_finite() || !center.x.is_finite() || !center.y.is_finite() {
        return Err(CurveError::Colinear);
    }

    let t_initial = circle_t_at(a, center);
    let mut t_mid = circle_t_at(b, center);
    let mut t_final = circle_t_at(c, center);

    while t_mid < t_initial {
        t_mid += TAU;
    }

    while t_final < t_initial {
        t_final += TAU;
    }

    if t_mid > t_final {
        t_final -= TAU;
    }

    Ok(CircleArc {
        center,
        radius,
        t_initial,
        t_final,
    })
}

/// Samples the arc starting at the first control point. The sweep
/// covers `pixel_length` when it's given, otherwise ends at the
/// last control point.
pub fn approximate(
    points: &[Vector2<f64>],
    pixel_length: f64,
    point_separation: f64,
) -> Result<Vec<Vector2<f64>>, CurveError> {
    let [a, b, c] = points else {
        return Err(CurveError::PerfectCircleArity(points.len()));
    };

    let arc = circle_through_points(*a, *b, *c)?;

    let direction = (arc.t_final - arc.t_initial).signum();
    let t_end = if pixel_length.is_finite() && pixel_length > 0.0 {
        arc.t_initial + direction * pixel_length / arc.radius
    } else {
        arc.t_final
    };

    let arc_length = ((t_end - arc.t_initial) * arc.radius).abs();

    if arc_length <= f64::EPSILON {
        return Err(CurveError::ZeroLength);
    }

    let segments = ((arc_length / point_separation.max(f64::EPSILON)).ceil() as usize).max(1);

    Ok((0..=segments)
        .map(|i| {
            let progress = i as f64 / segments as f64;
            let t = t_end * progress + arc.t_initial * (1.0 - progress);
            circle_point(arc.center, arc.radius, t)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn v(x: f64, y: f64) -> Vector2<f64> {
        Vector2::new(x, y)
    }

    #[test]
    fn test_half_circle() {
        let arc = circle_through_points(v(0.0, 0.0), v(50.0, 50.0), v(100.0, 0.0)).unwrap();

        assert_relative_eq!(arc.center.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(arc.center.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(arc.radius, 50.0, epsilon = 1e-9);
        assert_relative_eq!((arc.t_final - arc.t_initial).abs(), std::f64::consts::PI, epsilon = 1e-9);
    }

    #[test]
    fn test_sweep_passes_through_middle_point() {
        let points = [v(0.0, 0.0), v(50.0, 50.0), v(100.0, 0.0)];
        let output = approximate(&points, 0.0, 1.0).unwrap();

        assert_relative_eq!(output[0].x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(output[output.len() - 1].x, 100.0, epsilon = 1e-9);
        assert!(output.iter().any(|p| p.y > 49.9));
    }

    #[test]
    fn test_sweep_is_sized_by_pixel_length() {
        let points = [v(0.0, 0.0), v(50.0, 50.0), v(100.0, 0.0)];
        let quarter = 50.0 * std::f64::consts::FRAC_PI_2;
        let output = approximate(&points, quarter, 1.0).unwrap();
        let end = output[output.len() - 1];

        assert_relative_eq!(end.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(end.y, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_colinear() {
        assert!(is_colinear(v(0.0, 0.0), v(50.0, 1e-7), v(100.0, 0.0)));
        assert!(is_colinear(v(0.0, 0.0), v(0.0, 0.0), v(100.0, 0.0)));
        assert!(!is_colinear(v(0.0, 0.0), v(50.0, 10.0), v(100.0, 0.0)));

        assert_eq!(
            circle_through_points(v(0.0, 0.0), v(50.0, 1e-7), v(100.0, 0.0)),
            Err(CurveError::Colinear)
        );
    }

    #[test]
    fn test_arity() {
        assert_eq!(
            approximate(&[v(0.0, 0.0), v(1.0, 1.0)], 10.0, 1.0),
            Err(CurveError::PerfectCircleArity(2))
        );
    }
}
