pub mod bezier;
pub mod catmull;
pub mod circle;

use cgmath::{InnerSpace, Vector2};
use thiserror::Error;

use crate::math::{calc_direction, calc_opposite_direction, lerp_vec};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CurveKind {
    Linear,
    CatmullRom,
    Bezier,
    PerfectCircle,
}

impl CurveKind {
    /// Next generator to try when this one can't take the control points.
    /// A degenerate perfect circle goes straight to a line between its
    /// endpoints instead.
    pub fn fallback(self) -> Option<CurveKind> {
        match self {
            CurveKind::PerfectCircle => Some(CurveKind::Bezier),
            CurveKind::Bezier => Some(CurveKind::Linear),
            CurveKind::CatmullRom => Some(CurveKind::Linear),
            CurveKind::Linear => None,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum CurveError {
    #[error("curve produced `{0}` samples, at least 2 required")]
    NotEnoughSamples(usize),
    #[error("curve has zero length")]
    ZeroLength,
    #[error("perfect circle needs exactly 3 control points, got `{0}`")]
    PerfectCircleArity(usize),
    #[error("perfect circle control points are colinear")]
    Colinear,
}

#[derive(Debug, Copy, Clone)]
pub struct CurveConfig {
    /// Samples per bezier segment
    pub bezier_resolution: usize,
    /// Samples between two catmull control points
    pub catmull_resolution: usize,
    /// Distance between two samples of a perfect circle arc
    pub arc_point_separation: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            bezier_resolution: 50,
            catmull_resolution: 50,
            arc_point_separation: 5.0,
        }
    }
}

/// Polyline with cumulative arc length table, used for sampling
/// positions along a slider at uniform speed
#[derive(Debug, Clone)]
pub struct CurvePath {
    kind: CurveKind,
    points: Vec<Vector2<f64>>,
    /// `lengths[i]` is a distance from the start to `points[i]`
    lengths: Vec<f64>,
}

impl CurvePath {
    fn new(kind: CurveKind, points: Vec<Vector2<f64>>) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::NotEnoughSamples(points.len()));
        }

        let mut lengths = Vec::with_capacity(points.len());
        let mut total = 0.0;
        lengths.push(total);

        for w in points.windows(2) {
            total += (w[1] - w[0]).magnitude();
            lengths.push(total);
        }

        Ok(Self {
            kind,
            points,
            lengths,
        })
    }

    /// Last resort path for sliders without any usable geometry
    fn stationary(pos: Vector2<f64>) -> Self {
        Self {
            kind: CurveKind::Linear,
            points: vec![pos, pos],
            lengths: vec![0.0, 0.0],
        }
    }

    /// Generator which actually produced this path, may differ
    /// from the requested one after a fallback
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    pub fn points(&self) -> &[Vector2<f64>] {
        &self.points
    }

    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Total arc length
    pub fn length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    pub fn start(&self) -> Vector2<f64> {
        self.points[0]
    }

    pub fn end(&self) -> Vector2<f64> {
        self.points[self.points.len() - 1]
    }

    /// Position at fractional arc length `t`, clamped to `[0, 1]`
    pub fn point_at(&self, t: f64) -> Vector2<f64> {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let total = self.length();

        if total <= 0.0 {
            return self.start();
        }

        let target = t * total;
        let idx = self.lengths.partition_point(|&l| l < target);

        if idx == 0 {
            return self.start();
        }

        if idx >= self.points.len() {
            return self.end();
        }

        let (l0, l1) = (self.lengths[idx - 1], self.lengths[idx]);

        if l1 <= l0 {
            return self.points[idx];
        }

        lerp_vec(self.points[idx - 1], self.points[idx], (target - l0) / (l1 - l0))
    }

    /// Rotation of a reverse arrow placed at the end, pointing back
    /// along the path
    pub fn end_arrow_angle(&self) -> f64 {
        let n = self.points.len();
        calc_opposite_direction(self.points[n - 2], self.points[n - 1])
    }

    /// Rotation of a reverse arrow placed at the start, pointing
    /// into the path
    pub fn start_arrow_angle(&self) -> f64 {
        calc_direction(self.points[0], self.points[1])
    }
}

/// Builds the path for a slider, falling back to simpler generators
/// whenever one of them produces a degenerate result
pub fn generate(
    kind: CurveKind,
    control_points: &[Vector2<f64>],
    pixel_length: f64,
    config: &CurveConfig,
) -> CurvePath {
    let endpoints: Vec<_> = control_points
        .first()
        .into_iter()
        .chain(control_points.last())
        .copied()
        .collect();

    let mut points: &[Vector2<f64>] = control_points;
    let mut current = Some(kind);

    while let Some(kind) = current {
        match try_generate(kind, points, pixel_length, config) {
            Ok(path) => return path,
            Err(CurveError::PerfectCircleArity(n)) => {
                tracing::debug!("Perfect circle with {n} control points, using {:?}", kind.fallback());
                current = kind.fallback();
            }
            Err(e) if kind == CurveKind::PerfectCircle => {
                tracing::warn!("Perfect circle failed: {e}, using a line between its endpoints");
                points = endpoints.as_slice();
                current = Some(CurveKind::Linear);
            }
            Err(e) => {
                tracing::warn!("{kind:?} curve failed: {e}, falling back to {:?}", kind.fallback());
                current = kind.fallback();
            }
        }
    }

    let start = control_points.first().copied().unwrap_or(Vector2::new(0.0, 0.0));
    tracing::warn!("Every curve generator failed, slider at {start:?} will stay in place");

    CurvePath::stationary(start)
}

fn try_generate(
    kind: CurveKind,
    control_points: &[Vector2<f64>],
    pixel_length: f64,
    config: &CurveConfig,
) -> Result<CurvePath, CurveError> {
    let raw = match kind {
        CurveKind::Linear => control_points.to_vec(),
        CurveKind::CatmullRom => catmull::approximate(control_points, config.catmull_resolution),
        CurveKind::Bezier => bezier::approximate(control_points, config.bezier_resolution),
        CurveKind::PerfectCircle => {
            circle::approximate(control_points, pixel_length, config.arc_point_separation)?
        }
    };

    if raw.len() < 2 {
        return Err(CurveError::NotEnoughSamples(raw.len()));
    }

    let fitted = fit_to_length(&raw, pixel_length);
    let path = CurvePath::new(kind, fitted)?;

    if path.length() <= f64::EPSILON {
        return Err(CurveError::ZeroLength);
    }

    Ok(path)
}

/// Truncates or extends the polyline so its length is exactly
/// `pixel_length`. Non positive lengths keep the natural length.
/// Zero length segments are dropped.
pub fn fit_to_length(points: &[Vector2<f64>], pixel_length: f64) -> Vec<Vector2<f64>> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };

    let mut out = vec![first];
    let mut acc = 0.0;
    let fit = pixel_length.is_finite() && pixel_length > 0.0;

    for &next in &points[1..] {
        let prev = out[out.len() - 1];
        let segment = (next - prev).magnitude();

        if segment <= f64::EPSILON {
            continue;
        }

        if fit && acc + segment >= pixel_length {
            out.push(lerp_vec(prev, next, (pixel_length - acc) / segment));
            return out;
        }

        acc += segment;
        out.push(next);
    }

    if fit && out.len() >= 2 {
        let last = out[out.len() - 1];
        let direction = (last - out[out.len() - 2]).normalize();
        let remaining = pixel_length - acc;

        if remaining > f64::EPSILON {
            out.push(last + direction * remaining);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn v(x: f64, y: f64) -> Vector2<f64> {
        Vector2::new(x, y)
    }

    #[test]
    fn test_fit_truncates() {
        let fitted = fit_to_length(&[v(0.0, 0.0), v(100.0, 0.0), v(100.0, 100.0)], 150.0);

        assert_eq!(fitted, vec![v(0.0, 0.0), v(100.0, 0.0), v(100.0, 50.0)]);
    }

    #[test]
    fn test_fit_extends_along_last_segment() {
        let fitted = fit_to_length(&[v(0.0, 0.0), v(0.0, 40.0)], 100.0);

        assert_eq!(fitted, vec![v(0.0, 0.0), v(0.0, 40.0), v(0.0, 100.0)]);
    }

    #[test]
    fn test_fit_skips_duplicates() {
        let fitted = fit_to_length(&[v(0.0, 0.0), v(0.0, 0.0), v(10.0, 0.0)], 0.0);

        assert_eq!(fitted, vec![v(0.0, 0.0), v(10.0, 0.0)]);
    }

    #[test]
    fn test_lengths_are_monotonic() {
        let path = generate(
            CurveKind::Bezier,
            &[v(0.0, 0.0), v(50.0, 100.0), v(100.0, 0.0)],
            140.0,
            &CurveConfig::default(),
        );

        assert!(path.lengths().windows(2).all(|w| w[0] < w[1]));
        assert!((path.length() - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_at_clamps() {
        let path = generate(
            CurveKind::Linear,
            &[v(0.0, 0.0), v(100.0, 0.0)],
            100.0,
            &CurveConfig::default(),
        );

        assert_eq!(path.point_at(-1.0), v(0.0, 0.0));
        assert_eq!(path.point_at(2.0), v(100.0, 0.0));
        assert_eq!(path.point_at(0.25), v(25.0, 0.0));
    }

    #[test]
    fn test_point_at_uniform_speed() {
        // Two segments with different lengths
        let path = generate(
            CurveKind::Linear,
            &[v(0.0, 0.0), v(10.0, 0.0), v(10.0, 90.0)],
            100.0,
            &CurveConfig::default(),
        );

        let at = path.point_at(0.1);
        assert_relative_eq!(at.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(at.y, 0.0, epsilon = 1e-9);

        let at = path.point_at(0.5);
        assert_relative_eq!(at.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(at.y, 40.0, epsilon = 1e-9);
    }

    #[test]
    fn test_colinear_perfect_circle_uses_endpoints() {
        // Middle point outside the chord would make any curve double back
        let path = generate(
            CurveKind::PerfectCircle,
            &[v(0.0, 0.0), v(100.0, 0.0), v(50.0, 0.0)],
            50.0,
            &CurveConfig::default(),
        );

        assert_eq!(path.kind(), CurveKind::Linear);
        assert_relative_eq!(path.length(), 50.0, epsilon = 1e-9);
        assert_relative_eq!(path.point_at(0.5).x, 25.0, epsilon = 1e-9);
        assert_relative_eq!(path.end().x, 50.0, epsilon = 1e-9);

        let xs: Vec<_> = (0..=20).map(|i| path.point_at(i as f64 / 20.0).x).collect();
        assert!(xs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_every_generator_failing_keeps_slider_in_place() {
        let path = generate(
            CurveKind::PerfectCircle,
            &[v(5.0, 5.0), v(5.0, 5.0), v(5.0, 5.0)],
            100.0,
            &CurveConfig::default(),
        );

        assert!(path.len() >= 2);
        assert_eq!(path.point_at(0.5), v(5.0, 5.0));
    }

    #[test]
    fn test_arrow_angles() {
        let path = generate(
            CurveKind::Linear,
            &[v(0.0, 0.0), v(100.0, 0.0)],
            100.0,
            &CurveConfig::default(),
        );

        assert_eq!(path.start_arrow_angle(), 0.0);
        assert_eq!(path.end_arrow_angle(), std::f64::consts::PI);
    }
}
