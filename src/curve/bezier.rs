use cgmath::Vector2;

use crate::math::lerp_vec;

/// Splits control points into independent bezier segments.
/// A repeated point ends the current segment and starts the next one.
pub fn split_segments(points: &[Vector2<f64>]) -> Vec<&[Vector2<f64>]> {
    let mut segments = Vec::new();
    let mut start = 0;

    for i in 1..points.len() {
        if points[i] == points[i - 1] {
            if i - start >= 2 {
                segments.push(&points[start..i]);
            }

            start = i;
        }
    }

    if points.len() - start >= 2 {
        segments.push(&points[start..]);
    }

    segments
}

/// Evaluates a single bezier segment at `t` using De Casteljau's
/// algorithm
pub fn evaluate(segment: &[Vector2<f64>], t: f64, working: &mut Vec<Vector2<f64>>) -> Vector2<f64> {
    working.clear();
    working.extend_from_slice(segment);

    for level in 1..segment.len() {
        for i in 0..segment.len() - level {
            working[i] = lerp_vec(working[i], working[i + 1], t);
        }
    }

    working[0]
}

/// Every segment sampled at `resolution + 1` evenly spaced `t`
/// values and concatenated
pub fn approximate(points: &[Vector2<f64>], resolution: usize) -> Vec<Vector2<f64>> {
    let resolution = resolution.max(1);
    let mut output = Vec::new();
    let mut working = Vec::new();

    for segment in split_segments(points) {
        for step in 0..=resolution {
            let t = step as f64 / resolution as f64;
            output.push(evaluate(segment, t, &mut working));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vector2<f64> {
        Vector2::new(x, y)
    }

    #[test]
    fn test_split_on_repeated_point() {
        let points = [v(0.0, 0.0), v(10.0, 0.0), v(10.0, 0.0), v(20.0, 10.0), v(30.0, 0.0)];
        let segments = split_segments(&points);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], &[v(0.0, 0.0), v(10.0, 0.0)]);
        assert_eq!(segments[1], &[v(10.0, 0.0), v(20.0, 10.0), v(30.0, 0.0)]);
    }

    #[test]
    fn test_split_without_repeats() {
        let points = [v(0.0, 0.0), v(10.0, 0.0), v(20.0, 10.0)];
        assert_eq!(split_segments(&points).len(), 1);
    }

    #[test]
    fn test_quadratic_midpoint() {
        let mut working = Vec::new();
        let mid = evaluate(&[v(0.0, 0.0), v(50.0, 100.0), v(100.0, 0.0)], 0.5, &mut working);

        assert_eq!(mid, v(50.0, 50.0));
    }

    #[test]
    fn test_approximate_hits_endpoints() {
        let points = [v(0.0, 0.0), v(50.0, 100.0), v(100.0, 0.0)];
        let output = approximate(&points, 10);

        assert_eq!(output.len(), 11);
        assert_eq!(output[0], v(0.0, 0.0));
        assert_eq!(output[10], v(100.0, 0.0));
    }
}
