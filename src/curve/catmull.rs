use cgmath::Vector2;

fn catmull_rom(
    v1: Vector2<f64>,
    v2: Vector2<f64>,
    v3: Vector2<f64>,
    v4: Vector2<f64>,
    t: f64,
) -> Vector2<f64> {
    let t2 = t * t;
    let t3 = t * t2;

    let axis = |p1: f64, p2: f64, p3: f64, p4: f64| {
        0.5 * (2.0 * p2
            + (-p1 + p3) * t
            + (2.0 * p1 - 5.0 * p2 + 4.0 * p3 - p4) * t2
            + (-p1 + 3.0 * p2 - 3.0 * p3 + p4) * t3)
    };

    Vector2::new(
        axis(v1.x, v2.x, v3.x, v4.x),
        axis(v1.y, v2.y, v3.y, v4.y),
    )
}

/// Catmull-Rom spline through every control point, `resolution`
/// samples between each pair of points
pub fn approximate(points: &[Vector2<f64>], resolution: usize) -> Vec<Vector2<f64>> {
    let resolution = resolution.max(1);
    let mut output = Vec::new();

    if points.len() < 2 {
        return points.to_vec();
    }

    for j in 0..points.len() - 1 {
        let v1 = if j >= 1 { points[j - 1] } else { points[j] };
        let v2 = points[j];
        let v3 = points[j + 1];
        let v4 = if j + 2 < points.len() { points[j + 2] } else { v3 + (v3 - v2) };

        for k in 0..resolution {
            output.push(catmull_rom(v1, v2, v3, v4, k as f64 / resolution as f64));
        }
    }

    output.push(points[points.len() - 1]);

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_through_control_points() {
        let points = [
            Vector2::new(0.0, 0.0),
            Vector2::new(50.0, 50.0),
            Vector2::new(100.0, 0.0),
        ];

        let output = approximate(&points, 8);

        assert_eq!(output.len(), 17);
        assert_eq!(output[0], points[0]);
        assert_eq!(output[8], points[1]);
        assert_eq!(output[16], points[2]);
    }

    #[test]
    fn test_straight_line_stays_straight() {
        let points = [Vector2::new(0.0, 10.0), Vector2::new(100.0, 10.0)];

        for p in approximate(&points, 10) {
            assert_eq!(p.y, 10.0);
        }
    }
}
