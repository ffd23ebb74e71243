use std::f64::consts::TAU;

use super::{Point2, TOLERANCE};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns `true` if the polygon winds counter-clockwise.
#[must_use]
pub fn is_ccw(points: &[Point2]) -> bool {
    signed_area_2d(points) > 0.0
}

/// Samples `segments` points on a circle around the origin, counter-clockwise,
/// starting at angle zero. The closing point is not repeated.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn circle_points(radius: f64, segments: usize) -> Vec<Point2> {
    (0..segments)
        .map(|i| {
            let theta = TAU * i as f64 / segments as f64;
            Point2::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

/// Returns `true` if any two consecutive points of the closed loop coincide.
#[must_use]
pub fn has_repeated_vertex(points: &[Point2]) -> bool {
    let n = points.len();
    (0..n).any(|i| (points[(i + 1) % n] - points[i]).norm() < TOLERANCE)
}

/// Returns `true` if `point` lies strictly inside the closed polygon
/// (crossing-number test; points on the boundary may go either way).
#[must_use]
pub fn point_in_polygon(point: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
