use super::{cross_2d, same_point, Point2, TOLERANCE};

/// Computes the signed area of a polygon (shoelace formula).
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

/// Point-in-polygon test by winding number.
///
/// Returns `true` if `point` is inside or on the boundary of `polygon`.
#[must_use]
pub fn point_in_polygon_2d(point: &Point2, polygon: &[Point2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let n = polygon.len();
    let mut winding = 0i32;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let turn = cross_2d(&(b - a), &(point - a));
        if turn.abs() <= TOLERANCE && (point - a).dot(&(point - b)) <= 0.0 {
            return true;
        }
        if a.y <= point.y {
            if b.y > point.y && turn > 0.0 {
                winding += 1;
            }
        } else if b.y <= point.y && turn < 0.0 {
            winding -= 1;
        }
    }
    winding != 0
}

/// Returns the index of the lowest point, breaking ties by smallest x.
#[must_use]
pub fn lowest_point(points: &[Point2]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, pt) in points.iter().enumerate() {
        match best {
            None => best = Some(i),
            Some(b) => {
                let q = &points[b];
                if pt.y < q.y - TOLERANCE || ((pt.y - q.y).abs() <= TOLERANCE && pt.x < q.x) {
                    best = Some(i);
                }
            }
        }
    }
    best
}

/// Orders a point cloud into a simple closed boundary by gift wrapping.
///
/// Starts at the lowest point and repeatedly accepts the point for which every
/// other point lies to the left of the new edge (the most clockwise candidate),
/// preferring the farthest point among collinear ones. Terminates on returning
/// to the start vertex. The result is counter-clockwise and contains only hull
/// vertices; every input point is a hull or interior point of it.
///
/// Collinear input yields its two extreme points. Fewer than two distinct
/// points are returned unchanged.
#[must_use]
pub fn gift_wrap_hull(points: &[Point2]) -> Vec<Point2> {
    let mut unique: Vec<Point2> = Vec::with_capacity(points.len());
    for pt in points {
        if !unique.iter().any(|u| same_point(u, pt, TOLERANCE)) {
            unique.push(*pt);
        }
    }
    let Some(start) = lowest_point(&unique) else {
        return unique;
    };
    if unique.len() < 2 {
        return unique;
    }

    let mut hull = vec![unique[start]];
    let mut current = start;
    // Each hull vertex is visited once; the bound guards against float cycles.
    for _ in 0..unique.len() {
        let mut candidate = if current == 0 { 1 } else { 0 };
        for q in 0..unique.len() {
            if q == current || q == candidate {
                continue;
            }
            let edge = unique[candidate] - unique[current];
            let probe = unique[q] - unique[current];
            let turn = cross_2d(&edge, &probe);
            let collinear = turn.abs() <= TOLERANCE * edge.norm().max(1.0);
            if (!collinear && turn < 0.0)
                || (collinear && probe.norm_squared() > edge.norm_squared())
            {
                candidate = q;
            }
        }
        if candidate == start {
            break;
        }
        hull.push(unique[candidate]);
        current = candidate;
    }
    hull
}
