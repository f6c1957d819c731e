//! Polygon helpers: centroid normalization, scaling and convex decomposition.

use earcutr::earcut;
use fnv::FnvHashMap;
use glam::Vec2;

/// Signed area (positive for counter-clockwise in a y-up frame).
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        sum += a.perp_dot(b);
    }
    sum * 0.5
}

/// Area centroid of a polygon; the vertex mean when the area vanishes.
pub fn centroid(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::ZERO;
    }
    let area = signed_area(points);
    if area.abs() > 1e-6 {
        let n = points.len();
        let mut acc = Vec2::ZERO;
        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            acc += (a + b) * a.perp_dot(b);
        }
        let c = acc / (6.0 * area);
        if c.is_finite() {
            return c;
        }
    }
    points.iter().copied().sum::<Vec2>() / points.len() as f32
}

pub fn translate(points: &[Vec2], by: Vec2) -> Vec<Vec2> {
    points.iter().map(|p| *p + by).collect()
}

pub fn scale(points: &[Vec2], factor: f32) -> Vec<Vec2> {
    points.iter().map(|p| *p * factor).collect()
}

/// True when every turn has the same orientation (collinear turns allowed).
pub fn is_convex(points: &[Vec2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut sign = 0.0_f32;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let cross = (b - a).perp_dot(c - b);
        if cross.abs() <= 1e-6 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    sign != 0.0
}

/// Convex hull (monotone chain), counter-clockwise in a y-up frame.
pub fn convex_hull(points: &[Vec2]) -> Vec<Vec2> {
    let mut pts: Vec<Vec2> = points.iter().copied().filter(|p| p.is_finite()).collect();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| a.distance_squared(*b) < 1e-12);
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<Vec2> = Vec::new();
    for p in &pts {
        while lower.len() >= 2
            && (lower[lower.len() - 1] - lower[lower.len() - 2]).perp_dot(*p - lower[lower.len() - 1]) <= 0.0
        {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vec2> = Vec::new();
    for p in pts.iter().rev() {
        while upper.len() >= 2
            && (upper[upper.len() - 1] - upper[upper.len() - 2]).perp_dot(*p - upper[upper.len() - 1]) <= 0.0
        {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Split a simple (possibly non-convex) polygon into convex parts.
///
/// The polygon is triangulated, then neighbouring pieces are merged greedily
/// across shared diagonals while the union stays convex. Falls back to the
/// convex hull when triangulation yields nothing.
pub fn decompose_convex(points: &[Vec2]) -> Vec<Vec<Vec2>> {
    if points.len() < 3 {
        return Vec::new();
    }
    let flat: Vec<f64> = points
        .iter()
        .flat_map(|p| [p.x as f64, p.y as f64])
        .collect();
    let idx = earcut(&flat, &[], 2).unwrap_or_default();

    let mut polys: Vec<Vec<usize>> = idx
        .chunks_exact(3)
        .filter(|t| t.iter().all(|i| *i < points.len()))
        .filter(|t| {
            let tri = [points[t[0]], points[t[1]], points[t[2]]];
            signed_area(&tri).abs() > 1e-9
        })
        .map(|t| t.to_vec())
        .collect();

    if polys.is_empty() {
        let hull = convex_hull(points);
        return if hull.len() >= 3 { vec![hull] } else { Vec::new() };
    }

    while let Some((i, j, merged)) = find_merge(&polys, points) {
        polys[i] = merged;
        polys.swap_remove(j);
    }

    polys
        .into_iter()
        .map(|poly| poly.into_iter().map(|i| points[i]).collect())
        .collect()
}

fn find_merge(polys: &[Vec<usize>], points: &[Vec2]) -> Option<(usize, usize, Vec<usize>)> {
    let mut edges: FnvHashMap<(usize, usize), usize> = FnvHashMap::default();
    for (pi, poly) in polys.iter().enumerate() {
        for k in 0..poly.len() {
            edges.insert((poly[k], poly[(k + 1) % poly.len()]), pi);
        }
    }
    for (i, poly) in polys.iter().enumerate() {
        for k in 0..poly.len() {
            let a = poly[k];
            let b = poly[(k + 1) % poly.len()];
            let Some(&j) = edges.get(&(b, a)) else {
                continue;
            };
            if j == i {
                continue;
            }
            let merged = merge_across(poly, k, &polys[j], b, a);
            let merged_pts: Vec<Vec2> = merged.iter().map(|v| points[*v]).collect();
            if is_convex(&merged_pts) {
                return Some((i.min(j), i.max(j), merged));
            }
        }
    }
    None
}

/// Join `a_poly` (edge `a_poly[k] -> a_poly[k+1]`) with `b_poly`, which holds
/// the same edge reversed (`b_from -> b_to`), dropping the shared diagonal.
fn merge_across(a_poly: &[usize], k: usize, b_poly: &[usize], b_from: usize, b_to: usize) -> Vec<usize> {
    let na = a_poly.len();
    let nb = b_poly.len();
    let mut out = Vec::with_capacity(na + nb - 2);
    // Walk A starting at the diagonal's end point, all the way round to its start.
    for s in 0..na {
        out.push(a_poly[(k + 1 + s) % na]);
    }
    // Then B's vertices strictly between b_to and b_from.
    if let Some(m) = b_poly.iter().position(|v| *v == b_from) {
        debug_assert_eq!(b_poly[(m + 1) % nb], b_to);
        for s in 2..nb {
            out.push(b_poly[(m + s) % nb]);
        }
    }
    out
}
