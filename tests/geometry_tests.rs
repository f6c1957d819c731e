// Host-side tests for polygon helpers and convex decomposition.

use drift_core::geometry::{centroid, convex_hull, decompose_convex, is_convex, signed_area};
use glam::Vec2;

fn v(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

fn l_shape() -> Vec<Vec2> {
    vec![
        v(0.0, 0.0),
        v(30.0, 0.0),
        v(30.0, 10.0),
        v(10.0, 10.0),
        v(10.0, 30.0),
        v(0.0, 30.0),
    ]
}

#[test]
fn centroid_of_square_and_triangle() {
    let square = vec![v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0), v(0.0, 10.0)];
    assert!((centroid(&square) - v(5.0, 5.0)).length() < 1e-5);

    let tri = vec![v(0.0, 0.0), v(9.0, 0.0), v(0.0, 9.0)];
    assert!((centroid(&tri) - v(3.0, 3.0)).length() < 1e-5);
}

#[test]
fn centroid_is_area_weighted_not_vertex_mean() {
    // Extra collinear vertices along one edge must not pull the centroid.
    let square = vec![
        v(0.0, 0.0),
        v(2.0, 0.0),
        v(4.0, 0.0),
        v(6.0, 0.0),
        v(10.0, 0.0),
        v(10.0, 10.0),
        v(0.0, 10.0),
    ];
    assert!((centroid(&square) - v(5.0, 5.0)).length() < 1e-4);
}

#[test]
fn centroid_of_degenerate_input_is_mean() {
    let line = vec![v(0.0, 0.0), v(10.0, 0.0), v(20.0, 0.0)];
    assert_eq!(centroid(&line), v(10.0, 0.0));
    assert_eq!(centroid(&[]), Vec2::ZERO);
}

#[test]
fn convexity() {
    assert!(is_convex(&[v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)]));
    assert!(!is_convex(&l_shape()));
    assert_eq!(convex_hull(&l_shape()).len(), 5);
}

#[test]
fn convex_input_stays_one_part() {
    let hexagon: Vec<Vec2> = (0..6)
        .map(|i| Vec2::from_angle(i as f32 * std::f32::consts::TAU / 6.0) * 10.0)
        .collect();
    let parts = decompose_convex(&hexagon);
    assert_eq!(parts.len(), 1);
    assert!((signed_area(&parts[0]).abs() - signed_area(&hexagon).abs()).abs() < 1e-3);
}

#[test]
fn concave_input_splits_into_convex_parts_covering_area() {
    let shape = l_shape();
    let parts = decompose_convex(&shape);
    assert!(parts.len() >= 2);
    let mut total = 0.0;
    for part in &parts {
        assert!(is_convex(part), "{:?}", part);
        total += signed_area(part).abs();
    }
    assert!((total - signed_area(&shape).abs()).abs() < 1e-3);
    // Triangles get merged: an L needs far fewer parts than its 4 triangles.
    assert!(parts.len() <= 3);
}

#[test]
fn wavy_outline_decomposes() {
    // A sampled, non-convex blob similar to lettering outlines.
    let outline: Vec<Vec2> = (0..48)
        .map(|i| {
            let a = i as f32 * std::f32::consts::TAU / 48.0;
            let r = 20.0 + 6.0 * (a * 5.0).sin();
            Vec2::from_angle(a) * r
        })
        .collect();
    let parts = decompose_convex(&outline);
    let total: f32 = parts.iter().map(|p| signed_area(p).abs()).sum();
    assert!((total - signed_area(&outline).abs()).abs() < 0.5);
    assert!(parts.iter().all(|p| is_convex(p)));
}

#[test]
fn degenerate_outline_has_no_parts() {
    assert!(decompose_convex(&[v(0.0, 0.0), v(5.0, 0.0)]).is_empty());
    assert!(decompose_convex(&[v(0.0, 0.0), v(5.0, 0.0), v(10.0, 0.0)]).is_empty());
}
