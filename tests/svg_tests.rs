// Host-side tests for SVG reading, path parsing and sampling.

use drift_core::builder::{extract_shape, extract_shapes};
use drift_core::path::{parse_path_data, sample_path, PathCommand};
use drift_core::svg::{parse_document, parse_length, parse_view_box};
use drift_core::{SceneConfig, SceneError, ShapeError};
use glam::Vec2;

const LOGO: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100" width="400px">
  <g>
    <path id="arrow" d="M10 10 L60 10 L60 40 Z" fill="#ff0000"/>
    <path id="M" d="m100,20 h30 v30 h-30 z" style="fill: #00ff00; stroke:#111; stroke-width: 2"/>
    <path d="" fill="#000"/>
    <path id="broken" d="M 0 0 L oops"/>
  </g>
</svg>"##;

#[test]
fn reads_view_box_and_paths() {
    let doc = parse_document(LOGO).expect("parse");
    assert_eq!(doc.view_box.width, 200.0);
    assert_eq!(doc.view_box.height, 100.0);
    // The empty path is dropped at read time; the broken one at extraction.
    assert_eq!(doc.paths.len(), 3);
    assert_eq!(doc.paths[0].id.as_deref(), Some("arrow"));
    assert_eq!(doc.paths[0].fill.as_deref(), Some("#ff0000"));
    assert_eq!(doc.paths[1].fill.as_deref(), Some("#00ff00"));
    assert_eq!(doc.paths[1].stroke.as_deref(), Some("#111"));
    assert_eq!(doc.paths[1].stroke_width, Some(2.0));
}

#[test]
fn inline_style_wins_over_attributes() {
    let svg = r#"<svg viewBox="0 0 10 10"><path d="M0 0 L5 0 L5 5 Z" fill="red" style="fill:blue"/></svg>"#;
    let doc = parse_document(svg).unwrap();
    assert_eq!(doc.paths[0].fill.as_deref(), Some("blue"));
}

#[test]
fn width_height_fallback_for_missing_view_box() {
    let svg = r#"<svg width="120px" height="80"><path d="M0 0 L5 0 L5 5 Z"/></svg>"#;
    let doc = parse_document(svg).unwrap();
    assert_eq!((doc.view_box.width, doc.view_box.height), (120.0, 80.0));
}

#[test]
fn asset_errors() {
    let no_box = r#"<svg><path d="M0 0 L5 0 L5 5 Z"/></svg>"#;
    assert!(matches!(parse_document(no_box), Err(SceneError::MissingViewBox)));

    let no_paths = r#"<svg viewBox="0 0 10 10"><rect width="5" height="5"/></svg>"#;
    assert!(matches!(parse_document(no_paths), Err(SceneError::NoPaths)));

    let bad_xml = r#"<svg viewBox="0 0 10 10"><path d="M0 0"></svg>"#;
    assert!(parse_document(bad_xml).is_err());
}

#[test]
fn broken_path_is_skipped_not_fatal() {
    let doc = parse_document(LOGO).unwrap();
    let shapes = extract_shapes(&doc, &SceneConfig::default());
    assert_eq!(shapes.len(), 2);
    assert!(matches!(
        extract_shape(&doc.paths[2], 10.0),
        Err(ShapeError::BadPathData(_))
    ));
}

#[test]
fn style_defaults() {
    let doc = parse_document(LOGO).unwrap();
    let arrow = extract_shape(&doc.paths[0], 10.0).unwrap();
    assert_eq!(arrow.style.fill, "#ff0000");
    assert_eq!(arrow.style.stroke, "#ff0000");
    assert_eq!(arrow.style.stroke_width, 0.5);

    let svg = r#"<svg viewBox="0 0 10 10"><path d="M0 0 L5 0 L5 5 Z"/></svg>"#;
    let doc = parse_document(svg).unwrap();
    let plain = extract_shape(&doc.paths[0], 10.0).unwrap();
    assert_eq!(plain.style.fill, "#2d4059");
}

#[test]
fn view_box_and_length_helpers() {
    let v = parse_view_box("0,0, 120 80").unwrap();
    assert_eq!((v.x, v.width, v.height), (0.0, 120.0, 80.0));
    assert!(parse_view_box("0 0 120").is_none());
    assert_eq!(parse_length("12.5px"), Some(12.5));
    assert_eq!(parse_length("12em"), Some(12.0));
    assert_eq!(parse_length("-3"), Some(-3.0));
    assert_eq!(parse_length("px"), None);
}

#[test]
fn relative_commands_become_absolute() {
    let cmds = parse_path_data("m10 10 l5 0 h5 v5 z").unwrap();
    assert_eq!(
        cmds,
        vec![
            PathCommand::MoveTo(Vec2::new(10.0, 10.0)),
            PathCommand::LineTo(Vec2::new(15.0, 10.0)),
            PathCommand::LineTo(Vec2::new(20.0, 10.0)),
            PathCommand::LineTo(Vec2::new(20.0, 15.0)),
            PathCommand::Close,
        ]
    );
}

#[test]
fn implicit_lineto_after_moveto_and_compact_numbers() {
    let cmds = parse_path_data("M0,0 10,0 10-10.5").unwrap();
    assert_eq!(cmds.len(), 3);
    assert_eq!(cmds[1], PathCommand::LineTo(Vec2::new(10.0, 0.0)));
    assert_eq!(cmds[2], PathCommand::LineTo(Vec2::new(10.0, -10.5)));
    // A dangling coordinate is an error.
    assert!(parse_path_data("M0,0 10,0 10-10.5.5").is_err());
}

#[test]
fn smooth_cubic_reflects_control_point() {
    let cmds = parse_path_data("M0 0 C0 10 10 10 10 0 S20 -10 20 0").unwrap();
    match cmds[2] {
        PathCommand::CubicTo(c1, _, to) => {
            assert_eq!(c1, Vec2::new(10.0, -10.0));
            assert_eq!(to, Vec2::new(20.0, 0.0));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn compact_arc_flags() {
    let cmds = parse_path_data("M0 0 a5 5 0 01 10 0").unwrap();
    match cmds[1] {
        PathCommand::ArcTo {
            radii,
            large_arc,
            sweep,
            to,
            ..
        } => {
            assert_eq!(radii, Vec2::new(5.0, 5.0));
            assert!(!large_arc);
            assert!(sweep);
            assert_eq!(to, Vec2::new(10.0, 0.0));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn arc_samples_lie_on_circle() {
    let cmds = parse_path_data("M0 0 A10 10 0 0 1 20 0").unwrap();
    let pts = sample_path(&cmds, 2.0).unwrap();
    assert!(pts.len() > 10);
    let center = Vec2::new(10.0, 0.0);
    for p in &pts {
        assert!((p.distance(center) - 10.0).abs() < 1e-3, "{:?}", p);
    }
    // Chords stay within the sample length.
    for w in pts.windows(2) {
        assert!(w[0].distance(w[1]) <= 2.0 + 1e-3);
    }
}

#[test]
fn zero_radius_arc_is_a_line() {
    let cmds = parse_path_data("M0 0 A0 0 0 0 1 20 0 L20 20").unwrap();
    let pts = sample_path(&cmds, 100.0).unwrap();
    assert_eq!(pts, vec![Vec2::ZERO, Vec2::new(20.0, 0.0), Vec2::new(20.0, 20.0)]);

    let fine = sample_path(&cmds, 5.0).unwrap();
    assert!(fine.contains(&Vec2::new(10.0, 0.0)));
}

#[test]
fn straight_segments_are_subdivided() {
    let cmds = parse_path_data("M0 0 L100 0 L100 100 Z").unwrap();
    let pts = sample_path(&cmds, 10.0).unwrap();
    // Start, 10 per leg, then 15 chords on the closing diagonal whose end is the start.
    assert_eq!(pts.len(), 1 + 10 + 10 + 14);
    assert_eq!(pts[0], Vec2::ZERO);
    assert!(pts.contains(&Vec2::new(100.0, 0.0)));
    assert!(pts.contains(&Vec2::new(100.0, 100.0)));
    let mut ring = pts.clone();
    ring.push(pts[0]);
    for w in ring.windows(2) {
        assert!(w[0].distance(w[1]) <= 10.0 + 1e-3, "{:?}", w);
    }
}

#[test]
fn horizontal_and_vertical_lines_are_subdivided() {
    let cmds = parse_path_data("M0 0 H30 V30").unwrap();
    let pts = sample_path(&cmds, 10.0).unwrap();
    assert_eq!(pts.len(), 7);
    for target in [Vec2::new(20.0, 0.0), Vec2::new(30.0, 10.0)] {
        assert!(pts.iter().any(|p| p.distance(target) < 1e-4), "{:?}", target);
    }
}

#[test]
fn huge_curve_is_rejected_instead_of_sampled() {
    let cmds = parse_path_data("M0 0 C 1e12 0 0 1e12 10 10 Z").unwrap();
    assert!(matches!(sample_path(&cmds, 10.0), Err(ShapeError::OversizedSegment(_))));

    let cmds = parse_path_data("M0 0 L 1e30 0").unwrap();
    assert!(matches!(sample_path(&cmds, 10.0), Err(ShapeError::OversizedSegment(_))));
}

#[test]
fn oversized_path_is_skipped_by_the_builder() {
    let svg = r#"<svg viewBox="0 0 100 100">
        <path id="ok" d="M0 0 L10 0 L10 10 Z"/>
        <path id="huge" d="M0 0 C 1e12 0 0 1e12 10 10 Z"/>
    </svg>"#;
    let doc = parse_document(svg).unwrap();
    let shapes = extract_shapes(&doc, &SceneConfig::default());
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].tag.as_deref(), Some("ok"));
}

#[test]
fn curves_are_subdivided_by_sample_length() {
    let cmds = parse_path_data("M0 0 Q50 100 100 0").unwrap();
    let coarse = sample_path(&cmds, 50.0).unwrap();
    let fine = sample_path(&cmds, 5.0).unwrap();
    assert!(fine.len() > coarse.len());
    assert_eq!(*fine.last().unwrap(), Vec2::new(100.0, 0.0));
}
