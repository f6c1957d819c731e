//! SVG path data: parsing into absolute commands and sampling into a polyline.
//!
//! Every segment, straight or curved, is subdivided so that no chord is
//! longer than the requested sample length.
//! All subpaths of one element are sampled into a single point list.

use glam::Vec2;
use smallvec::SmallVec;

use crate::constants::{CURVE_ESTIMATE_STEPS, MAX_SEGMENT_PIECES};
use crate::ShapeError;

/// Path command with every coordinate made absolute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    CubicTo(Vec2, Vec2, Vec2),
    QuadTo(Vec2, Vec2),
    ArcTo {
        radii: Vec2,
        x_rotation_deg: f32,
        large_arc: bool,
        sweep: bool,
        to: Vec2,
    },
    Close,
}

struct Lexer<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            bytes: s.as_bytes(),
            pos: 0,
        }
    }

    fn skip_separators(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn peek_command(&mut self) -> Option<u8> {
        self.skip_separators();
        self.bytes
            .get(self.pos)
            .copied()
            .filter(|b| b.is_ascii_alphabetic() && *b != b'e' && *b != b'E')
    }

    fn at_number(&mut self) -> bool {
        self.skip_separators();
        matches!(self.bytes.get(self.pos), Some(b) if b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.'))
    }

    fn number(&mut self) -> Result<f32, ShapeError> {
        self.skip_separators();
        let start = self.pos;
        let mut seen_dot = false;
        let mut seen_exp = false;
        if matches!(self.bytes.get(self.pos), Some(b'-' | b'+')) {
            self.pos += 1;
        }
        while let Some(&b) = self.bytes.get(self.pos) {
            match b {
                b'0'..=b'9' => self.pos += 1,
                b'.' if !seen_dot && !seen_exp => {
                    seen_dot = true;
                    self.pos += 1;
                }
                b'e' | b'E' if !seen_exp => {
                    seen_exp = true;
                    self.pos += 1;
                    if matches!(self.bytes.get(self.pos), Some(b'-' | b'+')) {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| self.error_here(start))
    }

    /// Arc flags may be written without separators (`a1 1 0 01 5 5`).
    fn flag(&mut self) -> Result<bool, ShapeError> {
        self.skip_separators();
        match self.bytes.get(self.pos) {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(self.error_here(self.pos)),
        }
    }

    fn point(&mut self) -> Result<Vec2, ShapeError> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Vec2::new(x, y))
    }

    fn error_here(&self, at: usize) -> ShapeError {
        let end = (at + 12).min(self.bytes.len());
        ShapeError::BadPathData(String::from_utf8_lossy(&self.bytes[at..end]).to_string())
    }
}

pub fn parse_path_data(d: &str) -> Result<Vec<PathCommand>, ShapeError> {
    let mut lx = Lexer::new(d);
    let mut out = Vec::new();
    let mut current = Vec2::ZERO;
    let mut subpath_start = Vec2::ZERO;
    // Reflection sources for S/T.
    let mut last_cubic_ctrl: Option<Vec2> = None;
    let mut last_quad_ctrl: Option<Vec2> = None;
    let mut command: Option<u8> = None;

    loop {
        if let Some(c) = lx.peek_command() {
            lx.pos += 1;
            command = Some(c);
        } else if lx.pos >= lx.bytes.len() {
            break;
        } else if !lx.at_number() {
            return Err(lx.error_here(lx.pos));
        }
        let Some(c) = command else {
            return Err(lx.error_here(lx.pos));
        };
        let relative = c.is_ascii_lowercase();
        let base = if relative { current } else { Vec2::ZERO };

        match c.to_ascii_uppercase() {
            b'M' => {
                let p = base + lx.point()?;
                out.push(PathCommand::MoveTo(p));
                current = p;
                subpath_start = p;
                // Extra pairs after a moveto are implicit linetos.
                command = Some(if relative { b'l' } else { b'L' });
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
                continue;
            }
            b'L' => {
                let p = base + lx.point()?;
                out.push(PathCommand::LineTo(p));
                current = p;
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            b'H' => {
                let x = lx.number()? + if relative { current.x } else { 0.0 };
                current = Vec2::new(x, current.y);
                out.push(PathCommand::LineTo(current));
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            b'V' => {
                let y = lx.number()? + if relative { current.y } else { 0.0 };
                current = Vec2::new(current.x, y);
                out.push(PathCommand::LineTo(current));
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            b'C' => {
                let c1 = base + lx.point()?;
                let c2 = base + lx.point()?;
                let to = base + lx.point()?;
                out.push(PathCommand::CubicTo(c1, c2, to));
                current = to;
                last_cubic_ctrl = Some(c2);
                last_quad_ctrl = None;
            }
            b'S' => {
                let c1 = last_cubic_ctrl.map_or(current, |c| current * 2.0 - c);
                let c2 = base + lx.point()?;
                let to = base + lx.point()?;
                out.push(PathCommand::CubicTo(c1, c2, to));
                current = to;
                last_cubic_ctrl = Some(c2);
                last_quad_ctrl = None;
            }
            b'Q' => {
                let ctrl = base + lx.point()?;
                let to = base + lx.point()?;
                out.push(PathCommand::QuadTo(ctrl, to));
                current = to;
                last_quad_ctrl = Some(ctrl);
                last_cubic_ctrl = None;
            }
            b'T' => {
                let ctrl = last_quad_ctrl.map_or(current, |c| current * 2.0 - c);
                let to = base + lx.point()?;
                out.push(PathCommand::QuadTo(ctrl, to));
                current = to;
                last_quad_ctrl = Some(ctrl);
                last_cubic_ctrl = None;
            }
            b'A' => {
                let rx = lx.number()?;
                let ry = lx.number()?;
                let x_rotation_deg = lx.number()?;
                let large_arc = lx.flag()?;
                let sweep = lx.flag()?;
                let to = base + lx.point()?;
                out.push(PathCommand::ArcTo {
                    radii: Vec2::new(rx, ry),
                    x_rotation_deg,
                    large_arc,
                    sweep,
                    to,
                });
                current = to;
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            b'Z' => {
                out.push(PathCommand::Close);
                current = subpath_start;
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
                // Z takes no arguments; a following number is an error unless a command follows.
                command = None;
                continue;
            }
            _ => return Err(lx.error_here(lx.pos.saturating_sub(1))),
        }
    }
    Ok(out)
}

/// Sample parsed commands into a polyline whose chords are at most
/// `sample_length` long. Consecutive duplicates are dropped.
///
/// A segment that is non-finite, or that would need more than
/// `MAX_SEGMENT_PIECES` chords, fails the whole path.
pub fn sample_path(commands: &[PathCommand], sample_length: f32) -> Result<Vec<Vec2>, ShapeError> {
    let step = if sample_length > 0.0 { sample_length } else { 1.0 };
    let mut out: Vec<Vec2> = Vec::new();
    let mut current = Vec2::ZERO;
    let mut subpath_start = Vec2::ZERO;

    for cmd in commands {
        match *cmd {
            PathCommand::MoveTo(p) => {
                push_point(&mut out, p);
                current = p;
                subpath_start = p;
            }
            PathCommand::LineTo(p) => {
                sample_line(&mut out, step, current, p, true)?;
                current = p;
            }
            PathCommand::CubicTo(c1, c2, to) => {
                let from = current;
                sample_curve(&mut out, step, |t| cubic_point(from, c1, c2, to, t))?;
                current = to;
            }
            PathCommand::QuadTo(c, to) => {
                let from = current;
                sample_curve(&mut out, step, |t| quad_point(from, c, to, t))?;
                current = to;
            }
            PathCommand::ArcTo {
                radii,
                x_rotation_deg,
                large_arc,
                sweep,
                to,
            } => {
                match ArcCenter::from_endpoints(current, to, radii, x_rotation_deg, large_arc, sweep) {
                    Some(arc) => sample_curve(&mut out, step, |t| arc.point(t))?,
                    // Zero radii degrade to a straight line.
                    None => sample_line(&mut out, step, current, to, true)?,
                }
                current = to;
            }
            PathCommand::Close => {
                // The closing edge's end is the subpath start, already in `out`.
                sample_line(&mut out, step, current, subpath_start, false)?;
                current = subpath_start;
            }
        }
    }

    // The polygon is implicitly closed; drop an explicit repeat of the start.
    if out.len() > 1 && out[0].distance_squared(out[out.len() - 1]) < 1e-8 {
        out.pop();
    }
    Ok(out)
}

fn push_point(out: &mut Vec<Vec2>, p: Vec2) {
    if !p.is_finite() {
        return;
    }
    match out.last() {
        Some(last) if last.distance_squared(p) < 1e-8 => {}
        _ => out.push(p),
    }
}

/// Number of chords needed to cover `length` in steps of `step`.
fn segment_pieces(length: f32, step: f32) -> Result<usize, ShapeError> {
    let pieces = (length / step).ceil();
    if !pieces.is_finite() || pieces > MAX_SEGMENT_PIECES as f32 {
        return Err(ShapeError::OversizedSegment(length));
    }
    Ok((pieces as usize).clamp(1, MAX_SEGMENT_PIECES))
}

fn sample_line(out: &mut Vec<Vec2>, step: f32, from: Vec2, to: Vec2, include_end: bool) -> Result<(), ShapeError> {
    let pieces = segment_pieces(from.distance(to), step)?;
    let last = if include_end { pieces } else { pieces - 1 };
    for i in 1..=last {
        push_point(out, from.lerp(to, i as f32 / pieces as f32));
    }
    Ok(())
}

fn sample_curve(out: &mut Vec<Vec2>, step: f32, f: impl Fn(f32) -> Vec2) -> Result<(), ShapeError> {
    let estimate: SmallVec<[Vec2; 17]> = (0..=CURVE_ESTIMATE_STEPS)
        .map(|i| f(i as f32 / CURVE_ESTIMATE_STEPS as f32))
        .collect();
    let length: f32 = estimate.windows(2).map(|w| w[0].distance(w[1])).sum();
    let pieces = segment_pieces(length, step)?;
    for i in 1..=pieces {
        push_point(out, f(i as f32 / pieces as f32));
    }
    Ok(())
}

#[inline]
fn cubic_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

#[inline]
fn quad_point(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

/// Center parameterization of an elliptical arc.
struct ArcCenter {
    center: Vec2,
    radii: Vec2,
    cos_phi: f32,
    sin_phi: f32,
    theta_start: f32,
    theta_delta: f32,
}

impl ArcCenter {
    fn from_endpoints(
        from: Vec2,
        to: Vec2,
        radii: Vec2,
        x_rotation_deg: f32,
        large_arc: bool,
        sweep: bool,
    ) -> Option<Self> {
        let mut rx = radii.x.abs();
        let mut ry = radii.y.abs();
        if rx < 1e-6 || ry < 1e-6 || from.distance_squared(to) < 1e-12 {
            return None;
        }
        let phi = x_rotation_deg.to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let half = (from - to) * 0.5;
        let x1p = cos_phi * half.x + sin_phi * half.y;
        let y1p = -sin_phi * half.x + cos_phi * half.y;

        // Scale up radii that cannot span the endpoints.
        let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
        if lambda > 1.0 {
            let s = lambda.sqrt();
            rx *= s;
            ry *= s;
        }

        let num = rx * rx * ry * ry - rx * rx * y1p * y1p - ry * ry * x1p * x1p;
        let den = rx * rx * y1p * y1p + ry * ry * x1p * x1p;
        let mut coef = if den > 0.0 { (num / den).max(0.0).sqrt() } else { 0.0 };
        if large_arc == sweep {
            coef = -coef;
        }
        let cxp = coef * rx * y1p / ry;
        let cyp = -coef * ry * x1p / rx;
        let mid = (from + to) * 0.5;
        let center = Vec2::new(
            cos_phi * cxp - sin_phi * cyp + mid.x,
            sin_phi * cxp + cos_phi * cyp + mid.y,
        );

        let u = Vec2::new((x1p - cxp) / rx, (y1p - cyp) / ry);
        let v = Vec2::new((-x1p - cxp) / rx, (-y1p - cyp) / ry);
        let theta_start = u.y.atan2(u.x);
        let mut theta_delta = v.y.atan2(v.x) - theta_start;
        let tau = std::f32::consts::TAU;
        if sweep && theta_delta < 0.0 {
            theta_delta += tau;
        } else if !sweep && theta_delta > 0.0 {
            theta_delta -= tau;
        }

        Some(Self {
            center,
            radii: Vec2::new(rx, ry),
            cos_phi,
            sin_phi,
            theta_start,
            theta_delta,
        })
    }

    fn point(&self, t: f32) -> Vec2 {
        let theta = self.theta_start + self.theta_delta * t;
        let (s, c) = theta.sin_cos();
        let x = self.radii.x * c;
        let y = self.radii.y * s;
        Vec2::new(
            self.cos_phi * x - self.sin_phi * y + self.center.x,
            self.sin_phi * x + self.cos_phi * y + self.center.y,
        )
    }
}
