use crate::error::{TessellationResult, UnsupportedParameter};
use crate::fill::nan_check;
use crate::geom::arrayvec::ArrayVec;
use crate::geom::{quarter_circle_kappa, CubicBezierSegment, Line};
use crate::math::{point, vector, Point, Transform, Vector};
use crate::path::{FillRule, LineCap, LineJoin, PathBuffer, PathEvent};
use crate::point_buffer::PointBuffer;
use crate::StrokeOptions;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Device-scaled widths this close to one unit take the hairline fast path.
const HAIRLINE_TOLERANCE: f32 = 1e-6;

/// Depth of the arrowhead anchor relative to its half width, 2 * cos(30°).
const ARROW_DEPTH: f32 = 1.732_050_807_568_877;

/// Expands paths into closed outline paths covering the pen stroke.
///
/// The stroker is built from stroke options and the device transform, and
/// can then outline any number of paths drawn with that pen. Each segment
/// of the (flattened) input contributes one quad; joins fill the outer
/// corner between consecutive segments and caps decorate the ends of open
/// sub-paths. The resulting path always overlaps itself around corners, so
/// it carries the `NonZero` fill rule under which the overlaps are
/// invisible.
///
/// Offsets are generated against the scale factors extracted from the
/// device transform, and the residual transform (rotation, shear,
/// translation) is applied to the finished outline. This keeps the pen
/// shape circular under rotation while still honoring non-uniform scale.
///
/// # Examples
///
/// ```
/// # extern crate trapeze_tessellation as tess;
/// # use tess::math::{point, Transform};
/// # use tess::{PathBuffer, StrokeOptions, Stroker};
/// # fn main() {
/// let mut path = PathBuffer::new();
/// path.add_line(point(0.0, 0.0), point(100.0, 0.0));
///
/// let options = StrokeOptions::default().with_line_width(4.0);
/// let mut stroker = Stroker::new(&options, &Transform::identity());
///
/// let mut outline = PathBuffer::new();
/// stroker.stroke(&path, &mut outline).unwrap();
///
/// assert!(!outline.is_empty());
/// # }
/// ```
pub struct Stroker {
    radius: f32,
    tolerance: f32,
    /// Width is one device unit or less: plain quads, no joins, no caps.
    hairline: bool,
    pre_scale: Option<Transform>,
    residual: Transform,
    pen: Transform,
    anchor_scale: Transform,
    joiner: Joiner,
    start_capper: Capper,
    end_capper: Capper,
    points: PointBuffer,
    slopes: Vec<Vector>,
    outline: PathBuffer,
    scratch: Vec<Point>,
    input: PathBuffer,
    log: bool,
}

enum Joiner {
    Miter { limit_squared: f64 },
    Round { circle: Vec<Point> },
    Bevel,
}

enum Capper {
    None,
    Square { radius: f32 },
    Triangle { radius: f32 },
    Round { circle: Vec<Point> },
    SquareAnchor { radius: f32 },
    DiamondAnchor { radius: f32 },
    ArrowAnchor { radius: f32 },
}

impl Stroker {
    /// Constructs a stroker for the given pen parameters and device
    /// transform.
    pub fn new(options: &StrokeOptions, transform: &Transform) -> Self {
        #[cfg(feature = "std")]
        let log = std::env::var("TRAPEZE_FORCE_LOGGING").is_ok();
        #[cfg(not(feature = "std"))]
        let log = false;

        let width = options.line_width;
        let (sx, sy) = extract_scale(transform);

        let hairline = width <= 0.0
            || ((width * sx - 1.0).abs() <= HAIRLINE_TOLERANCE
                && (width * sy - 1.0).abs() <= HAIRLINE_TOLERANCE);

        if hairline {
            return Stroker {
                radius: 0.5,
                tolerance: options.tolerance,
                hairline: true,
                pre_scale: None,
                residual: *transform,
                pen: Transform::identity(),
                anchor_scale: Transform::identity(),
                joiner: Joiner::Bevel,
                start_capper: Capper::None,
                end_capper: Capper::None,
                points: PointBuffer::new(),
                slopes: Vec::new(),
                outline: PathBuffer::new(),
                scratch: Vec::new(),
                input: PathBuffer::new(),
                log,
            };
        }

        let radius = width * 0.5;
        let scale = Transform::scale(sx, sy);
        let pen = match &options.pen_transform {
            Some(pen_transform) => pen_transform.then(&scale),
            None => scale,
        };

        let joiner = match options.line_join {
            LineJoin::Bevel => Joiner::Bevel,
            LineJoin::Miter | LineJoin::MiterClipped => Joiner::Miter {
                limit_squared: options.miter_limit as f64 * options.miter_limit as f64,
            },
            LineJoin::Round => Joiner::Round {
                circle: circle_points(radius, &pen, options.tolerance),
            },
        };

        Stroker {
            radius,
            tolerance: options.tolerance,
            hairline: false,
            pre_scale: Some(scale),
            residual: Transform::scale(1.0 / sx, 1.0 / sy).then(transform),
            pen,
            anchor_scale: scale,
            joiner,
            start_capper: make_capper(options.start_cap, radius, &pen, &scale, options.tolerance),
            end_capper: make_capper(options.end_cap, radius, &pen, &scale, options.tolerance),
            points: PointBuffer::new(),
            slopes: Vec::new(),
            outline: PathBuffer::new(),
            scratch: Vec::new(),
            input: PathBuffer::new(),
            log,
        }
    }

    /// Enable/disable some verbose logging when running the stroker, for
    /// debugging purposes.
    pub fn set_logging(&mut self, is_enabled: bool) {
        #[cfg(feature = "std")]
        let forced = std::env::var("TRAPEZE_FORCE_LOGGING").is_ok();

        #[cfg(not(feature = "std"))]
        let forced = false;

        self.log = is_enabled || forced;
    }

    /// Appends the outline of `path`'s stroke to `output` and marks
    /// `output` with the `NonZero` fill rule.
    ///
    /// On error, `output` is left untouched.
    pub fn stroke(&mut self, path: &PathBuffer, output: &mut PathBuffer) -> TessellationResult {
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(UnsupportedParameter::ToleranceIsNaN.into());
        }
        path.validate()?;

        // Work on a scaled, flattened copy of the input.
        self.input.reset();
        self.input.add_path(path, false);
        self.input.flatten(self.pre_scale.as_ref(), self.tolerance);

        let input = core::mem::take(&mut self.input);
        let mut outline = core::mem::take(&mut self.outline);
        outline.reset();

        let result = self.outline_path(&input, &mut outline);

        if result.is_ok() {
            outline.transform(&self.residual);
            output.add_path(&outline, false);
            // The outline overlaps itself at joins; only the non-zero rule
            // fills it as intended.
            output.set_fill_rule(FillRule::NonZero);
        }

        self.input = input;
        self.outline = outline;

        result
    }

    fn outline_path(&mut self, input: &PathBuffer, outline: &mut PathBuffer) -> TessellationResult {
        self.points.clear();
        for event in input {
            match event {
                PathEvent::Begin { at } => {
                    nan_check(at)?;
                    self.points.clear();
                    self.points.push_no_repeat(at);
                }
                PathEvent::Line { to, .. } | PathEvent::Cubic { to, .. } => {
                    nan_check(to)?;
                    self.points.push_no_repeat(to);
                }
                PathEvent::End { close, .. } => {
                    self.stroke_sub_path(close, outline)?;
                    self.points.clear();
                }
            }
        }

        Ok(())
    }

    fn stroke_sub_path(&mut self, closed: bool, outline: &mut PathBuffer) -> TessellationResult {
        let mut scratch = core::mem::take(&mut self.scratch);
        let result = self.sub_path_quads(closed, outline, &mut scratch);
        self.scratch = scratch;

        result
    }

    fn sub_path_quads(
        &mut self,
        closed: bool,
        outline: &mut PathBuffer,
        scratch: &mut Vec<Point>,
    ) -> TessellationResult {
        if self.points.is_empty() {
            return Ok(());
        }

        if closed && self.points.len() > 1 {
            let first = self.points[0];
            self.points.push_no_repeat(first);
        }

        let count = self.points.len();
        tess_log!(self, "stroke sub-path: {} points, closed: {}", count, closed);

        if count == 1 {
            if self.hairline {
                return Ok(());
            }
            // A lone point still gets its caps, facing away from each other
            // along the x axis.
            let mut first = self.points[0];
            let mut last = self.points[0];
            self.add_cap(&self.start_capper, outline, scratch, &mut first, vector(-1.0, 0.0))?;
            self.add_cap(&self.end_capper, outline, scratch, &mut last, vector(1.0, 0.0))?;
            return Ok(());
        }

        self.slopes.clear();
        for i in 0..count - 1 {
            let v = self.points[i + 1] - self.points[i];
            let length = v.length();
            let slope = if length > 0.0 { v / length } else { vector(1.0, 0.0) };
            self.slopes.push(slope);
        }

        if !closed && !self.hairline {
            // Caps come first: the arrow anchor retracts its end point, and
            // the quads must follow the retracted geometry.
            let first_slope = self.slopes[0];
            let last_slope = self.slopes[count - 2];
            let mut first = self.points[0];
            let mut last = self.points[count - 1];
            self.add_cap(&self.start_capper, outline, scratch, &mut first, -first_slope)?;
            self.add_cap(&self.end_capper, outline, scratch, &mut last, last_slope)?;
            self.points[0] = first;
            self.points[count - 1] = last;
        }

        for i in 0..count - 1 {
            self.add_quad(outline, self.points[i], self.points[i + 1], self.slopes[i])?;
            if i > 0 && !self.hairline {
                self.add_join(
                    outline,
                    scratch,
                    self.points[i],
                    self.slopes[i - 1],
                    self.slopes[i],
                )?;
            }
        }

        if closed && !self.hairline {
            // The seam between the closing segment and the first one.
            self.add_join(
                outline,
                scratch,
                self.points[0],
                self.slopes[count - 2],
                self.slopes[0],
            )?;
        }

        Ok(())
    }

    fn add_quad(
        &self,
        outline: &mut PathBuffer,
        from: Point,
        to: Point,
        slope: Vector,
    ) -> TessellationResult {
        let offset = vector(slope.y * self.radius, -slope.x * self.radius);
        let up = self.pen_offset(offset);
        let down = self.pen_offset(-offset);
        outline.add_polygon(&[from + up, from + down, to + down, to + up])?;

        Ok(())
    }

    fn add_join(
        &self,
        outline: &mut PathBuffer,
        scratch: &mut Vec<Point>,
        center: Point,
        prev: Vector,
        next: Vector,
    ) -> TessellationResult {
        if prev == next {
            return Ok(());
        }

        if let Joiner::Round { circle } = &self.joiner {
            return add_circle(outline, scratch, circle, center);
        }

        let cross = prev.x as f64 * next.y as f64 - prev.y as f64 * next.x as f64;
        // Wedge corners on the outer side of the turn; they coincide with
        // the adjacent quads' corners.
        let (w1, w2) = if cross > 0.0 {
            (vector(prev.y, -prev.x), vector(next.y, -next.x))
        } else {
            (vector(-prev.y, prev.x), vector(-next.y, next.x))
        };
        let c1 = center + self.pen_offset(w1 * self.radius);
        let c2 = center + self.pen_offset(w2 * self.radius);

        let mut miter = None;
        if let Joiner::Miter { limit_squared } = &self.joiner {
            let dot = prev.x as f64 * next.x as f64 + prev.y as f64 * next.y as f64;
            // Within the limit when limit^2 * (1 + cos) >= 2, which is
            // 1 / sin(half the interior angle) <= limit.
            if limit_squared * (1.0 + dot) >= 2.0 {
                let line1 = Line {
                    point: c1.cast::<f64>(),
                    vector: prev.cast::<f64>(),
                };
                let line2 = Line {
                    point: c2.cast::<f64>(),
                    vector: next.cast::<f64>(),
                };
                if let Some(intersection) = line1.intersection(&line2) {
                    miter = Some(intersection.cast::<f32>());
                }
            }
        }

        // Emitted with the same winding as the quads, so the overlap does
        // not cancel out under the non-zero rule.
        let mut wedge = ArrayVec::<Point, 4>::new();
        wedge.push(center);
        if cross > 0.0 {
            wedge.push(c2);
            if let Some(m) = miter {
                wedge.push(m);
            }
            wedge.push(c1);
        } else {
            wedge.push(c1);
            if let Some(m) = miter {
                wedge.push(m);
            }
            wedge.push(c2);
        }
        outline.add_polygon(&wedge)?;

        Ok(())
    }

    fn add_cap(
        &self,
        capper: &Capper,
        outline: &mut PathBuffer,
        scratch: &mut Vec<Point>,
        point: &mut Point,
        slope: Vector,
    ) -> TessellationResult {
        match capper {
            Capper::None => {}
            Capper::Square { radius } => {
                let d = slope * *radius;
                let corners = [
                    *point + self.pen_offset(vector(d.y + d.x, d.y - d.x)),
                    *point + self.pen_offset(vector(d.y, -d.x)),
                    *point + self.pen_offset(vector(-d.y, d.x)),
                    *point + self.pen_offset(vector(d.x - d.y, d.x + d.y)),
                ];
                outline.add_polygon(&corners)?;
            }
            Capper::Triangle { radius } => {
                let d = slope * *radius;
                let corners = [
                    *point + self.pen_offset(vector(d.y, -d.x)),
                    *point + self.pen_offset(vector(-d.y, d.x)),
                    *point + self.pen_offset(vector(d.x, d.y)),
                ];
                outline.add_polygon(&corners)?;
            }
            Capper::Round { circle } => {
                add_circle(outline, scratch, circle, *point)?;
            }
            Capper::SquareAnchor { radius } => {
                // A square rotated 45° relative to the slope, centered on
                // the end point.
                let d = slope * *radius;
                let d0 = vector(d.y + d.x, d.y - d.x);
                let corners = [
                    *point + self.anchor_offset(d0),
                    *point + self.anchor_offset(vector(d0.y, -d0.x)),
                    *point + self.anchor_offset(vector(-d0.x, -d0.y)),
                    *point + self.anchor_offset(vector(-d0.y, d0.x)),
                ];
                outline.add_polygon(&corners)?;
            }
            Capper::DiamondAnchor { radius } => {
                let d = slope * *radius;
                let corners = [
                    *point + self.anchor_offset(vector(d.y, -d.x)),
                    *point + self.anchor_offset(vector(-d.x, -d.y)),
                    *point + self.anchor_offset(vector(-d.y, d.x)),
                    *point + self.anchor_offset(vector(d.x, d.y)),
                ];
                outline.add_polygon(&corners)?;
            }
            Capper::ArrowAnchor { radius } => {
                // The tip sits on the end point; the shaft is retracted to
                // the base of the arrowhead.
                let d = slope * *radius;
                let offset = d * -ARROW_DEPTH;
                let across = vector(d.y, -d.x);
                let corners = [
                    *point,
                    *point + self.anchor_offset(offset + across),
                    *point + self.anchor_offset(offset - across),
                ];
                outline.add_polygon(&corners)?;
                *point += self.anchor_offset(offset);
            }
        }

        Ok(())
    }

    fn pen_offset(&self, offset: Vector) -> Vector {
        self.pen.transform_point(offset.to_point()).to_vector()
    }

    fn anchor_offset(&self, offset: Vector) -> Vector {
        self.anchor_scale.transform_point(offset.to_point()).to_vector()
    }
}

fn make_capper(
    cap: LineCap,
    radius: f32,
    pen: &Transform,
    scale: &Transform,
    tolerance: f32,
) -> Capper {
    match cap {
        LineCap::Flat | LineCap::NoAnchor | LineCap::Custom => Capper::None,
        LineCap::Square => Capper::Square { radius },
        LineCap::Triangle => Capper::Triangle { radius },
        LineCap::Round => Capper::Round {
            circle: circle_points(radius, pen, tolerance),
        },
        LineCap::SquareAnchor => Capper::SquareAnchor {
            radius: radius * 1.5,
        },
        LineCap::DiamondAnchor => Capper::DiamondAnchor {
            radius: radius * 2.0,
        },
        LineCap::ArrowAnchor => Capper::ArrowAnchor {
            radius: radius * 2.0,
        },
        LineCap::RoundAnchor => Capper::Round {
            circle: circle_points(radius * 2.0, scale, tolerance),
        },
    }
}

/// Flattened circle of the given radius around the origin, transformed and
/// wound the same way as the stroke quads.
fn circle_points(radius: f32, transform: &Transform, tolerance: f32) -> Vec<Point> {
    let r = radius;
    let k = radius * quarter_circle_kappa::<f32>();

    let ctrl = [
        point(r, 0.0),
        point(r, -k),
        point(k, -r),
        point(0.0, -r),
        point(-k, -r),
        point(-r, -k),
        point(-r, 0.0),
        point(-r, k),
        point(-k, r),
        point(0.0, r),
        point(k, r),
        point(r, k),
    ];

    let mut transformed = [Point::zero(); 12];
    for (dst, src) in transformed.iter_mut().zip(ctrl.iter()) {
        *dst = transform.transform_point(*src);
    }

    let mut points = Vec::new();
    points.push(transformed[0]);
    for quarter in 0..4 {
        let curve = CubicBezierSegment {
            from: transformed[quarter * 3],
            ctrl1: transformed[quarter * 3 + 1],
            ctrl2: transformed[quarter * 3 + 2],
            to: transformed[(quarter * 3 + 3) % 12],
        };
        curve.for_each_flattened(tolerance, &mut |p| points.push(p));
    }

    // The last quarter lands back on the first point.
    if points.last() == points.first() {
        points.pop();
    }

    points
}

fn add_circle(
    outline: &mut PathBuffer,
    scratch: &mut Vec<Point>,
    circle: &[Point],
    center: Point,
) -> TessellationResult {
    scratch.clear();
    let offset = center.to_vector();
    scratch.extend(circle.iter().map(|p| *p + offset));
    outline.add_polygon(scratch)?;

    Ok(())
}

/// Gram-Schmidt extraction of the per-axis scale factors of `transform`.
///
/// Both factors are negated together when the transform flips orientation,
/// so the residual transform always preserves winding.
fn extract_scale(transform: &Transform) -> (f32, f32) {
    let m11 = transform.m11 as f64;
    let m12 = transform.m12 as f64;
    let m21 = transform.m21 as f64;
    let m22 = transform.m22 as f64;

    let mut sx = (m11 * m11 + m12 * m12).sqrt();
    let mut sy;
    if sx == 0.0 {
        sx = 1.0;
        sy = (m21 * m21 + m22 * m22).sqrt();
    } else {
        let ux = m11 / sx;
        let uy = m12 / sx;
        let shear = ux * m21 + uy * m22;
        let rx = m21 - shear * ux;
        let ry = m22 - shear * uy;
        sy = (rx * rx + ry * ry).sqrt();
    }
    if sy == 0.0 {
        sy = 1.0;
    }

    if m11 * m22 - m12 * m21 < 0.0 {
        sx = -sx;
        sy = -sy;
    }

    (sx as f32, sy as f32)
}

#[cfg(test)]
fn assert_approx(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-5, "{:?} != {:?}", a, b);
}

#[test]
fn extract_scale_basics() {
    use crate::math::Angle;

    let (sx, sy) = extract_scale(&Transform::identity());
    assert_approx(sx, 1.0);
    assert_approx(sy, 1.0);

    let (sx, sy) = extract_scale(&Transform::scale(2.0, 3.0));
    assert_approx(sx, 2.0);
    assert_approx(sy, 3.0);

    let (sx, sy) = extract_scale(&Transform::rotation(Angle::radians(0.7)));
    assert_approx(sx, 1.0);
    assert_approx(sy, 1.0);

    let (sx, sy) = extract_scale(&Transform::scale(2.0, 3.0).then_rotate(Angle::radians(1.2)));
    assert_approx(sx, 2.0);
    assert_approx(sy, 3.0);

    // Shear does not leak into the scale factors.
    let (sx, sy) = extract_scale(&Transform::new(1.0, 0.0, 1.0, 1.0, 0.0, 0.0));
    assert_approx(sx, 1.0);
    assert_approx(sy, 1.0);

    // Reflections negate both factors.
    let (sx, sy) = extract_scale(&Transform::scale(-2.0, 3.0));
    assert_approx(sx, -2.0);
    assert_approx(sy, -3.0);
}

#[test]
fn circle_points_stay_on_the_circle() {
    let circle = circle_points(10.0, &Transform::identity(), 0.01);

    assert!(circle.len() >= 8);
    assert_ne!(circle.last(), circle.first());
    for p in &circle {
        let r = p.to_vector().length();
        assert!(r > 9.9 && r < 10.1, "radius {:?}", r);
    }
}
