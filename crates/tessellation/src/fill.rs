use crate::error::{TessellationResult, UnsupportedParameter};
use crate::geom::CubicBezierSegment;
use crate::math::Point;
use crate::path::{FillRule, PathBuffer, PathEvent};
use crate::polygon::Polygon;
use crate::sweep::Trapezoidizer;
use crate::trapezoid::Trapezoids;
use crate::FillOptions;

/// A fill tessellator, turning paths into lists of trapezoids.
///
/// The tessellator owns the polygon and sweep scratch buffers, so reusing
/// one instance across fill operations amortizes their allocations.
///
/// # Examples
///
/// ```
/// # extern crate trapeze_tessellation as tess;
/// # use tess::math::rect;
/// # use tess::{FillOptions, FillTessellator, PathBuffer, Trapezoids};
/// # fn main() {
/// let mut path = PathBuffer::new();
/// path.add_rectangle(&rect(0.0, 0.0, 100.0, 50.0));
///
/// let mut tessellator = FillTessellator::new();
/// let mut trapezoids = Trapezoids::new();
///
/// tessellator
///     .tessellate_path(&path, &FillOptions::default(), &mut trapezoids)
///     .unwrap();
///
/// assert_eq!(trapezoids.len(), 1);
/// # }
/// ```
pub struct FillTessellator {
    polygon: Polygon,
    sweep: Trapezoidizer,
    log: bool,
}

impl FillTessellator {
    /// Constructs a new fill tessellator.
    pub fn new() -> Self {
        #[cfg(feature = "std")]
        let log = std::env::var("TRAPEZE_FORCE_LOGGING").is_ok();
        #[cfg(not(feature = "std"))]
        let log = false;

        let mut sweep = Trapezoidizer::new();
        sweep.log = log;

        FillTessellator {
            polygon: Polygon::new(),
            sweep,
            log,
        }
    }

    /// Enable/disable some verbose logging when running the tessellator,
    /// for debugging purposes.
    pub fn set_logging(&mut self, is_enabled: bool) {
        #[cfg(feature = "std")]
        let forced = std::env::var("TRAPEZE_FORCE_LOGGING").is_ok();

        #[cfg(not(feature = "std"))]
        let forced = false;

        self.log = is_enabled || forced;
        self.sweep.log = self.log;
    }

    /// Tessellates the region covered by `path` into trapezoids, appended
    /// to `output`.
    ///
    /// On error, `output` is left untouched.
    pub fn tessellate_path(
        &mut self,
        path: &PathBuffer,
        options: &FillOptions,
        output: &mut Trapezoids,
    ) -> TessellationResult {
        self.flatten_into_polygon(path, options.tolerance)?;

        tess_log!(
            self,
            "fill: {} edges, fill rule {:?}",
            self.polygon.edges().len(),
            options.fill_rule
        );

        self.sweep
            .tessellate(self.polygon.edges(), options.fill_rule, output);

        Ok(())
    }

    /// Tessellates a path using the fill rule stored on the path itself.
    pub fn fill_path(
        &mut self,
        path: &PathBuffer,
        tolerance: f32,
        output: &mut Trapezoids,
    ) -> TessellationResult {
        let options = FillOptions::tolerance(tolerance).with_fill_rule(path.fill_rule());
        self.tessellate_path(path, &options, output)
    }

    /// Tessellates a set of edges that was accumulated by hand.
    pub fn tessellate_polygon(
        &mut self,
        polygon: &Polygon,
        fill_rule: FillRule,
        output: &mut Trapezoids,
    ) {
        self.sweep.tessellate(polygon.edges(), fill_rule, output);
    }

    /// Flattens `path` into a polygon without tessellating it.
    ///
    /// `output` is replaced by the new polygon on success and left
    /// untouched on error.
    pub fn tessellate_to_polygon(
        &mut self,
        path: &PathBuffer,
        tolerance: f32,
        output: &mut Polygon,
    ) -> TessellationResult {
        self.flatten_into_polygon(path, tolerance)?;
        core::mem::swap(&mut self.polygon, output);

        Ok(())
    }

    fn flatten_into_polygon(&mut self, path: &PathBuffer, tolerance: f32) -> TessellationResult {
        if tolerance.is_nan() || tolerance <= 0.0 {
            return Err(UnsupportedParameter::ToleranceIsNaN.into());
        }
        path.validate()?;

        self.polygon.clear();
        for event in path {
            match event {
                PathEvent::Begin { at } => {
                    nan_check(at)?;
                    self.polygon.move_to(at);
                }
                PathEvent::Line { to, .. } => {
                    nan_check(to)?;
                    self.polygon.line_to(to);
                }
                PathEvent::Cubic {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                } => {
                    nan_check(ctrl1)?;
                    nan_check(ctrl2)?;
                    nan_check(to)?;
                    let curve = CubicBezierSegment {
                        from,
                        ctrl1,
                        ctrl2,
                        to,
                    };
                    let polygon = &mut self.polygon;
                    curve.for_each_flattened(tolerance, &mut |point| polygon.line_to(point));
                }
                // Filling treats open sub-paths as closed.
                PathEvent::End { .. } => self.polygon.close(),
            }
        }

        Ok(())
    }
}

impl Default for FillTessellator {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn nan_check(position: Point) -> TessellationResult {
    if position.x.is_nan() || position.y.is_nan() {
        return Err(UnsupportedParameter::PositionIsNaN.into());
    }

    Ok(())
}
