use crate::path::FillRule;
use crate::polygon::Edge;
use crate::trapezoid::Trapezoids;

use alloc::vec::Vec;
use core::cmp::Ordering;
use float_next_after::NextAfter;

/// The scanline sweep at the heart of the fill tessellator.
///
/// Edges are sorted by their top end and swept top to bottom. At each
/// position the active edges (those crossing the current scanline) are
/// ordered left to right, the sweep finds the largest band over which that
/// ordering holds, and emits one trapezoid per span the fill rule considers
/// inside.
///
/// The band bottom is the closest of: an active edge ending, a new edge
/// starting, or two adjacent active edges crossing. This keeps every
/// trapezoid's sides straight and non-intersecting over its band.
pub(crate) struct Trapezoidizer {
    edges: Vec<Edge>,
    active: Vec<ActiveEdge>,
    pub(crate) log: bool,
}

#[derive(Copy, Clone, Debug)]
struct ActiveEdge {
    edge: Edge,
    /// Horizontal position at the current scanline, in f64 to keep the
    /// left-to-right ordering stable over thin bands.
    x: f64,
}

impl Trapezoidizer {
    pub(crate) fn new() -> Self {
        Trapezoidizer {
            edges: Vec::new(),
            active: Vec::new(),
            log: false,
        }
    }

    #[cfg_attr(feature = "profiling", inline(never))]
    pub(crate) fn tessellate(
        &mut self,
        edges: &[Edge],
        fill_rule: FillRule,
        output: &mut Trapezoids,
    ) {
        if edges.is_empty() {
            return;
        }

        self.edges.clear();
        self.edges.extend_from_slice(edges);
        self.edges.sort_by(|a, b| {
            (a.upper.y, a.upper.x)
                .partial_cmp(&(b.upper.y, b.upper.x))
                .unwrap_or(Ordering::Equal)
        });

        self.active.clear();
        let mut next = 0;
        let mut y = self.edges[0].upper.y as f64;

        tess_log!(self, "trapezoidize {} edges from y={:?}", self.edges.len(), y);

        loop {
            self.active.retain(|active| (active.edge.lower.y as f64) > y);

            while next < self.edges.len() && (self.edges[next].upper.y as f64) <= y {
                self.active.push(ActiveEdge {
                    edge: self.edges[next],
                    x: 0.0,
                });
                next += 1;
            }

            if self.active.is_empty() {
                if next == self.edges.len() {
                    break;
                }
                y = self.edges[next].upper.y as f64;
                continue;
            }

            for active in &mut self.active {
                active.x = active.edge.x_at(y);
            }

            self.active.sort_by(|a, b| {
                match a.x.partial_cmp(&b.x) {
                    Some(Ordering::Equal) | None => {}
                    Some(order) => return order,
                }
                // Edges meeting at a shared vertex: order by slope so the
                // pair does not cross inside the next band.
                let ax = a.edge.lower.x as f64 - a.edge.upper.x as f64;
                let ay = a.edge.lower.y as f64 - a.edge.upper.y as f64;
                let bx = b.edge.lower.x as f64 - b.edge.upper.x as f64;
                let by = b.edge.lower.y as f64 - b.edge.upper.y as f64;
                let cross = ax * by - ay * bx;
                if cross < 0.0 {
                    return Ordering::Less;
                }
                if cross > 0.0 {
                    return Ordering::Greater;
                }
                // Exactly overlapping edges: clockwise first, so winding
                // transitions stay deterministic.
                b.edge.clockwise.cmp(&a.edge.clockwise)
            });

            let mut bottom = f64::INFINITY;
            for active in &self.active {
                bottom = bottom.min(active.edge.lower.y as f64);
            }
            if next < self.edges.len() {
                bottom = bottom.min(self.edges[next].upper.y as f64);
            }
            for pair in self.active.windows(2) {
                if let Some(crossing) = crossing_y(&pair[0], &pair[1], y) {
                    // A crossing landing numerically at the scanline itself
                    // still forces the band to stop just below it, where
                    // re-sorting swaps the pair.
                    let crossing = if crossing <= y {
                        y.next_after(f64::INFINITY)
                    } else {
                        crossing
                    };
                    if crossing < bottom {
                        bottom = crossing;
                    }
                }
            }

            debug_assert!(bottom > y);
            tess_log!(
                self,
                "band y=[{:?} {:?}], {} active edges",
                y,
                bottom,
                self.active.len()
            );

            let mut winding: i16 = 0;
            let mut span: Option<usize> = None;
            for (i, active) in self.active.iter().enumerate() {
                winding += active.edge.winding();
                let inside = fill_rule.is_in(winding);
                match span {
                    None if inside => span = Some(i),
                    Some(left) if !inside => {
                        let left = &self.active[left];
                        output.push_band(
                            y as f32,
                            bottom as f32,
                            (left.x as f32, left.edge.x_at(bottom) as f32),
                            (active.x as f32, active.edge.x_at(bottom) as f32),
                        );
                        span = None;
                    }
                    _ => {}
                }
            }

            y = bottom;
        }
    }
}

fn slope(edge: &Edge) -> f64 {
    (edge.lower.x as f64 - edge.upper.x as f64) / (edge.lower.y as f64 - edge.upper.y as f64)
}

/// Height at which two neighboring active edges cross, if they cross below
/// the current scanline.
fn crossing_y(a: &ActiveEdge, b: &ActiveEdge, y: f64) -> Option<f64> {
    let sa = slope(&a.edge);
    let sb = slope(&b.edge);
    // `a` is on the left; the pair only crosses if `a` drifts right faster
    // than `b`.
    if sa <= sb {
        return None;
    }

    Some(y + (b.x - a.x) / (sa - sb))
}

#[test]
fn rectangle_is_one_band() {
    use crate::math::point;
    use crate::polygon::Polygon;

    let mut polygon = Polygon::new();
    polygon.move_to(point(0.0, 0.0));
    polygon.line_to(point(10.0, 0.0));
    polygon.line_to(point(10.0, 10.0));
    polygon.line_to(point(0.0, 10.0));
    polygon.close();

    let mut sweep = Trapezoidizer::new();
    let mut output = Trapezoids::new();
    sweep.tessellate(polygon.edges(), FillRule::EvenOdd, &mut output);

    assert_eq!(output.len(), 1);
    let trapezoid = output.as_slice()[0];
    assert_eq!(trapezoid.top, 0.0);
    assert_eq!(trapezoid.bottom, 10.0);
    assert_eq!(trapezoid.left_x_at(0.0), 0.0);
    assert_eq!(trapezoid.left_x_at(10.0), 0.0);
    assert_eq!(trapezoid.right_x_at(0.0), 10.0);
    assert_eq!(trapezoid.right_x_at(10.0), 10.0);
}

#[test]
fn crossing_edges_split_the_band() {
    use crate::math::point;
    use crate::polygon::Polygon;

    // The two diagonals cross at (5, 5).
    let mut polygon = Polygon::new();
    polygon.move_to(point(0.0, 0.0));
    polygon.line_to(point(10.0, 10.0));
    polygon.line_to(point(0.0, 10.0));
    polygon.line_to(point(10.0, 0.0));
    polygon.close();

    let mut sweep = Trapezoidizer::new();
    let mut output = Trapezoids::new();
    sweep.tessellate(polygon.edges(), FillRule::EvenOdd, &mut output);

    assert_eq!(output.len(), 2);
    assert_eq!(output.as_slice()[0].top, 0.0);
    assert_eq!(output.as_slice()[0].bottom, 5.0);
    assert_eq!(output.as_slice()[1].top, 5.0);
    assert_eq!(output.as_slice()[1].bottom, 10.0);
}
