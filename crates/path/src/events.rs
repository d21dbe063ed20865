use crate::math::Point;

/// An edge or figure boundary of a path.
///
/// Every figure is bracketed by a `Begin` and an `End` event; `End` carries
/// the first point again so that consumers can form the closing edge when
/// `close` is set.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathEvent {
    Begin {
        at: Point,
    },
    Line {
        from: Point,
        to: Point,
    },
    Cubic {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    End {
        last: Point,
        first: Point,
        close: bool,
    },
}
