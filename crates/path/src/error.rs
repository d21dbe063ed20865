use core::fmt;

/// Error while appending to a [`PathBuffer`](crate::PathBuffer).
///
/// The failing operation leaves the path unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathError {
    /// A batched append was given too few points, or a number of points that
    /// does not form whole bézier segments.
    InvalidPointCount,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PathError::InvalidPointCount => {
                write!(f, "Invalid number of points for this operation")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PathError {}

/// Structural problem found in a path's type-tag array.
///
/// Paths assembled through [`PathBuffer`](crate::PathBuffer)'s operations are
/// well formed by construction; these errors surface when validating buffers
/// built from raw point/tag arrays.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum MalformedPath {
    /// The point and tag arrays have different lengths.
    MismatchedLengths { points: usize, tags: usize },
    /// The path opens with a tag other than a figure start.
    NoStartPoint { index: usize },
    /// A bézier run ends before its two control points and end point.
    TruncatedBezier { index: usize },
    /// A tag whose kind bits are none of start/line/bézier.
    InvalidTag { index: usize },
}

impl fmt::Display for MalformedPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MalformedPath::MismatchedLengths { points, tags } => write!(
                f,
                "Path holds {} points but {} type tags",
                points, tags
            ),
            MalformedPath::NoStartPoint { index } => {
                write!(f, "Tag at index {} opens the path without a start tag", index)
            }
            MalformedPath::TruncatedBezier { index } => {
                write!(f, "Truncated bézier run at index {}", index)
            }
            MalformedPath::InvalidTag { index } => {
                write!(f, "Unrecognized tag kind at index {}", index)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MalformedPath {}
