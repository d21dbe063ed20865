use crate::path::{MalformedPath, PathError};

/// The fill tessellator's result type.
pub type TessellationResult = Result<(), TessellationError>;

/// An error that can happen while tessellating a path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum TessellationError {
    UnsupportedParameter(UnsupportedParameter),
    MalformedPath(MalformedPath),
}

#[cfg(feature = "std")]
impl core::fmt::Display for TessellationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::UnsupportedParameter(e) => std::write!(f, "Unsupported parameter: {e}"),
            Self::MalformedPath(e) => std::write!(f, "Malformed path: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TessellationError {}

impl core::convert::From<MalformedPath> for TessellationError {
    fn from(error: MalformedPath) -> Self {
        TessellationError::MalformedPath(error)
    }
}

impl core::convert::From<UnsupportedParameter> for TessellationError {
    fn from(error: UnsupportedParameter) -> Self {
        TessellationError::UnsupportedParameter(error)
    }
}

impl core::convert::From<PathError> for TessellationError {
    fn from(_: PathError) -> Self {
        TessellationError::UnsupportedParameter(UnsupportedParameter::InvalidPointCount)
    }
}

/// A parameter the tessellators cannot process.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum UnsupportedParameter {
    ToleranceIsNaN,
    PositionIsNaN,
    InvalidPointCount,
}

#[cfg(feature = "std")]
impl core::fmt::Display for UnsupportedParameter {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::ToleranceIsNaN => std::write!(f, "The tolerance is NaN"),
            Self::PositionIsNaN => std::write!(f, "A position is NaN"),
            Self::InvalidPointCount => std::write!(f, "Invalid number of points"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnsupportedParameter {}
