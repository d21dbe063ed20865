use core::fmt;

/// One byte of path structure, stored parallel to a point.
///
/// The low three bits encode how the point joins the figure, the high bits
/// carry per-point flags:
///
/// ```text
/// 0b C 0 M 0 0 K K K
///    │   │       └┴┴── kind: 0 = figure start, 1 = line, 3 = bézier
///    │   └── 0x20: marker
///    └── 0x80: closes the figure
/// ```
///
/// A bézier segment occupies three consecutive tags (two control points
/// followed by the end point), all with the bézier kind.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PathTag(u8);

impl PathTag {
    /// First point of a figure.
    pub const START: Self = PathTag(0x00);
    /// End point of a line segment.
    pub const LINE: Self = PathTag(0x01);
    /// Control or end point of a cubic bézier segment.
    pub const BEZIER: Self = PathTag(0x03);

    pub const KIND_MASK: u8 = 0x07;
    pub const MARKER_BIT: u8 = 0x20;
    pub const CLOSE_BIT: u8 = 0x80;
    pub const FLAGS_MASK: u8 = Self::MARKER_BIT | Self::CLOSE_BIT;

    #[inline]
    pub fn from_byte(byte: u8) -> Self {
        PathTag(byte)
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_start(self) -> bool {
        self.0 & Self::KIND_MASK == Self::START.0
    }

    #[inline]
    pub fn is_line(self) -> bool {
        self.0 & Self::KIND_MASK == Self::LINE.0
    }

    #[inline]
    pub fn is_bezier(self) -> bool {
        self.0 & Self::KIND_MASK == Self::BEZIER.0
    }

    /// Whether the kind bits hold one of the three known kinds.
    #[inline]
    pub fn has_valid_kind(self) -> bool {
        match self.0 & Self::KIND_MASK {
            0x00 | 0x01 | 0x03 => true,
            _ => false,
        }
    }

    #[inline]
    pub fn is_close(self) -> bool {
        self.0 & Self::CLOSE_BIT != 0
    }

    #[inline]
    pub fn is_marker(self) -> bool {
        self.0 & Self::MARKER_BIT != 0
    }

    /// The flag bits of this tag, with the kind bits cleared.
    #[inline]
    pub fn flags(self) -> u8 {
        self.0 & Self::FLAGS_MASK
    }

    #[inline]
    pub fn with_close(self) -> Self {
        PathTag(self.0 | Self::CLOSE_BIT)
    }

    #[inline]
    pub fn with_marker(self) -> Self {
        PathTag(self.0 | Self::MARKER_BIT)
    }

    #[inline]
    pub fn without_marker(self) -> Self {
        PathTag(self.0 & !Self::MARKER_BIT)
    }

    /// Adds the given flag bits on top of this tag's.
    #[inline]
    pub fn with_flags(self, flags: u8) -> Self {
        PathTag(self.0 | (flags & Self::FLAGS_MASK))
    }

    /// Replaces the kind bits, keeping the flags.
    #[inline]
    pub fn with_kind(self, kind: PathTag) -> Self {
        PathTag((self.0 & !Self::KIND_MASK) | (kind.0 & Self::KIND_MASK))
    }
}

impl fmt::Debug for PathTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 & Self::KIND_MASK {
            0x00 => write!(f, "Start")?,
            0x01 => write!(f, "Line")?,
            0x03 => write!(f, "Bezier")?,
            kind => write!(f, "Invalid({:#x})", kind)?,
        }
        if self.is_marker() {
            write!(f, "|marker")?;
        }
        if self.is_close() {
            write!(f, "|close")?;
        }

        Ok(())
    }
}

#[test]
fn tag_flags() {
    let tag = PathTag::LINE.with_close().with_marker();
    assert!(tag.is_line());
    assert!(!tag.is_start());
    assert!(tag.is_close());
    assert!(tag.is_marker());

    let tag = tag.without_marker();
    assert!(!tag.is_marker());
    assert!(tag.is_close());
    assert_eq!(tag.to_byte(), 0x81);
}

#[test]
fn tag_kind_replacement() {
    let tag = PathTag::START.with_marker().with_kind(PathTag::LINE);
    assert!(tag.is_line());
    assert!(tag.is_marker());

    assert_eq!(PathTag::BEZIER.with_kind(PathTag::LINE), PathTag::LINE);
    assert!(!PathTag::from_byte(0x02).has_valid_kind());
    assert!(PathTag::from_byte(0x83).has_valid_kind());
}

#[test]
fn tag_flag_carry() {
    let flags = PathTag::LINE.with_close().flags();
    assert_eq!(flags, PathTag::CLOSE_BIT);
    assert_eq!(PathTag::LINE.with_flags(flags), PathTag::LINE.with_close());
}
