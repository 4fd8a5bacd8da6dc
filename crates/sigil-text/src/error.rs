/// Which rectangle of a glyph failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphBoundsKind {
    /// Geometric extent in EM units.
    Plane,
    /// Pixel rectangle inside the atlas.
    Atlas,
}

impl std::fmt::Display for GlyphBoundsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GlyphBoundsKind::Plane => write!(f, "plane"),
            GlyphBoundsKind::Atlas => write!(f, "atlas"),
        }
    }
}

/// Errors raised while assembling font data.
///
/// Drawing and measuring never fail; degenerate input renders nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum TextError {
    /// Atlas dimensions must be positive and finite.
    InvalidAtlasSize { width: f32, height: f32 },

    /// A glyph rectangle is inverted (`top < bottom` or `right < left`) or not finite.
    InvalidGlyphBounds { codepoint: u32, kind: GlyphBoundsKind },

    /// A vertical metric or advance is not a finite number.
    InvalidMetric { name: &'static str, value: f32 },
}

impl std::fmt::Display for TextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextError::InvalidAtlasSize { width, height } => {
                write!(f, "Invalid atlas size: {}x{}", width, height)
            }
            TextError::InvalidGlyphBounds { codepoint, kind } => match char::from_u32(*codepoint) {
                Some(c) => write!(
                    f,
                    "Invalid {} bounds for glyph U+{:04X} ({:?})",
                    kind, codepoint, c
                ),
                None => write!(f, "Invalid {} bounds for glyph U+{:04X}", kind, codepoint),
            },
            TextError::InvalidMetric { name, value } => {
                write!(f, "Invalid font metric '{}': {}", name, value)
            }
        }
    }
}

impl std::error::Error for TextError {}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;
