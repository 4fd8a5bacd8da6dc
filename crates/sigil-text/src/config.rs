//! Renderer tuning: marker, size calibration, shadow and edge constants.

use std::time::Duration;

/// Tuning knobs of the text renderer.
///
/// The defaults reproduce the calibration of the bundled MSDF fonts and the
/// classic `§` formatting grammar; most callers never change them.
///
/// ```
/// use sigil_text::RendererConfig;
///
/// let config = RendererConfig::new()
///     .marker('&')
///     .bold_advance_scale(1.1);
/// assert_eq!(config.marker, '&');
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Character introducing a two-character format directive.
    pub marker: char,
    /// Converts caller point sizes to the font's EM-to-pixel scale.
    pub point_scale: f32,
    /// Extra advance applied to bold glyphs.
    pub bold_advance_scale: f32,
    /// Upward shift of the draw origin, as a fraction of the effective size.
    pub vertical_nudge: f32,
    /// Shadow offset is `effective_size / shadow_offset_divisor` on both axes.
    pub shadow_offset_divisor: f32,
    /// Numerator of the `doffset` edge-softening uniform.
    pub edge_softness: f32,
    /// How often obfuscated glyphs reshuffle.
    pub obfuscation_interval: Duration,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            marker: '\u{00a7}',
            point_scale: 1.362_305_986_7,
            bold_advance_scale: 1.05,
            vertical_nudge: 0.2,
            shadow_offset_divisor: 10.0,
            edge_softness: 3.5,
            obfuscation_interval: Duration::from_millis(50),
        }
    }
}

impl RendererConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directive marker character.
    pub fn marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    /// Set the point-size calibration constant.
    pub fn point_scale(mut self, scale: f32) -> Self {
        self.point_scale = scale.max(f32::EPSILON);
        self
    }

    /// Set the bold advance multiplier.
    pub fn bold_advance_scale(mut self, scale: f32) -> Self {
        self.bold_advance_scale = scale.max(f32::EPSILON);
        self
    }

    /// Set the vertical centering correction.
    pub fn vertical_nudge(mut self, nudge: f32) -> Self {
        self.vertical_nudge = nudge;
        self
    }

    /// Set the shadow offset divisor (at least 1).
    pub fn shadow_offset_divisor(mut self, divisor: f32) -> Self {
        self.shadow_offset_divisor = divisor.max(1.0);
        self
    }

    /// Set the SDF edge softness numerator.
    pub fn edge_softness(mut self, softness: f32) -> Self {
        self.edge_softness = softness.max(0.0);
        self
    }

    /// Set the obfuscation refresh interval.
    pub fn obfuscation_interval(mut self, interval: Duration) -> Self {
        self.obfuscation_interval = interval;
        self
    }

    /// Pixel size a glyph EM maps to for a caller point size and scale.
    pub fn effective_size(&self, point_size: f32, scale: f32) -> f32 {
        point_size * scale * self.point_scale
    }

    /// Advance multiplier for the current boldness.
    pub fn advance_scale(&self, bold: bool) -> f32 {
        if bold { self.bold_advance_scale } else { 1.0 }
    }

    /// Offset of the drop shadow on each axis.
    pub fn shadow_offset(&self, effective_size: f32) -> f32 {
        effective_size / self.shadow_offset_divisor
    }

    /// Value of the `doffset` uniform at `effective_size`.
    pub fn edge_offset(&self, effective_size: f32) -> f32 {
        self.edge_softness / effective_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RendererConfig::default();
        assert_eq!(config.marker, '§');
        assert_eq!(config.bold_advance_scale, 1.05);
        assert_eq!(config.obfuscation_interval, Duration::from_millis(50));
        assert_eq!(config.advance_scale(false), 1.0);
        assert_eq!(config.advance_scale(true), 1.05);
    }

    #[test]
    fn test_effective_size_and_offsets() {
        let config = RendererConfig::default();
        let size = config.effective_size(8.0, 1.0);

        assert!((size - 10.898_448).abs() < 1e-4);
        assert!((config.shadow_offset(size) - 1.089_845).abs() < 1e-4);
        assert!((config.edge_offset(size) - 3.5 / size).abs() < f32::EPSILON);
    }

    #[test]
    fn test_setters_clamp() {
        let config = RendererConfig::new()
            .shadow_offset_divisor(0.0)
            .edge_softness(-1.0)
            .point_scale(-2.0);

        assert_eq!(config.shadow_offset_divisor, 1.0);
        assert_eq!(config.edge_softness, 0.0);
        assert!(config.point_scale > 0.0);
    }
}
