//! Glyph metrics of MSDF fonts.
//!
//! A [`FontVariant`] is the parsed form of an atlas description: atlas
//! dimensions, vertical metrics and per-codepoint glyph geometry, plus the
//! handle of the already uploaded atlas texture. Variants are immutable once
//! built and are shared between renderers through [`Arc`].

use std::sync::Arc;

use glam::Vec2;
use sigil_core::alloc::HashMap;
use sigil_render::{TextureId, UvRect};

use crate::error::{GlyphBoundsKind, TextError, TextResult};

/// An axis-aligned rectangle with `top >= bottom` and `right >= left`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Bounds {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    fn is_well_formed(&self) -> bool {
        [self.left, self.right, self.top, self.bottom]
            .iter()
            .all(|v| v.is_finite())
            && self.top >= self.bottom
            && self.right >= self.left
    }
}

/// Geometry of a single glyph.
///
/// Glyphs without bounds (spaces, control characters) still advance the pen
/// but are never drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Glyph {
    /// Extent in EM units relative to the pen position and baseline.
    pub plane_bounds: Option<Bounds>,
    /// Pixel rectangle in the atlas, Y up from the atlas bottom.
    pub atlas_bounds: Option<Bounds>,
    /// Horizontal pen advance in EM units.
    pub advance: f32,
}

impl Glyph {
    /// A glyph that only advances the pen.
    pub fn new(advance: f32) -> Self {
        Self {
            plane_bounds: None,
            atlas_bounds: None,
            advance,
        }
    }

    pub fn with_plane_bounds(mut self, bounds: Bounds) -> Self {
        self.plane_bounds = Some(bounds);
        self
    }

    pub fn with_atlas_bounds(mut self, bounds: Bounds) -> Self {
        self.atlas_bounds = Some(bounds);
        self
    }
}

/// Atlas dimensions and the pixel heights the host uses for layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AtlasInfo {
    pub width: f32,
    pub height: f32,
    pub base_char_height: f32,
    pub shadow_height: f32,
    pub below_line_height: f32,
}

/// Vertical font metrics in EM units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontMetrics {
    pub line_height: f32,
    pub descender: f32,
}

/// One style of a font: its atlas texture and glyph geometry.
#[derive(Debug, Clone)]
pub struct FontVariant {
    texture: TextureId,
    atlas: AtlasInfo,
    metrics: FontMetrics,
    glyphs: HashMap<u32, Glyph>,
}

impl FontVariant {
    /// Start building a variant whose atlas is uploaded as `texture`.
    pub fn builder(texture: TextureId) -> FontVariantBuilder {
        FontVariantBuilder {
            texture,
            atlas: AtlasInfo::default(),
            metrics: FontMetrics::default(),
            glyphs: HashMap::new(),
        }
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }

    pub fn atlas(&self) -> &AtlasInfo {
        &self.atlas
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// Glyph for `c`, if the font covers it.
    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        self.glyphs.get(&(c as u32))
    }

    pub fn glyph_by_codepoint(&self, codepoint: u32) -> Option<&Glyph> {
        self.glyphs.get(&codepoint)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Size of one atlas texel in normalized texture coordinates.
    pub fn texel_size(&self) -> Vec2 {
        Vec2::new(1.0 / self.atlas.width, 1.0 / self.atlas.height)
    }

    /// Normalize an atlas rectangle to texture coordinates, flipping V so
    /// that atlas row 0 (the bottom) maps to `v = 1`.
    pub fn uv_rect(&self, atlas_bounds: &Bounds) -> UvRect {
        UvRect {
            left: atlas_bounds.left / self.atlas.width,
            right: atlas_bounds.right / self.atlas.width,
            top: 1.0 - atlas_bounds.top / self.atlas.height,
            bottom: 1.0 - atlas_bounds.bottom / self.atlas.height,
        }
    }
}

/// Builder for [`FontVariant`]; validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct FontVariantBuilder {
    texture: TextureId,
    atlas: AtlasInfo,
    metrics: FontMetrics,
    glyphs: HashMap<u32, Glyph>,
}

impl FontVariantBuilder {
    pub fn atlas_size(mut self, width: f32, height: f32) -> Self {
        self.atlas.width = width;
        self.atlas.height = height;
        self
    }

    pub fn base_char_height(mut self, height: f32) -> Self {
        self.atlas.base_char_height = height;
        self
    }

    pub fn shadow_height(mut self, height: f32) -> Self {
        self.atlas.shadow_height = height;
        self
    }

    pub fn below_line_height(mut self, height: f32) -> Self {
        self.atlas.below_line_height = height;
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.metrics.line_height = line_height;
        self
    }

    pub fn descender(mut self, descender: f32) -> Self {
        self.metrics.descender = descender;
        self
    }

    /// Add or replace the glyph for `c`.
    pub fn glyph(self, c: char, glyph: Glyph) -> Self {
        self.glyph_codepoint(c as u32, glyph)
    }

    pub fn glyph_codepoint(mut self, codepoint: u32, glyph: Glyph) -> Self {
        self.glyphs.insert(codepoint, glyph);
        self
    }

    pub fn glyphs(mut self, glyphs: impl IntoIterator<Item = (char, Glyph)>) -> Self {
        self.glyphs
            .extend(glyphs.into_iter().map(|(c, glyph)| (c as u32, glyph)));
        self
    }

    pub fn build(self) -> TextResult<FontVariant> {
        let AtlasInfo { width, height, .. } = self.atlas;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(TextError::InvalidAtlasSize { width, height });
        }

        let metrics = [
            ("line_height", self.metrics.line_height),
            ("descender", self.metrics.descender),
            ("base_char_height", self.atlas.base_char_height),
            ("shadow_height", self.atlas.shadow_height),
            ("below_line_height", self.atlas.below_line_height),
        ];
        if let Some((name, value)) = metrics.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(TextError::InvalidMetric { name, value });
        }

        for (&codepoint, glyph) in &self.glyphs {
            if !glyph.advance.is_finite() {
                return Err(TextError::InvalidMetric {
                    name: "advance",
                    value: glyph.advance,
                });
            }
            if glyph.plane_bounds.is_some_and(|b| !b.is_well_formed()) {
                return Err(TextError::InvalidGlyphBounds {
                    codepoint,
                    kind: GlyphBoundsKind::Plane,
                });
            }
            if glyph.atlas_bounds.is_some_and(|b| !b.is_well_formed()) {
                return Err(TextError::InvalidGlyphBounds {
                    codepoint,
                    kind: GlyphBoundsKind::Atlas,
                });
            }
        }

        tracing::debug!(
            "Built font variant {:?}: {}x{} atlas, {} glyphs",
            self.texture,
            width,
            height,
            self.glyphs.len()
        );

        Ok(FontVariant {
            texture: self.texture,
            atlas: self.atlas,
            metrics: self.metrics,
            glyphs: self.glyphs,
        })
    }
}

/// Selects which variant of a [`FontPair`] is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VariantKind {
    #[default]
    Regular,
    Bold,
}

/// The regular and bold variants of one font.
///
/// When no bold variant is supplied both roles resolve to the regular one.
#[derive(Debug, Clone)]
pub struct FontPair {
    regular: Arc<FontVariant>,
    bold: Arc<FontVariant>,
}

impl FontPair {
    pub fn new(regular: Arc<FontVariant>) -> Self {
        Self {
            bold: regular.clone(),
            regular,
        }
    }

    pub fn with_bold(mut self, bold: Arc<FontVariant>) -> Self {
        self.bold = bold;
        self
    }

    pub fn variant(&self, kind: VariantKind) -> &FontVariant {
        match kind {
            VariantKind::Regular => &self.regular,
            VariantKind::Bold => &self.bold,
        }
    }

    pub fn regular(&self) -> &FontVariant {
        &self.regular
    }

    pub fn bold(&self) -> &FontVariant {
        &self.bold
    }

    /// Whether a separate bold variant was supplied.
    pub fn has_bold(&self) -> bool {
        !Arc::ptr_eq(&self.regular, &self.bold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(texture: u32) -> FontVariantBuilder {
        FontVariant::builder(TextureId(texture))
            .atlas_size(256.0, 128.0)
            .line_height(1.2)
            .descender(-0.25)
    }

    #[test]
    fn test_build_and_lookup() {
        let font = variant(1)
            .glyph(' ', Glyph::new(0.25))
            .glyph(
                'A',
                Glyph::new(0.6)
                    .with_plane_bounds(Bounds::new(0.0, 0.6, 0.7, -0.05))
                    .with_atlas_bounds(Bounds::new(10.0, 20.0, 40.0, 28.0)),
            )
            .build()
            .unwrap();

        assert_eq!(font.glyph_count(), 2);
        assert_eq!(font.glyph('A').unwrap().advance, 0.6);
        assert!(font.glyph(' ').unwrap().plane_bounds.is_none());
        assert!(font.glyph('B').is_none());
        assert_eq!(font.texel_size(), Vec2::new(1.0 / 256.0, 1.0 / 128.0));
    }

    #[test]
    fn test_uv_rect_is_flipped() {
        let font = variant(1).build().unwrap();
        let uv = font.uv_rect(&Bounds::new(64.0, 128.0, 96.0, 32.0));

        assert_eq!(uv.left, 0.25);
        assert_eq!(uv.right, 0.5);
        assert_eq!(uv.top, 0.25);
        assert_eq!(uv.bottom, 0.75);
    }

    #[test]
    fn test_rejects_empty_atlas() {
        let err = FontVariant::builder(TextureId(1)).build().unwrap_err();
        assert_eq!(
            err,
            TextError::InvalidAtlasSize {
                width: 0.0,
                height: 0.0
            }
        );
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = variant(1)
            .glyph(
                'x',
                Glyph::new(0.5).with_plane_bounds(Bounds::new(0.0, 0.5, -0.1, 0.4)),
            )
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            TextError::InvalidGlyphBounds {
                codepoint: 'x' as u32,
                kind: GlyphBoundsKind::Plane
            }
        );

        let err = variant(1)
            .glyph(
                'y',
                Glyph::new(0.5).with_atlas_bounds(Bounds::new(9.0, 3.0, 4.0, 1.0)),
            )
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TextError::InvalidGlyphBounds {
                kind: GlyphBoundsKind::Atlas,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_non_finite_metric() {
        let err = variant(1).line_height(f32::INFINITY).build().unwrap_err();
        assert!(matches!(
            err,
            TextError::InvalidMetric {
                name: "line_height",
                ..
            }
        ));
    }

    #[test]
    fn test_pair_without_bold_resolves_to_regular() {
        let regular = Arc::new(variant(1).build().unwrap());
        let pair = FontPair::new(regular);

        assert!(!pair.has_bold());
        assert_eq!(pair.variant(VariantKind::Bold).texture(), TextureId(1));

        let pair = pair.with_bold(Arc::new(variant(2).build().unwrap()));
        assert!(pair.has_bold());
        assert_eq!(pair.variant(VariantKind::Bold).texture(), TextureId(2));
        assert_eq!(pair.variant(VariantKind::Regular).texture(), TextureId(1));
    }
}
