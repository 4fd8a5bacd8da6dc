//! Fixture fonts shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use sigil_render::{CompiledProgram, ProgramId, TextureId};
use sigil_test_utils::MockGpu;
use sigil_text::{Bounds, FontPair, FontShaders, FontVariant, Glyph};

pub const ATLAS_WIDTH: f32 = 512.0;
pub const CELL: f32 = 8.0;
pub const REGULAR_TEXTURE: TextureId = TextureId(1);
pub const BOLD_TEXTURE: TextureId = TextureId(2);

/// Characters with a drawable glyph, in atlas cell order.
pub fn charset() -> Vec<char> {
    ('A'..='Z').chain('a'..='z').chain('0'..='9').chain(['!']).collect()
}

/// A variant where every drawable glyph advances 0.6 EM and owns one
/// 8px atlas cell, so the character can be recovered from a quad's UVs.
pub fn variant(texture: TextureId) -> FontVariant {
    variant_with_advances(texture, |_| 0.6)
}

/// Advance of the glyph in atlas cell `index` for [`uneven_advances`].
pub fn uneven_advance(index: usize) -> f32 {
    0.2 + 0.02 * index as f32
}

/// A regular-only pair whose glyphs all advance by different amounts.
pub fn uneven_advances() -> FontPair {
    FontPair::new(Arc::new(variant_with_advances(REGULAR_TEXTURE, uneven_advance)))
}

pub fn variant_with_advances(texture: TextureId, advance: impl Fn(usize) -> f32) -> FontVariant {
    let glyphs = charset().into_iter().enumerate().map(|(i, c)| {
        let left = i as f32 * CELL;
        let glyph = Glyph::new(advance(i))
            .with_plane_bounds(Bounds::new(0.0, 0.5, 0.7, -0.1))
            .with_atlas_bounds(Bounds::new(left, left + CELL, 16.0, 0.0));
        (c, glyph)
    });

    FontVariant::builder(texture)
        .atlas_size(ATLAS_WIDTH, 16.0)
        .line_height(1.2)
        .descender(-0.25)
        .base_char_height(7.0)
        .shadow_height(1.0)
        .below_line_height(2.0)
        .glyphs(glyphs)
        .glyph(' ', Glyph::new(0.25))
        .build()
        .expect("fixture font is valid")
}

pub fn regular_only() -> FontPair {
    FontPair::new(Arc::new(variant(REGULAR_TEXTURE)))
}

pub fn with_bold() -> FontPair {
    regular_only().with_bold(Arc::new(variant(BOLD_TEXTURE)))
}

pub fn usable_shaders(gpu: &Arc<MockGpu>) -> FontShaders {
    let mut shaders = FontShaders::new();
    shaders.initialize(gpu.clone(), CompiledProgram::new(ProgramId(1)));
    gpu.clear_calls();
    shaders
}

/// The character whose atlas cell a UV left edge points at.
pub fn char_at_uv(left: f32) -> char {
    charset()[cell_at_uv(left)]
}

/// The atlas cell index a UV left edge points at.
pub fn cell_at_uv(left: f32) -> usize {
    (left * ATLAS_WIDTH / CELL).round() as usize
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
