//! Text extents without touching the GPU.

use sigil_core::profiling::profile_function;
use sigil_render::Color;

use crate::{
    config::RendererConfig,
    font::FontPair,
    format::{FormatTokens, StyleBaseline, StyleState, Token},
};

/// Measure `text` at `point_size`, returning `(width, height)` in pixels.
///
/// Width is the sum of pen advances; height is the tallest glyph's plane
/// extent. Directives are consumed exactly as a draw pass would, so bold
/// spans widen the result by the configured bold advance. Characters the
/// active variant has no glyph for contribute nothing.
///
/// Every directive runs through the full style machine, so a colour or
/// unrecognised code ends a bold span here just as it does when drawing.
pub fn measure(fonts: &FontPair, text: &str, point_size: f32, config: &RendererConfig) -> (f32, f32) {
    profile_function!();

    let size = point_size * config.point_scale;
    let mut state = StyleState::new(StyleBaseline::new(Color::WHITE, Color::WHITE, size));
    let mut width = 0.0f32;
    let mut height = 0.0f32;

    for token in FormatTokens::new(text, config.marker) {
        match token {
            Token::Directive(code) => state = state.apply(code),
            Token::Char(c) => {
                let Some(glyph) = fonts.variant(state.variant()).glyph(c) else {
                    continue;
                };
                if let Some(plane) = glyph.plane_bounds {
                    height = height.max(plane.height() * state.point_size());
                }
                width += glyph.advance * state.point_size() * config.advance_scale(state.is_bold());
            }
        }
    }

    (width, height)
}
