//! Drawing formatted text as MSDF glyph quads.

use std::time::Instant;

use sigil_core::profiling::profile_function;
use sigil_render::{Color, MatrixStack, QuadSink, TexturedQuad};

use crate::{
    config::RendererConfig,
    font::{FontPair, VariantKind},
    format::{FormatTokens, StyleBaseline, StyleState, Token},
    measure::measure,
    obfuscation::{ObfuscationClock, Obfuscator, string_hash},
    shader::{FontShader, FontShaders},
    switcher::VariantSwitcher,
};

/// A single draw request.
///
/// ```
/// use sigil_render::Color;
/// use sigil_text::DrawText;
///
/// let text = DrawText::new("§6Gold §lBold")
///     .position(10.0, 20.0)
///     .size(12.0)
///     .color(Color::WHITE)
///     .shadow(false);
/// assert_eq!(text.text(), "§6Gold §lBold");
/// ```
#[derive(Debug, Clone)]
pub struct DrawText<'a> {
    text: &'a str,
    x: f32,
    y: f32,
    size: f32,
    scale: f32,
    color: Color,
    shadow: bool,
    shadow_color: Option<Color>,
}

impl<'a> DrawText<'a> {
    /// White text at the origin, point size 8, scale 1, with a drop shadow.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            x: 0.0,
            y: 0.0,
            size: 8.0,
            scale: 1.0,
            color: Color::WHITE,
            shadow: true,
            shadow_color: None,
        }
    }

    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the point size.
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    /// Use `color` for the shadow instead of darkening the text color.
    pub fn shadow_color(mut self, color: Color) -> Self {
        self.shadow_color = Some(color);
        self
    }

    pub fn text(&self) -> &'a str {
        self.text
    }
}

/// Where a draw goes: the transform stack and the quad primitive.
pub struct DrawTarget<'a> {
    pub matrices: &'a mut MatrixStack,
    pub quads: &'a dyn QuadSink,
    /// Physical pixels per logical unit; baselines snap to this grid.
    pub scale_factor: f32,
}

impl<'a> DrawTarget<'a> {
    pub fn new(matrices: &'a mut MatrixStack, quads: &'a dyn QuadSink) -> Self {
        Self {
            matrices,
            quads,
            scale_factor: 1.0,
        }
    }

    pub fn scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    fn snap(&self, value: f32) -> f32 {
        let factor = if self.scale_factor > 0.0 && self.scale_factor.is_finite() {
            self.scale_factor
        } else {
            1.0
        };
        (value * factor).floor() / factor
    }
}

/// Renders `§`-formatted text with a regular/bold font pair.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use sigil_render::{CompiledProgram, MatrixStack, ProgramId, TextureId};
/// use sigil_test_utils::MockGpu;
/// use sigil_text::{Bounds, DrawTarget, DrawText, FontPair, FontRenderer, FontShaders, FontVariant, Glyph};
///
/// let font = FontVariant::builder(TextureId(1))
///     .atlas_size(64.0, 64.0)
///     .line_height(1.0)
///     .glyph(
///         'A',
///         Glyph::new(0.6)
///             .with_plane_bounds(Bounds::new(0.0, 0.6, 0.7, 0.0))
///             .with_atlas_bounds(Bounds::new(0.0, 8.0, 10.0, 0.0)),
///     )
///     .build()?;
/// let mut renderer = FontRenderer::new(FontPair::new(Arc::new(font)));
///
/// let gpu = Arc::new(MockGpu::new());
/// let mut shaders = FontShaders::new();
/// shaders.initialize(gpu.clone(), CompiledProgram::new(ProgramId(1)));
///
/// let mut matrices = MatrixStack::new();
/// let mut target = DrawTarget::new(&mut matrices, gpu.as_ref());
/// renderer.draw(&mut shaders, &mut target, &DrawText::new("AA"));
///
/// // Two glyphs, each drawn for the shadow and for the text.
/// assert_eq!(gpu.quads().len(), 4);
/// # Ok::<(), sigil_text::TextError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FontRenderer {
    fonts: FontPair,
    config: RendererConfig,
    clock: ObfuscationClock,
}

impl FontRenderer {
    pub fn new(fonts: FontPair) -> Self {
        let config = RendererConfig::default();
        Self {
            fonts,
            clock: ObfuscationClock::new(config.obfuscation_interval),
            config,
        }
    }

    pub fn with_config(mut self, config: RendererConfig) -> Self {
        self.clock.set_interval(config.obfuscation_interval);
        self.config = config;
        self
    }

    /// Replace the obfuscation clock, e.g. to pin the shuffle in tests.
    pub fn with_clock(mut self, mut clock: ObfuscationClock) -> Self {
        clock.set_interval(self.config.obfuscation_interval);
        self.clock = clock;
        self
    }

    pub fn fonts(&self) -> &FontPair {
        &self.fonts
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn clock(&self) -> &ObfuscationClock {
        &self.clock
    }

    /// `(width, height)` of `text` at `point_size`.
    pub fn measure(&self, text: &str, point_size: f32) -> (f32, f32) {
        measure(&self.fonts, text, point_size, &self.config)
    }

    pub fn measure_width(&self, text: &str, point_size: f32) -> f32 {
        self.measure(text, point_size).0
    }

    pub fn measure_height(&self, text: &str, point_size: f32) -> f32 {
        self.measure(text, point_size).1
    }

    /// Regular variant line height scaled to `point_size`.
    pub fn line_height(&self, point_size: f32) -> f32 {
        self.fonts.regular().metrics().line_height * point_size
    }

    pub fn baseline_height(&self) -> f32 {
        self.fonts.regular().atlas().base_char_height
    }

    pub fn shadow_height(&self) -> f32 {
        self.fonts.regular().atlas().shadow_height
    }

    pub fn below_line_height(&self) -> f32 {
        self.fonts.regular().atlas().below_line_height
    }

    /// Draw `text`, using the current time for the obfuscation shuffle.
    pub fn draw(&mut self, shaders: &mut FontShaders, target: &mut DrawTarget<'_>, text: &DrawText<'_>) {
        self.draw_at(shaders, target, text, Instant::now());
    }

    /// Draw `text` as of `now`.
    ///
    /// Does nothing until `shaders` holds a usable program.
    pub fn draw_at(&mut self, shaders: &mut FontShaders, target: &mut DrawTarget<'_>, text: &DrawText<'_>, now: Instant) {
        profile_function!();

        let Some(shader) = shaders.shader_mut().filter(|shader| shader.is_usable()) else {
            tracing::trace!("Skipping text draw: font shader not ready");
            return;
        };

        let size = self.config.effective_size(text.size, text.scale);
        let counter = self.clock.tick(now);
        let shadow_color = text.shadow_color.unwrap_or_else(|| text.color.shadow());
        let pass = EmissionPass {
            fonts: &self.fonts,
            config: &self.config,
            text: text.text,
            x: text.x,
            y: text.y - size * self.config.vertical_nudge,
            baseline: StyleBaseline::new(text.color, shadow_color, size),
            counter,
        };

        if text.shadow {
            let offset = self.config.shadow_offset(size);
            target.matrices.push();
            target.matrices.translate(offset, offset, 0.0);
            pass.emit(shader, target, true);
            target.matrices.pop();
        }

        pass.emit(shader, target, false);
    }
}

/// One walk over the string that submits glyph quads.
struct EmissionPass<'a> {
    fonts: &'a FontPair,
    config: &'a RendererConfig,
    text: &'a str,
    x: f32,
    y: f32,
    baseline: StyleBaseline,
    counter: u64,
}

impl EmissionPass<'_> {
    fn emit(&self, shader: &mut FontShader, target: &DrawTarget<'_>, shadow: bool) {
        profile_function!();

        let Some((program, uniforms)) = shader.parts_mut() else {
            return;
        };
        let backend = program.backend();
        program.bind();

        let mut state = StyleState::new(self.baseline);
        let mut switcher = VariantSwitcher::new();
        switcher.sync(VariantKind::Regular, self.fonts, uniforms, backend);
        uniforms
            .doffset
            .set(backend, self.config.edge_offset(state.point_size()));
        uniforms.hint_amount.set(backend, 0.0);

        let metrics = self.fonts.regular().metrics();
        let base_px = target.snap(self.y + (metrics.line_height + metrics.descender) * state.point_size());

        let mut obfuscator = Obfuscator::new(string_hash(self.text), self.counter);
        let mut pen_x = self.x;

        for token in FormatTokens::new(self.text, self.config.marker) {
            match token {
                Token::Directive(code) => {
                    let (next, transition) = state.step(code);
                    state = next;
                    if let Some(kind) = transition.variant {
                        switcher.activate(kind, self.fonts, uniforms, backend);
                    }
                    if transition.restores_size {
                        uniforms
                            .doffset
                            .set(backend, self.config.edge_offset(state.point_size()));
                        uniforms.hint_amount.set(backend, 0.0);
                    }
                }
                Token::Char(c) => {
                    let variant = self.fonts.variant(state.variant());
                    let Some(mut glyph) = variant.glyph(c) else {
                        continue;
                    };
                    if state.is_obfuscated() && c != ' ' {
                        if let Some(replacement) = variant.glyph(obfuscator.substitute(c)) {
                            glyph = replacement;
                        }
                    }

                    let size = state.point_size();
                    if let (Some(plane), Some(atlas)) = (glyph.plane_bounds, glyph.atlas_bounds) {
                        let quad = TexturedQuad::new(
                            Some(variant.texture()),
                            pen_x + plane.left * size,
                            base_px - plane.top * size,
                            plane.width() * size,
                            plane.height() * size,
                            variant.uv_rect(&atlas),
                        );
                        let color = state.draw_color(shadow).with_alpha(1.0);
                        uniforms.fg_color.set(backend, color.to_vec4());
                        target.quads.submit_quad(&target.matrices.current(), &quad);
                    }

                    pen_x += glyph.advance * size * self.config.advance_scale(state.is_bold());
                }
            }
        }

        program.unbind();
        switcher.finish();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sigil_render::{CompiledProgram, ProgramId, TextureId};
    use sigil_test_utils::MockGpu;

    use super::*;
    use crate::font::{Bounds, FontVariant, Glyph};

    fn renderer() -> FontRenderer {
        let font = FontVariant::builder(TextureId(1))
            .atlas_size(100.0, 100.0)
            .line_height(1.0)
            .descender(-0.2)
            .base_char_height(7.0)
            .shadow_height(1.0)
            .below_line_height(2.0)
            .glyph(
                'A',
                Glyph::new(0.5)
                    .with_plane_bounds(Bounds::new(0.0, 0.5, 0.75, 0.0))
                    .with_atlas_bounds(Bounds::new(10.0, 20.0, 50.0, 30.0)),
            )
            .glyph(' ', Glyph::new(0.25))
            .build()
            .unwrap();
        FontRenderer::new(FontPair::new(Arc::new(font)))
    }

    fn usable(gpu: &Arc<MockGpu>) -> FontShaders {
        let mut shaders = FontShaders::new();
        shaders.initialize(gpu.clone(), CompiledProgram::new(ProgramId(1)));
        shaders
    }

    #[test]
    fn test_accessors() {
        let renderer = renderer();
        assert_eq!(renderer.baseline_height(), 7.0);
        assert_eq!(renderer.shadow_height(), 1.0);
        assert_eq!(renderer.below_line_height(), 2.0);
        assert_eq!(renderer.line_height(12.0), 12.0);
    }

    #[test]
    fn test_quad_geometry() {
        let gpu = Arc::new(MockGpu::new());
        let mut shaders = usable(&gpu);
        let mut renderer = renderer().with_config(RendererConfig::new().point_scale(1.0));
        let mut matrices = MatrixStack::new();
        let mut target = DrawTarget::new(&mut matrices, gpu.as_ref());

        let text = DrawText::new("A A").position(5.0, 12.0).size(10.0).shadow(false);
        renderer.draw(&mut shaders, &mut target, &text);

        let quads = gpu.quads();
        assert_eq!(quads.len(), 2);

        // y = 12 - 10 * 0.2 = 10; baseline = 10 + (1.0 - 0.2) * 10 = 18
        let first = quads[0].quad;
        assert_eq!(first.origin(), [5.0, 18.0 - 7.5]);
        assert_eq!(first.size(), [5.0, 7.5]);
        assert_eq!(first.texture, Some(TextureId(1)));
        assert_eq!(first.vertices[0].tex_coords, [0.1, 0.7]);
        assert_eq!(first.vertices[2].tex_coords, [0.2, 0.5]);

        // Pen advanced by 'A' then ' '.
        assert_eq!(quads[1].quad.origin()[0], 5.0 + 5.0 + 2.5);
        assert!(quads.iter().all(|q| q.program == Some(ProgramId(1))));
        assert_eq!(gpu.current_program(), None);
    }

    #[test]
    fn test_baseline_snaps_to_scaled_pixels() {
        let gpu = Arc::new(MockGpu::new());
        let mut shaders = usable(&gpu);
        let mut renderer = renderer().with_config(RendererConfig::new().point_scale(1.0).vertical_nudge(0.0));
        let mut matrices = MatrixStack::new();
        let mut target = DrawTarget::new(&mut matrices, gpu.as_ref()).scale_factor(2.0);

        // baseline = 0.3 + 0.8 * 10 = 8.3 -> floor(16.6) / 2 = 8.0
        let text = DrawText::new("A").position(0.0, 0.3).size(10.0).shadow(false);
        renderer.draw(&mut shaders, &mut target, &text);

        assert_eq!(gpu.quads()[0].quad.origin()[1], 8.0 - 7.5);
    }

    #[test]
    fn test_foreground_alpha_is_opaque() {
        let gpu = Arc::new(MockGpu::new());
        let mut shaders = usable(&gpu);
        let mut renderer = renderer();
        let mut matrices = MatrixStack::new();
        let mut target = DrawTarget::new(&mut matrices, gpu.as_ref());

        let text = DrawText::new("A")
            .color(Color::rgba(1.0, 0.0, 0.0, 0.25))
            .shadow(false);
        renderer.draw(&mut shaders, &mut target, &text);

        let uniforms = shaders.shader().unwrap().uniforms().unwrap();
        assert_eq!(uniforms.fg_color.value(), glam::Vec4::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_shadow_override_is_used_as_is() {
        let gpu = Arc::new(MockGpu::new());
        let mut shaders = usable(&gpu);
        let mut renderer = renderer();
        let mut matrices = MatrixStack::new();
        let mut target = DrawTarget::new(&mut matrices, gpu.as_ref());

        let text = DrawText::new("A").shadow_color(Color::rgb(0.0, 0.0, 1.0));
        let location = gpu.location_of("fgColor").unwrap();
        renderer.draw(&mut shaders, &mut target, &text);

        let colors: Vec<_> = gpu
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                sigil_test_utils::GpuCall::SetVec4 { location: l, value } if l == location => Some(value),
                _ => None,
            })
            .collect();
        assert_eq!(
            colors,
            [glam::Vec4::new(0.0, 0.0, 1.0, 1.0), glam::Vec4::new(1.0, 1.0, 1.0, 1.0)]
        );
    }

    #[test]
    fn test_clock_ticks_once_per_draw() {
        let gpu = Arc::new(MockGpu::new());
        let mut shaders = usable(&gpu);
        let mut renderer = renderer();
        let mut matrices = MatrixStack::new();
        let mut target = DrawTarget::new(&mut matrices, gpu.as_ref());
        let start = Instant::now();

        let text = DrawText::new("A");
        renderer.draw_at(&mut shaders, &mut target, &text, start);
        renderer.draw_at(&mut shaders, &mut target, &text, start + std::time::Duration::from_millis(50));
        assert_eq!(renderer.clock().counter(), 1);
    }
}
