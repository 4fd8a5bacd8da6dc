//! Format Codes Example
//!
//! Draws a few formatted strings into the recording mock GPU and logs what
//! the engine submitted:
//! - palette colors and their shadow colors
//! - the bold variant switch and its wider advance
//! - obfuscated text reshuffling as the clock advances
//!
//! ## Usage
//! ```bash
//! RUST_LOG=debug cargo run -p sigil-text --example format_codes
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use sigil_core::logging;
use sigil_render::{CompiledProgram, MatrixStack, ProgramId, TextureId, gui_scale_factor};
use sigil_test_utils::{GpuCall, MockGpu};
use sigil_text::{Bounds, DrawTarget, DrawText, FontPair, FontRenderer, FontShaders, FontVariant, Glyph, TextResult};

fn demo_font(texture: TextureId) -> TextResult<FontVariant> {
    let glyphs = ('!'..='~').enumerate().map(|(i, c)| {
        let left = (i % 16) as f32 * 16.0;
        let bottom = (i / 16) as f32 * 16.0;
        let glyph = Glyph::new(0.55)
            .with_plane_bounds(Bounds::new(0.0, 0.5, 0.72, -0.16))
            .with_atlas_bounds(Bounds::new(left, left + 15.0, bottom + 15.0, bottom));
        (c, glyph)
    });

    FontVariant::builder(texture)
        .atlas_size(256.0, 128.0)
        .line_height(1.2)
        .descender(-0.25)
        .base_char_height(6.0)
        .shadow_height(1.0)
        .below_line_height(2.0)
        .glyphs(glyphs)
        .glyph(' ', Glyph::new(0.3))
        .build()
}

fn main() -> TextResult<()> {
    logging::init();

    let fonts = FontPair::new(Arc::new(demo_font(TextureId(1))?)).with_bold(Arc::new(demo_font(TextureId(2))?));
    let mut renderer = FontRenderer::new(fonts);

    let gpu = Arc::new(MockGpu::new());
    let mut shaders = FontShaders::new();
    shaders.initialize(gpu.clone(), CompiledProgram::new(ProgramId(1)));

    let scale_factor = gui_scale_factor(3840, Some(1920)) as f32;
    let mut matrices = MatrixStack::new();

    let lines = [
        "Plain text",
        "§6Gold §cRed §9Blue§r back to white",
        "Regular §lBold§r Regular",
        "Secret: §k1234 abcd",
    ];

    let start = Instant::now();
    for (row, line) in lines.iter().enumerate() {
        gpu.clear_calls();
        let (width, height) = renderer.measure(line, 8.0);

        let mut target = DrawTarget::new(&mut matrices, gpu.as_ref()).scale_factor(scale_factor);
        let text = DrawText::new(line).position(4.0, 4.0 + row as f32 * renderer.line_height(10.0));
        renderer.draw_at(&mut shaders, &mut target, &text, start + Duration::from_millis(60 * row as u64));

        let colors = gpu
            .calls()
            .iter()
            .filter(|call| matches!(call, GpuCall::SetVec4 { .. }))
            .count();
        tracing::info!(
            "{:?}: {:.2}x{:.2}, {} quads, {} color changes, {} texture binds",
            line,
            width,
            height,
            gpu.quads().len(),
            colors,
            gpu.count_texture_binds()
        );
    }

    tracing::info!("obfuscation counter: {}", renderer.clock().counter());
    Ok(())
}
