//! Sigil - multi-style MSDF text rendering
//!
//! Sigil draws strings containing inline `§` format codes with a pair of
//! multi-channel signed distance field fonts. It is split into:
//!
//! - **sigil-core**: logging bootstrap, math types, profiling scopes
//! - **sigil-test-utils**: the GPU boundary traits and the recording `MockGpu`
//! - **sigil-render**: colors, cached uniforms, shader handles, matrix stack
//! - **sigil-text**: font metrics, the format state machine, measurement and drawing
//!
//! # Quick Start
//!
//! ```ignore
//! use sigil::prelude::*;
//!
//! let fonts = FontPair::new(Arc::new(regular)).with_bold(Arc::new(bold));
//! let mut renderer = FontRenderer::new(fonts);
//!
//! let mut shaders = FontShaders::new();
//! shaders.initialize(backend, CompiledProgram::new(program_id));
//!
//! let mut target = DrawTarget::new(&mut matrices, &quad_sink).scale_factor(2.0);
//! renderer.draw(&mut shaders, &mut target, &DrawText::new("§6Gold §lBold").position(8.0, 8.0));
//! ```

pub use sigil_core as core;
pub use sigil_core::math;
pub use sigil_test_utils as gpu;

#[cfg(feature = "render")]
pub use sigil_render as render;

#[cfg(feature = "text")]
pub use sigil_text as text;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use sigil::prelude::*;
/// ```
pub mod prelude {
    pub use std::sync::Arc;

    // Core math types
    pub use sigil_core::math::{Mat4, Vec2, Vec3, Vec4};

    // GPU boundary
    pub use sigil_test_utils::{GpuBackend, ProgramId, QuadSink, TextureId};

    // Render types
    #[cfg(feature = "render")]
    pub use sigil_render::{Color, CompiledProgram, MatrixStack, gui_scale_factor};

    // Text types
    #[cfg(feature = "text")]
    pub use sigil_text::{
        Bounds, DrawTarget, DrawText, FontPair, FontRenderer, FontShaders, FontVariant, Glyph, RendererConfig,
        TextError, TextResult,
    };
}
