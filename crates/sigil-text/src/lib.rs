//! Sigil Text - multi-style MSDF text rendering
//!
//! This crate lays out and draws strings containing inline `§` format
//! directives with a regular/bold pair of multi-channel signed distance
//! field fonts:
//! - Glyph metrics of pre-built MSDF atlases ([`FontVariant`], [`FontPair`])
//! - The directive grammar and style state machine ([`FormatTokens`], [`StyleState`])
//! - Measurement without GPU access ([`measure`])
//! - Pixel-snapped quad emission with drop shadows and obfuscated text ([`FontRenderer`])
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use sigil_render::{CompiledProgram, GpuBackend, MatrixStack, ProgramId, QuadSink, TextureId};
//! use sigil_text::{DrawTarget, DrawText, FontPair, FontRenderer, FontShaders, FontVariant};
//!
//! # fn run(gpu: Arc<dyn GpuBackend>, quads: &dyn QuadSink) -> sigil_text::TextResult<()> {
//! let regular = FontVariant::builder(TextureId(1)).atlas_size(512.0, 512.0).build()?;
//! let mut renderer = FontRenderer::new(FontPair::new(Arc::new(regular)));
//!
//! let mut shaders = FontShaders::new();
//! shaders.initialize(gpu, CompiledProgram::new(ProgramId(1)));
//!
//! let mut matrices = MatrixStack::new();
//! let mut target = DrawTarget::new(&mut matrices, quads);
//! renderer.draw(&mut shaders, &mut target, &DrawText::new("§eHello §lWorld").position(4.0, 4.0));
//!
//! let width = renderer.measure_width("§eHello §lWorld", 8.0);
//! # let _ = width;
//! # Ok(())
//! # }
//! ```
//!
//! ## Format directives
//!
//! | code | effect |
//! |------|--------|
//! | `0`-`9`, `a`-`f` | palette color, clears all other styling |
//! | `k` | obfuscated |
//! | `l` | bold (switches to the bold variant) |
//! | `m` | strikethrough |
//! | `n` | underline |
//! | `o` | italic |
//! | `r` and anything else | reset to the caller's color |

pub mod config;
pub mod error;
pub mod font;
pub mod format;
pub mod measure;
pub mod obfuscation;
pub mod renderer;
pub mod shader;
pub mod switcher;

pub use config::RendererConfig;
pub use error::{GlyphBoundsKind, TextError, TextResult};
pub use font::{AtlasInfo, Bounds, FontMetrics, FontPair, FontVariant, FontVariantBuilder, Glyph, VariantKind};
pub use format::{
    FormatCode, FormatTokens, PALETTE, SHADOW_PALETTE, StyleBaseline, StyleFlags, StyleState, Token, Transition,
};
pub use measure::measure;
pub use obfuscation::{ObfuscationClock, Obfuscator, string_hash, substitute};
pub use renderer::{DrawTarget, DrawText, FontRenderer};
pub use shader::{FontShader, FontShaders, FontUniforms};
pub use switcher::VariantSwitcher;

// Re-export the color type used throughout the public API.
pub use sigil_render::Color;
