//! Sigil Render
//!
//! Low-level rendering pieces the text engine is built on:
//!
//! - [`Color`] with the drop-shadow darkening rule
//! - [`Uniform`] and [`SamplerUniform`], value-diffing uniform slots
//! - [`ShaderProgram`], a compiled program with memoised uniform lookups
//! - [`MatrixStack`], the model-view transform applied to submitted quads
//! - [`gui_scale_factor`], the display scale used for pixel snapping
//!
//! All GPU access goes through [`GpuBackend`] and [`QuadSink`], re-exported
//! from `sigil-test-utils`.

mod color;
mod matrix;
mod scale;
mod shader;
mod uniform;

pub use color::*;
pub use matrix::*;
pub use scale::*;
pub use shader::*;
pub use uniform::*;

// Re-export the GPU boundary so downstream crates need a single import path.
pub use sigil_test_utils::{
    GpuBackend, ProgramId, QuadSink, QuadVertex, TextureId, TextureSampling, TexturedQuad, UniformLocation, UvRect,
};
