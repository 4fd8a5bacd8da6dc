//! Traits abstracting the GPU operations the text engine performs.
//!
//! [`GpuBackend`] covers program and uniform state, [`QuadSink`] is the
//! external primitive that turns one textured quad into a draw.

use glam::{Mat4, Vec2, Vec4};

use crate::gpu_types::*;

/// Trait abstracting shader program, uniform and texture state.
///
/// # Borrow Checking Pattern
///
/// Methods take `&self` (shared reference). This allows:
/// - One backend to be shared by the shader handle and the host (via `Arc`)
/// - Mock implementations to use interior mutability (`Mutex`)
/// - No lifetime parameters propagating through the engine
///
/// # Example
///
/// ```rust,no_run
/// use sigil_test_utils::{GpuBackend, ProgramId};
///
/// fn soften_edges(gpu: &dyn GpuBackend, program: ProgramId, size: f32) {
///     gpu.use_program(Some(program));
///     if let Some(location) = gpu.uniform_location(program, "doffset") {
///         gpu.set_uniform_f32(location, 3.5 / size);
///     }
///     gpu.use_program(None);
/// }
/// ```
pub trait GpuBackend: Send + Sync {
    // Program operations

    /// Look up a uniform by name. `None` if the program has no such active uniform.
    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    /// Make `program` current, or unbind with `None`.
    fn use_program(&self, program: Option<ProgramId>);

    // Uniform operations

    /// Write a scalar uniform of the current program.
    fn set_uniform_f32(&self, location: UniformLocation, value: f32);

    /// Write a 2-vector uniform of the current program.
    fn set_uniform_vec2(&self, location: UniformLocation, value: Vec2);

    /// Write a 4-vector uniform of the current program.
    fn set_uniform_vec4(&self, location: UniformLocation, value: Vec4);

    /// Point a sampler uniform at a texture unit.
    fn set_uniform_sampler(&self, location: UniformLocation, unit: u32);

    // Texture operations

    /// The currently active texture unit.
    fn active_texture_unit(&self) -> u32;

    /// Select the texture unit subsequent binds apply to.
    fn set_active_texture_unit(&self, unit: u32);

    /// The 2D texture bound to the active unit.
    fn bound_texture(&self) -> Option<TextureId>;

    /// Bind a 2D texture to the active unit.
    fn bind_texture(&self, texture: Option<TextureId>);

    /// Apply filtering and wrapping to the texture bound on the active unit.
    fn set_texture_sampling(&self, sampling: &TextureSampling);
}

/// The external draw primitive: submits one textured quad with the current program.
///
/// `transform` is the model-view matrix in effect at submission time; the
/// quad's positions are in untransformed pixel space.
pub trait QuadSink {
    fn submit_quad(&self, transform: &Mat4, quad: &TexturedQuad);
}
