//! The MSDF font shader and its uniform slots.

use std::sync::Arc;

use sigil_render::{
    CompiledProgram, Float2Uniform, Float4Uniform, FloatUniform, GpuBackend, SamplerUniform, ShaderProgram,
};

/// Uniforms of the font shader, fetched once after the program links.
#[derive(Debug)]
pub struct FontUniforms {
    /// Atlas sampler.
    pub msdf: SamplerUniform,
    /// Edge softening term, `edge_softness / effective_size`.
    pub doffset: FloatUniform,
    pub hint_amount: FloatUniform,
    /// Size of one atlas texel in UV units.
    pub sdf_texel: Float2Uniform,
    /// Foreground color.
    pub fg_color: Float4Uniform,
}

/// A font shader program together with its uniforms.
///
/// An unusable program (failed upstream compilation) has no uniforms and
/// turns every draw into a no-op.
#[derive(Debug)]
pub struct FontShader {
    program: ShaderProgram,
    uniforms: Option<FontUniforms>,
}

impl FontShader {
    fn new(backend: Arc<dyn GpuBackend>, compiled: CompiledProgram) -> Self {
        let mut program = ShaderProgram::new(backend, compiled);
        if !program.is_usable() {
            tracing::error!("Failed to load font shader");
            return Self {
                program,
                uniforms: None,
            };
        }

        program.bind();
        let uniforms = FontUniforms {
            msdf: program.sampler_uniform("msdf"),
            doffset: program.float_uniform("doffset"),
            hint_amount: program.float_uniform("hint_amount"),
            sdf_texel: program.float2_uniform("sdf_texel"),
            fg_color: program.float4_uniform("fgColor"),
        };
        program.unbind();

        tracing::info!("Font shader initialized (program {:?})", program.id());
        Self {
            program,
            uniforms: Some(uniforms),
        }
    }

    pub fn is_usable(&self) -> bool {
        self.uniforms.is_some()
    }

    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    pub fn uniforms(&self) -> Option<&FontUniforms> {
        self.uniforms.as_ref()
    }

    pub(crate) fn parts_mut(&mut self) -> Option<(&ShaderProgram, &mut FontUniforms)> {
        let uniforms = self.uniforms.as_mut()?;
        Some((&self.program, uniforms))
    }
}

/// Lazily initialized home of the font shader.
///
/// Hold one per GPU context and pass it to every draw call.
///
/// ```
/// use std::sync::Arc;
///
/// use sigil_render::{CompiledProgram, ProgramId};
/// use sigil_test_utils::MockGpu;
/// use sigil_text::FontShaders;
///
/// let gpu = Arc::new(MockGpu::new());
/// let mut shaders = FontShaders::new();
/// shaders.initialize(gpu.clone(), CompiledProgram::new(ProgramId(1)));
/// shaders.initialize(gpu, CompiledProgram::new(ProgramId(2)));
///
/// assert_eq!(shaders.shader().unwrap().program().id(), Some(ProgramId(1)));
/// ```
#[derive(Debug, Default)]
pub struct FontShaders {
    shader: Option<FontShader>,
}

impl FontShaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set up the shader from an upstream-compiled program. Does nothing if
    /// already initialized, even when the earlier program was unusable.
    pub fn initialize(&mut self, backend: Arc<dyn GpuBackend>, program: CompiledProgram) -> &FontShader {
        if self.shader.is_some() {
            tracing::debug!("Font shader already initialized");
        }
        self.shader
            .get_or_insert_with(|| FontShader::new(backend, program))
    }

    pub fn is_initialized(&self) -> bool {
        self.shader.is_some()
    }

    /// Whether draws will do anything.
    pub fn is_usable(&self) -> bool {
        self.shader.as_ref().is_some_and(FontShader::is_usable)
    }

    pub fn shader(&self) -> Option<&FontShader> {
        self.shader.as_ref()
    }

    pub(crate) fn shader_mut(&mut self) -> Option<&mut FontShader> {
        self.shader.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use sigil_render::ProgramId;
    use sigil_test_utils::MockGpu;

    use super::*;

    #[test]
    fn test_uniforms_fetched_with_program_bound() {
        let gpu = Arc::new(MockGpu::new());
        let mut shaders = FontShaders::new();
        let shader = shaders.initialize(gpu.clone(), CompiledProgram::new(ProgramId(5)));

        assert!(shader.is_usable());
        for name in ["msdf", "doffset", "hint_amount", "sdf_texel", "fgColor"] {
            assert!(gpu.location_of(name).is_some(), "{} not looked up", name);
        }
        // Bound for the sampler setup, then released.
        assert_eq!(gpu.count_program_changes(), 2);
        assert_eq!(gpu.current_program(), None);
    }

    #[test]
    fn test_unusable_program_is_initialized_but_inert() {
        let gpu = Arc::new(MockGpu::new());
        let mut shaders = FontShaders::new();
        shaders.initialize(gpu.clone(), CompiledProgram::unusable());

        assert!(shaders.is_initialized());
        assert!(!shaders.is_usable());
        assert!(shaders.shader().unwrap().uniforms().is_none());
        assert_eq!(gpu.call_count(), 0);

        // A later, valid program does not replace it.
        shaders.initialize(gpu.clone(), CompiledProgram::new(ProgramId(1)));
        assert!(!shaders.is_usable());
        assert_eq!(gpu.call_count(), 0);
    }

    #[test]
    fn test_missing_uniform_is_tolerated() {
        let gpu = Arc::new(MockGpu::new().with_missing_uniform("hint_amount"));
        let mut shaders = FontShaders::new();
        let shader = shaders.initialize(gpu, CompiledProgram::new(ProgramId(1)));

        let uniforms = shader.uniforms().unwrap();
        assert!(uniforms.hint_amount.location().is_none());
        assert!(uniforms.doffset.location().is_some());
    }
}
