//! Compiled shader programs and their named uniforms.
//!
//! Compilation and linking happen upstream; this module receives the result
//! as a [`CompiledProgram`] and hands out cached uniform slots by name.

use std::sync::Arc;

use sigil_core::alloc::HashMap;
use sigil_test_utils::{GpuBackend, ProgramId, UniformLocation};

use crate::uniform::{Float2Uniform, Float4Uniform, FloatUniform, SamplerUniform};

/// Outcome of compiling and linking a program upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompiledProgram {
    id: Option<ProgramId>,
}

impl CompiledProgram {
    /// A program that linked successfully.
    pub fn new(id: ProgramId) -> Self {
        Self { id: Some(id) }
    }

    /// A program whose compilation or link failed.
    pub fn unusable() -> Self {
        Self { id: None }
    }

    pub fn id(&self) -> Option<ProgramId> {
        self.id
    }

    pub fn is_usable(&self) -> bool {
        self.id.is_some()
    }
}

/// A program bound to the backend it lives on.
pub struct ShaderProgram {
    backend: Arc<dyn GpuBackend>,
    program: CompiledProgram,
    locations: HashMap<String, Option<UniformLocation>>,
}

impl ShaderProgram {
    pub fn new(backend: Arc<dyn GpuBackend>, program: CompiledProgram) -> Self {
        Self {
            backend,
            program,
            locations: HashMap::new(),
        }
    }

    pub fn backend(&self) -> &dyn GpuBackend {
        self.backend.as_ref()
    }

    pub fn is_usable(&self) -> bool {
        self.program.is_usable()
    }

    pub fn id(&self) -> Option<ProgramId> {
        self.program.id()
    }

    /// Make the program current. Binding an unusable program does nothing.
    pub fn bind(&self) {
        match self.program.id() {
            Some(id) => self.backend.use_program(Some(id)),
            None => tracing::warn!("Attempted to bind an unusable shader program"),
        }
    }

    pub fn unbind(&self) {
        self.backend.use_program(None);
    }

    /// Look up (and memoise) a uniform location.
    pub fn uniform_location(&mut self, name: &str) -> Option<UniformLocation> {
        if let Some(location) = self.locations.get(name) {
            return *location;
        }

        let location = self
            .program
            .id()
            .and_then(|id| self.backend.uniform_location(id, name));
        if location.is_none() {
            tracing::warn!("Uniform '{}' not found in shader program", name);
        }
        self.locations.insert(name.to_string(), location);
        location
    }

    pub fn float_uniform(&mut self, name: &str) -> FloatUniform {
        FloatUniform::new(self.uniform_location(name))
    }

    pub fn float2_uniform(&mut self, name: &str) -> Float2Uniform {
        Float2Uniform::new(self.uniform_location(name))
    }

    pub fn float4_uniform(&mut self, name: &str) -> Float4Uniform {
        Float4Uniform::new(self.uniform_location(name))
    }

    /// Create a sampler uniform. The program must be bound.
    pub fn sampler_uniform(&mut self, name: &str) -> SamplerUniform {
        let location = self.uniform_location(name);
        SamplerUniform::new(self.backend.as_ref(), location)
    }
}

impl std::fmt::Debug for ShaderProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("program", &self.program)
            .field("locations", &self.locations.len())
            .finish()
    }
}
