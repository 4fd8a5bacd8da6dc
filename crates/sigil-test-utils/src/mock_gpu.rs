//! Mock implementation of [`GpuBackend`] and [`QuadSink`] for testing.
//!
//! This module provides a mock GPU that simulates program, texture-unit and
//! binding state and records every operation without touching a real device.

use std::collections::HashMap;

use glam::{Mat4, Vec2, Vec4};
use parking_lot::Mutex;

use crate::{gpu_backend::*, gpu_types::*};

/// Records a GPU operation for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum GpuCall {
    UseProgram {
        program: Option<ProgramId>,
    },
    SetFloat {
        location: UniformLocation,
        value: f32,
    },
    SetVec2 {
        location: UniformLocation,
        value: Vec2,
    },
    SetVec4 {
        location: UniformLocation,
        value: Vec4,
    },
    SetSampler {
        location: UniformLocation,
        unit: u32,
    },
    ActiveTexture {
        unit: u32,
    },
    BindTexture {
        unit: u32,
        texture: Option<TextureId>,
    },
    TextureSampling {
        texture: Option<TextureId>,
        sampling: TextureSampling,
    },
    SubmitQuad {
        transform: Mat4,
        quad: TexturedQuad,
    },
}

impl GpuCall {
    /// Whether this call writes a uniform value.
    pub fn is_uniform_write(&self) -> bool {
        matches!(
            self,
            GpuCall::SetFloat { .. }
                | GpuCall::SetVec2 { .. }
                | GpuCall::SetVec4 { .. }
                | GpuCall::SetSampler { .. }
        )
    }
}

/// A quad captured by the mock, together with the state it was drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedQuad {
    pub transform: Mat4,
    pub quad: TexturedQuad,
    /// Program current at submission.
    pub program: Option<ProgramId>,
}

impl SubmittedQuad {
    /// Top-left corner after applying the transform.
    pub fn world_origin(&self) -> Vec2 {
        let [x, y] = self.quad.origin();
        self.transform.transform_point3(glam::Vec3::new(x, y, 0.0)).truncate()
    }
}

#[derive(Debug, Default)]
struct MockState {
    program: Option<ProgramId>,
    active_unit: u32,
    bindings: HashMap<u32, TextureId>,
    locations: HashMap<String, UniformLocation>,
    values: HashMap<UniformLocation, GpuCall>,
}

/// Mock implementation of the GPU boundary for testing.
///
/// # Borrow Checking Pattern: Interior Mutability
///
/// Methods take `&self` but need to mutate internal state (record calls).
/// Solution: `parking_lot::Mutex` around the call log and simulated state,
/// which also keeps the mock `Send + Sync` as [`GpuBackend`] requires.
///
/// Uniform locations are handed out on first lookup, one per distinct name,
/// unless the name was registered with [`MockGpu::with_missing_uniform`].
///
/// # Example
///
/// ```rust
/// use sigil_test_utils::{GpuBackend, MockGpu, TextureId};
///
/// let gpu = MockGpu::new();
/// gpu.bind_texture(Some(TextureId(7)));
///
/// assert_eq!(gpu.bound_texture(), Some(TextureId(7)));
/// assert_eq!(gpu.count_texture_binds(), 1);
/// ```
pub struct MockGpu {
    /// Recorded calls for verification
    calls: Mutex<Vec<GpuCall>>,

    /// Simulated device state
    state: Mutex<MockState>,

    /// Uniform names the "linker" removed
    missing: Vec<String>,
}

impl MockGpu {
    /// Create a new mock GPU.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            state: Mutex::new(MockState::default()),
            missing: Vec::new(),
        }
    }

    /// Simulate a uniform that is absent from the linked program.
    pub fn with_missing_uniform(mut self, name: impl Into<String>) -> Self {
        self.missing.push(name.into());
        self
    }

    /// Location previously handed out for `name`, if any.
    pub fn location_of(&self, name: &str) -> Option<UniformLocation> {
        self.state.lock().locations.get(name).copied()
    }

    /// The last value written to the uniform called `name`.
    pub fn last_uniform_write(&self, name: &str) -> Option<GpuCall> {
        let state = self.state.lock();
        let location = state.locations.get(name)?;
        state.values.get(location).cloned()
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<GpuCall> {
        self.calls.lock().clone()
    }

    /// All submitted quads, in submission order.
    pub fn quads(&self) -> Vec<SubmittedQuad> {
        let mut program = None;
        let mut quads = Vec::new();
        for call in self.calls.lock().iter() {
            match call {
                GpuCall::UseProgram { program: p } => program = *p,
                GpuCall::SubmitQuad { transform, quad } => quads.push(SubmittedQuad {
                    transform: *transform,
                    quad: *quad,
                    program,
                }),
                _ => {}
            }
        }
        quads
    }

    /// Count uniform writes of any kind.
    pub fn count_uniform_writes(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.is_uniform_write())
            .count()
    }

    /// Count writes to one named uniform.
    pub fn count_writes_to(&self, name: &str) -> usize {
        let Some(location) = self.location_of(name) else {
            return 0;
        };
        self.calls
            .lock()
            .iter()
            .filter(|call| match call {
                GpuCall::SetFloat { location: l, .. }
                | GpuCall::SetVec2 { location: l, .. }
                | GpuCall::SetVec4 { location: l, .. }
                | GpuCall::SetSampler { location: l, .. } => *l == location,
                _ => false,
            })
            .count()
    }

    /// Count texture bind operations.
    pub fn count_texture_binds(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, GpuCall::BindTexture { .. }))
            .count()
    }

    /// Count sampling parameter changes.
    pub fn count_sampling_changes(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, GpuCall::TextureSampling { .. }))
            .count()
    }

    /// Count program binds and unbinds.
    pub fn count_program_changes(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, GpuCall::UseProgram { .. }))
            .count()
    }

    /// The program currently in use.
    pub fn current_program(&self) -> Option<ProgramId> {
        self.state.lock().program
    }

    /// Clear recorded calls (useful between test steps). Simulated state is kept.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn record(&self, call: GpuCall) {
        self.calls.lock().push(call);
    }

    fn record_uniform(&self, location: UniformLocation, call: GpuCall) {
        self.state.lock().values.insert(location, call.clone());
        self.record(call);
    }
}

impl Default for MockGpu {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuBackend for MockGpu {
    fn uniform_location(&self, _program: ProgramId, name: &str) -> Option<UniformLocation> {
        if self.missing.iter().any(|missing| missing == name) {
            return None;
        }
        let mut state = self.state.lock();
        let next = UniformLocation(state.locations.len() as i32);
        Some(*state.locations.entry(name.to_string()).or_insert(next))
    }

    fn use_program(&self, program: Option<ProgramId>) {
        self.state.lock().program = program;
        self.record(GpuCall::UseProgram { program });
    }

    fn set_uniform_f32(&self, location: UniformLocation, value: f32) {
        self.record_uniform(location, GpuCall::SetFloat { location, value });
    }

    fn set_uniform_vec2(&self, location: UniformLocation, value: Vec2) {
        self.record_uniform(location, GpuCall::SetVec2 { location, value });
    }

    fn set_uniform_vec4(&self, location: UniformLocation, value: Vec4) {
        self.record_uniform(location, GpuCall::SetVec4 { location, value });
    }

    fn set_uniform_sampler(&self, location: UniformLocation, unit: u32) {
        self.record_uniform(location, GpuCall::SetSampler { location, unit });
    }

    fn active_texture_unit(&self) -> u32 {
        self.state.lock().active_unit
    }

    fn set_active_texture_unit(&self, unit: u32) {
        self.state.lock().active_unit = unit;
        self.record(GpuCall::ActiveTexture { unit });
    }

    fn bound_texture(&self) -> Option<TextureId> {
        let state = self.state.lock();
        state.bindings.get(&state.active_unit).copied()
    }

    fn bind_texture(&self, texture: Option<TextureId>) {
        let unit = {
            let mut state = self.state.lock();
            let unit = state.active_unit;
            match texture {
                Some(texture) => state.bindings.insert(unit, texture),
                None => state.bindings.remove(&unit),
            };
            unit
        };
        self.record(GpuCall::BindTexture { unit, texture });
    }

    fn set_texture_sampling(&self, sampling: &TextureSampling) {
        let texture = self.bound_texture();
        self.record(GpuCall::TextureSampling {
            texture,
            sampling: *sampling,
        });
    }
}

impl QuadSink for MockGpu {
    fn submit_quad(&self, transform: &Mat4, quad: &TexturedQuad) {
        self.record(GpuCall::SubmitQuad {
            transform: *transform,
            quad: *quad,
        });
    }
}
