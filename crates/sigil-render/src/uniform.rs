//! Value-diffing shader uniforms.
//!
//! Every uniform remembers the last value it sent and only talks to the GPU
//! when a new value differs under exact (`==`) comparison. The cached value
//! starts at zero, which is what the GPU initialises uniforms to after link,
//! so writing zero to a fresh uniform issues nothing.

use glam::{Vec2, Vec4};
use sigil_test_utils::{GpuBackend, TextureId, TextureSampling, UniformLocation};

/// A value that can be written to a uniform slot.
pub trait UniformValue: Copy + PartialEq + Default {
    fn upload(backend: &dyn GpuBackend, location: UniformLocation, value: Self);
}

impl UniformValue for f32 {
    fn upload(backend: &dyn GpuBackend, location: UniformLocation, value: Self) {
        backend.set_uniform_f32(location, value);
    }
}

impl UniformValue for Vec2 {
    fn upload(backend: &dyn GpuBackend, location: UniformLocation, value: Self) {
        backend.set_uniform_vec2(location, value);
    }
}

impl UniformValue for Vec4 {
    fn upload(backend: &dyn GpuBackend, location: UniformLocation, value: Self) {
        backend.set_uniform_vec4(location, value);
    }
}

/// A cached uniform slot.
///
/// # Example
///
/// ```
/// use sigil_render::FloatUniform;
/// use sigil_test_utils::{MockGpu, UniformLocation};
///
/// let gpu = MockGpu::new();
/// let mut doffset = FloatUniform::new(Some(UniformLocation(0)));
///
/// assert!(doffset.set(&gpu, 0.32));
/// assert!(!doffset.set(&gpu, 0.32));
/// assert_eq!(gpu.count_uniform_writes(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Uniform<T> {
    location: Option<UniformLocation>,
    last_value: T,
}

/// Scalar uniform.
pub type FloatUniform = Uniform<f32>;
/// `vec2` uniform.
pub type Float2Uniform = Uniform<Vec2>;
/// `vec4` uniform.
pub type Float4Uniform = Uniform<Vec4>;

impl<T: UniformValue> Uniform<T> {
    /// Create a slot. A `None` location makes every write a GPU no-op.
    pub fn new(location: Option<UniformLocation>) -> Self {
        Self {
            location,
            last_value: T::default(),
        }
    }

    /// Write `value`, returning whether a GPU call was issued.
    pub fn set(&mut self, backend: &dyn GpuBackend, value: T) -> bool {
        if value == self.last_value {
            return false;
        }

        self.last_value = value;
        match self.location {
            Some(location) => {
                T::upload(backend, location, value);
                true
            }
            None => false,
        }
    }

    /// The value the GPU currently holds, as far as this slot knows.
    pub fn value(&self) -> T {
        self.last_value
    }

    pub fn location(&self) -> Option<UniformLocation> {
        self.location
    }
}

/// A sampler uniform bound to a fixed texture unit.
///
/// Changing the texture binds it on the sampler's unit and applies sampling
/// parameters, then restores whatever unit and binding were active before,
/// so code outside the engine that also binds textures is left undisturbed.
#[derive(Debug, Clone)]
pub struct SamplerUniform {
    location: Option<UniformLocation>,
    unit: u32,
    texture: Option<TextureId>,
}

impl SamplerUniform {
    /// Texture unit all font samplers use.
    pub const DEFAULT_UNIT: u32 = 0;

    /// Create the slot and point it at [`Self::DEFAULT_UNIT`].
    ///
    /// The owning program must be in use.
    pub fn new(backend: &dyn GpuBackend, location: Option<UniformLocation>) -> Self {
        let unit = Self::DEFAULT_UNIT;
        if let Some(location) = location {
            backend.set_uniform_sampler(location, unit);
        }
        Self {
            location,
            unit,
            texture: None,
        }
    }

    /// Switch to `texture`, returning whether any GPU state was touched.
    pub fn set_texture(
        &mut self,
        backend: &dyn GpuBackend,
        texture: TextureId,
        sampling: &TextureSampling,
    ) -> bool {
        if self.texture == Some(texture) {
            return false;
        }
        self.texture = Some(texture);

        let previous_unit = backend.active_texture_unit();
        let previous_texture = backend.bound_texture();

        backend.set_active_texture_unit(self.unit);
        backend.bind_texture(Some(texture));
        backend.set_texture_sampling(sampling);

        backend.set_active_texture_unit(previous_unit);
        backend.bind_texture(previous_texture);
        true
    }

    /// The texture this sampler was last pointed at.
    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    pub fn unit(&self) -> u32 {
        self.unit
    }

    pub fn location(&self) -> Option<UniformLocation> {
        self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_test_utils::{GpuCall, MockGpu};

    #[test]
    fn test_zero_is_the_initial_value() {
        let gpu = MockGpu::new();
        let mut hint = FloatUniform::new(Some(UniformLocation(2)));

        assert!(!hint.set(&gpu, 0.0));
        assert_eq!(gpu.call_count(), 0);
    }

    #[test]
    fn test_only_changes_are_uploaded() {
        let gpu = MockGpu::new();
        let mut texel = Float2Uniform::new(Some(UniformLocation(1)));

        assert!(texel.set(&gpu, Vec2::new(1.0 / 512.0, 1.0 / 256.0)));
        assert!(!texel.set(&gpu, Vec2::new(1.0 / 512.0, 1.0 / 256.0)));
        assert!(texel.set(&gpu, Vec2::new(1.0 / 256.0, 1.0 / 256.0)));

        assert_eq!(gpu.count_uniform_writes(), 2);
        assert_eq!(texel.value(), Vec2::new(1.0 / 256.0, 1.0 / 256.0));
    }

    #[test]
    fn test_any_component_change_uploads_vec4() {
        let gpu = MockGpu::new();
        let mut color = Float4Uniform::new(Some(UniformLocation(0)));

        color.set(&gpu, Vec4::new(1.0, 1.0, 1.0, 1.0));
        color.set(&gpu, Vec4::new(1.0, 1.0, 0.5, 1.0));
        color.set(&gpu, Vec4::new(1.0, 1.0, 0.5, 1.0));

        assert_eq!(gpu.count_uniform_writes(), 2);
    }

    #[test]
    fn test_missing_location_caches_without_gpu_call() {
        let gpu = MockGpu::new();
        let mut doffset = FloatUniform::new(None);

        assert!(!doffset.set(&gpu, 0.5));
        assert_eq!(doffset.value(), 0.5);
        assert_eq!(gpu.call_count(), 0);
    }

    #[test]
    fn test_sampler_points_at_unit_on_creation() {
        let gpu = MockGpu::new();
        let sampler = SamplerUniform::new(&gpu, Some(UniformLocation(5)));

        assert_eq!(
            gpu.calls(),
            vec![GpuCall::SetSampler {
                location: UniformLocation(5),
                unit: 0
            }]
        );
        assert_eq!(sampler.texture(), None);
    }

    #[test]
    fn test_sampler_restores_previous_binding() {
        let gpu = MockGpu::new();
        let mut sampler = SamplerUniform::new(&gpu, Some(UniformLocation(0)));

        // Host state: unit 3 active with its own texture.
        gpu.set_active_texture_unit(3);
        gpu.bind_texture(Some(TextureId(42)));
        gpu.clear_calls();

        assert!(sampler.set_texture(&gpu, TextureId(7), &TextureSampling::SDF));

        assert_eq!(
            gpu.calls(),
            vec![
                GpuCall::ActiveTexture { unit: 0 },
                GpuCall::BindTexture {
                    unit: 0,
                    texture: Some(TextureId(7))
                },
                GpuCall::TextureSampling {
                    texture: Some(TextureId(7)),
                    sampling: TextureSampling::SDF
                },
                GpuCall::ActiveTexture { unit: 3 },
                GpuCall::BindTexture {
                    unit: 3,
                    texture: Some(TextureId(42))
                },
            ]
        );
        assert_eq!(gpu.active_texture_unit(), 3);
        assert_eq!(gpu.bound_texture(), Some(TextureId(42)));
    }

    #[test]
    fn test_sampler_skips_same_texture() {
        let gpu = MockGpu::new();
        let mut sampler = SamplerUniform::new(&gpu, Some(UniformLocation(0)));

        assert!(sampler.set_texture(&gpu, TextureId(7), &TextureSampling::SDF));
        gpu.clear_calls();

        assert!(!sampler.set_texture(&gpu, TextureId(7), &TextureSampling::SDF));
        assert_eq!(gpu.call_count(), 0);
        assert_eq!(sampler.texture(), Some(TextureId(7)));
    }
}
