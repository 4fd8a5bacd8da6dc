//! Opaque GPU handles and the vertex layout shared with the draw primitive.
//!
//! The engine only ever receives these handles from the host; it never
//! creates programs or textures itself.

use static_assertions::const_assert_eq;

/// Handle to a compiled and linked shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

/// Handle to an uploaded texture (an MSDF atlas page).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Location of a named uniform inside a [`ProgramId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

/// Filtering and wrapping applied to a bound texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSampling {
    /// Minification filter
    pub min_filter: wgpu::FilterMode,
    /// Magnification filter
    pub mag_filter: wgpu::FilterMode,
    /// Address mode for U coordinate
    pub address_mode_u: wgpu::AddressMode,
    /// Address mode for V coordinate
    pub address_mode_v: wgpu::AddressMode,
}

impl TextureSampling {
    /// Linear filtering with clamped edges.
    ///
    /// Distance fields must be interpolated, and a glyph at the atlas border
    /// must not pick up texels from the opposite side.
    pub const SDF: Self = Self {
        min_filter: wgpu::FilterMode::Linear,
        mag_filter: wgpu::FilterMode::Linear,
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
    };

    /// Nearest filtering with repeating edges.
    pub const NEAREST_REPEAT: Self = Self {
        min_filter: wgpu::FilterMode::Nearest,
        mag_filter: wgpu::FilterMode::Nearest,
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
    };
}

impl Default for TextureSampling {
    fn default() -> Self {
        Self::SDF
    }
}

/// Vertex of a textured quad: pixel-space position plus texture coordinates.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

const_assert_eq!(std::mem::size_of::<QuadVertex>(), 16);

/// Texture coordinates of a quad, already normalized to `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UvRect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// An axis-aligned textured quad ready for submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexturedQuad {
    /// Texture the quad samples from.
    pub texture: Option<TextureId>,
    /// Bottom-left, bottom-right, top-right, top-left (screen space, Y down).
    pub vertices: [QuadVertex; 4],
}

impl TexturedQuad {
    /// Build a quad covering `x..x + width`, `y..y + height`.
    pub fn new(texture: Option<TextureId>, x: f32, y: f32, width: f32, height: f32, uv: UvRect) -> Self {
        Self {
            texture,
            vertices: [
                QuadVertex {
                    position: [x, y + height],
                    tex_coords: [uv.left, uv.bottom],
                },
                QuadVertex {
                    position: [x + width, y + height],
                    tex_coords: [uv.right, uv.bottom],
                },
                QuadVertex {
                    position: [x + width, y],
                    tex_coords: [uv.right, uv.top],
                },
                QuadVertex {
                    position: [x, y],
                    tex_coords: [uv.left, uv.top],
                },
            ],
        }
    }

    /// Top-left corner in pixel space.
    pub fn origin(&self) -> [f32; 2] {
        self.vertices[3].position
    }

    /// Width and height in pixels.
    pub fn size(&self) -> [f32; 2] {
        let [x0, y1] = self.vertices[0].position;
        let [x1, y0] = self.vertices[2].position;
        [x1 - x0, y1 - y0]
    }

    /// The vertices as raw bytes for a vertex buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
