/// Fast mathematical operations using SIMD-accelerated `glam` types.
///
/// This module re-exports the [`glam`] types the engine works with. Pen
/// positions and offsets are plain `f32` scalars; vectors appear at the GPU
/// boundary (uniform values) and in the matrix stack.
///
/// # Examples
///
/// ```
/// use sigil_core::math::{Mat4, Vec3};
///
/// let shadow = Mat4::from_translation(Vec3::new(1.0, 1.0, 0.0));
/// assert_eq!(shadow.w_axis.x, 1.0);
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::*;
}

pub use fast::*;
