//! GPU boundary and test utilities for the Sigil text engine.
//!
//! The text engine never talks to a graphics API directly. Everything it
//! needs from the GPU goes through two narrow traits defined here:
//!
//! - [`GpuBackend`] - program binding, uniform writes and texture state
//! - [`QuadSink`] - the "submit one textured quad" draw primitive
//!
//! plus the opaque handle types those traits pass around ([`ProgramId`],
//! [`TextureId`], [`UniformLocation`]) and the quad vertex layout.
//!
//! With the `mock` feature enabled, `MockGpu` implements both traits by
//! recording every call, which is how the engine's tests verify that no
//! redundant state change is ever issued.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use sigil_test_utils::{GpuBackend, MockGpu, ProgramId};
//!
//! let gpu = MockGpu::new();
//! let location = gpu.uniform_location(ProgramId(1), "doffset").unwrap();
//! gpu.set_uniform_f32(location, 0.25);
//!
//! assert_eq!(gpu.count_uniform_writes(), 1);
//! # }
//! ```
//!
//! # Design
//!
//! Both traits take `&self` and are object safe, so the engine can hold an
//! `Arc<dyn GpuBackend>` and the mock can record through interior
//! mutability (`parking_lot::Mutex`).

pub mod gpu_backend;
pub mod gpu_types;
#[cfg(feature = "mock")]
pub mod mock_gpu;

// Re-export main types at crate root
pub use gpu_backend::*;
pub use gpu_types::*;
#[cfg(feature = "mock")]
pub use mock_gpu::*;
