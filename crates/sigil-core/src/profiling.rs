//! Profiling utilities based on the `puffin` crate.
//!
//! Scopes are compiled in unconditionally and cost a single atomic load while
//! puffin is disabled. Hosts that want to inspect them call [`enable`] and
//! drive [`new_frame`] from their render loop.

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

/// Turn scope collection on or off.
pub fn enable(on: bool) {
    puffin::set_scopes_on(on);
    tracing::debug!("puffin scopes {}", if on { "enabled" } else { "disabled" });
}

/// Mark the start of a new frame for profiling.
///
/// Call this once per frame in your main loop to organize profiling data by frame.
///
/// # Example
/// ```no_run
/// use sigil_core::profiling::new_frame;
///
/// loop {
///     new_frame();
///     // ... draw text ...
/// }
/// ```
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}
