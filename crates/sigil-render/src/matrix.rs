//! A model-view matrix stack for positioning text.

use glam::{Mat4, Vec3};

/// A stack of transforms. The top of the stack is applied to every quad
/// submitted while it is current.
///
/// ```
/// use sigil_render::MatrixStack;
///
/// let mut stack = MatrixStack::new();
/// stack.with_pushed(|stack| {
///     stack.translate(2.0, 3.0, 0.0);
///     assert_eq!(stack.current().w_axis.x, 2.0);
/// });
/// assert_eq!(stack.current(), sigil_core::math::Mat4::IDENTITY);
/// ```
#[derive(Debug, Clone)]
pub struct MatrixStack {
    stack: Vec<Mat4>,
}

impl MatrixStack {
    pub fn new() -> Self {
        Self::with_transform(Mat4::IDENTITY)
    }

    pub fn with_transform(transform: Mat4) -> Self {
        Self {
            stack: vec![transform],
        }
    }

    /// The transform currently in effect.
    pub fn current(&self) -> Mat4 {
        *self.stack.last().unwrap_or(&Mat4::IDENTITY)
    }

    /// Duplicate the top of the stack.
    pub fn push(&mut self) {
        self.stack.push(self.current());
    }

    /// Discard the top of the stack. The root transform is never popped.
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            tracing::warn!("MatrixStack::pop called on the root transform");
        }
    }

    /// Post-multiply the current transform by a translation.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        let top = self.top_mut();
        *top *= Mat4::from_translation(Vec3::new(x, y, z));
    }

    /// Post-multiply the current transform by a scale.
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        let top = self.top_mut();
        *top *= Mat4::from_scale(Vec3::new(x, y, z));
    }

    /// Run `f` with a pushed copy of the current transform, popping afterwards.
    pub fn with_pushed<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push();
        let result = f(self);
        self.pop();
        result
    }

    /// Number of transforms on the stack, including the root.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn top_mut(&mut self) -> &mut Mat4 {
        if self.stack.is_empty() {
            self.stack.push(Mat4::IDENTITY);
        }
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}
