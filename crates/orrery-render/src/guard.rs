//! Scoped render-state changes.

use std::ops::{Deref, DerefMut};

use crate::backend::RenderBackend;
use crate::state::RenderState;

/// Applies a state change on creation and restores the previous state when
/// dropped, including on `?` early returns and unwinding.
///
/// The guard derefs to the backend, so draws go through it directly:
///
/// ```ignore
/// let mut pass = backend.scoped_state(|s| s.blend = BlendMode::Alpha);
/// pass.draw(cmd)?;
/// // previous blend mode is back here
/// ```
pub struct StateGuard<'a, B: RenderBackend + ?Sized> {
    backend: &'a mut B,
    saved: RenderState,
}

impl<'a, B: RenderBackend + ?Sized> StateGuard<'a, B> {
    pub fn new(backend: &'a mut B, change: impl FnOnce(&mut RenderState)) -> Self {
        let saved = backend.state();
        let mut next = saved;
        change(&mut next);
        backend.set_state(next);
        Self { backend, saved }
    }

    /// The state that will be restored on drop.
    pub fn saved(&self) -> RenderState {
        self.saved
    }
}

impl<B: RenderBackend + ?Sized> Deref for StateGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.backend
    }
}

impl<B: RenderBackend + ?Sized> DerefMut for StateGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.backend
    }
}

impl<B: RenderBackend + ?Sized> Drop for StateGuard<'_, B> {
    fn drop(&mut self) {
        self.backend.set_state(self.saved);
    }
}

/// `backend.scoped_state(...)` sugar for [`StateGuard::new`].
pub trait ScopedState: RenderBackend {
    fn scoped_state(&mut self, change: impl FnOnce(&mut RenderState)) -> StateGuard<'_, Self> {
        StateGuard::new(self, change)
    }
}

impl<B: RenderBackend + ?Sized> ScopedState for B {}
