//! Scoped matrix context for presentation code
//!
//! Core operations always take a store or handle explicitly. Presentation
//! code deep inside a render pass (a per-slot presenter, say) can instead
//! look up the handle installed by the nearest enclosing [`provide`] call.
//! Looking it up outside any such scope is a programming error and fails
//! immediately with [`ContextError::Uninitialized`].

use std::cell::RefCell;

use thiserror::Error;

use super::handle::MatrixHandle;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("use_matrix must be called within a matrix provider scope")]
    Uninitialized,
}

thread_local! {
    static CURRENT: RefCell<Option<MatrixHandle>> = const { RefCell::new(None) };
}

/// Restores the previous handle when a scope ends, including on unwind
struct ScopeGuard {
    previous: Option<MatrixHandle>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|current| *current.borrow_mut() = previous);
    }
}

/// Runs `f` with `handle` installed as the current matrix
///
/// Scopes nest; the outer handle is visible again once `f` returns.
pub fn provide<R>(handle: MatrixHandle, f: impl FnOnce() -> R) -> R {
    let previous = CURRENT.with(|current| current.borrow_mut().replace(handle));
    let _guard = ScopeGuard { previous };
    f()
}

/// Returns the handle installed by the enclosing [`provide`] scope
pub fn use_matrix() -> Result<MatrixHandle, ContextError> {
    CURRENT.with(|current| current.borrow().clone().ok_or(ContextError::Uninitialized))
}

/// Returns true inside a [`provide`] scope
pub fn is_provided() -> bool {
    CURRENT.with(|current| current.borrow().is_some())
}
