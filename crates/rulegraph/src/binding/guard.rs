//! Re-entrancy guard for property writes

use std::cell::Cell;

/// Flag marking a `set_value` call in progress.
///
/// A write arriving while the flag is raised is a re-entrant call caused by
/// the write itself (typically through a bond cycle) and must be dropped.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    active: Cell<bool>,
}

impl ReentrancyGuard {
    /// Creates a lowered guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag, or returns `None` when it is already raised.
    ///
    /// The flag is lowered when the returned token is dropped, including
    /// during unwinding.
    pub fn enter(&self) -> Option<GuardToken<'_>> {
        if self.active.replace(true) {
            None
        } else {
            Some(GuardToken { guard: self })
        }
    }

    /// Returns `true` while a guarded call is in progress.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

/// Lowers its [`ReentrancyGuard`] when dropped.
#[must_use = "the guard is lowered as soon as the token is dropped"]
pub struct GuardToken<'a> {
    guard: &'a ReentrancyGuard,
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        self.guard.active.set(false);
    }
}
