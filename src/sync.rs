//! # Synchronization Utilities
//!
//! Mutex access for the crate's two pieces of shared state: the color-parse
//! cache and the [`LegacyLogger`](crate::logging::LegacyLogger) sink.
//!
//! A std mutex becomes poisoned when a thread panics while holding it. Both
//! guarded values stay valid after a panic (a cache entry is either present or
//! not, a sink is just a writer), so every lock in the crate recovers the inner
//! value instead of propagating the poison.
//!
//! | Scenario | Function |
//! |----------|----------|
//! | Library code | [`lock_recover`] |
//! | Lock whose poisoning should be reported | [`lock_recover_debug`] |
//! | Test code | `.lock().unwrap()` |
//!
//! ```rust
//! use std::sync::Mutex;
//! use rgb_text::sync::lock_recover;
//!
//! let data = Mutex::new(vec![1, 2, 3]);
//! let guard = lock_recover(&data);
//! assert_eq!(guard.len(), 3);
//! ```

use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, recovering from poison if necessary.
///
/// # Panics
///
/// This function never panics. It always recovers from poison.
#[inline]
pub fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Lock a mutex, reporting poison recovery in debug builds.
///
/// `context` names the call site (e.g. `"LegacyLogger sink"`). The report goes
/// to stderr rather than through `log`, since the logger itself may be the
/// caller.
#[inline]
pub fn lock_recover_debug<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|e| {
        #[cfg(debug_assertions)]
        eprintln!("[rgb_text::sync] mutex poison recovered at: {context}");
        #[cfg(not(debug_assertions))]
        let _ = context;
        e.into_inner()
    })
}
