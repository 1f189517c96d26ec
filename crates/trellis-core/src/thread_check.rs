//! Dispatch-thread affinity checks.
//!
//! All widget mutation in Trellis happens on one dispatch thread: signals are
//! processed in arrival order and a hook runs to completion before the next
//! signal. Code that introduces worker threads must marshal widget mutation
//! back onto that thread. [`ThreadAffinity`] records the thread a window was
//! created on so dispatch can verify it.
//!
//! ```
//! use trellis_core::ThreadAffinity;
//!
//! let affinity = ThreadAffinity::current();
//! assert!(affinity.is_same_thread());
//! affinity.debug_assert_same_thread();
//! ```

use std::thread::ThreadId;

/// Records the thread an object was created on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Bind to the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// The thread ID this affinity is bound to.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check if the current thread matches this affinity.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Re-bind to the current thread.
    ///
    /// Used when ownership of a whole window moves to another thread, which
    /// then becomes its dispatch thread.
    pub fn rebind(&mut self) {
        self.thread_id = std::thread::current().id();
    }

    /// Assert that we are on the bound thread.
    ///
    /// # Panics
    ///
    /// Panics with a descriptive message if called from a different thread.
    #[inline]
    pub fn assert_same_thread(&self) {
        self.assert_same_thread_with_msg("widget state mutated off the dispatch thread")
    }

    /// Assert that we are on the bound thread, with a custom message.
    ///
    /// # Panics
    ///
    /// Panics if called from a different thread.
    pub fn assert_same_thread_with_msg(&self, msg: &str) {
        if !self.is_same_thread() {
            self.panic_wrong_thread(msg);
        }
    }

    /// Debug-only assertion that we are on the bound thread.
    ///
    /// This is a no-op in release builds.
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }

    #[cold]
    #[inline(never)]
    fn panic_wrong_thread(&self, msg: &str) -> ! {
        let current = std::thread::current();
        let current_name = current.name().unwrap_or("<unnamed>");
        panic!(
            "{msg}: bound to thread {:?}, called from \"{current_name}\" ({:?}). \
             Marshal widget mutation back onto the dispatch thread.",
            self.thread_id,
            current.id(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_thread_matches() {
        let affinity = ThreadAffinity::current();
        assert!(affinity.is_same_thread());
        assert_eq!(affinity.thread_id(), std::thread::current().id());
        affinity.assert_same_thread();
    }

    #[test]
    fn test_other_thread_does_not_match() {
        let affinity = ThreadAffinity::current();
        let same = std::thread::spawn(move || affinity.is_same_thread())
            .join()
            .unwrap();
        assert!(!same);
    }

    #[test]
    fn test_wrong_thread_panics() {
        let affinity = ThreadAffinity::current();
        let result = std::thread::spawn(move || affinity.assert_same_thread()).join();
        assert!(result.is_err());
    }

    #[test]
    fn test_rebind_moves_affinity() {
        let affinity = ThreadAffinity::current();
        let rebound = std::thread::spawn(move || {
            let mut affinity = affinity;
            affinity.rebind();
            affinity.is_same_thread()
        })
        .join()
        .unwrap();
        assert!(rebound);
    }
}
