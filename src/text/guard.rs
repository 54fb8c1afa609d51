//! Scan reentrancy tracking.
//!
//! Every scan over a buffer (pattern matching, substitution, segment
//! iteration, collation search) holds a [`ScanToken`] for its duration.
//! While any token is alive, ordinary writes to that buffer fail with
//! [`Error::ConcurrentMutation`]. The only write allowed is the final commit
//! of the outermost scan, made through its own token.

use crate::error::{Error, Result};
use std::cell::Cell;

/// Per-buffer active scan depth.
#[derive(Debug, Default)]
pub struct MutationGuard {
    depth: Cell<u32>,
}

impl MutationGuard {
    /// A guard with no active scans.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scans currently running.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth.get()
    }

    /// Whether any scan is running.
    #[must_use]
    pub fn is_scanning(&self) -> bool {
        self.depth.get() > 0
    }

    /// Start a scan of the buffer at `version`.
    ///
    /// The depth is released when the token drops, on every exit path.
    pub fn enter(&self, version: u64) -> ScanToken<'_> {
        self.depth.set(self.depth.get() + 1);
        ScanToken {
            guard: self,
            version,
        }
    }

    /// Fail if a scan is running.
    pub fn assert_mutable(&self) -> Result<()> {
        if self.is_scanning() {
            tracing::warn!(depth = self.depth(), "rejected write during active scan");
            return Err(Error::ConcurrentMutation);
        }
        Ok(())
    }

    /// Whether `token` may commit: it must be this guard's outermost scan.
    pub(crate) fn can_commit(&self, token: &ScanToken<'_>) -> bool {
        std::ptr::eq(self, token.guard) && self.depth.get() == 1
    }
}

/// Lease on a buffer for the duration of one scan.
#[derive(Debug)]
#[must_use = "the scan ends as soon as the token is dropped"]
pub struct ScanToken<'a> {
    guard: &'a MutationGuard,
    version: u64,
}

impl ScanToken<'_> {
    /// Buffer version the scan started at.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl Drop for ScanToken<'_> {
    fn drop(&mut self) {
        self.guard.depth.set(self.guard.depth.get().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_and_exit() {
        let guard = MutationGuard::new();
        assert!(guard.assert_mutable().is_ok());
        {
            let _token = guard.enter(0);
            assert_eq!(guard.depth(), 1);
            assert_eq!(guard.assert_mutable(), Err(Error::ConcurrentMutation));
        }
        assert_eq!(guard.depth(), 0);
        assert!(guard.assert_mutable().is_ok());
    }

    #[test]
    fn test_nested_scans() {
        let guard = MutationGuard::new();
        let outer = guard.enter(0);
        let inner = guard.enter(0);
        assert_eq!(guard.depth(), 2);
        assert!(!guard.can_commit(&inner));
        drop(inner);
        assert!(guard.can_commit(&outer));
    }

    #[test]
    fn test_token_from_other_guard_cannot_commit() {
        let a = MutationGuard::new();
        let b = MutationGuard::new();
        let _ta = a.enter(0);
        let tb = b.enter(0);
        assert!(!a.can_commit(&tb));
    }

    #[test]
    fn test_release_on_unwind() {
        let guard = MutationGuard::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _token = guard.enter(0);
            panic!("callback failed");
        }));
        assert!(result.is_err());
        assert_eq!(guard.depth(), 0);
    }
}
