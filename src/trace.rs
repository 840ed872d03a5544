//! Structured tracing for directory listings.
//!
//! Events are emitted under the `fastdir::readdir` target when the `tracing` feature is
//! enabled. Without the feature every hook is an inline no-op, so the listing code calls
//! them unconditionally.

#[cfg(feature = "tracing")]
const READDIR_TARGET: &str = "fastdir::readdir";

use crate::{Op, Strategy};
use std::path::Path;

/// An `EINTR` was returned and the operation is being retried.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_interrupted(op: Op, path: &Path) {
    tracing::debug!(
        target: READDIR_TARGET,
        op = %op,
        path = %path.display(),
        "interrupted"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_interrupted(_op: Op, _path: &Path) {}

/// A record with a zero inode was skipped.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_tombstone(path: &Path) {
    tracing::trace!(target: READDIR_TARGET, path = %path.display(), "tombstone");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_tombstone(_path: &Path) {}

/// A listing completed.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_listed(path: &Path, strategy: Strategy, entries: usize) {
    tracing::trace!(
        target: READDIR_TARGET,
        path = %path.display(),
        strategy = %strategy,
        entries = entries,
        "listed"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_listed(_path: &Path, _strategy: Strategy, _entries: usize) {}

/// A listing is about to return a terminal error.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_failed(op: Op, path: &Path, error: &std::io::Error) {
    tracing::debug!(
        target: READDIR_TARGET,
        op = %op,
        path = %path.display(),
        error = %error,
        "failed"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_failed(_op: Op, _path: &Path, _error: &std::io::Error) {}
