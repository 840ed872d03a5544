use std::{fmt, io, path::Path, path::PathBuf};

/// The directory operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Acquiring the directory handle
    OpenDir,
    /// Reading the next record from an open handle
    ReadDir,
    /// Fetching metadata of a listed entry
    Lstat,
}

impl Op {
    /// Name of the operation as reported in errors.
    #[must_use]
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenDir => "opendir",
            Self::ReadDir => "readdir",
            Self::Lstat => "lstat",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/**
 An error type for directory listing operations.

 Filesystem failures keep the operation, the offending path and the original
 `io::Error`, so callers can log or retry at a higher layer.
*/
#[derive(Debug, thiserror::Error)]
pub enum DirEntryError {
    /// A terminal failure while opening or reading a directory.
    #[error("{op} {}: {source}", .path.display())]
    Filesystem {
        op: Op,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Full metadata is not available for entries read through the direct strategy,
    /// stat the path instead.
    #[error("metadata is unsupported for entries read directly from the directory stream")]
    Unsupported,
    /// The path contains an interior NUL byte and cannot be handed to the OS.
    #[error("invalid path {}: contains an interior NUL byte", .0.display())]
    InvalidPath(PathBuf),
}

impl DirEntryError {
    #[inline]
    pub(crate) fn filesystem(op: Op, path: &Path, source: io::Error) -> Self {
        Self::Filesystem {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    /// The failed operation, if this is a filesystem error.
    #[must_use]
    #[inline]
    pub const fn op(&self) -> Option<Op> {
        match self {
            Self::Filesystem { op, .. } => Some(*op),
            Self::Unsupported | Self::InvalidPath(_) => None,
        }
    }

    /// The path the error refers to, if any.
    #[must_use]
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Filesystem { path, .. } | Self::InvalidPath(path) => Some(path),
            Self::Unsupported => None,
        }
    }

    /// The raw OS error code behind a filesystem error.
    #[must_use]
    #[inline]
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::Filesystem { source, .. } => source.raw_os_error(),
            Self::Unsupported | Self::InvalidPath(_) => None,
        }
    }

    /// Whether this error means "stat the file directly" rather than a real IO failure.
    #[must_use]
    #[inline]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported)
    }
}

impl From<DirEntryError> for io::Error {
    fn from(error: DirEntryError) -> Self {
        let kind = match &error {
            DirEntryError::Filesystem { source, .. } => source.kind(),
            DirEntryError::Unsupported => io::ErrorKind::Unsupported,
            DirEntryError::InvalidPath(_) => io::ErrorKind::InvalidInput,
        };
        Self::new(kind, error)
    }
}
