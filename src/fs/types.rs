use crate::DirEntryError;

/// Generic result type for directory listing operations
pub type Result<T> = core::result::Result<T, DirEntryError>;
