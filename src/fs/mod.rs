mod dir_entry;
mod file_type;
mod types;

#[cfg(any(target_os = "linux", target_os = "android", target_os = "macos"))]
pub mod direct;
pub mod generic;

pub use dir_entry::DirEntry;
pub use file_type::FileType;
pub use types::Result;

use crate::trace::trace_failed;
use crate::{DirEntryError, ListOptions, Op, Strategy};
use std::path::Path;

/**
 Lists the entries of the directory at `path` with the strategy native to this platform.

 "." and ".." are never returned, and neither are entries that were deleted but are
 still present in the on-disk listing. The order is whatever the OS yields.

 # Errors
 [`DirEntryError::Filesystem`] tagged `opendir` when the directory cannot be opened
 (missing, permission denied, not a directory, ...), or `readdir` when reading fails
 part way through. A failed read never returns a partial listing.
*/
#[inline]
pub fn list_directory(path: impl AsRef<Path>) -> Result<Vec<DirEntry>> {
    list_directory_with(path, &ListOptions::new())
}

/**
 Lists the entries of the directory at `path` using `options`.

 # Errors
 As [`list_directory`].

 # Examples
 ```
 use fastdir::{list_directory_with, ListOptions, Strategy};

 let dir = tempfile::tempdir().unwrap();
 std::fs::write(dir.path().join("file"), b"").unwrap();
 std::fs::create_dir(dir.path().join("dir")).unwrap();

 let options = ListOptions::new().with_strategy(Strategy::Generic).skip_files(true);
 let entries = list_directory_with(dir.path(), &options).unwrap();
 assert_eq!(entries.len(), 1);
 assert_eq!(entries[0].name(), "dir");
 ```
*/
pub fn list_directory_with(path: impl AsRef<Path>, options: &ListOptions) -> Result<Vec<DirEntry>> {
    let path = path.as_ref();
    match options.strategy {
        Strategy::Generic => generic::read_dir(path, options),
        #[cfg(any(target_os = "linux", target_os = "android", target_os = "macos"))]
        Strategy::Direct => direct::read_dir(path, options),
    }
}

#[cold]
pub(crate) fn fail(op: Op, path: &Path, error: std::io::Error) -> DirEntryError {
    trace_failed(op, path, &error);
    DirEntryError::filesystem(op, path, error)
}
