//! Listing through the standard library's `read_dir`.

use crate::fs::{DirEntry, FileType, Result, fail};
use crate::trace::trace_listed;
use crate::{ListOptions, Op, Strategy};
use std::io;
use std::path::Path;
use std::sync::Arc;

/**
 Lists `path` via `std::fs::read_dir`.

 Entries come back in whatever order the host yields them. Entries that vanish between
 the directory read and the `lstat` needed to classify them are skipped.

 # Errors
 A failure opening the directory is tagged [`Op::OpenDir`], a failure while iterating
 [`Op::ReadDir`]. Both carry `path` and the original `io::Error`.
*/
pub fn read_dir(path: &Path, options: &ListOptions) -> Result<Vec<DirEntry>> {
    let iter = std::fs::read_dir(path).map_err(|e| fail(Op::OpenDir, path, e))?;
    let parent: Arc<Path> = Arc::from(path);

    let mut entries = Vec::new();
    for entry in iter {
        let entry = entry.map_err(|e| fail(Op::ReadDir, path, e))?;
        let Some(file_type) = classify(entry.file_type()) else {
            continue;
        };
        if options.skip_files && file_type.is_regular_file() {
            continue;
        }
        entries.push(DirEntry::with_parent(
            entry.file_name().into_boxed_os_str(),
            file_type,
            Arc::clone(&parent),
        ));
    }

    trace_listed(path, Strategy::Generic, entries.len());
    Ok(entries)
}

/// Type of an entry from the host's answer, `None` when the entry was deleted between
/// the directory read and the `lstat` the host needed to classify it.
#[inline]
fn classify(file_type: io::Result<std::fs::FileType>) -> Option<FileType> {
    match file_type {
        Ok(ft) => Some(FileType::from_std(ft)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(_) => Some(FileType::Unknown),
    }
}
