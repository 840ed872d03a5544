/*!
 Listing by reading dirent records straight off a libc `DIR` stream.

 The decoding loop ([`decode_records`]) is written against the [`RecordStream`] trait so
 that the syscall layer (`ReadDir` here) only has to hand out raw records. The loop owns
 every policy decision: `EINTR` retry, tombstone skipping, type classification, name
 extraction and "."/".." filtering, in that order.
*/

use crate::fs::{DirEntry, FileType, Result, fail};
use crate::trace::{trace_interrupted, trace_listed, trace_tombstone};
use crate::{DirEntryError, ListOptions, Op, Strategy};
use core::ptr::NonNull;
use libc::DIR;
use std::ffi::{CStr, CString, OsStr};
use std::io;
use std::os::unix::ffi::OsStrExt as _;
use std::path::Path;

#[cfg(any(target_os = "linux", target_os = "android"))]
use libc::{dirent64, readdir64};
#[cfg(target_os = "macos")]
use libc::{dirent as dirent64, readdir as readdir64};

/// Offset of `d_name` within the record
const NAME_OFFSET: usize = core::mem::offset_of!(dirent64, d_name);

/// Upper bound on the bytes of `d_name`, the struct's trailing padding included.
/// Each record is further bounded by its own `d_reclen`.
const NAME_CAPACITY: usize = core::mem::size_of::<dirent64>() - NAME_OFFSET;

const_assert!(
    NAME_CAPACITY >= 256,
    "d_name is smaller than NAME_MAX on this platform, please report the error"
);

/**
 One undecoded directory record.

 `name` is the record's fixed capacity name field. It is not necessarily NUL terminated
 at its logical end, see [`RawDirent::file_name`].
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDirent<'a> {
    /// Inode number, zero for a deleted entry still present in the listing
    pub ino: u64,
    /// Raw `d_type` code
    pub d_type: u8,
    /// The name buffer
    pub name: &'a [u8],
}

impl<'a> RawDirent<'a> {
    /// The name up to (not including) the first NUL byte, or the whole buffer if it has none.
    #[must_use]
    #[inline]
    pub fn file_name(&self) -> &'a [u8] {
        match memchr::memchr(0, self.name) {
            Some(nul) => &self.name[..nul],
            None => self.name,
        }
    }

    /// Whether this record is a tombstone: deleted, but not yet compacted out of the
    /// directory.
    #[must_use]
    #[inline]
    pub const fn is_tombstone(&self) -> bool {
        self.ino == 0
    }

    /**
     Borrows the fields of a record returned by `readdir`.

     # Safety
     `drnt` must point to a valid record that stays alive (and unmodified) for `'a`.
    */
    #[inline]
    unsafe fn from_dirent(drnt: NonNull<dirent64>) -> Self {
        let ptr = drnt.as_ptr();
        // SAFETY: the record is valid by precondition
        let (ino, d_type, reclen, name_ptr) = unsafe {
            (
                access_dirent!(ptr, d_ino),
                access_dirent!(ptr, d_type),
                access_dirent!(ptr, d_reclen),
                access_dirent!(ptr, d_name),
            )
        };
        let name_len = reclen.saturating_sub(NAME_OFFSET).min(NAME_CAPACITY);
        // SAFETY: `d_reclen` covers the whole record, so the name bytes up to it are readable
        let name = unsafe { core::slice::from_raw_parts(name_ptr, name_len) };
        Self { ino, d_type, name }
    }
}

/**
 The `read-next-record` capability of an open directory handle.

 Implementations release the handle when dropped.
*/
pub trait RecordStream {
    /**
     Reads the next record.

     # Returns
     - `Ok(Some(record))` for a record
     - `Ok(None)` at end of directory
     - `Err(e)` on failure; `e.kind() == Interrupted` asks for the read to be retried
    */
    fn next_record(&mut self) -> io::Result<Option<RawDirent<'_>>>;
}

/**
 Opens a stream with `open` and decodes every record it yields.

 `open` is retried while it reports `EINTR`, as is each read. Any other error aborts the
 listing and whatever was decoded so far is dropped. The stream is dropped, and so
 closed, exactly once on every path out of this function.

 # Errors
 [`DirEntryError::Filesystem`] tagged [`Op::OpenDir`] or [`Op::ReadDir`] with `path`.
*/
pub fn decode_records<S, F>(path: &Path, options: &ListOptions, mut open: F) -> Result<Vec<DirEntry>>
where
    S: RecordStream,
    F: FnMut() -> io::Result<S>,
{
    let mut stream = loop {
        match open() {
            Ok(stream) => break stream,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                trace_interrupted(Op::OpenDir, path);
            }
            Err(e) => return Err(fail(Op::OpenDir, path, e)),
        }
    };

    let mut entries = Vec::new();
    loop {
        let record = match stream.next_record() {
            Ok(Some(record)) => record,
            Ok(None) => break,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                trace_interrupted(Op::ReadDir, path);
                continue;
            }
            Err(e) => return Err(fail(Op::ReadDir, path, e)),
        };

        if record.is_tombstone() {
            trace_tombstone(path);
            continue;
        }

        let file_type = FileType::from_dtype(record.d_type);
        if options.skip_files && file_type.is_regular_file() {
            continue;
        }

        let name = record.file_name();
        skip_dot_or_dot_dot_entries!(name, continue);
        if name.is_empty() {
            continue;
        }

        entries.push(DirEntry::new(OsStr::from_bytes(name).into(), file_type));
    }

    Ok(entries)
}

/**
 Lists `path` by reading its `DIR` stream directly.

 # Errors
 [`DirEntryError::InvalidPath`] if `path` has an interior NUL, otherwise as
 [`decode_records`].

 # Examples
 ```
 use fastdir::{fs::direct, ListOptions};

 let dir = tempfile::tempdir().unwrap();
 std::fs::create_dir(dir.path().join("sub")).unwrap();

 let entries = direct::read_dir(dir.path(), &ListOptions::new()).unwrap();
 assert_eq!(entries.len(), 1);
 assert!(entries[0].is_dir());
 ```
*/
pub fn read_dir(path: &Path, options: &ListOptions) -> Result<Vec<DirEntry>> {
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| DirEntryError::InvalidPath(path.to_path_buf()))?;

    let entries = decode_records(path, options, || ReadDir::open(&c_path))?;
    trace_listed(path, Strategy::Direct, entries.len());
    Ok(entries)
}

/**
 An open libc directory stream.

 Closed by `Drop`, never shared and never handed to callers.
*/
#[derive(Debug)]
pub(crate) struct ReadDir {
    /// Raw directory pointer from libc's `opendir()` wrapped in a nonnull
    dir: NonNull<DIR>,
}

impl ReadDir {
    #[inline]
    pub(crate) fn open(path: &CStr) -> io::Result<Self> {
        // SAFETY: we are passing a null terminated path to opendir
        let dir = unsafe { libc::opendir(path.as_ptr()) };
        NonNull::new(dir)
            .map(|dir| Self { dir })
            .ok_or_else(io::Error::last_os_error)
    }
}

impl RecordStream for ReadDir {
    #[inline]
    fn next_record(&mut self) -> io::Result<Option<RawDirent<'_>>> {
        // readdir reports both end of directory and errors with null, errno tells them apart
        clear_errno();
        // SAFETY: `self.dir` is a valid directory pointer owned by this struct
        let drnt = unsafe { readdir64(self.dir.as_ptr()) };

        let Some(drnt) = NonNull::new(drnt) else {
            let err = io::Error::last_os_error();
            return match err.raw_os_error() {
                Some(0) => Ok(None),
                _ => Err(err),
            };
        };
        // SAFETY: the record lives in the stream's buffer until the next readdir/closedir,
        // both of which need `&mut self`
        Ok(Some(unsafe { RawDirent::from_dirent(drnt) }))
    }
}

impl Drop for ReadDir {
    #[inline]
    fn drop(&mut self) {
        // SAFETY: the stream was opened by us and is only closed here
        unsafe { libc::closedir(self.dir.as_ptr()) };
    }
}

#[inline]
fn clear_errno() {
    // SAFETY: the errno slot is thread local and valid for the lifetime of the thread
    unsafe { *errno_location() = 0 };
}

#[cfg(target_os = "linux")]
#[inline]
fn errno_location() -> *mut libc::c_int {
    // SAFETY: always safe to call
    unsafe { libc::__errno_location() }
}

#[cfg(target_os = "android")]
#[inline]
fn errno_location() -> *mut libc::c_int {
    // SAFETY: always safe to call
    unsafe { libc::__errno() }
}

#[cfg(target_os = "macos")]
#[inline]
fn errno_location() -> *mut libc::c_int {
    // SAFETY: always safe to call
    unsafe { libc::__error() }
}

#[cfg(test)]
mod tests {
    use super::{RawDirent, RecordStream, decode_records};
    use crate::{DirEntryError, FileType, ListOptions, Op};
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::io;
    use std::path::Path;
    use std::rc::Rc;

    enum Step {
        Record { ino: u64, d_type: u8, name: Vec<u8> },
        Interrupted,
        Fail(i32),
    }

    fn rec(ino: u64, d_type: u8, name: &str) -> Step {
        Step::Record {
            ino,
            d_type,
            name: name.as_bytes().to_vec(),
        }
    }

    /// Plays back a fixed sequence of responses, then reports end of directory.
    struct Scripted {
        steps: VecDeque<Step>,
        current: Vec<u8>,
        closes: Rc<Cell<usize>>,
    }

    impl Scripted {
        fn new(steps: Vec<Step>, closes: &Rc<Cell<usize>>) -> Self {
            Self {
                steps: steps.into(),
                current: Vec::new(),
                closes: Rc::clone(closes),
            }
        }
    }

    impl RecordStream for Scripted {
        fn next_record(&mut self) -> io::Result<Option<RawDirent<'_>>> {
            match self.steps.pop_front() {
                None => Ok(None),
                Some(Step::Interrupted) => Err(io::Error::from_raw_os_error(libc::EINTR)),
                Some(Step::Fail(code)) => Err(io::Error::from_raw_os_error(code)),
                Some(Step::Record { ino, d_type, name }) => {
                    self.current = name;
                    Ok(Some(RawDirent {
                        ino,
                        d_type,
                        name: &self.current,
                    }))
                }
            }
        }
    }

    impl Drop for Scripted {
        fn drop(&mut self) {
            self.closes.set(self.closes.get() + 1);
        }
    }

    /// Runs the decoder over `steps`, with `open_interrupts` EINTRs from open first.
    fn run(
        steps: Vec<Step>,
        open_interrupts: usize,
        options: &ListOptions,
    ) -> (crate::Result<Vec<crate::DirEntry>>, usize) {
        let closes = Rc::new(Cell::new(0));
        let mut stream = Some(Scripted::new(steps, &closes));
        let mut remaining = open_interrupts;
        let result = decode_records(Path::new("/scripted"), options, || {
            if remaining > 0 {
                remaining -= 1;
                return Err(io::Error::from_raw_os_error(libc::EINTR));
            }
            Ok(stream.take().expect("opened once"))
        });
        (result, closes.get())
    }

    fn names(entries: &[crate::DirEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| e.name().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn tombstones_are_skipped() {
        let (result, closes) = run(
            vec![
                rec(0, libc::DT_REG, "ghost"),
                rec(11, libc::DT_REG, "a"),
                rec(12, libc::DT_DIR, "b"),
            ],
            0,
            &ListOptions::new(),
        );
        let entries = result.unwrap();
        assert_eq!(names(&entries), ["a", "b"]);
        assert_eq!(closes, 1);
    }

    #[test]
    fn dot_entries_are_skipped() {
        let (result, _) = run(
            vec![
                rec(2, libc::DT_DIR, "."),
                rec(1, libc::DT_DIR, ".."),
                rec(5, libc::DT_REG, "..."),
            ],
            0,
            &ListOptions::new(),
        );
        assert_eq!(names(&result.unwrap()), ["..."]);
    }

    #[test]
    fn names_are_truncated_at_first_nul() {
        let (result, _) = run(
            vec![
                rec(3, libc::DT_REG, "abc\0stale bytes"),
                rec(4, libc::DT_REG, "full_buffer_without_nul"),
                rec(5, libc::DT_DIR, ".\0\0\0"),
                rec(6, libc::DT_REG, "\0leftover"),
            ],
            0,
            &ListOptions::new(),
        );
        assert_eq!(names(&result.unwrap()), ["abc", "full_buffer_without_nul"]);
    }

    #[test]
    fn types_are_classified_with_unknown_default() {
        let (result, _) = run(
            vec![
                rec(1, libc::DT_LNK, "link"),
                rec(2, libc::DT_FIFO, "pipe"),
                rec(3, libc::DT_SOCK, "sock"),
                rec(4, libc::DT_UNKNOWN, "mystery"),
                rec(5, 200, "future"),
            ],
            0,
            &ListOptions::new(),
        );
        let types: Vec<FileType> = result.unwrap().iter().map(|e| e.file_type()).collect();
        assert_eq!(
            types,
            [
                FileType::Symlink,
                FileType::Fifo,
                FileType::Socket,
                FileType::Unknown,
                FileType::Unknown,
            ]
        );
    }

    #[test]
    fn read_error_discards_decoded_entries() {
        let (result, closes) = run(
            vec![
                rec(1, libc::DT_REG, "a"),
                rec(2, libc::DT_REG, "b"),
                Step::Fail(libc::EIO),
                rec(3, libc::DT_REG, "c"),
            ],
            0,
            &ListOptions::new(),
        );
        let err = result.unwrap_err();
        assert_eq!(err.op(), Some(Op::ReadDir));
        assert_eq!(err.path(), Some(Path::new("/scripted")));
        assert_eq!(err.raw_os_error(), Some(libc::EIO));
        assert_eq!(closes, 1, "stream must be closed on the error path too");
    }

    #[test]
    fn open_error_is_not_retried() {
        let mut calls = 0;
        let result = decode_records::<super::ReadDir, _>(
            Path::new("/denied"),
            &ListOptions::new(),
            || {
                calls += 1;
                Err(io::Error::from_raw_os_error(libc::EACCES))
            },
        );
        assert_eq!(calls, 1);
        match result {
            Err(DirEntryError::Filesystem { op, path, source }) => {
                assert_eq!(op, Op::OpenDir);
                assert_eq!(path, Path::new("/denied"));
                assert_eq!(source.raw_os_error(), Some(libc::EACCES));
            }
            other => panic!("expected opendir failure, got {other:?}"),
        }
    }

    #[test]
    fn empty_stream_is_empty_listing() {
        let (result, closes) = run(Vec::new(), 0, &ListOptions::new());
        assert!(result.unwrap().is_empty());
        assert_eq!(closes, 1);
    }

    #[test]
    fn skip_files_keeps_everything_but_regular_files() {
        let (result, _) = run(
            vec![
                rec(1, libc::DT_REG, "file"),
                rec(2, libc::DT_DIR, "dir"),
                rec(3, libc::DT_UNKNOWN, "unknown"),
            ],
            0,
            &ListOptions::new().skip_files(true),
        );
        assert_eq!(names(&result.unwrap()), ["dir", "unknown"]);
    }

    fn script_with_interrupts(read_interrupts: &[usize]) -> Vec<Step> {
        let records = [
            (7, libc::DT_REG, "alpha"),
            (0, libc::DT_REG, "deleted"),
            (8, libc::DT_DIR, "beta"),
            (9, libc::DT_LNK, "gamma"),
        ];
        let mut steps = Vec::new();
        for (i, (ino, d_type, name)) in records.into_iter().enumerate() {
            let before = read_interrupts.get(i).copied().unwrap_or(0);
            steps.extend((0..before).map(|_| Step::Interrupted));
            steps.push(rec(ino, d_type, name));
        }
        steps
    }

    proptest! {
        #[test]
        fn interruptions_do_not_change_output(
            open_interrupts in 0usize..8,
            read_interrupts in proptest::collection::vec(0usize..4, 0..5),
        ) {
            let (baseline, _) = run(script_with_interrupts(&[]), 0, &ListOptions::new());
            let (result, closes) = run(
                script_with_interrupts(&read_interrupts),
                open_interrupts,
                &ListOptions::new(),
            );
            prop_assert_eq!(result.unwrap(), baseline.unwrap());
            prop_assert_eq!(closes, 1);
        }
    }
}
