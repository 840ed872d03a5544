/*!
 Fast listing of a single directory, plus a path-segment trie for indexing the results.

 [`list_directory`] returns the children of one directory as [`DirEntry`] values (name
 plus a coarse [`FileType`] taken from the directory record, no stat calls). Two
 interchangeable strategies implement it:
 - [`fs::direct`] (Linux, Android, macOS): owns a libc `DIR` stream, retries `EINTR`,
   decodes each dirent record itself and drops tombstone records (zero inode) that some
   filesystems leave behind after a deletion.
 - [`fs::generic`]: delegates to `std::fs::read_dir`, used everywhere else.

 The platform's choice is [`Strategy::NATIVE`]; [`ListOptions`] can override it.

 [`PathTrie`] stores entries by path segment as a traversal proceeds. Recursion,
 symlink policy, filtering and parallelism belong to the caller.

 # Examples
 ```
 use fastdir::{list_directory, FileType, PathTrie};

 let dir = tempfile::tempdir().unwrap();
 std::fs::write(dir.path().join("a"), b"").unwrap();
 std::fs::create_dir(dir.path().join("b")).unwrap();

 let mut root = PathTrie::new();
 root.add_children(list_directory(dir.path()).unwrap());

 assert_eq!(root.child("a").and_then(PathTrie::entry).map(|e| e.file_type()), Some(FileType::RegularFile));
 assert_eq!(root.child("b").and_then(PathTrie::entry).map(|e| e.file_type()), Some(FileType::Directory));
 assert!(root.child("c").is_none());
 ```

 With the `tracing` feature, retries, skipped tombstones, completed listings and failures
 are reported as events under the `fastdir::readdir` target.
*/

#[macro_use]
mod macros;

mod config;
mod error;
pub mod fs;
mod trace;
mod trie;


pub use config::{ListOptions, Strategy};
pub use error::{DirEntryError, Op};
pub use fs::{DirEntry, FileType, Result, list_directory, list_directory_with};
pub use trie::PathTrie;
