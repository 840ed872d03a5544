use crate::fs::{FileType, Result};
use crate::DirEntryError;
use std::ffi::{OsStr, OsString};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/**
 One child of a directory, as it was at the moment the directory was read.

 Entries are created fresh by every listing and never mutated afterwards. They carry
 the file name (never empty, never "." or "..") and the coarse type from the
 directory record, nothing more.

 Two entries compare equal when their names and types match, regardless of which
 strategy produced them.

 # Examples
 ```
 use fastdir::{list_directory, FileType};

 let dir = tempfile::tempdir().unwrap();
 std::fs::write(dir.path().join("notes.txt"), b"hi").unwrap();

 let entries = list_directory(dir.path()).unwrap();
 assert_eq!(entries.len(), 1);
 assert_eq!(entries[0].name(), "notes.txt");
 assert_eq!(entries[0].file_type(), FileType::RegularFile);
 ```
*/
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub(crate) name: Box<OsStr>,
    pub(crate) file_type: FileType,
    /// The directory this entry was read from, shared by every entry of one listing.
    /// Only the generic strategy keeps it, which is what makes `metadata` available.
    pub(crate) parent: Option<Arc<Path>>,
}

impl DirEntry {
    #[inline]
    pub(crate) fn new(name: Box<OsStr>, file_type: FileType) -> Self {
        debug_assert!(!name.is_empty(), "directory entries always have a name");
        Self {
            name,
            file_type,
            parent: None,
        }
    }

    #[inline]
    pub(crate) fn with_parent(name: Box<OsStr>, file_type: FileType, parent: Arc<Path>) -> Self {
        Self {
            parent: Some(parent),
            ..Self::new(name, file_type)
        }
    }

    /// The file name of this entry, without any path separators.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// The file name as raw bytes, exactly as the kernel reported it.
    #[cfg(unix)]
    #[must_use]
    #[inline]
    pub fn file_name_bytes(&self) -> &[u8] {
        use std::os::unix::ffi::OsStrExt as _;
        self.name.as_bytes()
    }

    /// Consumes the entry, returning its name.
    #[must_use]
    #[inline]
    pub fn into_name(self) -> OsString {
        self.name.into_os_string()
    }

    /// Cost free access to the type reported by the directory record.
    #[must_use]
    #[inline]
    pub const fn file_type(&self) -> FileType {
        self.file_type
    }

    #[must_use]
    #[inline]
    pub const fn is_dir(&self) -> bool {
        self.file_type.is_dir()
    }

    #[must_use]
    #[inline]
    pub const fn is_regular_file(&self) -> bool {
        self.file_type.is_regular_file()
    }

    #[must_use]
    #[inline]
    pub const fn is_symlink(&self) -> bool {
        self.file_type.is_symlink()
    }

    /// Whether the name starts with a dot.
    #[must_use]
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.name.as_encoded_bytes().first() == Some(&b'.')
    }

    /// Joins the entry's name onto the directory it was listed from.
    #[must_use]
    #[inline]
    pub fn path_in(&self, dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(self.name())
    }

    /**
     Returns the full metadata of this entry, without following symlinks.

     # Errors
     Entries produced by the direct strategy do not remember their directory, so this
     returns [`DirEntryError::Unsupported`] for them; stat the path yourself via
     [`DirEntry::path_in`]. For generic entries any `lstat` failure is returned as a
     filesystem error.
    */
    pub fn metadata(&self) -> Result<std::fs::Metadata> {
        let parent = self.parent.as_deref().ok_or(DirEntryError::Unsupported)?;
        let full_path = parent.join(self.name());
        std::fs::symlink_metadata(&full_path)
            .map_err(|e| DirEntryError::filesystem(crate::Op::Lstat, &full_path, e))
    }
}

impl PartialEq for DirEntry {
    fn eq(&self, other: &Self) -> bool {
        self.file_type == other.file_type && self.name == other.name
    }
}

impl Eq for DirEntry {}

impl Hash for DirEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.file_type.hash(state);
    }
}
