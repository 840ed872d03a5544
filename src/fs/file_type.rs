#![allow(clippy::inline_always)]
#[cfg(unix)]
use libc::{DT_BLK, DT_CHR, DT_DIR, DT_FIFO, DT_LNK, DT_REG, DT_SOCK};
use std::fmt;

/**
 Coarse classification of a directory entry, as far as it can be known without
 following symlinks or issuing a full stat call.

 `Unknown` is an explicit sentinel: the record carried no type hint (or a code this
 crate does not recognise), so the caller must stat the path if the type matters.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileType {
    /// `DT_REG`
    RegularFile,
    /// `DT_DIR`
    Directory,
    /// `DT_LNK`, never followed
    Symlink,
    /// `DT_BLK`
    BlockDevice,
    /// `DT_CHR`
    CharDevice,
    /// `DT_FIFO`, a named pipe
    Fifo,
    /// `DT_SOCK`
    Socket,
    /// No usable hint in the record: `DT_UNKNOWN`, or a code newer than this crate
    Unknown,
}

impl FileType {
    /// Classifies a `d_type` code. The code domain is open ended (filesystems may report
    /// `DT_UNKNOWN`, BSDs have `DT_WHT`), so everything unrecognised lands on `Unknown`.
    #[cfg(unix)]
    #[must_use]
    #[inline(always)]
    pub const fn from_dtype(d_type: u8) -> Self {
        match d_type {
            DT_REG => Self::RegularFile,
            DT_DIR => Self::Directory,
            DT_LNK => Self::Symlink,
            DT_BLK => Self::BlockDevice,
            DT_CHR => Self::CharDevice,
            DT_FIFO => Self::Fifo,
            DT_SOCK => Self::Socket,
            _ => Self::Unknown,
        }
    }

    /// Converts the standard library's file type, which never follows symlinks for
    /// entries yielded by `read_dir`.
    #[must_use]
    #[inline]
    pub fn from_std(file_type: std::fs::FileType) -> Self {
        #[cfg(unix)]
        use std::os::unix::fs::FileTypeExt as _;

        match file_type {
            ft if ft.is_dir() => Self::Directory,
            ft if ft.is_file() => Self::RegularFile,
            ft if ft.is_symlink() => Self::Symlink,
            #[cfg(unix)]
            ft if ft.is_block_device() => Self::BlockDevice,
            #[cfg(unix)]
            ft if ft.is_char_device() => Self::CharDevice,
            #[cfg(unix)]
            ft if ft.is_fifo() => Self::Fifo,
            #[cfg(unix)]
            ft if ft.is_socket() => Self::Socket,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    #[inline]
    pub const fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }

    #[must_use]
    #[inline]
    pub const fn is_regular_file(self) -> bool {
        matches!(self, Self::RegularFile)
    }

    #[must_use]
    #[inline]
    pub const fn is_symlink(self) -> bool {
        matches!(self, Self::Symlink)
    }

    /// Block or character device.
    #[must_use]
    #[inline]
    pub const fn is_device(self) -> bool {
        matches!(self, Self::BlockDevice | Self::CharDevice)
    }

    /// Whether the type hint was missing, meaning a stat is needed to learn the type.
    #[must_use]
    #[inline]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegularFile => f.write_str("regular file"),
            Self::Directory => f.write_str("directory"),
            Self::Symlink => f.write_str("symlink"),
            Self::BlockDevice => f.write_str("block device"),
            Self::CharDevice => f.write_str("character device"),
            Self::Fifo => f.write_str("named pipe"),
            Self::Socket => f.write_str("socket"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}
