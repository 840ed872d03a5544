use core::fmt;

/// Which Entry Reader implementation services a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Delegates to `std::fs::read_dir`
    Generic,
    /// Owns the `DIR` stream and decodes each dirent record itself
    #[cfg(any(target_os = "linux", target_os = "android", target_os = "macos"))]
    Direct,
}

impl Strategy {
    /// The strategy selected for the build target.
    #[cfg(any(target_os = "linux", target_os = "android", target_os = "macos"))]
    pub const NATIVE: Self = Self::Direct;

    /// The strategy selected for the build target.
    #[cfg(not(any(target_os = "linux", target_os = "android", target_os = "macos")))]
    pub const NATIVE: Self = Self::Generic;

    #[must_use]
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            #[cfg(any(target_os = "linux", target_os = "android", target_os = "macos"))]
            Self::Direct => "direct",
        }
    }
}

impl Default for Strategy {
    #[inline]
    fn default() -> Self {
        Self::NATIVE
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/**
 Options for a single directory listing.

 # Examples
 ```
 use fastdir::{ListOptions, Strategy};

 let options = ListOptions::new().with_strategy(Strategy::Generic).skip_files(true);
 assert_eq!(options.strategy, Strategy::Generic);
 assert!(options.skip_files);
 ```
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Reader implementation, defaults to [`Strategy::NATIVE`]
    pub strategy: Strategy,
    /// Drop regular files from the result, keeping directories and everything else
    pub skip_files: bool,
}

impl ListOptions {
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            strategy: Strategy::NATIVE,
            skip_files: false,
        }
    }

    #[must_use]
    #[inline]
    pub const fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    #[inline]
    pub const fn skip_files(mut self, skip_files: bool) -> Self {
        self.skip_files = skip_files;
        self
    }
}
