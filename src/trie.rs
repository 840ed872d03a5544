use crate::fs::DirEntry;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::ffi::{OsStr, OsString};

/**
 A prefix tree whose keys are path segments.

 Each node optionally holds the [`DirEntry`] it represents and owns its children, keyed
 by the children's names. The root usually holds no entry. There is no removal; a trie
 lives for one traversal and is dropped as a whole.

 # Examples
 ```
 use fastdir::{list_directory, PathTrie};

 let dir = tempfile::tempdir().unwrap();
 std::fs::create_dir(dir.path().join("src")).unwrap();
 std::fs::write(dir.path().join("src/lib.rs"), b"").unwrap();

 let mut root = PathTrie::new();
 for entry in list_directory(dir.path()).unwrap() {
     let is_dir = entry.is_dir();
     let path = entry.path_in(dir.path());
     let node = root.add_child(entry);
     if is_dir {
         node.add_children(list_directory(path).unwrap());
     }
 }

 assert!(root.get(["src", "lib.rs"]).is_some());
 ```
*/
#[derive(Debug, Default)]
pub struct PathTrie {
    children: HashMap<OsString, PathTrie>,
    entry: Option<DirEntry>,
}

impl PathTrie {
    /// An empty root node.
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn with_entry(entry: DirEntry) -> Self {
        Self {
            children: HashMap::new(),
            entry: Some(entry),
        }
    }

    /**
     Attaches `entry` under this node, keyed by its name, and returns the new node so
     descendants can be added beneath it.

     An existing child with the same name is replaced together with its whole subtree;
     the returned node always starts with no children.
    */
    pub fn add_child(&mut self, entry: DirEntry) -> &mut Self {
        let key = entry.name().to_os_string();
        let child = Self::with_entry(entry);
        match self.children.entry(key) {
            Entry::Occupied(mut occupied) => {
                occupied.insert(child);
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => vacant.insert(child),
        }
    }

    /// Attaches every entry of a listing under this node.
    pub fn add_children<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = DirEntry>,
    {
        for entry in entries {
            self.add_child(entry);
        }
    }

    /// The entry this node represents, `None` for the root.
    #[must_use]
    #[inline]
    pub const fn entry(&self) -> Option<&DirEntry> {
        self.entry.as_ref()
    }

    #[must_use]
    #[inline]
    pub const fn children(&self) -> &HashMap<OsString, Self> {
        &self.children
    }

    #[must_use]
    #[inline]
    pub fn children_mut(&mut self) -> &mut HashMap<OsString, Self> {
        &mut self.children
    }

    /// The direct child named `name`.
    #[must_use]
    #[inline]
    pub fn child(&self, name: impl AsRef<OsStr>) -> Option<&Self> {
        self.children.get(name.as_ref())
    }

    #[must_use]
    #[inline]
    pub fn child_mut(&mut self, name: impl AsRef<OsStr>) -> Option<&mut Self> {
        self.children.get_mut(name.as_ref())
    }

    /// Follows `segments` down from this node, an empty path yields the node itself.
    #[must_use]
    pub fn get<I, S>(&self, segments: I) -> Option<&Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        segments
            .into_iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Number of direct children.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
