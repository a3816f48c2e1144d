//! Resource probe: "does this path exist, and is it of this kind?"

use std::path::Path;

use crate::{Filesystem, ResourceKind};

/// `true` only if `path` exists *and* is of the requested kind.
pub fn exists_as(fs: &dyn Filesystem, path: &Path, kind: ResourceKind) -> bool {
    fs.kind(path) == Some(kind)
}

pub fn is_file(fs: &dyn Filesystem, path: &Path) -> bool {
    exists_as(fs, path, ResourceKind::File)
}

pub fn is_dir(fs: &dyn Filesystem, path: &Path) -> bool {
    exists_as(fs, path, ResourceKind::Directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryFs;

    #[test]
    fn kind_must_match() {
        let mut fs = MemoryFs::new();
        fs.create_dir(Path::new("/music")).unwrap();
        fs.create_file(Path::new("/notes.txt")).unwrap();

        assert!(is_dir(&fs, Path::new("/music")));
        assert!(!is_file(&fs, Path::new("/music")));
        assert!(is_file(&fs, Path::new("/notes.txt")));
        assert!(!is_dir(&fs, Path::new("/notes.txt")));
    }

    #[test]
    fn missing_is_neither() {
        let fs = MemoryFs::new();
        assert!(!exists_as(&fs, Path::new("/ghost"), ResourceKind::File));
        assert!(!exists_as(&fs, Path::new("/ghost"), ResourceKind::Directory));
    }
}
