use crate::domain::model::{EntryKind, SourceEntry};
use crate::domain::ports::FileStore;
use crate::utils::error::{Result, ShelfError};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

impl LocalFileStore {
    pub fn new() -> Self {
        Self
    }
}

// rename 不能跨越掛載點 (EXDEV / ERROR_NOT_SAME_DEVICE)
fn is_cross_device(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices
}

impl FileStore for LocalFileStore {
    fn dir_exists(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    fn list_entries(&self, dir: &Path) -> Result<Vec<SourceEntry>> {
        let read_dir = fs::read_dir(dir).map_err(|e| ShelfError::io("listing", dir, e))?;
        let mut entries = Vec::new();

        for entry in read_dir {
            let entry = entry.map_err(|e| ShelfError::io("reading entry in", dir, e))?;
            let path = entry.path();
            // file_type() 不追蹤符號連結
            let file_type = entry
                .file_type()
                .map_err(|e| ShelfError::io("inspecting", &path, e))?;

            let (kind, size_bytes) = if file_type.is_file() {
                let meta = entry
                    .metadata()
                    .map_err(|e| ShelfError::io("reading metadata of", &path, e))?;
                (EntryKind::File, meta.len())
            } else if file_type.is_dir() {
                (EntryKind::Directory, 0)
            } else {
                (EntryKind::Other, 0)
            };

            entries.push(SourceEntry {
                file_name: entry.file_name(),
                path,
                kind,
                size_bytes,
            });
        }

        Ok(entries)
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            tracing::debug!("Creating destination directory {}", dir.display());
            fs::create_dir_all(dir).map_err(|e| ShelfError::io("creating", dir, e))?;
        }
        Ok(())
    }

    fn move_file(&self, from: &Path, to: &Path) -> Result<()> {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) if is_cross_device(&e) => {
                tracing::debug!(
                    "Rename across devices, copying {} then removing source",
                    from.display()
                );
                fs::copy(from, to).map_err(|source| ShelfError::MoveFailed {
                    from: from.to_path_buf(),
                    to: to.to_path_buf(),
                    source,
                })?;
                fs::remove_file(from).map_err(|source| ShelfError::MoveFailed {
                    from: from.to_path_buf(),
                    to: to.to_path_buf(),
                    source,
                })
            }
            Err(source) => Err(ShelfError::MoveFailed {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_entries_reports_kind_and_size() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("chair.glb"), vec![0u8; 1234]).unwrap();
        fs::create_dir(temp.path().join("textures")).unwrap();

        let store = LocalFileStore::new();
        let mut entries = store.list_entries(temp.path()).unwrap();
        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].file_name, "chair.glb");
        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(entries[0].size_bytes, 1234);
        assert_eq!(entries[1].kind, EntryKind::Directory);
    }

    #[test]
    fn test_list_missing_dir_is_io_error() {
        let temp = TempDir::new().unwrap();
        let store = LocalFileStore::new();
        let err = store.list_entries(&temp.path().join("nope")).unwrap_err();
        assert!(matches!(err, ShelfError::IoError { .. }));
    }

    #[test]
    fn test_ensure_dir_creates_parents() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("public").join("assets").join("models");
        let store = LocalFileStore::new();

        store.ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        // idempotent
        store.ensure_dir(&nested).unwrap();
    }

    #[test]
    fn test_move_file_relocates_content() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("sofa.glb");
        let to = temp.path().join("sofa-moved.glb");
        fs::write(&from, b"glTF").unwrap();

        LocalFileStore::new().move_file(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read(&to).unwrap(), b"glTF");
    }

    #[test]
    fn test_cross_device_detection_uses_error_kind() {
        assert!(is_cross_device(&io::Error::from(io::ErrorKind::CrossesDevices)));
        assert!(!is_cross_device(&io::Error::from(io::ErrorKind::PermissionDenied)));
        assert!(!is_cross_device(&io::Error::from(io::ErrorKind::NotFound)));
    }

    #[test]
    fn test_move_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let err = LocalFileStore::new()
            .move_file(&temp.path().join("ghost.glb"), &temp.path().join("x.glb"))
            .unwrap_err();
        assert!(matches!(err, ShelfError::MoveFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_regular_files() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("real.glb");
        fs::write(&target, b"x").unwrap();
        std::os::unix::fs::symlink(&target, temp.path().join("link.glb")).unwrap();

        let entries = LocalFileStore::new().list_entries(temp.path()).unwrap();
        let link = entries.iter().find(|e| e.file_name == "link.glb").unwrap();
        assert_eq!(link.kind, EntryKind::Other);
    }
}
