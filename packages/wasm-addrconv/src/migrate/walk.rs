use super::{IoOp, MigrateError};
use std::fs;
use std::path::{Path, PathBuf};

/// Walk the tree under `root` depth first, calling `visit` for every regular
/// file. Symlinks and special files are skipped and never followed.
///
/// Directories that cannot be listed are passed to `on_error` and skipped;
/// the walk itself always runs to completion.
pub fn walk_files(
    root: &Path,
    visit: &mut dyn FnMut(PathBuf),
    on_error: &mut dyn FnMut(MigrateError),
) {
    let root_type = match fs::symlink_metadata(root) {
        Ok(meta) => meta.file_type(),
        Err(e) => {
            on_error(MigrateError::io(root, IoOp::Stat, e));
            return;
        }
    };
    if root_type.is_file() {
        visit(root.to_path_buf());
        return;
    }
    if !root_type.is_dir() {
        return;
    }

    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                on_error(MigrateError::io(&dir, IoOp::ReadDir, e));
                continue;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    on_error(MigrateError::io(&dir, IoOp::ReadDir, e));
                    continue;
                }
            };
            let path = entry.path();
            match entry.file_type() {
                Ok(t) if t.is_dir() => pending.push(path),
                Ok(t) if t.is_file() => visit(path),
                Ok(_) => tracing::debug!("skipping non-regular file {}", path.display()),
                Err(e) => on_error(MigrateError::io(&path, IoOp::Stat, e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(root: &Path) -> (Vec<PathBuf>, Vec<MigrateError>) {
        let mut files = Vec::new();
        let mut errors = Vec::new();
        walk_files(root, &mut |p| files.push(p), &mut |e| errors.push(e));
        files.sort();
        (files, errors)
    }

    #[test]
    fn test_walk_nested() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b/c")).unwrap();
        fs::write(dir.path().join("top.txt"), "x").unwrap();
        fs::write(dir.path().join("a/b/c/deep.txt"), "x").unwrap();
        fs::write(dir.path().join("a/mid.txt"), "x").unwrap();

        let (files, errors) = collect(dir.path());
        assert!(errors.is_empty());
        assert_eq!(
            files,
            vec![
                dir.path().join("a/b/c/deep.txt"),
                dir.path().join("a/mid.txt"),
                dir.path().join("top.txt"),
            ]
        );
    }

    #[test]
    fn test_walk_single_file_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("only.txt");
        fs::write(&file, "x").unwrap();

        let (files, errors) = collect(&file);
        assert!(errors.is_empty());
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_walk_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let (files, errors) = collect(&dir.path().join("missing"));
        assert!(files.is_empty());
        assert_eq!(errors.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_skips_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("target.txt"), "x").unwrap();
        std::os::unix::fs::symlink(outside.path().join("target.txt"), dir.path().join("link"))
            .unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("linkdir")).unwrap();

        let (files, errors) = collect(dir.path());
        assert!(files.is_empty());
        assert!(errors.is_empty());
    }
}
