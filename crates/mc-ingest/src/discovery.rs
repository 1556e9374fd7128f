//! File discovery under an explicit input root.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{IngestError, Result};

/// Finds every file named `file_name` below `root`.
///
/// Files whose parent directory name contains one of `exclude_markers` are
/// skipped, as is everything below a directory in `exclude_dirs` (compared
/// after resolving symlinks; directories that do not exist are ignored).
/// Paths are returned sorted so table assembly is deterministic.
pub fn find_files(
    root: &Path,
    file_name: &str,
    exclude_markers: &[String],
    exclude_dirs: &[PathBuf],
) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }
    let pruned: Vec<PathBuf> = exclude_dirs
        .iter()
        .filter_map(|dir| dir.canonicalize().ok())
        .collect();

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| !is_pruned(entry.path(), entry.file_type().is_dir(), &pruned));
    for entry in walker {
        let entry = entry.map_err(|source| IngestError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() || entry.file_name() != file_name {
            continue;
        }
        let path = entry.into_path();
        if is_excluded(&path, exclude_markers) {
            tracing::debug!(path = %path.display(), "skipping excluded file");
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}

fn is_pruned(path: &Path, is_dir: bool, pruned: &[PathBuf]) -> bool {
    if !is_dir || pruned.is_empty() {
        return false;
    }
    let hit = path
        .canonicalize()
        .is_ok_and(|resolved| pruned.contains(&resolved));
    if hit {
        tracing::debug!(path = %path.display(), "skipping excluded directory");
    }
    hit
}

fn is_excluded(path: &Path, markers: &[String]) -> bool {
    let Some(parent) = path
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
    else {
        return false;
    };
    markers.iter().any(|marker| parent.contains(marker.as_str()))
}

/// Derives the model name for an operations report.
///
/// Reports live at `<model>_<run>/<results dir>/<file>`; the model is the
/// first `_`-separated token of the directory two levels above the file.
pub fn model_from_path(path: &Path) -> Result<String> {
    path.parent()
        .and_then(Path::parent)
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('_').next())
        .filter(|model| !model.is_empty())
        .map(str::to_string)
        .ok_or_else(|| IngestError::ModelFromPath {
            path: path.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "header\n").unwrap();
    }

    #[test]
    fn test_find_files_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "switch/generation.csv");
        touch(dir.path(), "genx/2030/generation.csv");
        touch(dir.path(), "genx/2030/capacity.csv");

        let files = find_files(dir.path(), "generation.csv", &[], &[]).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("genx/2030/generation.csv"));
        assert!(files[1].ends_with("switch/generation.csv"));
    }

    #[test]
    fn test_find_files_skips_excluded_parents() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "genx/results/generation.csv");
        touch(dir.path(), "genx/results_old/generation.csv");

        let files = find_files(dir.path(), "generation.csv", &["_old".to_string()], &[]).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("results/generation.csv"));
    }

    #[test]
    fn test_find_files_prunes_excluded_dirs() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "genx/generation.csv");
        touch(dir.path(), "normalized/generation.csv");
        touch(dir.path(), "normalized/nested/generation.csv");

        let excluded = vec![dir.path().join("normalized"), dir.path().join("absent")];
        let files = find_files(dir.path(), "generation.csv", &[], &excluded).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("genx/generation.csv"));
    }

    #[test]
    fn test_missing_root() {
        let err = find_files(Path::new("/nonexistent/runs"), "generation.csv", &[], &[]).unwrap_err();
        assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_model_from_path() {
        let path = Path::new("/runs/GenX_base_2030/results/costs.csv");
        assert_eq!(model_from_path(path).unwrap(), "GenX");

        let path = Path::new("/runs/TEMOA/results/nse.csv");
        assert_eq!(model_from_path(path).unwrap(), "TEMOA");
    }

    #[test]
    fn test_model_from_shallow_path_fails() {
        let err = model_from_path(Path::new("costs.csv")).unwrap_err();
        assert!(matches!(err, IngestError::ModelFromPath { .. }));
    }
}
