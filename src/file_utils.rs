use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    // @fails: When the path exists but is not a directory
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if path.exists() {
            if !path.is_dir() {
                return Err(anyhow!("Path exists but is not a directory: {:?}", path));
            }
        } else {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// List the regular files directly inside `dir` whose name ends with `extension`.
    ///
    /// The match is case-sensitive. Directories and symlinks are skipped, and the
    /// scan does not descend into subdirectories. Names come back sorted so the
    /// processing order is stable within a run.
    pub fn find_files_with_extension<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut result = Vec::new();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.with_context(|| format!("Failed to read directory: {:?}", dir))?;

            // file_type() does not follow symlinks here, so links never count as files
            if !entry.file_type().is_file() {
                continue;
            }

            // Raw bytes, so names that are not valid UTF-8 still match
            if entry.file_name().as_encoded_bytes().ends_with(extension.as_bytes()) {
                result.push(entry.into_path());
            }
        }

        Ok(result)
    }
}
