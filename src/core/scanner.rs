use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use super::AnalysisError;
use crate::parsers::common::read_source;

pub const DEFAULT_EXTENSION: &str = "pas";

/// A matched source file, loaded fully into memory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct FileScanner {
    extension: String,
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FileScanner {
    pub fn new() -> Self {
        Self::with_extension(DEFAULT_EXTENSION)
    }

    pub fn with_extension(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Lazily yields every file under `root_path` carrying the source extension.
    ///
    /// The root is validated up front. Walk errors surface as `Err` items.
    pub fn scan_directory(
        &self,
        root_path: &Path,
    ) -> Result<impl Iterator<Item = Result<PathBuf, AnalysisError>>, AnalysisError> {
        let metadata = fs::metadata(root_path).map_err(|e| AnalysisError::io(root_path, e))?;
        if !metadata.is_dir() {
            return Err(AnalysisError::NotADirectory {
                path: root_path.to_path_buf(),
            });
        }

        let root = root_path.to_path_buf();
        let extension = self.extension.clone();

        let entries = WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    let path = entry.path();
                    (entry.file_type().is_file() && has_extension(path, &extension))
                        .then(|| Ok(path.to_path_buf()))
                }
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.clone());
                    Some(Err(AnalysisError::io(path, err.into())))
                }
            });

        Ok(entries)
    }

    /// Same walk as [`scan_directory`](Self::scan_directory), reading each file.
    pub fn read_files(
        &self,
        root_path: &Path,
    ) -> Result<impl Iterator<Item = Result<SourceFile, AnalysisError>>, AnalysisError> {
        let files = self.scan_directory(root_path)?.map(|entry| {
            let path = entry?;
            debug!(path = %path.display(), "reading source file");
            let text = read_source(&path)?;
            Ok(SourceFile { path, text })
        });
        Ok(files)
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_ignores_case_and_leading_dot() {
        let scanner = FileScanner::with_extension(".pas");
        assert_eq!(scanner.extension(), "pas");
        assert!(has_extension(Path::new("a/Unit1.PAS"), scanner.extension()));
        assert!(has_extension(Path::new("Unit1.pas"), scanner.extension()));
        assert!(!has_extension(Path::new("Project1.dpr"), scanner.extension()));
        assert!(!has_extension(Path::new("pas"), scanner.extension()));
    }
}
