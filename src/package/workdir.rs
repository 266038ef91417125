use crate::core::{CobbleError, CobbleResult};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;
use zip::ZipArchive;

/// Extensions the deployment tool accepts, in order of preference
const PACKAGE_EXTENSIONS: &[&str] = &["appx", "appxbundle", "msix", "msixbundle"];

/// Directory holding at most one downloaded package, extracted in place
#[derive(Debug, Clone)]
pub struct WorkDir {
    dir: PathBuf,
}

impl WorkDir {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Delete the directory and everything in it, then create it empty
    pub fn recreate(&self) -> CobbleResult<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)?;
        }
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Where the archive for `file_name` is downloaded to
    pub fn archive_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(format!("{}.zip", file_name))
    }

    /// Where the extracted package for `file_name` ends up
    pub fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    pub fn has_artifact(&self, file_name: &str) -> bool {
        self.artifact_path(file_name).exists()
    }

    /// True when the directory is missing or has no entries
    pub fn is_empty(&self) -> bool {
        match fs::read_dir(&self.dir) {
            Ok(mut entries) => entries.next().is_none(),
            Err(_) => true,
        }
    }

    /// Extract `archive` into the working directory, then delete the archive
    pub fn extract(&self, archive_path: &Path) -> CobbleResult<()> {
        let file = File::open(archive_path)?;
        let mut archive = ZipArchive::new(file)
            .map_err(|e| CobbleError::Archive(format!("Invalid zip: {}", e)))?;

        debug!(
            archive = %archive_path.display(),
            entries = archive.len(),
            "extracting package archive"
        );

        archive
            .extract(&self.dir)
            .map_err(|e| CobbleError::Archive(format!("Extract failed: {}", e)))?;

        fs::remove_file(archive_path)?;
        Ok(())
    }

    /// Find the package file to hand to the deployment tool
    ///
    /// Prefers a known package extension; otherwise the first regular file.
    /// Candidates are visited in path order so the choice is stable.
    pub fn locate_package(&self) -> CobbleResult<PathBuf> {
        if !self.dir.is_dir() {
            return Err(CobbleError::Package(format!(
                "No package downloaded ({} does not exist)",
                self.dir.display()
            )));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        let preferred = PACKAGE_EXTENSIONS.iter().find_map(|ext| {
            files.iter().find(|f| {
                f.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(ext))
            })
        });

        preferred
            .or_else(|| files.first())
            .cloned()
            .ok_or_else(|| {
                CobbleError::Package(format!("No package found in {}", self.dir.display()))
            })
    }
}
