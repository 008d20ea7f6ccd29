//! Writing generated files to disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::Passthrough;
use crate::error::CodegenError;
use crate::naming::module_ident;

/// Output directory receiving generated files.
///
/// Every file is written to a temporary file in the same directory and then
/// renamed into place, so readers never observe a partially written file.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Opens `root`, creating it if needed.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if the directory cannot be created.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, CodegenError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Returns the directory path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Atomically writes `contents` to `file_name`.
    ///
    /// # Returns
    /// Path of the written file.
    ///
    /// # Errors
    /// Returns `CodegenError` if the file cannot be written or moved into
    /// place.
    pub fn write(&self, file_name: &str, contents: &str) -> Result<PathBuf, CodegenError> {
        let path = self.root.join(file_name);
        let parent = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(parent)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&path)?;

        debug!("Wrote {}", path.display());
        Ok(path)
    }

    /// Copies a passthrough fragment into the directory of its namespace.
    ///
    /// The fragment keeps its file name and lands in `<root>/<namespace>/`.
    ///
    /// # Errors
    /// Returns `CodegenError` if the fragment cannot be read or written.
    pub fn copy_passthrough(&self, passthrough: &Passthrough) -> Result<PathBuf, CodegenError> {
        let file_name = passthrough.source.file_name().ok_or_else(|| {
            CodegenError::generation(format!(
                "passthrough source {} has no file name",
                passthrough.source.display()
            ))
        })?;
        let contents = fs::read_to_string(&passthrough.source)?;
        let module = module_ident(&passthrough.namespace);
        let relative = Path::new(module.trim_start_matches("r#")).join(file_name);
        self.write(&relative.to_string_lossy(), &contents)
    }
}
