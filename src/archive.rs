// ABOUTME: Packs a source directory into an in-memory zip archive.
// ABOUTME: One entry per regular file, named by its '/'-separated relative path.

use bytes::Bytes;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;

#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("cloud_function_directory environment variable is not set")]
    SourceDirectoryNotSet,

    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write zip entry {name}: {source}")]
    Zip {
        name: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("packaging task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("failed to write archive to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A zip archive held in memory, ready to be uploaded.
#[derive(Debug, Clone)]
pub struct Archive {
    bytes: Bytes,
    entries: Vec<String>,
}

impl Archive {
    /// Zip every regular file below `source`.
    ///
    /// Entry order follows the directory walk and is not stable across
    /// platforms. Directories themselves get no entries.
    pub fn from_directory(source: &Path) -> Result<Self, PackageError> {
        if source.as_os_str().is_empty() {
            tracing::error!("cloud_function_directory environment variable is not set");
            return Err(PackageError::SourceDirectoryNotSet);
        }

        tracing::info!("Zipping directory: {}", source.display());

        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        let mut entries = Vec::new();

        for entry in WalkDir::new(source).min_depth(1) {
            let entry = entry.map_err(|source_err| PackageError::Walk {
                path: source_err.path().unwrap_or(source).to_path_buf(),
                source: source_err,
            })?;

            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let name = entry_name(source, path);
            let contents = std::fs::read(path).map_err(|e| PackageError::Read {
                path: path.to_path_buf(),
                source: e,
            })?;

            zip.start_file(name.as_str(), options)
                .map_err(|e| PackageError::Zip {
                    name: name.clone(),
                    source: e,
                })?;
            zip.write_all(&contents).map_err(|e| PackageError::Zip {
                name: name.clone(),
                source: e.into(),
            })?;

            tracing::debug!("Added {name} ({} bytes)", contents.len());
            entries.push(name);
        }

        let cursor = zip.finish().map_err(|e| PackageError::Zip {
            name: String::new(),
            source: e,
        })?;

        tracing::info!("Successfully zipped {} files", entries.len());

        Ok(Archive {
            bytes: Bytes::from(cursor.into_inner()),
            entries,
        })
    }

    /// Zip on the blocking pool; the zip writer is synchronous.
    pub async fn from_directory_blocking(source: PathBuf) -> Result<Self, PackageError> {
        tokio::task::spawn_blocking(move || Self::from_directory(&source)).await?
    }

    /// The archive bytes. Cloning is cheap.
    pub fn bytes(&self) -> Bytes {
        self.bytes.clone()
    }

    /// Entry names in the order they were written.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the archive to a file.
    pub fn save(&self, path: &Path) -> Result<(), PackageError> {
        std::fs::write(path, &self.bytes).map_err(|e| PackageError::Save {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Relative path of `path` below `root`, joined with '/'.
fn entry_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
