use async_trait::async_trait;
use bytes::Bytes;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// A file received from a multipart form, held in memory until stored.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub content: Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid stored file name: {0}")]
    InvalidName(String),
    #[error("File storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persists the file and returns the generated name it is served under.
    async fn store(&self, file: &UploadedFile) -> Result<String, StorageError>;
    async fn remove(&self, stored_name: &str) -> Result<(), StorageError>;
}

/// Stores uploads as flat files in one directory, served statically under `/uploads`.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        info!("Upload directory ready at {}", root.display());
        Ok(LocalFileStorage { root })
    }

    fn resolve(&self, stored_name: &str) -> Result<PathBuf, StorageError> {
        let is_plain = !stored_name.is_empty()
            && !stored_name.contains(['/', '\\'])
            && stored_name != "."
            && stored_name != "..";
        if !is_plain {
            return Err(StorageError::InvalidName(stored_name.to_string()));
        }
        Ok(self.root.join(stored_name))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, file: &UploadedFile) -> Result<String, StorageError> {
        let stored_name = generate_file_name(&file.original_name);
        let path = self.resolve(&stored_name)?;
        tokio::fs::write(&path, &file.content).await.map_err(|e| {
            error!("Failed to write upload {}: {}", path.display(), e);
            StorageError::Io(e)
        })?;
        debug!(
            original = %file.original_name,
            stored = %stored_name,
            size = file.content.len(),
            "Stored uploaded file"
        );
        Ok(stored_name)
    }

    async fn remove(&self, stored_name: &str) -> Result<(), StorageError> {
        let path = self.resolve(stored_name)?;
        tokio::fs::remove_file(&path).await?;
        debug!("Removed uploaded file {}", stored_name);
        Ok(())
    }
}

/// `<unix millis>-<random below 1e9><original extension>`
pub fn generate_file_name(original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{}-{}{}", millis, suffix, file_extension(original_name))
}

fn file_extension(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 16 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}
