pub mod cache;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::types::constant::{
    COMPRESSED_FILE_EXTENSION, COMPRESSION_LEVEL, PERFORMANCE_FILE_PREFIX, REWARDS_TREE_FILE_PREFIX,
};
use crate::types::RewardsArtifact;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode or decode {path}: {source}")]
    Serde {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to compress {path}: {source}")]
    Compression {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Local directory holding the rewards trees and performance files of every interval.
///
/// Files are written to a temporary sibling first and renamed into place, so a reader never sees
/// a partially written artifact.
#[derive(Debug, Clone)]
pub struct ArtifactStorage {
    root: PathBuf,
    network: String,
}

impl ArtifactStorage {
    pub fn new(root: impl Into<PathBuf>, network: impl Into<String>) -> Self {
        Self { root: root.into(), network: network.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn rewards_tree_path(&self, index: u64) -> PathBuf {
        self.root.join(format!("{}-{}-{}.json", REWARDS_TREE_FILE_PREFIX, self.network, index))
    }

    pub fn performance_path(&self, index: u64) -> PathBuf {
        self.root.join(format!("{}-{}-{}.json", PERFORMANCE_FILE_PREFIX, self.network, index))
    }

    /// Path of the compressed variant of `path`.
    pub fn compressed_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(".");
        name.push(COMPRESSED_FILE_EXTENSION);
        PathBuf::from(name)
    }

    pub async fn read_rewards_tree(&self, index: u64) -> Result<RewardsArtifact, ArtifactError> {
        let path = self.rewards_tree_path(index);
        let bytes = tokio::fs::read(&path).await.map_err(|source| ArtifactError::Io {
            operation: "read",
            path: path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Serde { path, source })
    }

    /// Serializes and stores the rewards tree, returning the bytes written.
    pub async fn write_rewards_tree(&self, artifact: &RewardsArtifact) -> Result<Vec<u8>, ArtifactError> {
        let path = self.rewards_tree_path(artifact.header.index);
        let bytes = serde_json::to_vec(artifact).map_err(|source| ArtifactError::Serde { path: path.clone(), source })?;
        self.write_atomic(&path, &bytes).await?;
        Ok(bytes)
    }

    /// Stores the performance file of interval `index`, returning the bytes written.
    pub async fn write_performance(&self, index: u64, performance: &serde_json::Value) -> Result<Vec<u8>, ArtifactError> {
        let path = self.performance_path(index);
        let bytes =
            serde_json::to_vec(performance).map_err(|source| ArtifactError::Serde { path: path.clone(), source })?;
        self.write_atomic(&path, &bytes).await?;
        Ok(bytes)
    }

    /// Compresses `bytes` with zstd, stores them next to `path` and returns the compressed bytes.
    pub async fn write_compressed(&self, path: &Path, bytes: &[u8]) -> Result<Vec<u8>, ArtifactError> {
        let compressed_path = Self::compressed_path(path);
        let compressed = zstd::stream::encode_all(bytes, COMPRESSION_LEVEL)
            .map_err(|source| ArtifactError::Compression { path: compressed_path.clone(), source })?;
        self.write_atomic(&compressed_path, &compressed).await?;
        debug!(
            path = %compressed_path.display(),
            original_size = bytes.len(),
            compressed_size = compressed.len(),
            "Compressed artifact"
        );
        Ok(compressed)
    }

    async fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<(), ArtifactError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|source| ArtifactError::Io {
            operation: "create",
            path: self.root.clone(),
            source,
        })?;

        let mut tmp_name = path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        tokio::fs::write(&tmp_path, bytes).await.map_err(|source| ArtifactError::Io {
            operation: "write",
            path: tmp_path.clone(),
            source,
        })?;
        tokio::fs::rename(&tmp_path, path).await.map_err(|source| ArtifactError::Io {
            operation: "rename",
            path: path.to_path_buf(),
            source,
        })
    }
}
