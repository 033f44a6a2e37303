use std::path::Path;

use tracing::{debug, warn};

use crate::types::RewardsArtifact;

/// Whether the rewards tree at `path` can be reused for the current elapsed interval count.
pub async fn is_valid(path: &Path, current_intervals_passed: u64) -> bool {
    load_valid(path, current_intervals_passed).await.is_some()
}

/// Loads the rewards tree at `path` if it can be reused for the current elapsed interval count.
///
/// The whole file must decode. A missing file is simply not valid. An unreadable or corrupt file
/// is reported and treated as not valid, so the caller regenerates it instead of failing.
pub async fn load_valid(path: &Path, current_intervals_passed: u64) -> Option<RewardsArtifact> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No cached rewards tree");
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cached rewards tree is unreadable, it will be regenerated");
            return None;
        }
    };

    let artifact: RewardsArtifact = match serde_json::from_slice(&bytes) {
        Ok(artifact) => artifact,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cached rewards tree is corrupt, it will be regenerated");
            return None;
        }
    };

    if artifact.header.intervals_passed != current_intervals_passed {
        debug!(
            path = %path.display(),
            cached_intervals_passed = artifact.header.intervals_passed,
            current_intervals_passed,
            "Cached rewards tree covers a different number of intervals"
        );
        return None;
    }
    Some(artifact)
}
