//! Artifact Fingerprint - checksum of loaded model files
//!
//! Logged at startup and reported in engine status, so a served
//! prediction can be traced back to the exact artifacts.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub path: String,
    pub sha256: String,
    pub size_bytes: u64,
}

/// Hash an artifact file
pub fn fingerprint(path: &Path) -> std::io::Result<ArtifactInfo> {
    let bytes = std::fs::read(path)?;
    let info = ArtifactInfo {
        path: path.display().to_string(),
        sha256: hex::encode(Sha256::digest(&bytes)),
        size_bytes: bytes.len() as u64,
    };
    log::info!("Artifact {} ({} bytes, sha256 {})", info.path, info.size_bytes, info.sha256);
    Ok(info)
}
