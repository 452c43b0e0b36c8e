//! Utility helpers for asset loading.

use anyhow::{Context, Result};
use std::path::Path;

/// Largest source file the builder will read into memory
pub const MAX_ASSET_BYTES: u64 = 64 * 1024 * 1024; // 64 MiB

/// Read a file into memory with a size cap.
pub fn read_file_with_limit(path: &Path, max_bytes: u64) -> Result<Vec<u8>> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;
    let len = metadata.len();
    if len > max_bytes {
        anyhow::bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            len,
            max_bytes
        );
    }
    std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Display name for log lines
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");
        std::fs::write(&path, vec![0u8; 32]).unwrap();

        assert_eq!(read_file_with_limit(&path, 32).unwrap().len(), 32);
        let err = read_file_with_limit(&path, 31).unwrap_err();
        assert!(err.to_string().contains("File too large"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file_with_limit(&dir.path().join("gone.tga"), 1).unwrap_err();
        assert!(err.to_string().contains("gone.tga"));
    }
}
