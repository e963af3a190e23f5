//! Atomic file replacement
//!
//! Writes go to a sibling temp file which is synced and renamed over the
//! target, so readers see either the old contents or the new ones.

use crate::error::CredentialsFileError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Replace `path` with `data` via temp file + rename
pub fn atomic_replace(path: &Path, data: &[u8]) -> Result<(), CredentialsFileError> {
    // Write through symlinks rather than replacing the link itself
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let temp_path = temp_path_for(&target);

    if let Err(e) = write_temp(&temp_path, data) {
        let _ = fs::remove_file(&temp_path);
        return Err(CredentialsFileError::Persist {
            path: target,
            message: format!("temp file write failed: {e}"),
        });
    }

    fs::rename(&temp_path, &target).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        CredentialsFileError::Persist {
            path: target.clone(),
            message: format!("rename failed: {e}"),
        }
    })
}

fn write_temp(temp_path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.create_new(true).write(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600); // Owner read/write only
    }

    let mut temp_file = options.open(temp_path)?;
    temp_file.write_all(data)?;
    temp_file.sync_all()
}

fn temp_path_for(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "credentials".to_string());
    target.with_file_name(format!("{name}.tmp.{}", Uuid::new_v4()))
}
