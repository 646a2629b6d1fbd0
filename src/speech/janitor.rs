//! Stale artifact cleanup
//!
//! Removes speech artifacts orphaned by a prior abnormal termination. Runs
//! once at process construction and once at graceful shutdown. Idempotent;
//! per-file failures never block removal of the rest.

use std::path::Path;

use super::{ARTIFACT_EXT, ARTIFACT_PREFIX};

/// Delete every file in `dir` matching the artifact naming convention
pub fn cleanup(dir: &Path) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "artifact dir not scanned");
            return;
        }
    };

    let mut removed = 0u32;
    for entry in entries.flatten() {
        let path = entry.path();
        if !is_artifact(&path) {
            continue;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => {
                // A locked file must not block the rest of the sweep
                tracing::debug!(path = %path.display(), error = %e, "stale artifact not removed");
            }
        }
    }

    if removed > 0 {
        tracing::info!(removed, dir = %dir.display(), "stale artifacts cleaned up");
    }
}

/// Does this path look like a speech artifact?
fn is_artifact(path: &Path) -> bool {
    let name_matches = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(ARTIFACT_PREFIX));

    let ext_matches = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ARTIFACT_EXT));

    name_matches && ext_matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_only_matching_files() {
        let dir = tempfile::tempdir().unwrap();
        let stale = dir.path().join("vaani_1700000000000_0.mp3");
        let other = dir.path().join("notes.txt");
        let near_miss = dir.path().join("vaani_backup.wav");
        std::fs::write(&stale, b"x").unwrap();
        std::fs::write(&other, b"x").unwrap();
        std::fs::write(&near_miss, b"x").unwrap();

        cleanup(dir.path());

        assert!(!stale.exists());
        assert!(other.exists());
        assert!(near_miss.exists());
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let stale = dir.path().join("vaani_1700000000000_1.mp3");
        std::fs::write(&stale, b"x").unwrap();

        cleanup(dir.path());
        assert!(!stale.exists());

        // Nothing left to delete; must not panic or error
        cleanup(dir.path());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_directory_is_tolerated() {
        cleanup(Path::new("/nonexistent/vaani/artifacts"));
    }
}
