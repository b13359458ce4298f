//! Project artifact cleanup.
//!
//! The backend leaves project files (`*.aedt`, `*.aedt.lock`, …) and result
//! directories (`*.aedtresults`) behind, and keeps them locked while a stuck
//! instance holds the project open. Deletion therefore runs under a bounded
//! retry budget, invoking an injected recovery strategy between attempts to
//! force-close whatever still holds the files.

use std::path::Path;

use crate::error::{CoilforgeError, Result};

/// Recovery hook invoked between failed deletion attempts. The production
/// strategy spins up a disposable backend instance purely to force-close
/// stuck project handles.
pub trait ForceRelease {
    fn attempt_forced_release(&mut self) -> Result<()>;
}

/// Recovery that does nothing; for callers that know nothing holds the files.
pub struct NoRecovery;

impl ForceRelease for NoRecovery {
    fn attempt_forced_release(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Retry budget for artifact deletion.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: 3 }
    }
}

/// Delete all project artifacts under `dir`: files whose name contains
/// `.aedt` and directories ending `.aedtresults`. Retries up to the policy's
/// budget, calling the recovery strategy before each retry. Fails once the
/// budget is exhausted.
pub fn remove_project_artifacts(
    dir: &Path,
    policy: RetryPolicy,
    recovery: &mut dyn ForceRelease,
) -> Result<usize> {
    let mut last_err = None;
    for attempt in 0..=policy.max_retries {
        if attempt > 0 {
            tracing::warn!(attempt, "artifact deletion failed, forcing release and retrying");
            recovery.attempt_forced_release()?;
        }
        match try_remove(dir) {
            Ok(removed) => {
                tracing::info!(removed, dir = %dir.display(), "project artifacts removed");
                return Ok(removed);
            }
            Err(e) => last_err = Some(e),
        }
    }
    Err(CoilforgeError::Backend(format!(
        "could not remove project artifacts under {} after {} retries: {}",
        dir.display(),
        policy.max_retries,
        last_err.map(|e| e.to_string()).unwrap_or_default()
    )))
}

fn try_remove(dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if path.is_dir() {
            if name.ends_with(".aedtresults") {
                std::fs::remove_dir_all(&path)?;
                removed += 1;
            }
        } else if name.contains(".aedt") {
            std::fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}
